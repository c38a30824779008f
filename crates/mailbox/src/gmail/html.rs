//! HTML body reduction
//!
//! Strips markup from `text/html` parts so the body reads as plain text:
//! tags are dropped, block elements become line breaks, whitespace collapses
//! the way a browser would render it, and character entities are decoded.

/// Elements whose content is never rendered
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "title", "template"];

/// Elements that start on a fresh line
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "tr", "li", "ul", "ol", "table", "blockquote", "pre", "hr", "h1", "h2", "h3", "h4", "h5",
    "h6", "section", "article", "header", "footer", "dl", "dt", "dd",
];

/// Longest entity name looked at, `&` and `;` included
const MAX_ENTITY_LEN: usize = 12;

/// Reduce an HTML document to plain text
///
/// Returns `None` when the markup cannot be tokenized (a tag is never
/// closed), leaving the caller to decide on a fallback.
pub(crate) fn html_to_text(html: &str) -> Option<String> {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(['<', '&']) {
        push_text(&mut out, &rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('&') {
            match decode_entity(rest) {
                Some((ch, len)) => {
                    push_text(&mut out, ch.encode_utf8(&mut [0; 4]));
                    rest = &rest[len..];
                }
                None => {
                    push_text(&mut out, "&");
                    rest = &rest[1..];
                }
            }
            continue;
        }

        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        // A `<` that cannot open a tag is literal text ("a < b")
        if !rest[1..].starts_with(|c: char| c.is_ascii_alphabetic() || c == '/' || c == '!') {
            push_text(&mut out, "<");
            rest = &rest[1..];
            continue;
        }

        let end = tag_end(rest)?;
        let tag = &rest[1..end];
        rest = &rest[end + 1..];

        let closing = tag.starts_with('/');
        let name = tag_name(tag);

        if !closing && SKIPPED_ELEMENTS.contains(&name.as_str()) {
            rest = skip_element(rest, &name);
        } else if name == "br" {
            trim_trailing_spaces(&mut out);
            out.push('\n');
        } else if BLOCK_ELEMENTS.contains(&name.as_str()) {
            line_break(&mut out);
        }
    }
    push_text(&mut out, rest);

    Some(tidy_lines(&out))
}

/// Byte offset of the `>` closing the tag at the start of `s`
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches(['/', '!'])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Skip past the end tag of `name`; an unclosed element swallows the rest
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let close = format!("</{}", name);
    // ASCII lowercasing keeps byte offsets aligned with `rest`
    let Some(start) = rest.to_ascii_lowercase().find(&close) else {
        return "";
    };
    let after = &rest[start..];
    after.find('>').map_or("", |end| &after[end + 1..])
}

/// Append text, collapsing whitespace runs to a single space
fn push_text(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !out.is_empty() && !out.ends_with([' ', '\n']) {
                out.push(' ');
            }
        } else if c == '\u{a0}' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
}

fn trim_trailing_spaces(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
}

/// Start a new line unless already at the start of one
fn line_break(out: &mut String) {
    trim_trailing_spaces(out);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Decode the entity at the start of `s`, returning it and its length
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let semi = s.bytes().take(MAX_ENTITY_LEN).position(|b| b == b';')?;
    let name = &s[1..semi];

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        _ => {
            let code = match name.strip_prefix('#')? {
                hex if hex.starts_with(['x', 'X']) => u32::from_str_radix(&hex[1..], 16).ok()?,
                dec => dec.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };

    Some((ch, semi + 1))
}

/// Trim each line and keep at most one blank line between paragraphs
fn tidy_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(html: &str) -> String {
        html_to_text(html).unwrap()
    }

    #[test]
    fn test_inline_markup_is_dropped() {
        let out = text(r#"<p>Hello <b>bold</b> and <a href="https://x.io/p">link</a></p>"#);
        assert_eq!(out, "Hello bold and link");
    }

    #[test]
    fn test_block_elements_become_lines() {
        let out = text("<h1>Title</h1><ul><li>one</li><li>two</li></ul>");
        assert_eq!(out, "Title\none\ntwo");
    }

    #[test]
    fn test_literal_punctuation_is_not_escaped() {
        let out = text("<p>price 5*3 = 15_000 [note] #1</p>");
        assert_eq!(out, "price 5*3 = 15_000 [note] #1");
        for marker in ["**", "](", "\\*", "\\_", "\\["] {
            assert!(!out.contains(marker), "unexpected {marker:?} in {out:?}");
        }
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            text("<p>Fish &amp; chips &lt;3 &#39;ok&#x27; &copy; &bogus; AT&T</p>"),
            "Fish & chips <3 'ok' \u{00A9} &bogus; AT&T"
        );
    }

    #[test]
    fn test_hidden_elements_are_skipped() {
        let html = "<html><head><title>T</title><style>p { color: red }</style></head>\
                    <body><!-- <p>hidden</p> --><p>Hi</p><SCRIPT>var x = \"<p>\";</SCRIPT></body></html>";
        assert_eq!(text(html), "Hi");
    }

    #[test]
    fn test_whitespace_collapses_and_breaks_survive() {
        assert_eq!(text("<div>\n  Hello\n   world\n</div>"), "Hello world");
        assert_eq!(text("a<br>b<br/><br />c"), "a\nb\n\nc");
        assert_eq!(text("keep&nbsp;&nbsp;two"), "keep  two");
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        assert_eq!(text("<p>a < b</p>"), "a < b");
    }

    #[test]
    fn test_unterminated_tag_fails() {
        assert_eq!(html_to_text("<p>cut off <a href=\"x"), None);
    }
}
