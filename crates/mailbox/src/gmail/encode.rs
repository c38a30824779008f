//! Reply encoding
//!
//! Assembles an RFC 2822 plain-text message and the base64url form the
//! `messages.send` endpoint expects.

use base64::prelude::*;
use log::warn;

use crate::models::ReplyRequest;

const CRLF: &str = "\r\n";

/// A reply ready for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    /// Raw RFC 2822 message text
    pub rfc2822: String,
    /// URL-safe base64 of `rfc2822` without padding
    pub raw: String,
}

/// Encode a reply into a raw message
///
/// `From` is the literal `me`; the provider substitutes the authenticated
/// account. Threading headers are emitted only when present. CR and LF in
/// header values are folded to spaces so a value cannot start a new header.
pub fn encode_reply(reply: &ReplyRequest) -> EncodedMessage {
    let mut headers: Vec<(&str, String)> = vec![
        ("From", "me".to_string()),
        ("To", header_value("To", &reply.to)),
        ("Subject", header_value("Subject", &reply.subject)),
    ];

    if let Some(in_reply_to) = &reply.in_reply_to {
        headers.push(("In-Reply-To", header_value("In-Reply-To", in_reply_to)));
    }
    if let Some(references) = &reply.references {
        headers.push(("References", header_value("References", references)));
    }
    headers.push(("Content-Type", "text/plain; charset=\"UTF-8\"".to_string()));

    let mut rfc2822 = String::with_capacity(reply.body.len() + 256);
    for (name, value) in &headers {
        rfc2822.push_str(name);
        rfc2822.push_str(": ");
        rfc2822.push_str(value);
        rfc2822.push_str(CRLF);
    }
    rfc2822.push_str(CRLF);
    rfc2822.push_str(&reply.body);

    let raw = BASE64_URL_SAFE_NO_PAD.encode(rfc2822.as_bytes());
    EncodedMessage { rfc2822, raw }
}

/// Fold each line break, with the blanks around it, into one space
fn header_value(name: &str, value: &str) -> String {
    if !value.contains(['\r', '\n']) {
        return value.to_string();
    }

    warn!("Line break in {} header value replaced with a space", name);
    let mut folded = String::with_capacity(value.len());
    let mut pending_break = false;
    for c in value.chars() {
        match c {
            '\r' | '\n' => {
                folded.truncate(folded.trim_end_matches([' ', '\t']).len());
                pending_break = true;
            }
            ' ' | '\t' if pending_break => {}
            _ => {
                if pending_break && !folded.is_empty() {
                    folded.push(' ');
                }
                pending_break = false;
                folded.push(c);
            }
        }
    }
    folded
}
