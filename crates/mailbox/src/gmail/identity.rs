//! Sender identity parsing
//!
//! Recovers a display name and address from a free-form `From` value.
//! Always yields a usable pair; unparseable input degrades to placeholders.

use crate::models::{Identity, UNKNOWN_ADDRESS, UNKNOWN_SENDER};

/// Parse a header value like `"John Doe" <john@example.com>`
pub fn parse_identity(value: &str) -> Identity {
    let value = value.trim();

    if let Some(angle_start) = value.rfind('<')
        && let Some(angle_len) = value[angle_start..].find('>')
    {
        let address = value[angle_start + 1..angle_start + angle_len].trim();
        if !address.is_empty() {
            let name = strip_quotes(&value[..angle_start]);
            let name = if name.is_empty() {
                local_part(address)
            } else {
                name
            };
            return Identity::new(or_unknown_sender(name), address);
        }
    }

    if value.contains('@') {
        return Identity::new(or_unknown_sender(local_part(value)), value);
    }

    if !value.is_empty() {
        return Identity::new(or_unknown_sender(strip_quotes(value)), UNKNOWN_ADDRESS);
    }

    Identity::unknown()
}

/// Text before the `@` of an address
fn local_part(address: &str) -> &str {
    address.split('@').next().unwrap_or_default().trim()
}

fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

fn or_unknown_sender(name: &str) -> String {
    if name.is_empty() {
        UNKNOWN_SENDER.to_string()
    } else {
        name.to_string()
    }
}
