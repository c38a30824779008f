//! Provider labels and the logical mailbox views built on them

use serde::{Deserialize, Serialize};

/// Well-known Gmail system label IDs
pub mod labels {
    pub const INBOX: &str = "INBOX";
    pub const UNREAD: &str = "UNREAD";
    pub const SENT: &str = "SENT";
    pub const DRAFT: &str = "DRAFT";
}

/// A logical mailbox view selectable by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailboxView {
    #[default]
    Inbox,
    Unread,
    Sent,
    Drafts,
}

impl MailboxView {
    /// Parse a view name; anything unrecognized falls back to the inbox
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "unread" => Self::Unread,
            "sent" => Self::Sent,
            "drafts" => Self::Drafts,
            _ => Self::Inbox,
        }
    }

    /// Label IDs the provider must match for this view
    pub fn label_ids(self) -> &'static [&'static str] {
        match self {
            Self::Inbox => &[labels::INBOX],
            Self::Unread => &[labels::INBOX, labels::UNREAD],
            Self::Sent => &[labels::SENT],
            Self::Drafts => &[labels::DRAFT],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Unread => "unread",
            Self::Sent => "sent",
            Self::Drafts => "drafts",
        }
    }
}

impl From<&str> for MailboxView {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_label_mapping() {
        assert_eq!(MailboxView::Inbox.label_ids(), &["INBOX"]);
        assert_eq!(MailboxView::Unread.label_ids(), &["INBOX", "UNREAD"]);
        assert_eq!(MailboxView::Sent.label_ids(), &["SENT"]);
        assert_eq!(MailboxView::Drafts.label_ids(), &["DRAFT"]);
    }

    #[test]
    fn test_parse_known_views() {
        assert_eq!(MailboxView::parse("unread"), MailboxView::Unread);
        assert_eq!(MailboxView::parse("SENT"), MailboxView::Sent);
        assert_eq!(MailboxView::parse(" drafts "), MailboxView::Drafts);
    }

    #[test]
    fn test_unknown_view_falls_back_to_inbox() {
        assert_eq!(MailboxView::parse("archive"), MailboxView::Inbox);
        assert_eq!(MailboxView::parse(""), MailboxView::Inbox);
    }
}
