//! The idea record shape the engine consumes.
//!
//! Records are produced by an external feed (HTTP list endpoint backed by the
//! idea store) and are immutable within a session; the engine only reads
//! them and keys its bubble state by `id`.

/// A single submitted idea, as handed to the field by the feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdeaRecord {
    /// Opaque unique identifier
    pub id: String,
    /// Idea text: first line is the headline, the rest is the body
    pub text_content: String,
    /// Display name of the submitter, if given
    pub submitter_name: Option<String>,
    /// Running vote total in sats
    pub total_sats_voted: u64,
    /// Creation time, unix milliseconds (the wire format upstream is
    /// ISO-8601; the feed converts before handing records to the engine)
    pub created_at_ms: i64,
}

impl IdeaRecord {
    /// Create a record with no submitter and no votes.
    pub fn new(id: impl Into<String>, text_content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text_content: text_content.into(),
            submitter_name: None,
            total_sats_voted: 0,
            created_at_ms: 0,
        }
    }

    /// First line of the text content.
    pub fn headline(&self) -> &str {
        self.text_content.lines().next().unwrap_or("")
    }

    /// Everything after the first line, or `None` for single-line ideas.
    pub fn body(&self) -> Option<&str> {
        self.text_content
            .split_once('\n')
            .map(|(_, rest)| rest)
            .filter(|rest| !rest.is_empty())
    }
}
