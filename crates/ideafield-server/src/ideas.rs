//! Stored idea model.
//!
//! Carries the full submission schema, including the Lightning address and
//! contact columns the bubble surface never shows. The engine feed gets the
//! trimmed [`IdeaRecord`] shape via [`StoredIdea::to_record`].

use chrono::{DateTime, Utc};
use ideafield_engine::IdeaRecord;
use serde::{Deserialize, Serialize};

/// An idea as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredIdea {
    /// Unique identifier
    pub id: String,

    /// Idea text: first line is the headline
    pub text_content: String,

    /// Display name of the submitter
    pub submitter_name: Option<String>,

    /// Lightning address for (future) vote payouts
    pub submitter_ln_address: Option<String>,

    /// Free-form contact info
    pub submitter_contact_info: Option<String>,

    /// Running vote total in sats
    pub total_sats_voted: u64,

    /// Creation time (serialized as ISO-8601)
    pub created_at: DateTime<Utc>,
}

impl StoredIdea {
    /// Create a new idea with a content-derived id and the current time.
    pub fn new(text_content: String) -> Self {
        let seed = format!("{}:{}", text_content, Utc::now().timestamp_millis());
        Self {
            id: Self::generate_id(seed.as_bytes()),
            text_content,
            submitter_name: None,
            submitter_ln_address: None,
            submitter_contact_info: None,
            total_sats_voted: 0,
            created_at: Utc::now(),
        }
    }

    /// Derive a stable id from content bytes.
    pub fn generate_id(content: &[u8]) -> String {
        blake3::hash(content).to_hex()[..16].to_string()
    }

    /// The flat record shape the bubble engine consumes.
    pub fn to_record(&self) -> IdeaRecord {
        IdeaRecord {
            id: self.id.clone(),
            text_content: self.text_content.clone(),
            submitter_name: self.submitter_name.clone(),
            total_sats_voted: self.total_sats_voted,
            created_at_ms: self.created_at.timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_idea_has_id_and_no_votes() {
        let idea = StoredIdea::new("Sell hats\nFor dogs".to_string());
        assert_eq!(idea.id.len(), 16);
        assert_eq!(idea.total_sats_voted, 0);
        assert!(idea.submitter_name.is_none());
    }

    #[test]
    fn generate_id_is_deterministic() {
        assert_eq!(
            StoredIdea::generate_id(b"same bytes"),
            StoredIdea::generate_id(b"same bytes"),
        );
        assert_ne!(
            StoredIdea::generate_id(b"one"),
            StoredIdea::generate_id(b"two"),
        );
    }

    #[test]
    fn to_record_drops_contact_columns() {
        let mut idea = StoredIdea::new("Headline".to_string());
        idea.submitter_name = Some("ada".to_string());
        idea.submitter_ln_address = Some("ada@ln.example".to_string());
        idea.total_sats_voted = 5;

        let record = idea.to_record();
        assert_eq!(record.id, idea.id);
        assert_eq!(record.submitter_name.as_deref(), Some("ada"));
        assert_eq!(record.total_sats_voted, 5);
        assert_eq!(record.created_at_ms, idea.created_at.timestamp_millis());
    }

    #[test]
    fn serializes_created_at_as_iso8601() {
        let idea = StoredIdea::new("Headline".to_string());
        let json = serde_json::to_string(&idea).unwrap();
        assert!(json.contains("created_at"));
        // RFC 3339 date separator
        assert!(json.contains('T'));

        let parsed: StoredIdea = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, idea.id);
    }
}
