//! Persistent idea store using RocksDB.
//!
//! Keys are `idea:{id}` with JSON values. The API treats the store as
//! append-only: ideas are inserted and listed, never deleted.

use std::path::Path;

use rocksdb::{Options, DB};

use crate::error::Result;
use crate::ideas::StoredIdea;

const IDEA_PREFIX: &str = "idea:";

/// Storage backend for idea data.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    /// Store an idea.
    pub fn put_idea(&self, idea: &StoredIdea) -> Result<()> {
        let key = format!("{}{}", IDEA_PREFIX, idea.id);
        let value = serde_json::to_vec(idea)?;
        self.db.put(key.as_bytes(), value)?;
        Ok(())
    }

    /// Get an idea by id.
    pub fn get_idea(&self, id: &str) -> Result<Option<StoredIdea>> {
        let key = format!("{IDEA_PREFIX}{id}");
        match self.db.get(key.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    /// List all ideas, newest first (ties broken by id for determinism).
    pub fn list_ideas(&self) -> Result<Vec<StoredIdea>> {
        let prefix = IDEA_PREFIX.as_bytes();
        let mut ideas = Vec::new();

        let iter = self.db.prefix_iterator(prefix);
        for item in iter {
            let (key, value) = item?;
            if key.starts_with(prefix) {
                let idea: StoredIdea = serde_json::from_slice(&value)?;
                ideas.push(idea);
            } else {
                break;
            }
        }

        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(ideas)
    }

    /// Number of stored ideas.
    pub fn idea_count(&self) -> Result<usize> {
        Ok(self.list_ideas()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        (dir, storage)
    }

    #[test]
    fn put_and_get_round_trip() {
        let (_dir, storage) = open_temp();
        let idea = StoredIdea::new("Grow mushrooms\nIn the basement".to_string());

        storage.put_idea(&idea).unwrap();
        let loaded = storage.get_idea(&idea.id).unwrap().unwrap();
        assert_eq!(loaded, idea);
    }

    #[test]
    fn get_missing_is_none() {
        let (_dir, storage) = open_temp();
        assert!(storage.get_idea("nope").unwrap().is_none());
    }

    #[test]
    fn list_orders_newest_first() {
        let (_dir, storage) = open_temp();
        let base = Utc::now();

        for (i, text) in ["oldest", "middle", "newest"].iter().enumerate() {
            let mut idea = StoredIdea::new(text.to_string());
            idea.created_at = base + Duration::seconds(i as i64);
            storage.put_idea(&idea).unwrap();
        }

        let ideas = storage.list_ideas().unwrap();
        let texts: Vec<&str> = ideas.iter().map(|i| i.text_content.as_str()).collect();
        assert_eq!(texts, ["newest", "middle", "oldest"]);
        assert_eq!(storage.idea_count().unwrap(), 3);
    }

    #[test]
    fn put_overwrites_same_id() {
        let (_dir, storage) = open_temp();
        let mut idea = StoredIdea::new("v1".to_string());
        storage.put_idea(&idea).unwrap();

        idea.total_sats_voted = 100;
        storage.put_idea(&idea).unwrap();

        let loaded = storage.get_idea(&idea.id).unwrap().unwrap();
        assert_eq!(loaded.total_sats_voted, 100);
        assert_eq!(storage.idea_count().unwrap(), 1);
    }
}
