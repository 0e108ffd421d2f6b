//! Decision sets
//!
//! Inserts, updates and deletes computed by one reconciliation run, keyed by
//! library-relative path. The three maps are kept disjoint.

use kyofu_core::{CreateSong, Song};
use kyofu_storage::{CatalogSession, ChangeCounts};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecisionSet {
    to_insert: BTreeMap<String, CreateSong>,
    to_update: BTreeMap<String, Song>,
    to_delete: BTreeMap<String, Song>,
}

impl DecisionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, song: CreateSong) {
        let key = song.file_path.clone();
        self.to_update.remove(&key);
        self.to_delete.remove(&key);
        self.to_insert.insert(key, song);
    }

    pub fn update(&mut self, song: Song) {
        let key = song.file_path.clone();
        self.to_insert.remove(&key);
        self.to_delete.remove(&key);
        self.to_update.insert(key, song);
    }

    pub fn delete(&mut self, song: Song) {
        let key = song.file_path.clone();
        self.to_insert.remove(&key);
        self.to_update.remove(&key);
        self.to_delete.insert(key, song);
    }

    pub fn to_insert(&self) -> &BTreeMap<String, CreateSong> {
        &self.to_insert
    }

    pub fn to_update(&self) -> &BTreeMap<String, Song> {
        &self.to_update
    }

    pub fn to_delete(&self) -> &BTreeMap<String, Song> {
        &self.to_delete
    }

    pub fn counts(&self) -> ChangeCounts {
        ChangeCounts {
            inserted: self.to_insert.len(),
            updated: self.to_update.len(),
            deleted: self.to_delete.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().is_empty()
    }

    /// Stage every decision into `session`, in path order per kind
    pub fn stage_into(self, session: &mut CatalogSession) {
        for song in self.to_insert.into_values() {
            session.stage_insert(song);
        }
        for song in self.to_update.into_values() {
            session.stage_update(song);
        }
        for song in self.to_delete.into_values() {
            session.stage_delete(song);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kyofu_core::SongFields;

    fn fields() -> SongFields {
        SongFields {
            title: "T".to_string(),
            album: "A".to_string(),
            artist: "R".to_string(),
            album_artist: None,
            genre: "G".to_string(),
            track_number: 1,
            disc_number: 1,
            release_year: 2000,
        }
    }

    fn song(path: &str) -> Song {
        Song {
            id: 1,
            library_id: 1,
            file_path: path.to_string(),
            fields: fields(),
            modified: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    fn create(path: &str) -> CreateSong {
        CreateSong {
            library_id: 1,
            file_path: path.to_string(),
            fields: fields(),
            modified: None,
        }
    }

    #[test]
    fn maps_stay_disjoint() {
        let mut set = DecisionSet::new();
        set.delete(song("a.mp3"));
        set.update(song("a.mp3"));
        set.insert(create("b.mp3"));

        assert!(set.to_delete().is_empty());
        assert!(set.to_update().contains_key("a.mp3"));
        assert_eq!(set.counts().total(), 2);
    }

    #[test]
    fn keys_are_ordered() {
        let mut set = DecisionSet::new();
        set.insert(create("c.mp3"));
        set.insert(create("a.mp3"));
        set.insert(create("b.mp3"));

        let keys: Vec<&str> = set.to_insert().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a.mp3", "b.mp3", "c.mp3"]);
    }
}
