use crate::foundation::models::SongRecord;
use std::sync::Arc;

/// Read-only, ordered view over the songs currently on screen.
///
/// Cloning is cheap and every clone shares the same backing slice, so a view
/// handed to a renderer can never observe a half-applied replacement.
#[derive(Debug, Clone)]
pub struct SongCollection {
    songs: Arc<[SongRecord]>,
}

impl SongCollection {
    pub fn new(songs: Vec<SongRecord>) -> Self {
        Self {
            songs: Arc::from(songs),
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SongRecord> {
        self.songs.get(index)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &SongRecord> {
        self.songs.iter()
    }
}

impl Default for SongCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
