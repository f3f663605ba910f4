use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SongId;

/// Ratings at or above this value mark a song as liked
pub const LIKED_THRESHOLD: f64 = 4.0;

/// Explicit per-song ratings supplied with a single request
///
/// Serialized as a plain JSON object keyed by song id, e.g. `{"3": 5, "17": 2.5}`.
/// Keys are kept ordered so score accumulation is reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct UserRatings(BTreeMap<SongId, f64>);

impl UserRatings {
    /// Creates an empty set of ratings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the user rated this song
    pub fn is_rated(&self, song_id: SongId) -> bool {
        self.0.contains_key(&song_id)
    }

    pub fn get(&self, song_id: SongId) -> Option<f64> {
        self.0.get(&song_id).copied()
    }

    /// Iterates `(song_id, rating)` pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (SongId, f64)> + '_ {
        self.0.iter().map(|(id, rating)| (*id, *rating))
    }

    /// Ids of songs rated at or above [`LIKED_THRESHOLD`]
    pub fn liked(&self) -> impl Iterator<Item = SongId> + '_ {
        self.iter()
            .filter(|(_, rating)| *rating >= LIKED_THRESHOLD)
            .map(|(id, _)| id)
    }
}

impl FromIterator<(SongId, f64)> for UserRatings {
    fn from_iter<T: IntoIterator<Item = (SongId, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
