use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a song, unique within a catalog
pub type SongId = u32;

/// A single catalog entry
///
/// Field names on the wire and in the catalog CSV follow the historical
/// `song_id` / `duration` column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    #[serde(rename = "song_id")]
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    /// Popularity in 1..=100
    pub popularity: u8,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
}

/// Reasons a song record cannot enter the catalog
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SongProblem {
    #[error("popularity {0} is outside 1..=100")]
    PopularityOutOfRange(u8),

    #[error("{field} value {value} is outside [0, 1]")]
    FeatureOutOfRange { field: &'static str, value: f64 },

    #[error("duration must be positive")]
    ZeroDuration,
}

impl Song {
    /// Checks the value ranges every catalog song must satisfy
    pub fn validate(&self) -> Result<(), SongProblem> {
        if !(1..=100).contains(&self.popularity) {
            return Err(SongProblem::PopularityOutOfRange(self.popularity));
        }

        if self.duration_seconds == 0 {
            return Err(SongProblem::ZeroDuration);
        }

        for (field, value) in [
            ("danceability", self.danceability),
            ("energy", self.energy),
            ("valence", self.valence),
        ] {
            // NaN fails the range check as well
            if !(0.0..=1.0).contains(&value) {
                return Err(SongProblem::FeatureOutOfRange { field, value });
            }
        }

        Ok(())
    }
}
