//! Read-only song catalog
//!
//! The catalog is built once at startup (see [`load::load_or_generate`]) and
//! shared behind an `Arc` for the lifetime of the process.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Song, SongId, SongProblem};

pub mod generate;
pub mod load;

pub use generate::{generate_catalog, write_csv};
pub use load::{load_or_generate, read_csv, CatalogSettings, LoadProblem, LoadReport};

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Song {id} is invalid: {problem}")]
    InvalidSong { id: SongId, problem: SongProblem },

    #[error("Duplicate song id {0}")]
    DuplicateId(SongId),

    #[error("No valid songs found in {0}")]
    NoValidSongs(PathBuf),
}

/// Immutable, ordered song collection with id lookup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    index: HashMap<SongId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid songs and duplicate ids
    pub fn new(songs: Vec<Song>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(songs.len());

        for (position, song) in songs.iter().enumerate() {
            song.validate().map_err(|problem| CatalogError::InvalidSong {
                id: song.id,
                problem,
            })?;

            if index.insert(song.id, position).is_some() {
                return Err(CatalogError::DuplicateId(song.id));
            }
        }

        Ok(Self { songs, index })
    }

    /// All songs in catalog order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.index.get(&id).map(|&position| &self.songs[position])
    }

    /// Position of a song in catalog order
    pub fn position(&self, id: SongId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: SongId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Song, SongId};

    /// Song with neutral audio features; tests override what they need
    pub fn song(id: SongId, artist: &str, genre: &str, popularity: u8) -> Song {
        Song {
            id,
            title: format!("Song {}", id + 1),
            artist: artist.to_string(),
            genre: genre.to_string(),
            year: 2010,
            duration_seconds: 200,
            popularity,
            danceability: 0.5,
            energy: 0.5,
            valence: 0.5,
        }
    }

    /// Same as [`song`] with explicit numeric features
    #[allow(clippy::too_many_arguments)]
    pub fn song_with_features(
        id: SongId,
        artist: &str,
        genre: &str,
        year: i32,
        duration_seconds: u32,
        popularity: u8,
        danceability: f64,
        energy: f64,
        valence: f64,
    ) -> Song {
        Song {
            year,
            duration_seconds,
            danceability,
            energy,
            valence,
            ..song(id, artist, genre, popularity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::song;
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![
            song(10, "Artist A", "Rock", 50),
            song(3, "Artist B", "Pop", 70),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(3).unwrap().artist, "Artist B");
        assert_eq!(catalog.position(10), Some(0));
        assert!(catalog.get(99).is_none());
        assert!(!catalog.contains(99));
    }

    #[test]
    fn test_preserves_order() {
        let catalog = Catalog::new(vec![
            song(2, "Artist A", "Rock", 50),
            song(1, "Artist B", "Pop", 70),
            song(0, "Artist C", "Jazz", 10),
        ])
        .unwrap();

        let ids: Vec<SongId> = catalog.songs().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1, 0]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(vec![
            song(1, "Artist A", "Rock", 50),
            song(1, "Artist B", "Pop", 70),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_invalid_song_rejected() {
        let result = Catalog::new(vec![song(4, "Artist A", "Rock", 0)]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidSong {
                id: 4,
                problem: SongProblem::PopularityOutOfRange(0)
            })
        ));
    }

    #[test]
    fn test_empty_catalog_allowed() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
