//! Synthetic catalog generation, used when no catalog file is available

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use super::CatalogError;
use crate::models::{Song, SongId};
use crate::services::discovery::DEFAULT_SPOTLIGHT_ARTISTS;

const GENRES: [&str; 6] = ["Pop", "Rock", "Hip-Hop", "Jazz", "Classical", "Electronic"];

const OTHER_ARTISTS: [&str; 5] = ["Artist A", "Artist B", "Artist C", "Artist D", "Artist E"];

/// Generates `size` random songs with ids `0..size`
///
/// The artist pool mixes the default spotlight artists with generic names so a
/// generated catalog feeds both halves of the discovery feed.
pub fn generate_catalog<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<Song> {
    let artists: Vec<&str> = DEFAULT_SPOTLIGHT_ARTISTS
        .iter()
        .chain(OTHER_ARTISTS.iter())
        .copied()
        .collect();

    (0..size)
        .map(|i| {
            let artist = artists.choose(rng).copied().unwrap_or(OTHER_ARTISTS[0]);
            let genre = GENRES.choose(rng).copied().unwrap_or(GENRES[0]);

            Song {
                id: i as SongId,
                title: format!("Song {}", i + 1),
                artist: artist.to_string(),
                genre: genre.to_string(),
                year: rng.gen_range(2000..2024),
                duration_seconds: rng.gen_range(120..300),
                popularity: rng.gen_range(1..=100),
                danceability: round2(rng.gen()),
                energy: round2(rng.gen()),
                valence: round2(rng.gen()),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Writes songs as CSV with a header row, creating parent directories
pub fn write_csv(path: &Path, songs: &[Song]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for song in songs {
        writer.serialize(song)?;
    }
    writer.flush().map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
