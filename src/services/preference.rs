use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::models::{Song, UserRatings};

use super::ranking::{top_by_popularity, top_by_score};

pub const GENRE_WEIGHT: f64 = 0.6;
pub const ARTIST_WEIGHT: f64 = 0.4;
pub const POPULARITY_WEIGHT: f64 = 0.01;

/// Summed ratings per genre and artist
#[derive(Debug, Default)]
struct Affinity<'a> {
    genres: HashMap<&'a str, f64>,
    artists: HashMap<&'a str, f64>,
    /// Ratings that matched a catalog song
    matched: usize,
}

impl<'a> Affinity<'a> {
    fn from_ratings(catalog: &'a Catalog, ratings: &UserRatings) -> Self {
        let mut affinity = Self::default();

        for (song_id, rating) in ratings.iter() {
            let Some(song) = catalog.get(song_id) else {
                tracing::debug!(song_id, "Ignoring rating for unknown song");
                continue;
            };

            if !rating.is_finite() {
                tracing::debug!(song_id, rating, "Ignoring non-finite rating");
                continue;
            }

            accumulate(affinity.genres.entry(song.genre.as_str()).or_insert(0.0), rating);
            accumulate(affinity.artists.entry(song.artist.as_str()).or_insert(0.0), rating);
            affinity.matched += 1;
        }

        affinity
    }

    fn score(&self, song: &Song) -> f64 {
        GENRE_WEIGHT * self.genres.get(song.genre.as_str()).copied().unwrap_or(0.0)
            + ARTIST_WEIGHT * self.artists.get(song.artist.as_str()).copied().unwrap_or(0.0)
            + POPULARITY_WEIGHT * f64::from(song.popularity)
    }
}

/// Adds a rating to a running total, saturating at the largest finite values
///
/// Keeping both totals finite means a score can overflow to an infinity but
/// never to NaN.
fn accumulate(total: &mut f64, rating: f64) {
    *total = (*total + rating).clamp(f64::MIN, f64::MAX);
}

/// Scores unrated songs by the user's genre and artist affinity
///
/// Every rating adds to the running total of its song's genre and artist. An
/// unrated song scores `0.6 * genre + 0.4 * artist + 0.01 * popularity`, so
/// songs outside the user's taste still rank by popularity.
pub struct PreferenceScorer<'a> {
    catalog: &'a Catalog,
}

impl<'a> PreferenceScorer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Scores of all unrated songs in catalog order, or `None` when no rating
    /// refers to a catalog song
    pub fn scores(&self, ratings: &UserRatings) -> Option<Vec<(&'a Song, f64)>> {
        let affinity = Affinity::from_ratings(self.catalog, ratings);
        if affinity.matched == 0 {
            return None;
        }

        Some(
            self.catalog
                .songs()
                .iter()
                .filter(|song| !ratings.is_rated(song.id))
                .map(|song| (song, affinity.score(song)))
                .collect(),
        )
    }

    /// Top `n` unrated songs; falls back to popularity without usable ratings
    pub fn recommend(&self, ratings: &UserRatings, n: usize) -> Vec<&'a Song> {
        match self.scores(ratings) {
            Some(scored) => top_by_score(scored, n),
            None => {
                tracing::debug!(ratings = ratings.len(), "No preference signal, using popularity");
                top_by_popularity(self.catalog, ratings, n)
            }
        }
    }
}
