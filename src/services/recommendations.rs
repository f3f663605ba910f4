use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    models::{Song, SongId, UserRatings},
};

use super::{features::FeatureSpace, preference::PreferenceScorer, similarity::SimilarityScorer};

/// Error types for the recommendation engine
#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    #[error("Number of recommendations must be positive")]
    InvalidCount,

    #[error("Unknown recommendation method '{0}', expected preference, similarity or hybrid")]
    UnknownMethod(String),
}

/// Which scoring strategy to use
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMethod {
    /// Genre and artist affinity from explicit ratings
    Preference,
    /// Feature similarity to liked songs
    Similarity,
    /// Both, merged with first-occurrence deduplication
    #[default]
    Hybrid,
}

impl FromStr for RecommendationMethod {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preference" | "collaborative" => Ok(Self::Preference),
            "similarity" | "content" | "content_based" => Ok(Self::Similarity),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(RecommendError::UnknownMethod(s.to_string())),
        }
    }
}

impl Display for RecommendationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preference => write!(f, "preference"),
            Self::Similarity => write!(f, "similarity"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Recommends songs from a fixed catalog
///
/// Holds the catalog together with its standardized feature matrix, which is
/// fit once on construction. Every call to [`recommend`](Self::recommend) is
/// stateless, so the engine can be shared freely between requests.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    space: FeatureSpace,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let space = FeatureSpace::fit(&catalog);
        Self { catalog, space }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns up to `n` unrated songs, without duplicates
    pub fn recommend(
        &self,
        ratings: &UserRatings,
        method: RecommendationMethod,
        n: usize,
    ) -> Result<Vec<Song>, RecommendError> {
        if n == 0 {
            return Err(RecommendError::InvalidCount);
        }

        let preference = PreferenceScorer::new(&self.catalog);
        let similarity = SimilarityScorer::new(&self.catalog, &self.space);

        let songs = match method {
            RecommendationMethod::Preference => preference.recommend(ratings, n),
            RecommendationMethod::Similarity => similarity.recommend(ratings, n),
            RecommendationMethod::Hybrid => {
                let per_scorer = n / 2 + 1;
                merge_unique(
                    preference.recommend(ratings, per_scorer),
                    similarity.recommend(ratings, per_scorer),
                    n,
                )
            }
        };

        tracing::debug!(
            method = %method,
            requested = n,
            returned = songs.len(),
            "Recommendations computed"
        );

        Ok(songs.into_iter().cloned().collect())
    }
}

/// Concatenates `first` and `second`, keeping the first occurrence of each id
fn merge_unique<'a>(first: Vec<&'a Song>, second: Vec<&'a Song>, n: usize) -> Vec<&'a Song> {
    let mut seen: HashSet<SongId> = HashSet::new();
    let mut merged = Vec::with_capacity(n);

    for song in first.into_iter().chain(second) {
        if merged.len() >= n {
            break;
        }
        if seen.insert(song.id) {
            merged.push(song);
        }
    }

    merged
}
