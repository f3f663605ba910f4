//! Numeric feature vectors, z-score standardization and cosine similarity.

use crate::catalog::Catalog;
use crate::models::Song;

/// Number of numeric features per song
pub const FEATURE_COUNT: usize = 6;

/// `(year, duration_seconds, popularity, danceability, energy, valence)`
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Extracts the numeric feature vector of a song
pub fn feature_vector(song: &Song) -> FeatureVector {
    [
        f64::from(song.year),
        f64::from(song.duration_seconds),
        f64::from(song.popularity),
        song.danceability,
        song.energy,
        song.valence,
    ]
}

/// Per-dimension mean and population standard deviation
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: FeatureVector,
    pub std: FeatureVector,
}

impl StandardScaler {
    /// Fits the scaler over all rows
    ///
    /// Uses the population standard deviation (divides by `n`). An empty input
    /// yields zero mean and zero deviation.
    pub fn fit(rows: &[FeatureVector]) -> Self {
        let mut mean = [0.0; FEATURE_COUNT];
        let mut std = [0.0; FEATURE_COUNT];

        if rows.is_empty() {
            return Self { mean, std };
        }

        let n = rows.len() as f64;

        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        for row in rows {
            for ((s, x), m) in std.iter_mut().zip(row).zip(&mean) {
                *s += (x - m) * (x - m);
            }
        }
        for (s, m) in std.iter_mut().zip(&mean) {
            *s = (*s / n).sqrt();
            // Constant columns can pick up rounding noise in the mean
            if *s <= 1e-12 * m.abs().max(1.0) {
                *s = 0.0;
            }
        }

        Self { mean, std }
    }

    /// Standardizes a vector; zero-variance dimensions map to 0
    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (((z, x), mean), std) in out.iter_mut().zip(row).zip(&self.mean).zip(&self.std) {
            if *std > 0.0 {
                *z = (x - mean) / std;
            }
        }
        out
    }
}

/// Standardized feature vectors of every catalog song, in catalog order
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    vectors: Vec<FeatureVector>,
}

impl FeatureSpace {
    /// Standardizes the whole catalog against its own statistics
    pub fn fit(catalog: &Catalog) -> Self {
        let raw: Vec<FeatureVector> = catalog.songs().iter().map(feature_vector).collect();
        let scaler = StandardScaler::fit(&raw);
        let vectors = raw.iter().map(|row| scaler.transform(row)).collect();
        Self { vectors }
    }

    /// Standardized vector for the song at `position` in catalog order
    pub fn vector(&self, position: usize) -> Option<&FeatureVector> {
        self.vectors.get(position)
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }
}

/// Arithmetic mean of the given vectors, or `None` if there are none
pub fn mean_vector<'a>(rows: impl IntoIterator<Item = &'a FeatureVector>) -> Option<FeatureVector> {
    let mut sum = [0.0; FEATURE_COUNT];
    let mut count = 0usize;

    for row in rows {
        for (s, x) in sum.iter_mut().zip(row) {
            *s += x;
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }

    for s in sum.iter_mut() {
        *s /= count as f64;
    }
    Some(sum)
}

/// Cosine similarity; 0.0 when either vector has zero magnitude
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
