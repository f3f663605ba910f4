use crate::catalog::Catalog;
use crate::models::{Song, UserRatings};

use super::features::{cosine_similarity, mean_vector, FeatureSpace, FeatureVector};
use super::ranking::{top_by_popularity, top_by_score};

/// Scores unrated songs by cosine similarity to the user's taste profile
///
/// The profile is the mean standardized feature vector of the songs the user
/// liked. Standardization is fit over the whole catalog, not just the liked
/// songs, so similarities are comparable across requests.
pub struct SimilarityScorer<'a> {
    catalog: &'a Catalog,
    space: &'a FeatureSpace,
}

impl<'a> SimilarityScorer<'a> {
    /// `space` must have been fit over `catalog`
    pub fn new(catalog: &'a Catalog, space: &'a FeatureSpace) -> Self {
        Self { catalog, space }
    }

    /// Mean standardized vector of liked catalog songs
    pub fn profile(&self, ratings: &UserRatings) -> Option<FeatureVector> {
        let liked = ratings
            .liked()
            .filter_map(|id| self.catalog.position(id))
            .filter_map(|position| self.space.vector(position));

        mean_vector(liked)
    }

    /// Similarity of every unrated song in catalog order, or `None` when the
    /// user liked no catalog song
    pub fn similarities(&self, ratings: &UserRatings) -> Option<Vec<(&'a Song, f64)>> {
        let profile = self.profile(ratings)?;

        Some(
            self.catalog
                .songs()
                .iter()
                .zip(self.space.vectors())
                .filter(|(song, _)| !ratings.is_rated(song.id))
                .map(|(song, vector)| (song, cosine_similarity(&profile, vector)))
                .collect(),
        )
    }

    /// Top `n` unrated songs; falls back to popularity without liked songs
    pub fn recommend(&self, ratings: &UserRatings, n: usize) -> Vec<&'a Song> {
        match self.similarities(ratings) {
            Some(scored) => top_by_score(scored, n),
            None => {
                tracing::debug!(ratings = ratings.len(), "No liked songs, using popularity");
                top_by_popularity(self.catalog, ratings, n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::song_with_features;
    use crate::models::SongId;

    fn ids(songs: &[&Song]) -> Vec<SongId> {
        songs.iter().map(|s| s.id).collect()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            song_with_features(0, "A", "Rock", 2001, 150, 20, 0.9, 0.9, 0.1),
            song_with_features(1, "B", "Pop", 2020, 280, 90, 0.1, 0.2, 0.9),
            song_with_features(2, "C", "Jazz", 2001, 150, 20, 0.9, 0.9, 0.1),
            song_with_features(3, "D", "Rock", 2003, 160, 25, 0.8, 0.85, 0.2),
            song_with_features(4, "E", "Pop", 2019, 270, 85, 0.2, 0.3, 0.8),
            song_with_features(5, "F", "Jazz", 2010, 210, 60, 0.5, 0.5, 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_identical_song_has_similarity_one() {
        let catalog = catalog();
        let space = FeatureSpace::fit(&catalog);
        let ratings: UserRatings = [(0, 5.0)].into_iter().collect();

        let scores = SimilarityScorer::new(&catalog, &space)
            .similarities(&ratings)
            .unwrap();
        let twin = scores.iter().find(|(s, _)| s.id == 2).unwrap().1;
        assert!((twin - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommend_orders_by_similarity() {
        let catalog = catalog();
        let space = FeatureSpace::fit(&catalog);
        let ratings: UserRatings = [(0, 5.0)].into_iter().collect();

        let top = SimilarityScorer::new(&catalog, &space).recommend(&ratings, 3);
        assert_eq!(top[0].id, 2);
        assert_eq!(top[1].id, 3);
        assert!(top.iter().all(|s| s.id != 0));

        // Opposite taste ends up at the bottom
        let all = SimilarityScorer::new(&catalog, &space).recommend(&ratings, 10);
        assert_eq!(all.len(), 5);
        let mut bottom = ids(&all[3..]);
        bottom.sort();
        assert_eq!(bottom, vec![1, 4]);
    }

    #[test]
    fn test_profile_is_mean_of_liked() {
        let catalog = catalog();
        let space = FeatureSpace::fit(&catalog);
        // 1 is disliked and must not enter the profile
        let ratings: UserRatings = [(0, 4.0), (4, 5.0), (1, 2.0)].into_iter().collect();

        let profile = SimilarityScorer::new(&catalog, &space)
            .profile(&ratings)
            .unwrap();
        let a = space.vector(0).unwrap();
        let e = space.vector(4).unwrap();
        for i in 0..profile.len() {
            assert!((profile[i] - (a[i] + e[i]) / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_liked_songs_falls_back_to_popularity() {
        let catalog = catalog();
        let space = FeatureSpace::fit(&catalog);
        let ratings: UserRatings = [(1, 3.0), (999, 5.0)].into_iter().collect();

        let top = SimilarityScorer::new(&catalog, &space).recommend(&ratings, 2);
        // 1 is the most popular but already rated
        assert_eq!(ids(&top), vec![4, 5]);
    }

    #[test]
    fn test_empty_ratings_fall_back_to_popularity() {
        let catalog = catalog();
        let space = FeatureSpace::fit(&catalog);
        let top = SimilarityScorer::new(&catalog, &space).recommend(&UserRatings::new(), 3);
        assert_eq!(ids(&top), vec![1, 4, 5]);
    }

    #[test]
    fn test_zero_variance_column_is_neutral() {
        let catalog = Catalog::new(vec![
            song_with_features(0, "A", "Rock", 2020, 150, 20, 0.9, 0.9, 0.1),
            song_with_features(1, "B", "Pop", 2020, 280, 90, 0.1, 0.2, 0.9),
            song_with_features(2, "C", "Jazz", 2020, 155, 22, 0.85, 0.9, 0.15),
            song_with_features(3, "D", "Rock", 2020, 210, 50, 0.5, 0.5, 0.5),
        ])
        .unwrap();
        let space = FeatureSpace::fit(&catalog);
        assert!(space.vectors().iter().all(|v| v[0] == 0.0));

        let ratings: UserRatings = [(0, 5.0)].into_iter().collect();
        let scores = SimilarityScorer::new(&catalog, &space)
            .similarities(&ratings)
            .unwrap();
        assert!(scores.iter().all(|(_, s)| s.is_finite()));

        let top = SimilarityScorer::new(&catalog, &space).recommend(&ratings, 1);
        assert_eq!(top[0].id, 2);
    }

    #[test]
    fn test_liked_song_at_catalog_mean_scores_zero() {
        // Two mirrored songs put the third exactly on the mean
        let catalog = Catalog::new(vec![
            song_with_features(0, "A", "Rock", 2000, 100, 10, 0.0, 0.0, 0.0),
            song_with_features(1, "B", "Pop", 2010, 200, 50, 0.5, 0.5, 0.5),
            song_with_features(2, "C", "Jazz", 2020, 300, 90, 1.0, 1.0, 1.0),
        ])
        .unwrap();
        let space = FeatureSpace::fit(&catalog);
        let ratings: UserRatings = [(1, 5.0)].into_iter().collect();

        let scores = SimilarityScorer::new(&catalog, &space)
            .similarities(&ratings)
            .unwrap();
        assert!(scores.iter().all(|(_, s)| *s == 0.0));
    }
}
