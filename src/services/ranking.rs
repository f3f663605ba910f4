use crate::catalog::Catalog;
use crate::models::{Song, UserRatings};

/// Most popular unrated songs, the fallback when there is no usable signal
///
/// Sorted by popularity descending; equal popularity keeps catalog order.
pub fn top_by_popularity<'a>(catalog: &'a Catalog, ratings: &UserRatings, n: usize) -> Vec<&'a Song> {
    let mut songs: Vec<&Song> = catalog
        .songs()
        .iter()
        .filter(|song| !ratings.is_rated(song.id))
        .collect();

    // sort_by is stable
    songs.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    songs.truncate(n);
    songs
}

/// Highest scoring songs, ties broken by ascending song id
pub fn top_by_score(mut scored: Vec<(&Song, f64)>, n: usize) -> Vec<&Song> {
    scored.sort_by(|(a, score_a), (b, score_b)| {
        score_b.total_cmp(score_a).then_with(|| a.id.cmp(&b.id))
    });

    scored.into_iter().take(n).map(|(song, _)| song).collect()
}
