//! Discovery feed: a shuffled, balanced sample of the catalog for rating.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::models::Song;

/// Artists featured in their own half of the discovery feed by default
pub const DEFAULT_SPOTLIGHT_ARTISTS: [&str; 5] = [
    "Arijit Singh",
    "Shreya Ghoshal",
    "Sonu Nigam",
    "Neha Kakkar",
    "Atif Aslam",
];

/// Picks up to `per_group` spotlight songs followed by up to `per_group` others
///
/// Both groups are drawn from a single shuffle of the catalog.
pub fn discovery_feed<R: Rng + ?Sized>(
    catalog: &Catalog,
    spotlight_artists: &[String],
    per_group: usize,
    rng: &mut R,
) -> Vec<Song> {
    let mut shuffled: Vec<&Song> = catalog.songs().iter().collect();
    shuffled.shuffle(rng);

    let (spotlight, others): (Vec<&Song>, Vec<&Song>) = shuffled
        .into_iter()
        .partition(|song| spotlight_artists.iter().any(|artist| *artist == song.artist));

    spotlight
        .into_iter()
        .take(per_group)
        .chain(others.into_iter().take(per_group))
        .cloned()
        .collect()
}
