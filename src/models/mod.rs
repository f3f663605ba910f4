pub mod ratings;
pub mod song;

pub use ratings::{UserRatings, LIKED_THRESHOLD};
pub use song::{Song, SongId, SongProblem};
