pub mod discovery;
pub mod features;
pub mod preference;
pub mod ranking;
pub mod recommendations;
pub mod similarity;

pub use recommendations::{RecommendError, RecommendationEngine, RecommendationMethod};
