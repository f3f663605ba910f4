//! Song recommendation service.
//!
//! Recommends songs from a small catalog from a handful of user ratings, using
//! genre/artist preference aggregation, audio-feature similarity, or a hybrid
//! of both. The HTTP surface lives in [`api`]; the scoring core in [`services`].

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
