//! # longbox-match
//!
//! Name normalization and the four-tier match cascade: exact, substring,
//! token overlap, edit distance. Pure functions over candidate name pools;
//! no store access and no cross-call state.

pub mod cascade;
pub mod normalizer;

pub use cascade::{match_cascade, CascadeConfig, MatchTier, ScoredMatch};
pub use normalizer::Normalizer;
