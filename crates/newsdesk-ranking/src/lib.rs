//! Relevance scoring and tiered filtering of extracted candidates.

pub mod filter;
pub mod scorer;

pub use filter::{filter_candidates, tag_unfiltered};
pub use scorer::{normalize, score, Signal};
