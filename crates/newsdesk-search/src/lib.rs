//! Multi-source themed news search.
//!
//! [`orchestrator`] walks the configured sources one at a time, [`report`]
//! enriches and aggregates what they returned, and [`pipeline`] ties both
//! together for a full run. [`probe`] evaluates a single candidate outlet.

pub mod orchestrator;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod search_url;

pub use orchestrator::{scrape_all_sources, scrape_source};
pub use pipeline::{run_search, SearchSettings};
pub use probe::{probe_source, ProbeReport, Recommendation};
pub use report::{build_search_result, summarize};
pub use search_url::guess_search_url;
