//! Page access and article-candidate extraction.
//!
//! [`AccessGate`] checks robots.txt per origin, [`PageFetcher`] retrieves and
//! parses one page, [`extract_candidates`] finds article-like elements on a
//! page of unknown structure, and [`extract_article_content`] pulls the body
//! text of a single article.

pub mod client;
pub mod content;
pub mod error;
pub mod extract;
pub mod robots;
pub mod throttle;
pub mod urls;

mod text;

pub use client::{Document, FetcherSettings, PageFetcher, PageSource};
pub use content::extract_article_content;
pub use error::ScraperError;
pub use extract::{extract_candidates, ExtractLimits};
pub use robots::{AccessGate, RobotsCache, RobotsRules};
