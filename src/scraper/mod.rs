//! Notice ingestion pipeline: fetch source pages, extract candidate notices
//! from their markup, drop duplicates and stale entries, persist the rest.
//!
//! The source site's markup is not under our control, so extraction is
//! best-effort pattern matching: every stage is total and yields
//! zero-or-more results instead of failing.

pub mod extract;
pub mod fetch;
pub mod filter;

pub use extract::{clean_text, NoticeExtractor};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use filter::{dedup_by_title, retain_since};
