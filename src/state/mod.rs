//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the phases a crawl moves through, from `Init` to `Done`

mod crawl_state;

pub use crawl_state::CrawlState;
