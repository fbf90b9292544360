/// Crawl state definitions
///
/// A crawl moves through a fixed sequence of phases. `NoRoutesFound` and
/// `Done` are terminal.
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// Nothing has happened yet
    Init,

    /// Fetching the seed page and extracting routes
    CollectingRoutes,

    /// Fetching, sanitizing, and writing each route in turn
    ProcessingRoutes,

    /// Writing the route manifest
    WritingManifest,

    // ===== Terminal States =====
    /// The seed page yielded no routes
    NoRoutesFound,

    /// All routes were handled and the manifest written
    Done,
}

impl CrawlState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NoRoutesFound | Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::CollectingRoutes)
                | (Self::CollectingRoutes, Self::NoRoutesFound)
                | (Self::CollectingRoutes, Self::ProcessingRoutes)
                | (Self::ProcessingRoutes, Self::WritingManifest)
                | (Self::WritingManifest, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CollectingRoutes => "collecting_routes",
            Self::ProcessingRoutes => "processing_routes",
            Self::WritingManifest => "writing_manifest",
            Self::NoRoutesFound => "no_routes_found",
            Self::Done => "done",
        }
    }

    /// Returns all possible crawl states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Init,
            Self::CollectingRoutes,
            Self::ProcessingRoutes,
            Self::WritingManifest,
            Self::NoRoutesFound,
            Self::Done,
        ]
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
