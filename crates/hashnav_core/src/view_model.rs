use crate::route::{Route, Theme};

/// Snapshot of the router for rendering a status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavViewModel {
    pub route: Route,
    pub theme: Theme,
    pub title: String,
    /// Home-summary jobs still outstanding.
    pub pending_jobs: usize,
    /// Articles skipped on the current home render because their fragment
    /// was unusable.
    pub skipped_jobs: usize,
    /// True while the current render still waits on the network.
    pub busy: bool,
}
