use crate::route::{Route, Theme};
use crate::scroll::ScrollHistory;
use crate::view_model::NavViewModel;

/// Render generation. Bumped whenever a new top-level render or an error
/// path begins; anything tagged with an older epoch is stale.
pub type Epoch = u64;

pub type JobId = u64;

/// Where the shell's remote content lives and how it presents itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavConfig {
    pub site_title: String,
    /// Remote JSON index of article descriptors.
    pub index_url: String,
    /// Prefix for per-page fragments; pages resolve to `{page_base}{page}.html`.
    pub page_base: String,
    /// Static crash page navigated to when in-app recovery is impossible.
    pub critical_url: String,
    /// Number of articles shown on the home page.
    pub home_limit: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            site_title: "Field Notes".to_string(),
            index_url: "https://blog.example.org/json/articles.json".to_string(),
            page_base: "https://blog.example.org/html/".to_string(),
            critical_url: "critical.html".to_string(),
            home_limit: 10,
        }
    }
}

/// Raw scroll readout captured at navigation start, waiting for the hash
/// change that commits it into history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingScroll {
    pub offset: i64,
    pub max_scroll: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouterState {
    config: NavConfig,
    route: Route,
    theme: Theme,
    epoch: Epoch,
    title: String,
    scroll: ScrollHistory,
    pending_scroll: Option<PendingScroll>,
    pending_jobs: usize,
    settled_jobs: usize,
    skipped_jobs: usize,
    busy: bool,
}

impl RouterState {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn view(&self) -> NavViewModel {
        NavViewModel {
            route: self.route.clone(),
            theme: self.theme,
            title: self.title.clone(),
            pending_jobs: self.pending_jobs.saturating_sub(self.settled_jobs),
            skipped_jobs: self.skipped_jobs,
            busy: self.busy,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub(crate) fn config(&self) -> &NavConfig {
        &self.config
    }

    pub(crate) fn route(&self) -> &Route {
        &self.route
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    pub(crate) fn theme(&self) -> Theme {
        self.theme
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Starts a new render generation and forgets the previous batch.
    pub(crate) fn bump_epoch(&mut self) -> Epoch {
        self.epoch += 1;
        self.pending_jobs = 0;
        self.settled_jobs = 0;
        self.skipped_jobs = 0;
        self.epoch
    }

    pub(crate) fn is_stale(&self, epoch: Epoch) -> bool {
        epoch != self.epoch
    }

    /// Whether the current render still waits on the network.
    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(crate) fn begin_jobs(&mut self, count: usize) {
        self.pending_jobs = count;
        self.settled_jobs = 0;
        self.skipped_jobs = 0;
    }

    /// Settles one job; true when it was the last one outstanding.
    pub(crate) fn settle_job(&mut self, skipped: bool) -> bool {
        self.settled_jobs += 1;
        if skipped {
            self.skipped_jobs += 1;
        }
        self.settled_jobs >= self.pending_jobs
    }

    pub(crate) fn scroll(&self) -> &ScrollHistory {
        &self.scroll
    }

    pub(crate) fn scroll_mut(&mut self) -> &mut ScrollHistory {
        &mut self.scroll
    }

    pub(crate) fn stash_scroll(&mut self, offset: i64, max_scroll: u64) {
        self.pending_scroll = Some(PendingScroll { offset, max_scroll });
    }

    pub(crate) fn take_pending_scroll(&mut self) -> Option<PendingScroll> {
        self.pending_scroll.take()
    }
}
