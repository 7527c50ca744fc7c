use url::Url;

/// Stand-in for the browser document: location, title, and scroll state.
///
/// The embedder delivers the navigation-start notification (with this
/// document's scroll readout) before the hash change that commits it, which
/// is the ordering the router's scroll memory relies on.
pub struct SimDocument {
    location: Url,
    title: String,
    scroll: i64,
    max_scroll: u64,
    external: Option<String>,
}

impl SimDocument {
    pub fn new(start: Url) -> Self {
        Self {
            location: start,
            title: String::new(),
            scroll: 0,
            max_scroll: 2000,
            external: None,
        }
    }

    pub fn location(&self) -> String {
        self.location.to_string()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn scroll(&self) -> i64 {
        self.scroll
    }

    pub fn max_scroll(&self) -> u64 {
        self.max_scroll
    }

    /// The user dragging the scrollbar.
    pub fn set_scroll(&mut self, offset: i64) {
        self.scroll = offset;
    }

    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll = offset.min(i64::MAX as u64) as i64;
    }

    /// Commits a new hash; returns `(old_location, new_location)`.
    pub fn set_hash(&mut self, page: &str) -> (String, String) {
        let old = self.location.to_string();
        self.location.set_fragment(Some(page));
        (old, self.location.to_string())
    }

    /// Rewrites the query string; returns the reloaded location.
    pub fn set_query(&mut self, query: &str) -> String {
        self.location.set_query(Some(query));
        self.location.to_string()
    }

    /// Full navigation away from the single-page app.
    pub fn navigate(&mut self, url: &str) {
        self.external = Some(url.to_string());
    }

    pub fn external(&self) -> Option<&str> {
        self.external.as_deref()
    }
}
