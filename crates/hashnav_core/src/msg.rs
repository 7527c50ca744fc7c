#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial document load, or a reload after the query string changed.
    Loaded { location: String },
    /// The user started navigating away, before the hash commits. Carries
    /// the only trustworthy scroll readout for the outgoing page.
    NavigationStarted { offset: i64, max_scroll: u64 },
    /// The hash has committed; `old_location` is the page being left.
    HashChanged {
        old_location: String,
        new_location: String,
    },
    /// User toggled the colour scheme.
    ThemeToggled,
    /// Article index arrived (or failed) for a home render.
    IndexDone {
        epoch: crate::Epoch,
        result: Result<Vec<ArticleRef>, String>,
    },
    /// One home-summary job settled.
    SummaryDone {
        epoch: crate::Epoch,
        job_id: crate::JobId,
        result: Result<String, String>,
    },
    /// The article fragment arrived (or failed) for an article render.
    ArticleDone {
        epoch: crate::Epoch,
        result: Result<String, String>,
    },
    /// The embedder could not locate the content region while rendering.
    RenderFailed,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// One entry of the remote article index, reduced to what routing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub url: String,
}
