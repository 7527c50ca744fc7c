#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Point the location hash at a page, starting a new navigation cycle.
    SetHash(String),
    /// Rewrite the query string, which reloads the document.
    SetQuery(String),
    /// Update the document title.
    SetTitle(String),
    /// Cancel every fetch still in flight from the previous render.
    AbortInFlight,
    /// Fetch the remote article index.
    FetchIndex { epoch: crate::Epoch, url: String },
    /// Fetch one remote page fragment.
    FetchPage {
        epoch: crate::Epoch,
        job_id: crate::JobId,
        kind: PageKind,
        url: String,
    },
    /// Replace the content region wholesale.
    ReplaceContent(String),
    /// Append one block to the content region.
    AppendContent(String),
    /// Move the viewport to a vertical offset.
    ScrollTo(u64),
    /// Leave the single-page app for a static document. Terminal.
    NavigateTo(String),
}

/// How a fetched fragment is reshaped before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Cut down to a linkified home-page summary card.
    Summary,
    /// Shown as-is.
    Article,
}
