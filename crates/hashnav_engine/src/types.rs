use std::fmt;

use crate::decode::DecodeError;
use crate::index::IndexError;
use crate::summarize::MalformedFragmentError;

pub type JobId = u64;

/// Render generation a command was issued under. The router discards events
/// tagged with an epoch older than its current one.
pub type Epoch = u64;

/// How a fetched fragment is reshaped before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Cut down to a linkified home-page summary card.
    Summary,
    /// Shown as-is.
    Article,
}

/// Terminal event for one engine job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    IndexDone {
        epoch: Epoch,
        result: Result<Vec<ArticleDescriptor>, PageError>,
    },
    PageDone {
        epoch: Epoch,
        job_id: JobId,
        kind: PageKind,
        result: Result<String, PageError>,
    },
}

/// One entry of the remote article index. Extra fields in the index
/// document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ArticleDescriptor {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Network-level failure for a single GET.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fetching {url}: {kind}")]
pub struct FetchError {
    pub url: String,
    pub kind: FailureKind,
}

impl FetchError {
    pub(crate) fn new(url: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Umbrella for everything that can sink one job.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Malformed(#[from] MalformedFragmentError),
    #[error(transparent)]
    Index(#[from] IndexError),
}
