use std::sync::{mpsc, Arc};
use std::thread;

use nav_logging::nav_warn;
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::summarize::{CardTransformer, Transformer};
use crate::{
    decode_text, parse_index, ArticleDescriptor, Epoch, JobId, NavEvent, PageError, PageKind,
};

enum EngineCommand {
    FetchIndex {
        epoch: Epoch,
        url: String,
    },
    FetchPage {
        epoch: Epoch,
        job_id: JobId,
        kind: PageKind,
        url: String,
    },
    CancelInFlight,
}

/// Handle to the fetch pipeline running on its own runtime thread.
///
/// Commands are served in order, so `cancel_in_flight` cancels exactly the
/// fetches issued before it: the token is swapped before any later command
/// is spawned.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<NavEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(settings));
        let transformer: Arc<dyn Transformer> = Arc::new(CardTransformer);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut cancel = CancellationToken::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::CancelInFlight => {
                        cancel.cancel();
                        cancel = CancellationToken::new();
                    }
                    EngineCommand::FetchIndex { epoch, url } => {
                        let fetcher = fetcher.clone();
                        let event_tx = event_tx.clone();
                        let cancel = cancel.clone();
                        runtime.spawn(async move {
                            let result = fetch_index(fetcher.as_ref(), &url, &cancel).await;
                            if let Err(err) = &result {
                                nav_warn!("index fetch failed: {err}");
                            }
                            let _ = event_tx.send(NavEvent::IndexDone { epoch, result });
                        });
                    }
                    EngineCommand::FetchPage {
                        epoch,
                        job_id,
                        kind,
                        url,
                    } => {
                        let fetcher = fetcher.clone();
                        let transformer = transformer.clone();
                        let event_tx = event_tx.clone();
                        let cancel = cancel.clone();
                        runtime.spawn(async move {
                            let result = fetch_page(
                                fetcher.as_ref(),
                                transformer.as_ref(),
                                kind,
                                &url,
                                &cancel,
                            )
                            .await;
                            if let Err(err) = &result {
                                nav_warn!("page job {job_id} failed: {err}");
                            }
                            let _ = event_tx.send(NavEvent::PageDone {
                                epoch,
                                job_id,
                                kind,
                                result,
                            });
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_index(&self, epoch: Epoch, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchIndex {
            epoch,
            url: url.into(),
        });
    }

    pub fn fetch_page(&self, epoch: Epoch, job_id: JobId, kind: PageKind, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            epoch,
            job_id,
            kind,
            url: url.into(),
        });
    }

    /// Cancels every fetch issued before this call; later fetches get a
    /// fresh token.
    pub fn cancel_in_flight(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelInFlight);
    }

    pub fn try_recv(&self) -> Option<NavEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn fetch_index(
    fetcher: &dyn Fetcher,
    url: &str,
    cancel: &CancellationToken,
) -> Result<Vec<ArticleDescriptor>, PageError> {
    let output = fetcher.fetch(url, cancel).await?;
    let decoded = decode_text(&output.bytes, output.metadata.content_type.as_deref())?;
    Ok(parse_index(&decoded.text)?)
}

async fn fetch_page(
    fetcher: &dyn Fetcher,
    transformer: &dyn Transformer,
    kind: PageKind,
    url: &str,
    cancel: &CancellationToken,
) -> Result<String, PageError> {
    let output = fetcher.fetch(url, cancel).await?;
    let decoded = decode_text(&output.bytes, output.metadata.content_type.as_deref())?;
    match kind {
        PageKind::Summary => Ok(transformer.to_home_summary(&decoded.text, url)?),
        PageKind::Article => Ok(transformer.to_article(&decoded.text)),
    }
}
