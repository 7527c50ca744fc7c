use std::collections::VecDeque;

use hashnav_core::{ArticleRef, Effect, Msg, PageKind};
use hashnav_engine::{ContentSink, EngineHandle, MemorySink, NavEvent};
use nav_logging::{nav_info, nav_trace, nav_warn};

use super::document::SimDocument;

/// Executes router effects against the engine, the document, and the
/// content region, feeding any synchronous consequences back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(
        &self,
        effects: Vec<Effect>,
        doc: &mut SimDocument,
        sink: &mut MemorySink,
        queue: &mut VecDeque<Msg>,
    ) {
        for effect in effects {
            match effect {
                Effect::SetHash(page) => {
                    // Navigation start fires before the hash commits; its
                    // scroll readout is the one the router trusts.
                    queue.push_back(Msg::NavigationStarted {
                        offset: doc.scroll(),
                        max_scroll: doc.max_scroll(),
                    });
                    let (old_location, new_location) = doc.set_hash(&page);
                    queue.push_back(Msg::HashChanged {
                        old_location,
                        new_location,
                    });
                }
                Effect::SetQuery(query) => {
                    let location = doc.set_query(&query);
                    queue.push_back(Msg::Loaded { location });
                }
                Effect::SetTitle(title) => doc.set_title(&title),
                Effect::AbortInFlight => {
                    nav_trace!("aborting in-flight fetches");
                    self.engine.cancel_in_flight();
                }
                Effect::FetchIndex { epoch, url } => {
                    nav_info!("fetch index epoch={epoch} url={url}");
                    self.engine.fetch_index(epoch, url);
                }
                Effect::FetchPage {
                    epoch,
                    job_id,
                    kind,
                    url,
                } => {
                    nav_info!("fetch page epoch={epoch} job={job_id} url={url}");
                    self.engine.fetch_page(epoch, job_id, map_kind(kind), url);
                }
                Effect::ReplaceContent(html) => {
                    if let Err(err) = sink.replace(&html) {
                        nav_warn!("replace failed: {err}");
                        queue.push_back(Msg::RenderFailed);
                    }
                }
                Effect::AppendContent(html) => {
                    if let Err(err) = sink.append(&html) {
                        nav_warn!("append failed: {err}");
                        queue.push_back(Msg::RenderFailed);
                    }
                }
                Effect::ScrollTo(offset) => {
                    nav_trace!("scroll to {offset}");
                    doc.scroll_to(offset);
                }
                Effect::NavigateTo(url) => {
                    nav_warn!("leaving the app for {url}");
                    doc.navigate(&url);
                }
            }
        }
    }

    /// One engine event, already mapped into the router's vocabulary.
    pub fn poll_event(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_kind(kind: PageKind) -> hashnav_engine::PageKind {
    match kind {
        PageKind::Summary => hashnav_engine::PageKind::Summary,
        PageKind::Article => hashnav_engine::PageKind::Article,
    }
}

fn map_event(event: NavEvent) -> Msg {
    match event {
        NavEvent::IndexDone { epoch, result } => Msg::IndexDone {
            epoch,
            result: result
                .map(|articles| {
                    articles
                        .into_iter()
                        .map(|article| ArticleRef { url: article.url })
                        .collect()
                })
                .map_err(|err| err.to_string()),
        },
        NavEvent::PageDone {
            epoch,
            job_id,
            kind,
            result,
        } => {
            let result = result.map_err(|err| err.to_string());
            match kind {
                hashnav_engine::PageKind::Summary => Msg::SummaryDone {
                    epoch,
                    job_id,
                    result,
                },
                hashnav_engine::PageKind::Article => Msg::ArticleDone { epoch, result },
            }
        }
    }
}
