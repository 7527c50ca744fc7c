use crate::route::{self, Route, Theme, HOME_PAGE};
use crate::{ArticleRef, Effect, Msg, PageKind, RouterState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: RouterState, msg: Msg) -> (RouterState, Vec<Effect>) {
    // Once critical, the document has navigated away; nothing else applies.
    if matches!(state.route(), Route::CriticalError) {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Loaded { location } => load(&mut state, &location),
        Msg::NavigationStarted { offset, max_scroll } => {
            state.stash_scroll(offset, max_scroll);
            Vec::new()
        }
        Msg::HashChanged {
            old_location,
            new_location,
        } => {
            commit_scroll(&mut state, &old_location);
            load(&mut state, &new_location)
        }
        Msg::ThemeToggled => {
            vec![Effect::SetQuery(
                state.theme().toggled().as_query().to_string(),
            )]
        }
        Msg::IndexDone { epoch, result } => {
            if state.is_stale(epoch) {
                return (state, Vec::new());
            }
            match result {
                Ok(articles) => fan_out(&mut state, articles),
                Err(error) => fail_page(&mut state, &error),
            }
        }
        Msg::SummaryDone {
            epoch,
            job_id: _,
            result,
        } => {
            if state.is_stale(epoch) {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            let skipped = result.is_err();
            // One bad article must not take down its siblings; a failed
            // summary settles its job and renders nothing.
            if let Ok(html) = result {
                effects.push(Effect::AppendContent(html));
            }
            if state.settle_job(skipped) {
                state.set_busy(false);
                effects.push(Effect::ScrollTo(state.scroll().restore_offset(HOME_PAGE)));
            }
            effects
        }
        Msg::ArticleDone { epoch, result } => {
            if state.is_stale(epoch) {
                return (state, Vec::new());
            }
            state.set_busy(false);
            match result {
                Ok(html) => {
                    let page = match state.route() {
                        Route::Article(page) => page.clone(),
                        _ => HOME_PAGE.to_string(),
                    };
                    vec![
                        Effect::ReplaceContent(html),
                        Effect::ScrollTo(state.scroll().restore_offset(&page)),
                    ]
                }
                Err(error) => fail_page(&mut state, &error),
            }
        }
        Msg::RenderFailed => {
            if matches!(state.route(), Route::Error(_) | Route::CriticalError) {
                // The error view itself cannot render; leave the app entirely.
                state.set_route(Route::CriticalError);
                state.set_busy(false);
                vec![Effect::NavigateTo(state.config().critical_url.clone())]
            } else {
                fail_page(&mut state, "content region not found in document")
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load(state: &mut RouterState, location: &str) -> Vec<Effect> {
    let page = match route::page_of(location) {
        Ok(page) => page,
        Err(err) => return fail_page(state, &err.to_string()),
    };
    let theme = match route::theme_of(location) {
        Ok(theme) => theme,
        Err(err) => return fail_page(state, &err.to_string()),
    };

    // No theme in the query yet: pick light and reload, as first visits do.
    let Some(theme) = theme else {
        return vec![Effect::SetQuery(Theme::Light.as_query().to_string())];
    };
    state.set_theme(theme);

    if page.is_empty() {
        return vec![Effect::SetHash(HOME_PAGE.to_string())];
    }
    if page == HOME_PAGE {
        return begin_home(state);
    }
    if let Err(err) = route::validate_page(&page) {
        return fail_page(state, &err.to_string());
    }
    begin_article(state, &page)
}

fn begin_home(state: &mut RouterState) -> Vec<Effect> {
    state.set_route(Route::Home);
    state.set_busy(true);
    let title = route::page_title(HOME_PAGE, &state.config().site_title);
    state.set_title(title.clone());
    let epoch = state.bump_epoch();
    let url = state.config().index_url.clone();
    vec![
        Effect::AbortInFlight,
        Effect::SetTitle(title),
        Effect::FetchIndex { epoch, url },
    ]
}

fn begin_article(state: &mut RouterState, page: &str) -> Vec<Effect> {
    state.set_route(Route::Article(page.to_string()));
    state.set_busy(true);
    let title = route::page_title(page, &state.config().site_title);
    state.set_title(title.clone());
    let epoch = state.bump_epoch();
    let url = format!("{}{}.html", state.config().page_base, page);
    vec![
        Effect::AbortInFlight,
        Effect::SetTitle(title),
        Effect::FetchPage {
            epoch,
            job_id: 0,
            kind: PageKind::Article,
            url,
        },
    ]
}

fn fan_out(state: &mut RouterState, mut articles: Vec<ArticleRef>) -> Vec<Effect> {
    articles.truncate(state.config().home_limit);
    state.begin_jobs(articles.len());

    // The previous page's content goes away before the summaries stream in.
    let mut effects = vec![Effect::ReplaceContent(String::new())];

    if articles.is_empty() {
        state.set_busy(false);
        effects.push(Effect::ScrollTo(state.scroll().restore_offset(HOME_PAGE)));
        return effects;
    }

    let epoch = state.epoch();
    for (index, article) in articles.into_iter().enumerate() {
        effects.push(Effect::FetchPage {
            epoch,
            job_id: index as crate::JobId + 1,
            kind: PageKind::Summary,
            url: article.url,
        });
    }
    effects
}

fn fail_page(state: &mut RouterState, error: &str) -> Vec<Effect> {
    state.set_route(Route::Error(error.to_string()));
    state.set_busy(false);
    state.bump_epoch();
    vec![
        Effect::AbortInFlight,
        Effect::ReplaceContent(error_html(error)),
    ]
}

fn commit_scroll(state: &mut RouterState, old_location: &str) {
    let Some(pending) = state.take_pending_scroll() else {
        return;
    };
    let Ok(page) = route::page_of(old_location) else {
        return;
    };
    let page = if page.is_empty() {
        HOME_PAGE.to_string()
    } else {
        page
    };
    state
        .scroll_mut()
        .remember(&page, pending.offset, pending.max_scroll);
}

/// Fixed inline error card with the stringified failure beneath it.
fn error_html(error: &str) -> String {
    format!(
        "<div class=\"box\"><h1 class=\"title\">Something went wrong</h1><p>{}</p></div>",
        escape_text(error)
    )
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
