use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use hashnav_core::{update, Msg, NavConfig, RouterState};
use hashnav_engine::{EngineHandle, FetchSettings, MemorySink};
use url::Url;

use super::document::SimDocument;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;

const START_LOCATION: &str = "https://blog.example.org/index.html";
const SETTLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything one shell session owns.
struct Shell {
    state: RouterState,
    doc: SimDocument,
    sink: MemorySink,
    runner: EffectRunner,
    queue: VecDeque<Msg>,
}

impl Shell {
    fn new(config: NavConfig, start: Url) -> Self {
        Self {
            state: RouterState::new(config),
            doc: SimDocument::new(start),
            sink: MemorySink::new(),
            runner: EffectRunner::new(EngineHandle::new(FetchSettings::default())),
            queue: VecDeque::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        nav_logging::set_nav_epoch(state.epoch());
        self.state = state;
        self.runner
            .run(effects, &mut self.doc, &mut self.sink, &mut self.queue);
    }

    fn pump_queue(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            self.dispatch(msg);
        }
    }

    /// The user following a link: navigation start fires with the current
    /// scroll readout, then the hash commits.
    fn navigate(&mut self, page: &str) {
        self.queue.push_back(Msg::NavigationStarted {
            offset: self.doc.scroll(),
            max_scroll: self.doc.max_scroll(),
        });
        let (old_location, new_location) = self.doc.set_hash(page);
        self.queue.push_back(Msg::HashChanged {
            old_location,
            new_location,
        });
    }

    /// Drains queued messages and engine events until the router goes quiet
    /// or the deadline passes.
    fn settle(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        loop {
            self.pump_queue();
            if self.doc.external().is_some() {
                return;
            }
            if let Some(msg) = self.runner.poll_event() {
                self.queue.push_back(msg);
                continue;
            }
            if !self.state.view().busy {
                return;
            }
            if Instant::now() >= deadline {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let start = Url::parse(START_LOCATION)?;
    let mut shell = Shell::new(NavConfig::default(), start);

    // Boot exactly like a first page visit.
    let location = shell.doc.location();
    shell.queue.push_back(Msg::Loaded { location });
    shell.settle(SETTLE_TIMEOUT);
    print!("{}", ui::render(&shell.state.view(), &shell.sink));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Some(url) = shell.doc.external() {
            println!("-- left the app for {url} --");
            return Ok(());
        }

        print!("hashnav> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "q" => break,
            "theme" => shell.dispatch(Msg::ThemeToggled),
            _ => {
                if let Some(offset) = input.strip_prefix("scroll ") {
                    match offset.trim().parse::<i64>() {
                        Ok(offset) => shell.doc.set_scroll(offset),
                        Err(_) => println!("usage: scroll <offset>"),
                    }
                } else {
                    // Anything else is a page: `home`, `archives`, a slug.
                    shell.navigate(input.trim_start_matches('#'));
                }
            }
        }
        shell.settle(SETTLE_TIMEOUT);
        print!("{}", ui::render(&shell.state.view(), &shell.sink));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hashnav_core::{Msg, NavConfig, Route, Theme};
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::Shell;

    const SETTLE: Duration = Duration::from_secs(5);

    fn fragment(title: &str, first: &str, rest: &str) -> String {
        format!(
            "<div class=\"card\"><h1 class=\"title\">{title}</h1>\
             <div class=\"content\"><p>{first}</p><p>{rest}</p></div></div>"
        )
    }

    async fn mount_blog(server: &MockServer) {
        let index = format!(
            r#"[{{"url": "{0}/html/first_post.html"}}, {{"url": "{0}/html/second_post.html"}}]"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/json/articles.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(index, "text/plain; charset=utf-8"))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/html/first_post.html"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                fragment("First Post", "First opening.", "Dropped paragraph."),
                "text/plain; charset=utf-8",
            ))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/html/second_post.html"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                fragment("Second Post", "Second opening.", "Dropped paragraph."),
                "text/plain; charset=utf-8",
            ))
            .mount(server)
            .await;
    }

    fn test_shell(server: &MockServer) -> Shell {
        let config = NavConfig {
            site_title: "Field Notes".to_string(),
            index_url: format!("{}/json/articles.json", server.uri()),
            page_base: format!("{}/html/", server.uri()),
            critical_url: "critical.html".to_string(),
            home_limit: 10,
        };
        let start = Url::parse(&format!("{}/index.html", server.uri())).unwrap();
        Shell::new(config, start)
    }

    fn boot(shell: &mut Shell) {
        let location = shell.doc.location();
        shell.queue.push_back(Msg::Loaded { location });
        shell.settle(SETTLE);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn boots_home_from_empty_hash() {
        let server = MockServer::start().await;
        mount_blog(&server).await;
        let mut shell = test_shell(&server);

        boot(&mut shell);

        // The empty hash redirected to #home and the theme defaulted.
        assert!(shell.doc.location().contains("theme=light"));
        assert!(shell.doc.location().ends_with("#home"));
        assert_eq!(shell.doc.title(), "Home - Field Notes");
        assert_eq!(shell.state.view().route, Route::Home);

        let blocks = shell.sink.blocks();
        assert_eq!(blocks.len(), 2, "expected two summary cards");
        for block in blocks {
            assert!(block.contains("class=\"truncated\""));
            assert!(!block.contains("Dropped paragraph"));
        }
        let html = shell.sink.html();
        assert!(html.contains("<a href=\"#first_post\">First Post</a>"));
        assert!(html.contains("<a href=\"#second_post\">Second Post</a>"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn newer_navigation_wins_over_stale_fetches() {
        let server = MockServer::start().await;
        mount_blog(&server).await;
        Mock::given(method("GET"))
            .and(path("/html/slow_story.html"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(1500))
                    .set_body_raw(
                        fragment("Slow Story", "Slow body.", "More."),
                        "text/plain; charset=utf-8",
                    ),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/html/quick_note.html"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                fragment("Quick Note", "Quick body.", "More."),
                "text/plain; charset=utf-8",
            ))
            .mount(&server)
            .await;

        let mut shell = test_shell(&server);
        boot(&mut shell);

        // Head for the slow article, then change destination before it lands.
        shell.navigate("slow_story");
        shell.pump_queue();
        shell.navigate("quick_note");
        shell.settle(SETTLE);

        assert_eq!(shell.doc.title(), "Quick Note - Field Notes");
        assert!(shell.sink.html().contains("Quick body."));

        // Even after the slow response finally arrives, it must not render.
        std::thread::sleep(Duration::from_millis(2000));
        shell.settle(Duration::from_secs(1));
        assert!(shell.sink.html().contains("Quick body."));
        assert!(!shell.sink.html().contains("Slow body."));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn detached_content_region_escalates_to_crash_page() {
        let server = MockServer::start().await;
        mount_blog(&server).await;
        let mut shell = test_shell(&server);
        shell.sink.detach();

        boot(&mut shell);

        assert_eq!(shell.doc.external(), Some("critical.html"));
        assert_eq!(shell.state.view().route, Route::CriticalError);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn theme_toggle_reloads_with_new_query() {
        let server = MockServer::start().await;
        mount_blog(&server).await;
        let mut shell = test_shell(&server);
        boot(&mut shell);
        assert_eq!(shell.state.view().theme, Theme::Light);

        shell.dispatch(Msg::ThemeToggled);
        shell.settle(SETTLE);

        assert!(shell.doc.location().contains("theme=dark"));
        assert_eq!(shell.state.view().theme, Theme::Dark);
        // The reload re-rendered home under the new theme.
        assert_eq!(shell.sink.blocks().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scroll_position_survives_a_round_trip() {
        let server = MockServer::start().await;
        mount_blog(&server).await;
        let mut shell = test_shell(&server);
        boot(&mut shell);

        // Read down the home page, open an article, come back.
        shell.doc.set_scroll(444);
        shell.navigate("first_post");
        shell.settle(SETTLE);
        assert_eq!(shell.doc.scroll(), 1, "article starts at the top");

        shell.navigate("home");
        shell.settle(SETTLE);
        assert_eq!(shell.doc.scroll(), 444, "home offset restored");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn broken_index_shows_inline_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/articles.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut shell = test_shell(&server);

        boot(&mut shell);

        assert!(matches!(shell.state.view().route, Route::Error(_)));
        let html = shell.sink.html();
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("http status 500"));
        assert!(shell.doc.external().is_none());
    }
}
