use hashnav_core::{NavViewModel, Route, Theme};
use hashnav_engine::MemorySink;

/// Renders the document chrome and the content region as plain text.
pub fn render(view: &NavViewModel, sink: &MemorySink) -> String {
    let theme = match view.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };

    let mut out = String::new();
    out.push_str(&format!("== {} [{theme}] ==\n", view.title));
    if view.busy {
        out.push_str(&format!("loading, {} job(s) outstanding\n", view.pending_jobs));
    }
    if view.skipped_jobs > 0 {
        out.push_str(&format!("{} article(s) skipped\n", view.skipped_jobs));
    }

    if matches!(view.route, Route::CriticalError) {
        out.push_str("-- critical error --\n");
        return out;
    }
    for block in sink.blocks() {
        out.push_str(block);
        out.push('\n');
    }
    out
}
