use scraper::{Html, Selector};
use url::Url;

/// Expected fragment markup is missing a required piece. Recoverable per
/// article: the caller skips the fragment, not the whole listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fragment from {url} is missing its {missing} element")]
pub struct MalformedFragmentError {
    pub url: String,
    pub missing: &'static str,
}

/// Reshapes fetched fragments for rendering.
pub trait Transformer: Send + Sync {
    /// Cuts an article fragment down to a home-page summary card: the title
    /// linkified to the article's own slug, only the first body paragraph
    /// kept, and the source URL attached for later navigation.
    fn to_home_summary(
        &self,
        fragment_html: &str,
        source_url: &str,
    ) -> Result<String, MalformedFragmentError>;

    /// Articles are shown as-is.
    fn to_article(&self, fragment_html: &str) -> String;
}

/// Transformer for the blog's card markup: a fragment carries one `.title`
/// heading and one `.content` container with paragraph children.
#[derive(Debug, Default)]
pub struct CardTransformer;

impl Transformer for CardTransformer {
    fn to_home_summary(
        &self,
        fragment_html: &str,
        source_url: &str,
    ) -> Result<String, MalformedFragmentError> {
        let fragment = Html::parse_fragment(fragment_html);
        let title_sel = Selector::parse(".title, h1").ok();
        let body_sel = Selector::parse(".content").ok();
        let para_sel = Selector::parse("p").ok();

        let title = title_sel
            .as_ref()
            .and_then(|sel| fragment.select(sel).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing(source_url, "title"))?;

        let body = body_sel
            .as_ref()
            .and_then(|sel| fragment.select(sel).next())
            .ok_or_else(|| missing(source_url, "content"))?;

        // Only the first paragraph survives into the summary.
        let first_paragraph = para_sel
            .as_ref()
            .and_then(|sel| body.select(sel).next())
            .map(|p| p.inner_html())
            .unwrap_or_default();

        let slug = slug_of(source_url);
        Ok(format!(
            "<div class=\"card is-clickable\" data-source-url=\"{src}\">\
             <h1 class=\"title\"><a href=\"#{slug}\">{title}</a></h1>\
             <div class=\"content\"><p class=\"truncated\">{first}</p></div></div>",
            src = escape_html(source_url),
            slug = escape_html(&slug),
            title = escape_html(&title),
            first = first_paragraph,
        ))
    }

    fn to_article(&self, fragment_html: &str) -> String {
        fragment_html.to_string()
    }
}

fn missing(url: &str, missing: &'static str) -> MalformedFragmentError {
    MalformedFragmentError {
        url: url.to_string(),
        missing,
    }
}

/// The page token an article URL navigates to: its last path segment with
/// the `.html` suffix removed.
pub fn slug_of(url: &str) -> String {
    let last_segment = Url::parse(url)
        .ok()
        .and_then(|u| u.path_segments().and_then(|segments| segments.last().map(String::from)));
    match last_segment {
        Some(segment) => segment.trim_end_matches(".html").to_string(),
        None => url
            .trim_end_matches(".html")
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn escape_html(text: &str) -> String {
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
