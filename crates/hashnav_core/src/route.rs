use std::fmt;

use url::Url;

/// The page token the empty hash redirects to.
pub const HOME_PAGE: &str = "home";

/// Navigation target the shell is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Article(String),
    /// Recoverable failure rendered inline in the content region.
    Error(String),
    /// The content region itself is unusable; terminal.
    CriticalError,
}

/// Colour scheme carried in the URL query string. The URL is the only
/// persistence layer for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Query-string form, e.g. `theme=dark`.
    pub fn as_query(self) -> &'static str {
        match self {
            Theme::Light => "theme=light",
            Theme::Dark => "theme=dark",
        }
    }
}

/// Boundary validation failure for values arriving from the embedder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument {
    pub what: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.what, self.value)
    }
}

impl std::error::Error for InvalidArgument {}

/// Extracts the page token from a location's hash, without the leading `#`.
/// An absent hash comes back as the empty string.
pub fn page_of(location: &str) -> Result<String, InvalidArgument> {
    let url = parse_location(location)?;
    Ok(url.fragment().unwrap_or("").to_string())
}

/// Reads the theme preference out of a location's query string.
/// Unknown values count as unset so the shell re-defaults them.
pub fn theme_of(location: &str) -> Result<Option<Theme>, InvalidArgument> {
    let url = parse_location(location)?;
    for (key, value) in url.query_pairs() {
        if key == "theme" {
            return Ok(match value.as_ref() {
                "light" => Some(Theme::Light),
                "dark" => Some(Theme::Dark),
                _ => None,
            });
        }
    }
    Ok(None)
}

/// Page tokens come straight out of the user-editable hash; only slug
/// characters are accepted.
pub fn validate_page(page: &str) -> Result<(), InvalidArgument> {
    let ok = !page.is_empty()
        && page
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(InvalidArgument {
            what: "page",
            value: page.to_string(),
        })
    }
}

/// Document title for a page token: underscores become spaces, each word is
/// capitalized, and the site title is appended.
pub fn page_title(page: &str, site_title: &str) -> String {
    let words = page.replace('_', " ");
    let cased = words
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{cased} - {site_title}")
}

fn parse_location(location: &str) -> Result<Url, InvalidArgument> {
    Url::parse(location).map_err(|_| InvalidArgument {
        what: "location",
        value: location.to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
