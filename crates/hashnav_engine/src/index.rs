use crate::ArticleDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("malformed article index: {message}")]
    Parse { message: String },
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IndexDoc {
    Flat(Vec<ArticleDescriptor>),
    Wrapped { articles: Vec<ArticleDescriptor> },
}

/// Parses the remote article index. Both historical shapes are accepted: a
/// bare array of descriptors, or an object wrapping them under `articles`.
pub fn parse_index(json: &str) -> Result<Vec<ArticleDescriptor>, IndexError> {
    let doc: IndexDoc = serde_json::from_str(json).map_err(|err| IndexError::Parse {
        message: err.to_string(),
    })?;
    Ok(match doc {
        IndexDoc::Flat(articles) | IndexDoc::Wrapped { articles } => articles,
    })
}
