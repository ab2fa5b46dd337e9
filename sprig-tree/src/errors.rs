use std::error::Error as StdError;

use thiserror::Error;

/// Errors produced while building or parsing a [`TreePath`].
///
/// [`TreePath`]: crate::TreePath
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreePathError {
    #[error("invalid tree path token `{token}` in `{text}`")]
    MalformedToken { token: String, text: String },

    #[error("canonical tree path must contain at least one element")]
    EmptyPath,

    #[error("tree path delimiter must not be empty")]
    EmptyDelimiter,
}

/// Errors originating from `sprig-tree`.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("tree path error: {0}")]
    Path(#[from] TreePathError),

    #[error("failed to construct tree adapter `{adapter}`: {source}")]
    AdapterConstruction {
        adapter: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, TreeError>;
