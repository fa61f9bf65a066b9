//! Types d'erreurs pour sarplaylist

/// Erreurs de génération, de résolution et de lecture de playlist
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unresolved item kind: {0}")]
    UnresolvedItemKind(String),

    #[error("Index {index} out of range for a playlist of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid live query: {0}")]
    InvalidLiveQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Catalog(#[from] sarcatalog::Error),
}

/// Type Result spécialisé pour sarplaylist
pub type Result<T> = std::result::Result<T, Error>;
