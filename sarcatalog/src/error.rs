//! Error types for the catalog

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying the catalog
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Two stations share the same key
    #[error("Duplicate station key: {0}")]
    DuplicateStation(String),

    /// A song entry violates the catalog invariants
    #[error("Invalid song '{title}' in station {station}: {reason}")]
    InvalidSong {
        station: String,
        title: String,
        reason: String,
    },

    /// Station not found
    #[error("Station not found: {0}")]
    StationNotFound(String),
}
