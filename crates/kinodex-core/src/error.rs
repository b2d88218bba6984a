use thiserror::Error;

#[derive(Debug, Error)]
pub enum KinodexError {
    /// The definitive no-match outcome; retrying the same query with
    /// the same catalog state gives the same answer.
    #[error("no matching title found")]
    NotFound,

    #[error("search provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
