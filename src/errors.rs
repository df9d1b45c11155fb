use thiserror::Error;

/// Failures from the identity service. Shown inline on the login screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The service rejected the request; the message is the service's own
    /// text, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Failures around the remote flashcard table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("missing required field: {0}")]
    Validation(&'static str),

    #[error("remote error: {0}")]
    Remote(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SUPABASE_ANON_KEY is not set")]
    MissingAnonKey,
}
