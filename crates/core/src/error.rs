//! Unified error types for go2web.
//!
//! Every failure a fetch or search can hit is one of these variants. The
//! message prefix is a stable code so diagnostics stay greppable.

use std::io;

/// Unified error type for the go2web engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL could not be normalized into a usable request target.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Invalid input parameters (e.g., empty search query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// DNS, connect, TLS or socket IO failure.
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(#[source] io::Error),

    /// The opt-in read timeout elapsed before the peer closed the connection.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Redirect chain exhausted the hop budget.
    #[error("REDIRECT_LIMIT_EXCEEDED: gave up after {0} hops")]
    RedirectLimitExceeded(usize),

    /// Cache storage failed.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),

    /// Configuration could not be loaded or is invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an IO failure that happened while talking to a peer.
    pub fn transport(err: impl Into<io::Error>) -> Self {
        Error::Transport(err.into())
    }

    /// Short code for the variant, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::FetchTimeout(_) => "FETCH_TIMEOUT",
            Error::RedirectLimitExceeded(_) => "REDIRECT_LIMIT_EXCEEDED",
            Error::Cache(_) => "CACHE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}
