//! Session errors

use hermes_core::MarketError;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Fatal conditions that abort a session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A market invariant was violated mid-session. The books can no longer
    /// be trusted, so the run stops here.
    #[error(transparent)]
    Market(#[from] MarketError),
}
