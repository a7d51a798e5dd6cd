//! Error types

mod config;
mod field;
mod transport;

pub use config::*;
pub use field::*;
pub use transport::*;

/// Errors returned by [`Form::submit`](crate::Form::submit).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The call was rejected before anything was sent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport reported a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Returns the transport failure, if this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Config(_) => None,
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
