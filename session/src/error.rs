use garden_defence_core::ConfigError;

use crate::SessionId;

/// Failures raised by session plumbing rather than by the game itself.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The task owning the match has stopped and can no longer answer.
    #[error("the session has been closed")]
    Closed,
    /// No session is registered under the identifier.
    #[error("no session named `{0}`")]
    Unknown(SessionId),
    /// The tuning handed to the session is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
