//! Sessions keyed by identifier.

use std::{collections::HashMap, fmt};

use garden_defence_core::{ConfigError, GameConfig};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::{SessionError, SessionHandle};

/// Identifier a client uses to find its match again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a client-chosen identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrowed form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Live sessions, at most one per identifier.
#[derive(Debug)]
pub struct SessionRegistry {
    config: GameConfig,
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl SessionRegistry {
    /// Creates an empty registry whose matches all use `config`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Tuning handed to every new match.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Starts a match under `id`, shutting down whatever ran there before.
    pub async fn new_game(&self, id: SessionId) -> Result<SessionHandle, SessionError> {
        let handle = SessionHandle::spawn(self.config.clone())?;
        let previous = self
            .sessions
            .lock()
            .await
            .insert(id.clone(), handle.clone());
        match previous {
            Some(previous) => {
                previous.shutdown().await;
                info!(session = %id, "session replaced");
            }
            None => info!(session = %id, "session started"),
        }
        Ok(handle)
    }

    /// Looks up the match running under `id`.
    pub async fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionError> {
        self.sessions
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::Unknown(id.clone()))
    }

    /// Shuts down and forgets the match under `id`. Returns whether one existed.
    pub async fn end(&self, id: &SessionId) -> bool {
        let removed = self.sessions.lock().await.remove(id);
        match removed {
            Some(handle) => {
                handle.shutdown().await;
                info!(session = %id, "session ended");
                true
            }
            None => false,
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Reports whether no session is registered.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
