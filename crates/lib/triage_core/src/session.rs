//! Client session identifiers.
//!
//! A session id is an opaque correlation token generated on the client. The
//! external workflow uses it to group conversation turns; this crate never
//! interprets it.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{LocalStore, SESSION_ID_KEY, StorageError};

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

/// Opaque session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id of the form `session_<unix millis>_<7 base-36 chars>`.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        Self(format!("session_{}_{suffix}", Utc::now().timestamp_millis()))
    }

    /// Reuse any non-empty stored id, or generate and store a new one.
    pub fn load_or_create(store: &LocalStore) -> Result<Self, StorageError> {
        if let Some(existing) = store.get(SESSION_ID_KEY)?
            && !existing.is_empty()
        {
            return Ok(Self(existing));
        }
        let id = Self::generate();
        store.set(SESSION_ID_KEY, id.as_str())?;
        debug!(session_id = %id, "created new session id");
        Ok(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
