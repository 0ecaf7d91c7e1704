use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::disclosure::DisclosureState;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One in-progress feedback form: disclosure progress plus cached drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSession {
    pub id: SessionId,
    pub state: DisclosureState,
    /// Latest text per field id; blank input drops the entry.
    pub drafts: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for form sessions.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError>;
    fn update(&self, session: FormSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
