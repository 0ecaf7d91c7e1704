use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::repository::{FormSession, RepositoryError, SessionId, SessionRepository};
use crate::disclosure::{
    ContentModel, DisclosureEngine, FieldInputOutcome, FieldVisibility, GroupProgress,
    SelectionOutcome,
};
use crate::quality::{Evaluation, FieldType};

/// Service composing the session store and the disclosure engine.
///
/// Every read-modify-write of a session runs under that session's lock, so
/// concurrent requests against one form are applied one after another.
pub struct FormSessionService<R> {
    repository: Arc<R>,
    engine: Arc<DisclosureEngine>,
    sequence: AtomicU64,
    session_locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl<R> FormSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<DisclosureEngine>) -> Self {
        Self {
            repository,
            engine,
            sequence: AtomicU64::new(1),
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    fn next_session_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("form-{id:06}"))
    }

    /// Start a new form, optionally with a content model already chosen.
    pub fn create(
        &self,
        model: Option<ContentModel>,
    ) -> Result<SessionSnapshot, FormSessionError> {
        let mut state = self.engine.initial_state();
        if let Some(model) = model {
            self.engine.select_model(&mut state, model);
        }

        let now = Utc::now();
        let session = FormSession {
            id: self.next_session_id(),
            state,
            drafts: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(session)?;
        info!(session_id = %stored.id, ?model, "form session created");
        Ok(self.snapshot(&stored))
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionSnapshot, FormSessionError> {
        let session = self.load(id)?;
        Ok(self.snapshot(&session))
    }

    /// Switch content model. Progress resets; drafts stay cached.
    pub fn select_model(
        &self,
        id: &SessionId,
        model: ContentModel,
    ) -> Result<SessionSnapshot, FormSessionError> {
        let (session, ()) = self.modify(id, |session| {
            self.engine.select_model(&mut session.state, model);
        })?;
        Ok(self.snapshot(&session))
    }

    /// Cache the draft for `field_id` and run it through the disclosure engine.
    pub fn record_input(
        &self,
        id: &SessionId,
        field_id: &str,
        text: &str,
    ) -> Result<FieldInputOutcome, FormSessionError> {
        self.ensure_field(field_id)?;
        let (_, outcome) = self.modify(id, |session| {
            if text.trim().is_empty() {
                session.drafts.remove(field_id);
            } else {
                session
                    .drafts
                    .insert(field_id.to_string(), text.to_string());
            }

            self.engine
                .on_field_input(&mut session.state, field_id, text)
        })?;
        Ok(outcome)
    }

    pub fn record_selection(
        &self,
        id: &SessionId,
        field_id: &str,
        selected: usize,
    ) -> Result<SelectionOutcome, FormSessionError> {
        self.ensure_field(field_id)?;
        let (_, outcome) = self.modify(id, |session| {
            self.engine
                .on_selection_change(&mut session.state, field_id, selected)
        })?;
        Ok(outcome)
    }

    pub fn show_all(
        &self,
        id: &SessionId,
        group_id: &str,
    ) -> Result<Vec<String>, FormSessionError> {
        if self.engine.layout().group(group_id).is_none() {
            return Err(FormSessionError::UnknownGroup(group_id.to_string()));
        }

        let (_, revealed) = self.modify(id, |session| {
            self.engine.show_all(&mut session.state, group_id)
        })?;
        Ok(revealed)
    }

    pub fn discard(&self, id: &SessionId) -> Result<(), FormSessionError> {
        let lock = self.session_lock(id)?;
        let _guard = lock.lock().map_err(|_| lock_poisoned())?;
        let removed = self.repository.remove(id).map_err(FormSessionError::from);
        if removed.as_ref().err().map_or(true, is_missing) {
            self.release_lock(id);
        }
        removed?;
        info!(session_id = %id, "form session discarded");
        Ok(())
    }

    /// Stateless scoring for callers that only need the evaluation.
    pub fn evaluate(&self, text: &str, field: FieldSelector<'_>) -> Evaluation {
        let field_type = match field {
            FieldSelector::Id(field_id) => self.engine.layout().field_type(field_id),
            FieldSelector::Type(field_type) => field_type,
        };
        self.engine.evaluator().evaluate(text, field_type)
    }

    fn ensure_field(&self, field_id: &str) -> Result<(), FormSessionError> {
        match self.engine.layout().locate(field_id) {
            Some(_) => Ok(()),
            None => Err(FormSessionError::UnknownField(field_id.to_string())),
        }
    }

    fn load(&self, id: &SessionId) -> Result<FormSession, FormSessionError> {
        let session = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    fn store(&self, mut session: FormSession) -> Result<FormSession, FormSessionError> {
        session.updated_at = Utc::now();
        self.repository.update(session.clone())?;
        Ok(session)
    }

    /// Load, change and store `id` while holding its session lock.
    fn modify<T>(
        &self,
        id: &SessionId,
        change: impl FnOnce(&mut FormSession) -> T,
    ) -> Result<(FormSession, T), FormSessionError> {
        let lock = self.session_lock(id)?;
        let _guard = lock.lock().map_err(|_| lock_poisoned())?;

        let result = self.load(id).and_then(|mut session| {
            let value = change(&mut session);
            self.store(session).map(|session| (session, value))
        });
        if result.as_ref().err().is_some_and(is_missing) {
            self.release_lock(id);
        }
        result
    }

    fn session_lock(&self, id: &SessionId) -> Result<Arc<Mutex<()>>, FormSessionError> {
        let mut locks = self.session_locks.lock().map_err(|_| lock_poisoned())?;
        Ok(locks.entry(id.clone()).or_default().clone())
    }

    /// Drops the lock entry of a session that no longer exists.
    fn release_lock(&self, id: &SessionId) {
        if let Ok(mut locks) = self.session_locks.lock() {
            locks.remove(id);
        }
    }

    fn snapshot(&self, session: &FormSession) -> SessionSnapshot {
        let layout = self.engine.layout();
        let fields = layout
            .groups()
            .iter()
            .flat_map(|group| {
                group.nodes.iter().map(move |node| (group.id.as_str(), node))
            })
            .map(|(group_id, node)| {
                let progress = session.state.field(&node.id).copied().unwrap_or_default();
                let visibility = progress.visibility();
                FieldSnapshotView {
                    field_id: node.id.clone(),
                    group_id: group_id.to_string(),
                    field_type: layout.catalog().get(&node.id),
                    visibility,
                    visibility_label: visibility.label(),
                    last_score: progress.last_score,
                    draft: session.drafts.get(&node.id).cloned(),
                }
            })
            .collect();

        SessionSnapshot {
            session_id: session.id.clone(),
            active_model: session.state.active_model(),
            fields,
            groups: self.engine.active_progress(&session.state),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

fn is_missing(error: &FormSessionError) -> bool {
    matches!(error, FormSessionError::Repository(RepositoryError::NotFound))
}

fn lock_poisoned() -> FormSessionError {
    RepositoryError::Unavailable("session lock poisoned".to_string()).into()
}

/// How a scoring request names its field.
#[derive(Debug, Clone, Copy)]
pub enum FieldSelector<'a> {
    Id(&'a str),
    Type(FieldType),
}

/// Sanitized representation of a session for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_model: Option<ContentModel>,
    pub fields: Vec<FieldSnapshotView>,
    pub groups: Vec<GroupProgress>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn field(&self, field_id: &str) -> Option<&FieldSnapshotView> {
        self.fields.iter().find(|field| field.field_id == field_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshotView {
    pub field_id: String,
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    pub visibility: FieldVisibility,
    pub visibility_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
}

/// Error raised by the form session service.
#[derive(Debug, thiserror::Error)]
pub enum FormSessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("field '{0}' is not part of this form")]
    UnknownField(String),
    #[error("field group '{0}' is not part of this form")]
    UnknownGroup(String),
}
