use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::disclosure::{DisclosureEngine, FormLayout};
use crate::quality::QualityEvaluator;
use crate::sessions::repository::{FormSession, RepositoryError, SessionId, SessionRepository};
use crate::sessions::{form_router, FormSessionService};

pub(super) use crate::quality::tests::common::{STRONG_NEXT_STEPS, STRONG_SITUATION};

pub(super) const PLANNING_TEXT: &str =
    "Schedule a review with the team and share the notes after each session";

pub(super) fn engine() -> Arc<DisclosureEngine> {
    Arc::new(DisclosureEngine::new(
        Arc::new(FormLayout::feedback_forge()),
        Arc::new(QualityEvaluator::standard()),
    ))
}

pub(super) fn build_service() -> (FormSessionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = FormSessionService::new(repository.clone(), engine());
    (service, repository)
}

pub(super) fn form_router_with_service(
    service: FormSessionService<MemoryRepository>,
) -> axum::Router {
    form_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, FormSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: FormSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        match guard.get_mut(&session.id) {
            Some(existing) => {
                *existing = session;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

/// Memory store whose reads stall, so concurrent writers overlap.
#[derive(Default, Clone)]
pub(super) struct SlowFetchRepository {
    pub(super) inner: MemoryRepository,
    pub(super) delay: Duration,
}

impl SlowFetchRepository {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryRepository::default(),
            delay,
        }
    }
}

impl SessionRepository for SlowFetchRepository {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError> {
        self.inner.insert(session)
    }

    fn update(&self, session: FormSession) -> Result<(), RepositoryError> {
        self.inner.update(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        std::thread::sleep(self.delay);
        self.inner.fetch(id)
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.inner.remove(id)
    }
}

/// Memory store that deletes a session right after handing it out, as if
/// another client discarded it mid-request.
#[derive(Default, Clone)]
pub(super) struct VanishingRepository {
    pub(super) inner: MemoryRepository,
}

impl SessionRepository for VanishingRepository {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError> {
        self.inner.insert(session)
    }

    fn update(&self, session: FormSession) -> Result<(), RepositoryError> {
        self.inner.update(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        let session = self.inner.fetch(id)?;
        if session.is_some() {
            self.inner.remove(id)?;
        }
        Ok(session)
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.inner.remove(id)
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: FormSession) -> Result<FormSession, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _session: FormSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
