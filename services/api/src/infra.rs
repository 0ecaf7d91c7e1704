use feedback_quality::config::AppConfig;
use feedback_quality::disclosure::{DisclosureEngine, FormLayout};
use feedback_quality::error::AppError;
use feedback_quality::quality::QualityEvaluator;
use feedback_quality::sessions::{FormSession, RepositoryError, SessionId, SessionRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, FormSession>>>,
}

impl SessionRepository for InMemorySessionRepository {
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
        if guard.contains_key(&session.id) {
            guard.insert(session.id.clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Evaluator over the configured profile (built-in unless `QUALITY_PROFILE_PATH` is set).
pub(crate) fn load_evaluator(config: &AppConfig) -> Result<QualityEvaluator, AppError> {
    let profile = config.quality.load_profile()?;
    Ok(QualityEvaluator::new(profile)?)
}

pub(crate) fn build_engine(config: &AppConfig) -> Result<Arc<DisclosureEngine>, AppError> {
    let evaluator = load_evaluator(config)?;
    Ok(Arc::new(DisclosureEngine::new(
        Arc::new(FormLayout::feedback_forge()),
        Arc::new(evaluator),
    )))
}
