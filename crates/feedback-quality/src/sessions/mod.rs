//! Form sessions: a stored [`DisclosureState`](crate::disclosure::DisclosureState)
//! plus cached field drafts, exposed over HTTP.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{FormSession, RepositoryError, SessionId, SessionRepository};
pub use router::{
    form_router, CreateSessionRequest, EvaluateRequest, FieldInputRequest, SelectModelRequest,
    SelectionRequest,
};
pub use service::{
    FieldSelector, FieldSnapshotView, FormSessionError, FormSessionService, SessionSnapshot,
};
