//! Input-quality scoring and progressive disclosure for the FeedbackForge
//! feedback form.
//!
//! [`quality`] scores a field's text and produces improvement hints,
//! [`disclosure`] decides which fields are visible as the writer progresses,
//! and [`sessions`] stores in-progress forms behind an axum router.

pub mod config;
pub mod disclosure;
pub mod error;
pub mod quality;
pub mod sessions;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use disclosure::{ContentModel, DisclosureEngine, DisclosureState, FormLayout};
pub use error::AppError;
pub use quality::{Evaluation, FieldType, QualityConfig, QualityEvaluator, QualityLevel};
pub use sessions::{form_router, FormSessionService, SessionRepository};
