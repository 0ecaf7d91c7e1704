//! Heuristic input-quality scoring for free-text feedback fields.
//!
//! Every score is a lexical proxy: word counts and marker-word hit rates
//! weighted per [`FieldType`]. Scoring is pure and never fails.

pub mod batch;
mod catalog;
mod config;
mod domain;
pub mod lexicon;
mod metrics;
mod suggestions;

#[cfg(test)]
pub(crate) mod tests;

pub use batch::{score_csv, score_csv_path, BatchError, BatchRow};
pub use catalog::FieldCatalog;
pub use config::{
    FieldProfile, HintThresholds, LengthProfile, LevelThresholds, MarkerCap, MarkerCaps,
    MetricWeights, QualityConfig, QualityConfigError, DEFAULT_MIN_SCORE_TO_PROGRESS,
};
pub use domain::{FieldType, MetricKind, MetricSet, QualityLevel};
pub use suggestions::{hint_text, HintKind, Suggestion};

use lexicon::Lexicon;
use metrics::Lexicons;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Result of scoring one text for one field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u8,
    pub level: QualityLevel,
    pub suggestions: Vec<Suggestion>,
    pub metrics: MetricSet,
}

impl Evaluation {
    fn empty(field_type: FieldType) -> Self {
        Self {
            score: 0,
            level: QualityLevel::Empty,
            suggestions: vec![Suggestion::new(field_type, HintKind::MissingContent)],
            metrics: MetricSet::default(),
        }
    }
}

/// Stateless scorer built once from a [`QualityConfig`].
pub struct QualityEvaluator {
    config: QualityConfig,
    lexicons: Lexicons,
}

impl QualityEvaluator {
    pub fn new(config: QualityConfig) -> Result<Self, QualityConfigError> {
        config.validate()?;
        Ok(Self::compile(config))
    }

    /// Evaluator over [`QualityConfig::standard`].
    pub fn standard() -> Self {
        Self::compile(QualityConfig::standard())
    }

    fn compile(config: QualityConfig) -> Self {
        let lexicons = Lexicons {
            specificity: Lexicon::compile(&config.specificity_markers),
            concreteness: Lexicon::compile(&config.concrete_nouns),
            actionability: Lexicon::compile(&config.action_verbs),
        };
        Self { config, lexicons }
    }

    pub fn min_score_to_progress(&self) -> u8 {
        self.config.min_score_to_progress
    }

    pub fn evaluate(&self, text: &str, field_type: FieldType) -> Evaluation {
        if text.trim().is_empty() {
            return Evaluation::empty(field_type);
        }

        let profile = self.config.profile(field_type);
        let metrics = metrics::measure(text, profile, &self.lexicons, &self.config.caps);
        let score = metrics::weighted_score(&metrics, &profile.weights);
        let level = self.config.levels.level_for(score);
        let suggestions = self.suggest(field_type, &metrics);

        trace!(%field_type, score, ?level, "evaluated field text");

        Evaluation {
            score,
            level,
            suggestions,
            metrics,
        }
    }

    /// Scores `text` using the type `catalog` assigns to `field_id`.
    pub fn evaluate_field(&self, catalog: &FieldCatalog, field_id: &str, text: &str) -> Evaluation {
        self.evaluate(text, catalog.field_type(field_id))
    }

    /// Improvement hints for already computed metrics.
    pub fn suggest(&self, field_type: FieldType, metrics: &MetricSet) -> Vec<Suggestion> {
        suggestions::suggest(
            field_type,
            metrics,
            self.config.profile(field_type),
            &self.config.hints,
        )
    }
}

impl Default for QualityEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}
