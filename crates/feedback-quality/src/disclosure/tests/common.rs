use std::sync::Arc;

use crate::disclosure::{DisclosureEngine, FormLayout};
use crate::quality::tests::common::length_only_config;
use crate::quality::{FieldType, QualityEvaluator};

pub(super) use crate::quality::tests::common::{
    filler_words, ACCURACY_STRENGTH, STRONG_NEXT_STEPS, STRONG_SITUATION,
};

pub(super) const WEAK_TEXT: &str = "fine";

pub(super) fn engine() -> DisclosureEngine {
    DisclosureEngine::new(
        Arc::new(FormLayout::feedback_forge()),
        Arc::new(QualityEvaluator::standard()),
    )
}

/// Engine whose strengths field scores exactly one point per word up to 40.
pub(super) fn word_counting_engine() -> DisclosureEngine {
    let evaluator =
        QualityEvaluator::new(length_only_config(FieldType::Strengths)).expect("valid config");

    DisclosureEngine::new(Arc::new(FormLayout::feedback_forge()), Arc::new(evaluator))
}
