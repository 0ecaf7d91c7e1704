use crate::quality::{
    FieldProfile, FieldType, LengthProfile, MetricWeights, QualityConfig, QualityEvaluator,
};

pub(crate) const ACCURACY_STRENGTH: &str = "your consistent, reliable approach to quality \
     assurance, maintaining a 99.8% accuracy rate across all deliverables over the past quarter";

pub(crate) const STRONG_SITUATION: &str =
    "During the Monday client meeting last week, the quarterly budget review ran over time";

pub(crate) const STRONG_NEXT_STEPS: &str = "Schedule a weekly check-in with the team every \
     Friday to review progress on the project milestones";

pub(crate) fn evaluator() -> QualityEvaluator {
    QualityEvaluator::standard()
}

/// Profile where only word count matters and the ramp below `min` hits
/// one point per word.
pub(crate) fn length_only_config(field_type: FieldType) -> QualityConfig {
    let mut config = QualityConfig::standard();
    config.profiles.insert(
        field_type,
        FieldProfile {
            weights: MetricWeights {
                length: 1.0,
                specificity: 0.0,
                concreteness: 0.0,
                actionability: 0.0,
            },
            length: LengthProfile {
                min: 40,
                ideal: 80,
                max: 200,
            },
            actionability_multiplier: 1.0,
            actionability_hints: false,
        },
    );
    config
}

/// `count` filler words without any marker, noun or verb hits.
pub(crate) fn filler_words(count: usize) -> String {
    vec!["word"; count].join(" ")
}
