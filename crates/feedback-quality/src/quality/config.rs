use super::domain::{FieldType, QualityLevel};
use super::lexicon::LexiconConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Score a field must reach before the next field of its group is revealed.
pub const DEFAULT_MIN_SCORE_TO_PROGRESS: u8 = 40;

/// Single source for every threshold, weight, length profile and word list
/// the scorer, the hint generator and the disclosure engine consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    pub min_score_to_progress: u8,
    pub levels: LevelThresholds,
    pub hints: HintThresholds,
    pub caps: MarkerCaps,
    pub profiles: BTreeMap<FieldType, FieldProfile>,
    pub fallback_profile: FieldProfile,
    pub specificity_markers: LexiconConfig,
    pub concrete_nouns: LexiconConfig,
    pub action_verbs: LexiconConfig,
}

impl QualityConfig {
    pub fn standard() -> Self {
        let profiles = FieldType::ordered()
            .into_iter()
            .filter(|field_type| *field_type != FieldType::Default)
            .map(|field_type| (field_type, FieldProfile::standard(field_type)))
            .collect();

        Self {
            min_score_to_progress: DEFAULT_MIN_SCORE_TO_PROGRESS,
            levels: LevelThresholds::default(),
            hints: HintThresholds::default(),
            caps: MarkerCaps::default(),
            profiles,
            fallback_profile: FieldProfile::standard(FieldType::Default),
            specificity_markers: LexiconConfig::specificity_markers(),
            concrete_nouns: LexiconConfig::concrete_nouns(),
            action_verbs: LexiconConfig::action_verbs(),
        }
    }

    /// Reads a JSON profile, rejecting it if it fails [`QualityConfig::validate`].
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, QualityConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Profile for `field_type`, falling back to the generic profile.
    pub fn profile(&self, field_type: FieldType) -> &FieldProfile {
        self.profiles
            .get(&field_type)
            .unwrap_or(&self.fallback_profile)
    }

    pub fn validate(&self) -> Result<(), QualityConfigError> {
        if self.min_score_to_progress > 100 {
            return Err(QualityConfigError::ThresholdOutOfRange {
                name: "min_score_to_progress",
                value: self.min_score_to_progress,
            });
        }
        self.levels.validate()?;

        let caps = [
            ("specificity", self.caps.specificity),
            ("concreteness", self.caps.concreteness),
            ("actionability", self.caps.actionability),
        ];
        for (metric, cap) in caps {
            if cap.max == 0 || cap.words_per_marker == 0 {
                return Err(QualityConfigError::InvalidCap { metric });
            }
        }

        for (field_type, profile) in &self.profiles {
            profile.validate(*field_type)?;
        }
        self.fallback_profile.validate(FieldType::Default)
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lower bounds of each level above `poor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub basic: u8,
    pub good: u8,
    pub excellent: u8,
    pub outstanding: u8,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            basic: 30,
            good: 50,
            excellent: 70,
            outstanding: 85,
        }
    }
}

impl LevelThresholds {
    /// Level for a non-empty text's score.
    pub fn level_for(&self, score: u8) -> QualityLevel {
        if score < self.basic {
            QualityLevel::Poor
        } else if score < self.good {
            QualityLevel::Basic
        } else if score < self.excellent {
            QualityLevel::Good
        } else if score < self.outstanding {
            QualityLevel::Excellent
        } else {
            QualityLevel::Outstanding
        }
    }

    fn validate(&self) -> Result<(), QualityConfigError> {
        let ordered = self.basic < self.good
            && self.good < self.excellent
            && self.excellent < self.outstanding
            && self.outstanding <= 100;
        if ordered {
            Ok(())
        } else {
            Err(QualityConfigError::UnorderedLevels)
        }
    }
}

/// Metric values below which an improvement hint is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintThresholds {
    pub length: u8,
    pub specificity: u8,
    pub concreteness: u8,
    pub actionability: u8,
}

impl Default for HintThresholds {
    fn default() -> Self {
        Self {
            length: 50,
            specificity: 60,
            concreteness: 60,
            actionability: 60,
        }
    }
}

/// `min(max, ceil(word_count / words_per_marker))` expected hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerCap {
    pub max: usize,
    pub words_per_marker: usize,
}

impl MarkerCap {
    pub fn expected(&self, word_count: usize) -> usize {
        word_count
            .div_ceil(self.words_per_marker)
            .clamp(1, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerCaps {
    pub specificity: MarkerCap,
    pub concreteness: MarkerCap,
    pub actionability: MarkerCap,
}

impl Default for MarkerCaps {
    fn default() -> Self {
        Self {
            specificity: MarkerCap {
                max: 5,
                words_per_marker: 10,
            },
            concreteness: MarkerCap {
                max: 4,
                words_per_marker: 15,
            },
            actionability: MarkerCap {
                max: 3,
                words_per_marker: 20,
            },
        }
    }
}

/// Weights of the four sub-metrics; they must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    pub length: f64,
    pub specificity: f64,
    pub concreteness: f64,
    pub actionability: f64,
}

impl MetricWeights {
    const fn new(length: f64, specificity: f64, concreteness: f64, actionability: f64) -> Self {
        Self {
            length,
            specificity,
            concreteness,
            actionability,
        }
    }

    pub fn total(&self) -> f64 {
        self.length + self.specificity + self.concreteness + self.actionability
    }
}

/// Word-count profile: ramp up to `min`, reach 100 at `ideal`, decay past `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthProfile {
    pub min: usize,
    pub ideal: usize,
    pub max: usize,
}

impl LengthProfile {
    const fn new(min: usize, ideal: usize, max: usize) -> Self {
        Self { min, ideal, max }
    }
}

/// Range the actionability multiplier must stay within.
pub const ACTIONABILITY_MULTIPLIER_RANGE: (f64, f64) = (0.3, 1.2);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldProfile {
    pub weights: MetricWeights,
    pub length: LengthProfile,
    /// Descriptive fields are scaled down, prescriptive ones up.
    pub actionability_multiplier: f64,
    /// Whether a low actionability metric produces a hint for this field.
    pub actionability_hints: bool,
}

impl FieldProfile {
    pub fn standard(field_type: FieldType) -> Self {
        let (weights, length, actionability_multiplier) = match field_type {
            FieldType::Strengths => (
                MetricWeights::new(0.20, 0.35, 0.30, 0.15),
                LengthProfile::new(8, 20, 80),
                0.6,
            ),
            FieldType::Improvement => (
                MetricWeights::new(0.20, 0.30, 0.25, 0.25),
                LengthProfile::new(10, 25, 90),
                1.0,
            ),
            FieldType::Support => (
                MetricWeights::new(0.20, 0.25, 0.20, 0.35),
                LengthProfile::new(8, 20, 80),
                1.2,
            ),
            FieldType::Situation => (
                MetricWeights::new(0.25, 0.35, 0.35, 0.05),
                LengthProfile::new(8, 20, 70),
                0.3,
            ),
            FieldType::Behavior => (
                MetricWeights::new(0.20, 0.30, 0.30, 0.20),
                LengthProfile::new(8, 20, 70),
                0.8,
            ),
            FieldType::Impact => (
                MetricWeights::new(0.25, 0.30, 0.30, 0.15),
                LengthProfile::new(8, 20, 70),
                0.6,
            ),
            FieldType::Task => (
                MetricWeights::new(0.25, 0.30, 0.30, 0.15),
                LengthProfile::new(6, 15, 60),
                0.7,
            ),
            FieldType::Action => (
                MetricWeights::new(0.20, 0.25, 0.25, 0.30),
                LengthProfile::new(10, 25, 80),
                1.0,
            ),
            FieldType::Result => (
                MetricWeights::new(0.20, 0.40, 0.25, 0.15),
                LengthProfile::new(8, 20, 70),
                0.6,
            ),
            FieldType::FollowUp => (
                MetricWeights::new(0.20, 0.30, 0.15, 0.35),
                LengthProfile::new(6, 15, 60),
                1.2,
            ),
            FieldType::Default => (
                MetricWeights::new(0.25, 0.25, 0.25, 0.25),
                LengthProfile::new(5, 15, 60),
                1.0,
            ),
        };

        Self {
            weights,
            length,
            actionability_multiplier,
            actionability_hints: matches!(
                field_type,
                FieldType::Improvement
                    | FieldType::Support
                    | FieldType::Behavior
                    | FieldType::Action
                    | FieldType::FollowUp
            ),
        }
    }

    fn validate(&self, field_type: FieldType) -> Result<(), QualityConfigError> {
        let weights = [
            self.weights.length,
            self.weights.specificity,
            self.weights.concreteness,
            self.weights.actionability,
        ];
        if weights.iter().any(|weight| *weight < 0.0)
            || (self.weights.total() - 1.0).abs() > 1e-6
        {
            return Err(QualityConfigError::WeightsDoNotSumToOne {
                field_type,
                total: self.weights.total(),
            });
        }

        let LengthProfile { min, ideal, max } = self.length;
        if min == 0 || min > ideal || ideal > max {
            return Err(QualityConfigError::InvalidLengthProfile {
                field_type,
                min,
                ideal,
                max,
            });
        }

        let (low, high) = ACTIONABILITY_MULTIPLIER_RANGE;
        if !(low..=high).contains(&self.actionability_multiplier) {
            return Err(QualityConfigError::MultiplierOutOfRange {
                field_type,
                value: self.actionability_multiplier,
            });
        }

        Ok(())
    }
}

/// Rejected scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum QualityConfigError {
    #[error("invalid quality profile JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be within 0..=100, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: u8 },
    #[error("level thresholds must be strictly increasing and at most 100")]
    UnorderedLevels,
    #[error("{metric} marker cap must be non-zero")]
    InvalidCap { metric: &'static str },
    #[error("weights for {field_type} sum to {total:.3}, expected 1.0")]
    WeightsDoNotSumToOne { field_type: FieldType, total: f64 },
    #[error("length profile for {field_type} must satisfy 0 < min <= ideal <= max (got {min}/{ideal}/{max})")]
    InvalidLengthProfile {
        field_type: FieldType,
        min: usize,
        ideal: usize,
        max: usize,
    },
    #[error("actionability multiplier for {field_type} must be within 0.3..=1.2, got {value}")]
    MultiplierOutOfRange { field_type: FieldType, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid() {
        QualityConfig::standard()
            .validate()
            .expect("standard profile validates");
    }

    #[test]
    fn unknown_field_types_use_the_fallback_profile() {
        let config = QualityConfig::standard();
        assert_eq!(
            config.profile(FieldType::Default),
            &FieldProfile::standard(FieldType::Default)
        );
    }

    #[test]
    fn marker_cap_scales_with_word_count() {
        let cap = MarkerCaps::default().specificity;
        assert_eq!(cap.expected(1), 1);
        assert_eq!(cap.expected(19), 2);
        assert_eq!(cap.expected(20), 2);
        assert_eq!(cap.expected(21), 3);
        assert_eq!(cap.expected(500), 5);
    }

    #[test]
    fn level_thresholds_partition_scores() {
        let levels = LevelThresholds::default();
        assert_eq!(levels.level_for(29), QualityLevel::Poor);
        assert_eq!(levels.level_for(30), QualityLevel::Basic);
        assert_eq!(levels.level_for(50), QualityLevel::Good);
        assert_eq!(levels.level_for(69), QualityLevel::Good);
        assert_eq!(levels.level_for(70), QualityLevel::Excellent);
        assert_eq!(levels.level_for(85), QualityLevel::Outstanding);
        assert_eq!(levels.level_for(100), QualityLevel::Outstanding);
    }

    #[test]
    fn rejects_weights_that_do_not_sum_to_one() {
        let mut config = QualityConfig::standard();
        if let Some(profile) = config.profiles.get_mut(&FieldType::Impact) {
            profile.weights.length = 0.9;
        }

        match config.validate() {
            Err(QualityConfigError::WeightsDoNotSumToOne { field_type, .. }) => {
                assert_eq!(field_type, FieldType::Impact);
            }
            other => panic!("expected weight error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inverted_length_profiles() {
        let mut config = QualityConfig::standard();
        config.fallback_profile.length = LengthProfile::new(20, 10, 60);
        assert!(matches!(
            config.validate(),
            Err(QualityConfigError::InvalidLengthProfile { .. })
        ));
    }

    #[test]
    fn json_profile_round_trips_through_the_reader() {
        let json = serde_json::to_vec(&QualityConfig::standard()).expect("serializes");
        let loaded = QualityConfig::from_json_reader(json.as_slice()).expect("loads");
        assert_eq!(loaded, QualityConfig::standard());
    }
}
