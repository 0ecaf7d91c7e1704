use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring profile selector assigned to every free-text field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Strengths,
    Improvement,
    Support,
    Situation,
    Behavior,
    Impact,
    Task,
    Action,
    Result,
    FollowUp,
    Default,
}

impl FieldType {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Strengths,
            Self::Improvement,
            Self::Support,
            Self::Situation,
            Self::Behavior,
            Self::Impact,
            Self::Task,
            Self::Action,
            Self::Result,
            Self::FollowUp,
            Self::Default,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strengths => "strengths",
            Self::Improvement => "improvement",
            Self::Support => "support",
            Self::Situation => "situation",
            Self::Behavior => "behavior",
            Self::Impact => "impact",
            Self::Task => "task",
            Self::Action => "action",
            Self::Result => "result",
            Self::FollowUp => "followUp",
            Self::Default => "default",
        }
    }

    /// Lenient parse: unknown names fall back to [`FieldType::Default`].
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "strengths" | "strength" => Self::Strengths,
            "improvement" | "improvements" => Self::Improvement,
            "support" => Self::Support,
            "situation" => Self::Situation,
            "behavior" | "behaviour" => Self::Behavior,
            "impact" => Self::Impact,
            "task" => Self::Task,
            "action" => Self::Action,
            "result" => Self::Result,
            "followup" => Self::FollowUp,
            _ => Self::Default,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete quality band derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Empty,
    Poor,
    Basic,
    Good,
    Excellent,
    Outstanding,
}

impl QualityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Poor => "Needs detail",
            Self::Basic => "Basic",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Outstanding => "Outstanding",
        }
    }
}

/// The four sub-metrics the overall score is weighted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Length,
    Specificity,
    Concreteness,
    Actionability,
}

impl MetricKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Length,
            Self::Specificity,
            Self::Concreteness,
            Self::Actionability,
        ]
    }
}

/// Per-evaluation sub-scores, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricSet {
    pub length: u8,
    pub specificity: u8,
    pub concreteness: u8,
    pub actionability: u8,
}

impl MetricSet {
    pub fn get(&self, kind: MetricKind) -> u8 {
        match kind {
            MetricKind::Length => self.length,
            MetricKind::Specificity => self.specificity,
            MetricKind::Concreteness => self.concreteness,
            MetricKind::Actionability => self.actionability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_ids_and_camel_case() {
        assert_eq!(FieldType::parse("followUp"), FieldType::FollowUp);
        assert_eq!(FieldType::parse("follow-up"), FieldType::FollowUp);
        assert_eq!(FieldType::parse(" Behaviour "), FieldType::Behavior);
        assert_eq!(FieldType::parse("specific-strengths"), FieldType::Default);
        assert_eq!(FieldType::parse(""), FieldType::Default);
    }

    #[test]
    fn levels_are_ordered_by_quality() {
        assert!(QualityLevel::Empty < QualityLevel::Poor);
        assert!(QualityLevel::Good < QualityLevel::Excellent);
        assert!(QualityLevel::Excellent < QualityLevel::Outstanding);
    }

    #[test]
    fn field_type_serializes_as_camel_case() {
        let json = serde_json::to_string(&FieldType::FollowUp).expect("serializes");
        assert_eq!(json, "\"followUp\"");
        for field_type in FieldType::ordered() {
            assert_eq!(FieldType::parse(field_type.as_str()), field_type);
        }
    }
}
