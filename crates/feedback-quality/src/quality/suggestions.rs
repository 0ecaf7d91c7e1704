use super::config::{FieldProfile, HintThresholds};
use super::domain::{FieldType, MetricKind, MetricSet};
use serde::{Deserialize, Serialize};

/// What a hint asks the writer to add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    MissingContent,
    Length,
    Specificity,
    Concreteness,
    Actionability,
}

impl From<MetricKind> for HintKind {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Length => Self::Length,
            MetricKind::Specificity => Self::Specificity,
            MetricKind::Concreteness => Self::Concreteness,
            MetricKind::Actionability => Self::Actionability,
        }
    }
}

/// Structured hint key plus the default English rendering of it.
///
/// Presentation layers that localise hints should key off `field_type` and
/// `hint` and treat `message` as a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub field_type: FieldType,
    pub hint: HintKind,
    pub message: String,
}

impl Suggestion {
    pub fn new(field_type: FieldType, hint: HintKind) -> Self {
        Self {
            field_type,
            hint,
            message: hint_text(field_type, hint).to_string(),
        }
    }
}

/// Hints for a non-empty text, always in length, specificity, concreteness,
/// actionability order.
pub(crate) fn suggest(
    field_type: FieldType,
    metrics: &MetricSet,
    profile: &FieldProfile,
    thresholds: &HintThresholds,
) -> Vec<Suggestion> {
    MetricKind::ordered()
        .into_iter()
        .filter(|kind| {
            let value = metrics.get(*kind);
            match kind {
                MetricKind::Length => value < thresholds.length,
                MetricKind::Specificity => value < thresholds.specificity,
                MetricKind::Concreteness => value < thresholds.concreteness,
                MetricKind::Actionability => {
                    profile.actionability_hints && value < thresholds.actionability
                }
            }
        })
        .map(|kind| Suggestion::new(field_type, kind.into()))
        .collect()
}

/// Default English text for a hint key.
pub fn hint_text(field_type: FieldType, hint: HintKind) -> &'static str {
    use FieldType as F;
    use HintKind as H;

    match (hint, field_type) {
        (H::MissingContent, F::Strengths) => {
            "Please describe the specific strengths you have observed."
        }
        (H::MissingContent, F::Improvement) => {
            "Please describe the area you would like to see improve."
        }
        (H::MissingContent, F::Support) => "Please describe the support you can offer.",
        (H::MissingContent, F::Situation) => "Please describe when and where this happened.",
        (H::MissingContent, F::Behavior) => "Please describe what you observed the person do.",
        (H::MissingContent, F::Impact) => "Please describe the effect this behavior had.",
        (H::MissingContent, F::Task) => "Please describe the task or goal involved.",
        (H::MissingContent, F::Action) => "Please describe the actions that were taken.",
        (H::MissingContent, F::Result) => "Please describe the outcome that followed.",
        (H::MissingContent, F::FollowUp) => "Please describe the agreed next steps.",
        (H::MissingContent, _) => "Please provide details for this field.",

        (H::Length, F::Situation | F::Task) => {
            "Add a little more context so the reader can picture the situation."
        }
        (H::Length, F::Strengths | F::Result) => {
            "Expand on this with an example or two of what you saw."
        }
        (H::Length, _) => "Add more detail to make this feedback clearer.",

        (H::Specificity, F::Situation) => {
            "Mention when this happened, such as a date, meeting or time frame."
        }
        (H::Specificity, F::Result | F::Impact) => {
            "Quantify the outcome where you can, for example with numbers or percentages."
        }
        (H::Specificity, F::Strengths) => {
            "Point to a specific occasion or measurable result that shows this strength."
        }
        (H::Specificity, F::FollowUp) => "Set a clear time frame for the next steps.",
        (H::Specificity, _) => "Include specific details like dates, numbers or frequency.",

        (H::Concreteness, F::Behavior) => {
            "Describe observable actions rather than personality traits."
        }
        (H::Concreteness, F::Situation | F::Task) => {
            "Name the project, meeting or deliverable this relates to."
        }
        (H::Concreteness, _) => {
            "Reference concrete things such as projects, meetings, clients or deliverables."
        }

        (H::Actionability, F::Improvement) => "Suggest a concrete step the person could take.",
        (H::Actionability, F::Support) => "Describe specific actions you will take to help.",
        (H::Actionability, F::FollowUp) => {
            "Agree on specific actions, such as scheduling a check-in."
        }
        (H::Actionability, F::Action) => "Use action verbs to describe what was done.",
        (H::Actionability, _) => "Make this more actionable with clear next steps.",
    }
}
