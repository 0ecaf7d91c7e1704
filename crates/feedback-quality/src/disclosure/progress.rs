use super::layout::{ContentModel, FieldGroup};
use super::state::DisclosureState;
use serde::Serialize;

/// Per-group completion summary used for section validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupProgress {
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ContentModel>,
    pub total: usize,
    pub visible: usize,
    pub completed: usize,
    /// Required fields not completed yet, in layout order.
    pub required_incomplete: Vec<String>,
}

impl GroupProgress {
    pub(crate) fn summarize(group: &FieldGroup, state: &DisclosureState) -> Self {
        let mut progress = Self {
            group_id: group.id.clone(),
            model: group.model,
            total: group.nodes.len(),
            visible: 0,
            completed: 0,
            required_incomplete: Vec::new(),
        };

        for node in &group.nodes {
            let field = state.field(&node.id).copied().unwrap_or_default();
            if field.visible {
                progress.visible += 1;
            }
            if field.completed {
                progress.completed += 1;
            } else if node.required {
                progress.required_incomplete.push(node.id.clone());
            }
        }

        progress
    }

    pub fn is_complete(&self) -> bool {
        self.required_incomplete.is_empty()
    }
}
