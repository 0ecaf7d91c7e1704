//! Progressive disclosure: reveal a group's next field once the current one
//! reads well enough.
//!
//! [`DisclosureEngine`] is stateless; each form instance owns its own
//! [`DisclosureState`] and passes it into every transition.

mod layout;
mod progress;
mod state;

#[cfg(test)]
mod tests;

pub use layout::{ContentModel, FieldGroup, FieldNode, FormLayout, LayoutError, LayoutIssue};
pub use progress::GroupProgress;
pub use state::{DisclosureState, FieldProgress, FieldVisibility};

use crate::quality::{Evaluation, FieldType, QualityEvaluator};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one text change on a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInputOutcome {
    pub field_id: String,
    pub field_type: FieldType,
    pub evaluation: Evaluation,
    /// Completion state after this input.
    pub completed: bool,
    /// Ids that switched from hidden to visible; the caller animates them in.
    pub revealed: Vec<String>,
}

/// Outcome of a checkbox-set change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub field_id: String,
    pub completed: bool,
    pub revealed: Vec<String>,
}

pub struct DisclosureEngine {
    layout: Arc<FormLayout>,
    evaluator: Arc<QualityEvaluator>,
}

impl DisclosureEngine {
    /// Builds the engine, logging every [`LayoutIssue`] of `layout`.
    pub fn new(layout: Arc<FormLayout>, evaluator: Arc<QualityEvaluator>) -> Self {
        for issue in layout.issues() {
            warn!(%issue, "form layout issue");
        }
        Self { layout, evaluator }
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn evaluator(&self) -> &QualityEvaluator {
        &self.evaluator
    }

    pub fn initial_state(&self) -> DisclosureState {
        DisclosureState::initial(&self.layout)
    }

    /// Resets every group to its initial pattern and activates `model`.
    pub fn select_model(&self, state: &mut DisclosureState, model: ContentModel) {
        if self.layout.group_for_model(model).is_none() {
            warn!(%model, "no field group is defined for content model");
        }

        *state = DisclosureState::initial(&self.layout);
        state.set_active_model(model);
        debug!(%model, "content model selected");
    }

    /// Scores `text` for `field_id`; on reaching the progression threshold
    /// the field completes and its `next` fields are revealed.
    ///
    /// Input on fields that are unknown, hidden, or checkbox sets is scored
    /// but changes no visibility.
    pub fn on_field_input(
        &self,
        state: &mut DisclosureState,
        field_id: &str,
        text: &str,
    ) -> FieldInputOutcome {
        let field_type = self.layout.field_type(field_id);
        let evaluation = self.evaluator.evaluate(text, field_type);
        let mut outcome = FieldInputOutcome {
            field_id: field_id.to_string(),
            field_type,
            completed: false,
            evaluation,
            revealed: Vec::new(),
        };

        let Some((_, node)) = self.layout.locate(field_id) else {
            debug!(field_id, "input for field outside the layout");
            return outcome;
        };
        let Some(progress) = state.field_mut(field_id) else {
            return outcome;
        };

        if !node.is_group {
            progress.last_score = Some(outcome.evaluation.score);
        }
        outcome.completed = progress.completed;

        if node.is_group || !progress.visible {
            debug!(field_id, "input on hidden or checkbox field does not progress");
            return outcome;
        }

        if outcome.evaluation.score >= self.evaluator.min_score_to_progress() {
            if !progress.completed {
                debug!(field_id, score = outcome.evaluation.score, "field completed");
            }
            progress.completed = true;
            outcome.completed = true;
            outcome.revealed = self.reveal_all(state, &node.next);
        }

        outcome
    }

    /// Completes a checkbox-set field once at least one option is selected.
    pub fn on_selection_change(
        &self,
        state: &mut DisclosureState,
        field_id: &str,
        selected: usize,
    ) -> SelectionOutcome {
        let mut outcome = SelectionOutcome {
            field_id: field_id.to_string(),
            completed: state.is_completed(field_id),
            revealed: Vec::new(),
        };

        let Some((_, node)) = self.layout.locate(field_id) else {
            debug!(field_id, "selection for field outside the layout");
            return outcome;
        };
        if !node.is_group || selected == 0 || !state.is_visible(field_id) {
            return outcome;
        }

        if let Some(progress) = state.field_mut(field_id) {
            progress.completed = true;
        }
        outcome.completed = true;
        outcome.revealed = self.reveal_all(state, &node.next);
        outcome
    }

    /// Makes every field of `group_id` visible regardless of completion.
    pub fn show_all(&self, state: &mut DisclosureState, group_id: &str) -> Vec<String> {
        let Some(group) = self.layout.group(group_id) else {
            warn!(group_id, "show_all for unknown field group");
            return Vec::new();
        };

        let ids: Vec<String> = group.nodes.iter().map(|node| node.id.clone()).collect();
        let revealed = self.reveal_all(state, &ids);
        debug!(group_id, revealed = revealed.len(), "group fully revealed");
        revealed
    }

    pub fn progress(&self, state: &DisclosureState, group_id: &str) -> Option<GroupProgress> {
        self.layout
            .group(group_id)
            .map(|group| GroupProgress::summarize(group, state))
    }

    /// Progress of the groups that belong to the form under the active model.
    pub fn active_progress(&self, state: &DisclosureState) -> Vec<GroupProgress> {
        self.layout
            .groups()
            .iter()
            .filter(|group| group.is_active_for(state.active_model()))
            .map(|group| GroupProgress::summarize(group, state))
            .collect()
    }

    fn reveal_all(&self, state: &mut DisclosureState, targets: &[String]) -> Vec<String> {
        let mut revealed = Vec::new();
        for target in targets {
            if state.reveal(target) {
                revealed.push(target.clone());
            } else if state.field(target).is_none() {
                debug!(field = target.as_str(), "reveal target has no field; ignored");
            }
        }
        revealed
    }
}
