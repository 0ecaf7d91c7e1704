use super::layout::{ContentModel, FormLayout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldVisibility {
    Hidden,
    VisibleIncomplete,
    VisibleCompleted,
}

impl FieldVisibility {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hidden => "Hidden",
            Self::VisibleIncomplete => "In progress",
            Self::VisibleCompleted => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldProgress {
    pub visible: bool,
    pub completed: bool,
    /// Score of the most recent input; may sit below the threshold after a
    /// completed field is edited down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_score: Option<u8>,
}

impl FieldProgress {
    pub fn visibility(&self) -> FieldVisibility {
        match (self.visible, self.completed) {
            (false, _) => FieldVisibility::Hidden,
            (true, false) => FieldVisibility::VisibleIncomplete,
            (true, true) => FieldVisibility::VisibleCompleted,
        }
    }
}

/// Reveal/completion progress of every field in a [`FormLayout`].
///
/// Owned by the caller (one per form instance) and mutated only through
/// [`super::DisclosureEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisclosureState {
    active_model: Option<ContentModel>,
    fields: BTreeMap<String, FieldProgress>,
}

impl DisclosureState {
    /// First node of every group visible, everything else hidden.
    pub fn initial(layout: &FormLayout) -> Self {
        let fields = layout
            .groups()
            .iter()
            .flat_map(|group| {
                group.nodes.iter().enumerate().map(|(index, node)| {
                    let progress = FieldProgress {
                        visible: index == 0,
                        ..FieldProgress::default()
                    };
                    (node.id.clone(), progress)
                })
            })
            .collect();

        Self {
            active_model: None,
            fields,
        }
    }

    pub fn active_model(&self) -> Option<ContentModel> {
        self.active_model
    }

    pub(crate) fn set_active_model(&mut self, model: ContentModel) {
        self.active_model = Some(model);
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldProgress> {
        self.fields.get(field_id)
    }

    pub(crate) fn field_mut(&mut self, field_id: &str) -> Option<&mut FieldProgress> {
        self.fields.get_mut(field_id)
    }

    pub fn visibility(&self, field_id: &str) -> Option<FieldVisibility> {
        self.field(field_id).map(FieldProgress::visibility)
    }

    pub fn is_visible(&self, field_id: &str) -> bool {
        self.field(field_id)
            .map(|progress| progress.visible)
            .unwrap_or(false)
    }

    pub fn is_completed(&self, field_id: &str) -> bool {
        self.field(field_id)
            .map(|progress| progress.completed)
            .unwrap_or(false)
    }

    /// Reveals `field_id`; `false` when it was already visible or unknown.
    pub(crate) fn reveal(&mut self, field_id: &str) -> bool {
        match self.fields.get_mut(field_id) {
            Some(progress) if !progress.visible => {
                progress.visible = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_shows_only_group_heads() {
        let state = DisclosureState::initial(&FormLayout::feedback_forge());

        for head in ["specific-strengths", "situation", "star-situation", "next-steps"] {
            assert_eq!(
                state.visibility(head),
                Some(FieldVisibility::VisibleIncomplete)
            );
        }
        for hidden in ["behavior", "impact", "task", "result", "support-resources"] {
            assert_eq!(state.visibility(hidden), Some(FieldVisibility::Hidden));
        }
        assert_eq!(state.active_model(), None);
        assert_eq!(state.visibility("nope"), None);
    }

    #[test]
    fn reveal_is_a_one_way_latch() {
        let mut state = DisclosureState::initial(&FormLayout::feedback_forge());

        assert!(state.reveal("behavior"));
        assert!(!state.reveal("behavior"));
        assert!(!state.reveal("ghost"));
        assert!(state.is_visible("behavior"));
    }
}
