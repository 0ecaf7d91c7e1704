use crate::quality::{FieldCatalog, FieldType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Shape the user picks to structure the body of their feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentModel {
    Simple,
    Sbi,
    Star,
}

impl ContentModel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Simple, Self::Sbi, Self::Star]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Sbi => "sbi",
            Self::Star => "star",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "Strengths / Improvement / Support",
            Self::Sbi => "Situation-Behavior-Impact",
            Self::Star => "Situation-Task-Action-Result",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "sbi" => Some(Self::Sbi),
            "star" => Some(Self::Star),
            _ => None,
        }
    }
}

impl fmt::Display for ContentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNode {
    pub id: String,
    pub required: bool,
    /// Fields revealed once this one completes.
    #[serde(default)]
    pub next: Vec<String>,
    /// Checkbox set rather than free text; completes on selection, never scored.
    #[serde(default)]
    pub is_group: bool,
}

impl FieldNode {
    pub fn text(id: &str, required: bool, next: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            required,
            next: next.iter().map(|id| id.to_string()).collect(),
            is_group: false,
        }
    }

    pub fn checkboxes(id: &str, required: bool, next: &[&str]) -> Self {
        Self {
            is_group: true,
            ..Self::text(id, required, next)
        }
    }
}

/// Ordered fields of one content model or framing section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub id: String,
    /// `None` for framing sections that are shown for every model.
    #[serde(default)]
    pub model: Option<ContentModel>,
    pub nodes: Vec<FieldNode>,
}

impl FieldGroup {
    pub fn node(&self, field_id: &str) -> Option<&FieldNode> {
        self.nodes.iter().find(|node| node.id == field_id)
    }

    /// Whether the group is part of the form while `model` is selected.
    pub fn is_active_for(&self, model: Option<ContentModel>) -> bool {
        match self.model {
            None => true,
            Some(group_model) => model == Some(group_model),
        }
    }
}

/// Field-type table plus field groups: everything the scorer and the
/// disclosure engine need to know about one concrete form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLayout {
    catalog: FieldCatalog,
    groups: Vec<FieldGroup>,
}

impl FormLayout {
    pub fn new(catalog: FieldCatalog, groups: Vec<FieldGroup>) -> Self {
        Self { catalog, groups }
    }

    /// Strict constructor: rejects layouts with any [`LayoutIssue`].
    pub fn validated(catalog: FieldCatalog, groups: Vec<FieldGroup>) -> Result<Self, LayoutError> {
        let layout = Self::new(catalog, groups);
        let issues = layout.issues();
        if issues.is_empty() {
            Ok(layout)
        } else {
            Err(LayoutError { issues })
        }
    }

    /// The FeedbackForge form: three content models and the follow-up section.
    pub fn feedback_forge() -> Self {
        Self::new(feedback_forge_catalog(), feedback_forge_groups())
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn group_for_model(&self, model: ContentModel) -> Option<&FieldGroup> {
        self.groups.iter().find(|group| group.model == Some(model))
    }

    /// Owning group and node for `field_id`.
    pub fn locate(&self, field_id: &str) -> Option<(&FieldGroup, &FieldNode)> {
        self.groups
            .iter()
            .find_map(|group| group.node(field_id).map(|node| (group, node)))
    }

    pub fn field_type(&self, field_id: &str) -> FieldType {
        self.catalog.field_type(field_id)
    }

    /// Configuration inconsistencies, in group order.
    pub fn issues(&self) -> Vec<LayoutIssue> {
        let mut issues = Vec::new();
        let mut seen = BTreeSet::new();

        for group in &self.groups {
            if group.nodes.is_empty() {
                issues.push(LayoutIssue::EmptyGroup {
                    group: group.id.clone(),
                });
            }

            for node in &group.nodes {
                if !seen.insert(node.id.as_str()) {
                    issues.push(LayoutIssue::DuplicateField {
                        field: node.id.clone(),
                    });
                }

                if !node.is_group && !self.catalog.contains(&node.id) {
                    issues.push(LayoutIssue::MissingFieldType {
                        group: group.id.clone(),
                        field: node.id.clone(),
                    });
                }

                for target in &node.next {
                    if self.locate(target).is_none() {
                        issues.push(LayoutIssue::DanglingReveal {
                            field: node.id.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutIssue {
    #[error("group '{group}' has no fields")]
    EmptyGroup { group: String },
    #[error("field '{field}' appears in more than one place")]
    DuplicateField { field: String },
    #[error("field '{field}' in group '{group}' has no field type mapping")]
    MissingFieldType { group: String, field: String },
    #[error("field '{field}' reveals unknown field '{target}'")]
    DanglingReveal { field: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("form layout is inconsistent: {}", summarize(.issues))]
pub struct LayoutError {
    pub issues: Vec<LayoutIssue>,
}

fn summarize(issues: &[LayoutIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn feedback_forge_catalog() -> FieldCatalog {
    [
        ("specific-strengths", FieldType::Strengths),
        ("areas-for-improvement", FieldType::Improvement),
        ("support-offered", FieldType::Support),
        ("situation", FieldType::Situation),
        ("behavior", FieldType::Behavior),
        ("impact", FieldType::Impact),
        ("star-situation", FieldType::Situation),
        ("task", FieldType::Task),
        ("action", FieldType::Action),
        ("result", FieldType::Result),
        ("next-steps", FieldType::FollowUp),
        ("check-in-plan", FieldType::FollowUp),
    ]
    .into_iter()
    .collect()
}

fn feedback_forge_groups() -> Vec<FieldGroup> {
    vec![
        FieldGroup {
            id: "simple-fields".to_string(),
            model: Some(ContentModel::Simple),
            nodes: vec![
                FieldNode::text("specific-strengths", true, &["areas-for-improvement"]),
                FieldNode::text("areas-for-improvement", true, &["support-offered"]),
                FieldNode::text("support-offered", false, &[]),
            ],
        },
        FieldGroup {
            id: "sbi-fields".to_string(),
            model: Some(ContentModel::Sbi),
            nodes: vec![
                FieldNode::text("situation", true, &["behavior"]),
                FieldNode::text("behavior", true, &["impact"]),
                FieldNode::text("impact", true, &[]),
            ],
        },
        FieldGroup {
            id: "star-fields".to_string(),
            model: Some(ContentModel::Star),
            nodes: vec![
                FieldNode::text("star-situation", true, &["task"]),
                FieldNode::text("task", true, &["action"]),
                FieldNode::text("action", true, &["result"]),
                FieldNode::text("result", true, &[]),
            ],
        },
        FieldGroup {
            id: "follow-up-fields".to_string(),
            model: None,
            nodes: vec![
                FieldNode::text("next-steps", true, &["support-resources"]),
                FieldNode::checkboxes("support-resources", false, &["check-in-plan"]),
                FieldNode::text("check-in-plan", false, &[]),
            ],
        },
    ]
}
