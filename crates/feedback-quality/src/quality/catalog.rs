use super::domain::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static field id -> [`FieldType`] table for one form layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: BTreeMap<String, FieldType>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field_id: impl Into<String>, field_type: FieldType) -> Self {
        self.insert(field_id, field_type);
        self
    }

    pub fn insert(&mut self, field_id: impl Into<String>, field_type: FieldType) {
        self.fields.insert(field_id.into(), field_type);
    }

    pub fn get(&self, field_id: &str) -> Option<FieldType> {
        self.fields.get(field_id).copied()
    }

    /// Type for `field_id`, [`FieldType::Default`] when the id is unmapped.
    pub fn field_type(&self, field_id: &str) -> FieldType {
        self.get(field_id).unwrap_or(FieldType::Default)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.fields.contains_key(field_id)
    }
}

impl<S: Into<String>> FromIterator<(S, FieldType)> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = (S, FieldType)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field_id, field_type)| (field_id.into(), field_type))
                .collect(),
        }
    }
}
