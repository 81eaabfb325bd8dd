//! Form payload submitted when a lane is saved

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::AdminResult;

/// Encoded form fields, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LaneForm {
    fields: IndexMap<String, String>,
}

impl LaneForm {
    pub fn build(
        id: Option<i32>,
        parent_id: Option<i32>,
        display_name: &str,
        custom_list_ids: &BTreeSet<i32>,
        inherit_parent_restrictions: bool,
    ) -> AdminResult<Self> {
        let mut fields = IndexMap::new();
        if let Some(id) = id {
            fields.insert("id".to_string(), id.to_string());
        }
        if let Some(parent_id) = parent_id {
            fields.insert("parent_id".to_string(), parent_id.to_string());
        }
        fields.insert("display_name".to_string(), display_name.to_string());
        fields.insert(
            "custom_list_ids".to_string(),
            serde_json::to_string(custom_list_ids)?,
        );
        fields.insert(
            "inherit_parent_restrictions".to_string(),
            inherit_parent_restrictions.to_string(),
        );
        Ok(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether this form creates a lane rather than updating one
    pub fn is_new(&self) -> bool {
        !self.fields.contains_key("id")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
