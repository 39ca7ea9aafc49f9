//! Declarative description of the parameters a source accepts.
//!
//! Metadata is data for a generic caller to build inputs from. Adapters only
//! use it to validate incoming values and to fill in defaults when they
//! reflect parameters into requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Field {
    /// Single-choice field over a closed, non-empty option set.
    pub fn select(key: &str, title: &str, options: &[&str]) -> Result<Self> {
        if options.is_empty() {
            return Err(Error::InvalidMetadata(format!("field {key} has no options")));
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(Error::InvalidMetadata(format!(
                    "field {key} lists option {option:?} twice"
                )));
            }
        }

        Ok(Self {
            key: key.to_string(),
            title: title.to_string(),
            kind: FieldKind::Select,
            options: options.iter().map(|o| o.to_string()).collect(),
            default: None,
        })
    }

    pub fn with_default(mut self, default: &str) -> Result<Self> {
        if !self.accepts(default) {
            return Err(Error::InvalidMetadata(format!(
                "default {default:?} is not an option of field {}",
                self.key
            )));
        }
        self.default = Some(default.to_string());
        Ok(self)
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// Ordered set of fields with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSet(Vec<Field>);

impl FieldSet {
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.key == field.key) {
                return Err(Error::InvalidMetadata(format!(
                    "duplicate field key {}",
                    field.key
                )));
            }
        }
        Ok(Self(fields))
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.iter().find(|f| f.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejects a value outside a known field's options; unknown keys pass.
    pub fn validate(&self, params: &BTreeMap<String, String>) -> Result<()> {
        for (key, value) in params {
            if let Some(field) = self.get(key) {
                if !field.accepts(value) {
                    return Err(Error::InvalidParameter {
                        key: key.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Known fields paired with the caller's value or the field default.
    ///
    /// Fields with neither are left out.
    pub fn resolve(&self, params: &BTreeMap<String, String>) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|field| {
                params
                    .get(&field.key)
                    .cloned()
                    .or_else(|| field.default.clone())
                    .map(|value| (field.key.clone(), value))
            })
            .collect()
    }
}

/// Per-operation parameter descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsMetadata {
    pub search: FieldSet,
    pub view_more: FieldSet,
}

impl FieldsMetadata {
    pub fn new(search: FieldSet, view_more: FieldSet) -> Self {
        Self { search, view_more }
    }

    pub fn search_only(search: FieldSet) -> Self {
        Self {
            search,
            view_more: FieldSet::default(),
        }
    }

    pub fn validate_search(&self, params: &BTreeMap<String, String>) -> Result<()> {
        self.search.validate(params)
    }

    pub fn resolve_search(&self, params: &BTreeMap<String, String>) -> Vec<(String, String)> {
        self.search.resolve(params)
    }
}
