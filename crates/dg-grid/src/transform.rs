//! Filter/sort transform descriptors
//!
//! Transforms are forwarded to the view for execution; the model only
//! validates field references at assignment time and keeps the list
//! around for state pushes. Comparison values stay opaque JSON so the
//! view's operator vocabulary can evolve without a model change.

use dg_core::FieldName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operator of a filter transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "notempty")]
    NotEmpty,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "startswith")]
    StartsWith,
    #[serde(rename = "endswith")]
    EndsWith,
}

/// A single transform forwarded to the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transform {
    /// Sort rows by a field
    Sort {
        column: FieldName,
        #[serde(default)]
        desc: bool,
    },
    /// Filter rows on a field
    Filter {
        column: FieldName,
        operator: FilterOperator,
        /// Absent for operators that need no operand (`empty`, `notempty`)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
}

impl Transform {
    /// Field the transform targets
    pub fn column(&self) -> &FieldName {
        match self {
            Transform::Sort { column, .. } => column,
            Transform::Filter { column, .. } => column,
        }
    }
}
