//! Column identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a schema field.
///
/// Flat datasets use simple string names. Datasets with hierarchical
/// column headers address a field by the ordered path of its levels, so a
/// field name is either form, never silently one coerced into the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldName {
    /// Single-level column name
    Simple(String),
    /// Multi-level column name, one entry per header level
    Path(Vec<String>),
}

impl FieldName {
    /// Build a multi-level name from its header levels
    pub fn path<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldName::Path(levels.into_iter().map(Into::into).collect())
    }

    /// Derive a collision-avoidance candidate by appending `_{index}`.
    ///
    /// For multi-level names the suffix lands on the first level, the one
    /// carrying the user-visible name.
    pub fn with_suffix(&self, index: usize) -> FieldName {
        match self {
            FieldName::Simple(name) => FieldName::Simple(format!("{name}_{index}")),
            FieldName::Path(levels) => {
                let mut levels = levels.clone();
                if let Some(first) = levels.first_mut() {
                    *first = format!("{first}_{index}");
                }
                FieldName::Path(levels)
            }
        }
    }

    /// Number of header levels (1 for simple names)
    pub fn level_count(&self) -> usize {
        match self {
            FieldName::Simple(_) => 1,
            FieldName::Path(levels) => levels.len(),
        }
    }

    /// Widen this name to `levels` header levels, padding with empty
    /// strings. Used when a dataset mixes flat index names with
    /// hierarchical data columns.
    pub fn pad_to_levels(&self, levels: usize) -> FieldName {
        if levels <= 1 {
            return self.clone();
        }
        let mut padded = match self {
            FieldName::Simple(name) => vec![name.clone()],
            FieldName::Path(existing) => existing.clone(),
        };
        while padded.len() < levels {
            padded.push(String::new());
        }
        FieldName::Path(padded)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Simple(name) => f.write_str(name),
            FieldName::Path(levels) => f.write_str(&levels.join(".")),
        }
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        FieldName::Simple(name.to_string())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        FieldName::Simple(name)
    }
}

impl From<Vec<String>> for FieldName {
    fn from(levels: Vec<String>) -> Self {
        FieldName::Path(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_search_shape() {
        let name = FieldName::from("key");
        assert_eq!(name.with_suffix(0), FieldName::from("key_0"));
        assert_eq!(name.with_suffix(3), FieldName::from("key_3"));

        let nested = FieldName::path(["key", ""]);
        assert_eq!(nested.with_suffix(1), FieldName::path(["key_1", ""]));
    }

    #[test]
    fn test_padding() {
        let name = FieldName::from("key");
        assert_eq!(name.pad_to_levels(3), FieldName::path(["key", "", ""]));
        assert_eq!(name.pad_to_levels(1), name);
    }

    #[test]
    fn test_wire_shape() {
        let simple = serde_json::to_value(FieldName::from("alpha")).unwrap();
        assert_eq!(simple, serde_json::json!("alpha"));

        let nested = serde_json::to_value(FieldName::path(["a", "b"])).unwrap();
        assert_eq!(nested, serde_json::json!(["a", "b"]));

        let back: FieldName = serde_json::from_value(nested).unwrap();
        assert_eq!(back, FieldName::path(["a", "b"]));
    }
}
