//! Table schema generation
//!
//! Field order is [index level(s)..., data columns..., surrogate key].
//! The surrogate key is a monotonically increasing row id appended to the
//! primary key so rows stay addressable even when the user-visible index
//! is non-unique or absent.

use dg_core::{CellValue, FieldName};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::DataError;

/// Default name for a synthesized or unnamed single index
pub const DEFAULT_INDEX_NAME: &str = "key";
/// Default name for the surrogate key field
pub const DEFAULT_SURROGATE_NAME: &str = "rowid";

/// Column type vocabulary used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    Integer,
    Number,
    String,
    Datetime,
    /// Heterogeneous or empty column
    Any,
}

/// A single schema field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: FieldName,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

/// Schema of a loaded dataset
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    fields: Vec<Field>,
    /// Full primary key, surrogate field last
    primary_key: Vec<FieldName>,
    surrogate_key: FieldName,
}

impl TableSchema {
    /// Derive the schema for a dataset.
    ///
    /// Name resolution follows load-time priority: an explicit
    /// `index_name` wins, else an existing index name, else
    /// [`DEFAULT_INDEX_NAME`]; single-index names colliding with a data
    /// column are renamed with a numeric suffix search (`key_0`, `key_1`,
    /// ...). Unnamed levels of a multi-level index become `level_0`,
    /// `level_1`, .... When data columns are hierarchical, index and
    /// surrogate names are padded to the same level count with empty
    /// trailing levels.
    pub fn generate(dataset: &Dataset, index_name: Option<&str>) -> Result<TableSchema, DataError> {
        let column_names: Vec<FieldName> =
            dataset.columns().iter().map(|(name, _)| name.clone()).collect();
        let levels = column_names
            .iter()
            .map(FieldName::level_count)
            .max()
            .unwrap_or(1);

        // Index field names
        let index_names: Vec<FieldName> = if dataset.index_levels().len() <= 1 {
            let base = index_name
                .map(FieldName::from)
                .or_else(|| dataset.index_levels().first().and_then(|level| level.name.clone()))
                .unwrap_or_else(|| FieldName::from(DEFAULT_INDEX_NAME));
            vec![resolve_collision(base.pad_to_levels(levels), &column_names)]
        } else {
            dataset
                .index_levels()
                .iter()
                .enumerate()
                .map(|(i, level)| {
                    level
                        .name
                        .clone()
                        .unwrap_or_else(|| FieldName::Simple(format!("level_{i}")))
                        .pad_to_levels(levels)
                })
                .collect()
        };

        // Surrogate key name, kept clear of every other field
        let mut taken = index_names.clone();
        taken.extend(column_names.iter().cloned());
        let surrogate_key = resolve_collision(
            FieldName::from(DEFAULT_SURROGATE_NAME).pad_to_levels(levels),
            &taken,
        );

        let mut fields = Vec::with_capacity(index_names.len() + column_names.len() + 1);
        if dataset.index_levels().is_empty() {
            fields.push(Field {
                name: index_names[0].clone(),
                ty: FieldType::Integer,
            });
        } else {
            for (name, level) in index_names.iter().zip(dataset.index_levels()) {
                fields.push(Field {
                    name: name.clone(),
                    ty: infer_type(&level.values),
                });
            }
        }
        for (name, values) in dataset.columns() {
            fields.push(Field {
                name: name.clone(),
                ty: infer_type(values),
            });
        }
        fields.push(Field {
            name: surrogate_key.clone(),
            ty: FieldType::Integer,
        });

        // Field names must be unique across the whole schema
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|other| other.name == field.name) {
                return Err(DataError::DuplicateColumn(field.name.clone()));
            }
        }

        let mut primary_key = index_names;
        primary_key.push(surrogate_key.clone());

        Ok(TableSchema {
            fields,
            primary_key,
            surrogate_key,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Full primary key, surrogate field last
    pub fn primary_key(&self) -> &[FieldName] {
        &self.primary_key
    }

    /// Primary key as the user sees it, surrogate excluded
    pub fn user_key(&self) -> &[FieldName] {
        &self.primary_key[..self.primary_key.len() - 1]
    }

    pub fn surrogate_key(&self) -> &FieldName {
        &self.surrogate_key
    }

    pub fn field(&self, name: &FieldName) -> Option<&Field> {
        self.fields.iter().find(|field| &field.name == name)
    }

    pub fn has_field(&self, name: &FieldName) -> bool {
        self.field(name).is_some()
    }

    pub fn is_primary_key(&self, name: &FieldName) -> bool {
        self.primary_key.contains(name)
    }

    /// Fields in the enumerable data-column space (primary key excluded)
    pub fn data_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| !self.primary_key.contains(&field.name))
    }
}

/// Append `_{0}`, `_{1}`, ... until the name is free
fn resolve_collision(base: FieldName, taken: &[FieldName]) -> FieldName {
    if !taken.contains(&base) {
        return base;
    }
    let mut index = 0;
    loop {
        let candidate = base.with_suffix(index);
        if !taken.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Column type from its values; nulls carry no evidence
fn infer_type(values: &[CellValue]) -> FieldType {
    let mut seen_bool = false;
    let mut seen_int = false;
    let mut seen_float = false;
    let mut seen_str = false;
    let mut seen_datetime = false;

    for value in values {
        match value {
            CellValue::Null => {}
            CellValue::Bool(_) => seen_bool = true,
            CellValue::Int(_) => seen_int = true,
            CellValue::Float(_) => seen_float = true,
            CellValue::Str(_) => seen_str = true,
            CellValue::DateTime(_) | CellValue::NaT => seen_datetime = true,
        }
    }

    match (seen_bool, seen_int, seen_float, seen_str, seen_datetime) {
        (true, false, false, false, false) => FieldType::Boolean,
        (false, true, false, false, false) => FieldType::Integer,
        (false, _, true, false, false) => FieldType::Number,
        (false, false, false, true, false) => FieldType::String,
        (false, false, false, false, true) => FieldType::Datetime,
        _ => FieldType::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new()
            .with_index(None, vec!["One".into(), "Two".into(), "Three".into()])
            .with_column("A", vec![1.into(), 2.into(), 3.into()])
            .with_column("B", vec![4.into(), 5.into(), 6.into()])
    }

    #[test]
    fn test_field_order_and_primary_key() {
        let schema = TableSchema::generate(&sample(), None).unwrap();

        let names: Vec<String> = schema.fields().iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, vec!["key", "A", "B", "rowid"]);
        assert_eq!(
            schema.primary_key(),
            [FieldName::from("key"), FieldName::from("rowid")]
        );
        assert_eq!(schema.user_key(), [FieldName::from("key")]);
        assert_eq!(schema.surrogate_key(), &FieldName::from("rowid"));
    }

    #[test]
    fn test_explicit_index_name_wins() {
        let dataset = sample();
        let schema = TableSchema::generate(&dataset, Some("id")).unwrap();
        assert_eq!(schema.fields()[0].name, FieldName::from("id"));

        let named = Dataset::new()
            .with_index(Some("label".into()), vec!["x".into()])
            .with_column("A", vec![1.into()]);
        let schema = TableSchema::generate(&named, None).unwrap();
        assert_eq!(schema.fields()[0].name, FieldName::from("label"));
    }

    #[test]
    fn test_default_index_name_suffixed_on_collision() {
        let dataset = Dataset::new()
            .with_column("key", vec![1.into(), 2.into()])
            .with_column("key_0", vec![3.into(), 4.into()]);
        let schema = TableSchema::generate(&dataset, None).unwrap();
        assert_eq!(schema.fields()[0].name, FieldName::from("key_1"));
    }

    #[test]
    fn test_surrogate_name_avoids_user_columns() {
        let dataset = Dataset::new().with_column("rowid", vec![1.into()]);
        let schema = TableSchema::generate(&dataset, None).unwrap();
        assert_eq!(schema.surrogate_key(), &FieldName::from("rowid_0"));
        assert!(schema.primary_key().contains(&FieldName::from("rowid_0")));
    }

    #[test]
    fn test_multi_index_levels_named() {
        let dataset = Dataset::new()
            .with_index(Some("outer".into()), vec!["a".into()])
            .with_index(None, vec!["b".into()])
            .with_column("A", vec![1.into()]);
        let schema = TableSchema::generate(&dataset, None).unwrap();
        let names: Vec<String> = schema.fields().iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, vec!["outer", "level_1", "A", "rowid"]);
        assert_eq!(schema.user_key().len(), 2);
    }

    #[test]
    fn test_hierarchical_columns_pad_index_and_surrogate() {
        let dataset = Dataset::new()
            .with_index(None, vec!["x".into()])
            .with_column(FieldName::path(["metrics", "count"]), vec![1.into()]);
        let schema = TableSchema::generate(&dataset, None).unwrap();
        assert_eq!(schema.fields()[0].name, FieldName::path(["key", ""]));
        assert_eq!(schema.surrogate_key(), &FieldName::path(["rowid", ""]));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let dataset = Dataset::new()
            .with_column("A", vec![1.into()])
            .with_column("A", vec![2.into()]);
        assert_eq!(
            TableSchema::generate(&dataset, None),
            Err(DataError::DuplicateColumn(FieldName::from("A")))
        );
    }

    #[test]
    fn test_type_inference() {
        assert_eq!(infer_type(&[1.into(), 2.into()]), FieldType::Integer);
        assert_eq!(infer_type(&[1.into(), CellValue::Float(0.5)]), FieldType::Number);
        assert_eq!(infer_type(&[CellValue::Null, true.into()]), FieldType::Boolean);
        assert_eq!(infer_type(&["a".into(), CellValue::Null]), FieldType::String);
        assert_eq!(infer_type(&[CellValue::NaT]), FieldType::Datetime);
        assert_eq!(infer_type(&[1.into(), "a".into()]), FieldType::Any);
        assert_eq!(infer_type(&[]), FieldType::Any);
    }

    #[test]
    fn test_wire_field_shape() {
        let field = Field {
            name: FieldName::from("A"),
            ty: FieldType::Integer,
        };
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            serde_json::json!({"name": "A", "type": "integer"})
        );
    }
}
