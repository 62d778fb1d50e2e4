//! Serialized dataset wire format
//!
//! The full-dataset push and the windowed data-reply both carry the same
//! shape: columnar values keyed by display name, the schema with its
//! primary key, and the field list. Non-finite and missing values ride as
//! the sentinel tokens defined on `CellValue`, symmetric in both
//! directions.

use dg_core::data::GridDims;
use dg_core::{CellValue, FieldName};
use dg_data::{DataError, DataStore, Dataset, Field, TableSchema};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire form of a table schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSchema {
    pub fields: Vec<Field>,
    #[serde(rename = "primaryKey")]
    pub primary_key: Vec<FieldName>,
    #[serde(rename = "primaryKeyUuid")]
    pub primary_key_uuid: FieldName,
}

impl WireSchema {
    pub fn from_schema(schema: &TableSchema) -> Self {
        Self {
            fields: schema.fields().to_vec(),
            primary_key: schema.primary_key().to_vec(),
            primary_key_uuid: schema.surrogate_key().clone(),
        }
    }
}

/// Full dataset push: columnar data plus schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDataset {
    /// Column values keyed by field display name, schema order
    pub data: IndexMap<String, Vec<CellValue>>,
    pub schema: WireSchema,
    /// Field list as the view expects it: one `{name: null}` per field
    pub fields: Vec<Value>,
}

impl WireDataset {
    /// Serialize a store in full, every schema field column-major
    pub fn from_store(store: &DataStore) -> Self {
        let schema = store.schema();
        let mut data = IndexMap::with_capacity(schema.fields().len());
        for field in schema.fields() {
            let column: Vec<CellValue> = store
                .rows()
                .iter()
                .map(|row| row.get(&field.name).cloned().unwrap_or_default())
                .collect();
            data.insert(field.name.to_string(), column);
        }
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                let mut entry = serde_json::Map::new();
                entry.insert(field.name.to_string(), Value::Null);
                Value::Object(entry)
            })
            .collect();

        Self {
            data,
            schema: WireSchema::from_schema(schema),
            fields,
        }
    }

    /// Serialize the inclusive `[r1, r2] x [c1, c2]` window of a store's
    /// data columns, re-deriving a fresh schema (and fresh surrogate ids)
    /// for the slice, as a viewport-sized dataset in its own right.
    pub fn window(
        store: &DataStore,
        r1: usize,
        r2: usize,
        c1: usize,
        c2: usize,
    ) -> Result<Self, DataError> {
        let rows: Vec<usize> = (r1..=r2.min(store.row_count().saturating_sub(1)))
            .filter(|&row| row < store.row_count())
            .collect();

        let mut dataset = Dataset::new();
        for key_field in store.schema().user_key() {
            let values = rows
                .iter()
                .map(|&row| store.get_cell(key_field, row).cloned().unwrap_or_default())
                .collect();
            dataset = dataset.with_index(Some(key_field.clone()), values);
        }
        for column_index in c1..=c2.min(store.column_count().saturating_sub(1)) {
            let Some(name) = store.column_index_to_name(column_index) else {
                break;
            };
            let values = rows
                .iter()
                .map(|&row| store.get_cell(name, row).cloned().unwrap_or_default())
                .collect();
            dataset = dataset.with_column(name.clone(), values);
        }

        let windowed = DataStore::from_dataset(&dataset, None)?;
        Ok(Self::from_store(&windowed))
    }
}
