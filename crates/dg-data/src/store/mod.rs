//! Row storage and lookups

use ahash::AHashMap;
use dg_core::data::GridDims;
use dg_core::{CellCoord, CellValue, FieldName};
use indexmap::IndexMap;
use tracing::debug;

use crate::dataset::Dataset;
use crate::schema::TableSchema;
use crate::DataError;

/// A single row: field name to value, in schema order
pub type Row = IndexMap<FieldName, CellValue>;

/// Owns a loaded dataset: schema plus row-major values.
///
/// Every row carries the surrogate id it was assigned at load time (its
/// 0-based ordinal), immutable for the dataset's lifetime. Individual
/// cells mutate in place; wholesale replacement builds a fresh store.
#[derive(Debug, Clone)]
pub struct DataStore {
    schema: TableSchema,
    rows: Vec<Row>,
    /// Data columns (primary-key fields excluded), in schema order
    col_headers: Vec<FieldName>,
    header_index: AHashMap<FieldName, usize>,
}

impl DataStore {
    /// Derive a schema for the dataset and load its rows.
    ///
    /// Fails without partial state on duplicate column names or on
    /// columns that disagree about the row count.
    pub fn from_dataset(dataset: &Dataset, index_name: Option<&str>) -> Result<Self, DataError> {
        let schema = TableSchema::generate(dataset, index_name)?;
        let row_count = dataset.row_count();

        for level in dataset.index_levels() {
            if level.values.len() != row_count {
                return Err(DataError::RaggedColumn {
                    column: level.name.clone().unwrap_or_else(|| FieldName::from("index")),
                    expected: row_count,
                    got: level.values.len(),
                });
            }
        }
        for (name, values) in dataset.columns() {
            if values.len() != row_count {
                return Err(DataError::RaggedColumn {
                    column: name.clone(),
                    expected: row_count,
                    got: values.len(),
                });
            }
        }

        // Value sources line up with schema field order:
        // [index level(s)..., data columns..., surrogate key]
        let mut rows = Vec::with_capacity(row_count);
        for ordinal in 0..row_count {
            let mut values: Vec<CellValue> = Vec::with_capacity(schema.fields().len());
            if dataset.index_levels().is_empty() {
                values.push(CellValue::Int(ordinal as i64));
            } else {
                for level in dataset.index_levels() {
                    values.push(level.values[ordinal].clone());
                }
            }
            for (_, column) in dataset.columns() {
                values.push(column[ordinal].clone());
            }
            values.push(CellValue::Int(ordinal as i64));

            let row: Row = schema
                .fields()
                .iter()
                .map(|field| field.name.clone())
                .zip(values)
                .collect();
            rows.push(row);
        }

        Ok(Self::assemble(schema, rows))
    }

    fn assemble(schema: TableSchema, rows: Vec<Row>) -> Self {
        let col_headers: Vec<FieldName> =
            schema.data_fields().map(|field| field.name.clone()).collect();
        let header_index = col_headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        Self {
            schema,
            rows,
            col_headers,
            header_index,
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, ordinal: usize) -> Option<&Row> {
        self.rows.get(ordinal)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the data column at `index`; `None` when out of range.
    /// Primary-key fields are not part of this space.
    pub fn column_index_to_name(&self, index: usize) -> Option<&FieldName> {
        self.col_headers.get(index)
    }

    /// Inverse of [`column_index_to_name`](Self::column_index_to_name)
    pub fn column_name_to_index(&self, name: &FieldName) -> Option<usize> {
        self.header_index.get(name).copied()
    }

    /// Ordinals of every row matching the user primary key value.
    ///
    /// `key` arity must match the surrogate-excluded primary key; zero,
    /// one or many matches are all legal, uniqueness is not enforced.
    pub fn rows_for_primary_key(&self, key: &[CellValue]) -> Result<Vec<usize>, DataError> {
        let user_key = self.schema.user_key();
        if key.len() != user_key.len() {
            return Err(DataError::KeyLengthMismatch {
                expected: user_key.len(),
                got: key.len(),
            });
        }

        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                user_key
                    .iter()
                    .zip(key)
                    .all(|(field, value)| row.get(field) == Some(value))
            })
            .map(|(ordinal, _)| ordinal)
            .collect())
    }

    /// Value of any schema field at a row; `None` on unknown field or
    /// out-of-range ordinal
    pub fn get_cell(&self, column: &FieldName, row: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(column)
    }

    /// Value of the data column at `column_index`
    pub fn get_cell_by_index(&self, column_index: usize, row: usize) -> Option<&CellValue> {
        let column = self.column_index_to_name(column_index)?;
        self.get_cell(column, row)
    }

    /// Write a cell in place. False when the column is absent or the row
    /// ordinal is out of bounds; the caller decides whether that is an
    /// error.
    pub fn set_cell(&mut self, column: &FieldName, row: usize, value: CellValue) -> bool {
        match self.rows.get_mut(row).and_then(|row| row.get_mut(column)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// All row values in schema field order
    pub fn row_values(&self, ordinal: usize) -> Option<Vec<CellValue>> {
        self.rows
            .get(ordinal)
            .map(|row| row.values().cloned().collect())
    }

    /// Resolve traversal coordinates to data-column values
    pub fn values_for<I>(&self, cells: I) -> Vec<CellValue>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        cells
            .into_iter()
            .filter_map(|cell| self.get_cell_by_index(cell.c, cell.r).cloned())
            .collect()
    }

    /// Rebuild the column-major dataset as the user handed it over:
    /// index levels from the user primary key, data columns in schema
    /// order, the surrogate key dropped.
    pub fn to_dataset(&self) -> Dataset {
        let mut dataset = Dataset::new();
        for key_field in self.schema.user_key() {
            let values = self
                .rows
                .iter()
                .map(|row| row.get(key_field).cloned().unwrap_or_default())
                .collect();
            dataset = dataset.with_index(Some(key_field.clone()), values);
        }
        for name in &self.col_headers {
            let values = self
                .rows
                .iter()
                .map(|row| row.get(name).cloned().unwrap_or_default())
                .collect();
            dataset = dataset.with_column(name.clone(), values);
        }
        dataset
    }

    /// Reindexed view restricted to and reordered by `ordinals`.
    ///
    /// Used to materialize the visible rows after the view applied its
    /// transforms. Ordinals that no longer resolve are dropped.
    pub fn project(&self, ordinals: &[usize]) -> DataStore {
        let mut rows = Vec::with_capacity(ordinals.len());
        for &ordinal in ordinals {
            match self.rows.get(ordinal) {
                Some(row) => rows.push(row.clone()),
                None => debug!(ordinal, "projection ordinal out of range, dropping"),
            }
        }
        Self {
            schema: self.schema.clone(),
            rows,
            col_headers: self.col_headers.clone(),
            header_index: self.header_index.clone(),
        }
    }
}

impl GridDims for DataStore {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.col_headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataStore {
        let dataset = Dataset::new()
            .with_index(None, vec!["One".into(), "Two".into(), "Three".into()])
            .with_column("A", vec![1.into(), 2.into(), 3.into()])
            .with_column("B", vec![4.into(), 5.into(), 6.into()]);
        DataStore::from_dataset(&dataset, None).unwrap()
    }

    #[test]
    fn test_load_assigns_surrogate_ordinals() {
        let store = sample();
        assert_eq!(store.row_count(), 3);
        assert_eq!(store.column_count(), 2);

        let row = store.row(0).unwrap();
        assert_eq!(row.get(&FieldName::from("key")), Some(&"One".into()));
        assert_eq!(row.get(&FieldName::from("A")), Some(&1.into()));
        assert_eq!(row.get(&FieldName::from("B")), Some(&4.into()));
        assert_eq!(row.get(&FieldName::from("rowid")), Some(&0.into()));

        // every row has exactly the schema's fields
        for row in store.rows() {
            assert_eq!(row.len(), store.schema().fields().len());
        }
    }

    #[test]
    fn test_column_lookup_excludes_primary_key() {
        let store = sample();
        assert_eq!(store.column_index_to_name(0), Some(&FieldName::from("A")));
        assert_eq!(store.column_index_to_name(1), Some(&FieldName::from("B")));
        assert_eq!(store.column_index_to_name(2), None);

        assert_eq!(store.column_name_to_index(&FieldName::from("B")), Some(1));
        assert_eq!(store.column_name_to_index(&FieldName::from("key")), None);
        assert_eq!(store.column_name_to_index(&FieldName::from("rowid")), None);
        assert_eq!(store.column_name_to_index(&FieldName::from("missing")), None);
    }

    #[test]
    fn test_rows_for_primary_key() {
        let store = sample();

        assert_eq!(store.rows_for_primary_key(&["Two".into()]).unwrap(), vec![1]);
        assert_eq!(
            store.rows_for_primary_key(&["Missing".into()]).unwrap(),
            Vec::<usize>::new()
        );
        assert_eq!(
            store.rows_for_primary_key(&["One".into(), "Two".into()]),
            Err(DataError::KeyLengthMismatch {
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn test_non_unique_key_returns_every_match() {
        let dataset = Dataset::new()
            .with_index(None, vec!["x".into(), "y".into(), "x".into()])
            .with_column("A", vec![1.into(), 2.into(), 3.into()]);
        let store = DataStore::from_dataset(&dataset, None).unwrap();
        assert_eq!(store.rows_for_primary_key(&["x".into()]).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_multi_level_key_lookup() {
        let dataset = Dataset::new()
            .with_index(Some("outer".into()), vec!["a".into(), "a".into()])
            .with_index(Some("inner".into()), vec![1.into(), 2.into()])
            .with_column("A", vec![10.into(), 20.into()]);
        let store = DataStore::from_dataset(&dataset, None).unwrap();

        assert_eq!(
            store.rows_for_primary_key(&["a".into(), 2.into()]).unwrap(),
            vec![1]
        );
        assert!(store.rows_for_primary_key(&["a".into()]).is_err());
    }

    #[test]
    fn test_get_set_cell() {
        let mut store = sample();

        assert_eq!(store.get_cell(&FieldName::from("A"), 1), Some(&2.into()));
        assert!(store.set_cell(&FieldName::from("A"), 1, 42.into()));
        assert_eq!(store.get_cell(&FieldName::from("A"), 1), Some(&42.into()));

        // index fields are writable too; only the data-column space hides them
        assert!(store.set_cell(&FieldName::from("key"), 0, "Uno".into()));

        assert!(!store.set_cell(&FieldName::from("missing"), 0, 1.into()));
        assert!(!store.set_cell(&FieldName::from("A"), 99, 1.into()));
        assert_eq!(store.get_cell(&FieldName::from("A"), 99), None);
    }

    #[test]
    fn test_ragged_dataset_rejected() {
        let dataset = Dataset::new()
            .with_column("A", vec![1.into(), 2.into()])
            .with_column("B", vec![1.into()]);
        let error = DataStore::from_dataset(&dataset, None).unwrap_err();
        assert_eq!(
            error,
            DataError::RaggedColumn {
                column: FieldName::from("B"),
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_project_restricts_and_reorders() {
        let store = sample();
        let view = store.project(&[2, 0]);

        assert_eq!(view.row_count(), 2);
        assert_eq!(view.get_cell(&FieldName::from("A"), 0), Some(&3.into()));
        assert_eq!(view.get_cell(&FieldName::from("A"), 1), Some(&1.into()));
        // surrogate ids travel with their rows
        assert_eq!(view.get_cell(&FieldName::from("rowid"), 0), Some(&2.into()));

        // out-of-range ordinals are dropped, not errors
        let view = store.project(&[1, 99]);
        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn test_values_for_traversal_coords() {
        let store = sample();
        let cells = [
            CellCoord { r: 1, c: 0 },
            CellCoord { r: 1, c: 1 },
            CellCoord { r: 2, c: 0 },
            CellCoord { r: 2, c: 1 },
        ];
        assert_eq!(
            store.values_for(cells),
            vec![2.into(), 5.into(), 3.into(), 6.into()]
        );
    }

    #[test]
    fn test_round_trip_reproduces_columns_and_values() {
        let store = sample();
        let back = store.to_dataset();

        // index and surrogate fields stay out of the data columns
        let expected = Dataset::new()
            .with_index(Some("key".into()), vec!["One".into(), "Two".into(), "Three".into()])
            .with_column("A", vec![1.into(), 2.into(), 3.into()])
            .with_column("B", vec![4.into(), 5.into(), 6.into()]);
        assert_eq!(back, expected);

        // and the round trip is stable under a reload
        let reloaded = DataStore::from_dataset(&back, None).unwrap();
        assert_eq!(reloaded.to_dataset(), expected);
    }

    #[test]
    fn test_synthesized_positional_index() {
        let dataset = Dataset::new().with_column("A", vec!["a".into(), "b".into()]);
        let store = DataStore::from_dataset(&dataset, None).unwrap();

        assert_eq!(store.get_cell(&FieldName::from("key"), 1), Some(&1.into()));
        assert_eq!(store.rows_for_primary_key(&[0.into()]).unwrap(), vec![0]);
    }
}
