// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Builder for the Arrow form of a [`ColumnSet`].
//!
//! The set is drained front to back exactly once; each row contributes one
//! value to each of the 18 column builders.
//!
//! # Example
//!
//! ```ignore
//! use presto_adbc::metadata::builder::build_columns_batch;
//!
//! let columns = service.list_columns("orders")?;
//! let batch = build_columns_batch(columns)?;
//! assert_eq!(batch.num_columns(), 18);
//! ```

use crate::error::{PrestoErrorHelper, Result};
use crate::metadata::column_set::ColumnSet;
use crate::metadata::schemas::{columns_schema, field_data_type};
use crate::metadata::types::{CatalogField, DynamicValue};

use arrow_array::builder::{Int16Builder, Int32Builder, StringBuilder};
use arrow_array::{ArrayRef, RecordBatch, RecordBatchIterator, RecordBatchReader};
use arrow_schema::DataType;
use std::sync::Arc;

/// Accumulates values for one catalog field.
enum FieldBuilder {
    Text(StringBuilder),
    Int16(Int16Builder),
    Int32(Int32Builder),
}

impl FieldBuilder {
    fn for_field(field: CatalogField) -> Self {
        match field_data_type(field) {
            DataType::Int16 => FieldBuilder::Int16(Int16Builder::new()),
            DataType::Int32 => FieldBuilder::Int32(Int32Builder::new()),
            _ => FieldBuilder::Text(StringBuilder::new()),
        }
    }

    fn append(&mut self, field: CatalogField, value: DynamicValue<'_>) -> Result<()> {
        if value.is_null() {
            match self {
                FieldBuilder::Text(b) => b.append_null(),
                FieldBuilder::Int16(b) => b.append_null(),
                FieldBuilder::Int32(b) => b.append_null(),
            }
            return Ok(());
        }

        match self {
            FieldBuilder::Text(b) => {
                let text = value
                    .as_text()
                    .ok_or_else(|| type_mismatch(field, "text", value))?;
                b.append_value(text);
            }
            FieldBuilder::Int16(b) => {
                let v = value
                    .as_integer()
                    .and_then(|v| i16::try_from(v).ok())
                    .ok_or_else(|| type_mismatch(field, "Int16", value))?;
                b.append_value(v);
            }
            FieldBuilder::Int32(b) => {
                let v = value
                    .as_integer()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| type_mismatch(field, "Int32", value))?;
                b.append_value(v);
            }
        }
        Ok(())
    }

    fn finish(self) -> ArrayRef {
        match self {
            FieldBuilder::Text(mut b) => Arc::new(b.finish()),
            FieldBuilder::Int16(mut b) => Arc::new(b.finish()),
            FieldBuilder::Int32(mut b) => Arc::new(b.finish()),
        }
    }
}

fn type_mismatch(
    field: CatalogField,
    expected: &str,
    value: DynamicValue<'_>,
) -> crate::error::Error {
    PrestoErrorHelper::invalid_state().message(format!(
        "{} expects a {} value, got {:?}",
        field.name(),
        expected,
        value
    ))
}

/// Drain a column set into a single record batch.
pub fn build_columns_batch(mut columns: ColumnSet) -> Result<RecordBatch> {
    let mut builders: Vec<(CatalogField, FieldBuilder)> = CatalogField::ALL
        .iter()
        .map(|&field| (field, FieldBuilder::for_field(field)))
        .collect();

    while !columns.is_empty() {
        let row = columns.front()?;
        for (field, builder) in builders.iter_mut() {
            builder.append(*field, row.value(*field))?;
        }
        columns.advance()?;
    }

    let arrays: Vec<ArrayRef> = builders.into_iter().map(|(_, b)| b.finish()).collect();
    RecordBatch::try_new(Arc::new(columns_schema()), arrays).map_err(|e| {
        PrestoErrorHelper::invalid_state().message(format!("Failed to build columns batch: {}", e))
    })
}

/// Drain a column set into a record batch reader.
pub fn build_columns_reader(columns: ColumnSet) -> Result<impl RecordBatchReader + Send> {
    let batch = build_columns_batch(columns)?;
    let schema = batch.schema();
    Ok(RecordBatchIterator::new(vec![Ok(batch)], schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::column_set::ColumnSetBuilder;
    use crate::metadata::type_mapping::{sql_type, FloatingWidth, IntegerWidth, LogicalTypeFamily};
    use crate::metadata::types::CatalogColumnRow;
    use arrow_array::cast::AsArray;
    use arrow_array::types::{Int16Type, Int32Type};
    use arrow_array::Array;

    fn sample_set() -> ColumnSet {
        let mut builder = ColumnSetBuilder::new();
        builder.push(
            CatalogColumnRow::new(
                LogicalTypeFamily::Integer(IntegerWidth::Big),
                "orders",
                "id",
                false,
                1,
            )
            .unwrap(),
        );
        builder.push(
            CatalogColumnRow::new(LogicalTypeFamily::VariableText, "orders", "name", true, 2)
                .unwrap(),
        );
        builder.push(
            CatalogColumnRow::new(
                LogicalTypeFamily::Floating(FloatingWidth::Double),
                "orders",
                "score",
                true,
                4,
            )
            .unwrap(),
        );
        builder.build()
    }

    #[test]
    fn test_build_columns_batch_shape() {
        let batch = build_columns_batch(sample_set()).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 18);
        assert_eq!(batch.schema().as_ref(), &columns_schema());
    }

    #[test]
    fn test_build_columns_batch_values() {
        let batch = build_columns_batch(sample_set()).unwrap();

        let names = batch.column(3).as_string::<i32>();
        assert_eq!(names.value(0), "id");
        assert_eq!(names.value(2), "score");

        let data_types = batch.column(4).as_primitive::<Int16Type>();
        assert_eq!(data_types.value(0), sql_type::SQL_BIGINT);
        assert_eq!(data_types.value(1), sql_type::SQL_VARCHAR);
        assert_eq!(data_types.value(2), sql_type::SQL_DOUBLE);

        let decimal_digits = batch.column(8).as_primitive::<Int16Type>();
        assert_eq!(decimal_digits.value(0), 0);
        assert!(decimal_digits.is_null(1));
        assert!(decimal_digits.is_null(2));

        let nullable = batch.column(10).as_primitive::<Int16Type>();
        assert_eq!(nullable.value(0), 0);
        assert_eq!(nullable.value(1), 1);

        let octet_length = batch.column(15).as_primitive::<Int32Type>();
        assert!(octet_length.is_null(0));
        assert_eq!(octet_length.value(1), -4);

        let ordinals = batch.column(16).as_primitive::<Int32Type>();
        assert_eq!(ordinals.values().to_vec(), vec![1, 2, 4]);

        let is_nullable = batch.column(17).as_string::<i32>();
        assert_eq!(is_nullable.value(0), "NO");
        assert_eq!(is_nullable.value(1), "YES");
    }

    #[test]
    fn test_build_columns_batch_empty() {
        let batch = build_columns_batch(ColumnSet::default()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 18);
    }

    #[test]
    fn test_build_columns_reader() {
        let mut reader = build_columns_reader(sample_set()).unwrap();
        assert_eq!(reader.schema().fields().len(), 18);

        let batch = reader.next().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert!(reader.next().is_none());
    }
}
