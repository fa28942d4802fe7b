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

//! Arrow schema for the column catalog result.
//!
//! One Arrow field per catalog field, in protocol order:
//!
//! - `TABLE_CAT`, `TABLE_SCHEM`, `TABLE_NAME`, `COLUMN_NAME`: Utf8 NOT NULL
//! - `DATA_TYPE`: Int16 NOT NULL
//! - `TYPE_NAME`: Utf8 NOT NULL
//! - `COLUMN_SIZE`, `BUFFER_LENGTH`: Int32 NOT NULL
//! - `DECIMAL_DIGITS`, `NUM_PREC_RADIX`: Int16 (nullable)
//! - `NULLABLE`: Int16 NOT NULL
//! - `REMARKS`, `COLUMN_DEF`: Utf8 NOT NULL
//! - `SQL_DATA_TYPE`: Int16 NOT NULL
//! - `SQL_DATETIME_SUB`: Int16 (nullable)
//! - `CHAR_OCTET_LENGTH`: Int32 (nullable)
//! - `ORDINAL_POSITION`: Int32 NOT NULL
//! - `IS_NULLABLE`: Utf8 NOT NULL

use crate::metadata::types::CatalogField;
use arrow_schema::{DataType, Field, Schema};

/// Arrow type carrying a catalog field.
pub fn field_data_type(field: CatalogField) -> DataType {
    match field {
        CatalogField::DataType
        | CatalogField::DecimalDigits
        | CatalogField::NumPrecRadix
        | CatalogField::Nullable
        | CatalogField::SqlDataType
        | CatalogField::SqlDatetimeSub => DataType::Int16,
        CatalogField::ColumnSize
        | CatalogField::BufferLength
        | CatalogField::CharOctetLength
        | CatalogField::OrdinalPosition => DataType::Int32,
        _ => DataType::Utf8,
    }
}

/// Whether a catalog field may be null for some type family.
fn field_nullable(field: CatalogField) -> bool {
    matches!(
        field,
        CatalogField::DecimalDigits
            | CatalogField::NumPrecRadix
            | CatalogField::SqlDatetimeSub
            | CatalogField::CharOctetLength
    )
}

/// Returns the schema for the column catalog result.
pub fn columns_schema() -> Schema {
    Schema::new(
        CatalogField::ALL
            .iter()
            .map(|&field| Field::new(field.name(), field_data_type(field), field_nullable(field)))
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_schema_field_order() {
        let schema = columns_schema();
        assert_eq!(schema.fields().len(), 18);
        assert_eq!(schema.field(0).name(), "TABLE_CAT");
        assert_eq!(schema.field(3).name(), "COLUMN_NAME");
        assert_eq!(schema.field(16).name(), "ORDINAL_POSITION");
        assert_eq!(schema.field(17).name(), "IS_NULLABLE");
    }

    #[test]
    fn test_columns_schema_types() {
        let schema = columns_schema();
        let ty = |name: &str| schema.field_with_name(name).unwrap().data_type().clone();

        assert_eq!(ty("DATA_TYPE"), DataType::Int16);
        assert_eq!(ty("SQL_DATA_TYPE"), DataType::Int16);
        assert_eq!(ty("COLUMN_SIZE"), DataType::Int32);
        assert_eq!(ty("ORDINAL_POSITION"), DataType::Int32);
        assert_eq!(ty("TYPE_NAME"), DataType::Utf8);
        assert_eq!(ty("IS_NULLABLE"), DataType::Utf8);
    }

    #[test]
    fn test_columns_schema_nullability() {
        let schema = columns_schema();
        assert!(!schema.field_with_name("COLUMN_NAME").unwrap().is_nullable());
        assert!(!schema.field_with_name("ORDINAL_POSITION").unwrap().is_nullable());
        assert!(schema.field_with_name("DECIMAL_DIGITS").unwrap().is_nullable());
        assert!(schema.field_with_name("CHAR_OCTET_LENGTH").unwrap().is_nullable());
    }
}
