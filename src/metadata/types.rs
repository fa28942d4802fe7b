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

//! Data structures for column catalog metadata.
//!
//! [`RawColumnDescriptor`] is one row of a `SHOW COLUMNS` result.
//! [`CatalogColumnRow`] is the 18-field ODBC/XDBC `SQLColumns` row built from
//! it, with values looked up by 1-based field index.

use crate::error::{PrestoErrorHelper, Result};
use crate::metadata::type_mapping::{LogicalTypeFamily, SQL_NO_TOTAL};

// TODO: take catalog and schema from the session once SHOW COLUMNS results carry them.
/// Catalog reported for every column row.
pub const CATALOG_NAME: &str = "tpch";
/// Schema reported for every column row.
pub const SCHEMA_NAME: &str = "tiny";
/// Placeholder reported as `REMARKS`.
pub const REMARKS: &str = "";

/// Number of fields in a catalog column row.
pub const FIELD_COUNT: usize = 18;

/// One column description from `SHOW COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumnDescriptor {
    pub name: String,
    pub engine_type_name: String,
    pub nullable: bool,
    pub is_partition_key: bool,
}

/// Column nullability as reported to protocol consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    /// `SQL_NO_NULLS`
    NoNulls,
    /// `SQL_NULLABLE`
    Nullable,
}

impl Nullability {
    pub fn from_nullable(nullable: bool) -> Self {
        if nullable {
            Nullability::Nullable
        } else {
            Nullability::NoNulls
        }
    }

    /// Short code reported as `NULLABLE`.
    pub fn code(self) -> i16 {
        match self {
            Nullability::NoNulls => 0,
            Nullability::Nullable => 1,
        }
    }

    /// Verbose form reported as `IS_NULLABLE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Nullability::NoNulls => "NO",
            Nullability::Nullable => "YES",
        }
    }
}

/// A field value of a catalog column row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicValue<'a> {
    Text(&'a str),
    Integer(i64),
    Null,
    Nullability(Nullability),
}

impl<'a> DynamicValue<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            DynamicValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value; the nullability marker yields its short code.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DynamicValue::Integer(v) => Some(*v),
            DynamicValue::Nullability(n) => Some(n.code() as i64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }
}

/// Fields of a catalog column row, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    TableCat,
    TableSchem,
    TableName,
    ColumnName,
    DataType,
    TypeName,
    ColumnSize,
    BufferLength,
    DecimalDigits,
    NumPrecRadix,
    Nullable,
    Remarks,
    ColumnDef,
    SqlDataType,
    SqlDatetimeSub,
    CharOctetLength,
    OrdinalPosition,
    IsNullable,
}

impl CatalogField {
    /// All fields in protocol order.
    pub const ALL: [CatalogField; FIELD_COUNT] = [
        CatalogField::TableCat,
        CatalogField::TableSchem,
        CatalogField::TableName,
        CatalogField::ColumnName,
        CatalogField::DataType,
        CatalogField::TypeName,
        CatalogField::ColumnSize,
        CatalogField::BufferLength,
        CatalogField::DecimalDigits,
        CatalogField::NumPrecRadix,
        CatalogField::Nullable,
        CatalogField::Remarks,
        CatalogField::ColumnDef,
        CatalogField::SqlDataType,
        CatalogField::SqlDatetimeSub,
        CatalogField::CharOctetLength,
        CatalogField::OrdinalPosition,
        CatalogField::IsNullable,
    ];

    /// Field for a 1-based index, or `None` outside `1..=18`.
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// 1-based index of this field.
    pub fn index(self) -> usize {
        self as usize + 1
    }

    /// Column name used by `SQLColumns`.
    pub fn name(self) -> &'static str {
        match self {
            CatalogField::TableCat => "TABLE_CAT",
            CatalogField::TableSchem => "TABLE_SCHEM",
            CatalogField::TableName => "TABLE_NAME",
            CatalogField::ColumnName => "COLUMN_NAME",
            CatalogField::DataType => "DATA_TYPE",
            CatalogField::TypeName => "TYPE_NAME",
            CatalogField::ColumnSize => "COLUMN_SIZE",
            CatalogField::BufferLength => "BUFFER_LENGTH",
            CatalogField::DecimalDigits => "DECIMAL_DIGITS",
            CatalogField::NumPrecRadix => "NUM_PREC_RADIX",
            CatalogField::Nullable => "NULLABLE",
            CatalogField::Remarks => "REMARKS",
            CatalogField::ColumnDef => "COLUMN_DEF",
            CatalogField::SqlDataType => "SQL_DATA_TYPE",
            CatalogField::SqlDatetimeSub => "SQL_DATETIME_SUB",
            CatalogField::CharOctetLength => "CHAR_OCTET_LENGTH",
            CatalogField::OrdinalPosition => "ORDINAL_POSITION",
            CatalogField::IsNullable => "IS_NULLABLE",
        }
    }
}

/// One `SQLColumns` row describing a single table column.
///
/// Immutable once built. The family decides the type-dependent fields; the
/// remaining fields echo the construction arguments or fixed constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumnRow {
    family: LogicalTypeFamily,
    table_name: String,
    column_name: String,
    nullability: Nullability,
    ordinal_position: i32,
}

impl CatalogColumnRow {
    /// Build a row. Fails with a usage fault if `ordinal_position < 1`.
    pub fn new(
        family: LogicalTypeFamily,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        nullable: bool,
        ordinal_position: i32,
    ) -> Result<Self> {
        if ordinal_position < 1 {
            return Err(PrestoErrorHelper::invalid_argument().message(format!(
                "ordinal position must be >= 1, got {}",
                ordinal_position
            )));
        }

        Ok(Self {
            family,
            table_name: table_name.into(),
            column_name: column_name.into(),
            nullability: Nullability::from_nullable(nullable),
            ordinal_position,
        })
    }

    pub fn family(&self) -> LogicalTypeFamily {
        self.family
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn nullability(&self) -> Nullability {
        self.nullability
    }

    pub fn ordinal_position(&self) -> i32 {
        self.ordinal_position
    }

    /// Value of a field by 1-based index.
    ///
    /// Indices outside `1..=18` are a usage fault.
    pub fn value_at(&self, field_index: usize) -> Result<DynamicValue<'_>> {
        let field = CatalogField::from_index(field_index).ok_or_else(|| {
            PrestoErrorHelper::invalid_argument()
                .message(format!("unknown catalog field index {}", field_index))
        })?;
        Ok(self.value(field))
    }

    /// Value of a field.
    pub fn value(&self, field: CatalogField) -> DynamicValue<'_> {
        let info = self.family.info();
        let is_text = self.family == LogicalTypeFamily::VariableText;

        match field {
            CatalogField::TableCat => DynamicValue::Text(CATALOG_NAME),
            CatalogField::TableSchem => DynamicValue::Text(SCHEMA_NAME),
            CatalogField::TableName => DynamicValue::Text(&self.table_name),
            CatalogField::ColumnName => DynamicValue::Text(&self.column_name),
            CatalogField::DataType | CatalogField::SqlDataType => {
                DynamicValue::Integer(info.sql_type as i64)
            }
            CatalogField::TypeName => DynamicValue::Text(info.display_name),
            CatalogField::ColumnSize => DynamicValue::Integer(info.column_size as i64),
            CatalogField::BufferLength => DynamicValue::Integer(info.buffer_length as i64),
            CatalogField::DecimalDigits => match self.family {
                LogicalTypeFamily::Integer(_) => DynamicValue::Integer(0),
                _ => DynamicValue::Null,
            },
            CatalogField::NumPrecRadix => match self.family {
                LogicalTypeFamily::Integer(_) | LogicalTypeFamily::Floating(_) => {
                    DynamicValue::Integer(10)
                }
                LogicalTypeFamily::VariableText => DynamicValue::Null,
            },
            CatalogField::Nullable => DynamicValue::Nullability(self.nullability),
            CatalogField::Remarks => DynamicValue::Text(REMARKS),
            CatalogField::ColumnDef => DynamicValue::Text(if is_text { "''" } else { "0" }),
            CatalogField::SqlDatetimeSub => DynamicValue::Null,
            CatalogField::CharOctetLength => {
                if is_text {
                    DynamicValue::Integer(SQL_NO_TOTAL as i64)
                } else {
                    DynamicValue::Null
                }
            }
            CatalogField::OrdinalPosition => DynamicValue::Integer(self.ordinal_position as i64),
            CatalogField::IsNullable => DynamicValue::Text(self.nullability.as_str()),
        }
    }
}
