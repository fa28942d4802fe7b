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

//! Presto type → logical family → ODBC/XDBC type mapping.
//!
//! Maps Presto type names (from `SHOW COLUMNS` results) to a closed set of
//! logical type families. Each family carries the fixed constants a column
//! catalog row needs, so registering a new engine type in
//! [`SUPPORTED_TYPES`] is the only step required to support it.

use tracing::warn;

/// ODBC `SQL_NO_TOTAL`: length is unbounded or unknown.
pub const SQL_NO_TOTAL: i32 = -4;

/// ODBC SQL type codes used by the supported families.
pub mod sql_type {
    pub const SQL_TINYINT: i16 = -6;
    pub const SQL_BIGINT: i16 = -5;
    pub const SQL_INTEGER: i16 = 4;
    pub const SQL_SMALLINT: i16 = 5;
    pub const SQL_FLOAT: i16 = 6;
    pub const SQL_REAL: i16 = 7;
    pub const SQL_DOUBLE: i16 = 8;
    pub const SQL_VARCHAR: i16 = 12;
}

/// Width of a fixed-width integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerWidth {
    Big,
    Regular,
    Small,
    Tiny,
}

/// Width of a floating point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingWidth {
    Double,
    Float,
    Real,
}

/// Logical type family of a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalTypeFamily {
    Integer(IntegerWidth),
    Floating(FloatingWidth),
    VariableText,
}

/// Fixed per-type constants exposed in a catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Display name reported as `TYPE_NAME`.
    pub display_name: &'static str,
    /// ODBC type code reported as `DATA_TYPE` and `SQL_DATA_TYPE`.
    pub sql_type: i16,
    /// Reported as `COLUMN_SIZE`.
    pub column_size: i32,
    /// Bytes a consumer must allocate to receive one value.
    pub buffer_length: i32,
}

impl LogicalTypeFamily {
    /// Constants for this family and width.
    pub const fn info(self) -> TypeInfo {
        use sql_type::*;
        match self {
            LogicalTypeFamily::Integer(IntegerWidth::Big) => TypeInfo {
                display_name: "BIGINT",
                sql_type: SQL_BIGINT,
                column_size: 19,
                buffer_length: 19,
            },
            LogicalTypeFamily::Integer(IntegerWidth::Regular) => TypeInfo {
                display_name: "INTEGER",
                sql_type: SQL_INTEGER,
                column_size: 10,
                buffer_length: 10,
            },
            LogicalTypeFamily::Integer(IntegerWidth::Small) => TypeInfo {
                display_name: "SMALLINT",
                sql_type: SQL_SMALLINT,
                column_size: 5,
                buffer_length: 5,
            },
            LogicalTypeFamily::Integer(IntegerWidth::Tiny) => TypeInfo {
                display_name: "TINYINT",
                sql_type: SQL_TINYINT,
                column_size: 3,
                buffer_length: 3,
            },
            LogicalTypeFamily::Floating(FloatingWidth::Double) => TypeInfo {
                display_name: "DOUBLE",
                sql_type: SQL_DOUBLE,
                column_size: 15,
                buffer_length: 15,
            },
            LogicalTypeFamily::Floating(FloatingWidth::Float) => TypeInfo {
                display_name: "FLOAT",
                sql_type: SQL_FLOAT,
                column_size: 15,
                buffer_length: 15,
            },
            LogicalTypeFamily::Floating(FloatingWidth::Real) => TypeInfo {
                display_name: "REAL",
                sql_type: SQL_REAL,
                column_size: 7,
                buffer_length: 7,
            },
            LogicalTypeFamily::VariableText => TypeInfo {
                display_name: "VARCHAR",
                sql_type: SQL_VARCHAR,
                column_size: SQL_NO_TOTAL,
                buffer_length: SQL_NO_TOTAL,
            },
        }
    }
}

/// Engine type names the driver can describe, paired with their family.
///
/// Matching is exact and case-sensitive, as Presto reports lowercase names.
pub const SUPPORTED_TYPES: &[(&str, LogicalTypeFamily)] = &[
    ("varchar", LogicalTypeFamily::VariableText),
    ("bigint", LogicalTypeFamily::Integer(IntegerWidth::Big)),
    ("double", LogicalTypeFamily::Floating(FloatingWidth::Double)),
];

/// Classify a Presto type name.
///
/// Returns `None` for types the driver does not support. That is an expected
/// outcome, not an error; a warning naming the type is logged.
pub fn classify(engine_type_name: &str) -> Option<LogicalTypeFamily> {
    let family = SUPPORTED_TYPES
        .iter()
        .find(|(name, _)| *name == engine_type_name)
        .map(|(_, family)| *family);

    if family.is_none() {
        warn!("Unsupported Presto type '{}'", engine_type_name);
    }
    family
}
