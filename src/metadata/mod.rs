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

//! Column metadata for ADBC Connection interface methods.
//!
//! This module turns the result of `SHOW COLUMNS` into catalog rows with the
//! fixed 18-field `SQLColumns` shape.
//!
//! ## Module Structure
//!
//! - `type_mapping`: Presto type name to type family classification
//! - `types`: Catalog rows and their field values
//! - `column_set`: Ordered, single-pass container of catalog rows
//! - `sql`: SQL command builder for metadata queries
//! - `parse`: Decoding of `SHOW COLUMNS` batches
//! - `service`: Runs the introspection query and numbers the columns
//! - `schemas`, `builder`: Arrow form of a column set

pub mod builder;
pub mod column_set;
pub mod parse;
pub mod schemas;
pub mod service;
pub mod sql;
pub mod type_mapping;
pub mod types;

// Re-export commonly used types
pub use builder::{build_columns_batch, build_columns_reader};
pub use column_set::{ColumnSet, ColumnSetBuilder};
pub use schemas::columns_schema;
pub use service::MetadataService;
pub use sql::SqlCommandBuilder;
pub use type_mapping::{classify, LogicalTypeFamily};
pub use types::{CatalogColumnRow, CatalogField, DynamicValue, Nullability, RawColumnDescriptor};
