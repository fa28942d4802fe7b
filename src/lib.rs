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

//! Presto ADBC Driver for Rust
//!
//! This crate answers "list columns" requests against a Presto coordinator,
//! producing rows in the 18-field `SQLColumns` catalog shape.
//!
//! ## Overview
//!
//! - [`Driver`] - Entry point for creating databases
//! - [`Database`] - Holds connection configuration
//! - [`Connection`] - Active connection to a Presto coordinator
//! - [`metadata::ColumnSet`] - Catalog rows for one table, consumed once
//!
//! ## Pipeline
//!
//! 1. `SHOW COLUMNS FROM <table>` runs through the Presto REST protocol
//! 2. Each reported column type is classified into a type family
//! 3. Supported columns become catalog rows numbered by their position in
//!    the table; unsupported columns are logged and dropped
//!
//! ## Example
//!
//! ```ignore
//! use presto_adbc::Driver;
//! use adbc_core::options::{OptionDatabase, OptionValue};
//! use adbc_core::Optionable;
//!
//! let driver = Driver::new();
//! let mut database = driver.new_database()?;
//! database.set_option(OptionDatabase::Uri, OptionValue::String("http://localhost:8080".into()))?;
//!
//! let connection = database.new_connection()?;
//! for row in connection.list_columns("orders")? {
//!     println!("{} {}", row.ordinal_position(), row.column_name());
//! }
//! ```
//!
//! ## Configuration Options
//!
//! ### Database Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `uri` | | Coordinator URL, e.g. `http://localhost:8080` |
//! | `username`, `presto.user` | `presto-adbc` | Sent as `X-Presto-User` |
//! | `presto.source` | `presto-adbc` | Sent as `X-Presto-Source` |
//! | `presto.catalog` | `tpch` | Session catalog |
//! | `presto.schema` | `tiny` | Session schema |
//! | `presto.http.connect_timeout_ms` | 30000 | Connect timeout |
//! | `presto.http.read_timeout_ms` | 60000 | Request timeout |
//! | `presto.http.max_retries` | 3 | Retries of transient HTTP failures |
//! | `presto.log_level` | | `off`, `error`, `warn`, `info`, `debug`, `trace` |
//! | `presto.log_file` | | Log file path; stderr if unset |

pub mod client;
pub mod connection;
pub mod database;
pub mod driver;
pub mod error;
pub(crate) mod logging;
pub mod metadata;
pub mod reader;
pub mod types;

// Re-export main types
pub use connection::Connection;
pub use database::Database;
pub use driver::Driver;
pub use error::{Error, ErrorKind, PrestoErrorHelper, Result};

// Re-export client types for advanced users
pub use client::{
    ExecuteResult, HttpClientConfig, PrestoClient, PrestoHttpClient, PrestoRestClient,
    SessionConfig,
};
