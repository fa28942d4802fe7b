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

//! Client implementations for communicating with a Presto coordinator.
//!
//! This module provides:
//! - `PrestoClient` trait: Abstract interface for statement execution
//! - `PrestoHttpClient`: Low-level HTTP client with retry logic
//! - `PrestoRestClient`: Implementation using the Presto client REST protocol

pub mod http;
pub mod rest;

use crate::error::Result;
use crate::metadata::types::{CATALOG_NAME, SCHEMA_NAME};
use crate::reader::ResultReader;
use async_trait::async_trait;

pub use http::{HttpClientConfig, PrestoHttpClient, RetryPolicy};
pub use rest::PrestoRestClient;

/// Session properties sent with every statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Sent as `X-Presto-User`.
    pub user: String,
    /// Sent as `X-Presto-Source`.
    pub source: String,
    /// Sent as `X-Presto-Catalog` when set.
    pub catalog: Option<String>,
    /// Sent as `X-Presto-Schema` when set.
    pub schema: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "presto-adbc".to_string(),
            source: "presto-adbc".to_string(),
            catalog: Some(CATALOG_NAME.to_string()),
            schema: Some(SCHEMA_NAME.to_string()),
        }
    }
}

/// Result of executing a statement: its id and a reader over its rows.
pub struct ExecuteResult {
    pub query_id: String,
    pub reader: Box<dyn ResultReader + Send>,
}

/// Abstract interface for executing statements against Presto.
///
/// Implementations own transport concerns (HTTP, retries, paging). Callers
/// receive rows as Arrow batches through the returned reader.
#[async_trait]
pub trait PrestoClient: Send + Sync + std::fmt::Debug {
    /// Execute a SQL statement and return a reader over its results.
    async fn execute_statement(&self, sql: &str) -> Result<ExecuteResult>;
}
