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

//! Presto client protocol response types.
//!
//! These types map directly to the JSON documents returned by
//! `POST /v1/statement` and by each `nextUri` page. They are primarily used
//! by `PrestoRestClient` and the paged result reader.

use serde::Deserialize;

/// One page of a statement's results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResults {
    pub id: String,
    #[serde(default)]
    pub info_uri: Option<String>,
    /// URI of the next page; absent once the query is finished.
    #[serde(default)]
    pub next_uri: Option<String>,
    /// Result columns; present from the first page that knows them.
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
    /// Rows of this page, one JSON value per column.
    #[serde(default)]
    pub data: Option<Vec<Vec<serde_json::Value>>>,
    #[serde(default)]
    pub stats: Option<StatementStats>,
    #[serde(default)]
    pub error: Option<QueryError>,
}

impl QueryResults {
    /// Number of rows carried by this page.
    pub fn row_count(&self) -> usize {
        self.data.as_ref().map(|d| d.len()).unwrap_or(0)
    }

    /// Query state, or `"UNKNOWN"` when stats are absent.
    pub fn state(&self) -> &str {
        self.stats
            .as_ref()
            .map(|s| s.state.as_str())
            .unwrap_or("UNKNOWN")
    }
}

/// A result column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    pub name: String,
    /// Presto type, e.g. `varchar`, `bigint`, `varchar(25)`.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Column {
    /// Type name without parameters (`varchar(25)` → `varchar`).
    pub fn base_type(&self) -> &str {
        self.type_name
            .split('(')
            .next()
            .unwrap_or(&self.type_name)
            .trim()
    }
}

/// Execution statistics of a statement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementStats {
    /// `QUEUED`, `PLANNING`, `STARTING`, `RUNNING`, `FINISHED` or `FAILED`.
    pub state: String,
    #[serde(default)]
    pub processed_rows: Option<i64>,
}

/// Failure reported by the coordinator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryError {
    pub message: String,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_name: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.error_name {
            Some(ref name) => write!(f, "{} ({})", self.message, name),
            None => f.write_str(&self.message),
        }
    }
}
