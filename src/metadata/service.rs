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

//! Metadata service for column introspection.
//!
//! This module provides the [`MetadataService`] struct that runs
//! `SHOW COLUMNS` through a [`PrestoClient`] and turns the raw column
//! descriptors into a [`ColumnSet`] of catalog rows.
//!
//! ## Example
//!
//! ```ignore
//! use presto_adbc::metadata::MetadataService;
//!
//! let service = MetadataService::new(client, runtime);
//! let columns = service.list_columns("orders")?;
//! ```

use crate::client::PrestoClient;
use crate::error::{PrestoErrorHelper, Result};
use crate::metadata::column_set::{ColumnSet, ColumnSetBuilder};
use crate::metadata::parse::parse_columns;
use crate::metadata::sql::SqlCommandBuilder;
use crate::metadata::type_mapping::classify;
use crate::metadata::types::CatalogColumnRow;
use std::sync::Arc;
use tracing::debug;

/// Service for executing metadata queries.
///
/// Each call owns its descriptor stream, ordinal counter and result set;
/// nothing is shared between calls.
#[derive(Debug)]
pub struct MetadataService {
    /// The Presto client for executing SQL statements.
    client: Arc<dyn PrestoClient>,
    /// Runtime handle for async execution.
    runtime: tokio::runtime::Handle,
}

impl MetadataService {
    pub fn new(client: Arc<dyn PrestoClient>, runtime: tokio::runtime::Handle) -> Self {
        Self { client, runtime }
    }

    /// List the supported columns of a table as catalog rows.
    ///
    /// Ordinal positions come from a counter that starts at 1 and advances
    /// once per column reported by the engine, across all result batches.
    /// Columns with an unsupported type are dropped but still consume their
    /// position, so positions may have gaps.
    ///
    /// # Errors
    ///
    /// Returns an error if the table name is empty, if the query fails, or
    /// if the engine returns rows that are not shaped like `SHOW COLUMNS`.
    pub fn list_columns(&self, table_name: &str) -> Result<ColumnSet> {
        let sql = SqlCommandBuilder::build_show_columns(table_name)?;
        debug!("Executing metadata query: {}", sql);

        let result = self
            .runtime
            .block_on(async { self.client.execute_statement(&sql).await })?;
        debug!("Metadata query {} submitted", result.query_id);
        let mut reader = result.reader;

        let mut builder = ColumnSetBuilder::new();
        let mut ordinal: i32 = 0;
        let mut examined = 0usize;

        while let Some(batch) = reader.next_batch()? {
            for descriptor in parse_columns(&batch)? {
                examined += 1;
                ordinal = ordinal.checked_add(1).ok_or_else(|| {
                    PrestoErrorHelper::invalid_state()
                        .message(format!("Too many columns in table {}", table_name))
                })?;

                let Some(family) = classify(&descriptor.engine_type_name) else {
                    debug!(
                        "Skipping column {}.{} at position {}",
                        table_name, descriptor.name, ordinal
                    );
                    continue;
                };

                builder.push(CatalogColumnRow::new(
                    family,
                    table_name,
                    descriptor.name,
                    descriptor.nullable,
                    ordinal,
                )?);
            }
        }

        debug!(
            "Table {}: {} columns examined, {} supported",
            table_name,
            examined,
            builder.len()
        );
        Ok(builder.build())
    }
}
