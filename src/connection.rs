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

//! Connection implementation for the Presto ADBC driver.

use crate::client::PrestoClient;
use crate::error::{PrestoErrorHelper, Result};
use crate::metadata::{build_columns_reader, ColumnSet, MetadataService};
use arrow_array::RecordBatchReader;
use std::sync::Arc;
use tokio::runtime::RuntimeFlavor;
use tracing::debug;

/// Configuration passed from Database to Connection.
pub struct ConnectionConfig {
    pub uri: String,
    pub client: Arc<dyn PrestoClient>,
}

/// Represents an active connection to a Presto coordinator.
///
/// The connection owns the tokio runtime that drives the async client, so
/// every public method is synchronous. Requests share no state: each call
/// builds its own query, counter and result.
#[derive(Debug)]
pub struct Connection {
    uri: String,

    // Presto client (trait object for backend flexibility)
    client: Arc<dyn PrestoClient>,

    // Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,
}

impl Connection {
    /// Called by Database::new_connection().
    pub(crate) fn new_with_runtime(
        config: ConnectionConfig,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        debug!("Opened connection to {}", config.uri);
        Self {
            uri: config.uri,
            client: config.client,
            runtime,
        }
    }

    /// Create a connection over an existing client.
    ///
    /// The runtime must be multi-threaded and must not be the one the caller
    /// is currently running on; connection methods block on its handle, and a
    /// current-thread runtime cannot drive IO from a handle.
    pub fn with_client(
        client: Arc<dyn PrestoClient>,
        runtime: tokio::runtime::Runtime,
    ) -> Result<Self> {
        let flavor = runtime.handle().runtime_flavor();
        if flavor != RuntimeFlavor::MultiThread {
            return Err(PrestoErrorHelper::invalid_argument().message(format!(
                "Connection requires a multi-threaded runtime, got {:?}",
                flavor
            )));
        }
        Ok(Self {
            uri: String::new(),
            client,
            runtime,
        })
    }

    /// Returns the coordinator URI, empty for connections built with
    /// [`Connection::with_client`].
    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn metadata_service(&self) -> MetadataService {
        MetadataService::new(Arc::clone(&self.client), self.runtime.handle().clone())
    }

    /// Describe the supported columns of a table as catalog rows.
    pub fn list_columns(&self, table_name: &str) -> Result<ColumnSet> {
        self.metadata_service().list_columns(table_name)
    }

    /// Describe the supported columns of a table as one Arrow batch in the
    /// 18-field `SQLColumns` layout.
    pub fn get_columns(&self, table_name: &str) -> Result<impl RecordBatchReader + Send> {
        build_columns_reader(self.list_columns(table_name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ExecuteResult;
    use crate::error::ErrorKind;
    use crate::reader::MemoryReader;
    use arrow_array::cast::AsArray;
    use arrow_array::types::Int32Type;
    use arrow_array::{BooleanArray, RecordBatch, StringArray};
    use arrow_schema::{DataType, Field, Schema};
    use async_trait::async_trait;

    /// Minimal mock client answering every statement with one batch.
    #[derive(Debug)]
    struct MockClient {
        batch: Option<RecordBatch>,
    }

    #[async_trait]
    impl PrestoClient for MockClient {
        async fn execute_statement(&self, _sql: &str) -> crate::error::Result<ExecuteResult> {
            let Some(ref batch) = self.batch else {
                return Err(PrestoErrorHelper::io().message("Query failed: Table not found"));
            };
            Ok(ExecuteResult {
                query_id: "test-query".to_string(),
                reader: Box::new(MemoryReader::new(batch.schema(), vec![batch.clone()])),
            })
        }
    }

    fn make_columns_batch(rows: &[(&str, &str, bool)]) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Column", DataType::Utf8, false),
            Field::new("Type", DataType::Utf8, false),
            Field::new("Null", DataType::Boolean, false),
            Field::new("Partition Key", DataType::Boolean, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.0))),
                Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
                Arc::new(BooleanArray::from(
                    rows.iter().map(|r| r.2).collect::<Vec<_>>(),
                )),
                Arc::new(BooleanArray::from(vec![false; rows.len()])),
            ],
        )
        .unwrap()
    }

    fn create_test_connection(batch: Option<RecordBatch>) -> Connection {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        Connection::with_client(Arc::new(MockClient { batch }), runtime).unwrap()
    }

    #[test]
    fn test_list_columns() {
        let conn = create_test_connection(Some(make_columns_batch(&[
            ("orderkey", "bigint", false),
            ("comment", "varchar", true),
            ("totalprice", "double", false),
        ])));

        let columns = conn.list_columns("orders").unwrap();
        assert_eq!(columns.len(), 3);
        let names: Vec<String> = columns.map(|r| r.column_name().to_string()).collect();
        assert_eq!(names, vec!["orderkey", "comment", "totalprice"]);
    }

    #[test]
    fn test_get_columns_reader() {
        let conn = create_test_connection(Some(make_columns_batch(&[
            ("orderkey", "bigint", false),
            ("orderdate", "date", false),
            ("totalprice", "double", false),
        ])));

        let mut reader = conn.get_columns("orders").unwrap();
        assert_eq!(reader.schema().fields().len(), 18);

        let batch = reader.next().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 2);
        let ordinals = batch.column(16).as_primitive::<Int32Type>();
        assert_eq!(ordinals.value(0), 1);
        assert_eq!(ordinals.value(1), 3);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_list_columns_error_propagates() {
        let conn = create_test_connection(None);

        let err = conn.list_columns("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.detail().contains("Table not found"));
    }

    #[test]
    fn test_with_client_has_empty_uri() {
        let conn = create_test_connection(None);
        assert_eq!(conn.uri(), "");
    }

    #[test]
    fn test_with_client_rejects_current_thread_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = Connection::with_client(Arc::new(MockClient { batch: None }), runtime)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.is_usage_fault());
        assert!(err.detail().contains("multi-threaded"));
    }
}
