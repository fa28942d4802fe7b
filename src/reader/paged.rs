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

//! Paged reader for Presto statement results.
//!
//! Presto returns results as a chain of JSON pages linked by `nextUri`.
//! [`PagedResultReader`] walks that chain lazily: each call to
//! `next_batch()` fetches pages until one carries rows, then converts those
//! rows into a single Arrow `RecordBatch`. Pages without rows (queued,
//! planning) are skipped.

use crate::error::{PrestoErrorHelper, Result};
use crate::reader::ResultReader;
use crate::types::presto::{Column, QueryResults};
use arrow_array::builder::{BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Fetches the page behind a `nextUri`.
#[async_trait]
pub trait PageFetcher: Send + Sync + std::fmt::Debug {
    async fn fetch_page(&self, uri: &str) -> Result<QueryResults>;
}

/// Lazily reads a Presto result page chain as Arrow batches.
pub struct PagedResultReader {
    fetcher: Arc<dyn PageFetcher>,
    runtime_handle: tokio::runtime::Handle,
    /// Page received but not yet processed.
    pending: Option<QueryResults>,
    next_uri: Option<String>,
    schema: Option<SchemaRef>,
    columns: Option<Vec<Column>>,
}

impl PagedResultReader {
    /// Create a reader starting from the first page returned by the
    /// coordinator.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        first_page: QueryResults,
        runtime_handle: tokio::runtime::Handle,
    ) -> Self {
        Self {
            fetcher,
            runtime_handle,
            pending: Some(first_page),
            next_uri: None,
            schema: None,
            columns: None,
        }
    }

    fn next_page(&mut self) -> Result<Option<QueryResults>> {
        if let Some(page) = self.pending.take() {
            return Ok(Some(page));
        }
        match self.next_uri.take() {
            Some(uri) => {
                debug!("Fetching result page {}", uri);
                let page = self
                    .runtime_handle
                    .block_on(self.fetcher.fetch_page(&uri))?;
                Ok(Some(page))
            }
            None => Ok(None),
        }
    }
}

impl ResultReader for PagedResultReader {
    fn schema(&self) -> Result<SchemaRef> {
        self.schema.clone().ok_or_else(|| {
            PrestoErrorHelper::invalid_state()
                .message("Schema not available before the first data page")
        })
    }

    fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
        while let Some(page) = self.next_page()? {
            if let Some(ref error) = page.error {
                return Err(PrestoErrorHelper::io()
                    .message(format!("Query {} failed: {}", page.id, error)));
            }

            if self.columns.is_none() {
                if let Some(ref columns) = page.columns {
                    self.schema = Some(columns_to_schema(columns));
                    self.columns = Some(columns.clone());
                }
            }
            let row_count = page.row_count();
            self.next_uri = page.next_uri;
            if row_count == 0 {
                continue;
            }
            let rows = page.data.unwrap_or_default();

            let (Some(columns), Some(schema)) = (self.columns.as_ref(), self.schema.as_ref())
            else {
                return Err(PrestoErrorHelper::malformed_row()
                    .message(format!("Query {} returned data before columns", page.id)));
            };

            debug!("Converting {} rows of query {}", row_count, page.id);
            return page_to_batch(schema.clone(), columns, &rows).map(Some);
        }
        Ok(None)
    }
}

/// Map a Presto column type to the Arrow type used to carry it.
fn presto_type_to_arrow(column: &Column) -> DataType {
    match column.base_type() {
        "boolean" => DataType::Boolean,
        "bigint" | "integer" | "smallint" | "tinyint" => DataType::Int64,
        "double" | "real" => DataType::Float64,
        _ => DataType::Utf8,
    }
}

fn columns_to_schema(columns: &[Column]) -> SchemaRef {
    let fields: Vec<Field> = columns
        .iter()
        .map(|c| Field::new(&c.name, presto_type_to_arrow(c), true))
        .collect();
    Arc::new(Schema::new(fields))
}

fn unexpected_value(column: &Column, value: &Value) -> crate::error::Error {
    PrestoErrorHelper::malformed_row().message(format!(
        "Unexpected value {} for column '{}' of type {}",
        value, column.name, column.type_name
    ))
}

/// Convert the rows of one page into a RecordBatch.
fn page_to_batch(
    schema: SchemaRef,
    columns: &[Column],
    rows: &[Vec<Value>],
) -> Result<RecordBatch> {
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());

    for (idx, (column, field)) in columns.iter().zip(schema.fields()).enumerate() {
        let values = rows.iter().map(|row| {
            row.get(idx).ok_or_else(|| {
                PrestoErrorHelper::malformed_row().message(format!(
                    "Result row has {} values, expected {}",
                    row.len(),
                    columns.len()
                ))
            })
        });

        let array: ArrayRef = match field.data_type() {
            DataType::Boolean => {
                let mut builder = BooleanBuilder::with_capacity(rows.len());
                for value in values {
                    match value? {
                        Value::Null => builder.append_null(),
                        Value::Bool(b) => builder.append_value(*b),
                        other => return Err(unexpected_value(column, other)),
                    }
                }
                Arc::new(builder.finish())
            }
            DataType::Int64 => {
                let mut builder = Int64Builder::with_capacity(rows.len());
                for value in values {
                    let value = value?;
                    match value {
                        Value::Null => builder.append_null(),
                        Value::Number(n) => builder.append_value(
                            n.as_i64().ok_or_else(|| unexpected_value(column, value))?,
                        ),
                        other => return Err(unexpected_value(column, other)),
                    }
                }
                Arc::new(builder.finish())
            }
            DataType::Float64 => {
                let mut builder = Float64Builder::with_capacity(rows.len());
                for value in values {
                    let value = value?;
                    match value {
                        Value::Null => builder.append_null(),
                        Value::Number(n) => builder.append_value(
                            n.as_f64().ok_or_else(|| unexpected_value(column, value))?,
                        ),
                        // Non-finite doubles arrive as "NaN", "Infinity", "-Infinity".
                        Value::String(s) => builder.append_value(
                            s.parse::<f64>().map_err(|_| unexpected_value(column, value))?,
                        ),
                        other => return Err(unexpected_value(column, other)),
                    }
                }
                Arc::new(builder.finish())
            }
            _ => {
                let mut builder = StringBuilder::with_capacity(rows.len(), rows.len() * 16);
                for value in values {
                    match value? {
                        Value::Null => builder.append_null(),
                        Value::String(s) => builder.append_value(s),
                        other => builder.append_value(other.to_string()),
                    }
                }
                Arc::new(builder.finish())
            }
        };
        arrays.push(array);
    }

    RecordBatch::try_new(schema, arrays).map_err(|e| {
        PrestoErrorHelper::io().message(format!("Failed to build result batch: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use arrow_array::cast::AsArray;
    use arrow_array::types::{Float64Type, Int64Type};
    use arrow_array::Array;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves pages from a fixed map of URI → JSON body.
    #[derive(Debug)]
    struct MockFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(uri, body)| (uri.to_string(), body.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch_page(&self, uri: &str) -> Result<QueryResults> {
            self.requested.lock().unwrap().push(uri.to_string());
            let body = self.pages.get(uri).ok_or_else(|| {
                PrestoErrorHelper::io().message(format!("HTTP 404 - {}", uri))
            })?;
            Ok(serde_json::from_str(body).unwrap())
        }
    }

    fn page(json: &str) -> QueryResults {
        serde_json::from_str(json).unwrap()
    }

    const COLUMNS: &str = r#"[
        {"name": "Column", "type": "varchar"},
        {"name": "Type", "type": "varchar"},
        {"name": "Null", "type": "boolean"},
        {"name": "Partition Key", "type": "boolean"}
    ]"#;

    #[test]
    fn test_reader_follows_next_uri_and_skips_empty_pages() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let page2 = format!(
            r#"{{"id": "q", "nextUri": "http://c/3", "columns": {COLUMNS},
                "data": [["orderkey", "bigint", false, false]]}}"#
        );
        let page3 = format!(
            r#"{{"id": "q", "columns": {COLUMNS},
                "data": [["comment", "varchar", true, false], ["price", "double", true, false]]}}"#
        );
        let fetcher = Arc::new(MockFetcher::new(&[
            ("http://c/2", page2.as_str()),
            ("http://c/3", page3.as_str()),
        ]));

        let first = page(r#"{"id": "q", "nextUri": "http://c/2", "stats": {"state": "QUEUED"}}"#);
        let mut reader = PagedResultReader::new(fetcher.clone(), first, runtime.handle().clone());

        assert!(reader.schema().is_err());

        let batch = reader.next_batch().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 4);
        assert_eq!(batch.column(0).as_string::<i32>().value(0), "orderkey");
        assert!(!batch.column(2).as_boolean().value(0));

        let schema = reader.schema().unwrap();
        assert_eq!(schema.field(2).data_type(), &DataType::Boolean);

        let batch = reader.next_batch().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(1).as_string::<i32>().value(1), "double");

        assert!(reader.next_batch().unwrap().is_none());
        assert!(reader.next_batch().unwrap().is_none());
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["http://c/2".to_string(), "http://c/3".to_string()]
        );
    }

    #[test]
    fn test_reader_surfaces_query_error() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let fetcher = Arc::new(MockFetcher::new(&[(
            "http://c/2",
            r#"{"id": "q", "stats": {"state": "FAILED"},
                "error": {"message": "Table does not exist", "errorName": "TABLE_NOT_FOUND"}}"#,
        )]));
        let first = page(r#"{"id": "q", "nextUri": "http://c/2"}"#);
        let mut reader = PagedResultReader::new(fetcher, first, runtime.handle().clone());

        let err = reader.next_batch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.detail().contains("TABLE_NOT_FOUND"));
    }

    #[test]
    fn test_reader_propagates_fetch_failure() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let fetcher = Arc::new(MockFetcher::new(&[]));
        let first = page(r#"{"id": "q", "nextUri": "http://c/missing"}"#);
        let mut reader = PagedResultReader::new(fetcher, first, runtime.handle().clone());

        let err = reader.next_batch().unwrap_err();
        assert!(err.detail().contains("404"));
    }

    #[test]
    fn test_page_to_batch_value_types() {
        let columns: Vec<Column> = serde_json::from_str(
            r#"[{"name": "n", "type": "bigint"}, {"name": "d", "type": "double"},
                {"name": "s", "type": "varchar(10)"}, {"name": "m", "type": "map(varchar,bigint)"}]"#,
        )
        .unwrap();
        let rows: Vec<Vec<Value>> = serde_json::from_str(
            r#"[[1, 1.5, "a", {"k": 1}], [null, "NaN", null, null]]"#,
        )
        .unwrap();

        let batch = page_to_batch(columns_to_schema(&columns), &columns, &rows).unwrap();
        let n = batch.column(0).as_primitive::<Int64Type>();
        assert_eq!(n.value(0), 1);
        assert!(n.is_null(1));

        let d = batch.column(1).as_primitive::<Float64Type>();
        assert_eq!(d.value(0), 1.5);
        assert!(d.value(1).is_nan());

        let m = batch.column(3).as_string::<i32>();
        assert_eq!(m.value(0), r#"{"k":1}"#);
        assert!(batch.column(2).is_null(1));
    }

    #[test]
    fn test_page_to_batch_rejects_short_rows_and_bad_values() {
        let columns: Vec<Column> =
            serde_json::from_str(r#"[{"name": "a", "type": "varchar"}, {"name": "b", "type": "boolean"}]"#)
                .unwrap();

        let short: Vec<Vec<Value>> = serde_json::from_str(r#"[["only"]]"#).unwrap();
        let err = page_to_batch(columns_to_schema(&columns), &columns, &short).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRow);
        assert!(err.detail().contains("has 1 values, expected 2"));

        let bad: Vec<Vec<Value>> = serde_json::from_str(r#"[["x", "yes"]]"#).unwrap();
        let err = page_to_batch(columns_to_schema(&columns), &columns, &bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRow);
        assert!(err.detail().contains("Unexpected value"));
    }

    #[test]
    fn test_reader_rejects_data_without_columns() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let fetcher = Arc::new(MockFetcher::new(&[]));
        let first = page(r#"{"id": "q", "data": [["id", "bigint", false, false]]}"#);
        let mut reader = PagedResultReader::new(fetcher, first, runtime.handle().clone());

        let err = reader.next_batch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRow);
        assert!(!err.is_usage_fault());
        assert!(err.detail().contains("data before columns"));
    }

    #[test]
    fn test_reader_rejects_short_row() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let fetcher = Arc::new(MockFetcher::new(&[]));
        let first = page(&format!(
            r#"{{"id": "q", "columns": {COLUMNS}, "data": [["id", "bigint"]]}}"#
        ));
        let mut reader = PagedResultReader::new(fetcher, first, runtime.handle().clone());

        let err = reader.next_batch().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRow);
        assert!(err.detail().contains("has 2 values, expected 4"));
    }
}
