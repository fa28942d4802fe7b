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

//! Presto client REST protocol implementation.
//!
//! A statement is submitted with `POST /v1/statement`. The coordinator
//! answers with a first [`QueryResults`] page; the remaining pages are
//! fetched by following `nextUri` until it is absent.

use crate::client::{ExecuteResult, PrestoClient, PrestoHttpClient, SessionConfig};
use crate::error::{PrestoErrorHelper, Result};
use crate::reader::{PageFetcher, PagedResultReader};
use crate::types::presto::QueryResults;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio::runtime::Handle as RuntimeHandle;
use tracing::debug;

const HEADER_USER: &str = "X-Presto-User";
const HEADER_SOURCE: &str = "X-Presto-Source";
const HEADER_CATALOG: &str = "X-Presto-Catalog";
const HEADER_SCHEMA: &str = "X-Presto-Schema";

/// Client for the Presto statement REST endpoint.
#[derive(Debug)]
pub struct PrestoRestClient {
    http_client: Arc<PrestoHttpClient>,
    base_uri: String,
    session: SessionConfig,
}

impl PrestoRestClient {
    pub fn new(
        http_client: Arc<PrestoHttpClient>,
        base_uri: impl Into<String>,
        session: SessionConfig,
    ) -> Self {
        Self {
            http_client,
            base_uri: base_uri.into(),
            session,
        }
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    fn statement_url(&self) -> String {
        format!("{}/v1/statement", self.base_uri.trim_end_matches('/'))
    }
}

#[async_trait]
impl PrestoClient for PrestoRestClient {
    async fn execute_statement(&self, sql: &str) -> Result<ExecuteResult> {
        let url = self.statement_url();
        debug!("Submitting statement to {}: {}", url, sql);

        let mut builder = self
            .http_client
            .inner()
            .request(Method::POST, &url)
            .header(HEADER_USER, &self.session.user)
            .header(HEADER_SOURCE, &self.session.source)
            .body(sql.to_string());
        if let Some(ref catalog) = self.session.catalog {
            builder = builder.header(HEADER_CATALOG, catalog);
        }
        if let Some(ref schema) = self.session.schema {
            builder = builder.header(HEADER_SCHEMA, schema);
        }
        let request = builder.build().map_err(|e| {
            PrestoErrorHelper::io().message(format!("Failed to build request: {}", e))
        })?;

        let response = self.http_client.execute(request).await?;
        let body = response.text().await.map_err(|e| {
            PrestoErrorHelper::io().message(format!("Failed to read response: {}", e))
        })?;
        let first_page = parse_page(&body)?;

        if let Some(ref error) = first_page.error {
            return Err(PrestoErrorHelper::io()
                .message(format!("Query {} failed: {}", first_page.id, error)));
        }

        debug!(
            "Statement accepted: query_id={}, state={:?}",
            first_page.id,
            first_page.state()
        );

        let fetcher = Arc::new(HttpPageFetcher {
            http_client: Arc::clone(&self.http_client),
            user: self.session.user.clone(),
        });
        let query_id = first_page.id.clone();
        let reader = PagedResultReader::new(fetcher, first_page, RuntimeHandle::current());

        Ok(ExecuteResult {
            query_id,
            reader: Box::new(reader),
        })
    }
}

/// Follows `nextUri` links with plain GET requests.
#[derive(Debug)]
struct HttpPageFetcher {
    http_client: Arc<PrestoHttpClient>,
    user: String,
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, uri: &str) -> Result<QueryResults> {
        let request = self
            .http_client
            .inner()
            .request(Method::GET, uri)
            .header(HEADER_USER, &self.user)
            .build()
            .map_err(|e| {
                PrestoErrorHelper::io().message(format!("Failed to build request: {}", e))
            })?;

        let response = self.http_client.execute(request).await?;
        let body = response.text().await.map_err(|e| {
            PrestoErrorHelper::io().message(format!("Failed to read response: {}", e))
        })?;
        parse_page(&body)
    }
}

fn parse_page(body: &str) -> Result<QueryResults> {
    serde_json::from_str(body).map_err(|e| {
        PrestoErrorHelper::io().message(format!(
            "Failed to parse statement response: {} - body: {}",
            e, body
        ))
    })
}
