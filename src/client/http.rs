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

//! HTTP transport for the Presto client protocol.
//!
//! A statement is submitted once with `POST /v1/statement` and then polled
//! with `GET nextUri`. The two requests differ in what is safe to repeat, so
//! every request is sent under a [`RetryPolicy`] derived from its method.

use crate::error::{PrestoErrorHelper, Result};
use reqwest::{Client, Method, Request, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    /// Whole-request timeout, covering the long-poll on `nextUri`.
    pub read_timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// First backoff delay; doubles on each further retry.
    pub retry_delay: Duration,
    pub max_connections_per_host: usize,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
            max_retries: 3,
            retry_delay: Duration::from_millis(100),
            max_connections_per_host: 16,
            user_agent: format!("presto-adbc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Which failures a request may be repeated after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Statement submission. A repeat after the coordinator may have seen the
    /// request would start the query twice, so only refusals (429, 503) and
    /// failures to connect are retried.
    Submit,
    /// Page polling. Fetching a `nextUri` is idempotent; every transient
    /// failure is retried.
    Poll,
}

impl RetryPolicy {
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::GET {
            RetryPolicy::Poll
        } else {
            RetryPolicy::Submit
        }
    }

    fn retries_status(self, status: StatusCode) -> bool {
        let refused = matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
        );
        match self {
            RetryPolicy::Submit => refused,
            RetryPolicy::Poll => {
                refused
                    || matches!(
                        status,
                        StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT
                    )
            }
        }
    }

    fn retries_error(self, error: &reqwest::Error) -> bool {
        match self {
            RetryPolicy::Submit => error.is_connect(),
            RetryPolicy::Poll => error.is_connect() || error.is_timeout(),
        }
    }
}

/// Pooled HTTP client that talks to one Presto coordinator.
#[derive(Debug)]
pub struct PrestoHttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl PrestoHttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_connections_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                PrestoErrorHelper::io().message(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// The underlying reqwest client, for building requests.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Send `request`, repeating it as its [`RetryPolicy`] allows.
    ///
    /// A non-success status that is not retried, or that is still returned
    /// once retries run out, becomes an `Io` error carrying the response body.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let policy = RetryPolicy::for_method(request.method());
        let method = request.method().clone();
        let url = request.url().clone();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let can_retry = attempt <= self.config.max_retries;
            let sent = request.try_clone().ok_or_else(|| {
                PrestoErrorHelper::io()
                    .message(format!("{} {} has a body that cannot be resent", method, url))
            })?;
            debug!("{} {} (attempt {})", method, url, attempt);

            let reason = match self.client.execute(sent).await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    if !(can_retry && policy.retries_status(status)) {
                        let body = response.text().await.unwrap_or_default();
                        return Err(PrestoErrorHelper::io()
                            .message(format!("HTTP {} - {}", status.as_u16(), body)));
                    }
                    status.to_string()
                }
                Err(e) => {
                    if !(can_retry && policy.retries_error(&e)) {
                        return Err(PrestoErrorHelper::io().message(format!(
                            "{} {} failed after {} attempt(s): {}",
                            method, url, attempt, e
                        )));
                    }
                    e.to_string()
                }
            };

            let delay = self.backoff(attempt);
            warn!(
                "{} {} failed: {}; retry {}/{} in {:?}",
                method, url, reason, attempt, self.config.max_retries, delay
            );
            sleep(delay).await;
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.config.retry_delay.saturating_mul(factor)
    }
}
