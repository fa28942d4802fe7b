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

//! Database implementation for the Presto ADBC driver.

use crate::client::{
    HttpClientConfig, PrestoClient, PrestoHttpClient, PrestoRestClient, SessionConfig,
};
use crate::connection::{Connection, ConnectionConfig};
use crate::error::PrestoErrorHelper;
use crate::logging::{self, LogConfig};
use adbc_core::error::Result;
use adbc_core::options::{OptionDatabase, OptionValue};
use adbc_core::Optionable;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Represents a database instance that holds connection configuration.
///
/// A Database is created from a Driver and is used to establish Connections.
/// The coordinator URI and session properties are set on the Database before
/// creating connections.
#[derive(Debug, Default)]
pub struct Database {
    // Core configuration
    uri: Option<String>,
    session: SessionConfig,

    // HTTP client configuration
    http_config: HttpClientConfig,

    // Logging configuration
    log_config: LogConfig,
}

impl Database {
    /// Creates a new Database instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured URI.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Returns the session properties sent with every statement.
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Returns the HTTP client configuration.
    pub fn http_config(&self) -> &HttpClientConfig {
        &self.http_config
    }

    /// Parse a non-negative integer option value.
    fn parse_u64_option(value: &OptionValue) -> Option<u64> {
        match value {
            OptionValue::String(s) => s.trim().parse().ok(),
            OptionValue::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Build the connection runtime, the HTTP stack and the REST client.
    pub fn new_connection(&self) -> crate::error::Result<Connection> {
        logging::init_logging(&self.log_config);

        // Validate required options
        let uri = self
            .uri
            .as_ref()
            .ok_or_else(|| PrestoErrorHelper::invalid_argument().message("uri not set"))?;

        debug!(
            "Creating connection to {} as user {} (catalog={:?}, schema={:?})",
            uri, self.session.user, self.session.catalog, self.session.schema
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                PrestoErrorHelper::io().message(format!("Failed to create tokio runtime: {}", e))
            })?;

        let http_client = Arc::new(PrestoHttpClient::new(self.http_config.clone())?);

        let client: Arc<dyn PrestoClient> = Arc::new(PrestoRestClient::new(
            http_client,
            uri.clone(),
            self.session.clone(),
        ));

        Ok(Connection::new_with_runtime(
            ConnectionConfig {
                uri: uri.clone(),
                client,
            },
            runtime,
        ))
    }
}

impl Optionable for Database {
    type Option = OptionDatabase;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()> {
        match key {
            OptionDatabase::Uri => {
                if let OptionValue::String(s) = value {
                    self.uri = Some(s);
                    Ok(())
                } else {
                    Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                }
            }
            OptionDatabase::Username => {
                if let OptionValue::String(s) = value {
                    self.session.user = s;
                    Ok(())
                } else {
                    Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                }
            }
            OptionDatabase::Other(ref s) => match s.as_str() {
                // Session options
                "presto.user" => {
                    if let OptionValue::String(v) = value {
                        self.session.user = v;
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }
                "presto.source" => {
                    if let OptionValue::String(v) = value {
                        self.session.source = v;
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }
                "presto.catalog" => {
                    if let OptionValue::String(v) = value {
                        self.session.catalog = Some(v);
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }
                "presto.schema" => {
                    if let OptionValue::String(v) = value {
                        self.session.schema = Some(v);
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }

                // HTTP client options
                "presto.http.connect_timeout_ms" => {
                    if let Some(v) = Self::parse_u64_option(&value) {
                        self.http_config.connect_timeout = Duration::from_millis(v);
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }
                "presto.http.read_timeout_ms" => {
                    if let Some(v) = Self::parse_u64_option(&value) {
                        self.http_config.read_timeout = Duration::from_millis(v);
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }
                "presto.http.max_retries" => {
                    match Self::parse_u64_option(&value).and_then(|v| u32::try_from(v).ok()) {
                        Some(v) => {
                            self.http_config.max_retries = v;
                            Ok(())
                        }
                        None => {
                            Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                        }
                    }
                }

                // Logging options
                "presto.log_level" => {
                    if let OptionValue::String(ref v) = value {
                        if self.log_config.set_level(v).is_ok() {
                            return Ok(());
                        }
                    }
                    Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                }
                "presto.log_file" => {
                    if let OptionValue::String(v) = value {
                        self.log_config.set_file(v);
                        Ok(())
                    } else {
                        Err(PrestoErrorHelper::set_invalid_option(&key, &value).to_adbc())
                    }
                }

                _ => Err(PrestoErrorHelper::set_unknown_option(&key).to_adbc()),
            },
            _ => Err(PrestoErrorHelper::set_unknown_option(&key).to_adbc()),
        }
    }

    fn get_option_string(&self, key: Self::Option) -> Result<String> {
        let not_set = |name: &str| {
            PrestoErrorHelper::invalid_state()
                .message(format!("option '{}' is not set", name))
                .to_adbc()
        };
        match key {
            OptionDatabase::Uri => self.uri.clone().ok_or_else(|| not_set("uri")),
            OptionDatabase::Username => Ok(self.session.user.clone()),
            OptionDatabase::Other(ref s) => match s.as_str() {
                "presto.user" => Ok(self.session.user.clone()),
                "presto.source" => Ok(self.session.source.clone()),
                "presto.catalog" => self
                    .session
                    .catalog
                    .clone()
                    .ok_or_else(|| not_set("presto.catalog")),
                "presto.schema" => self
                    .session
                    .schema
                    .clone()
                    .ok_or_else(|| not_set("presto.schema")),
                "presto.log_level" => self
                    .log_config
                    .level()
                    .map(str::to_string)
                    .ok_or_else(|| not_set("presto.log_level")),
                "presto.log_file" => self
                    .log_config
                    .file()
                    .map(str::to_string)
                    .ok_or_else(|| not_set("presto.log_file")),
                _ => Err(PrestoErrorHelper::get_unknown_option(&key).to_adbc()),
            },
            _ => Err(PrestoErrorHelper::get_unknown_option(&key).to_adbc()),
        }
    }

    fn get_option_bytes(&self, key: Self::Option) -> Result<Vec<u8>> {
        Err(PrestoErrorHelper::get_unknown_option(&key).to_adbc())
    }

    fn get_option_int(&self, key: Self::Option) -> Result<i64> {
        match key {
            OptionDatabase::Other(ref s) => match s.as_str() {
                "presto.http.connect_timeout_ms" => {
                    Ok(self.http_config.connect_timeout.as_millis() as i64)
                }
                "presto.http.read_timeout_ms" => {
                    Ok(self.http_config.read_timeout.as_millis() as i64)
                }
                "presto.http.max_retries" => Ok(self.http_config.max_retries as i64),
                _ => Err(PrestoErrorHelper::get_unknown_option(&key).to_adbc()),
            },
            _ => Err(PrestoErrorHelper::get_unknown_option(&key).to_adbc()),
        }
    }

    fn get_option_double(&self, key: Self::Option) -> Result<f64> {
        Err(PrestoErrorHelper::get_unknown_option(&key).to_adbc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbc_core::error::Status;

    fn other(key: &str) -> OptionDatabase {
        OptionDatabase::Other(key.into())
    }

    #[test]
    fn test_database_set_options() {
        let mut db = Database::new();
        db.set_option(
            OptionDatabase::Uri,
            OptionValue::String("http://localhost:8080".into()),
        )
        .unwrap();
        db.set_option(other("presto.user"), OptionValue::String("analyst".into()))
            .unwrap();
        db.set_option(other("presto.catalog"), OptionValue::String("hive".into()))
            .unwrap();
        db.set_option(other("presto.schema"), OptionValue::String("web".into()))
            .unwrap();

        assert_eq!(db.uri(), Some("http://localhost:8080"));
        assert_eq!(db.session().user, "analyst");
        assert_eq!(db.session().catalog.as_deref(), Some("hive"));
        assert_eq!(db.session().schema.as_deref(), Some("web"));
    }

    #[test]
    fn test_database_defaults() {
        let db = Database::new();
        assert_eq!(db.uri(), None);
        assert_eq!(db.session().user, "presto-adbc");
        assert_eq!(db.session().catalog.as_deref(), Some("tpch"));
        assert_eq!(db.session().schema.as_deref(), Some("tiny"));
        assert_eq!(
            db.get_option_string(other("presto.source")).unwrap(),
            "presto-adbc"
        );
    }

    #[test]
    fn test_database_username_option() {
        let mut db = Database::new();
        db.set_option(OptionDatabase::Username, OptionValue::String("etl".into()))
            .unwrap();
        assert_eq!(db.get_option_string(other("presto.user")).unwrap(), "etl");
    }

    #[test]
    fn test_database_http_options() {
        let mut db = Database::new();
        db.set_option(
            other("presto.http.connect_timeout_ms"),
            OptionValue::String("2500".into()),
        )
        .unwrap();
        db.set_option(other("presto.http.read_timeout_ms"), OptionValue::Int(9000))
            .unwrap();
        db.set_option(other("presto.http.max_retries"), OptionValue::Int(5))
            .unwrap();

        assert_eq!(db.http_config().connect_timeout, Duration::from_millis(2500));
        assert_eq!(db.http_config().read_timeout, Duration::from_millis(9000));
        assert_eq!(
            db.get_option_int(other("presto.http.max_retries")).unwrap(),
            5
        );
    }

    #[test]
    fn test_database_invalid_option_values() {
        let mut db = Database::new();
        let err = db
            .set_option(OptionDatabase::Uri, OptionValue::Int(1))
            .unwrap_err();
        assert_eq!(err.status, Status::InvalidArguments);

        let err = db
            .set_option(
                other("presto.http.max_retries"),
                OptionValue::String("many".into()),
            )
            .unwrap_err();
        assert_eq!(err.status, Status::InvalidArguments);

        let err = db
            .set_option(other("presto.http.read_timeout_ms"), OptionValue::Int(-1))
            .unwrap_err();
        assert_eq!(err.status, Status::InvalidArguments);

        let err = db
            .set_option(
                other("presto.log_level"),
                OptionValue::String("chatty".into()),
            )
            .unwrap_err();
        assert_eq!(err.status, Status::InvalidArguments);
    }

    #[test]
    fn test_database_unknown_option() {
        let mut db = Database::new();
        let err = db
            .set_option(other("presto.nope"), OptionValue::String("x".into()))
            .unwrap_err();
        assert_eq!(err.status, Status::NotImplemented);

        let err = db.get_option_string(other("presto.nope")).unwrap_err();
        assert_eq!(err.status, Status::NotFound);
    }

    #[test]
    fn test_database_log_options() {
        let mut db = Database::new();
        db.set_option(other("presto.log_level"), OptionValue::String("DEBUG".into()))
            .unwrap();
        db.set_option(
            other("presto.log_file"),
            OptionValue::String("/tmp/presto-adbc.log".into()),
        )
        .unwrap();

        assert_eq!(
            db.get_option_string(other("presto.log_level")).unwrap(),
            "DEBUG"
        );
        assert_eq!(
            db.get_option_string(other("presto.log_file")).unwrap(),
            "/tmp/presto-adbc.log"
        );
    }

    #[test]
    fn test_database_new_connection_missing_uri() {
        let db = Database::new();
        let err = db.new_connection().unwrap_err();
        assert!(err.is_usage_fault());
    }

    #[test]
    fn test_database_new_connection() {
        let mut db = Database::new();
        db.set_option(
            OptionDatabase::Uri,
            OptionValue::String("http://localhost:8080".into()),
        )
        .unwrap();

        let conn = db.new_connection().unwrap();
        assert_eq!(conn.uri(), "http://localhost:8080");
    }
}
