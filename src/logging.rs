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

//! Process-wide logging for the driver.
//!
//! Events are emitted under the `presto_adbc` target. The first connection
//! installs a global `tracing` subscriber; later connections reuse it.
//!
//! The level comes from `presto.log_level`, then `RUST_LOG`, then `warn`.
//! Output goes to `presto.log_file` when set and to stderr otherwise.
//!
//! ```bash
//! RUST_LOG=presto_adbc=debug ./my_adbc_app
//! ```

use crate::error::{PrestoErrorHelper, Result};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static SUBSCRIBER_INSTALLED: OnceLock<()> = OnceLock::new();

const LOG_TARGET: &str = "presto_adbc";

/// Parse a level name (`off` through `trace`, any case).
fn parse_level(name: &str) -> Result<LevelFilter> {
    match name.to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::OFF),
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        _ => Err(PrestoErrorHelper::invalid_argument()
            .message(format!("Unknown log level '{}'", name))),
    }
}

/// Logging settings collected from database options.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogConfig {
    /// Level as the caller spelled it; only valid names are stored.
    level: Option<String>,
    file: Option<String>,
}

impl LogConfig {
    pub(crate) fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub(crate) fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub(crate) fn set_level(&mut self, name: &str) -> Result<()> {
        parse_level(name)?;
        self.level = Some(name.to_string());
        Ok(())
    }

    pub(crate) fn set_file(&mut self, path: impl Into<String>) {
        self.file = Some(path.into());
    }

    /// Filter for this configuration, `None` when logging is off.
    fn filter(&self) -> Option<EnvFilter> {
        match self.level.as_deref().map(parse_level) {
            Some(Ok(level)) if level == LevelFilter::OFF => None,
            Some(Ok(level)) => Some(EnvFilter::new(format!("{}={}", LOG_TARGET, level))),
            None | Some(Err(_)) => Some(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", LOG_TARGET))),
            ),
        }
    }
}

/// Install the global subscriber described by `config`, once per process.
pub(crate) fn init_logging(config: &LogConfig) {
    SUBSCRIBER_INSTALLED.get_or_init(|| {
        let Some(filter) = config.filter() else {
            return;
        };

        let (writer, ansi) = match config.file {
            Some(ref path) => match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
                Err(e) => {
                    eprintln!("presto-adbc: failed to open log file {}: {}", path, e);
                    return;
                }
            },
            None => (BoxMakeWriter::new(std::io::stderr), true),
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .with_timer(SystemTime)
            .try_init()
            .ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("Off").unwrap(), LevelFilter::OFF);
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn test_set_level_keeps_spelling_and_rejects_unknown() {
        let mut config = LogConfig::default();
        config.set_level("DEBUG").unwrap();
        assert_eq!(config.level(), Some("DEBUG"));

        let err = config.set_level("loud").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(config.level(), Some("DEBUG"));
    }

    #[test]
    fn test_off_disables_filter() {
        let mut config = LogConfig::default();
        config.set_level("OFF").unwrap();
        assert!(config.filter().is_none());

        config.set_level("info").unwrap();
        assert!(config.filter().is_some());
        assert!(LogConfig::default().filter().is_some());
    }

    #[test]
    fn test_set_file() {
        let mut config = LogConfig::default();
        assert!(config.file().is_none());
        config.set_file("/tmp/presto-adbc.log");
        assert_eq!(config.file(), Some("/tmp/presto-adbc.log"));
    }
}
