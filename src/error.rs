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

//! Error types for the Presto ADBC driver.
//!
//! Errors are built through [`PrestoErrorHelper`], one constructor per
//! [`ErrorKind`], and refined with [`Error::message`]:
//!
//! ```ignore
//! return Err(PrestoErrorHelper::invalid_state().message("column set is empty"));
//! ```
//!
//! Usage faults (`InvalidArgument`, `InvalidState`) signal a contract
//! violation by the caller. `MalformedRow` is reserved for introspection
//! results whose shape does not match `SHOW COLUMNS`, and `Io` covers every
//! transport failure.

use adbc_core::error::{Error as AdbcError, Status};
use adbc_core::options::OptionValue;
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Category of a driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    NotFound,
    NotImplemented,
    Io,
    MalformedRow,
}

impl ErrorKind {
    /// ADBC status code reported for this kind.
    pub fn status(self) -> Status {
        match self {
            ErrorKind::InvalidArgument => Status::InvalidArguments,
            ErrorKind::InvalidState => Status::InvalidState,
            ErrorKind::NotFound => Status::NotFound,
            ErrorKind::NotImplemented => Status::NotImplemented,
            ErrorKind::Io => Status::IO,
            ErrorKind::MalformedRow => Status::InvalidData,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::NotFound => "not found",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::Io => "io error",
            ErrorKind::MalformedRow => "malformed introspection row",
        };
        f.write_str(name)
    }
}

/// Error raised by the driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[presto-adbc] {kind}: {detail}")]
pub struct Error {
    kind: ErrorKind,
    detail: String,
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: String::new(),
        }
    }

    /// Attach a message to the error.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.detail = message.into();
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns `true` for contract violations by the caller, as opposed to
    /// upstream or transport failures.
    pub fn is_usage_fault(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument | ErrorKind::InvalidState)
    }

    /// Convert into the ADBC error surfaced through `adbc_core` traits.
    pub fn to_adbc(&self) -> AdbcError {
        AdbcError::with_message_and_status(self.to_string(), self.kind.status())
    }
}

impl From<Error> for AdbcError {
    fn from(err: Error) -> Self {
        err.to_adbc()
    }
}

/// Constructors for driver errors.
pub struct PrestoErrorHelper;

impl PrestoErrorHelper {
    pub fn invalid_argument() -> Error {
        Error::new(ErrorKind::InvalidArgument)
    }

    pub fn invalid_state() -> Error {
        Error::new(ErrorKind::InvalidState)
    }

    pub fn not_found() -> Error {
        Error::new(ErrorKind::NotFound)
    }

    pub fn not_implemented() -> Error {
        Error::new(ErrorKind::NotImplemented)
    }

    pub fn io() -> Error {
        Error::new(ErrorKind::Io)
    }

    pub fn malformed_row() -> Error {
        Error::new(ErrorKind::MalformedRow)
    }

    /// Error for an option key the driver does not recognize.
    pub fn set_unknown_option(key: &impl AsRef<str>) -> Error {
        Error::new(ErrorKind::NotImplemented)
            .message(format!("unknown option '{}'", key.as_ref()))
    }

    /// Error for a recognized option key given a value of the wrong shape.
    pub fn set_invalid_option(key: &impl AsRef<str>, value: &OptionValue) -> Error {
        Error::new(ErrorKind::InvalidArgument).message(format!(
            "invalid value for option '{}': {:?}",
            key.as_ref(),
            value
        ))
    }

    /// Error for reading an option the driver does not expose.
    pub fn get_unknown_option(key: &impl AsRef<str>) -> Error {
        Error::new(ErrorKind::NotFound)
            .message(format!("option '{}' is not available", key.as_ref()))
    }
}
