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

//! ADBC Driver implementation for Presto.

use crate::database::Database;
use adbc_core::options::{OptionDatabase, OptionValue};
use adbc_core::Optionable;

/// The main entry point for the Presto ADBC driver.
///
/// Driver → Database (options) → Connection (runtime + client).
#[derive(Debug, Default)]
pub struct Driver;

impl Driver {
    pub fn new() -> Self {
        Self
    }

    /// Creates a new Database with default options.
    pub fn new_database(&self) -> crate::Result<Database> {
        Ok(Database::new())
    }

    /// Creates a new Database and applies the given options in order.
    ///
    /// Stops at the first rejected option.
    pub fn new_database_with_opts(
        &self,
        opts: impl IntoIterator<Item = (OptionDatabase, OptionValue)>,
    ) -> adbc_core::error::Result<Database> {
        let mut database = Database::new();
        for (key, value) in opts {
            database.set_option(key, value)?;
        }
        Ok(database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbc_core::error::Status;

    #[test]
    fn test_driver_new() {
        let driver = Driver::new();
        let database = driver.new_database().unwrap();
        assert!(database.uri().is_none());
    }

    #[test]
    fn test_new_database_with_opts() {
        let database = Driver::new()
            .new_database_with_opts([
                (
                    OptionDatabase::Uri,
                    OptionValue::String("http://coordinator:8080".into()),
                ),
                (
                    OptionDatabase::Other("presto.schema".into()),
                    OptionValue::String("sf1".into()),
                ),
            ])
            .unwrap();

        assert_eq!(database.uri(), Some("http://coordinator:8080"));
        assert_eq!(database.session().schema.as_deref(), Some("sf1"));
    }

    #[test]
    fn test_new_database_with_bad_opt() {
        let err = Driver::new()
            .new_database_with_opts([(
                OptionDatabase::Other("presto.prefetch_pages".into()),
                OptionValue::String("true".into()),
            )])
            .unwrap_err();
        assert_eq!(err.status, Status::NotImplemented);
    }
}
