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

//! SQL command builder for metadata queries.
//!
//! Builds the `SHOW COLUMNS FROM <table>` introspection command with
//! identifier quoting, so table names are never spliced into the command
//! text verbatim.

use crate::error::{PrestoErrorHelper, Result};

/// Builds SQL commands for metadata queries.
///
/// # Examples
///
/// ```ignore
/// let sql = SqlCommandBuilder::build_show_columns("tpch.tiny.orders")?;
/// assert_eq!(sql, r#"SHOW COLUMNS FROM "tpch"."tiny"."orders""#);
/// ```
pub struct SqlCommandBuilder;

impl SqlCommandBuilder {
    /// Build `SHOW COLUMNS FROM <table>`.
    ///
    /// `table_name` may be qualified (`catalog.schema.table` or
    /// `schema.table`); every dot-separated part is quoted separately.
    /// Returns an error if the name or any part of it is empty.
    pub fn build_show_columns(table_name: &str) -> Result<String> {
        Ok(format!(
            "SHOW COLUMNS FROM {}",
            Self::quote_qualified_name(table_name)?
        ))
    }

    /// Quote a possibly qualified name part by part.
    fn quote_qualified_name(name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(PrestoErrorHelper::invalid_argument().message("table name is empty"));
        }

        let parts = name
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    Err(PrestoErrorHelper::invalid_argument()
                        .message(format!("table name '{}' has an empty part", name)))
                } else {
                    Ok(Self::escape_identifier(part))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(parts.join("."))
    }

    /// Escape an identifier by wrapping it in double quotes.
    ///
    /// Any double quotes within the identifier are doubled (`"` → `""`).
    fn escape_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
