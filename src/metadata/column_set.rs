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

//! Ordered, single-pass collection of column catalog rows.
//!
//! Rows are appended through [`ColumnSetBuilder`] while the introspection
//! result is read, then handed to the consumer as a [`ColumnSet`] that can
//! be walked forward exactly once, either cursor-style:
//!
//! ```ignore
//! while !columns.is_empty() {
//!     let row = columns.front()?;
//!     // ...
//!     columns.advance()?;
//! }
//! ```
//!
//! or as an [`Iterator`] that drains the rows.

use crate::error::{PrestoErrorHelper, Result};
use crate::metadata::types::{CatalogColumnRow, FIELD_COUNT};
use std::collections::VecDeque;

/// Append-only builder for a [`ColumnSet`].
#[derive(Debug, Default)]
pub struct ColumnSetBuilder {
    rows: Vec<CatalogColumnRow>,
}

impl ColumnSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row after all previously appended rows.
    pub fn push(&mut self, row: CatalogColumnRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn build(self) -> ColumnSet {
        ColumnSet {
            rows: VecDeque::from(self.rows),
        }
    }
}

/// Column catalog rows in source column order, consumed front to back.
#[derive(Debug, Default)]
pub struct ColumnSet {
    rows: VecDeque<CatalogColumnRow>,
}

impl ColumnSet {
    /// Number of metadata fields in every row.
    pub const FIELD_COUNT: usize = FIELD_COUNT;

    /// Returns `true` once every row has been consumed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows not yet consumed.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn field_count(&self) -> usize {
        Self::FIELD_COUNT
    }

    /// Current row. Fails with a usage fault when the set is exhausted.
    pub fn front(&self) -> Result<&CatalogColumnRow> {
        self.rows.front().ok_or_else(|| {
            PrestoErrorHelper::invalid_state().message("front() called on an empty column set")
        })
    }

    /// Consume the current row. Fails with a usage fault when the set is
    /// exhausted.
    pub fn advance(&mut self) -> Result<()> {
        self.rows.pop_front().map(|_| ()).ok_or_else(|| {
            PrestoErrorHelper::invalid_state().message("advance() called on an empty column set")
        })
    }
}

impl Iterator for ColumnSet {
    type Item = CatalogColumnRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows.len(), Some(self.rows.len()))
    }
}

impl ExactSizeIterator for ColumnSet {}
