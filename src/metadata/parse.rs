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

//! Result parsing for `SHOW COLUMNS`.
//!
//! Rows are read positionally as `[name, type, nullable, partition key, ...]`.
//! Anything past the fourth column is ignored.

use crate::error::{PrestoErrorHelper, Result};
use crate::metadata::types::RawColumnDescriptor;
use arrow_array::cast::AsArray;
use arrow_array::RecordBatch;
use arrow_schema::DataType;

const NAME_COLUMN: usize = 0;
const TYPE_COLUMN: usize = 1;
const NULLABLE_COLUMN: usize = 2;
const PARTITION_KEY_COLUMN: usize = 3;
const MIN_COLUMNS: usize = 4;

/// Get a non-null string value from a column at a given row.
fn get_string_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<String> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Err(PrestoErrorHelper::malformed_row().message(format!(
            "Null value in column {} of SHOW COLUMNS row {}",
            col_idx, row
        )));
    }
    match array.data_type() {
        DataType::Utf8 => Ok(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(array.as_string::<i64>().value(row).to_string()),
        dt => Err(PrestoErrorHelper::malformed_row()
            .message(format!("Expected string column, got {:?}", dt))),
    }
}

/// Get a flag from a column at a given row, `None` when the value is null.
///
/// Accepts native booleans and the textual forms older coordinators emit.
fn get_flag_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<Option<bool>> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Ok(None);
    }
    let text = match array.data_type() {
        DataType::Boolean => return Ok(Some(array.as_boolean().value(row))),
        DataType::Utf8 => array.as_string::<i32>().value(row),
        DataType::LargeUtf8 => array.as_string::<i64>().value(row),
        dt => {
            return Err(PrestoErrorHelper::malformed_row()
                .message(format!("Expected boolean column, got {:?}", dt)))
        }
    };
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(Some(true)),
        "false" | "no" | "" => Ok(Some(false)),
        other => Err(PrestoErrorHelper::malformed_row()
            .message(format!("Unrecognized flag value '{}'", other))),
    }
}

/// Parse one `SHOW COLUMNS` batch into raw descriptors, in row order.
pub fn parse_columns(batch: &RecordBatch) -> Result<Vec<RawColumnDescriptor>> {
    if batch.num_columns() < MIN_COLUMNS {
        return Err(PrestoErrorHelper::malformed_row().message(format!(
            "SHOW COLUMNS returned {} columns, expected at least {}",
            batch.num_columns(),
            MIN_COLUMNS
        )));
    }

    (0..batch.num_rows())
        .map(|row| {
            Ok(RawColumnDescriptor {
                name: get_string_value(batch, NAME_COLUMN, row)?,
                engine_type_name: get_string_value(batch, TYPE_COLUMN, row)?,
                // Unknown nullability cannot be reported as either answer.
                nullable: get_flag_value(batch, NULLABLE_COLUMN, row)?.ok_or_else(|| {
                    PrestoErrorHelper::malformed_row().message(format!(
                        "Null nullability flag in SHOW COLUMNS row {}",
                        row
                    ))
                })?,
                is_partition_key: get_flag_value(batch, PARTITION_KEY_COLUMN, row)?
                    .unwrap_or(false),
            })
        })
        .collect()
}
