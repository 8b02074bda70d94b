//! Wide → tidy reshaping (melt / unpivot).
//!
//! ```text
//! Wide input                              Tidy output
//! ┌─────────┬──────────┬──────────┬─────┐  ┌─────────┬─────┬────────────┬──────┐
//! │ Country │ Jan_2021 │ Feb_2021 │ Pop │  │ Country │ Pop │ Month_Year │ case │
//! ├─────────┼──────────┼──────────┼─────┤→ ├─────────┼─────┼────────────┼──────┤
//! │ US      │ 1        │ 2        │ 331 │  │ US      │ 331 │ Jan_2021   │ 1    │
//! └─────────┴──────────┴──────────┴─────┘  │ US      │ 331 │ Feb_2021   │ 2    │
//!                                          └─────────┴─────┴────────────┴──────┘
//! ```
//!
//! Output rows follow source row order, then value-column order within a row.
//! Nothing is sorted, aggregated, deduplicated or dropped.

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::{
    CellValue, TidyRow, TidyTable, WideTable, COUNTRY_COLUMN, PERIOD_COLUMN, POPULATION_COLUMN,
};

/// Unpivot `table` into a tidy table whose value column is named `label`.
///
/// Every column other than `Country` and `Population` is treated as a period
/// column, regardless of where the identifiers sit in the header.
///
/// # Errors
/// - [`ReshapeError::MissingColumn`] if either identifier column is absent
/// - [`ReshapeError::LabelCollision`] if `label` names a fixed output column
pub fn melt(table: &WideTable, label: &str) -> ReshapeResult<TidyTable> {
    let country_idx = table
        .column_index(COUNTRY_COLUMN)
        .ok_or_else(|| ReshapeError::MissingColumn(COUNTRY_COLUMN.to_string()))?;
    let population_idx = table
        .column_index(POPULATION_COLUMN)
        .ok_or_else(|| ReshapeError::MissingColumn(POPULATION_COLUMN.to_string()))?;

    if [COUNTRY_COLUMN, POPULATION_COLUMN, PERIOD_COLUMN].contains(&label) {
        return Err(ReshapeError::LabelCollision(label.to_string()));
    }

    let value_columns: Vec<(usize, &str)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != country_idx && *i != population_idx)
        .map(|(i, name)| (i, name.as_str()))
        .collect();

    let mut rows = Vec::with_capacity(table.row_count() * value_columns.len());
    for row in &table.rows {
        for &(idx, period) in &value_columns {
            rows.push(TidyRow {
                country: cell(row, country_idx),
                population: cell(row, population_idx),
                period: period.to_string(),
                value: cell(row, idx),
            });
        }
    }

    Ok(TidyTable {
        label: label.to_string(),
        rows,
    })
}

/// Rows shorter than the header read as missing past their end.
fn cell(row: &[CellValue], idx: usize) -> CellValue {
    row.get(idx).cloned().unwrap_or(CellValue::Missing)
}
