//! Domain models for the reshaping pipeline.
//!
//! - [`CellValue`] - A typed CSV cell (integer, float, text, or missing)
//! - [`WideTable`] - One row per entity, one column per period
//! - [`TidyTable`] - One row per (entity, period, value)

use std::fmt;

/// Identifier column holding the entity name.
pub const COUNTRY_COLUMN: &str = "Country";

/// Identifier column holding the entity population.
pub const POPULATION_COLUMN: &str = "Population";

/// Output column holding the former period header.
pub const PERIOD_COLUMN: &str = "Month_Year";

// =============================================================================
// Cell Value
// =============================================================================

/// A single parsed cell.
///
/// Typing is decided per column by [`ColumnKind::infer`], so a float column
/// keeps `5.0` as a float even though the text `5` would parse as an integer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Parse a raw cell under the given column kind.
    pub fn parse(raw: &str, kind: ColumnKind) -> Self {
        if raw.is_empty() {
            return CellValue::Missing;
        }
        match kind {
            ColumnKind::Integer => raw
                .parse()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnKind::Float => raw
                .parse()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnKind::Text => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(x) => f.write_str(&format_float(*x)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Missing => Ok(()),
        }
    }
}

/// Shortest round-trip text for a float, in the layout dataframe tools write:
/// whole values keep `.0`, and exponents below -4 or from 16 up switch to
/// scientific notation with a signed two-digit exponent (`1e-05`, `1.5e+20`).
fn format_float(x: f64) -> String {
    // NaN is written like a missing cell
    if x.is_nan() {
        return String::new();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sign = if x.is_sign_negative() { "-" } else { "" };
    // `{:e}` yields the shortest digits, e.g. "1.25e1", "1e-5", "0e0"
    let sci = format!("{:e}", x.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let body = if exp < 0 {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    } else {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    };
    format!("{}{}", sign, body)
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// Inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// Infer the narrowest kind that every non-empty cell fits.
    ///
    /// A column with no non-empty cells is treated as float, matching how
    /// an all-missing numeric column reads in a dataframe.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Integer;
        let mut seen = false;
        for cell in cells.into_iter().filter(|c| !c.is_empty()) {
            seen = true;
            if kind == ColumnKind::Integer && cell.parse::<i64>().is_err() {
                kind = ColumnKind::Float;
            }
            if kind == ColumnKind::Float && cell.parse::<f64>().is_err() {
                return ColumnKind::Text;
            }
        }
        if seen {
            kind
        } else {
            ColumnKind::Float
        }
    }
}

// =============================================================================
// Wide Table
// =============================================================================

/// A table with one column per observation period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    /// Column headers in file order.
    pub headers: Vec<String>,
    /// Rows, each with exactly `headers.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl WideTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Tidy Table
// =============================================================================

/// One observation of the long-format table.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRow {
    pub country: CellValue,
    pub population: CellValue,
    pub period: String,
    pub value: CellValue,
}

/// A long-format table: `[Country, Population, Month_Year, <label>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable {
    /// Name of the value column.
    pub label: String,
    pub rows: Vec<TidyRow>,
}

impl TidyTable {
    /// Output header in column order.
    pub fn headers(&self) -> [&str; 4] {
        [
            COUNTRY_COLUMN,
            POPULATION_COLUMN,
            PERIOD_COLUMN,
            self.label.as_str(),
        ]
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
