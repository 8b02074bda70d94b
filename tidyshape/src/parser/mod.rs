//! Wide CSV reader with encoding and delimiter auto-detection.
//!
//! Turns raw bytes into a typed [`WideTable`]. No reshaping logic here.

use log::debug;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{CellValue, ColumnKind, WideTable};

/// Delimiters considered by [`detect_delimiter`], in tie-break order.
const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub table: WideTable,
    /// Detected encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Inferred type of each column, in header order
    pub column_kinds: Vec<ColumnKind>,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always taken as UTF-8; chardet is only consulted for
/// bytes that are not, since it mislabels short accented UTF-8 as latin-1.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// A leading byte-order mark is dropped so it never leaks into the first header.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::Encoding(e.to_string()))?,
        // encoding_rs maps latin-1 onto its windows-1252 superset
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        _ => match encoding_rs::Encoding::for_label(encoding.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    if decoded.starts_with('\u{feff}') {
        Ok(decoded['\u{feff}'.len_utf8()..].to_string())
    } else {
        Ok(decoded)
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when the header holds a single column.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &CANDIDATE_DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// A record shorter than the header is padded with missing cells; a longer
/// one is a parse error.
pub fn parse_wide_str(content: &str, delimiter: char) -> CsvResult<WideTable> {
    parse_typed(content, delimiter).map(|(table, _)| table)
}

fn parse_typed(content: &str, delimiter: char) -> CsvResult<(WideTable, Vec<ColumnKind>)> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if !delimiter.is_ascii() {
        return Err(CsvError::Parse {
            line: 0,
            message: format!("Delimiter '{}' is not a single-byte character", delimiter),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let width = headers.len();
    let mut raw_rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > width {
            return Err(CsvError::Parse {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                message: format!("Expected {} fields, saw {}", width, record.len()),
            });
        }
        let mut raw: Vec<String> = record.iter().map(str::to_string).collect();
        raw.resize(width, String::new());
        raw_rows.push(raw);
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| ColumnKind::infer(raw_rows.iter().map(|row| row[col].as_str())))
        .collect();
    let rows = raw_rows
        .iter()
        .map(|raw| {
            raw.iter()
                .zip(&kinds)
                .map(|(cell, kind)| CellValue::parse(cell, *kind))
                .collect()
        })
        .collect();

    Ok((WideTable::new(headers, rows), kinds))
}

/// Parse CSV bytes, auto-detecting encoding and (unless given) the delimiter.
pub fn parse_bytes_auto(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    debug!("encoding={} delimiter={:?}", encoding, delimiter);

    let (table, column_kinds) = parse_typed(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
        column_kinds,
    })
}

/// Parse a CSV file with auto-detection.
///
/// # Example
/// ```ignore
/// let result = parse_wide_file("data/cases_wide.csv", None)?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.table.row_count());
/// ```
pub fn parse_wide_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes, delimiter)
}
