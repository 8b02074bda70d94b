//! Tidy table serialization.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::WriteResult;
use crate::models::TidyTable;

/// Write `table` as CSV (header first, `\n` line endings, minimal quoting).
pub fn write_tidy<W: Write>(table: &TidyTable, writer: W) -> WriteResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(table.headers())?;
    for row in &table.rows {
        csv_writer.write_record([
            row.country.to_string(),
            row.population.to_string(),
            row.period.clone(),
            row.value.to_string(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write `table` to `path`, replacing any existing file.
pub fn write_tidy_file(table: &TidyTable, path: &Path) -> WriteResult<()> {
    let file = File::create(path)?;
    write_tidy(table, file)
}

/// Render `table` to an in-memory CSV string.
pub fn tidy_to_string(table: &TidyTable) -> WriteResult<String> {
    let mut buf = Vec::new();
    write_tidy(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
