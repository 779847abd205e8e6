//! CSV input and output helpers for the subcommands.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cinefetch_api::fetch::QueryItem;
use cinefetch_text::TextNormalizer;

/// Reads `title,year,kind` rows into query items.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or a row has an unknown kind.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<QueryItem>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<QueryItem>()
        .enumerate()
        .map(|(row, item)| item.with_context(|| format!("invalid query at row {}", row + 1)))
        .collect()
}

/// Rewrites `column` of a CSV stream through `normalizer`.
///
/// Every other column is copied unchanged. Empty cells count as absent
/// and stay empty. Returns the number of data rows written.
///
/// # Errors
///
/// Returns an error if the header lacks `column` or the CSV cannot be
/// read or written.
pub fn normalize_csv_column<R: Read, W: Write>(
    reader: R,
    writer: W,
    column: &str,
    normalizer: &TextNormalizer,
) -> Result<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .context("failed to read CSV header")?
        .clone();
    let index = headers
        .iter()
        .position(|h| h == column)
        .with_context(|| format!("column {column:?} not found in CSV header"))?;

    let records = csv_reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read CSV rows")?;

    let values: Vec<Option<String>> = records
        .iter()
        .map(|record| record.get(index).filter(|v| !v.is_empty()).map(String::from))
        .collect();
    let normalized = normalizer.normalize_column(&values);

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(&headers)
        .context("failed to write CSV header")?;
    for (record, value) in records.iter().zip(&normalized) {
        let row: csv::StringRecord = record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if i == index {
                    value.as_deref().unwrap_or_default()
                } else {
                    field
                }
            })
            .collect();
        csv_writer
            .write_record(&row)
            .context("failed to write CSV row")?;
    }
    csv_writer.flush().context("failed to flush CSV output")?;

    Ok(records.len())
}

/// Opens `path` for reading.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open {}", path.display()))
}

/// Opens `path` for writing, or stdout when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file =
                File::create(p).with_context(|| format!("failed to create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}
