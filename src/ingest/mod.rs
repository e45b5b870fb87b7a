//! Streaming CSV rows into strands.
//!
//! The first CSV record is the header row. It is scanned for the key column,
//! the optional platform-filter column, and whatever else the caller's
//! [`RowBuilder`] looks for. Every following record is classified in order:
//!
//! 1. blank key: skipped with a warning;
//! 2. key starting with the header marker: a [`HeaderStrand`];
//! 3. platform filter excluding the active platform: skipped silently;
//! 4. anything else: handed to the builder.
//!
//! Line numbers are physical lines of the CSV text, the header row being
//! line 1. Blank lines are skipped by the reader but still counted.

pub mod analytics;
pub mod strings;

use std::io::Read;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::{
    error::Error,
    platform::Platform,
    types::{HeaderStrand, Source, Strand},
};

/// Settings shared by every ingestion pass of a run.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions<'a> {
    pub platform: Platform,
    pub key_column: &'a str,
    pub platforms_column: &'a str,
    pub header_marker: &'a str,
}

/// Per-kind half of ingestion: maps extra columns and turns rows into strands.
pub trait RowBuilder {
    /// Called once per header cell, in column order.
    fn scan_header(&mut self, index: usize, name: &str);

    /// Called after the header row; an error aborts ingestion of the source.
    fn finish_header(&self, _source: &Source) -> Result<(), Error> {
        Ok(())
    }

    /// Builds the strand for a data row. `None` skips the row.
    fn build(
        &mut self,
        line_number: usize,
        key: &str,
        row: &StringRecord,
        source: &Source,
    ) -> Option<Strand>;
}

/// Positions of the columns every source is scanned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub key: usize,
    pub platforms: Option<usize>,
}

/// Reads all strands of one source.
pub fn read_strands<R: Read, B: RowBuilder>(
    reader: R,
    source: &Source,
    options: &IngestOptions<'_>,
    builder: &mut B,
) -> Result<Vec<Strand>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.records();

    let header = match records.next() {
        Some(header) => header?,
        None => return Err(Error::missing_column(options.key_column, &source.title)),
    };
    let layout = scan_header(&header, source, options, builder)?;
    builder.finish_header(source)?;

    let mut strands = Vec::new();
    for (offset, record) in records.enumerate() {
        let record = record?;
        let line_number = record
            .position()
            .map_or(offset + 2, |position| position.line() as usize);
        if let Some(strand) = classify_row(&record, line_number, layout, source, options, builder)
        {
            strands.push(strand);
        }
    }

    debug!("{}: {} strands read", source.title, strands.len());
    Ok(strands)
}

fn scan_header<B: RowBuilder>(
    header: &StringRecord,
    source: &Source,
    options: &IngestOptions<'_>,
    builder: &mut B,
) -> Result<ColumnLayout, Error> {
    let mut key = None;
    let mut platforms = None;

    for (index, name) in header.iter().enumerate() {
        let name = name.trim();
        if name.eq_ignore_ascii_case(options.key_column) {
            key = Some(index);
        } else if name.eq_ignore_ascii_case(options.platforms_column) {
            platforms = Some(index);
        }
        builder.scan_header(index, name);
    }

    let key = key.ok_or_else(|| Error::missing_column(options.key_column, &source.title))?;
    Ok(ColumnLayout { key, platforms })
}

fn classify_row<B: RowBuilder>(
    row: &StringRecord,
    line_number: usize,
    layout: ColumnLayout,
    source: &Source,
    options: &IngestOptions<'_>,
    builder: &mut B,
) -> Option<Strand> {
    let Some(key) = cell(row, layout.key).map(str::trim).filter(|k| !k.is_empty()) else {
        warn!("{} line {}: empty key, row skipped", source.title, line_number);
        return None;
    };

    let marker = options.header_marker;
    if !marker.is_empty() && key.starts_with(marker) {
        return Some(Strand::Header(HeaderStrand {
            key: key.replace(marker, "").trim().to_string(),
            source_name: source.title.clone(),
            line_number,
        }));
    }

    if let Some(filter) = layout.platforms.and_then(|index| cell(row, index)) {
        if !options.platform.is_admitted_by(filter) {
            return None;
        }
    }

    builder.build(line_number, key, row, source)
}

/// A cell's value; `None` when the row is too short or the cell is empty.
pub(crate) fn cell(row: &StringRecord, index: usize) -> Option<&str> {
    row.get(index).filter(|value| !value.is_empty())
}
