//! Analytics event ingestion: a required tag column and an optional type column.

use std::io::Read;

use csv::StringRecord;
use tracing::warn;

use crate::{
    error::Error,
    ingest::{IngestOptions, RowBuilder, cell, read_strands},
    types::{AnalyticsStrand, Source, Strand},
};

pub struct AnalyticsRowBuilder<'a> {
    type_column_name: &'a str,
    tag_column_name: &'a str,
    type_column: Option<usize>,
    tag_column: Option<usize>,
}

impl<'a> AnalyticsRowBuilder<'a> {
    pub fn new(type_column_name: &'a str, tag_column_name: &'a str) -> Self {
        Self {
            type_column_name,
            tag_column_name,
            type_column: None,
            tag_column: None,
        }
    }
}

impl RowBuilder for AnalyticsRowBuilder<'_> {
    fn scan_header(&mut self, index: usize, name: &str) {
        if name.eq_ignore_ascii_case(self.type_column_name) {
            self.type_column = Some(index);
        }
        if name.eq_ignore_ascii_case(self.tag_column_name) {
            self.tag_column = Some(index);
        }
    }

    fn finish_header(&self, source: &Source) -> Result<(), Error> {
        match self.tag_column {
            Some(_) => Ok(()),
            None => Err(Error::missing_column(self.tag_column_name, &source.title)),
        }
    }

    fn build(
        &mut self,
        line_number: usize,
        key: &str,
        row: &StringRecord,
        source: &Source,
    ) -> Option<Strand> {
        let tag = self
            .tag_column
            .and_then(|index| cell(row, index))
            .map(str::trim)
            .filter(|tag| !tag.is_empty());
        let Some(tag) = tag else {
            warn!(
                "{} line {}: `{}` has no tag, row skipped",
                source.title, line_number, key
            );
            return None;
        };

        let kind = self
            .type_column
            .and_then(|index| cell(row, index))
            .map(str::trim)
            .unwrap_or_default();

        Some(Strand::Analytics(AnalyticsStrand {
            key: key.to_string(),
            source_name: source.title.clone(),
            line_number,
            kind: kind.to_string(),
            tag: tag.to_string(),
        }))
    }
}

/// Reads the analytics strands of one source.
pub fn read<R: Read>(
    reader: R,
    source: &Source,
    type_column_name: &str,
    tag_column_name: &str,
    options: &IngestOptions<'_>,
) -> Result<Vec<Strand>, Error> {
    let mut builder = AnalyticsRowBuilder::new(type_column_name, tag_column_name);
    read_strands(reader, source, options, &mut builder)
}
