//! Localized string ingestion: one column per configured language.

use std::io::Read;

use csv::StringRecord;

use crate::{
    error::Error,
    ingest::{IngestOptions, RowBuilder, read_strands},
    types::{Language, LanguageStrand, Source, Strand},
};

/// Builds [`LanguageStrand`]s, resolving language columns from the header row.
pub struct StringRowBuilder<'a> {
    languages: &'a [Language],
    /// Column of each language, parallel to `languages`.
    columns: Vec<Option<usize>>,
}

impl<'a> StringRowBuilder<'a> {
    pub fn new(languages: &'a [Language]) -> Self {
        Self {
            languages,
            columns: vec![None; languages.len()],
        }
    }

    /// Resolved column per language id.
    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.languages
            .iter()
            .map(|language| language.id.as_str())
            .zip(self.columns.iter().copied())
    }
}

impl RowBuilder for StringRowBuilder<'_> {
    fn scan_header(&mut self, index: usize, name: &str) {
        for (language, column) in self.languages.iter().zip(self.columns.iter_mut()) {
            if language.id.trim().eq_ignore_ascii_case(name) {
                *column = Some(index);
            }
        }
    }

    fn finish_header(&self, source: &Source) -> Result<(), Error> {
        match self.columns().find(|(_, column)| column.is_none()) {
            Some((language, _)) => Err(Error::MissingLanguageColumn {
                language: language.to_string(),
                source_name: source.title.clone(),
            }),
            None => Ok(()),
        }
    }

    fn build(
        &mut self,
        line_number: usize,
        key: &str,
        row: &StringRecord,
        source: &Source,
    ) -> Option<Strand> {
        let mut strand = LanguageStrand::new(key, &source.title, line_number);
        // Empty cells are translations too; only cells past the end of a short row are absent.
        for (language, column) in self.languages.iter().zip(&self.columns) {
            if let Some(value) = column.and_then(|index| row.get(index)) {
                strand.add_translation(&language.id, value);
            }
        }
        Some(Strand::Language(strand))
    }
}

/// Reads the string strands of one source.
pub fn read<R: Read>(
    reader: R,
    source: &Source,
    languages: &[Language],
    options: &IngestOptions<'_>,
) -> Result<Vec<Strand>, Error> {
    let mut builder = StringRowBuilder::new(languages);
    read_strands(reader, source, options, &mut builder)
}
