//! Core types for strandgen.
//! Ingestion builds strands from CSV rows; validation filters them; writers render them.

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// One CSV origin, as listed in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// Display name used in diagnostics.
    pub title: String,
    /// Where the CSV export is downloaded from.
    pub url: String,
}

/// A configured output language.
///
/// The CSV column holding this language is resolved per source during
/// ingestion and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    /// Matched case-insensitively against CSV header cells.
    pub id: String,
    /// Output file for this language's strings.
    pub path: String,
}

/// One parsed unit of output content, derived from a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strand {
    /// A comment row, rendered as a section comment where the platform has one.
    Header(HeaderStrand),

    /// A localized string with its translations.
    Language(LanguageStrand),

    /// An analytics event constant.
    Analytics(AnalyticsStrand),
}

impl Strand {
    pub fn key(&self) -> &str {
        match self {
            Strand::Header(s) => &s.key,
            Strand::Language(s) => &s.key,
            Strand::Analytics(s) => &s.key,
        }
    }

    pub fn source_name(&self) -> &str {
        match self {
            Strand::Header(s) => &s.source_name,
            Strand::Language(s) => &s.source_name,
            Strand::Analytics(s) => &s.source_name,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            Strand::Header(s) => s.line_number,
            Strand::Language(s) => s.line_number,
            Strand::Analytics(s) => s.line_number,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Strand::Header(_))
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` (line {}, source {})",
            self.key(),
            self.line_number(),
            self.source_name()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStrand {
    /// Comment text with the header marker removed.
    pub key: String,
    pub source_name: String,
    pub line_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStrand {
    pub key: String,
    pub source_name: String,
    pub line_number: usize,
    /// Language id -> raw cell value.
    pub translations: HashMap<String, String>,
}

impl LanguageStrand {
    pub fn new(key: impl Into<String>, source_name: impl Into<String>, line_number: usize) -> Self {
        Self {
            key: key.into(),
            source_name: source_name.into(),
            line_number,
            translations: HashMap::new(),
        }
    }

    pub fn add_translation(&mut self, language: impl Into<String>, value: impl Into<String>) {
        self.translations.insert(language.into(), value.into());
    }

    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsStrand {
    pub key: String,
    pub source_name: String,
    pub line_number: usize,
    /// Grouping type; empty when the event is ungrouped.
    pub kind: String,
    pub tag: String,
}
