//! All error types for the strandgen crate.
//!
//! Fatal conditions travel up to `main` as `Err` and end the run with a
//! non-zero exit. Fetch errors are the exception: the pipeline logs them and
//! skips the source.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown platform `{0}`, expected one of Android, iOS, Web")]
    UnknownPlatform(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source `{source_name}` answered with HTTP status {status}")]
    HttpStatus { source_name: String, status: u16 },

    #[error("column `{column}` not found in source `{source_name}`")]
    MissingColumn { column: String, source_name: String },

    #[error("language `{language}` has no matching column in source `{source_name}`")]
    MissingLanguageColumn {
        language: String,
        source_name: String,
    },

    #[error("analytics.packageName is required when generating for Android")]
    MissingPackageName,
}

impl Error {
    /// Creates a missing column error for the given source.
    pub fn missing_column(column: impl Into<String>, source_name: impl Into<String>) -> Self {
        Error::MissingColumn {
            column: column.into(),
            source_name: source_name.into(),
        }
    }
}
