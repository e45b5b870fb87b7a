//! Run configuration, loaded from a JSON document.
//!
//! ```json
//! {
//!   "platform": "Android",
//!   "strings": {
//!     "languages": [{ "id": "en", "path": "values/strings.xml" }],
//!     "sources": [{ "title": "Main", "url": "https://example.com/main.csv" }]
//!   },
//!   "analytics": {
//!     "packageName": "com.example.analytics",
//!     "types": ["Screen", "Event"],
//!     "sources": [{ "title": "Events", "url": "https://example.com/events.csv" }],
//!     "path": "Analytics.kt"
//!   }
//! }
//! ```

use std::{io::Read, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    types::{Language, Source},
};

pub const DEFAULT_HEADER_MARKER: &str = "###";
pub const DEFAULT_KEY_COLUMN: &str = "key";
pub const DEFAULT_PLATFORMS_COLUMN: &str = "platforms";
pub const DEFAULT_TYPE_COLUMN: &str = "type";
pub const DEFAULT_TAG_COLUMN: &str = "tag";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Platform name: `Android`, `iOS` or `Web`, any case.
    pub platform: String,

    /// Key prefix marking a row as a comment.
    #[serde(default = "default_header_marker")]
    pub header_column_name: String,

    #[serde(default = "default_key_column")]
    pub key_column_name: String,

    /// Optional per-row platform filter column.
    #[serde(default = "default_platforms_column")]
    pub platforms_column_name: String,

    #[serde(default)]
    pub strings: Option<StringsConfig>,

    #[serde(default)]
    pub analytics: Option<AnalyticsConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringsConfig {
    pub languages: Vec<Language>,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// Kotlin package of the generated file; required for Android.
    #[serde(default)]
    pub package_name: Option<String>,

    #[serde(default = "default_type_column")]
    pub type_column_name: String,

    #[serde(default = "default_tag_column")]
    pub tag_column_name: String,

    /// Group names, in output order.
    #[serde(default)]
    pub types: Vec<String>,

    pub sources: Vec<Source>,

    pub path: String,
}

fn default_header_marker() -> String {
    DEFAULT_HEADER_MARKER.to_string()
}

fn default_key_column() -> String {
    DEFAULT_KEY_COLUMN.to_string()
}

fn default_platforms_column() -> String {
    DEFAULT_PLATFORMS_COLUMN.to_string()
}

fn default_type_column() -> String {
    DEFAULT_TYPE_COLUMN.to_string()
}

fn default_tag_column() -> String {
    DEFAULT_TAG_COLUMN.to_string()
}

impl Config {
    /// Parse a configuration from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Load a configuration file. A missing file is reported as [`Error::ConfigNotFound`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ConfigNotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Logs suspicious but legal settings. Never fails.
    pub fn lint(&self) {
        if let Some(strings) = &self.strings {
            for language in &strings.languages {
                if language.id.parse::<LanguageIdentifier>().is_err() {
                    warn!(
                        "strings.languages: `{}` is not a BCP 47 language identifier",
                        language.id
                    );
                }
            }
            if strings.sources.is_empty() {
                warn!("strings.sources is empty");
            }
        }
        if let Some(analytics) = &self.analytics {
            if analytics.sources.is_empty() {
                warn!("analytics.sources is empty");
            }
        }
    }
}
