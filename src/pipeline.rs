//! Runs the strings and analytics pipelines described by a [`Config`].
//!
//! Each pipeline downloads its sources one after the other, ingests them,
//! validates the combined strands, and writes the platform files. A source
//! that cannot be downloaded is skipped with a warning; every other failure
//! is returned and ends the run.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    config::{AnalyticsConfig, Config, StringsConfig},
    error::Error,
    fetch::Fetcher,
    formats,
    ingest::{self, IngestOptions},
    platform::Platform,
    types::{Source, Strand},
    validation,
};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub files: Vec<WrittenFile>,
    /// Sources skipped because they could not be downloaded.
    pub skipped_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Strands handed to the writer, comment headers excluded.
    pub strands: usize,
}

/// Resolves the configured platform and runs both pipelines.
pub fn run<F: Fetcher + ?Sized>(config: &Config, fetcher: &F) -> Result<Report, Error> {
    let platform: Platform = config.platform.parse()?;
    info!("generating for {}", platform);

    let mut report = Report::default();

    match &config.strings {
        Some(strings) => generate_strings(config, strings, platform, fetcher, &mut report)?,
        None => info!("strings: no config found"),
    }

    match &config.analytics {
        Some(analytics) => generate_analytics(config, analytics, platform, fetcher, &mut report)?,
        None => info!("analytics: no config found"),
    }

    Ok(report)
}

fn ingest_options(config: &Config, platform: Platform) -> IngestOptions<'_> {
    IngestOptions {
        platform,
        key_column: &config.key_column_name,
        platforms_column: &config.platforms_column_name,
        header_marker: &config.header_column_name,
    }
}

pub fn generate_strings<F: Fetcher + ?Sized>(
    config: &Config,
    strings: &StringsConfig,
    platform: Platform,
    fetcher: &F,
    report: &mut Report,
) -> Result<(), Error> {
    let options = ingest_options(config, platform);

    let mut strands = Vec::new();
    for source in &strings.sources {
        let Some(body) = fetch_source(fetcher, source, report) else {
            continue;
        };
        let read = ingest::strings::read(body.as_bytes(), source, &strings.languages, &options)?;
        strands.extend(read);
    }

    validation::check_keys(&strands);
    let duplicates = validation::find_duplicate_strings(&strands);
    let strands = validation::remove_duplicates(strands, &duplicates);
    let strands = validation::check_translations(strands, &strings.languages);

    if !has_content(&strands) {
        warn!("strings: nothing to write");
        return Ok(());
    }

    let format = formats::strings_format(platform);
    for language in &strings.languages {
        let content = formats::render_strings(format.as_ref(), &strands, &language.id)?;
        record_write(&language.path, &content, &strands, report)?;
    }

    Ok(())
}

pub fn generate_analytics<F: Fetcher + ?Sized>(
    config: &Config,
    analytics: &AnalyticsConfig,
    platform: Platform,
    fetcher: &F,
    report: &mut Report,
) -> Result<(), Error> {
    let format = formats::analytics_format(platform, analytics.package_name.as_deref())?;
    let options = ingest_options(config, platform);

    let mut strands = Vec::new();
    for source in &analytics.sources {
        let Some(body) = fetch_source(fetcher, source, report) else {
            continue;
        };
        let read = ingest::analytics::read(
            body.as_bytes(),
            source,
            &analytics.type_column_name,
            &analytics.tag_column_name,
            &options,
        )?;
        strands.extend(read);
    }

    validation::check_keys(&strands);
    let duplicates = validation::find_duplicate_events(&strands);
    let strands = validation::remove_duplicates(strands, &duplicates);

    if !has_content(&strands) {
        warn!("analytics: nothing to write");
        return Ok(());
    }

    let content = formats::render_analytics(format.as_ref(), &strands, &analytics.types);
    record_write(&analytics.path, &content, &strands, report)
}

/// Whether any strand besides section headers survived validation.
fn has_content(strands: &[Strand]) -> bool {
    strands.iter().any(|strand| !strand.is_header())
}

fn fetch_source<F: Fetcher + ?Sized>(
    fetcher: &F,
    source: &Source,
    report: &mut Report,
) -> Option<String> {
    match fetcher.fetch(source) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("{}: download failed, source skipped: {}", source.title, e);
            report.skipped_sources.push(source.title.clone());
            None
        }
    }
}

fn record_write(
    path: &str,
    content: &str,
    strands: &[Strand],
    report: &mut Report,
) -> Result<(), Error> {
    let path = PathBuf::from(path);
    write_file(&path, content)?;

    let count = strands.iter().filter(|s| !s.is_header()).count();
    info!("wrote {} ({} strands)", path.display(), count);
    report.files.push(WrittenFile {
        path,
        strands: count,
    });
    Ok(())
}

/// Writes a generated file, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct NoNetwork;

    impl Fetcher for NoNetwork {
        fn fetch(&self, source: &Source) -> Result<String, Error> {
            Err(Error::HttpStatus {
                source_name: source.title.clone(),
                status: 503,
            })
        }
    }

    fn config(json: &str) -> Config {
        Config::from_reader(std::io::Cursor::new(json)).unwrap()
    }

    #[test]
    fn test_unknown_platform_fails_before_fetching() {
        let err = run(&config(r#"{ "platform": "Symbian" }"#), &NoNetwork).unwrap_err();
        assert!(matches!(err, Error::UnknownPlatform(_)));
    }

    #[test]
    fn test_missing_sections_are_not_errors() {
        let report = run(&config(r#"{ "platform": "iOS" }"#), &NoNetwork).unwrap();
        assert_eq!(report, Report::default());
    }

    #[test]
    fn test_android_analytics_requires_package_name() {
        let json = r#"{
            "platform": "Android",
            "analytics": { "sources": [], "path": "Analytics.kt" }
        }"#;
        let err = run(&config(json), &NoNetwork).unwrap_err();
        assert!(matches!(err, Error::MissingPackageName));
    }

    #[test]
    fn test_failed_downloads_write_nothing() {
        let json = r#"{
            "platform": "Web",
            "strings": {
                "languages": [{ "id": "en", "path": "en.json" }],
                "sources": [{ "title": "Main", "url": "https://example.invalid/main.csv" }]
            }
        }"#;
        let report = run(&config(json), &NoNetwork).unwrap();
        assert!(report.files.is_empty());
        assert_eq!(report.skipped_sources, vec!["Main".to_string()]);
    }

    struct Serve(&'static str);

    impl Fetcher for Serve {
        fn fetch(&self, _source: &Source) -> Result<String, Error> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_nothing_left_after_validation_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        let json = serde_json::json!({
            "platform": "Web",
            "strings": {
                "languages": [{ "id": "en", "path": path.to_string_lossy() }],
                "sources": [{ "title": "Main", "url": "mem://main" }]
            }
        });
        let config: Config = serde_json::from_value(json).unwrap();

        let report = run(&config, &Serve("key,en\n### Intro ###\nhello\n")).unwrap();
        assert!(report.files.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("values-de").join("strings.xml");
        write_file(&path, "<resources/>\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<resources/>\n");
    }
}
