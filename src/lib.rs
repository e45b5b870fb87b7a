//! Spreadsheet-to-source generator for localization strings and analytics events.
//!
//! CSV exports are downloaded per configured source, turned into strands (one
//! per row), validated, and rendered as platform files:
//!
//! - **Android**: `strings.xml` resources and a Kotlin constants file
//! - **iOS**: `.strings` files and a Swift constants file
//! - **Web**: JSON files
//!
//! ```rust,no_run
//! use strandgen::{Config, HttpFetcher, run};
//!
//! let config = Config::load("strandgen.json")?;
//! let report = run(&config, &HttpFetcher::new()?)?;
//! println!("{} files written", report.files.len());
//! # Ok::<(), strandgen::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod ingest;
pub mod pipeline;
pub mod platform;
pub mod types;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    error::Error,
    fetch::{Fetcher, HttpFetcher},
    pipeline::{Report, WrittenFile, run},
    platform::Platform,
    types::{AnalyticsStrand, HeaderStrand, Language, LanguageStrand, Source, Strand},
};
