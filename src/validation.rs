//! Validation passes over ingested strands.
//!
//! Passes only ever remove strands; survivors keep their relative order.
//! Header strands are never checked nor removed.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, warn};

use crate::types::{Language, Strand};

lazy_static! {
    static ref VALID_KEY: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

/// A reason a strand key cannot be used as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyViolation {
    ContainsSpace,
    InvalidCharacters,
}

impl KeyViolation {
    fn describe(&self) -> &'static str {
        match self {
            KeyViolation::ContainsSpace => "contains spaces",
            KeyViolation::InvalidCharacters => "contains characters outside [A-Za-z0-9_]",
        }
    }
}

/// Lists what is wrong with a key; empty for a valid key.
pub fn key_violations(key: &str) -> Vec<KeyViolation> {
    let mut violations = Vec::new();
    if VALID_KEY.is_match(key) {
        return violations;
    }
    if key.contains(' ') {
        violations.push(KeyViolation::ContainsSpace);
    }
    if key
        .chars()
        .any(|c| c != ' ' && !(c.is_ascii_alphanumeric() || c == '_'))
    {
        violations.push(KeyViolation::InvalidCharacters);
    }
    violations
}

/// Logs an error for every invalid key and returns the number of violations.
///
/// Offending strands are kept: the generated file will carry the bad key.
pub fn check_keys(strands: &[Strand]) -> usize {
    let mut count = 0;
    for strand in strands.iter().filter(|s| !s.is_header()) {
        for violation in key_violations(strand.key()) {
            error!("invalid key {}: {}", strand, violation.describe());
            count += 1;
        }
    }
    count
}

/// One pair of strands sharing a key; `removed` precedes `kept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate {
    pub removed: usize,
    pub kept: usize,
}

/// Finds string strands sharing a key.
pub fn find_duplicate_strings(strands: &[Strand]) -> Vec<Duplicate> {
    find_duplicates(strands, |strand| match strand {
        Strand::Language(s) => Some((s.key.as_str(), "")),
        _ => None,
    })
}

/// Finds analytics strands sharing both key and type.
pub fn find_duplicate_events(strands: &[Strand]) -> Vec<Duplicate> {
    find_duplicates(strands, |strand| match strand {
        Strand::Analytics(s) => Some((s.key.as_str(), s.kind.as_str())),
        _ => None,
    })
}

/// Pairwise scan: every pair with equal identity yields the earlier strand for removal.
fn find_duplicates<'a, F>(strands: &'a [Strand], identity: F) -> Vec<Duplicate>
where
    F: Fn(&'a Strand) -> Option<(&'a str, &'a str)>,
{
    let mut duplicates = Vec::new();
    for (i, first) in strands.iter().enumerate() {
        let Some(first_id) = identity(first) else {
            continue;
        };
        for (j, second) in strands.iter().enumerate().skip(i + 1) {
            if identity(second) == Some(first_id) {
                duplicates.push(Duplicate {
                    removed: i,
                    kept: j,
                });
            }
        }
    }
    duplicates
}

/// Drops the earlier strand of every duplicate pair, warning about each pair.
pub fn remove_duplicates(strands: Vec<Strand>, duplicates: &[Duplicate]) -> Vec<Strand> {
    if duplicates.is_empty() {
        return strands;
    }

    for duplicate in duplicates {
        warn!(
            "{}",
            duplicate_message(&strands[duplicate.removed], &strands[duplicate.kept])
        );
    }

    let removed: HashSet<usize> = duplicates.iter().map(|d| d.removed).collect();
    strands
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !removed.contains(index))
        .map(|(_, strand)| strand)
        .collect()
}

/// Removes string strands without any translation and warns about incomplete ones.
pub fn check_translations(strands: Vec<Strand>, languages: &[Language]) -> Vec<Strand> {
    strands
        .into_iter()
        .filter(|strand| {
            let Strand::Language(s) = strand else {
                return true;
            };
            if s.translations.is_empty() {
                warn!("{} has no translations, removed", strand);
                return false;
            }
            if let Some(message) = incomplete_message(strand, languages) {
                warn!("{}", message);
            }
            true
        })
        .collect()
}

pub fn duplicate_message(removed: &Strand, kept: &Strand) -> String {
    format!(
        "duplicate key `{}`: line {} ({}) is overridden by line {} ({})",
        removed.key(),
        removed.line_number(),
        removed.source_name(),
        kept.line_number(),
        kept.source_name()
    )
}

/// The warning for a string strand lacking some languages; `None` when complete.
pub fn incomplete_message(strand: &Strand, languages: &[Language]) -> Option<String> {
    let Strand::Language(s) = strand else {
        return None;
    };
    let missing = languages
        .iter()
        .filter(|language| !s.translations.contains_key(&language.id))
        .map(|language| language.id.as_str())
        .collect::<Vec<_>>();
    if missing.is_empty() {
        return None;
    }
    Some(format!(
        "{} is missing translations for: {}",
        strand,
        missing.join(", ")
    ))
}
