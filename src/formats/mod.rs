//! Platform writers.
//!
//! Every generated file is a header, a sequence of body fragments, and a
//! footer. Body fragments are rendered one strand at a time; a strand that
//! fails to render is logged and left out without stopping the others.

pub mod android;
pub mod ios;
pub mod web;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, warn};

use crate::{
    error::Error,
    platform::Platform,
    types::{AnalyticsStrand, Strand},
};

lazy_static! {
    static ref HTML_MARKER: Regex = Regex::new(r"(?i)</?html>").unwrap();
    static ref HTML_OPEN: Regex = Regex::new(r"(?i)<html>").unwrap();
    static ref HTML_CLOSE: Regex = Regex::new(r"(?i)</html>").unwrap();
}

/// Layout of a strings file for one language.
pub trait StringsFormat {
    fn header(&self) -> Result<String, Error> {
        Ok(String::new())
    }

    /// Section comment for a header strand; `None` when the format has no comments.
    fn comment(&self, text: &str) -> Result<Option<String>, Error>;

    /// Platform escaping, applied after [`prepare_value`].
    fn escape(&self, value: &str) -> String;

    fn entry(&self, key: &str, value: &str) -> Result<String, Error>;

    /// Whether entries with blank values are still written.
    fn keeps_blank_values(&self) -> bool {
        false
    }

    /// Placed between consecutive body fragments.
    fn separator(&self) -> &'static str {
        ""
    }

    fn footer(&self, is_empty: bool) -> String;
}

/// Layout of the analytics constants file.
pub trait AnalyticsFormat {
    fn render(&self, groups: &[EventGroup<'_>]) -> String;
}

/// Analytics strands sharing a type; `kind` is `None` for the ungrouped events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGroup<'a> {
    pub kind: Option<&'a str>,
    pub events: Vec<&'a AnalyticsStrand>,
}

pub fn strings_format(platform: Platform) -> Box<dyn StringsFormat> {
    match platform {
        Platform::Android => Box::new(android::Strings),
        Platform::Ios => Box::new(ios::Strings),
        Platform::Web => Box::new(web::Strings),
    }
}

/// The analytics layout for a platform. Android needs the Kotlin package name.
pub fn analytics_format(
    platform: Platform,
    package_name: Option<&str>,
) -> Result<Box<dyn AnalyticsFormat>, Error> {
    Ok(match platform {
        Platform::Android => {
            let package_name = package_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or(Error::MissingPackageName)?;
            Box::new(android::Analytics {
                package_name: package_name.to_string(),
            })
        }
        Platform::Ios => Box::new(ios::Analytics),
        Platform::Web => Box::new(web::Analytics),
    })
}

/// Transforms shared by every platform: trim, escape quotes, `(c)` to `©`, drop newlines.
pub fn prepare_value(value: &str) -> String {
    value
        .trim()
        .replace('"', "\\\"")
        .replace("(c)", "©")
        .replace(['\r', '\n'], "")
}

/// Escapes double quotes in a literal written between double quotes.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

pub(crate) fn is_html(value: &str) -> bool {
    HTML_MARKER.is_match(value)
}

pub(crate) fn strip_html_markers(value: &str) -> String {
    HTML_MARKER.replace_all(value, "").into_owned()
}

/// Swaps `<html>`/`</html>` for CDATA delimiters.
pub(crate) fn html_markers_to_cdata(value: &str) -> String {
    let opened = HTML_OPEN.replace_all(value, "<![CDATA[");
    HTML_CLOSE.replace_all(&opened, "]]>").into_owned()
}

/// Renders the strings file of one language.
///
/// Strands without a translation for `language` are left out, and so are
/// blank translations unless the format keeps them.
pub fn render_strings(
    format: &dyn StringsFormat,
    strands: &[Strand],
    language: &str,
) -> Result<String, Error> {
    let mut fragments = Vec::new();

    for strand in strands {
        let fragment = match strand {
            Strand::Header(header) => format.comment(&header.key),
            Strand::Language(s) => {
                let Some(raw) = s.translation(language) else {
                    continue;
                };
                if raw.trim().is_empty() && !format.keeps_blank_values() {
                    debug!("{} is blank in `{}`, skipped", strand, language);
                    continue;
                }
                let value = format.escape(&prepare_value(raw));
                format.entry(&s.key, &value).map(Some)
            }
            Strand::Analytics(_) => continue,
        };

        match fragment {
            Ok(Some(fragment)) => fragments.push(fragment),
            Ok(None) => {}
            Err(e) => error!("failed to write {}: {}", strand, e),
        }
    }

    let mut content = format.header()?;
    content.push_str(&fragments.join(format.separator()));
    content.push_str(&format.footer(fragments.is_empty()));
    Ok(content)
}

/// Groups analytics strands: ungrouped events first, then one group per
/// configured type in configured order. Empty groups are omitted.
pub fn group_events<'a>(strands: &'a [Strand], types: &'a [String]) -> Vec<EventGroup<'a>> {
    let events: Vec<&AnalyticsStrand> = strands
        .iter()
        .filter_map(|strand| match strand {
            Strand::Analytics(event) => Some(event),
            _ => None,
        })
        .collect();

    let mut groups = Vec::new();

    let untyped: Vec<_> = events
        .iter()
        .copied()
        .filter(|event| event.kind.trim().is_empty())
        .collect();
    if !untyped.is_empty() {
        groups.push(EventGroup {
            kind: None,
            events: untyped,
        });
    }

    for kind in types {
        let members: Vec<_> = events
            .iter()
            .copied()
            .filter(|event| event.kind.trim().eq_ignore_ascii_case(kind.trim()))
            .collect();
        if !members.is_empty() {
            groups.push(EventGroup {
                kind: Some(kind.as_str()),
                events: members,
            });
        }
    }

    for event in &events {
        let kind = event.kind.trim();
        if !kind.is_empty() && !types.iter().any(|t| t.trim().eq_ignore_ascii_case(kind)) {
            warn!(
                "`{}` (line {}, source {}) has unknown type `{}`, not written",
                event.key, event.line_number, event.source_name, kind
            );
        }
    }

    groups
}

/// Renders the analytics file.
pub fn render_analytics(
    format: &dyn AnalyticsFormat,
    strands: &[Strand],
    types: &[String],
) -> String {
    format.render(&group_events(strands, types))
}
