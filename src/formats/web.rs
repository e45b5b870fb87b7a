//! Web output: flat JSON strings and nested JSON analytics.

use crate::{
    error::Error,
    formats::{AnalyticsFormat, EventGroup, StringsFormat, escape_quotes, strip_html_markers},
};

/// JSON object of key to translated value.
pub struct Strings;

impl StringsFormat for Strings {
    fn header(&self) -> Result<String, Error> {
        Ok("{\n".to_string())
    }

    fn comment(&self, _text: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    fn escape(&self, value: &str) -> String {
        strip_html_markers(value)
    }

    fn entry(&self, key: &str, value: &str) -> Result<String, Error> {
        Ok(format!("  \"{key}\": \"{value}\""))
    }

    fn keeps_blank_values(&self) -> bool {
        true
    }

    fn separator(&self) -> &'static str {
        ",\n"
    }

    fn footer(&self, is_empty: bool) -> String {
        if is_empty {
            "}\n".to_string()
        } else {
            "\n}\n".to_string()
        }
    }
}

/// JSON object with ungrouped events at the top level and one nested object per type.
pub struct Analytics;

impl AnalyticsFormat for Analytics {
    fn render(&self, groups: &[EventGroup<'_>]) -> String {
        let mut items = Vec::new();
        for group in groups {
            match group.kind {
                None => items.extend(group.events.iter().map(|event| {
                    format!("  \"{}\": \"{}\"", event.key, escape_quotes(&event.tag))
                })),
                Some(kind) => {
                    let members = group
                        .events
                        .iter()
                        .map(|event| {
                            format!("    \"{}\": \"{}\"", event.key, escape_quotes(&event.tag))
                        })
                        .collect::<Vec<_>>()
                        .join(",\n");
                    items.push(format!("  \"{}\": {{\n{}\n  }}", kind.to_lowercase(), members));
                }
            }
        }

        if items.is_empty() {
            "{\n}\n".to_string()
        } else {
            format!("{{\n{}\n}}\n", items.join(",\n"))
        }
    }
}
