//! iOS output: `Localizable.strings` and a Swift constants file.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    formats::{AnalyticsFormat, EventGroup, StringsFormat, escape_quotes, strip_html_markers},
};

lazy_static! {
    // `%s` and positional `%1$s`
    static ref STRING_PLACEHOLDER: Regex = Regex::new(r"([%$])s").unwrap();
}

/// Apple `.strings` file.
pub struct Strings;

impl StringsFormat for Strings {
    fn comment(&self, text: &str) -> Result<Option<String>, Error> {
        Ok(Some(format!("/* {text} */\n")))
    }

    fn escape(&self, value: &str) -> String {
        let value = STRING_PLACEHOLDER.replace_all(value, "${1}@");
        strip_html_markers(&value)
    }

    fn entry(&self, key: &str, value: &str) -> Result<String, Error> {
        Ok(format!("\"{key}\" = \"{value}\";\n"))
    }

    fn footer(&self, _is_empty: bool) -> String {
        String::new()
    }
}

/// Swift file with global constants, one `enum` namespace per event type.
pub struct Analytics;

impl AnalyticsFormat for Analytics {
    fn render(&self, groups: &[EventGroup<'_>]) -> String {
        let blocks: Vec<String> = groups
            .iter()
            .map(|group| match group.kind {
                None => group
                    .events
                    .iter()
                    .map(|event| format!("let {}\n", constant(&event.key, &event.tag)))
                    .collect(),
                Some(kind) => {
                    let members: String = group
                        .events
                        .iter()
                        .map(|event| format!("    static let {}\n", constant(&event.key, &event.tag)))
                        .collect();
                    format!("enum {kind} {{\n{members}}}\n")
                }
            })
            .collect();

        blocks.join("\n")
    }
}

fn constant(key: &str, tag: &str) -> String {
    format!("{} = \"{}\"", key.to_uppercase(), escape_quotes(tag))
}
