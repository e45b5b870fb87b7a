//! Android output: `strings.xml` resources and a Kotlin constants file.

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    formats::{
        AnalyticsFormat, EventGroup, StringsFormat, escape_quotes, html_markers_to_cdata, is_html,
    },
};

const INDENT: &str = "    ";

/// `res/values*/strings.xml`.
pub struct Strings;

impl StringsFormat for Strings {
    fn header(&self) -> Result<String, Error> {
        let mut xml_writer = Writer::new(Vec::new());
        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        into_string(xml_writer)
    }

    fn comment(&self, text: &str) -> Result<Option<String>, Error> {
        let mut xml_writer = Writer::new(Vec::new());
        xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
        let text = comment_text(text);
        xml_writer.write_event(Event::Comment(BytesText::from_escaped(format!(" {text} "))))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        into_string(xml_writer).map(Some)
    }

    /// Values flagged with `<html>` markers keep `&`, `<` and `>` verbatim inside CDATA.
    fn escape(&self, value: &str) -> String {
        let html = is_html(value);

        let mut escaped = if html {
            value.to_string()
        } else {
            value.replace('&', "&amp;")
        };
        escaped = escaped
            .replace('\'', "\\'")
            .replace('@', "\\@")
            .replace("...", "&#8230;")
            .replace('-', "&#8211;");

        if html {
            html_markers_to_cdata(&escaped)
        } else {
            escaped.replace('<', "&lt;").replace('>', "&gt;")
        }
    }

    fn entry(&self, key: &str, value: &str) -> Result<String, Error> {
        let mut elem = BytesStart::new("string");
        elem.push_attribute(("name", key));

        let mut xml_writer = Writer::new(Vec::new());
        xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
        xml_writer.write_event(Event::Start(elem))?;
        xml_writer.write_event(Event::Text(BytesText::from_escaped(value)))?;
        xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        into_string(xml_writer)
    }

    fn footer(&self, _is_empty: bool) -> String {
        "</resources>\n".to_string()
    }
}

/// XML comments may not contain `--`.
fn comment_text(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    text
}

fn into_string(xml_writer: Writer<Vec<u8>>) -> Result<String, Error> {
    String::from_utf8(xml_writer.into_inner())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Kotlin file with `const val` constants, one `object` per event type.
pub struct Analytics {
    pub package_name: String,
}

impl AnalyticsFormat for Analytics {
    fn render(&self, groups: &[EventGroup<'_>]) -> String {
        let mut content = format!("package {}\n", self.package_name);

        for group in groups {
            content.push('\n');
            match group.kind {
                None => {
                    for event in &group.events {
                        content.push_str(&constant(&event.key, &event.tag));
                        content.push('\n');
                    }
                }
                Some(kind) => {
                    content.push_str(&format!("object {kind} {{\n"));
                    for event in &group.events {
                        content.push_str(INDENT);
                        content.push_str(&constant(&event.key, &event.tag));
                        content.push('\n');
                    }
                    content.push_str("}\n");
                }
            }
        }

        content
    }
}

fn constant(key: &str, tag: &str) -> String {
    format!(
        "const val {} = \"{}\"",
        key.to_uppercase(),
        escape_quotes(tag)
    )
}
