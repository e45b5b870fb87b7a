use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indoc::indoc;
use strandgen::{Config, Error, Fetcher, Source, run};
use tempfile::TempDir;

/// Serves CSV bodies by URL; unknown URLs answer 404.
#[derive(Default)]
struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, source: &Source) -> Result<String, Error> {
        self.bodies
            .get(&source.url)
            .cloned()
            .ok_or_else(|| Error::HttpStatus {
                source_name: source.title.clone(),
                status: 404,
            })
    }
}

fn path_str(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

fn strings_config(platform: &str, dir: &Path, languages: &[&str], urls: &[&str]) -> Config {
    let languages = languages
        .iter()
        .map(|id| serde_json::json!({ "id": id, "path": path_str(dir, &format!("{id}.out")) }))
        .collect::<Vec<_>>();
    let sources = urls
        .iter()
        .enumerate()
        .map(|(i, url)| serde_json::json!({ "title": format!("Sheet {}", i + 1), "url": url }))
        .collect::<Vec<_>>();
    let json = serde_json::json!({
        "platform": platform,
        "strings": { "languages": languages, "sources": sources }
    });
    serde_json::from_value(json).unwrap()
}

fn analytics_config(platform: &str, dir: &Path, types: &[&str], url: &str) -> Config {
    let json = serde_json::json!({
        "platform": platform,
        "analytics": {
            "packageName": "com.example.analytics",
            "types": types,
            "sources": [{ "title": "Events", "url": url }],
            "path": path_str(dir, "analytics.out")
        }
    });
    serde_json::from_value(json).unwrap()
}

const SHOWCASE_CSV: &str = "key,en,platforms\n\
### Common ###,,\n\
showcase,It's a test... (c) <html>ok</html>,\n\
greeting,Hello %s,\n";

#[test]
fn test_android_strings_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://main", SHOWCASE_CSV);
    let config = strings_config("Android", temp_dir.path(), &["en"], &["mem://main"]);

    let report = run(&config, &fetcher).unwrap();
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].strands, 2);

    let output = fs::read_to_string(temp_dir.path().join("en.out")).unwrap();
    assert_eq!(
        output,
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <!-- Common -->
                <string name="showcase">It\'s a test&#8230; © <![CDATA[ok]]></string>
                <string name="greeting">Hello %s</string>
            </resources>
        "#}
    );
}

#[test]
fn test_ios_strings_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://main", SHOWCASE_CSV);
    let config = strings_config("ios", temp_dir.path(), &["en"], &["mem://main"]);

    run(&config, &fetcher).unwrap();

    let output = fs::read_to_string(temp_dir.path().join("en.out")).unwrap();
    assert_eq!(
        output,
        indoc! {r#"
            /* Common */
            "showcase" = "It's a test... © ok";
            "greeting" = "Hello %@";
        "#}
    );
}

#[test]
fn test_platform_filter_and_duplicates_across_sources() {
    let temp_dir = TempDir::new().unwrap();
    let first = "key,en,de,platforms\n\
greeting,Hi,Hallo,\n\
mobile_only,Tap,Tippen,\"android, ios\"\n\
untranslated,,,\n";
    let second = "Platforms,DE,EN,KEY\n\
web,Willkommen,Welcome,greeting\n\
,,Only English,partial\n";
    let fetcher = StaticFetcher::default()
        .with("mem://first", first)
        .with("mem://second", second);
    let config = strings_config(
        "Web",
        temp_dir.path(),
        &["en", "de"],
        &["mem://first", "mem://second"],
    );

    let report = run(&config, &fetcher).unwrap();
    assert_eq!(report.files.len(), 2);
    assert!(report.skipped_sources.is_empty());

    let en: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("en.out")).unwrap())
            .unwrap();
    assert_eq!(
        en,
        serde_json::json!({ "untranslated": "", "greeting": "Welcome", "partial": "Only English" })
    );

    let de = fs::read_to_string(temp_dir.path().join("de.out")).unwrap();
    assert_eq!(
        de,
        indoc! {r#"
            {
              "untranslated": "",
              "greeting": "Willkommen",
              "partial": ""
            }
        "#}
    );
}

#[test]
fn test_empty_cells_are_written_on_web_only() {
    let temp_dir = TempDir::new().unwrap();
    let csv = "key,en\nhello,\nbye,Bye\n";
    let fetcher = StaticFetcher::default().with("mem://main", csv);

    let config = strings_config("Web", temp_dir.path(), &["en"], &["mem://main"]);
    let report = run(&config, &fetcher).unwrap();
    assert_eq!(report.files[0].strands, 2);
    let output = fs::read_to_string(temp_dir.path().join("en.out")).unwrap();
    assert_eq!(output, "{\n  \"hello\": \"\",\n  \"bye\": \"Bye\"\n}\n");

    let config = strings_config("iOS", temp_dir.path(), &["en"], &["mem://main"]);
    run(&config, &fetcher).unwrap();
    let output = fs::read_to_string(temp_dir.path().join("en.out")).unwrap();
    assert_eq!(output, "\"bye\" = \"Bye\";\n");
}

#[test]
fn test_missing_source_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://ok", "key,en\nhello,Hello\n");
    let config = strings_config(
        "Web",
        temp_dir.path(),
        &["en"],
        &["mem://missing", "mem://ok"],
    );

    let report = run(&config, &fetcher).unwrap();
    assert_eq!(report.skipped_sources, vec!["Sheet 1".to_string()]);
    assert_eq!(report.files[0].strands, 1);

    let output = fs::read_to_string(temp_dir.path().join("en.out")).unwrap();
    assert_eq!(output, "{\n  \"hello\": \"Hello\"\n}\n");
}

#[test]
fn test_unresolved_language_stops_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://main", "key,en\nhello,Hello\n");
    let config = strings_config("Web", temp_dir.path(), &["en", "fr"], &["mem://main"]);

    let err = run(&config, &fetcher).unwrap_err();
    assert!(matches!(err, Error::MissingLanguageColumn { ref language, .. } if language == "fr"));
    assert!(!temp_dir.path().join("en.out").exists());
}

const EVENTS_CSV: &str = "key,type,tag\n\
app_open,,app_open\n\
home,Screen,home_screen\n\
tap_buy,event,buy_tapped\n\
home,Screen,home_screen_v2\n\
broken,Event,\n";

#[test]
fn test_web_analytics_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://events", EVENTS_CSV);
    let config = analytics_config("Web", temp_dir.path(), &["Screen", "Event"], "mem://events");

    let report = run(&config, &fetcher).unwrap();
    assert_eq!(report.files[0].strands, 3);

    let output = fs::read_to_string(temp_dir.path().join("analytics.out")).unwrap();
    assert_eq!(
        output,
        indoc! {r#"
            {
              "app_open": "app_open",
              "screen": {
                "home": "home_screen_v2"
              },
              "event": {
                "tap_buy": "buy_tapped"
              }
            }
        "#}
    );
    serde_json::from_str::<serde_json::Value>(&output).unwrap();
}

#[test]
fn test_android_analytics_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://events", EVENTS_CSV);
    let config = analytics_config(
        "Android",
        temp_dir.path(),
        &["Screen", "Event"],
        "mem://events",
    );

    run(&config, &fetcher).unwrap();

    let output = fs::read_to_string(temp_dir.path().join("analytics.out")).unwrap();
    assert_eq!(
        output,
        indoc! {r#"
            package com.example.analytics

            const val APP_OPEN = "app_open"

            object Screen {
                const val HOME = "home_screen_v2"
            }

            object Event {
                const val TAP_BUY = "buy_tapped"
            }
        "#}
    );
}

#[test]
fn test_missing_tag_column_stops_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StaticFetcher::default().with("mem://events", "key,type\nopen,Screen\n");
    let config = analytics_config("iOS", temp_dir.path(), &["Screen"], "mem://events");

    let err = run(&config, &fetcher).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "tag"));
}
