//! Target platform resolution.

use std::{fmt::Display, str::FromStr};

use crate::error::Error;

/// The platform whose source artifacts are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Web];

    /// Canonical display name, as written in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Web => "Web",
        }
    }

    /// Whether a platform-filter cell (e.g. `"ios, web"`) admits this platform.
    ///
    /// An empty filter admits every platform.
    pub fn is_admitted_by(&self, filter: &str) -> bool {
        let mut listed = filter
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .peekable();

        if listed.peek().is_none() {
            return true;
        }
        listed.any(|name| name.eq_ignore_ascii_case(self.name()))
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownPlatform(s.to_string()))
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("IOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(" Web ".parse::<Platform>().unwrap(), Platform::Web);
    }

    #[test]
    fn test_parse_unknown_platform_fails() {
        let err = "windows".parse::<Platform>().unwrap_err();
        assert!(matches!(err, Error::UnknownPlatform(ref name) if name == "windows"));
    }

    #[test]
    fn test_filter_admits_listed_platforms() {
        assert!(!Platform::Android.is_admitted_by("ios, web"));
        assert!(Platform::Ios.is_admitted_by("ios, web"));
        assert!(Platform::Web.is_admitted_by("IOS,WEB"));
    }

    #[test]
    fn test_empty_filter_admits_everything() {
        for platform in Platform::ALL {
            assert!(platform.is_admitted_by(""));
            assert!(platform.is_admitted_by(" , "));
        }
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(Platform::Ios.to_string(), "iOS");
    }
}
