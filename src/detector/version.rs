use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([0-9]+)\.([0-9]+)).*$").expect("version pattern must be a valid regex")
});

/// The `major.minor` prefix of a raw operating system version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsVersion {
    pub full: String,
    pub major: String,
    pub minor: String,
}

impl OsVersion {
    /// Extracts `major.minor` from the start of `raw`.
    ///
    /// Returns `None` when `raw` does not begin with two dot-separated digit
    /// groups; this is not an error.
    ///
    /// ```
    /// use osdetector::detector::version::OsVersion;
    ///
    /// let version = OsVersion::parse("10.15.7").unwrap();
    /// assert_eq!(version.full, "10.15");
    /// assert_eq!(version.major, "10");
    /// assert_eq!(version.minor, "15");
    ///
    /// assert!(OsVersion::parse("unknown").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = VERSION_REGEX.captures(raw)?;

        Some(OsVersion {
            full: captures[1].to_string(),
            major: captures[2].to_string(),
            minor: captures[3].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kernel_release() {
        let version = OsVersion::parse("5.15.0-91-generic").unwrap();
        assert_eq!(version.full, "5.15");
        assert_eq!(version.major, "5");
        assert_eq!(version.minor, "15");
    }

    #[test]
    fn test_parse_exact_major_minor() {
        let version = OsVersion::parse("10.0").unwrap();
        assert_eq!(version.full, "10.0");
        assert_eq!(version.major, "10");
        assert_eq!(version.minor, "0");
    }

    #[test]
    fn test_parse_rejects_non_matching() {
        assert!(OsVersion::parse("unknown").is_none());
        assert!(OsVersion::parse("").is_none());
        assert!(OsVersion::parse("10").is_none());
        assert!(OsVersion::parse("10.").is_none());
        assert!(OsVersion::parse("v10.15").is_none());
        assert!(OsVersion::parse(".15").is_none());
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        assert!(OsVersion::parse("\u{0661}\u{0660}.\u{0662}").is_none());
        assert!(OsVersion::parse("\u{FF11}\u{FF10}.1").is_none());
    }

    #[test]
    fn test_parse_rejects_multiline_tail() {
        assert!(OsVersion::parse("10.15\nextra").is_none());
    }
}
