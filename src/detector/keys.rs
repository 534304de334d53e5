//! Property names read from and published to a [`PropertySource`].
//!
//! [`PropertySource`]: crate::source::PropertySource

// Raw inputs
pub const OS_NAME: &str = "os.name";
pub const OS_ARCH: &str = "os.arch";
pub const OS_VERSION: &str = "os.version";
pub const DATA_MODEL: &str = "sun.arch.data.model";
pub const IBM_BIT_MODE: &str = "com.ibm.vm.bitmode";
pub const FAIL_ON_UNKNOWN_OS: &str = "failOnUnknownOS";

// Published results
pub const DETECTED_NAME: &str = "os.detected.name";
pub const DETECTED_ARCH: &str = "os.detected.arch";
pub const DETECTED_BITNESS: &str = "os.detected.bitness";
pub const DETECTED_CLASSIFIER: &str = "os.detected.classifier";
pub const DETECTED_VERSION: &str = "os.detected.version";
pub const DETECTED_VERSION_MAJOR: &str = "os.detected.version.major";
pub const DETECTED_VERSION_MINOR: &str = "os.detected.version.minor";
pub const DETECTED_RELEASE: &str = "os.detected.release";
pub const DETECTED_RELEASE_VERSION: &str = "os.detected.release.version";
pub const DETECTED_RELEASE_LIKE_PREFIX: &str = "os.detected.release.like.";

/// Key of the flag marking the release as like `token`.
pub fn release_like(token: &str) -> String {
    format!("{DETECTED_RELEASE_LIKE_PREFIX}{token}")
}
