//! Raw data access used by the detector.
//!
//! The detector never touches the host directly. It reads named properties
//! through a [`PropertySource`] and release metadata files through a
//! [`FileSource`]. Two interchangeable strategies are provided:
//!
//! - immediate: [`SystemProperties`] + [`HostFiles`], which read and write
//!   the live property namespace and file system on every call
//! - cached: [`SnapshotProperties`] + [`CachedFiles`], which freeze the
//!   property namespace and memoize every file read

mod files;
mod host;
mod properties;

pub use files::{CachedFiles, HostFiles};
pub use host::{host_os_arch, host_os_name, host_os_version, host_properties};
pub use properties::{SnapshotProperties, SystemProperties, parse_property_override};

use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::Path;

/// Read/write access to a flat namespace of named string properties.
pub trait PropertySource: Send + Sync {
    /// Returns the value of `name`, or `None` if it is not set.
    fn get_property(&self, name: &str) -> Option<String>;

    /// Returns the value of `name`, or `default` if it is not set.
    fn get_property_or(&self, name: &str, default: &str) -> String;

    /// Publishes `value` under `name`, returning the previous value if any.
    fn set_property(&self, name: &str, value: &str) -> Option<String>;
}

/// Read access to files by path.
pub trait FileSource: Send + Sync {
    /// Opens `path` for reading.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] when the file does not exist.
    fn read_file(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;
}

/// Selects which pair of sources the extension handle is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStrategy {
    #[default]
    Immediate,
    Cached,
}

impl std::fmt::Display for SourceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strategy = match self {
            SourceStrategy::Immediate => "immediate",
            SourceStrategy::Cached => "cached",
        };
        write!(f, "{strategy}")
    }
}
