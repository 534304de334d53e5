// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Linux distribution identity.
//!
//! Release information is read from `/etc/os-release` or
//! `/usr/lib/os-release`, falling back to the legacy `/etc/redhat-release`
//! used by older Red Hat derivatives. Missing or unreadable files are a
//! normal outcome and never surface as errors.

use crate::source::FileSource;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

pub const OS_RELEASE_FILES: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];
pub const REDHAT_RELEASE_FILE: &str = "/etc/redhat-release";

const ID_PREFIX: &str = "ID=";
const ID_LIKE_PREFIX: &str = "ID_LIKE=";
const VERSION_ID_PREFIX: &str = "VERSION_ID=";

/// Families every legacy Red Hat release is assumed to be like.
const DEFAULT_REDHAT_VARIANTS: [&str; 2] = ["rhel", "fedora"];

static REDHAT_MAJOR_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)").expect("major version pattern must be a valid regex"));

/// Ordered set of distribution family tokens, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LikeSet(Vec<String>);

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `token` unless already present. Returns whether it was added.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.0.push(token);
        true
    }

    /// Places `token` at the front, moving it there if already present.
    pub fn insert_first(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.0.retain(|t| *t != token);
        self.0.insert(0, token);
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LikeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LikeSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// Identity of a Linux distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinuxRelease {
    pub id: String,
    pub version: Option<String>,
    pub like: LikeSet,
}

impl LinuxRelease {
    /// Returns `true` if this release is a variant of `base_release`
    /// (for example, ubuntu is like debian). Every release is like itself.
    pub fn is_like(&self, base_release: &str) -> bool {
        self.like.contains(base_release)
    }
}

/// Resolves the release of the Linux host, trying the os-release files in
/// order and then the legacy Red Hat release file.
pub fn resolve(files: &dyn FileSource) -> Option<LinuxRelease> {
    for path in OS_RELEASE_FILES {
        if let Some(release) = parse_os_release_file(files, Path::new(path)) {
            return Some(release);
        }
    }

    debug!("No os-release data found, trying {REDHAT_RELEASE_FILE}");
    parse_redhat_release_file(files, Path::new(REDHAT_RELEASE_FILE))
}

/// Reads every line of `path`, feeding each to `on_line`.
///
/// Invalid UTF-8 is replaced rather than rejected, so one bad byte only
/// affects its own line. A file that cannot be opened is skipped. A read
/// error part way through stops the scan but keeps whatever was already
/// consumed.
fn scan_lines(files: &dyn FileSource, path: &Path, mut on_line: impl FnMut(&str)) {
    let reader = match files.read_file(path) {
        Ok(reader) => reader,
        Err(e) => {
            debug!("Cannot read {path:?}: {e}");
            return;
        }
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => on_line(&String::from_utf8_lossy(strip_line_ending(&buf))),
            Err(e) => {
                debug!("Stopped reading {path:?}: {e}");
                break;
            }
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parses an os-release formatted file.
///
/// Returns `None` if the file is unreadable or contains no `ID=` line.
pub fn parse_os_release_file(files: &dyn FileSource, path: &Path) -> Option<LinuxRelease> {
    let mut id: Option<String> = None;
    let mut version: Option<String> = None;
    let mut like = LikeSet::new();

    scan_lines(files, path, |line| {
        if let Some(value) = line.strip_prefix(ID_PREFIX) {
            let value = normalize_os_release_value(value);
            like.insert_first(value.clone());
            id = Some(value);
        } else if let Some(value) = line.strip_prefix(VERSION_ID_PREFIX) {
            version = Some(normalize_os_release_value(value));
        } else if let Some(value) = line.strip_prefix(ID_LIKE_PREFIX) {
            for token in normalize_os_release_value(value).split_whitespace() {
                like.insert(token);
            }
        }
    });

    let id = id?;
    debug!("Parsed {path:?}: id={id}");
    Some(LinuxRelease { id, version, like })
}

/// Parses a legacy `redhat-release` file such as
/// `CentOS release 7.9.2009 (Core)`.
///
/// Returns `None` if the file is unreadable or no line names a supported
/// distribution.
pub fn parse_redhat_release_file(files: &dyn FileSource, path: &Path) -> Option<LinuxRelease> {
    let mut id: Option<&'static str> = None;
    let mut version: Option<String> = None;
    let mut like: LikeSet = DEFAULT_REDHAT_VARIANTS.into_iter().collect();

    scan_lines(files, path, |line| {
        let line = line.to_lowercase();

        let line_id = if line.contains("centos") {
            "centos"
        } else if line.contains("fedora") {
            "fedora"
        } else if line.contains("red hat enterprise linux") {
            "rhel"
        } else {
            // Other variants are not supported.
            return;
        };

        if let Some(captures) = REDHAT_MAJOR_VERSION_REGEX.captures(&line) {
            version = Some(captures[1].to_string());
        }
        like.insert(line_id);
        id = Some(line_id);
    });

    let id = id?;
    debug!("Parsed {path:?}: id={id}");
    Some(LinuxRelease {
        id: id.to_string(),
        version,
        like,
    })
}

/// Trims whitespace and removes any quotes from an os-release value.
fn normalize_os_release_value(value: &str) -> String {
    value.trim().replace(['"', '\''], "")
}
