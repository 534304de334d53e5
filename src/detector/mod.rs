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

//! Detection of the host platform.
//!
//! A single detection pass reads the raw `os.name`, `os.arch` and
//! `os.version` properties, normalizes them into canonical tokens, resolves
//! the bitness and, on Linux, the distribution release. Every derived value
//! is published back to the property source under an `os.detected.*` key
//! and collected into an immutable [`DetectionResult`].

pub mod bitness;
pub mod classifier;
pub mod keys;
pub mod normalize;
pub mod release;
pub mod version;

pub use bitness::Bitness;
pub use normalize::{Arch, OsName};
pub use release::{LikeSet, LinuxRelease};
pub use version::OsVersion;

use crate::error::{OsDetectorError, Result};
use crate::source::{FileSource, PropertySource};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// The outcome of one detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub name: OsName,
    pub arch: Arch,
    pub bitness: Bitness,
    pub version: Option<OsVersion>,
    pub classifier: String,
    pub release: Option<LinuxRelease>,
    #[serde(skip)]
    properties: BTreeMap<String, String>,
}

impl DetectionResult {
    /// Every `os.detected.*` property published during detection.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Runs detection against a pair of raw data sources.
pub struct Detector<'a> {
    properties: &'a dyn PropertySource,
    files: &'a dyn FileSource,
}

impl<'a> Detector<'a> {
    pub fn new(properties: &'a dyn PropertySource, files: &'a dyn FileSource) -> Self {
        Self { properties, files }
    }

    /// Detects the host platform.
    ///
    /// `classifier_with_likes` lists, in order of preference, the
    /// distribution families that may be appended to the classifier.
    ///
    /// Fails if the name or architecture is not recognized, unless the
    /// `failOnUnknownOS` property is set to `false`.
    pub fn detect(&self, classifier_with_likes: &[String]) -> Result<DetectionResult> {
        let mut published = BTreeMap::new();

        let os_name = self.properties.get_property(keys::OS_NAME);
        let os_arch = self.properties.get_property(keys::OS_ARCH);
        let os_version = self.properties.get_property(keys::OS_VERSION);
        debug!("Raw platform: os.name={os_name:?} os.arch={os_arch:?} os.version={os_version:?}");

        let name = OsName::normalize(os_name.as_deref().unwrap_or_default());
        let arch = Arch::normalize(os_arch.as_deref().unwrap_or_default());
        let bitness = Bitness::resolve(self.properties, arch);

        self.publish(&mut published, keys::DETECTED_NAME, name.as_str());
        self.publish(&mut published, keys::DETECTED_ARCH, arch.as_str());
        self.publish(&mut published, keys::DETECTED_BITNESS, &bitness.to_string());

        let version = os_version.as_deref().and_then(OsVersion::parse);
        if let Some(version) = &version {
            self.publish(&mut published, keys::DETECTED_VERSION, &version.full);
            self.publish(&mut published, keys::DETECTED_VERSION_MAJOR, &version.major);
            self.publish(&mut published, keys::DETECTED_VERSION_MINOR, &version.minor);
        }

        if self.fail_on_unknown_os() {
            if name.is_unknown() {
                return Err(OsDetectorError::UnknownOsName(display_raw(os_name)));
            }
            if arch.is_unknown() {
                return Err(OsDetectorError::UnknownOsArch(display_raw(os_arch)));
            }
        }

        let release = if name == OsName::Linux {
            release::resolve(self.files)
        } else {
            None
        };

        if let Some(release) = &release {
            self.publish(&mut published, keys::DETECTED_RELEASE, &release.id);
            if let Some(release_version) = &release.version {
                self.publish(&mut published, keys::DETECTED_RELEASE_VERSION, release_version);
            }
            for token in release.like.iter() {
                self.publish(&mut published, &keys::release_like(token), "true");
            }
        } else if name == OsName::Linux {
            debug!("No Linux release information available");
        }

        let classifier =
            classifier::assemble(name, arch, release.as_ref(), classifier_with_likes);
        self.publish(&mut published, keys::DETECTED_CLASSIFIER, &classifier);
        info!("Detected classifier {classifier}");

        Ok(DetectionResult {
            name,
            arch,
            bitness,
            version,
            classifier,
            release,
            properties: published,
        })
    }

    /// Strict mode is on unless `failOnUnknownOS` is explicitly `false`.
    fn fail_on_unknown_os(&self) -> bool {
        !self
            .properties
            .get_property(keys::FAIL_ON_UNKNOWN_OS)
            .is_some_and(|value| value.eq_ignore_ascii_case("false"))
    }

    fn publish(&self, published: &mut BTreeMap<String, String>, key: &str, value: &str) {
        debug!("{key}={value}");
        published.insert(key.to_string(), value.to_string());
        self.properties.set_property(key, value);
    }
}

fn display_raw(raw: Option<String>) -> String {
    raw.unwrap_or_else(|| "<unset>".to_string())
}
