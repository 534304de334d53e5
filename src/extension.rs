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

//! Build-tool facing handle over the detector.
//!
//! [`OsDetector`] computes the detection result on first access and hands
//! out the same cached result afterwards. The classifier likes can only be
//! configured before that first access.

use crate::config::OsDetectorConfig;
use crate::detector::{
    Arch, Bitness, DetectionResult, Detector, LinuxRelease, OsName, OsVersion, keys,
};
use crate::error::{OsDetectorError, Result};
use crate::source::{
    CachedFiles, FileSource, HostFiles, PropertySource, SnapshotProperties, SourceStrategy,
    host_properties,
};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const LIKES_AFTER_READ: &str = "classifierWithLikes must be set before osdetector is read.";

#[derive(Default)]
struct State {
    classifier_with_likes: Vec<String>,
    result: Option<Arc<DetectionResult>>,
}

pub struct OsDetector {
    properties: Box<dyn PropertySource>,
    files: Box<dyn FileSource>,
    state: Mutex<State>,
}

impl OsDetector {
    pub fn new(properties: Box<dyn PropertySource>, files: Box<dyn FileSource>) -> Self {
        Self {
            properties,
            files,
            state: Mutex::new(State::default()),
        }
    }

    /// Builds a detector for the running host as described by `config`.
    pub fn from_config(config: &OsDetectorConfig) -> Self {
        let props = host_properties();
        for (key, value) in &config.properties {
            props.set_property(key, value);
        }
        if !config.fail_on_unknown_os {
            props.set_property(keys::FAIL_ON_UNKNOWN_OS, "false");
        }

        let host_files = match &config.root {
            Some(root) => HostFiles::with_root(root),
            None => HostFiles::new(),
        };

        debug!("Using {} sources", config.source_strategy);
        let (properties, files): (Box<dyn PropertySource>, Box<dyn FileSource>) =
            match config.source_strategy {
                SourceStrategy::Immediate => (Box::new(props), Box::new(host_files)),
                SourceStrategy::Cached => (
                    Box::new(SnapshotProperties::capture(&props)),
                    Box::new(CachedFiles::new(host_files)),
                ),
            };

        let detector = Self::new(properties, files);
        detector.lock().classifier_with_likes = config.classifier_with_likes.clone();
        detector
    }

    /// Sets the distribution families, in order of preference, that may be
    /// appended to the classifier.
    ///
    /// Fails once any detected value has been read.
    pub fn set_classifier_with_likes(&self, classifier_with_likes: Vec<String>) -> Result<()> {
        let mut state = self.lock();
        if state.result.is_some() {
            return Err(OsDetectorError::IllegalState(LIKES_AFTER_READ.to_string()));
        }
        state.classifier_with_likes = classifier_with_likes;
        Ok(())
    }

    /// Returns the detection result, computing it on first use.
    ///
    /// A failed detection is not cached; the next call tries again.
    pub fn result(&self) -> Result<Arc<DetectionResult>> {
        let mut state = self.lock();

        if let Some(result) = &state.result {
            return Ok(Arc::clone(result));
        }

        let detector = Detector::new(self.properties.as_ref(), self.files.as_ref());
        let result = Arc::new(detector.detect(&state.classifier_with_likes)?);
        state.result = Some(Arc::clone(&result));
        Ok(result)
    }

    pub fn os(&self) -> Result<OsName> {
        Ok(self.result()?.name)
    }

    pub fn arch(&self) -> Result<Arch> {
        Ok(self.result()?.arch)
    }

    pub fn bitness(&self) -> Result<Bitness> {
        Ok(self.result()?.bitness)
    }

    pub fn classifier(&self) -> Result<String> {
        Ok(self.result()?.classifier.clone())
    }

    pub fn version(&self) -> Result<Option<OsVersion>> {
        Ok(self.result()?.version.clone())
    }

    /// Returns release information, or `None` when not on Linux or when no
    /// release file could be parsed.
    pub fn release(&self) -> Result<Option<Release>> {
        let result = self.result()?;
        if result.release.is_none() {
            return Ok(None);
        }
        Ok(Some(Release { result }))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Accessor to information about the current OS release.
#[derive(Debug, Clone)]
pub struct Release {
    result: Arc<DetectionResult>,
}

impl Release {
    fn inner(&self) -> Option<&LinuxRelease> {
        self.result.release.as_ref()
    }

    /// Returns the release ID.
    pub fn id(&self) -> &str {
        self.inner().map(|r| r.id.as_str()).unwrap_or_default()
    }

    /// Returns the version ID.
    pub fn version(&self) -> Option<&str> {
        self.inner().and_then(|r| r.version.as_deref())
    }

    /// Returns `true` if this release is a variant of the given base release
    /// (for example, ubuntu is "like" debian).
    pub fn is_like(&self, base_release: &str) -> bool {
        self.result
            .property(&keys::release_like(base_release))
            .is_some()
    }
}
