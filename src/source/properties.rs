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

use super::PropertySource;
use crate::error::{OsDetectorError, Result};
use log::trace;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// Mutable, process-local property namespace.
///
/// Reads see every value published so far, including the ones written back
/// by the detector through [`PropertySource::set_property`].
#[derive(Debug, Default)]
pub struct SystemProperties {
    values: RwLock<BTreeMap<String, String>>,
}

impl SystemProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a namespace pre-populated with `values`.
    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns a copy of every property currently set.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PropertySource for SystemProperties {
    fn get_property(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn get_property_or(&self, name: &str, default: &str) -> String {
        self.get_property(name)
            .unwrap_or_else(|| default.to_string())
    }

    fn set_property(&self, name: &str, value: &str) -> Option<String> {
        trace!("Setting property {name}={value}");
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string())
    }
}

/// Read-only view of a property namespace frozen at construction time.
///
/// Publishing is a no-op so that repeated detections observe exactly the
/// same inputs.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProperties {
    values: BTreeMap<String, String>,
}

impl SnapshotProperties {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Freezes the current contents of `source`.
    pub fn capture(source: &SystemProperties) -> Self {
        Self::new(source.snapshot())
    }
}

impl PropertySource for SnapshotProperties {
    fn get_property(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn get_property_or(&self, name: &str, default: &str) -> String {
        self.values
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_property(&self, _name: &str, _value: &str) -> Option<String> {
        None
    }
}

/// Parses a `key=value` property override as given on the command line.
///
/// The value may be empty and may itself contain `=`.
pub fn parse_property_override(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        OsDetectorError::InvalidProperty(format!("missing '=' in '{raw}'"))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(OsDetectorError::InvalidProperty(format!(
            "empty property name in '{raw}'"
        )));
    }

    Ok((key.to_string(), value.to_string()))
}
