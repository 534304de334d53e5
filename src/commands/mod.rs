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

pub mod classifier;
pub mod detect;
pub mod release;

use crate::config::OsDetectorConfig;
use crate::error::Result;
use crate::source::{SourceStrategy, parse_property_override};
use std::path::PathBuf;

/// Global command line options that take precedence over the loaded
/// configuration.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Raw `key=value` property definitions
    pub defines: Vec<String>,
    pub likes: Vec<String>,
    pub root: Option<PathBuf>,
    pub no_fail_on_unknown: bool,
    pub cached: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut OsDetectorConfig) -> Result<()> {
        for define in &self.defines {
            let (key, value) = parse_property_override(define)?;
            config.properties.insert(key, value);
        }

        if !self.likes.is_empty() {
            config.classifier_with_likes = self.likes.clone();
        }

        if let Some(root) = &self.root {
            config.root = Some(root.clone());
        }

        if self.no_fail_on_unknown {
            config.fail_on_unknown_os = false;
        }

        if self.cached {
            config.source_strategy = SourceStrategy::Cached;
        }

        Ok(())
    }
}
