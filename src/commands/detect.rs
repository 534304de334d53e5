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

use crate::config::OsDetectorConfig;
use crate::detector::DetectionResult;
use crate::error::Result;
use crate::extension::OsDetector;
use colored::Colorize;

/// How `detect` renders the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
    Properties,
}

pub struct DetectCommand {
    detector: OsDetector,
}

impl DetectCommand {
    pub fn new(config: &OsDetectorConfig) -> Result<Self> {
        Ok(Self {
            detector: OsDetector::from_config(config),
        })
    }

    pub fn execute(&self, format: OutputFormat) -> Result<()> {
        let result = self.detector.result()?;
        print!("{}", render(&result, format)?);
        Ok(())
    }
}

pub fn render(result: &DetectionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Summary => Ok(render_summary(result)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        OutputFormat::Properties => Ok(render_properties(result)),
    }
}

fn render_summary(result: &DetectionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", label("Classifier:"), result.classifier));

    let version = result
        .version
        .as_ref()
        .map(|v| format!(" (version {})", v.full))
        .unwrap_or_default();
    output.push_str(&format!("{} {}{version}\n", label("OS:"), result.name));

    output.push_str(&format!(
        "{} {} ({}-bit)\n",
        label("Arch:"),
        result.arch,
        result.bitness
    ));

    if let Some(release) = &result.release {
        let mut line = release.id.clone();
        if let Some(version) = &release.version {
            line.push(' ');
            line.push_str(version);
        }
        if !release.like.is_empty() {
            let like: Vec<&str> = release.like.iter().collect();
            line.push_str(&format!(" (like: {})", like.join(", ")));
        }
        output.push_str(&format!("{} {line}\n", label("Release:")));
    }

    output
}

fn render_properties(result: &DetectionResult) -> String {
    result
        .properties()
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}

fn label(text: &str) -> String {
    format!("{text:<11}").bold().to_string()
}
