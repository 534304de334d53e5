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

use crate::error::OsDetectorError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a OsDetectorError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a OsDetectorError) -> Self {
        let (suggestion, details) = match error {
            OsDetectorError::UnknownOsName(raw) => {
                let suggestion = Some(disable_strict_mode_hint());
                let details = Some(format!(
                    "The operating system name '{raw}' does not match any known platform."
                ));
                (suggestion, details)
            }
            OsDetectorError::UnknownOsArch(raw) => {
                let suggestion = Some(disable_strict_mode_hint());
                let details = Some(format!(
                    "The CPU architecture '{raw}' does not match any known platform."
                ));
                (suggestion, details)
            }
            OsDetectorError::IllegalState(_) => {
                let suggestion = Some(
                    "Configure the classifier likes before reading any detected value."
                        .to_string(),
                );
                (suggestion, None)
            }
            OsDetectorError::InvalidProperty(msg) => {
                let suggestion = Some(
                    "Properties must be given as 'key=value' (e.g., -D os.arch=amd64).".to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            OsDetectorError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check config.toml in your osdetector home and any OSDETECTOR_* environment \
                     variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            OsDetectorError::Config(e) => {
                let suggestion = Some(
                    "Check config.toml in your osdetector home and any OSDETECTOR_* environment \
                     variables."
                        .to_string(),
                );
                let details = Some(e.to_string());
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

fn disable_strict_mode_hint() -> String {
    let env_cmd = if cfg!(windows) {
        "set OSDETECTOR_FAIL_ON_UNKNOWN_OS=false"
    } else {
        "export OSDETECTOR_FAIL_ON_UNKNOWN_OS=false"
    };
    format!(
        "Pass '-D failOnUnknownOS=false' or '--no-fail-on-unknown' to report 'unknown' \
         instead.\n\nOr disable strict mode: {env_cmd}"
    )
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
