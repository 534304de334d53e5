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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OsDetectorError {
    #[error("unknown os.name: {0}")]
    UnknownOsName(String),

    #[error("unknown os.arch: {0}")]
    UnknownOsArch(String),

    #[error("{0}")]
    IllegalState(String),

    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, OsDetectorError>;
