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

use super::keys;
use super::normalize::Arch;
use crate::source::PropertySource;
use log::{debug, trace};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitness {
    Bits32,
    Bits64,
}

impl Bitness {
    pub fn bits(&self) -> u32 {
        match self {
            Bitness::Bits32 => 32,
            Bitness::Bits64 => 64,
        }
    }

    fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(Bitness::Bits32),
            64 => Some(Bitness::Bits64),
            _ => None,
        }
    }

    /// Resolves the bitness of the host.
    ///
    /// The JVM data model property is consulted first, then the IBM bit mode
    /// property. If neither yields a usable value the bitness is guessed from
    /// the architecture token: anything containing `64` is 64-bit.
    pub fn resolve(properties: &dyn PropertySource, arch: Arch) -> Self {
        for key in [keys::DATA_MODEL, keys::IBM_BIT_MODE] {
            let value = properties.get_property_or(key, "");
            if let Some(bitness) = parse_usable(&value) {
                debug!("Bitness {bitness} taken from {key}");
                return bitness;
            }
            trace!("Property {key}='{value}' is not a usable bitness");
        }

        Self::guess_from_arch(arch)
    }

    pub fn guess_from_arch(arch: Arch) -> Self {
        if arch.as_str().contains("64") {
            Bitness::Bits64
        } else {
            Bitness::Bits32
        }
    }
}

/// A usable value is non-empty, digits only, and names a supported width.
fn parse_usable(value: &str) -> Option<Bitness> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    value.parse::<u32>().ok().and_then(Bitness::from_bits)
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for Bitness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}
