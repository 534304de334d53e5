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

//! Normalization of raw operating system and architecture names.
//!
//! Raw values are lower-cased and stripped of everything but `[a-z0-9]`
//! before being matched against an ordered rule table. The first matching
//! rule wins; rules are evaluated top to bottom and must stay in this order.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

pub const UNKNOWN: &str = "unknown";

/// Lower-cases `value` and removes every character outside `[a-z0-9]`.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsName {
    Aix,
    Hpux,
    Os400,
    Linux,
    Osx,
    FreeBsd,
    OpenBsd,
    NetBsd,
    SunOs,
    Windows,
    Zos,
    Unknown,
}

/// Prefix rules for operating system names.
const OS_RULES: &[(&[&str], OsName)] = &[
    (&["aix"], OsName::Aix),
    (&["hpux"], OsName::Hpux),
    (&["os400"], OsName::Os400),
    (&["linux"], OsName::Linux),
    (&["macosx", "osx"], OsName::Osx),
    (&["freebsd"], OsName::FreeBsd),
    (&["openbsd"], OsName::OpenBsd),
    (&["netbsd"], OsName::NetBsd),
    (&["solaris", "sunos"], OsName::SunOs),
    (&["windows"], OsName::Windows),
    (&["zos"], OsName::Zos),
];

impl OsName {
    /// Maps a raw operating system name onto its canonical token.
    ///
    /// ```
    /// use osdetector::detector::normalize::OsName;
    ///
    /// assert_eq!(OsName::normalize("Mac OS X"), OsName::Osx);
    /// assert_eq!(OsName::normalize("Windows 10"), OsName::Windows);
    /// assert_eq!(OsName::normalize("Plan 9"), OsName::Unknown);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let value = normalize(raw);

        OS_RULES
            .iter()
            .find(|(prefixes, _)| prefixes.iter().any(|p| value.starts_with(p)))
            .map(|(_, name)| *name)
            .unwrap_or(OsName::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsName::Aix => "aix",
            OsName::Hpux => "hpux",
            OsName::Os400 => "os400",
            OsName::Linux => "linux",
            OsName::Osx => "osx",
            OsName::FreeBsd => "freebsd",
            OsName::OpenBsd => "openbsd",
            OsName::NetBsd => "netbsd",
            OsName::SunOs => "sunos",
            OsName::Windows => "windows",
            OsName::Zos => "zos",
            OsName::Unknown => UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == OsName::Unknown
    }
}

impl fmt::Display for OsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OsName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    X86_32,
    Itanium64,
    Itanium32,
    Sparc32,
    Sparc64,
    Arm32,
    Aarch64,
    Mips32,
    Mipsel32,
    Mips64,
    Mipsel64,
    Ppc32,
    Ppcle32,
    Ppc64,
    Ppcle64,
    S390_32,
    S390_64,
    Riscv,
    Unknown,
}

/// Whole-value rules for architecture names.
const ARCH_RULES: &[(&str, Arch)] = &[
    ("^(x8664|amd64|ia32e|em64t|x64)$", Arch::X86_64),
    ("^(x8632|x86|i[3-6]86|ia32|x32)$", Arch::X86_32),
    ("^(ia64w?|itanium64)$", Arch::Itanium64),
    ("^ia64n$", Arch::Itanium32),
    ("^(sparc|sparc32)$", Arch::Sparc32),
    ("^(sparcv9|sparc64)$", Arch::Sparc64),
    ("^(arm|arm32)$", Arch::Arm32),
    ("^aarch64$", Arch::Aarch64),
    ("^(mips|mips32)$", Arch::Mips32),
    ("^(mipsel|mips32el)$", Arch::Mipsel32),
    ("^mips64$", Arch::Mips64),
    ("^mips64el$", Arch::Mipsel64),
    ("^(ppc|ppc32)$", Arch::Ppc32),
    ("^(ppcle|ppc32le)$", Arch::Ppcle32),
    ("^ppc64$", Arch::Ppc64),
    ("^ppc64le$", Arch::Ppcle64),
    ("^s390$", Arch::S390_32),
    ("^s390x$", Arch::S390_64),
    ("^riscv$", Arch::Riscv),
];

static ARCH_PATTERNS: LazyLock<Vec<(Regex, Arch)>> = LazyLock::new(|| {
    ARCH_RULES
        .iter()
        .map(|(pattern, arch)| {
            let regex = Regex::new(pattern).expect("architecture rule must be a valid regex");
            (regex, *arch)
        })
        .collect()
});

impl Arch {
    /// Maps a raw CPU architecture name onto its canonical token.
    ///
    /// ```
    /// use osdetector::detector::normalize::Arch;
    ///
    /// assert_eq!(Arch::normalize("amd64"), Arch::X86_64);
    /// assert_eq!(Arch::normalize("i686"), Arch::X86_32);
    /// assert_eq!(Arch::normalize("vax"), Arch::Unknown);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let value = normalize(raw);

        ARCH_PATTERNS
            .iter()
            .find(|(pattern, _)| pattern.is_match(&value))
            .map(|(_, arch)| *arch)
            .unwrap_or(Arch::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86_32 => "x86_32",
            Arch::Itanium64 => "itanium_64",
            Arch::Itanium32 => "itanium_32",
            Arch::Sparc32 => "sparc_32",
            Arch::Sparc64 => "sparc_64",
            Arch::Arm32 => "arm_32",
            Arch::Aarch64 => "aarch_64",
            Arch::Mips32 => "mips_32",
            Arch::Mipsel32 => "mipsel_32",
            Arch::Mips64 => "mips_64",
            Arch::Mipsel64 => "mipsel_64",
            Arch::Ppc32 => "ppc_32",
            Arch::Ppcle32 => "ppcle_32",
            Arch::Ppc64 => "ppc_64",
            Arch::Ppcle64 => "ppcle_64",
            Arch::S390_32 => "s390_32",
            Arch::S390_64 => "s390_64",
            Arch::Riscv => "riscv",
            Arch::Unknown => UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Arch::Unknown
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Arch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
