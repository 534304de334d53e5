//! Raw platform values of the running host.
//!
//! The values mimic the strings a JVM reports for the corresponding system
//! properties, so that the normalization rules behave the same whether the
//! raw input came from this process or from a property override.

use super::{PropertySource, SystemProperties};
use crate::detector::keys;
use std::env;
use sysinfo::System;

/// Returns the raw operating system name of the running host.
pub fn host_os_name() -> String {
    match env::consts::OS {
        "linux" | "android" => "Linux".to_string(),
        "macos" => "Mac OS X".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        "solaris" | "illumos" => "SunOS".to_string(),
        "aix" => "AIX".to_string(),
        other => other.to_string(),
    }
}

/// Returns the raw CPU architecture name of the running host.
pub fn host_os_arch() -> String {
    let little_endian = cfg!(target_endian = "little");

    match env::consts::ARCH {
        "x86_64" => "amd64".to_string(),
        "powerpc" => "ppc".to_string(),
        "powerpc64" if little_endian => "ppc64le".to_string(),
        "powerpc64" => "ppc64".to_string(),
        "mips" if little_endian => "mipsel".to_string(),
        "mips64" if little_endian => "mips64el".to_string(),
        "sparc64" => "sparcv9".to_string(),
        other => other.to_string(),
    }
}

/// Returns the raw version string of the running operating system, if any.
///
/// macOS reports the product version (e.g. `14.1`), every other system the
/// kernel release (e.g. `6.5.0-21-generic`).
pub fn host_os_version() -> Option<String> {
    if cfg!(target_os = "macos") {
        System::os_version()
    } else {
        System::kernel_version()
    }
}

/// Builds a property namespace seeded with the raw values of the host.
pub fn host_properties() -> SystemProperties {
    let props = SystemProperties::new();

    props.set_property(keys::OS_NAME, &host_os_name());
    props.set_property(keys::OS_ARCH, &host_os_arch());
    if let Some(version) = host_os_version() {
        props.set_property(keys::OS_VERSION, &version);
    }

    let data_model = if cfg!(target_pointer_width = "64") {
        "64"
    } else {
        "32"
    };
    props.set_property(keys::DATA_MODEL, data_model);

    if let Ok(value) = env::var(keys::FAIL_ON_UNKNOWN_OS) {
        props.set_property(keys::FAIL_ON_UNKNOWN_OS, &value);
    }

    props
}
