#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INHERITED_VARS: &[&str] = &[
    "OSDETECTOR_CLASSIFIER_WITH_LIKES",
    "OSDETECTOR_FAIL_ON_UNKNOWN_OS",
    "OSDETECTOR_SOURCE_STRATEGY",
    "OSDETECTOR_ROOT",
    "failOnUnknownOS",
    "RUST_LOG",
];

/// Isolated osdetector home plus a fake system root for release files.
///
/// Both directories are removed when the value is dropped.
pub struct TestEnv {
    home: TempDir,
    root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create test home"),
            root: TempDir::new().expect("Failed to create test root"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Writes `contents` to `relative` below the fake system root.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        self
    }

    pub fn with_os_release(self, contents: &str) -> Self {
        self.with_file("etc/os-release", contents)
    }

    pub fn with_config(self, contents: &str) -> Self {
        fs::write(self.home.path().join("config.toml"), contents)
            .expect("Failed to write config.toml");
        self
    }

    /// Builds an `osdetector` invocation bound to this environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("osdetector").unwrap();
        cmd.env("OSDETECTOR_HOME", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }
        cmd.arg("--root").arg(self.root.path());
        cmd
    }

    /// Like [`TestEnv::command`], with the raw platform triad overridden.
    pub fn command_for(&self, name: &str, arch: &str, version: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("-D")
            .arg(format!("os.name={name}"))
            .arg("-D")
            .arg(format!("os.arch={arch}"))
            .arg("-D")
            .arg(format!("os.version={version}"));
        cmd
    }
}
