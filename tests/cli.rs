use predicates::prelude::*;

mod common;
use common::TestEnv;

const UBUNTU_OS_RELEASE: &str = "NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\nVERSION_ID=\"22.04\"\n";
const ROCKY_OS_RELEASE: &str = "ID=\"rocky\"\nID_LIKE=\"rhel centos fedora\"\nVERSION_ID=\"9.3\"\n";

#[test]
fn test_help() {
    let env = TestEnv::new();
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("classifier"))
        .stdout(predicate::str::contains("release"));
}

#[test]
fn test_classifier_host() {
    // Whatever the host is, a classifier has the form <os>-<arch>
    let env = TestEnv::new();
    env.command()
        .args(["--no-fail-on-unknown", "classifier"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[a-z0-9_]+-[a-z0-9_]+(-[a-z0-9_]+)?\n$").unwrap());
}

#[test]
fn test_classifier_macos() {
    let env = TestEnv::new();
    env.command_for("Mac OS X", "aarch64", "14.1.2")
        .arg("classifier")
        .assert()
        .success()
        .stdout("osx-aarch_64\n");
}

#[test]
fn test_classifier_windows_32bit() {
    let env = TestEnv::new();
    env.command_for("Windows 10", "x86", "10.0")
        .args(["-D", "sun.arch.data.model=32", "classifier"])
        .assert()
        .success()
        .stdout("windows-x86_32\n");
}

#[test]
fn test_classifier_with_like() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Linux", "amd64", "5.15.0-91-generic")
        .args(["--like", "fedora", "--like", "debian", "classifier"])
        .assert()
        .success()
        .stdout("linux-x86_64-debian\n");
}

#[test]
fn test_classifier_like_not_matching() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Linux", "amd64", "5.15.0-91-generic")
        .args(["--like", "fedora", "classifier"])
        .assert()
        .success()
        .stdout("linux-x86_64\n");
}

#[test]
fn test_classifier_legacy_redhat_release() {
    let env = TestEnv::new().with_file("etc/redhat-release", "CentOS Linux release 7.9.2009 (Core)\n");
    env.command_for("Linux", "amd64", "3.10.0-1160.el7.x86_64")
        .args(["--like", "rhel", "classifier"])
        .assert()
        .success()
        .stdout("linux-x86_64-rhel\n");
}

#[test]
fn test_classifier_likes_from_config_file() {
    let env = TestEnv::new()
        .with_os_release(ROCKY_OS_RELEASE)
        .with_config("classifier_with_likes = [\"fedora\", \"rhel\"]\n");
    env.command_for("Linux", "aarch64", "5.14.0")
        .arg("classifier")
        .assert()
        .success()
        .stdout("linux-aarch_64-fedora\n");
}

#[test]
fn test_command_line_likes_override_config() {
    let env = TestEnv::new()
        .with_os_release(ROCKY_OS_RELEASE)
        .with_config("classifier_with_likes = [\"fedora\"]\n");
    env.command_for("Linux", "aarch64", "5.14.0")
        .args(["--like", "rhel", "classifier"])
        .assert()
        .success()
        .stdout("linux-aarch_64-rhel\n");
}

#[test]
fn test_unknown_os_fails() {
    let env = TestEnv::new();
    env.command_for("plan9", "amd64", "4.0")
        .arg("classifier")
        .assert()
        .failure()
        .code(3)
        .stdout("")
        .stderr(predicate::str::contains("unknown os.name: plan9"))
        .stderr(predicate::str::contains("failOnUnknownOS=false"));
}

#[test]
fn test_unknown_arch_fails() {
    let env = TestEnv::new();
    env.command_for("Linux", "vax", "5.15")
        .arg("classifier")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown os.arch: vax"));
}

#[test]
fn test_unknown_os_allowed_by_flag() {
    let env = TestEnv::new();
    env.command_for("plan9", "amd64", "4.0")
        .args(["--no-fail-on-unknown", "classifier"])
        .assert()
        .success()
        .stdout("unknown-x86_64\n");
}

#[test]
fn test_unknown_os_allowed_by_property() {
    let env = TestEnv::new();
    env.command_for("plan9", "vax", "4.0")
        .args(["-D", "failOnUnknownOS=FALSE", "classifier"])
        .assert()
        .success()
        .stdout("unknown-unknown\n");
}

#[test]
fn test_unknown_os_allowed_by_environment() {
    let env = TestEnv::new();
    env.command_for("plan9", "amd64", "4.0")
        .env("OSDETECTOR_FAIL_ON_UNKNOWN_OS", "false")
        .arg("classifier")
        .assert()
        .success()
        .stdout("unknown-x86_64\n");
}

#[test]
fn test_malformed_define() {
    let env = TestEnv::new();
    env.command()
        .args(["-D", "os.name", "classifier"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("os.name"));
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new().with_config("fail_on_unknown_os = \"maybe\"\n");
    env.command()
        .arg("classifier")
        .assert()
        .code(2);
}

#[test]
fn test_detect_summary() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Linux", "amd64", "5.15.0-91-generic")
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("linux-x86_64"))
        .stdout(predicate::str::contains("version 5.15"))
        .stdout(predicate::str::contains("64-bit"))
        .stdout(predicate::str::contains("ubuntu 22.04 (like: ubuntu, debian)"));
}

#[test]
fn test_detect_json() {
    let env = TestEnv::new().with_os_release(ROCKY_OS_RELEASE);
    let output = env
        .command_for("Linux", "ppc64le", "5.14.0-362.el9.ppc64le")
        .args(["--like", "rhel", "detect", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "linux");
    assert_eq!(json["arch"], "ppcle_64");
    assert_eq!(json["bitness"], 64);
    assert_eq!(json["classifier"], "linux-ppcle_64-rhel");
    assert_eq!(json["version"]["full"], "5.14");
    assert_eq!(json["release"]["id"], "rocky");
    assert_eq!(json["release"]["version"], "9.3");
    assert_eq!(json["release"]["like"][0], "rocky");
}

#[test]
fn test_detect_json_conflicts_with_properties() {
    let env = TestEnv::new();
    env.command()
        .args(["detect", "--json", "--properties"])
        .assert()
        .failure();
}

#[test]
fn test_detect_properties() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Linux", "aarch64", "6.1.0")
        .args(["detect", "--properties"])
        .assert()
        .success()
        .stdout(predicate::str::contains("os.detected.name=linux\n"))
        .stdout(predicate::str::contains("os.detected.arch=aarch_64\n"))
        .stdout(predicate::str::contains("os.detected.bitness=64\n"))
        .stdout(predicate::str::contains("os.detected.version.major=6\n"))
        .stdout(predicate::str::contains("os.detected.release=ubuntu\n"))
        .stdout(predicate::str::contains("os.detected.release.version=22.04\n"))
        .stdout(predicate::str::contains("os.detected.release.like.debian=true\n"))
        .stdout(predicate::str::contains("os.detected.classifier=linux-aarch_64\n"));
}

#[test]
fn test_detect_cached_strategy() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Linux", "amd64", "5.15")
        .args(["--cached", "--like", "debian", "classifier"])
        .assert()
        .success()
        .stdout("linux-x86_64-debian\n");
}

#[test]
fn test_release() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Linux", "amd64", "5.15")
        .arg("release")
        .assert()
        .success()
        .stdout("id=ubuntu\nversion=22.04\nlike=ubuntu,debian\n");
}

#[test]
fn test_release_from_usr_lib() {
    let env = TestEnv::new().with_file("usr/lib/os-release", "ID=arch\n");
    env.command_for("Linux", "amd64", "6.6")
        .arg("release")
        .assert()
        .success()
        .stdout("id=arch\nlike=arch\n");
}

#[test]
fn test_release_missing() {
    let env = TestEnv::new();
    env.command_for("Linux", "amd64", "5.15")
        .arg("release")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_release_off_linux() {
    let env = TestEnv::new().with_os_release(UBUNTU_OS_RELEASE);
    env.command_for("Mac OS X", "x86_64", "13.0")
        .args(["release", "--is-like", "debian"])
        .assert()
        .code(1)
        .stdout("false\n");
}

#[test]
fn test_release_is_like() {
    let env = TestEnv::new().with_os_release(ROCKY_OS_RELEASE);
    env.command_for("Linux", "amd64", "5.14")
        .args(["release", "--is-like", "centos"])
        .assert()
        .success()
        .stdout("true\n");

    env.command_for("Linux", "amd64", "5.14")
        .args(["release", "--is-like", "debian"])
        .assert()
        .code(1)
        .stdout("false\n");
}

#[test]
fn test_error_colored_when_forced() {
    let env = TestEnv::new();
    env.command_for("plan9", "amd64", "4.0")
        .args(["--color", "always", "classifier"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\x1b[31m"))
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("unknown os.name: plan9"));
}

#[test]
fn test_error_plain_when_color_disabled() {
    let env = TestEnv::new();
    env.command_for("plan9", "amd64", "4.0")
        .args(["--color", "never", "classifier"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown os.name: plan9"))
        .stderr(predicate::str::contains("\x1b[").not());
}
