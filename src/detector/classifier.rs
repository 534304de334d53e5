use super::normalize::{Arch, OsName};
use super::release::LinuxRelease;

/// Builds the `{name}-{arch}` classifier, optionally suffixed with a
/// distribution family.
///
/// When a release is known, the first entry of `classifier_with_likes` that
/// the release is like is appended. At most one suffix is ever added.
pub fn assemble(
    name: OsName,
    arch: Arch,
    release: Option<&LinuxRelease>,
    classifier_with_likes: &[String],
) -> String {
    let mut classifier = format!("{name}-{arch}");

    let suffix = release.and_then(|release| {
        classifier_with_likes
            .iter()
            .find(|candidate| release.is_like(candidate))
    });

    if let Some(suffix) = suffix {
        classifier.push('-');
        classifier.push_str(suffix);
    }

    classifier
}
