use crate::config::OsDetectorConfig;
use crate::detector::LinuxRelease;
use crate::error::Result;
use crate::extension::OsDetector;

pub struct ReleaseCommand {
    detector: OsDetector,
}

impl ReleaseCommand {
    pub fn new(config: &OsDetectorConfig) -> Result<Self> {
        Ok(Self {
            detector: OsDetector::from_config(config),
        })
    }

    /// Prints the release information, or answers whether the release is
    /// like `is_like` when given.
    ///
    /// Returns `false` only when `is_like` was asked and does not match.
    pub fn execute(&self, is_like: Option<&str>) -> Result<bool> {
        if let Some(base) = is_like {
            let matched = self.is_like(base)?;
            println!("{matched}");
            return Ok(matched);
        }

        let result = self.detector.result()?;
        if let Some(release) = &result.release {
            print!("{}", render(release));
        }
        Ok(true)
    }

    fn is_like(&self, base: &str) -> Result<bool> {
        Ok(self
            .detector
            .release()?
            .is_some_and(|release| release.is_like(base)))
    }
}

fn render(release: &LinuxRelease) -> String {
    let mut output = format!("id={}\n", release.id);
    if let Some(version) = &release.version {
        output.push_str(&format!("version={version}\n"));
    }
    let like: Vec<&str> = release.like.iter().collect();
    output.push_str(&format!("like={}\n", like.join(",")));
    output
}
