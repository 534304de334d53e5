use crate::config::OsDetectorConfig;
use crate::error::Result;
use crate::extension::OsDetector;

pub struct ClassifierCommand {
    detector: OsDetector,
}

impl ClassifierCommand {
    pub fn new(config: &OsDetectorConfig) -> Result<Self> {
        Ok(Self {
            detector: OsDetector::from_config(config),
        })
    }

    pub fn execute(&self) -> Result<()> {
        println!("{}", self.classifier()?);
        Ok(())
    }

    fn classifier(&self) -> Result<String> {
        self.detector.classifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OsDetectorError;
    use serial_test::serial;
    use std::collections::BTreeMap;
    use std::env;

    fn config(name: &str, arch: &str) -> OsDetectorConfig {
        let properties: BTreeMap<String, String> = [
            ("os.name".to_string(), name.to_string()),
            ("os.arch".to_string(), arch.to_string()),
            ("os.version".to_string(), "10.0".to_string()),
            // Overrides any failOnUnknownOS inherited from the environment
            ("failOnUnknownOS".to_string(), "true".to_string()),
        ]
        .into_iter()
        .collect();

        OsDetectorConfig {
            properties,
            ..OsDetectorConfig::default()
        }
    }

    #[test]
    fn test_classifier_from_overrides() {
        let command = ClassifierCommand::new(&config("Windows 10", "amd64")).unwrap();
        assert_eq!(command.classifier().unwrap(), "windows-x86_64");
    }

    #[test]
    fn test_classifier_unknown_os_is_error() {
        let command = ClassifierCommand::new(&config("plan9", "amd64")).unwrap();
        assert!(matches!(
            command.classifier(),
            Err(OsDetectorError::UnknownOsName(_))
        ));
    }

    #[test]
    #[serial]
    fn test_classifier_ignores_inherited_strict_mode_variable() {
        unsafe {
            env::set_var("failOnUnknownOS", "false");
        }

        let command = ClassifierCommand::new(&config("plan9", "amd64")).unwrap();
        let classifier = command.classifier();

        unsafe {
            env::remove_var("failOnUnknownOS");
        }

        assert!(matches!(classifier, Err(OsDetectorError::UnknownOsName(_))));
    }
}
