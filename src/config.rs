use crate::error::{OsDetectorError, Result};
use crate::source::SourceStrategy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "OSDETECTOR";
const HOME_ENV: &str = "OSDETECTOR_HOME";
const DEFAULT_HOME_DIR: &str = ".osdetector";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsDetectorConfig {
    /// Distribution families, in order of preference, that may be appended
    /// to the classifier
    #[serde(default)]
    pub classifier_with_likes: Vec<String>,

    #[serde(default = "default_fail_on_unknown_os")]
    pub fail_on_unknown_os: bool,

    #[serde(default)]
    pub source_strategy: SourceStrategy,

    /// Alternate system root used to look up release files
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Raw property overrides applied on top of the host values
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Default for OsDetectorConfig {
    fn default() -> Self {
        Self {
            classifier_with_likes: Vec::new(),
            fail_on_unknown_os: default_fail_on_unknown_os(),
            source_strategy: SourceStrategy::default(),
            root: None,
            properties: BTreeMap::new(),
        }
    }
}

fn default_fail_on_unknown_os() -> bool {
    true
}

impl OsDetectorConfig {
    /// Loads configuration from `home/config.toml` and `OSDETECTOR_*`
    /// environment variables, the latter taking precedence.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(
                File::from(config_path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("classifier_with_likes")
                    .try_parsing(true),
            )
            .build()?;

        let config: OsDetectorConfig = settings.try_deserialize()?;
        Ok(config)
    }
}

/// Resolves the osdetector home directory.
///
/// `OSDETECTOR_HOME` wins; otherwise `~/.osdetector` is used.
pub fn osdetector_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .ok_or_else(|| {
            OsDetectorError::ConfigError(
                "Unable to determine home directory; set OSDETECTOR_HOME".to_string(),
            )
        })
}

/// Loads the configuration from the default home directory.
pub fn new_osdetector_config() -> Result<OsDetectorConfig> {
    let home = osdetector_home()?;
    OsDetectorConfig::load(&home)
}
