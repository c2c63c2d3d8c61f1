pub mod catalog;
pub mod yaml_config;

use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, CtaPatternGroup};
pub use yaml_config::{load_config, save_config};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
    /// Optional YAML catalog replacing the built-in word lists and patterns.
    pub catalog_path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Full,
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "summary" => Ok(OutputFormat::Summary),
            other => anyhow::bail!("Unknown output format: {other} (expected full or summary)"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            pretty: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            logging: Some(LoggingConfig {
                level: "info".to_string(),
            }),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Catalog named by `catalog_path`, or the built-in one.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load_from_file(path),
            None => Ok(Catalog::default()),
        }
    }

    /// Level from `logging.level`; info when unset. An unknown level is an
    /// error so the caller can warn once logging is up.
    pub fn log_level(&self) -> anyhow::Result<log::LevelFilter> {
        match &self.logging {
            Some(logging) => logging
                .level
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid logging level {}", logging.level)),
            None => Ok(log::LevelFilter::Info),
        }
    }
}
