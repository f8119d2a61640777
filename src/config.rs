use crate::error::{Error, Result};
use chrono::Datelike;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a reconciliation run
///
/// Every file name is relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Contribution/expenditure extracts, scanned in this order
    pub data_files: Vec<String>,
    /// Committee party information extract
    pub party_info_file: String,
    /// Canonical district list
    pub districts_file: String,
    /// Output file, also read back as the previous run's snapshot
    pub output_file: String,
    pub pretty_print: bool,
    /// Year tag stamped on newly observed organizations
    #[serde(deserialize_with = "year_from_yaml")]
    pub year: String,
}

/// Accept `year: 2018` as well as `year: "2018"`
fn year_from_yaml<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u32),
        Text(String),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Number(n) => n.to_string(),
        Year::Text(s) => s,
    })
}

impl Config {
    /// Create a new default configuration
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            data_files: Vec::new(),
            party_info_file: "PartyInfo.csv".to_string(),
            districts_file: "Districts.json".to_string(),
            output_file: "Parties.json".to_string(),
            pretty_print: false,
            year: chrono::Local::now().year().to_string(),
        }
    }

    /// Parse a YAML configuration document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn data_file_paths(&self) -> Vec<PathBuf> {
        self.data_files
            .iter()
            .map(|name| self.data_dir.join(name))
            .collect()
    }

    pub fn party_info_path(&self) -> PathBuf {
        self.data_dir.join(&self.party_info_file)
    }

    pub fn districts_path(&self) -> PathBuf {
        self.data_dir.join(&self.districts_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.exists() {
            return Err(Error::Config(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        if !self.data_dir.is_dir() {
            return Err(Error::Config(format!(
                "Data directory is not a directory: {}",
                self.data_dir.display()
            )));
        }

        if self.data_files.is_empty() {
            return Err(Error::Config("No data files configured".to_string()));
        }

        if self.data_files.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::Config("Empty data file name".to_string()));
        }

        for (key, value) in [
            ("party_info_file", &self.party_info_file),
            ("districts_file", &self.districts_file),
            ("output_file", &self.output_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", key)));
            }
        }

        if self.year.trim().is_empty() {
            return Err(Error::Config("Year must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("data")
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(data_dir),
        }
    }

    /// Start from an existing configuration, e.g. one loaded from YAML
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Add an extract to scan
    pub fn add_data_file(mut self, name: impl Into<String>) -> Self {
        self.config.data_files.push(name.into());
        self
    }

    /// Set the extracts to scan
    pub fn data_files(mut self, names: Vec<String>) -> Self {
        self.config.data_files = names;
        self
    }

    pub fn party_info_file(mut self, name: impl Into<String>) -> Self {
        self.config.party_info_file = name.into();
        self
    }

    pub fn districts_file(mut self, name: impl Into<String>) -> Self {
        self.config.districts_file = name.into();
        self
    }

    pub fn output_file(mut self, name: impl Into<String>) -> Self {
        self.config.output_file = name.into();
        self
    }

    pub fn pretty_print(mut self, pretty: bool) -> Self {
        self.config.pretty_print = pretty;
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.config.year = year.into();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
