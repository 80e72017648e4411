use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::relations::RelationType;
use crate::serialize::GraphFormat;
use crate::vocab::Namespace;

pub const DEFAULT_OAI_BASE_URL: &str = "http://oai.esrc.unimelb.edu.au/EOAS/provider?verb=GetRecord&metadataPrefix=eac-cpf&identifier=oai:eoas.oai.esrc.unimelb.edu.au:";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Namespace used to mint entity, event and place identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub prefix: String,
    pub iri: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            prefix: "csiro".to_string(),
            iri: "http://aays.csiro.au/data/csiro/".to_string(),
        }
    }
}

impl NamespaceConfig {
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.prefix.as_str(), self.iri.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory of EAC-CPF `*.xml` files
    pub input_dir: PathBuf,
    /// Serialized graph destination
    pub output: PathBuf,
    pub format: GraphFormat,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("source_data"),
            output: PathBuf::from("output.ttl"),
            format: GraphFormat::Turtle,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieveConfig {
    /// Request URL prefix; the record identifier is appended
    pub base_url: String,
    /// Directory fetched records are written to
    pub output_dir: PathBuf,
    pub connect_timeout_seconds: u32,
    pub request_timeout_seconds: u32,
    pub user_agent: Option<String>,
    /// Relations followed to corporate-body targets
    pub follow: Vec<RelationType>,
}

impl Default for RetrieveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OAI_BASE_URL.to_string(),
            output_dir: PathBuf::from("source_data"),
            connect_timeout_seconds: 30,
            request_timeout_seconds: 120,
            user_agent: None,
            follow: vec![
                RelationType::HierarchicalChild,
                RelationType::TemporalEarlier,
                RelationType::TemporalLater,
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub namespace: NamespaceConfig,
    pub convert: ConvertConfig,
    pub retrieve: RetrieveConfig,
}

impl Config {
    /// `$XDG_CONFIG_HOME/rdfinator/config.toml` or the platform equivalent.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rdfinator").join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Explicit file if given, else the default location if it exists, else
    /// defaults; then `RDFINATOR_*` environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(prefix) = lookup("RDFINATOR_NAMESPACE_PREFIX") {
            self.namespace.prefix = prefix;
        }
        if let Some(iri) = lookup("RDFINATOR_NAMESPACE_IRI") {
            self.namespace.iri = iri;
        }
        if let Some(dir) = lookup("RDFINATOR_INPUT_DIR") {
            self.convert.input_dir = PathBuf::from(dir);
        }
        if let Some(output) = lookup("RDFINATOR_OUTPUT") {
            self.convert.output = PathBuf::from(output);
        }
        if let Some(format) = lookup("RDFINATOR_FORMAT") {
            self.convert.format = format
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "RDFINATOR_FORMAT",
                    value: format,
                })?;
        }
        if let Some(url) = lookup("RDFINATOR_BASE_URL") {
            self.retrieve.base_url = url;
        }
        if let Some(dir) = lookup("RDFINATOR_SOURCE_DIR") {
            self.retrieve.output_dir = PathBuf::from(dir);
        }
        if let Some(agent) = lookup("RDFINATOR_USER_AGENT") {
            self.retrieve.user_agent = Some(agent);
        }
        Ok(())
    }
}
