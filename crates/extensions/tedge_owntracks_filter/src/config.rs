use crate::filters::BuiltinFilters;
use crate::filters::Filter;
use crate::filters::BATTERY_FILTER;
use crate::TopicFilter;
use camino::Utf8Path;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/tedge/owntracks-filter.toml";
pub const DEFAULT_TOPIC: &str = "owntracks/#";

/// The content of `owntracks-filter.toml`
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Log level of the `owntracks-filter` command
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default = "default_filters")]
    pub filters: Vec<BindingConfig>,
}

/// Bind a filter to the topics it applies to
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    pub topics: Vec<String>,

    pub filter: String,

    #[serde(default)]
    pub config: Option<toml::Table>,
}

/// A filter instance along the topics it is applied to
pub struct FilterBinding {
    pub topics: TopicFilter,
    pub filter: Box<dyn Filter>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Not a valid MQTT topic filter: {0}")]
    IncorrectTopicFilter(String),

    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    #[error("Incorrect setting: {0}")]
    IncorrectSetting(String),

    #[error("Incorrect message sample: {0}")]
    IncorrectInput(String),

    #[error("Failed to read {path}: {source}")]
    FromIo {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    FromToml(#[from] toml::de::Error),
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            log_level: None,
            filters: default_filters(),
        }
    }
}

impl FilterConfig {
    /// Load the configuration file, falling back to the default config if there is no such file
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FilterConfig::default()),
            Err(source) => Err(ConfigError::FromIo {
                path: path.to_string(),
                source,
            }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn compile(&self, builtins: &BuiltinFilters) -> Result<Vec<FilterBinding>, ConfigError> {
        self.filters
            .iter()
            .map(|binding| binding.compile(builtins))
            .collect()
    }
}

impl BindingConfig {
    pub fn compile(&self, builtins: &BuiltinFilters) -> Result<FilterBinding, ConfigError> {
        let topics = TopicFilter::try_from_patterns(&self.topics)?;
        let config = self
            .config
            .as_ref()
            .map(|table| Value::from(serde_json::Map::from_iter(table_to_json(table))));
        let filter = builtins.new_instance(&self.filter, config.as_ref())?;
        Ok(FilterBinding { topics, filter })
    }
}

fn table_to_json(table: &toml::Table) -> impl Iterator<Item = (String, Value)> + '_ {
    table
        .iter()
        .map(|(key, value)| (key.clone(), toml_to_json(value)))
}

fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(a) => Value::Array(a.iter().map(toml_to_json).collect()),
        toml::Value::Table(t) => Value::Object(table_to_json(t).collect()),
    }
}

fn default_filters() -> Vec<BindingConfig> {
    vec![BindingConfig {
        topics: vec![DEFAULT_TOPIC.to_owned()],
        filter: BATTERY_FILTER.to_owned(),
        config: None,
    }]
}
