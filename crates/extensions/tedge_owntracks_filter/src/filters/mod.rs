use crate::ConfigError;
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) mod battery;
mod required_property;

pub use battery::BatteryFilter;
pub use required_property::RequiredProperty;

pub const BATTERY_FILTER: &str = "owntracks-battery-filter";
pub const EVENT_FILTER: &str = "owntracks-event-filter";
pub const GEO_FILTER: &str = "owntracks-geo-filter";

/// A predicate telling if a message has to be ignored.
///
/// Filters are pure: the decision only depends on the message and on the
/// settings given to `set_config`. A filter must never panic on malformed
/// input but fall back to its default decision instead.
pub trait Filter: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn set_config(&mut self, config: &Value) -> Result<(), ConfigError>;

    /// Return `true` if the message must be ignored, `false` if it can be forwarded.
    fn should_ignore(&self, topic: &str, payload: &[u8]) -> bool;
}

pub trait FilterBuilder: Send + Sync + 'static {
    fn new_instance(&self) -> Box<dyn Filter>;
}

impl<T: Clone + Filter> FilterBuilder for T {
    fn new_instance(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

pub struct BuiltinFilters {
    filters: BTreeMap<String, Box<dyn FilterBuilder>>,
}

impl Default for BuiltinFilters {
    fn default() -> Self {
        let mut filters = BuiltinFilters {
            filters: BTreeMap::default(),
        };
        filters.register(BatteryFilter::default());
        filters.register(RequiredProperty::new(EVENT_FILTER, "event"));
        filters.register(RequiredProperty::new(GEO_FILTER, "lat"));
        filters
    }
}

impl BuiltinFilters {
    pub fn new() -> Self {
        crate::announce_loaded();
        Self::default()
    }

    pub fn register(&mut self, prototype: impl FilterBuilder + Filter) {
        self.filters
            .insert(prototype.name().to_owned(), Box::new(prototype));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Create a new instance of the named filter, configured with the given settings
    pub fn new_instance(
        &self,
        name: &str,
        config: Option<&Value>,
    ) -> Result<Box<dyn Filter>, ConfigError> {
        let Some(builder) = self.filters.get(name) else {
            return Err(ConfigError::UnknownFilter { name: name.into() });
        };
        let mut filter = builder.new_instance();
        if let Some(config) = config {
            filter.set_config(config)?;
        }
        Ok(filter)
    }
}

/// Check that the settings are given as a table, an empty one being fine
fn config_object<'a>(
    filter: &str,
    config: &'a Value,
) -> Result<Option<&'a serde_json::Map<String, Value>>, ConfigError> {
    match config {
        Value::Null => Ok(None),
        Value::Object(settings) => Ok(Some(settings)),
        _ => Err(ConfigError::IncorrectSetting(format!(
            "The settings of {filter} must be a table"
        ))),
    }
}

fn string_setting(
    filter: &str,
    settings: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    match settings.get(key) {
        None => Ok(None),
        Some(Value::String(value)) if !value.is_empty() => Ok(Some(value.clone())),
        Some(_) => Err(ConfigError::IncorrectSetting(format!(
            "{filter}: '{key}' must be a non-empty string"
        ))),
    }
}
