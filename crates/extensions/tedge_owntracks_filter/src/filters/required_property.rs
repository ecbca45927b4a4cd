use crate::filters::config_object;
use crate::filters::string_setting;
use crate::filters::Filter;
use crate::payload::parse_record;
use crate::ConfigError;
use serde_json::Value;

/// Ignore OwnTracks reports that don't carry a given property.
///
/// Used to only forward transition events (`event`) or location reports (`lat`).
/// A payload that is not a JSON object is ignored.
#[derive(Clone, Debug)]
pub struct RequiredProperty {
    name: &'static str,
    property: String,
}

impl RequiredProperty {
    pub fn new(name: &'static str, property: &str) -> Self {
        RequiredProperty {
            name,
            property: property.to_owned(),
        }
    }
}

impl Filter for RequiredProperty {
    fn name(&self) -> &str {
        self.name
    }

    fn set_config(&mut self, config: &Value) -> Result<(), ConfigError> {
        if let Some(settings) = config_object(self.name, config)? {
            if let Some(property) = string_setting(self.name, settings, "property")? {
                self.property = property;
            }
        }
        Ok(())
    }

    fn should_ignore(&self, _topic: &str, payload: &[u8]) -> bool {
        parse_record(payload).is_none_or(|record| !record.contains_key(&self.property))
    }
}
