use crate::filters::config_object;
use crate::filters::string_setting;
use crate::filters::Filter;
use crate::filters::BATTERY_FILTER;
use crate::payload::coerce_number;
use crate::payload::parse_record;
use crate::ConfigError;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_PROPERTY: &str = "batt";
pub const DEFAULT_THRESHOLD: f64 = 20.0;

/// Ignore OwnTracks reports unless the battery level is above a threshold.
///
/// - a payload that is not a JSON object is ignored
/// - a report with no battery level, or a `null` one, is ignored
/// - a numeric level (given as a number or a numeric string) is ignored
///   unless strictly greater than the threshold
/// - a non-numeric level is forwarded, as `NaN <= threshold` doesn't hold
#[derive(Clone, Debug)]
pub struct BatteryFilter {
    property: String,
    threshold: f64,
}

impl Default for BatteryFilter {
    fn default() -> Self {
        BatteryFilter {
            property: DEFAULT_PROPERTY.to_owned(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Filter for BatteryFilter {
    fn name(&self) -> &str {
        BATTERY_FILTER
    }

    fn set_config(&mut self, config: &Value) -> Result<(), ConfigError> {
        let Some(settings) = config_object(self.name(), config)? else {
            return Ok(());
        };
        if let Some(property) = string_setting(self.name(), settings, "property")? {
            self.property = property;
        }
        match settings.get("threshold") {
            None => {}
            Some(Value::Number(n)) => {
                self.threshold = n.as_f64().ok_or_else(|| {
                    ConfigError::IncorrectSetting(format!("{BATTERY_FILTER}: threshold {n}"))
                })?
            }
            Some(other) => {
                return Err(ConfigError::IncorrectSetting(format!(
                    "{BATTERY_FILTER}: 'threshold' must be a number, not {other}"
                )))
            }
        }
        Ok(())
    }

    fn should_ignore(&self, topic: &str, payload: &[u8]) -> bool {
        let Some(record) = parse_record(payload) else {
            debug!(target: "owntracks", "{topic}: not a JSON object");
            return true;
        };
        match record.get(&self.property) {
            None | Some(Value::Null) => true,
            Some(level) => {
                let level = coerce_number(level);
                level <= self.threshold
            }
        }
    }
}
