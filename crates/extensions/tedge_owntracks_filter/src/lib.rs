//! Filters deciding which OwnTracks telemetry messages are suppressed
//! before being forwarded to a notification channel.
//!
//! A filter is a predicate over a `(topic, payload)` pair: `true` means the
//! message must be ignored, `false` that it can be forwarded. Filters never
//! fail: a payload that cannot be interpreted falls back to the filter's
//! default decision.

mod config;
mod dispatcher;
pub mod filters;
mod message;
mod payload;
mod stats;
mod topics;

pub use crate::config::BindingConfig;
pub use crate::config::ConfigError;
pub use crate::config::FilterBinding;
pub use crate::config::FilterConfig;
pub use crate::config::DEFAULT_CONFIG_PATH;
pub use crate::dispatcher::FilterDispatcher;
pub use crate::filters::BuiltinFilters;
pub use crate::filters::Filter;
pub use crate::filters::BATTERY_FILTER;
pub use crate::filters::EVENT_FILTER;
pub use crate::filters::GEO_FILTER;
pub use crate::message::parse_input;
pub use crate::message::Message;
pub use crate::payload::coerce_number;
pub use crate::payload::parse_record;
pub use crate::stats::FilterStats;
pub use crate::stats::Stats;
pub use crate::topics::TopicFilter;

use crate::filters::BatteryFilter;
use std::sync::Once;
use tracing::info;

static LOADED: Once = Once::new();

/// Log, once per process, that the OwnTracks filters are available.
///
/// Called by every entry point of this crate, so hosts don't have to.
pub fn announce_loaded() {
    LOADED.call_once(|| {
        info!(target: "owntracks", "OwnTracks filters loaded");
    });
}

/// The battery filter hook, with the default settings.
///
/// Returns `true` (ignore) unless the payload is a JSON object
/// whose `batt` property is strictly greater than 20.
pub fn owntracks_battery_filter(topic: &str, message: impl AsRef<[u8]>) -> bool {
    announce_loaded();
    BatteryFilter::default().should_ignore(topic, message.as_ref())
}
