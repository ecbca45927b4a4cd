use crate::config::FilterBinding;
use crate::BuiltinFilters;
use crate::ConfigError;
use crate::FilterConfig;
use crate::FilterStats;
use crate::Message;
use tracing::debug;

/// Apply to each message the filters bound to its topic.
///
/// A message is suppressed as soon as one of these filters asks to ignore it.
/// A message published on a topic with no filter is always forwarded.
pub struct FilterDispatcher {
    bindings: Vec<FilterBinding>,
    stats: FilterStats,
}

impl FilterDispatcher {
    pub fn new(bindings: Vec<FilterBinding>) -> Self {
        crate::announce_loaded();
        FilterDispatcher {
            bindings,
            stats: FilterStats::default(),
        }
    }

    pub fn try_from_config(
        config: &FilterConfig,
        builtins: &BuiltinFilters,
    ) -> Result<Self, ConfigError> {
        Ok(FilterDispatcher::new(config.compile(builtins)?))
    }

    pub fn bindings(&self) -> &[FilterBinding] {
        &self.bindings
    }

    /// The names of the filters applied to messages published on that topic
    pub fn filters_for<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.bindings
            .iter()
            .filter(move |binding| binding.topics.accept_topic_name(topic))
            .map(|binding| binding.filter.name())
    }

    /// Return `true` if the message must not be forwarded
    pub fn is_filtered(&mut self, message: &Message) -> bool {
        let mut ignored = false;
        for (index, binding) in self.bindings.iter().enumerate() {
            if !binding.topics.accept_topic_name(&message.topic) {
                continue;
            }
            let name = binding.filter.name();
            let filter_decision = binding
                .filter
                .should_ignore(&message.topic, &message.payload);
            self.stats.binding_decision(index, name, filter_decision);
            if filter_decision {
                debug!(target: "owntracks", "{name} ignores {message}");
                ignored = true;
                break;
            }
        }
        self.stats.dispatcher_decision(ignored);
        ignored
    }

    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }
}
