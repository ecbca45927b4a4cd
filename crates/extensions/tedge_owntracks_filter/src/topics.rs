use crate::ConfigError;

/// A set of MQTT topic filters, possibly with wildcards
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TopicFilter {
    patterns: Vec<String>,
}

impl TopicFilter {
    pub fn empty() -> Self {
        TopicFilter::default()
    }

    /// Check if the pattern is valid and build a new topic filter.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let mut topics = TopicFilter::empty();
        topics.try_add(pattern)?;
        Ok(topics)
    }

    /// Check if the pattern is valid and add it to this topic filter.
    pub fn try_add(&mut self, pattern: &str) -> Result<(), ConfigError> {
        if rumqttc::valid_filter(pattern) {
            self.patterns.push(pattern.to_owned());
            Ok(())
        } else {
            Err(ConfigError::IncorrectTopicFilter(pattern.to_owned()))
        }
    }

    pub fn try_from_patterns<T: AsRef<str>>(
        patterns: impl IntoIterator<Item = T>,
    ) -> Result<Self, ConfigError> {
        let mut topics = TopicFilter::empty();
        for pattern in patterns {
            topics.try_add(pattern.as_ref())?;
        }
        Ok(topics)
    }

    /// Check if the given topic name matches any of the patterns.
    pub fn accept_topic_name(&self, topic: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| rumqttc::matches(topic, pattern))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
