use crate::ConfigError;

/// A message received on a topic, as handed over by the broker.
#[derive(Clone, Eq, PartialEq)]
pub struct Message {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(topic: impl ToString, payload: impl Into<Vec<u8>>) -> Self {
        Message {
            topic: topic.to_string(),
            payload: payload.into(),
        }
    }

    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.topic)?;
        match &self.payload_str() {
            Some(str) => write!(f, "{str}"),
            None => write!(f, "{:?}", self.payload),
        }
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Parse a message sample given as `[topic] payload`.
///
/// Returns `Ok(None)` on a blank line.
pub fn parse_input(line: &str) -> Result<Option<Message>, ConfigError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with('[') {
        return Err(ConfigError::IncorrectInput(format!(
            "Missing opening bracket: {line}"
        )));
    }
    let Some(closing_bracket) = line.find(']') else {
        return Err(ConfigError::IncorrectInput(format!(
            "Missing closing bracket: {line}"
        )));
    };

    let topic = &line[1..closing_bracket];
    let payload = line[closing_bracket + 1..].trim_start();
    Ok(Some(Message::new(topic, payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parsing_a_message_sample() {
        let message = parse_input(r#"[owntracks/alice/phone] {"batt": 15}"#)
            .unwrap()
            .unwrap();
        assert_eq!(message, Message::new("owntracks/alice/phone", r#"{"batt": 15}"#));
    }

    #[test]
    fn the_payload_can_be_empty() {
        let message = parse_input("  [owntracks/alice/phone]  ").unwrap().unwrap();
        assert_eq!(message, Message::new("owntracks/alice/phone", ""));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_input("   ").unwrap(), None);
    }

    #[test]
    fn brackets_are_required() {
        let err = parse_input("owntracks/alice/phone {}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incorrect message sample: Missing opening bracket: owntracks/alice/phone {}"
        );

        let err = parse_input("[owntracks/alice/phone {}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incorrect message sample: Missing closing bracket: [owntracks/alice/phone {}"
        );
    }

    #[test]
    fn display_as_a_sample() {
        let message = Message::new("owntracks/alice/phone", r#"{"batt":15}"#);
        assert_eq!(message.to_string(), r#"[owntracks/alice/phone] {"batt":15}"#);

        let binary = Message::new("raw", vec![0xffu8, 0x00]);
        assert_eq!(binary.to_string(), "[raw] [255, 0]");
    }
}
