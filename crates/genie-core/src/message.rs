//! The opaque text handed between stages

use std::fmt;

/// Free-form text produced by one stage and consumed verbatim by the next
///
/// No schema is enforced; the content is natural language (or Gherkin
/// source, equally opaque to the pipeline). The full text always flows
/// forward even though handoff logging previews only a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMessage(String);

impl StageMessage {
    /// Wrap stage output
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The full text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner text
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// First `chars` characters, safe on any UTF-8 content
    ///
    /// Used only for log previews; never feeds back into the pipeline.
    #[must_use]
    pub fn preview(&self, chars: usize) -> &str {
        match self.0.char_indices().nth(chars) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for StageMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StageMessage {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_respects_char_boundaries() {
        let message = StageMessage::new("héllo wörld");
        assert_eq!(message.preview(3), "hél");
    }

    #[test]
    fn preview_of_short_message_is_whole_message() {
        let message = StageMessage::new("short");
        assert_eq!(message.preview(50), "short");
    }

    #[test]
    fn full_text_survives_roundtrip() {
        let text = "Feature: Login\n  Scenario: Valid login\n".repeat(100);
        let message = StageMessage::new(text.clone());
        assert_eq!(message.into_inner(), text);
    }
}
