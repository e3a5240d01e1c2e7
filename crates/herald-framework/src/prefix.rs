//! Command prefix and its derived matching expression.

use regex::Regex;

/// An immutable command prefix.
///
/// A `Prefix` pairs the literal string with its derived matching expression
/// `^(escaped-literal)?(.+)$`. The expression is built once at engine
/// construction and applied to the first whitespace-delimited token of every
/// message; the prefix portion is optional by design so that pattern commands
/// and explicitly no-prefix commands still tokenize without a literal prefix
/// present.
#[derive(Debug, Clone)]
pub struct Prefix {
    literal: String,
    expression: Regex,
}

impl Prefix {
    /// Creates a prefix from its literal string.
    pub fn new(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let pattern = format!("^(?:({}))?(.+)$", regex::escape(&literal));
        // The literal is escaped, so the pattern is valid by construction.
        let expression = Regex::new(&pattern).expect("escaped prefix pattern compiles");
        Self {
            literal,
            expression,
        }
    }

    /// Returns the literal prefix string.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the derived matching expression.
    pub fn expression(&self) -> &Regex {
        &self.expression
    }

    /// Returns `true` if the message is a doubled-prefix escape sequence.
    ///
    /// Two consecutive prefix strings at the start of a message are reserved
    /// for prefix escaping; the "command not found" notice is suppressed for
    /// them.
    pub fn is_escape(&self, content: &str) -> bool {
        !self.literal.is_empty()
            && content
                .strip_prefix(&self.literal)
                .is_some_and(|rest| rest.starts_with(&self.literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_matches_prefixed_token() {
        let prefix = Prefix::new("!");
        let caps = prefix.expression().captures("!ping").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("!"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("ping"));
    }

    #[test]
    fn test_expression_matches_bare_token() {
        let prefix = Prefix::new("!");
        let caps = prefix.expression().captures("ping").unwrap();
        assert_eq!(caps.get(1), None);
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("ping"));
    }

    #[test]
    fn test_multi_char_prefix_is_escaped() {
        let prefix = Prefix::new("$.");
        let caps = prefix.expression().captures("$.roll").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("$."));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("roll"));
        // "$" alone must not count as the prefix
        let caps = prefix.expression().captures("$roll").unwrap();
        assert_eq!(caps.get(1), None);
    }

    #[test]
    fn test_doubled_prefix_escape() {
        let prefix = Prefix::new("!");
        assert!(prefix.is_escape("!!important announcement"));
        assert!(!prefix.is_escape("!ping"));
        assert!(!prefix.is_escape("ping"));
    }
}
