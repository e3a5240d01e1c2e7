//! Reverse-template parameter extraction.
//!
//! A parameter template is a string of literal text and `{{name}}`
//! placeholders, e.g. `"{{user}} {{reason}}"` or `"set volume={{level}}"`.
//! Matching runs the template *backwards* against the argument tokens: literal
//! text is a mandatory separator, each placeholder captures greedily up to the
//! next literal run (or the end of its token), and the argument tokens must
//! cover the template exactly — there is no "ignore trailing arguments" mode.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{DispatchError, DispatchResult, TemplateError};

/// The parameter extraction result for one dispatch.
///
/// Produced fresh per candidate, handed to the handler, and discarded when the
/// handler returns. `captures` is `None` when the definition carries no
/// template.
#[derive(Debug, Clone, Default)]
pub struct Params {
    /// The ordered raw argument tokens.
    pub args: Vec<String>,
    /// Named captures extracted by the template, if one was set.
    pub captures: Option<HashMap<String, String>>,
}

impl Params {
    /// Creates a template-less result carrying only the raw arguments.
    pub fn raw(args: Vec<String>) -> Self {
        Self {
            args,
            captures: None,
        }
    }

    /// Looks up a named capture.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures.as_ref()?.get(name).map(String::as_str)
    }
}

/// One whitespace-delimited template word, compiled to an anchored expression.
#[derive(Debug, Clone)]
struct WordPattern {
    regex: Regex,
    names: Vec<String>,
}

/// A compiled parameter template.
///
/// Compiled once at registration time; extraction itself allocates only the
/// capture map.
#[derive(Debug, Clone)]
pub struct ParamTemplate {
    source: String,
    words: Vec<WordPattern>,
}

impl ParamTemplate {
    /// Parses and compiles a template string.
    ///
    /// Placeholder names must match `[A-Za-z_][A-Za-z0-9_]*` and be unique
    /// across the whole template.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut seen: Vec<String> = Vec::new();
        let mut words = Vec::new();

        for word in source.split_whitespace() {
            words.push(compile_word(source, word, &mut seen)?);
        }

        Ok(Self {
            source: source.to_string(),
            words,
        })
    }

    /// Returns the original template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Matches the argument tokens against the template.
    ///
    /// The number of tokens must equal the number of template words — extra
    /// or missing tokens fail with
    /// [`ParameterMismatch`](DispatchError::ParameterMismatch), as does any
    /// token whose literal structure diverges from its template word.
    pub fn extract(&self, args: &[String]) -> DispatchResult<HashMap<String, String>> {
        if args.len() != self.words.len() {
            return Err(self.mismatch());
        }

        let mut captures = HashMap::new();
        for (word, arg) in self.words.iter().zip(args) {
            let caps = word.regex.captures(arg).ok_or_else(|| self.mismatch())?;
            for name in &word.names {
                if let Some(m) = caps.name(name) {
                    captures.insert(name.clone(), m.as_str().to_string());
                }
            }
        }

        Ok(captures)
    }

    fn mismatch(&self) -> DispatchError {
        DispatchError::ParameterMismatch {
            template: self.source.clone(),
        }
    }
}

/// Compiles one template word into an anchored regex with named captures.
fn compile_word(
    source: &str,
    word: &str,
    seen: &mut Vec<String>,
) -> Result<WordPattern, TemplateError> {
    let mut pattern = String::from("^");
    let mut names = Vec::new();
    let mut rest = word;

    while let Some(start) = rest.find("{{") {
        pattern.push_str(&regex::escape(&rest[..start]));

        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| TemplateError::UnclosedPlaceholder {
                template: source.to_string(),
            })?;
        let name = &after[..end];
        if !is_valid_name(name) {
            return Err(TemplateError::InvalidName {
                name: name.to_string(),
            });
        }
        if seen.iter().any(|n| n == name) {
            return Err(TemplateError::DuplicateName {
                name: name.to_string(),
            });
        }
        seen.push(name.to_string());
        names.push(name.to_string());

        // Greedy-but-bounded: lazy wildcard, fenced by the following literal
        // (or the end-of-token anchor for the last placeholder).
        pattern.push_str(&format!("(?P<{name}>.+?)"));
        rest = &after[end + 2..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    // Names are validated above, literals escaped; compilation cannot fail
    // for any accepted input.
    let regex = Regex::new(&pattern).map_err(|_| TemplateError::InvalidName {
        name: word.to_string(),
    })?;

    Ok(WordPattern { regex, names })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_two_placeholders() {
        let template = ParamTemplate::parse("{{a}} {{b}}").unwrap();
        let caps = template.extract(&args(&["x", "y"])).unwrap();
        assert_eq!(caps.get("a").map(String::as_str), Some("x"));
        assert_eq!(caps.get("b").map(String::as_str), Some("y"));
    }

    #[test]
    fn test_extract_too_few_tokens_fails() {
        let template = ParamTemplate::parse("{{a}} {{b}}").unwrap();
        assert!(matches!(
            template.extract(&args(&["x"])),
            Err(DispatchError::ParameterMismatch { .. })
        ));
    }

    #[test]
    fn test_extract_too_many_tokens_fails() {
        let template = ParamTemplate::parse("{{a}} {{b}}").unwrap();
        assert!(matches!(
            template.extract(&args(&["x", "y", "z"])),
            Err(DispatchError::ParameterMismatch { .. })
        ));
    }

    #[test]
    fn test_literal_separator_within_a_word() {
        let template = ParamTemplate::parse("volume={{level}}").unwrap();
        let caps = template.extract(&args(&["volume=11"])).unwrap();
        assert_eq!(caps.get("level").map(String::as_str), Some("11"));

        assert!(template.extract(&args(&["volume11"])).is_err());
    }

    #[test]
    fn test_adjacent_placeholders_bounded_by_literal() {
        let template = ParamTemplate::parse("{{from}}..{{to}}").unwrap();
        let caps = template.extract(&args(&["3..9"])).unwrap();
        assert_eq!(caps.get("from").map(String::as_str), Some("3"));
        assert_eq!(caps.get("to").map(String::as_str), Some("9"));
    }

    #[test]
    fn test_literal_only_template_must_match_exactly() {
        let template = ParamTemplate::parse("on").unwrap();
        assert!(template.extract(&args(&["on"])).unwrap().is_empty());
        assert!(template.extract(&args(&["off"])).is_err());
        assert!(template.extract(&args(&[])).is_err());
    }

    #[test]
    fn test_empty_template_accepts_no_args() {
        let template = ParamTemplate::parse("").unwrap();
        assert!(template.extract(&args(&[])).unwrap().is_empty());
        assert!(template.extract(&args(&["x"])).is_err());
    }

    #[test]
    fn test_unclosed_placeholder_rejected() {
        assert!(matches!(
            ParamTemplate::parse("{{a}} {{b"),
            Err(TemplateError::UnclosedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_invalid_and_duplicate_names_rejected() {
        assert!(matches!(
            ParamTemplate::parse("{{1st}}"),
            Err(TemplateError::InvalidName { .. })
        ));
        assert!(matches!(
            ParamTemplate::parse("{{a}} {{a}}"),
            Err(TemplateError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_params_lookup() {
        let template = ParamTemplate::parse("{{user}} {{reason}}").unwrap();
        let captures = template.extract(&args(&["bob", "spam"])).unwrap();
        let params = Params {
            args: args(&["bob", "spam"]),
            captures: Some(captures),
        };
        assert_eq!(params.get("user"), Some("bob"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(Params::raw(vec![]).get("user"), None);
    }
}
