//! Message tokenizer.

use crate::error::{DispatchError, DispatchResult};
use crate::prefix::Prefix;

/// A tokenized message: the matched prefix (if any), the command word, and
/// the ordered argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// The prefix substring that matched, or `None` when the message carried
    /// no literal prefix.
    pub prefix: Option<String>,
    /// The command word with the prefix stripped.
    pub command: String,
    /// The remaining whitespace-delimited tokens.
    pub args: Vec<String>,
}

/// Splits raw message text into a prefix candidate, a command word, and an
/// ordered argument list.
///
/// The text is split on runs of whitespace; the prefix expression is applied
/// to the first token only. Fails with
/// [`MalformedRequest`](DispatchError::MalformedRequest) when there is no
/// first token — only possible on empty (or all-whitespace) input, since the
/// `(.+)` fallback accepts anything else.
pub fn tokenize(prefix: &Prefix, content: &str) -> DispatchResult<Tokenized> {
    let mut parts = content.split_whitespace();
    let head = parts.next().ok_or(DispatchError::MalformedRequest)?;

    let caps = prefix
        .expression()
        .captures(head)
        .ok_or(DispatchError::MalformedRequest)?;
    let matched = caps
        .get(1)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_owned);
    let command = caps
        .get(2)
        .map(|m| m.as_str().to_owned())
        .ok_or(DispatchError::MalformedRequest)?;

    Ok(Tokenized {
        prefix: matched,
        command,
        args: parts.map(str::to_owned).collect(),
    })
}
