//! Error types for the dispatch engine.

use herald_core::Level;
use thiserror::Error;

/// A type-erased error, used where middleware and handlers surface arbitrary
/// failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The expected, locally recoverable dispatch conditions.
///
/// Every variant here ends processing for one candidate without aborting the
/// others and without propagating to the embedding application. Anything
/// outside this taxonomy (a middleware error, a handler error, a transport
/// failure on a non-notice path) is *not* wrapped into it — programming
/// errors are meant to surface loudly.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Tokenization failed. Practically unreachable for non-empty input.
    #[error("message could not be tokenized")]
    MalformedRequest,

    /// No alias or pattern candidate matched the message.
    #[error("no command matched '{word}'")]
    UnknownCommand {
        /// The command word that failed to resolve.
        word: String,
    },

    /// A middleware predicate returned false.
    #[error("dispatch rejected by middleware")]
    MiddlewareRejected,

    /// The argument shape does not fit the command's parameter template.
    #[error("arguments do not fit template '{template}'")]
    ParameterMismatch {
        /// The template that failed to match.
        template: String,
    },

    /// The sender does not satisfy the command's minimum level.
    #[error("sender lacks required level '{required}'")]
    Unauthorized {
        /// The level the command requires.
        required: Level,
    },
}

/// Result type for per-candidate dispatch steps.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised while compiling a parameter template at registration time.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    /// A `{{` without a matching `}}`.
    #[error("unclosed placeholder in template '{template}'")]
    UnclosedPlaceholder {
        /// The offending template source.
        template: String,
    },

    /// A placeholder name outside `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("invalid placeholder name '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// The same placeholder name used twice.
    #[error("duplicate placeholder name '{name}'")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },
}

/// Errors raised when registering a command definition.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The definition carries neither aliases nor a pattern.
    #[error("command definition has no aliases and no pattern")]
    NoAliases,

    /// The definition has no handler.
    #[error("command definition has no handler")]
    MissingHandler,

    /// The parameter template failed to compile.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Fatal engine errors that propagate to the embedding application.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A middleware predicate failed (as opposed to rejecting).
    #[error("middleware failed: {0}")]
    Middleware(BoxError),
}
