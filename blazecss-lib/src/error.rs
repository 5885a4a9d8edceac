//! Error types for style evaluation.
//!
//! Reaching the empty value is not represented here: it is an internal
//! defect and panics with [`crate::value::EmptyValueDefect`] instead.

use thiserror::Error;

/// Result type alias for style evaluation.
pub type StyleResult<T> = std::result::Result<T, StyleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A property setter or nested rule ran outside of any style evaluation.
    #[error("cannot set `{property}`: no style rule is being evaluated")]
    NoActiveRule { property: String },

    /// A style identity that cannot be used as a selector compound.
    #[error("invalid style identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// A nested style body failed; `selector` names the rule being built.
    #[error("failed to evaluate `{selector}`: {source}")]
    Evaluation {
        selector: String,
        #[source]
        source: Box<StyleError>,
    },

    /// Another thread panicked while holding a style cache.
    #[error("style cache for `{template}` is poisoned")]
    CachePoisoned { template: String },

    /// Free-form failure raised by a style body.
    #[error("{0}")]
    Other(String),
}

impl StyleError {
    /// The innermost error, skipping evaluation context wrappers.
    pub fn root_cause(&self) -> &StyleError {
        match self {
            StyleError::Evaluation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
