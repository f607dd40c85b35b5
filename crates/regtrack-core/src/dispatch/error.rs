//! Dispatch error types

use thiserror::Error;

use crate::transport::TransportError;
use crate::validation::Violation;

/// Errors produced while executing a tool
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments failed validation
    #[error("Invalid input for {tool}: {}", join_violations(.violations))]
    InvalidInput { tool: String, violations: Vec<Violation> },

    /// Exactly one of two alternative identifying fields was required
    #[error("{tool} requires exactly one of `{first}` or `{second}`")]
    AmbiguousIdentifier { tool: String, first: String, second: String },

    /// The remote call failed; message is passed through verbatim
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The remote result could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    /// Create an invalid input error with a single violation
    pub fn invalid(tool: impl Into<String>, violation: Violation) -> Self {
        Self::InvalidInput {
            tool: tool.into(),
            violations: vec![violation],
        }
    }

    /// Violations carried by an invalid input error
    pub fn violations(&self) -> &[Violation] {
        match self {
            DispatchError::InvalidInput { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failure inside a transform rule, before any remote call
///
/// The dispatcher attaches the tool name when converting to [`DispatchError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("{0}")]
    Invalid(Violation),

    #[error("exactly one of `{first}` or `{second}` is required")]
    Ambiguous { first: &'static str, second: &'static str },
}

impl From<serde_json::Error> for RuleError {
    fn from(e: serde_json::Error) -> Self {
        RuleError::Invalid(Violation::Malformed {
            detail: e.to_string(),
        })
    }
}

impl RuleError {
    pub fn into_dispatch(self, tool: &str) -> DispatchError {
        match self {
            RuleError::Invalid(violation) => DispatchError::invalid(tool, violation),
            RuleError::Ambiguous { first, second } => DispatchError::AmbiguousIdentifier {
                tool: tool.to_string(),
                first: first.to_string(),
                second: second.to_string(),
            },
        }
    }
}
