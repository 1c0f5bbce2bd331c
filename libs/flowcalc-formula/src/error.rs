//! Error types for flowcalc-formula

use thiserror::Error;

/// Formula evaluation errors
///
/// All variants are round-local: the caller drops the round and keeps its
/// recorded slot values.
#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("Unresolved placeholder: ${0} has no recorded value")]
    UnresolvedPlaceholder(u8),

    #[error("Invalid operator: '{0}'")]
    InvalidOperator(char),

    #[error("Malformed expression: {0}")]
    Malformed(String),
}

impl FormulaError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FormulaError>;
