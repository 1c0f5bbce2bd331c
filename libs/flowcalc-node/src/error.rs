//! Error types for flowcalc-node

use thiserror::Error;

/// Node errors
#[derive(Debug, Error)]
pub enum NodeError {
    /// Fatal at initialization: the node cannot start without a usable config
    #[error("Config error: {0}")]
    Config(String),

    #[error("Formula error: {0}")]
    Formula(#[from] flowcalc_formula::FormulaError),
}

impl NodeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;
