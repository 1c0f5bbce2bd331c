//! flowcalc-formula - Formula compilation and evaluation for flowcalc
//!
//! Provides the two building blocks of a calculator node:
//!
//! - **Placeholder extraction**: scan a formula once and collect the `$0`..`$9`
//!   input slots it references.
//! - **Expression evaluation**: resolve slot references against recorded
//!   values and reduce the arithmetic expression to a single `f64`.
//!
//! Supported syntax: decimal literals, `$<digit>` slot references,
//! parentheses and the four operators `+ - * /`. Parentheses bind tightest,
//! then `*`/`/` left-to-right, then `+`/`-` left-to-right. Division by zero
//! follows IEEE 754 and produces an infinite or NaN result, not an error.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use flowcalc_formula::{evaluate, extract_slots};
//!
//! let slots = extract_slots("($0+$1)*$2").unwrap();
//! assert_eq!(slots, vec![0, 1, 2]);
//!
//! let mut values = HashMap::new();
//! values.insert(0u8, "2".to_string());
//! values.insert(1u8, "3".to_string());
//! values.insert(2u8, "4".to_string());
//! assert_eq!(evaluate("($0+$1)*$2", &values).unwrap(), 20.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod placeholder;

// Re-exports for convenience
pub use error::{FormulaError, Result};
pub use evaluator::evaluate;
pub use placeholder::extract_slots;
