//! flowcalc-node - Calculator flow node
//!
//! A calculator node owns one formula and accumulates the latest value
//! delivered to each referenced input slot. Once every referenced slot has
//! a value, the delivery that completed the set triggers a round: the
//! formula is evaluated and the result emitted on output channel 0.
//!
//! Deliveries may arrive concurrently and in any order; each node
//! serializes its record/readiness/evaluate sequence behind a single lock.
//! Recorded values persist across rounds until overwritten, so a later
//! round may combine a fresh value on one slot with a stale one on another.
//! That reuse is deliberate.
//!
//! # Example
//!
//! ```rust
//! use flowcalc_node::{CalcNode, NodeConfig, Payload, RoundOutcome};
//!
//! let node = CalcNode::new(NodeConfig {
//!     name: Some("sum".to_string()),
//!     formula: "$0+$1".to_string(),
//! })
//! .unwrap();
//!
//! assert_eq!(node.deliver(0, &Payload::Integer(2)), RoundOutcome::Pending);
//! assert_eq!(
//!     node.deliver(1, &Payload::Integer(3)),
//!     RoundOutcome::Completed(5.0)
//! );
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod node;
pub mod runtime;

// Re-exports for convenience
pub use config::{load_config, NodeConfig};
pub use error::{NodeError, Result};
pub use message::{InputMessage, OutputMessage, Payload};
pub use node::{CalcNode, RoundOutcome};
pub use runtime::RESULT_CHANNEL;
