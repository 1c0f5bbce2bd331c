//! Calculator node
//!
//! One `CalcNode` owns a formula, the set of slots it references, and the
//! latest value recorded per slot. Deliveries arrive concurrently; the
//! record/readiness/evaluate sequence runs under a single lock per node so
//! that two deliveries cannot interleave between the write and the check.
//! Nodes share no state with each other.

use std::collections::HashMap;

use flowcalc_formula::{evaluate, extract_slots};
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::config::NodeConfig;
use crate::error::Result;
use crate::message::Payload;

/// Outcome of one delivery
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// Slot not referenced by the formula, or payload not numeric; the
    /// delivery was dropped without touching slot state
    Ignored,
    /// Value recorded, but other referenced slots still have no value
    Pending,
    /// Every referenced slot had a value and the formula reduced to a result
    Completed(f64),
    /// Every referenced slot had a value but evaluation failed; recorded
    /// values are left untouched
    Failed,
}

/// Calculator node instance
pub struct CalcNode {
    name: String,
    formula: String,
    used_slots: Vec<u8>,
    values: Mutex<HashMap<u8, String>>,
}

impl CalcNode {
    /// Build a node from its configuration, extracting the referenced
    /// slots once. Fails only on an unusable config.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate()?;

        let used_slots = extract_slots(&config.formula)?;
        let name = config.name.unwrap_or_else(|| "calculator".to_string());
        info!(
            "node '{}' initialized with formula '{}', slots {:?}",
            name, config.formula, used_slots
        );

        Ok(Self {
            name,
            formula: config.formula,
            used_slots,
            values: Mutex::new(HashMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Slots referenced by the formula, in first-occurrence order
    pub fn used_slots(&self) -> &[u8] {
        &self.used_slots
    }

    /// Record a delivery and run a round if every referenced slot has a
    /// value.
    ///
    /// Deliveries to unreferenced slots and non-numeric payloads are
    /// dropped before any state is touched. A failed round emits nothing
    /// and keeps the recorded values for future rounds.
    pub fn deliver(&self, index: u32, payload: &Payload) -> RoundOutcome {
        if !self.used_slots.iter().any(|s| u32::from(*s) == index) {
            debug!(
                "node '{}': input {} is not used in the formula, delivery dropped",
                self.name, index
            );
            return RoundOutcome::Ignored;
        }
        // Membership implies the index fits in a slot digit
        let slot = index as u8;

        let Some(value) = payload.to_decimal_string() else {
            debug!(
                "node '{}': payload for input {} is not numeric, delivery dropped",
                self.name, index
            );
            return RoundOutcome::Ignored;
        };

        // Record, readiness check and evaluation form one critical section:
        // a concurrent delivery must not observe the map between the write
        // and the check, or a round could be skipped or fired twice.
        let mut values = self.values.lock();
        values.insert(slot, value);

        if !self.is_ready(&values) {
            debug!(
                "node '{}': not all slots of the formula have a value yet",
                self.name
            );
            return RoundOutcome::Pending;
        }

        match evaluate(&self.formula, &values) {
            Ok(result) => {
                debug!("node '{}': round completed with {}", self.name, result);
                RoundOutcome::Completed(result)
            }
            Err(e) => {
                error!(
                    "node '{}': evaluation of '{}' failed: {}",
                    self.name, self.formula, e
                );
                RoundOutcome::Failed
            }
        }
    }

    fn is_ready(&self, values: &HashMap<u8, String>) -> bool {
        self.used_slots.iter().all(|slot| values.contains_key(slot))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn make_node(formula: &str) -> CalcNode {
        CalcNode::new(NodeConfig {
            name: Some("test".to_string()),
            formula: formula.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_round_fires_when_all_slots_present() {
        let node = make_node("$0+$1");

        assert_eq!(node.deliver(0, &Payload::Integer(2)), RoundOutcome::Pending);
        assert_eq!(
            node.deliver(1, &Payload::Integer(3)),
            RoundOutcome::Completed(5.0)
        );
    }

    #[test]
    fn test_unreferenced_slot_ignored() {
        let node = make_node("$0+$1+$2");

        assert_eq!(node.deliver(5, &Payload::Integer(1)), RoundOutcome::Ignored);
        assert_eq!(node.deliver(11, &Payload::Integer(1)), RoundOutcome::Ignored);
    }

    #[test]
    fn test_non_numeric_payload_ignored() {
        let node = make_node("$0+$1");

        assert_eq!(node.deliver(0, &Payload::Integer(2)), RoundOutcome::Pending);
        assert_eq!(
            node.deliver(1, &Payload::String("3".to_string())),
            RoundOutcome::Ignored
        );
        // The string payload must not have satisfied readiness
        assert_eq!(
            node.deliver(1, &Payload::Float(3.0)),
            RoundOutcome::Completed(5.0)
        );
    }

    #[test]
    fn test_redelivery_overwrites() {
        let node = make_node("$0*$1");

        node.deliver(0, &Payload::Integer(2));
        node.deliver(1, &Payload::Integer(10));
        assert_eq!(
            node.deliver(0, &Payload::Integer(5)),
            RoundOutcome::Completed(50.0)
        );
    }

    #[test]
    fn test_values_persist_across_rounds() {
        let node = make_node("$0+$1");

        node.deliver(0, &Payload::Integer(2));
        assert_eq!(
            node.deliver(1, &Payload::Integer(3)),
            RoundOutcome::Completed(5.0)
        );
        // Slot 1 keeps its value; a fresh slot 0 triggers the next round
        assert_eq!(
            node.deliver(0, &Payload::Integer(7)),
            RoundOutcome::Completed(10.0)
        );
    }

    #[test]
    fn test_division_by_zero_completes() {
        let node = make_node("$0/$1");

        node.deliver(0, &Payload::Integer(1));
        match node.deliver(1, &Payload::Integer(0)) {
            RoundOutcome::Completed(result) => assert!(result.is_infinite()),
            other => panic!("expected completed round, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_round_keeps_values() {
        // `$0+$1+` is extractable but never evaluates
        let node = make_node("$0+$1+");

        node.deliver(0, &Payload::Integer(2));
        assert_eq!(node.deliver(1, &Payload::Integer(3)), RoundOutcome::Failed);
        // Recorded values survive the failed round
        assert_eq!(node.deliver(0, &Payload::Integer(4)), RoundOutcome::Failed);
    }

    #[test]
    fn test_constant_formula_never_fires() {
        let node = make_node("2+3");

        assert!(node.used_slots().is_empty());
        // Without referenced slots every delivery is irrelevant
        assert_eq!(node.deliver(0, &Payload::Integer(1)), RoundOutcome::Ignored);
    }

    #[test]
    fn test_float_payloads() {
        let node = make_node("$0*$1");

        node.deliver(0, &Payload::Float(2.5));
        assert_eq!(
            node.deliver(1, &Payload::Integer64(4)),
            RoundOutcome::Completed(10.0)
        );
    }

    #[test]
    fn test_blank_formula_rejected() {
        let result = CalcNode::new(NodeConfig {
            name: None,
            formula: String::new(),
        });
        assert!(result.is_err());
    }
}
