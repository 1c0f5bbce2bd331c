//! Integration tests for calculator node rounds
//!
//! Exercises the delivery sequencing behavior end to end: readiness
//! gating, overwrite and reuse semantics, dropped deliveries, and
//! concurrent delivery through the node's critical section.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use std::sync::Arc;

use flowcalc_node::{CalcNode, NodeConfig, Payload, RoundOutcome};

fn make_node(name: &str, formula: &str) -> CalcNode {
    CalcNode::new(NodeConfig {
        name: Some(name.to_string()),
        formula: formula.to_string(),
    })
    .unwrap()
}

#[test]
fn partial_delivery_yields_no_result() {
    let node = make_node("sum", "$0+$1");

    assert_eq!(node.deliver(0, &Payload::Integer(2)), RoundOutcome::Pending);
    // Re-delivering the same slot does not complete the round either
    assert_eq!(node.deliver(0, &Payload::Integer(9)), RoundOutcome::Pending);
}

#[test]
fn bracketed_formula_round() {
    let node = make_node("scaled", "($0+$1)*$2");

    node.deliver(0, &Payload::Integer(2));
    node.deliver(1, &Payload::Integer(3));
    assert_eq!(
        node.deliver(2, &Payload::Integer(4)),
        RoundOutcome::Completed(20.0)
    );
}

#[test]
fn stale_value_reused_in_later_round() {
    let node = make_node("mix", "$0-$1");

    node.deliver(0, &Payload::Integer(10));
    assert_eq!(
        node.deliver(1, &Payload::Integer(4)),
        RoundOutcome::Completed(6.0)
    );

    // Only slot 1 refreshes; slot 0 reuses the value from the first round
    assert_eq!(
        node.deliver(1, &Payload::Integer(1)),
        RoundOutcome::Completed(9.0)
    );
}

#[test]
fn dropped_deliveries_never_trigger_rounds() {
    let node = make_node("gate", "$0*$1");

    node.deliver(0, &Payload::Integer(3));
    // Unreferenced slot and non-numeric payload both leave state untouched
    assert_eq!(node.deliver(7, &Payload::Integer(100)), RoundOutcome::Ignored);
    assert_eq!(
        node.deliver(1, &Payload::Boolean(true)),
        RoundOutcome::Ignored
    );

    assert_eq!(
        node.deliver(1, &Payload::Integer(5)),
        RoundOutcome::Completed(15.0)
    );
}

#[test]
fn failed_round_leaves_state_usable() {
    // Slot extraction sees $0 and $1, but the trailing operator makes
    // every evaluation fail
    let node = make_node("broken", "$0/$1*");

    node.deliver(0, &Payload::Integer(8));
    assert_eq!(node.deliver(1, &Payload::Integer(2)), RoundOutcome::Failed);
    assert_eq!(node.deliver(1, &Payload::Integer(4)), RoundOutcome::Failed);
}

#[test]
fn infinity_is_a_result_not_a_failure() {
    let node = make_node("ratio", "$0/$1");

    node.deliver(0, &Payload::Float(1.0));
    match node.deliver(1, &Payload::Integer(0)) {
        RoundOutcome::Completed(result) => assert!(result.is_infinite()),
        other => panic!("expected completed round, got {:?}", other),
    }
}

#[test]
fn concurrent_deliveries_are_serialized() {
    let node = Arc::new(make_node("concurrent", "$0+$1"));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let node = Arc::clone(&node);
            scope.spawn(move || {
                for _ in 0..100 {
                    let outcome = node.deliver(0, &Payload::Integer(1));
                    // Slot 0 always holds 1, so any completed round is exact
                    match outcome {
                        RoundOutcome::Pending => {}
                        RoundOutcome::Completed(result) => assert_eq!(result, 3.0),
                        other => panic!("unexpected outcome {:?}", other),
                    }
                }
            });
        }

        let node = Arc::clone(&node);
        scope.spawn(move || {
            let outcome = node.deliver(1, &Payload::Integer(2));
            match outcome {
                RoundOutcome::Pending | RoundOutcome::Completed(_) => {}
                other => panic!("unexpected outcome {:?}", other),
            }
        });
    });

    // Steady state after the storm: both slots populated, rounds exact
    assert_eq!(
        node.deliver(0, &Payload::Integer(1)),
        RoundOutcome::Completed(3.0)
    );
}
