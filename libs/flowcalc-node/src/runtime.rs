//! Delivery runtime
//!
//! Bridges a `CalcNode` between an inbound delivery channel and an
//! outbound result channel. One task per node; bounded channels provide
//! the backpressure.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::message::{InputMessage, OutputMessage};
use crate::node::{CalcNode, RoundOutcome};

/// A calculator node has exactly one output channel
pub const RESULT_CHANNEL: usize = 0;

/// Spawn the delivery loop for `node`.
///
/// Every inbound message is handed to the node; each completed round
/// produces one [`OutputMessage`] on [`RESULT_CHANNEL`]. The task ends
/// when the input channel closes or the result receiver is dropped.
pub fn spawn(
    node: Arc<CalcNode>,
    mut inputs: mpsc::Receiver<InputMessage>,
    outputs: mpsc::Sender<OutputMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = inputs.recv().await {
            if let RoundOutcome::Completed(result) =
                node.deliver(message.index, &message.payload)
            {
                let out = OutputMessage {
                    channel: RESULT_CHANNEL,
                    payload: result,
                };
                if outputs.send(out).await.is_err() {
                    warn!("node '{}': result receiver dropped, stopping", node.name());
                    break;
                }
            }
        }
        debug!("node '{}': input channel closed", node.name());
    })
}
