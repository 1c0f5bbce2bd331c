//! Delivery and result message types

use serde::{Deserialize, Serialize};

/// Tagged payload carried by a delivery.
///
/// Only the numeric tags (`float`, `integer`, `integer64`) participate in
/// calculation; a delivery with any other tag is dropped by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Payload {
    Float(f64),
    Integer(i32),
    Integer64(i64),
    Boolean(bool),
    String(String),
}

impl Payload {
    /// Canonical decimal rendering used for slot storage.
    ///
    /// Returns `None` for non-numeric payloads. Floats render through ryu
    /// (round-trippable, including `inf`/`NaN`), integers through itoa.
    pub fn to_decimal_string(&self) -> Option<String> {
        match self {
            Payload::Float(v) => Some(ryu::Buffer::new().format(*v).to_string()),
            Payload::Integer(v) => Some(itoa::Buffer::new().format(*v).to_string()),
            Payload::Integer64(v) => Some(itoa::Buffer::new().format(*v).to_string()),
            Payload::Boolean(_) | Payload::String(_) => None,
        }
    }
}

/// One delivery event: a tagged value addressed to an input slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMessage {
    pub index: u32,
    pub payload: Payload,
}

/// One completed round's result, addressed to an output channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMessage {
    pub channel: usize,
    pub payload: f64,
}
