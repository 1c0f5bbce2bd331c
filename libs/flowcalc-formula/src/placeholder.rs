//! Placeholder extraction
//!
//! Scans a formula for `$<digit>` slot references. Runs once per node at
//! initialization time; the resulting slot set is immutable afterwards.

use tracing::debug;

use crate::error::{FormulaError, Result};

/// Collect the distinct slot indices referenced by `formula`, in
/// first-occurrence order.
///
/// Slot references are `$` followed by a single decimal digit, so indices
/// are always in 0..=9. Any other text is ignored; a formula without
/// placeholders yields an empty set, which is legal.
pub fn extract_slots(formula: &str) -> Result<Vec<u8>> {
    let pattern = regex::Regex::new(r"\$([0-9])")
        .map_err(|e| FormulaError::malformed(format!("slot pattern: {}", e)))?;

    let mut slots: Vec<u8> = Vec::with_capacity(4);
    for captures in pattern.captures_iter(formula) {
        // Single-digit capture, cannot fail to index
        let digit = captures[1].as_bytes()[0];
        let slot = digit - b'0';
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }

    debug!("formula '{}' references slots {:?}", formula, slots);
    Ok(slots)
}
