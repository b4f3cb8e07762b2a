//! Scaffolding risk modifier.

use crate::config::ScaffoldingWeights;
use crate::document::ScaffoldingInventory;
use crate::keywords::{is_one_of, MCP_ORCHESTRATOR, SANDBOX_TYPES};

/// Multiplicative risk reduction in `[weights.floor, 1.0]`.
pub fn scaffolding_modifier(inventory: &ScaffoldingInventory, weights: &ScaffoldingWeights) -> f64 {
    let mut modifier = 1.0;

    if inventory.mcp_used || inventory.orchestrator.eq_ignore_ascii_case(MCP_ORCHESTRATOR) {
        modifier *= weights.mcp;
    }
    if inventory.sandboxed || is_one_of(&inventory.sandbox_type, SANDBOX_TYPES) {
        modifier *= weights.sandbox;
    }
    if inventory.circuit_breaker || inventory.kill_switch {
        modifier *= weights.circuit_breaker;
    }

    modifier.max(weights.floor)
}
