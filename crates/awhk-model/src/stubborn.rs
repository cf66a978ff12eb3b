//! Stubborn Assignment
//!
//! One-time bootstrap that freezes a quota of extreme-opinion nodes.
//! Runs on the first advance call only: nodes at or beyond the extreme
//! cutoffs form candidate pools, and a configured fraction of the
//! selected pool is flagged stubborn by rejection sampling. Externally
//! supplied stubborn flags disable the automatic assignment entirely.

use std::collections::HashMap;

use sim_graph::{Graph, NodeId, ParamError, ParamStore};

use crate::selector::Selector;

/// Opinions at or below this value are negative-extreme candidates.
pub const NEGATIVE_EXTREME: f64 = -0.8;
/// Opinions at or above this value are positive-extreme candidates.
pub const POSITIVE_EXTREME: f64 = 0.8;

/// Which extreme-opinion pool the stubborn quota is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubbornPool {
    Negatives,
    Positives,
    Both,
}

impl StubbornPool {
    /// Map the configuration integer (-1 / +1 / 0) to a pool.
    pub fn from_option(value: i64) -> Option<Self> {
        match value {
            -1 => Some(StubbornPool::Negatives),
            1 => Some(StubbornPool::Positives),
            0 => Some(StubbornPool::Both),
            _ => None,
        }
    }
}

/// What the bootstrap phase found and did.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOutcome {
    /// Negative-extreme candidate count
    pub negatives: usize,
    /// Positive-extreme candidate count
    pub positives: usize,
    /// Nodes flagged stubborn by this phase
    pub assigned: usize,
    /// True when externally supplied flags suppressed assignment
    pub preconfigured: bool,
}

/// True when the node carries a set stubborn flag.
pub(crate) fn is_stubborn(store: &ParamStore, node: NodeId) -> bool {
    store.node_value("stubborn", node).map_or(false, |v| v > 0.0)
}

/// Flag `floor(|pool| * perc_stubbornness)` nodes of the selected pool
/// as stubborn. Only stubborn flags are mutated; opinions are not.
pub fn assign_stubborn<S: Selector>(
    graph: &Graph,
    status: &HashMap<NodeId, f64>,
    store: &mut ParamStore,
    pool: StubbornPool,
    perc_stubbornness: f64,
    selector: &mut S,
) -> Result<BootstrapOutcome, ParamError> {
    let mut negatives: Vec<NodeId> = Vec::new();
    let mut positives: Vec<NodeId> = Vec::new();
    let mut preconfigured = false;

    for &node in graph.nodes() {
        if is_stubborn(store, node) {
            preconfigured = true;
        }
        let opinion = status.get(&node).copied().unwrap_or(0.0);
        if opinion <= NEGATIVE_EXTREME {
            negatives.push(node);
        }
        if opinion >= POSITIVE_EXTREME {
            positives.push(node);
        }
    }

    let mut outcome = BootstrapOutcome {
        negatives: negatives.len(),
        positives: positives.len(),
        assigned: 0,
        preconfigured,
    };

    if preconfigured {
        tracing::info!("Stubborn flags preconfigured, skipping automatic assignment");
        return Ok(outcome);
    }

    let candidates: Vec<NodeId> = match pool {
        StubbornPool::Negatives => negatives,
        StubbornPool::Positives => positives,
        StubbornPool::Both => {
            let mut join = negatives;
            join.extend(positives);
            join
        }
    };

    let quota = if candidates.is_empty() {
        0
    } else {
        (candidates.len() as f64 * perc_stubbornness) as usize
    };

    // Draw with replacement; already-flagged draws are rejected.
    while outcome.assigned < quota {
        let node = candidates[selector.index(candidates.len())];
        if !is_stubborn(store, node) {
            store.set_node("stubborn", node, 1.0)?;
            outcome.assigned += 1;
        }
    }

    tracing::info!(
        "Assigned {} stubborn nodes ({} negative, {} positive candidates)",
        outcome.assigned,
        outcome.negatives,
        outcome.positives
    );
    Ok(outcome)
}
