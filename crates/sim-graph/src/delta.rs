//! State Deltas
//!
//! Compares two opinion snapshots and summarizes what changed: the new
//! values of changed nodes, per-node opinion deltas, and node counts by
//! sign band. Output maps are ordered so serialized reports are stable.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::graph::NodeId;

/// Discretized opinion status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OpinionBand {
    Negative,
    Neutral,
    Positive,
}

impl OpinionBand {
    pub const ALL: [OpinionBand; 3] = [
        OpinionBand::Negative,
        OpinionBand::Neutral,
        OpinionBand::Positive,
    ];
}

/// Discretize a continuous opinion by sign.
pub fn band(value: f64) -> OpinionBand {
    if value < 0.0 {
        OpinionBand::Negative
    } else if value > 0.0 {
        OpinionBand::Positive
    } else {
        OpinionBand::Neutral
    }
}

/// Summary of the differences between two opinion snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateDelta {
    /// New values of nodes whose opinion changed
    pub changed: BTreeMap<NodeId, f64>,
    /// Node counts by sign band over the new snapshot (all bands present)
    pub node_count: BTreeMap<OpinionBand, usize>,
    /// Per-node opinion change (new minus old) for changed nodes
    pub status_delta: BTreeMap<NodeId, f64>,
}

/// Compare two snapshots. Nodes present only in `new` count as unchanged.
pub fn status_delta(old: &HashMap<NodeId, f64>, new: &HashMap<NodeId, f64>) -> StateDelta {
    let mut delta = StateDelta::default();
    for b in OpinionBand::ALL {
        delta.node_count.insert(b, 0);
    }

    for (&node, &value) in new {
        *delta.node_count.entry(band(value)).or_insert(0) += 1;

        let prev = old.get(&node).copied().unwrap_or(value);
        if prev != value {
            delta.changed.insert(node, value);
            delta.status_delta.insert(node, value - prev);
        }
    }
    delta
}
