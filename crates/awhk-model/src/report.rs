//! Iteration Reports
//!
//! Serialization structs for per-iteration output: the opinion status
//! view, node counts by sign band, and per-node opinion deltas.
//!
//! Iteration 0 carries the full opinion map; later iterations carry
//! only the nodes that changed. When the caller asks for no status the
//! map is empty and only the summaries remain.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use sim_graph::{NodeId, OpinionBand, StateDelta};

/// Output of one advance call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Iteration this report describes (0 = bootstrap)
    pub iteration: u64,
    /// Full opinion map at iteration 0, changed-only thereafter;
    /// empty when status reporting is off
    pub status: BTreeMap<NodeId, f64>,
    /// Node counts by sign band
    pub node_count: BTreeMap<OpinionBand, usize>,
    /// Opinion change (new minus old) per changed node
    pub status_delta: BTreeMap<NodeId, f64>,
}

impl IterationReport {
    /// Assemble a report from a computed delta.
    pub fn from_delta(iteration: u64, status: BTreeMap<NodeId, f64>, delta: StateDelta) -> Self {
        Self {
            iteration,
            status,
            node_count: delta.node_count,
            status_delta: delta.status_delta,
        }
    }

    /// Number of nodes whose opinion changed this iteration.
    pub fn changed_count(&self) -> usize {
        self.status_delta.len()
    }

    /// Serializes the report to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the report to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IterationReport {
        let mut status = BTreeMap::new();
        status.insert(NodeId(0), 0.83375);
        status.insert(NodeId(1), 0.754984375);
        let mut node_count = BTreeMap::new();
        node_count.insert(OpinionBand::Negative, 1);
        node_count.insert(OpinionBand::Neutral, 0);
        node_count.insert(OpinionBand::Positive, 2);
        let mut status_delta = BTreeMap::new();
        status_delta.insert(NodeId(0), -0.06625);
        status_delta.insert(NodeId(1), -0.095015625);

        IterationReport {
            iteration: 1,
            status,
            node_count,
            status_delta,
        }
    }

    #[test]
    fn test_changed_count() {
        assert_eq!(sample().changed_count(), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let report = sample();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"iteration\":1"));
        assert!(json.contains("positive"));

        let parsed = IterationReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_empty_status_serializes() {
        let report = IterationReport {
            iteration: 3,
            status: BTreeMap::new(),
            node_count: BTreeMap::new(),
            status_delta: BTreeMap::new(),
        };

        let json = report.to_json().unwrap();
        let parsed = IterationReport::from_json(&json).unwrap();
        assert_eq!(parsed.iteration, 3);
        assert!(parsed.status.is_empty());
    }
}
