//! Parameter Tables
//!
//! Scoped parameter schema and value store. A model declares its
//! parameters once (description, inclusive range, optional flag,
//! default) per scope: model-wide, per-node, or per-edge. The store
//! validates every write against the declared range and falls back to
//! the declared default on reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::graph::NodeId;

/// Declaration of a single parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Human-readable description
    pub descr: String,
    /// Inclusive value range
    pub range: (f64, f64),
    /// Whether the caller may omit the parameter
    pub optional: bool,
    /// Value used when the parameter is unset
    pub default: f64,
}

impl ParamSpec {
    pub fn new(descr: impl Into<String>, range: (f64, f64), optional: bool, default: f64) -> Self {
        Self {
            descr: descr.into(),
            range,
            optional,
            default,
        }
    }

    /// Check a value against the declared inclusive range.
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.range.0 && value <= self.range.1
    }
}

/// Parameter declarations grouped by scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamSchema {
    pub model: HashMap<String, ParamSpec>,
    pub nodes: HashMap<String, ParamSpec>,
    pub edges: HashMap<String, ParamSpec>,
}

impl ParamSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.model.insert(name.into(), spec);
        self
    }

    pub fn with_node(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.nodes.insert(name.into(), spec);
        self
    }

    pub fn with_edge(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.edges.insert(name.into(), spec);
        self
    }
}

/// Errors raised by parameter writes.
#[derive(Debug)]
pub enum ParamError {
    /// Parameter name not declared in the schema for its scope
    Unknown { scope: &'static str, name: String },
    /// Value outside the declared inclusive range
    OutOfRange {
        name: String,
        value: f64,
        range: (f64, f64),
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Unknown { scope, name } => {
                write!(f, "unknown {} parameter `{}`", scope, name)
            }
            ParamError::OutOfRange { name, value, range } => write!(
                f,
                "parameter `{}` value {} outside range [{}, {}]",
                name, value, range.0, range.1
            ),
        }
    }
}

impl std::error::Error for ParamError {}

/// Validated parameter values keyed by (scope, name, entity).
#[derive(Debug, Clone)]
pub struct ParamStore {
    schema: ParamSchema,
    model: HashMap<String, f64>,
    nodes: HashMap<String, HashMap<NodeId, f64>>,
    edges: HashMap<String, HashMap<(NodeId, NodeId), f64>>,
}

impl ParamStore {
    pub fn new(schema: ParamSchema) -> Self {
        Self {
            schema,
            model: HashMap::new(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    fn check(spec: Option<&ParamSpec>, scope: &'static str, name: &str, value: f64) -> Result<(), ParamError> {
        let spec = spec.ok_or_else(|| ParamError::Unknown {
            scope,
            name: name.to_string(),
        })?;
        if !spec.in_range(value) {
            return Err(ParamError::OutOfRange {
                name: name.to_string(),
                value,
                range: spec.range,
            });
        }
        Ok(())
    }

    /// Set a model-scope parameter.
    pub fn set_model(&mut self, name: &str, value: f64) -> Result<(), ParamError> {
        Self::check(self.schema.model.get(name), "model", name, value)?;
        self.model.insert(name.to_string(), value);
        Ok(())
    }

    /// Model-scope value, or the schema default when unset.
    /// `None` when the name is not declared.
    pub fn model_value(&self, name: &str) -> Option<f64> {
        self.model
            .get(name)
            .copied()
            .or_else(|| self.schema.model.get(name).map(|s| s.default))
    }

    /// Set a per-node parameter.
    pub fn set_node(&mut self, name: &str, node: NodeId, value: f64) -> Result<(), ParamError> {
        Self::check(self.schema.nodes.get(name), "node", name, value)?;
        self.nodes
            .entry(name.to_string())
            .or_default()
            .insert(node, value);
        Ok(())
    }

    /// Per-node value, or the schema default when unset.
    pub fn node_value(&self, name: &str, node: NodeId) -> Option<f64> {
        self.nodes
            .get(name)
            .and_then(|m| m.get(&node))
            .copied()
            .or_else(|| self.schema.nodes.get(name).map(|s| s.default))
    }

    /// Set a per-edge parameter under the (a, b) key as given.
    pub fn set_edge(&mut self, name: &str, a: NodeId, b: NodeId, value: f64) -> Result<(), ParamError> {
        Self::check(self.schema.edges.get(name), "edge", name, value)?;
        self.edges
            .entry(name.to_string())
            .or_default()
            .insert((a, b), value);
        Ok(())
    }

    /// Per-edge value with order-independent lookup: (a, b) first, then
    /// (b, a), then the schema default.
    pub fn edge_value(&self, name: &str, a: NodeId, b: NodeId) -> Option<f64> {
        let stored = self
            .edges
            .get(name)
            .and_then(|m| m.get(&(a, b)).or_else(|| m.get(&(b, a))))
            .copied();
        stored.or_else(|| self.schema.edges.get(name).map(|s| s.default))
    }

    /// Whether an explicit value exists for the edge in either direction.
    pub fn has_edge_value(&self, name: &str, a: NodeId, b: NodeId) -> bool {
        self.edges
            .get(name)
            .map(|m| m.contains_key(&(a, b)) || m.contains_key(&(b, a)))
            .unwrap_or(false)
    }
}
