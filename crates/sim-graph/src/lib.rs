//! Graph framework for diffusion-style simulations.
//!
//! This crate contains the graph storage, scoped parameter tables,
//! model configuration, and state-delta utilities consumed by the
//! opinion model. It holds no update logic of its own.

pub mod config;
pub mod delta;
pub mod graph;
pub mod params;

// Re-export graph types
pub use graph::{Graph, NodeId};

// Re-export parameter types
pub use params::{ParamError, ParamSchema, ParamSpec, ParamStore};

// Re-export configuration types
pub use config::{ConfigError, ModelConfig};

// Re-export delta types
pub use delta::{band, status_delta, OpinionBand, StateDelta};
