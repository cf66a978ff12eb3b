//! Attractive Weighted Hegselmann-Krause opinion model.
//!
//! Continuous opinions in [-1, 1] on a weighted social graph, evolved
//! through randomly sampled pairwise interactions under a bounded
//! confidence threshold. A configurable share of extreme-opinion nodes
//! is frozen ("stubborn") during a one-time bootstrap iteration.
//!
//! The graph, parameter tables, configuration, and delta utilities come
//! from the [`sim_graph`] crate; this crate owns the update engine.

pub mod attraction;
pub mod model;
pub mod report;
pub mod runlog;
pub mod selector;
pub mod stubborn;

// Re-export engine types
pub use model::{parameter_schema, AwhkModel, ModelError, MODEL_NAME};

// Re-export the pure update rule
pub use attraction::attract;

// Re-export bootstrap types
pub use stubborn::{BootstrapOutcome, StubbornPool, NEGATIVE_EXTREME, POSITIVE_EXTREME};

// Re-export randomness capability
pub use selector::{RandomSelector, ScriptedSelector, Selector};

// Re-export report types
pub use report::IterationReport;
pub use runlog::RunLogger;
