//! Model Engine
//!
//! Owns the opinion state and drives it: random initialization,
//! sanitization, the iteration-0 stubborn bootstrap, and the
//! per-iteration interaction sampling loop.
//!
//! Updates within one advance call are sequential, not synchronous: a
//! working copy of the opinion map is mutated draw by draw, so later
//! draws in the same call observe earlier results. The copy becomes
//! the authoritative state only when the call returns, so callers
//! never see a half-updated iteration.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use sim_graph::{
    status_delta, ConfigError, Graph, ModelConfig, NodeId, ParamError, ParamSchema, ParamSpec,
    ParamStore,
};

use crate::attraction::attract;
use crate::report::IterationReport;
use crate::selector::{RandomSelector, ScriptedSelector, Selector};
use crate::stubborn::{self, StubbornPool};

/// Public name of the model.
pub const MODEL_NAME: &str = "Attractive Weighted HK";

/// Parameter declarations for this model.
pub fn parameter_schema() -> ParamSchema {
    ParamSchema::new()
        .with_model(
            "epsilon",
            ParamSpec::new("Bounded confidence threshold", (0.0, 1.0), false, 0.1),
        )
        .with_model(
            "perc_stubbornness",
            ParamSpec::new("Percentage of stubborn agents", (0.0, 1.0), true, 0.0),
        )
        .with_model(
            "option_for_stubbornness",
            ParamSpec::new("Distribution of stubborn agents", (-1.0, 1.0), false, 0.0),
        )
        .with_edge(
            "weight",
            ParamSpec::new("Edge weight", (0.0, 1.0), true, 0.1),
        )
        .with_node(
            "stubborn",
            ParamSpec::new("The agent is stubborn or not", (0.0, 1.0), true, 0.0),
        )
}

/// Errors raised by the model engine.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("missing parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("model not initialized")]
    NotInitialized,
}

/// Attractive Weighted Hegselmann-Krause model over a weighted graph.
#[derive(Debug, Clone)]
pub struct AwhkModel<S = RandomSelector> {
    graph: Graph,
    config: ModelConfig,
    store: ParamStore,
    pool: StubbornPool,
    status: HashMap<NodeId, f64>,
    initial_status: HashMap<NodeId, f64>,
    iteration: u64,
    selector: S,
}

impl AwhkModel<RandomSelector> {
    /// Model with the default RNG-backed selector, seeded from the
    /// configuration when a seed is present.
    pub fn new(graph: Graph, config: ModelConfig) -> Result<Self, ModelError> {
        let selector = match config.seed {
            Some(seed) => RandomSelector::from_seed(seed),
            None => RandomSelector::from_entropy(),
        };
        Self::with_selector(graph, config, selector)
    }
}

impl AwhkModel<ScriptedSelector> {
    /// Model replaying a scripted draw sequence.
    pub fn scripted(
        graph: Graph,
        config: ModelConfig,
        selector: ScriptedSelector,
    ) -> Result<Self, ModelError> {
        Self::with_selector(graph, config, selector)
    }
}

impl<S: Selector> AwhkModel<S> {
    /// Model with an injected draw source.
    pub fn with_selector(graph: Graph, config: ModelConfig, selector: S) -> Result<Self, ModelError> {
        let schema = parameter_schema();
        config.validate(&schema)?;
        let pool = StubbornPool::from_option(config.option_for_stubbornness)
            .ok_or(ConfigError::InvalidPoolOption(config.option_for_stubbornness))?;

        Ok(Self {
            graph,
            config,
            store: ParamStore::new(schema),
            pool,
            status: HashMap::new(),
            initial_status: HashMap::new(),
            iteration: 0,
            selector,
        })
    }

    /// Draw fresh opinions for every node and prime the parameter
    /// tables. Overwrites any previously held opinions and resets the
    /// iteration counter.
    pub fn initialize(&mut self) -> Result<(), ModelError> {
        self.store.set_model("epsilon", self.config.epsilon)?;
        self.store
            .set_model("perc_stubbornness", self.config.perc_stubbornness)?;
        self.store.set_model(
            "option_for_stubbornness",
            self.config.option_for_stubbornness as f64,
        )?;

        for &raw in &self.config.stubborn_nodes {
            let node = NodeId(raw);
            if !self.graph.contains(node) {
                return Err(ModelError::UnknownNode(node));
            }
            self.store.set_node("stubborn", node, 1.0)?;
        }

        for &(a, b) in self.graph.edges() {
            if self.store.has_edge_value("weight", a, b) {
                continue;
            }
            let weight = if self.config.random_weights {
                self.selector.unit()
            } else {
                self.config.default_edge_weight
            };
            self.store.set_edge("weight", a, b, weight)?;
        }

        self.status.clear();
        for &node in self.graph.nodes() {
            self.status.insert(node, self.selector.opinion());
        }
        self.initial_status = self.status.clone();
        self.iteration = 0;

        tracing::info!(
            "Initialized {} node opinions (epsilon {}, pool option {})",
            self.graph.node_count(),
            self.config.epsilon,
            self.config.option_for_stubbornness
        );
        Ok(())
    }

    /// Advance the model by one iteration.
    ///
    /// The first call runs the stubborn bootstrap and reports the full
    /// opinion state; every later call runs one interaction round of N
    /// draws (N = node count) and reports the changed nodes. With
    /// `report_full_status = false` the status map is left empty.
    pub fn advance(&mut self, report_full_status: bool) -> Result<IterationReport, ModelError> {
        if self.status.len() != self.graph.node_count() {
            return Err(ModelError::NotInitialized);
        }
        self.sanitize_opinions();

        if self.iteration == 0 {
            return self.bootstrap(report_full_status);
        }

        let epsilon = self
            .store
            .model_value("epsilon")
            .ok_or(ModelError::MissingParameter("epsilon"))?;
        let nodes = self.graph.nodes();
        let mut working = self.status.clone();

        for _ in 0..nodes.len() {
            let n1 = nodes[self.selector.index(nodes.len())];
            if stubborn::is_stubborn(&self.store, n1) {
                continue;
            }
            let neighbours = self.graph.neighbors(n1);
            if neighbours.is_empty() {
                // isolated node: the draw still counts, no retry
                continue;
            }
            let neigh = neighbours[self.selector.index(neighbours.len())];
            let weight = self
                .store
                .edge_value("weight", n1, neigh)
                .ok_or(ModelError::MissingParameter("weight"))?;

            let a = working
                .get(&n1)
                .copied()
                .ok_or(ModelError::UnknownNode(n1))?;
            let b = working
                .get(&neigh)
                .copied()
                .ok_or(ModelError::UnknownNode(neigh))?;

            working.insert(n1, attract(a, b, weight, epsilon));
        }

        let delta = status_delta(&self.status, &working);
        self.status = working;

        let status = if report_full_status {
            delta.changed.clone()
        } else {
            BTreeMap::new()
        };
        let report = IterationReport::from_delta(self.iteration, status, delta);
        self.iteration += 1;

        tracing::debug!(
            "Iteration {} changed {} opinions",
            report.iteration,
            report.changed_count()
        );
        Ok(report)
    }

    /// Run `n` consecutive advance calls and collect the reports.
    pub fn advance_many(
        &mut self,
        n: usize,
        report_full_status: bool,
    ) -> Result<Vec<IterationReport>, ModelError> {
        let mut reports = Vec::with_capacity(n);
        for _ in 0..n {
            reports.push(self.advance(report_full_status)?);
        }
        Ok(reports)
    }

    /// Iteration 0: assign stubborn flags, report the full state.
    fn bootstrap(&mut self, report_full_status: bool) -> Result<IterationReport, ModelError> {
        stubborn::assign_stubborn(
            &self.graph,
            &self.status,
            &mut self.store,
            self.pool,
            self.config.perc_stubbornness,
            &mut self.selector,
        )?;

        let delta = status_delta(&self.status, &self.status);
        let status = if report_full_status {
            self.status.iter().map(|(&n, &v)| (n, v)).collect()
        } else {
            BTreeMap::new()
        };
        let report = IterationReport::from_delta(0, status, delta);
        self.iteration = 1;
        Ok(report)
    }

    /// Reset out-of-range opinions to 0.0. Values exactly at the
    /// boundaries are valid and left untouched.
    fn sanitize_opinions(&mut self) {
        for value in self.status.values_mut() {
            if *value > 1.0 || *value < -1.0 {
                *value = 0.0;
            }
        }
    }

    /// Current opinion of a node.
    pub fn opinion(&self, node: NodeId) -> Option<f64> {
        self.status.get(&node).copied()
    }

    /// Override a node's opinion (configured starting states, tests).
    pub fn set_opinion(&mut self, node: NodeId, value: f64) -> Result<(), ModelError> {
        if !self.graph.contains(node) {
            return Err(ModelError::UnknownNode(node));
        }
        self.status.insert(node, value);
        Ok(())
    }

    /// The authoritative opinion state.
    pub fn status(&self) -> &HashMap<NodeId, f64> {
        &self.status
    }

    /// Snapshot taken right after initialization.
    pub fn initial_status(&self) -> &HashMap<NodeId, f64> {
        &self.initial_status
    }

    /// Next iteration to run (0 until the bootstrap has happened).
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn is_stubborn(&self, node: NodeId) -> bool {
        stubborn::is_stubborn(&self.store, node)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn params(&self) -> &ParamStore {
        &self.store
    }

    /// Assign an explicit weight to an edge before the run starts.
    pub fn set_edge_weight(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<(), ModelError> {
        self.store.set_edge("weight", a, b, weight)?;
        Ok(())
    }
}
