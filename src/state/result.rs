use crate::graph::edge::EdgeKey;
use crate::graph::node::NodeId;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingStep {
    path: Vec<EdgeKey>,
    /// > 0
    bottleneck: i64,
    cumulative: i64,
}

impl AugmentingStep {
    pub fn new(path: Vec<EdgeKey>, bottleneck: i64, cumulative: i64) -> Self {
        Self {
            path,
            bottleneck,
            cumulative,
        }
    }

    pub fn path(&self) -> &[EdgeKey] {
        &self.path
    }

    pub fn bottleneck(&self) -> i64 {
        self.bottleneck
    }

    pub fn cumulative(&self) -> i64 {
        self.cumulative
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowAssignment {
    pub edge: EdgeKey,
    pub flow: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    source_side: Vec<NodeId>,
    sink_side: Vec<NodeId>,
    edges: Vec<EdgeKey>,
}

impl MinCut {
    pub fn new(source_side: Vec<NodeId>, sink_side: Vec<NodeId>, edges: Vec<EdgeKey>) -> Self {
        Self {
            source_side,
            sink_side,
            edges,
        }
    }

    pub fn source_side(&self) -> &[NodeId] {
        &self.source_side
    }

    pub fn sink_side(&self) -> &[NodeId] {
        &self.sink_side
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn edge_set(&self) -> HashSet<EdgeKey> {
        self.edges.iter().copied().collect()
    }
}

/// Solution returned by the computation service. Never modified after receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult {
    max_flow: i64,
    steps: Vec<AugmentingStep>,
    assignments: Vec<FlowAssignment>,
    min_cut: MinCut,
}

impl SolverResult {
    pub fn new(
        max_flow: i64,
        steps: Vec<AugmentingStep>,
        assignments: Vec<FlowAssignment>,
        min_cut: MinCut,
    ) -> Self {
        Self {
            max_flow,
            steps,
            assignments,
            min_cut,
        }
    }

    pub fn max_flow(&self) -> i64 {
        self.max_flow
    }

    pub fn steps(&self) -> &[AugmentingStep] {
        &self.steps
    }

    pub fn assignments(&self) -> &[FlowAssignment] {
        &self.assignments
    }

    pub fn min_cut(&self) -> &MinCut {
        &self.min_cut
    }
}
