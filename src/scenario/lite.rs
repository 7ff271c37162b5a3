use crate::error::ValidationError;
use crate::graph::edge::Edge;
use crate::graph::network::{Network, NetworkKind};
use crate::graph::node::{Node, NodeId, Position};
use rand::Rng;

pub const LABELS: [&str; 7] = ["O", "A", "B", "C", "D", "E", "F"];

const POSITIONS: [(f64, f64); 7] = [
    (60.0, 250.0),
    (220.0, 120.0),
    (240.0, 250.0),
    (230.0, 380.0),
    (460.0, 120.0),
    (460.0, 340.0),
    (640.0, 230.0),
];

const EDGES: [(usize, usize, i64); 12] = [
    (0, 1, 5),
    (0, 2, 7),
    (0, 3, 4),
    (1, 4, 3),
    (1, 2, 7),
    (2, 4, 4),
    (2, 5, 5),
    (2, 3, 2),
    (3, 5, 4),
    (5, 4, 6),
    (4, 6, 9),
    (5, 6, 8),
];

pub const DEFAULT_SOURCE: usize = 0;
pub const DEFAULT_SINK: usize = 6;
pub const DEFAULT_CAP_MIN: i64 = 3;
pub const DEFAULT_CAP_MAX: i64 = 10;
/// The solver needs at least this many nodes, so promoted networks are padded.
pub const PROMOTED_NODES: usize = 8;

/// The teaching network with its default capacities.
pub fn lite_network(source: usize, sink: usize) -> Network {
    let nodes = LABELS
        .iter()
        .zip(POSITIONS)
        .enumerate()
        .map(|(i, (label, (x, y)))| Node::labeled(NodeId(i), *label, Position::new(x, y)))
        .collect();
    let mut network = Network::with_nodes(NetworkKind::Lite, nodes, source, sink);
    network.set_edges(EDGES.iter().map(|&(u, v, c)| Edge::new(u, v, c)).collect());
    network
}

/// New network over the same topology with capacities drawn uniformly from `[min, max]`.
pub fn randomize<R: Rng>(
    topology: &Network,
    min: i64,
    max: i64,
    rng: &mut R,
) -> Result<Network, ValidationError> {
    if min > max || min < 0 {
        return Err(ValidationError::CapacityRange { min, max });
    }
    let mut network = topology.clone();
    network.set_edges(
        topology
            .edges()
            .iter()
            .map(|e| e.with_capacity(rng.gen_range(min..=max)))
            .collect(),
    );
    Ok(network)
}

/// One-way copy of an exercise into a solver network.
pub fn promote(lite: &Network) -> Network {
    let mut network = Network::create_empty(
        NetworkKind::Solver,
        PROMOTED_NODES.max(lite.node_count()),
        lite.source().index(),
        lite.sink().index(),
    );
    network.set_edges(lite.edges().to_vec());
    network
}

/// Source/sink and capacity range selected on the exercise panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSettings {
    source: usize,
    sink: usize,
    cap_min: i64,
    cap_max: i64,
}

impl ExerciseSettings {
    pub fn new(cap_min: i64, cap_max: i64) -> Self {
        Self {
            source: DEFAULT_SOURCE,
            sink: DEFAULT_SINK,
            cap_min,
            cap_max,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    pub fn cap_min(&self) -> i64 {
        self.cap_min
    }

    pub fn cap_max(&self) -> i64 {
        self.cap_max
    }

    /// Moves the source by `delta`, skipping the sink.
    pub fn shift_source(&mut self, delta: isize) {
        self.source = shift_skipping(self.source, delta, self.sink);
    }

    /// Moves the sink by `delta`, skipping the source.
    pub fn shift_sink(&mut self, delta: isize) {
        self.sink = shift_skipping(self.sink, delta, self.source);
    }

    pub fn adjust_min(&mut self, delta: i64) {
        self.cap_min = (self.cap_min + delta).max(0);
    }

    pub fn adjust_max(&mut self, delta: i64) {
        self.cap_max = (self.cap_max + delta).max(0);
    }
}

fn shift_skipping(current: usize, delta: isize, taken: usize) -> usize {
    let n = LABELS.len() as isize;
    let mut next = current as isize;
    loop {
        next = (next + delta).rem_euclid(n);
        if next as usize != taken {
            return next as usize;
        }
    }
}
