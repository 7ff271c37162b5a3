use crate::error::ValidationError;
use crate::graph::edge::Edge;
use crate::graph::node::{Node, NodeId};
use std::collections::HashSet;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Solver,
    Lite,
}

impl NetworkKind {
    pub const SOLVER_NODES: RangeInclusive<usize> = 8..=16;
    pub const LITE_NODES: usize = 7;

    pub fn node_bounds(self) -> RangeInclusive<usize> {
        match self {
            NetworkKind::Solver => Self::SOLVER_NODES,
            NetworkKind::Lite => Self::LITE_NODES..=Self::LITE_NODES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    kind: NetworkKind,
    nodes: Vec<Node>,
    source: NodeId,
    sink: NodeId,
    edges: Vec<Edge>,
}

impl Network {
    /// Builds an edgeless network. Bounds are not checked here; see [`Network::validate`].
    pub fn create_empty(kind: NetworkKind, n: usize, source: usize, sink: usize) -> Self {
        Self::with_nodes(kind, (0..n).map(|i| Node::new(NodeId(i))).collect(), source, sink)
    }

    pub fn with_nodes(kind: NetworkKind, nodes: Vec<Node>, source: usize, sink: usize) -> Self {
        Self {
            kind,
            nodes,
            source: NodeId(source),
            sink: NodeId(sink),
            edges: Vec::new(),
        }
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn set_terminals(&mut self, source: usize, sink: usize) {
        self.source = NodeId(source);
        self.sink = NodeId(sink);
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
    }

    /// Name used in statements and edge labels.
    pub fn display_name(&self, id: NodeId) -> String {
        self.node_by_id(id)
            .map(Node::display_name)
            .unwrap_or_else(|| id.index().to_string())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let n = self.node_count();
        let bounds = self.kind.node_bounds();
        if !bounds.contains(&n) {
            return Err(ValidationError::NodeCount {
                n,
                min: *bounds.start(),
                max: *bounds.end(),
            });
        }
        if self.source == self.sink {
            return Err(ValidationError::SourceIsSink(self.source.index()));
        }
        for (role, id) in [("source", self.source), ("sink", self.sink)] {
            if id.index() >= n {
                return Err(ValidationError::TerminalOutOfRange {
                    role,
                    index: id.index(),
                    n,
                });
            }
        }

        let mut seen = HashSet::new();
        for e in &self.edges {
            let (from, to) = (e.from().index(), e.to().index());
            if from >= n || to >= n {
                return Err(ValidationError::EndpointOutOfRange { from, to, n });
            }
            if e.capacity() < 0 {
                return Err(ValidationError::NegativeCapacity {
                    from,
                    to,
                    capacity: e.capacity(),
                });
            }
            if !seen.insert(e.key()) {
                return Err(ValidationError::DuplicateEdge { from, to });
            }
        }
        Ok(())
    }

    pub fn edges_text(&self) -> String {
        edges_to_text(&self.edges)
    }
}

/// Parses the `u v capacity` one-edge-per-line format. Blank lines are skipped.
pub fn parse_edges(text: &str) -> Result<Vec<Edge>, ValidationError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(i + 1, l))
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Edge, ValidationError> {
    let malformed = || ValidationError::MalformedEdge {
        line,
        text: text.trim().to_string(),
    };
    let fields = text
        .split_whitespace()
        .map(|f| f.parse::<i64>().map_err(|_| malformed()))
        .collect::<Result<Vec<i64>, _>>()?;
    let &[u, v, capacity] = fields.as_slice() else {
        return Err(malformed());
    };
    for value in [u, v] {
        if value < 0 {
            return Err(ValidationError::NegativeEndpoint { line, value });
        }
    }
    Ok(Edge::new(u as usize, v as usize, capacity))
}

pub fn edges_to_text(edges: &[Edge]) -> String {
    edges
        .iter()
        .map(|e| format!("{} {} {}", e.from().index(), e.to().index(), e.capacity()))
        .collect::<Vec<_>>()
        .join("\n")
}
