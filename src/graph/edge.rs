use crate::graph::node::NodeId;
use std::fmt;

/// Identity of a rendered edge: the ordered (source, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub NodeId, pub NodeId);

impl EdgeKey {
    pub fn new(from: usize, to: usize) -> Self {
        Self(NodeId(from), NodeId(to))
    }

    pub fn from(&self) -> NodeId {
        self.0
    }

    pub fn to(&self) -> NodeId {
        self.1
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.0.index(), self.1.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    /// validated to be >= 0
    capacity: i64,
}

impl Edge {
    pub fn new(from: usize, to: usize, capacity: i64) -> Self {
        Self {
            from: NodeId(from),
            to: NodeId(to),
            capacity,
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey(self.from, self.to)
    }

    pub fn with_capacity(&self, capacity: i64) -> Self {
        Self { capacity, ..*self }
    }
}
