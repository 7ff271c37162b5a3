#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    label: Option<String>,
    /// fixed display position, used by preset layouts only
    position: Option<Position>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            label: None,
            position: None,
        }
    }

    pub fn labeled(id: NodeId, label: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            label: Some(label.into()),
            position: Some(position),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Label if present, index otherwise.
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.id.index().to_string())
    }
}
