use crate::graph::edge::EdgeKey;
use crate::graph::node::{NodeId, Position};
use crate::render::layout::{self, LayoutKind};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualClass {
    Cut,
    Highlight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub id: NodeId,
    pub label: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualEdge {
    pub key: EdgeKey,
    pub label: String,
}

/// Imperative drawing target driven by a [`crate::render::adapter::RenderAdapter`].
pub trait Surface {
    fn clear(&mut self);
    fn add_node(&mut self, node: VisualNode);
    /// A second edge with the same key replaces the first.
    fn add_edge(&mut self, edge: VisualEdge);
    fn add_class(&mut self, key: EdgeKey, class: VisualClass);
    fn remove_class(&mut self, key: EdgeKey, class: VisualClass);
    fn edge_keys(&self) -> Vec<EdgeKey>;
    fn run_layout(&mut self, layout: &LayoutKind);
    fn fit(&mut self, padding: f64);

    fn clear_class(&mut self, class: VisualClass) {
        self.edge_keys()
            .into_iter()
            .for_each(|key| self.remove_class(key, class));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    label: String,
    pinned: Option<Position>,
    position: Position,
}

impl PlacedNode {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasEdge {
    label: String,
    classes: BTreeSet<VisualClass>,
}

impl CanvasEdge {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn has_class(&self, class: VisualClass) -> bool {
        self.classes.contains(&class)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: [0.0, 1.0],
            y: [0.0, 1.0],
        }
    }
}

/// In-memory element store painted by the terminal UI.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    nodes: BTreeMap<NodeId, PlacedNode>,
    edges: BTreeMap<EdgeKey, CanvasEdge>,
    viewport: Viewport,
    fits: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, PlacedNode> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<EdgeKey, CanvasEdge> {
        &self.edges
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&CanvasEdge> {
        self.edges.get(&key)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of viewport fits since creation.
    pub fn fit_count(&self) -> usize {
        self.fits
    }

    pub fn edges_with(&self, class: VisualClass) -> BTreeSet<EdgeKey> {
        self.edges
            .iter()
            .filter(|(_, e)| e.has_class(class))
            .map(|(k, _)| *k)
            .collect()
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn add_node(&mut self, node: VisualNode) {
        let position = node.position.unwrap_or(Position::new(0.0, 0.0));
        self.nodes.insert(
            node.id,
            PlacedNode {
                label: node.label,
                pinned: node.position,
                position,
            },
        );
    }

    fn add_edge(&mut self, edge: VisualEdge) {
        self.edges.insert(
            edge.key,
            CanvasEdge {
                label: edge.label,
                classes: BTreeSet::new(),
            },
        );
    }

    fn add_class(&mut self, key: EdgeKey, class: VisualClass) {
        if let Some(e) = self.edges.get_mut(&key) {
            e.classes.insert(class);
        }
    }

    fn remove_class(&mut self, key: EdgeKey, class: VisualClass) {
        if let Some(e) = self.edges.get_mut(&key) {
            e.classes.remove(&class);
        }
    }

    fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.keys().copied().collect()
    }

    fn run_layout(&mut self, kind: &LayoutKind) {
        let ids = self.nodes.keys().copied().collect::<Vec<_>>();
        let positions = match kind {
            LayoutKind::Force { seed, iterations } => {
                let edges = self.edges.keys().copied().collect::<Vec<_>>();
                layout::force_directed(&ids, &edges, *seed, *iterations)
            }
            LayoutKind::Preset => {
                let pinned = self.nodes.values().map(|n| n.pinned).collect::<Vec<_>>();
                layout::preset(&pinned)
            }
        };
        self.nodes
            .values_mut()
            .zip(positions)
            .for_each(|(node, p)| node.position = p);
    }

    fn fit(&mut self, padding: f64) {
        self.fits += 1;
        let mut positions = self.nodes.values().map(|n| n.position);
        let Some(first) = positions.next() else {
            self.viewport = Viewport::default();
            return;
        };
        let (min, max) = positions.fold((first, first), |(min, max), p| {
            (
                Position::new(min.x.min(p.x), min.y.min(p.y)),
                Position::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        self.viewport = Viewport {
            x: [min.x - padding, max.x + padding],
            y: [min.y - padding, max.y + padding],
        };
    }
}
