use crate::graph::edge::{Edge, EdgeKey};
use crate::graph::network::{Network, NetworkKind};
use crate::render::layout::LayoutKind;
use crate::render::surface::{Surface, VisualClass, VisualEdge, VisualNode};
use crate::state::result::SolverResult;
use tracing::trace;

/// Projects a network (and optionally a solution) onto one surface.
///
/// Every draw starts from an empty surface, so drawing the same network twice
/// yields the same element set as drawing it once.
pub struct RenderAdapter<S: Surface> {
    surface: Option<S>,
    layout: LayoutKind,
    padding: f64,
}

impl<S: Surface> RenderAdapter<S> {
    pub fn new(layout: LayoutKind, padding: f64) -> Self {
        Self {
            surface: None,
            layout,
            padding,
        }
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn draw(&mut self, network: &Network, overlay: Option<&SolverResult>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();

        network.nodes().iter().for_each(|node| {
            surface.add_node(VisualNode {
                id: node.id(),
                label: node.display_name(),
                position: node.position(),
            })
        });
        network.edges().iter().for_each(|edge| {
            surface.add_edge(VisualEdge {
                key: edge.key(),
                label: edge_label(network, edge),
            })
        });

        if let Some(result) = overlay {
            let cut = result.min_cut().edge_set();
            network
                .edges()
                .iter()
                .map(Edge::key)
                .filter(|k| cut.contains(k))
                .for_each(|k| surface.add_class(k, VisualClass::Cut));
        }

        surface.run_layout(&self.layout);
        surface.fit(self.padding);
        trace!(nodes = network.node_count(), edges = network.edges().len(), "surface redrawn");
    }

    pub fn refit(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.fit(self.padding);
        }
    }

    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    pub fn set_highlight(&mut self, path: &[EdgeKey], on: bool) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        path.iter().for_each(|k| {
            if on {
                surface.add_class(*k, VisualClass::Highlight)
            } else {
                surface.remove_class(*k, VisualClass::Highlight)
            }
        });
    }

    pub fn clear_highlights(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear_class(VisualClass::Highlight);
        }
    }
}

fn edge_label(network: &Network, edge: &Edge) -> String {
    let from = network.display_name(edge.from());
    let to = network.display_name(edge.to());
    match network.kind() {
        NetworkKind::Solver => format!("{from}→{to} cap={}", edge.capacity()),
        NetworkKind::Lite => format!("{from}→{to} ({})", edge.capacity()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeId;
    use crate::render::surface::Canvas;
    use crate::state::result::MinCut;
    use std::collections::BTreeSet;

    fn network() -> Network {
        let mut net = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        net.set_edges(vec![
            Edge::new(0, 1, 10),
            Edge::new(0, 2, 5),
            Edge::new(1, 7, 10),
            Edge::new(2, 7, 10),
        ]);
        net
    }

    fn adapter() -> RenderAdapter<Canvas> {
        let mut adapter = RenderAdapter::new(LayoutKind::Force { seed: 1, iterations: 50 }, 30.0);
        adapter.attach(Canvas::new());
        adapter
    }

    fn overlay(cut: Vec<EdgeKey>) -> SolverResult {
        SolverResult::new(
            10,
            Vec::new(),
            Vec::new(),
            MinCut::new(vec![NodeId(0)], vec![NodeId(1), NodeId(2), NodeId(7)], cut),
        )
    }

    #[test]
    fn test_draw_projects_every_element() {
        let mut adapter = adapter();
        adapter.draw(&network(), None);
        let canvas = adapter.surface().unwrap();

        assert_eq!(8, canvas.nodes().len());
        assert_eq!(4, canvas.edges().len());
        assert_eq!(
            "0→1 cap=10",
            canvas.edge(EdgeKey::new(0, 1)).unwrap().label()
        );
        assert!(canvas.edges_with(VisualClass::Cut).is_empty());
    }

    #[test]
    fn test_draw_is_idempotent() {
        let mut once = adapter();
        once.draw(&network(), None);
        let mut twice = adapter();
        twice.draw(&network(), None);
        twice.draw(&network(), None);

        let (a, b) = (once.surface().unwrap(), twice.surface().unwrap());
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_cut_class_matches_cut_list() {
        let mut adapter = adapter();
        // (5, 6) is not a rendered edge and must not appear
        let result = overlay(vec![EdgeKey::new(0, 1), EdgeKey::new(0, 2), EdgeKey::new(5, 6)]);
        adapter.draw(&network(), Some(&result));

        assert_eq!(
            BTreeSet::from([EdgeKey::new(0, 1), EdgeKey::new(0, 2)]),
            adapter.surface().unwrap().edges_with(VisualClass::Cut)
        );
    }

    #[test]
    fn test_redraw_without_overlay_drops_cut_and_highlights() {
        let mut adapter = adapter();
        adapter.draw(&network(), Some(&overlay(vec![EdgeKey::new(0, 1)])));
        adapter.set_highlight(&[EdgeKey::new(1, 7)], true);
        adapter.draw(&network(), None);

        let canvas = adapter.surface().unwrap();
        assert!(canvas.edges_with(VisualClass::Cut).is_empty());
        assert!(canvas.edges_with(VisualClass::Highlight).is_empty());
    }

    #[test]
    fn test_detached_adapter_is_noop() {
        let mut adapter: RenderAdapter<Canvas> = RenderAdapter::new(LayoutKind::Preset, 20.0);
        adapter.draw(&network(), None);
        adapter.refit();
        adapter.set_highlight(&[EdgeKey::new(0, 1)], true);
        assert!(adapter.surface().is_none());
    }

    #[test]
    fn test_empty_edge_list() {
        let mut adapter = adapter();
        adapter.draw(&Network::create_empty(NetworkKind::Solver, 8, 0, 7), None);
        let canvas = adapter.surface().unwrap();
        assert_eq!(8, canvas.nodes().len());
        assert!(canvas.edges().is_empty());
    }

    #[test]
    fn test_refit_only_fits() {
        let mut adapter = adapter();
        adapter.draw(&network(), None);
        let before = adapter.surface().unwrap().edges().clone();
        adapter.refit();

        let canvas = adapter.surface().unwrap();
        assert_eq!(2, canvas.fit_count());
        assert_eq!(&before, canvas.edges());
    }
}
