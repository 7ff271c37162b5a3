use crate::graph::network::Network;
use crate::render::adapter::RenderAdapter;
use crate::render::layout::LayoutKind;
use crate::render::surface::Surface;
use crate::state::result::SolverResult;

/// A network paired with the adapter that owns its surface.
pub struct NetworkView<S: Surface> {
    network: Network,
    adapter: RenderAdapter<S>,
}

impl<S: Surface> NetworkView<S> {
    pub fn new(network: Network, layout: LayoutKind, padding: f64, surface: S) -> Self {
        let mut adapter = RenderAdapter::new(layout, padding);
        adapter.attach(surface);
        Self { network, adapter }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Swaps in a new instance; the old one is dropped, not mutated.
    pub fn replace(&mut self, network: Network) {
        self.network = network;
    }

    pub fn adapter(&self) -> &RenderAdapter<S> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut RenderAdapter<S> {
        &mut self.adapter
    }

    pub fn draw(&mut self, overlay: Option<&SolverResult>) {
        self.adapter.draw(&self.network, overlay);
    }

    /// Draws some other network (e.g. the one a result was computed for) on this surface.
    pub fn draw_network(&mut self, network: &Network, overlay: Option<&SolverResult>) {
        self.adapter.draw(network, overlay);
    }

    pub fn surface(&self) -> Option<&S> {
        self.adapter.surface()
    }
}
