use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Visualization,
    Summary,
    Steps,
    Assignments,
    Statement,
    Exercise,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Visualization,
        Panel::Summary,
        Panel::Steps,
        Panel::Assignments,
        Panel::Statement,
        Panel::Exercise,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Panel::Visualization => "Visualization",
            Panel::Summary => "Summary",
            Panel::Steps => "Steps",
            Panel::Assignments => "Assignment",
            Panel::Statement => "Statement",
            Panel::Exercise => "Exercise",
        }
    }

    /// Surface shown while this panel is active.
    pub fn surface(self) -> SurfaceId {
        match self {
            Panel::Exercise => SurfaceId::Lite,
            _ => SurfaceId::Solver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceId {
    Solver,
    Lite,
}

/// Tracks the visible panel. Both surfaces outlive every switch.
#[derive(Debug)]
pub struct TabCoordinator {
    active: Panel,
}

impl TabCoordinator {
    pub fn new() -> Self {
        Self {
            active: Panel::Visualization,
        }
    }

    pub fn active(&self) -> Panel {
        self.active
    }

    pub fn active_surface(&self) -> SurfaceId {
        self.active.surface()
    }

    /// Returns the surface that needs a viewport refit, if any.
    pub fn switch(&mut self, panel: Panel) -> Option<SurfaceId> {
        debug!(from = ?self.active, to = ?panel, "panel switch");
        self.active = panel;
        match panel {
            Panel::Visualization => Some(SurfaceId::Solver),
            Panel::Exercise => Some(SurfaceId::Lite),
            _ => None,
        }
    }

    pub fn next(&mut self) -> Option<SurfaceId> {
        let i = Panel::ALL.iter().position(|p| *p == self.active).unwrap_or(0);
        self.switch(Panel::ALL[(i + 1) % Panel::ALL.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refit_on_surface_panels() {
        let mut tabs = TabCoordinator::new();
        assert_eq!(None, tabs.switch(Panel::Steps));
        assert_eq!(Some(SurfaceId::Lite), tabs.switch(Panel::Exercise));
        assert_eq!(SurfaceId::Lite, tabs.active_surface());
        assert_eq!(Some(SurfaceId::Solver), tabs.switch(Panel::Visualization));
        assert_eq!(SurfaceId::Solver, tabs.active_surface());
    }

    #[test]
    fn test_exactly_one_surface_active() {
        let mut tabs = TabCoordinator::new();
        for _ in 0..Panel::ALL.len() * 2 {
            tabs.next();
            let lite = tabs.active() == Panel::Exercise;
            assert_eq!(lite, tabs.active_surface() == SurfaceId::Lite);
        }
    }

    #[test]
    fn test_next_cycles_all_panels() {
        let mut tabs = TabCoordinator::new();
        let mut seen = vec![tabs.active()];
        for _ in 1..Panel::ALL.len() {
            tabs.next();
            seen.push(tabs.active());
        }
        assert_eq!(Panel::ALL.to_vec(), seen);
        tabs.next();
        assert_eq!(Panel::Visualization, tabs.active());
    }
}
