use crate::graph::node::NodeId;
use crate::state::result::SolverResult;

pub const EMPTY: &str = "—";

/// Text shown on the summary, steps and assignment panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    summary: String,
    steps: Vec<String>,
    assignments: Vec<String>,
    cut: String,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            summary: EMPTY.to_string(),
            steps: Vec::new(),
            assignments: Vec::new(),
            cut: String::new(),
        }
    }
}

impl Panels {
    pub fn from_result(result: &SolverResult) -> Self {
        let steps = result
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let path = step
                    .path()
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(" - ");
                format!(
                    "Step {}: path {}, bottleneck={}, cumulative={}",
                    i + 1,
                    path,
                    step.bottleneck(),
                    step.cumulative()
                )
            })
            .collect();

        let assignments = result
            .assignments()
            .iter()
            .map(|a| format!("({}) = {}", a.edge, a.flow))
            .collect();

        let cut = result.min_cut();
        let crossing = cut
            .edges()
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            summary: format!("Maximum flow = {}", result.max_flow()),
            steps,
            assignments,
            cut: format!(
                "Minimum cut: S={} | T={}\nCut edges: {}",
                node_list(cut.source_side()),
                node_list(cut.sink_side()),
                if crossing.is_empty() { EMPTY } else { crossing.as_str() }
            ),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn assignments(&self) -> &[String] {
        &self.assignments
    }

    pub fn cut(&self) -> &str {
        &self.cut
    }
}

fn node_list(ids: &[NodeId]) -> String {
    let inner = ids
        .iter()
        .map(|id| id.index().to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}
