//! JSON shapes exchanged with the computation service.

use crate::graph::edge::{Edge, EdgeKey};
use crate::graph::network::{Network, NetworkKind};
use crate::graph::node::NodeId;
use crate::state::result::{AugmentingStep, FlowAssignment, MinCut, SolverResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEdge {
    pub u: usize,
    pub v: usize,
    #[serde(deserialize_with = "integral")]
    pub capacity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRequest {
    pub n: usize,
    pub source: usize,
    pub sink: usize,
    pub edges: Vec<WireEdge>,
}

impl From<&Network> for NetworkRequest {
    fn from(network: &Network) -> Self {
        Self {
            n: network.node_count(),
            source: network.source().index(),
            sink: network.sink().index(),
            edges: network
                .edges()
                .iter()
                .map(|e| WireEdge {
                    u: e.from().index(),
                    v: e.to().index(),
                    capacity: e.capacity(),
                })
                .collect(),
        }
    }
}

/// Query of the random-network endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomParams {
    pub n: usize,
    pub density: f64,
    #[serde(rename = "cmin")]
    pub cap_min: i64,
    #[serde(rename = "cmax")]
    pub cap_max: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkDefinition {
    pub n: usize,
    pub source: Option<usize>,
    pub sink: Option<usize>,
    pub edges: Vec<WireEdge>,
}

impl NetworkDefinition {
    pub fn into_network(self) -> Network {
        let source = self.source.unwrap_or(0);
        let sink = self.sink.unwrap_or(self.n.saturating_sub(1));
        let mut network = Network::create_empty(NetworkKind::Solver, self.n, source, sink);
        network.set_edges(
            self.edges
                .into_iter()
                .map(|e| Edge::new(e.u, e.v, e.capacity))
                .collect(),
        );
        network
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolveResponse {
    #[serde(deserialize_with = "integral")]
    pub max_flow: i64,
    pub logs: Vec<WireStep>,
    pub flow_assignments: Vec<WireAssignment>,
    pub min_cut: WireCut,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireStep {
    pub augmenting_path: Vec<(usize, usize)>,
    #[serde(deserialize_with = "integral")]
    pub bottleneck: i64,
    #[serde(deserialize_with = "integral")]
    pub flow_so_far: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireAssignment {
    pub u: usize,
    pub v: usize,
    #[serde(deserialize_with = "integral")]
    pub flow: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireCut {
    #[serde(rename = "S")]
    pub source_side: Vec<usize>,
    #[serde(rename = "T")]
    pub sink_side: Vec<usize>,
    #[serde(rename = "edges_S_to_T")]
    pub edges: Vec<(usize, usize)>,
}

impl From<SolveResponse> for SolverResult {
    fn from(res: SolveResponse) -> Self {
        let keys = |pairs: Vec<(usize, usize)>| {
            pairs
                .into_iter()
                .map(|(u, v)| EdgeKey::new(u, v))
                .collect::<Vec<_>>()
        };
        let ids = |nodes: Vec<usize>| nodes.into_iter().map(NodeId).collect::<Vec<_>>();

        let steps = res
            .logs
            .into_iter()
            .map(|s| AugmentingStep::new(keys(s.augmenting_path), s.bottleneck, s.flow_so_far))
            .collect();
        let assignments = res
            .flow_assignments
            .into_iter()
            .map(|a| FlowAssignment {
                edge: EdgeKey::new(a.u, a.v),
                flow: a.flow,
            })
            .collect();
        let cut = MinCut::new(
            ids(res.min_cut.source_side),
            ids(res.min_cut.sink_side),
            keys(res.min_cut.edges),
        );
        SolverResult::new(res.max_flow, steps, assignments, cut)
    }
}

/// Accepts integers and floats with no fractional part.
fn integral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = number.as_i64() {
        return Ok(i);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected an integer, got {number}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "max_flow": 10.0,
        "logs": [
            {"augmenting_path": [[0, 1], [1, 3]], "bottleneck": 10.0, "flow_so_far": 10.0}
        ],
        "flow_assignments": [
            {"u": 0, "v": 1, "flow": 10.0},
            {"u": 0, "v": 2, "flow": 0.0},
            {"u": 1, "v": 3, "flow": 10.0},
            {"u": 2, "v": 3, "flow": 0.0}
        ],
        "min_cut": {"S": [0], "T": [1, 2, 3], "edges_S_to_T": [[0, 1], [0, 2]]}
    }"#;

    #[test]
    fn test_response_with_float_numbers() {
        let res: SolveResponse = serde_json::from_str(RESPONSE).unwrap();
        let result = SolverResult::from(res);

        assert_eq!(10, result.max_flow());
        assert_eq!(1, result.steps().len());
        assert_eq!(
            &[EdgeKey::new(0, 1), EdgeKey::new(1, 3)],
            result.steps()[0].path()
        );
        assert_eq!(10, result.steps()[0].cumulative());
        assert_eq!(4, result.assignments().len());
        assert_eq!(&[NodeId(0)], result.min_cut().source_side());
        assert_eq!(
            &[EdgeKey::new(0, 1), EdgeKey::new(0, 2)],
            result.min_cut().edges()
        );
    }

    #[test]
    fn test_fractional_value_is_malformed() {
        let body = RESPONSE.replace("\"max_flow\": 10.0", "\"max_flow\": 10.5");
        assert!(serde_json::from_str::<SolveResponse>(&body).is_err());
    }

    #[test]
    fn test_missing_field_is_malformed() {
        assert!(serde_json::from_str::<SolveResponse>(r#"{"max_flow": 3}"#).is_err());
    }

    #[test]
    fn test_request_from_network() {
        let mut net = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        net.set_edges(vec![Edge::new(0, 1, 4), Edge::new(1, 7, 2)]);
        let json = serde_json::to_value(NetworkRequest::from(&net)).unwrap();

        assert_eq!(
            serde_json::json!({
                "n": 8,
                "source": 0,
                "sink": 7,
                "edges": [
                    {"u": 0, "v": 1, "capacity": 4},
                    {"u": 1, "v": 7, "capacity": 2}
                ]
            }),
            json
        );
    }

    #[test]
    fn test_definition_defaults_terminals() {
        let def: NetworkDefinition =
            serde_json::from_str(r#"{"n": 9, "edges": [{"u": 0, "v": 8, "capacity": 5}]}"#)
                .unwrap();
        let net = def.into_network();

        assert_eq!(9, net.node_count());
        assert_eq!(NodeId(0), net.source());
        assert_eq!(NodeId(8), net.sink());
        assert_eq!(&[Edge::new(0, 8, 5)], net.edges());
    }
}
