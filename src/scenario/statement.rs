//! Problem statements derived from a network. Pure and deterministic.

use crate::graph::network::Network;
use crate::graph::node::NodeId;
use crate::state::result::SolverResult;

pub const PROMPTS: [&str; 4] = [
    "1) Value of the maximum flow.",
    "2) Augmenting paths and bottleneck per iteration (Edmonds–Karp).",
    "3) Final flow assignment per edge.",
    "4) A minimum cut (S,T) certifying maximality.",
];

/// Exercise statement listing every edge as `label(u)→label(v) ; c`.
pub fn describe(network: &Network, source: NodeId, sink: NodeId) -> String {
    let names = network
        .nodes()
        .iter()
        .map(|n| n.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        "The following graph is a directed flow network modelling rush-hour traffic.".to_string(),
        format!(
            "Compute the maximum flow that can be sent from point {} (source) to point {} (sink).",
            network.display_name(source),
            network.display_name(sink)
        ),
        String::new(),
        format!("Nodes: {names}"),
        "Edges with capacities (u→v ; c):".to_string(),
    ];
    lines.extend(network.edges().iter().map(|e| {
        format!(
            "• {}→{} ; {}",
            network.display_name(e.from()),
            network.display_name(e.to()),
            e.capacity()
        )
    }));
    lines.push(String::new());
    lines.push("Asked:".to_string());
    lines.extend(PROMPTS.iter().map(|p| p.to_string()));
    lines.join("\n")
}

pub fn narrative(network: &Network, result: Option<&SolverResult>) -> String {
    let n = network.node_count();
    let mut lines = vec![
        "Statement (narrative):".to_string(),
        format!(
            "A directed flow network has {n} nodes (0..{}).",
            n.saturating_sub(1)
        ),
        format!(
            "The source is s={} and the sink is t={}.",
            network.source().index(),
            network.sink().index()
        ),
        "Each edge (u→v) has capacity c(u,v). Compute the maximum flow from s to t,".to_string(),
        "show the augmenting paths used, the final flow assignment and a minimum cut.".to_string(),
        String::new(),
        "Edges:".to_string(),
    ];
    lines.extend(network.edges().iter().map(|e| {
        format!(
            "• ({}→{}) with capacity {}",
            e.from().index(),
            e.to().index(),
            e.capacity()
        )
    }));
    lines.push(String::new());
    if let Some(r) = result {
        lines.push(format!("Obtained value (for comparison): {}", r.max_flow()));
    }
    lines.join("\n")
}

pub fn formal(network: &Network) -> String {
    let n = network.node_count();
    let edges = network
        .edges()
        .iter()
        .map(|e| format!("({},{}; {})", e.from().index(), e.to().index(), e.capacity()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Maximum Flow Problem (formal statement)

Let G=(V,E) be a directed flow network with V = {{0,1,...,{last}}} and E ⊆ V×V.
Each edge (u,v)∈E has a capacity c(u,v) ≥ 0. The source is s={s} and the sink is t={t}.

Graph data:
- Edges with capacities:
  {edges}

Tasks:
1) Determine the value |f| of the maximum flow from s to t.
2) Give a flow assignment f(u,v) attaining that value.
3) List the sequence of augmenting paths and the bottleneck of each iteration (Ford–Fulkerson/Edmonds–Karp).
4) Give a minimum cut (S,T) certifying maximality (max-flow min-cut theorem).

(Notes)
• Capacity constraints: 0 ≤ f(u,v) ≤ c(u,v) for all (u,v)∈E.
• Flow conservation: ∑_u f(u,x) = ∑_v f(x,v) for all x∈V\\{{s,t}}.
• Flow value: |f| = ∑_v f(s,v) = ∑_u f(u,t).",
        last = n.saturating_sub(1),
        s = network.source().index(),
        t = network.sink().index(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::{Edge, EdgeKey};
    use crate::graph::network::NetworkKind;
    use crate::scenario::lite::lite_network;
    use crate::state::result::MinCut;

    #[test]
    fn test_describe_lists_edges_in_order() {
        let net = lite_network(0, 6);
        let text = describe(&net, net.source(), net.sink());

        let edge_lines = text
            .lines()
            .filter(|l| l.starts_with('•'))
            .collect::<Vec<_>>();
        assert_eq!(12, edge_lines.len());
        assert_eq!("• O→A ; 5", edge_lines[0]);
        assert_eq!("• E→F ; 8", edge_lines[11]);
        assert!(text.contains("from point O (source) to point F (sink)"));
        assert!(text.contains("Nodes: O, A, B, C, D, E, F"));
        PROMPTS.iter().for_each(|p| assert!(text.contains(p)));
    }

    #[test]
    fn test_describe_is_deterministic() {
        let net = lite_network(1, 4);
        assert_eq!(
            describe(&net, NodeId(1), NodeId(4)),
            describe(&net, NodeId(1), NodeId(4))
        );
    }

    #[test]
    fn test_describe_unlabelled_network_uses_indices() {
        let mut net = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        net.set_edges(vec![Edge::new(0, 7, 3)]);
        let text = describe(&net, net.source(), net.sink());
        assert!(text.contains("• 0→7 ; 3"));
    }

    #[test]
    fn test_narrative_with_result() {
        let mut net = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        net.set_edges(vec![Edge::new(0, 7, 3)]);
        let result = SolverResult::new(
            3,
            Vec::new(),
            Vec::new(),
            MinCut::new(vec![NodeId(0)], vec![NodeId(7)], vec![EdgeKey::new(0, 7)]),
        );

        let without = narrative(&net, None);
        assert!(without.contains("8 nodes (0..7)"));
        assert!(without.contains("• (0→7) with capacity 3"));
        assert!(!without.contains("Obtained value"));
        assert!(narrative(&net, Some(&result)).contains("Obtained value (for comparison): 3"));
    }

    #[test]
    fn test_formal() {
        let mut net = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        net.set_edges(vec![Edge::new(0, 1, 10), Edge::new(1, 7, 4)]);
        let text = formal(&net);
        assert!(text.contains("V = {0,1,...,7}"));
        assert!(text.contains("(0,1; 10), (1,7; 4)"));
        assert!(text.contains("s=0 and the sink is t=7"));
        assert!(text.contains("x∈V\\{s,t}"));
    }
}
