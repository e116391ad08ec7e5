use geo::Point;
use itertools::Itertools;
use log::debug;

use super::config::{AlgorithmFamily, ShortcutPolicy};
use crate::{
    Error, RouteNodeId,
    model::{EdgeKind, RouteGraph, great_circle_distance},
};

/// Builds the synthetic graph searched by one algorithm family.
///
/// Consecutive sampled points are joined by primary edges in both directions.
/// On top of that chain, `policy` adds forward shortcut edges whose placement
/// depends only on node indices, so identical input always yields an
/// identical graph.
///
/// # Errors
///
/// Returns an error if fewer than 2 points are given, if `policy` is invalid,
/// or if the finished graph violates the primary chain invariant
pub fn build_route_graph(
    points: &[Point<f64>],
    family: AlgorithmFamily,
    policy: ShortcutPolicy,
) -> Result<RouteGraph, Error> {
    if points.len() < 2 {
        return Err(Error::InsufficientGeometry(points.len()));
    }
    policy.validate(family)?;

    let mut graph = RouteGraph::from_points(points);

    for ((from, &a), (to, &b)) in points.iter().enumerate().tuple_windows() {
        let weight = great_circle_distance(a, b);
        let (from, to) = (RouteNodeId::new(from), RouteNodeId::new(to));
        graph.add_edge(from, to, weight, EdgeKind::Primary);
        graph.add_edge(to, from, weight, EdgeKind::Primary);
    }

    let shortcuts = add_shortcuts(&mut graph, points, policy);

    debug!(
        "Built {family:?} graph: {} nodes, {} edges ({shortcuts} shortcuts)",
        graph.node_count(),
        graph.edge_count()
    );

    graph.check_invariants()?;
    Ok(graph)
}

fn add_shortcuts(graph: &mut RouteGraph, points: &[Point<f64>], policy: ShortcutPolicy) -> usize {
    // Shortcuts of a single hop would only duplicate the primary chain
    if policy.hops < 2 {
        return 0;
    }

    let mut added = 0;
    for from in (0..points.len()).step_by(policy.stride) {
        let to = from + policy.hops;
        if to >= points.len() {
            break;
        }
        let weight = great_circle_distance(points[from], points[to]) * policy.penalty;
        graph.add_edge(
            RouteNodeId::new(from),
            RouteNodeId::new(to),
            weight,
            EdgeKind::Shortcut,
        );
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::ShortcutConfig;

    fn zigzag(len: usize) -> Vec<Point<f64>> {
        (0..len)
            .map(|i| {
                let offset = if i % 2 == 0 { 0.0 } else { 0.002 };
                Point::new(-74.0 + i as f64 * 0.001, 40.7 + offset)
            })
            .collect()
    }

    #[test]
    fn chain_without_shortcuts() {
        let points = zigzag(5);
        let graph =
            build_route_graph(&points, AlgorithmFamily::Dijkstra, ShortcutPolicy::new(1, 1, 1.0))
                .unwrap();
        assert_eq!(graph.edge_count(), 8);
        assert_eq!(graph.count_edges(EdgeKind::Shortcut), 0);
    }

    #[test]
    fn shortcut_placement_follows_stride_and_hops() {
        let points = zigzag(10);
        let graph =
            build_route_graph(&points, AlgorithmFamily::Astar, ShortcutPolicy::new(3, 3, 1.0))
                .unwrap();
        let shortcuts: Vec<_> = graph
            .edges()
            .filter(|(_, _, edge)| edge.kind == EdgeKind::Shortcut)
            .map(|(from, to, _)| (from.index(), to.index()))
            .sorted()
            .collect();
        assert_eq!(shortcuts, vec![(0, 3), (3, 6), (6, 9)]);
    }

    #[test]
    fn shortcut_weight_carries_penalty() {
        let points = zigzag(4);
        let graph = build_route_graph(
            &points,
            AlgorithmFamily::Bidirectional,
            ShortcutPolicy::new(5, 2, 1.2),
        )
        .unwrap();
        let weight = graph
            .graph
            .edge_weights()
            .find(|edge| edge.kind == EdgeKind::Shortcut)
            .map(|edge| edge.weight)
            .unwrap();
        let direct = great_circle_distance(points[0], points[2]);
        assert!((weight - direct * 1.2).abs() < 1e-9);
    }

    #[test]
    fn families_produce_different_graphs() {
        let points = zigzag(40);
        let shortcuts = ShortcutConfig::default();
        let counts: Vec<_> = [
            AlgorithmFamily::Dijkstra,
            AlgorithmFamily::Astar,
            AlgorithmFamily::Bidirectional,
        ]
        .into_iter()
        .map(|family| {
            build_route_graph(&points, family, shortcuts.policy(family))
                .unwrap()
                .count_edges(EdgeKind::Shortcut)
        })
        .collect();
        assert!(counts[0] < counts[2] && counts[2] < counts[1], "{counts:?}");
    }

    #[test]
    fn single_point_is_rejected() {
        let result = build_route_graph(
            &zigzag(1),
            AlgorithmFamily::Dijkstra,
            ShortcutConfig::default().dijkstra,
        );
        assert!(matches!(result, Err(Error::InsufficientGeometry(1))));
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let points = zigzag(10);
        for policy in [
            ShortcutPolicy::new(1, 3, 0.2),
            ShortcutPolicy::new(0, 3, 1.0),
            ShortcutPolicy::new(2, 0, 1.0),
            ShortcutPolicy::new(2, 3, f64::NAN),
        ] {
            let result = build_route_graph(&points, AlgorithmFamily::Astar, policy);
            assert!(matches!(result, Err(Error::InvalidConfig(_))), "{policy:?}");
        }
    }
}
