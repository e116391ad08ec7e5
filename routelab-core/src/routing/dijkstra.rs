use crate::{RouteGraph, RouteNodeId};

use super::{
    counters::PerformanceCounters,
    state::{ExplorationTrace, ExploredNode, Frontier, SearchDirection, SearchPath, SearchTree},
};

/// Dijkstra's algorithm from `start` until `goal` is settled.
///
/// Counts one exploration per settled node, one relaxation per strict
/// distance improvement and one queue operation per push or stale skip.
pub(crate) fn dijkstra(
    graph: &RouteGraph,
    start: RouteNodeId,
    goal: RouteNodeId,
    counters: &mut PerformanceCounters,
) -> SearchPath {
    if start == goal {
        return SearchPath::trivial(start);
    }

    let node_count = graph.node_count();
    let mut tree = SearchTree::new(start, node_count);
    let mut frontier = Frontier::with_capacity(node_count);
    let mut explored = Vec::new();

    frontier.push(start, 0.0, 0.0, counters);
    counters.record_frontier_size(frontier.len());

    while let Some(entry) = frontier.pop() {
        if tree.is_stale(&entry) {
            counters.priority_queue_operations += 1;
            continue;
        }

        let node = entry.node;
        tree.settle(node);
        counters.record_expansion(SearchDirection::Forward);
        explored.push(ExploredNode {
            node,
            distance: entry.cost,
        });

        if node == goal {
            break;
        }

        for (next, edge) in graph.adjacent(node, SearchDirection::Forward.edge_direction()) {
            if tree.is_settled(next) {
                continue;
            }
            let next_cost = entry.cost + edge.weight;
            if tree.relax(node, next, next_cost) {
                counters.edges_relaxed += 1;
                frontier.push(next, next_cost, next_cost, counters);
            }
        }
        counters.record_frontier_size(frontier.len());
    }

    let trace = ExplorationTrace {
        forward: explored,
        ..ExplorationTrace::default()
    };

    match tree.distance(goal) {
        Some(distance) if tree.is_settled(goal) => SearchPath {
            nodes: tree.path_from(start, goal),
            distance,
            trace,
        },
        _ => SearchPath::unreachable(trace),
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::model::{EdgeKind, great_circle_distance};

    fn chain(len: usize) -> (RouteGraph, Vec<Point<f64>>) {
        let points: Vec<_> = (0..len)
            .map(|i| Point::new(2.35 + i as f64 * 0.001, 48.85 + (i % 2) as f64 * 0.0004))
            .collect();
        let mut graph = RouteGraph::from_points(&points);
        for i in 1..len {
            let weight = great_circle_distance(points[i - 1], points[i]);
            let (a, b) = (RouteNodeId::new(i - 1), RouteNodeId::new(i));
            graph.add_edge(a, b, weight, EdgeKind::Primary);
            graph.add_edge(b, a, weight, EdgeKind::Primary);
        }
        (graph, points)
    }

    #[test]
    fn follows_the_chain() {
        let (graph, points) = chain(6);
        let mut counters = PerformanceCounters::new();
        let path = dijkstra(&graph, RouteNodeId::new(1), RouteNodeId::new(4), &mut counters);

        let indices: Vec<_> = path.nodes.iter().map(|node| node.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        let expected: f64 = (2..=4)
            .map(|i| great_circle_distance(points[i - 1], points[i]))
            .sum();
        assert!((path.distance - expected).abs() < 1e-9);
    }

    #[test]
    fn takes_a_cheaper_shortcut() {
        let (mut graph, _) = chain(5);
        graph.add_edge(RouteNodeId::new(0), RouteNodeId::new(4), 1.0, EdgeKind::Shortcut);
        let mut counters = PerformanceCounters::new();
        let path = dijkstra(&graph, RouteNodeId::new(0), RouteNodeId::new(4), &mut counters);
        assert_eq!(path.nodes, vec![RouteNodeId::new(0), RouteNodeId::new(4)]);
        assert_eq!(path.distance, 1.0);
    }

    #[test]
    fn trivial_search_explores_nothing() {
        let (graph, _) = chain(3);
        let mut counters = PerformanceCounters::new();
        let path = dijkstra(&graph, RouteNodeId::new(2), RouteNodeId::new(2), &mut counters);
        assert_eq!(path.nodes, vec![RouteNodeId::new(2)]);
        assert_eq!(path.distance, 0.0);
        assert_eq!(counters, PerformanceCounters::default());
    }

    #[test]
    fn unreachable_goal_is_infinite() {
        let points = [Point::new(0.0, 0.0), Point::new(0.001, 0.0), Point::new(0.002, 0.0)];
        let mut graph = RouteGraph::from_points(&points);
        graph.add_edge(RouteNodeId::new(0), RouteNodeId::new(1), 1.0, EdgeKind::Primary);
        let mut counters = PerformanceCounters::new();
        let path = dijkstra(&graph, RouteNodeId::new(0), RouteNodeId::new(2), &mut counters);
        assert!(path.nodes.is_empty());
        assert!(path.distance.is_infinite());
        assert_eq!(counters.nodes_explored, 2);
    }

    #[test]
    fn stale_entries_count_as_queue_operations() {
        // 0 -> 2 is pushed at 10.0 first, then improved through 1
        let points = [Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0)];
        let mut graph = RouteGraph::from_points(&points);
        let (a, b, c) = (RouteNodeId::new(0), RouteNodeId::new(1), RouteNodeId::new(2));
        graph.add_edge(a, c, 10.0, EdgeKind::Shortcut);
        graph.add_edge(a, b, 1.0, EdgeKind::Primary);
        graph.add_edge(b, c, 1.0, EdgeKind::Primary);

        let mut counters = PerformanceCounters::new();
        let path = dijkstra(&graph, a, c, &mut counters);
        assert_eq!(path.distance, 2.0);
        assert_eq!(counters.edges_relaxed, 3);
        // start, c at 10, b at 1, c at 2 -> 4 pushes; c is settled before the stale entry surfaces
        assert_eq!(counters.priority_queue_operations, 4);
        assert_eq!(counters.nodes_explored, 3);
    }
}
