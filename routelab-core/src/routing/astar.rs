use crate::{RouteGraph, RouteNodeId};

use super::{
    counters::PerformanceCounters,
    heuristic::{AStarHeuristic, GreatCircleHeuristic, HeuristicProvider},
    state::{ExplorationTrace, ExploredNode, Frontier, SearchDirection, SearchPath, SearchTree},
};

/// A* with the great-circle heuristic
pub(crate) fn astar(
    graph: &RouteGraph,
    start: RouteNodeId,
    goal: RouteNodeId,
    counters: &mut PerformanceCounters,
) -> SearchPath {
    astar_with_heuristic(graph, start, goal, GreatCircleHeuristic, counters)
}

/// A* search keyed by `g + h`. Every queue key computed costs one heuristic call.
///
/// With a consistent heuristic a settled node is final, so the settled set
/// doubles as the closed set.
pub(crate) fn astar_with_heuristic<H: AStarHeuristic>(
    graph: &RouteGraph,
    start: RouteNodeId,
    goal: RouteNodeId,
    heuristic: H,
    counters: &mut PerformanceCounters,
) -> SearchPath {
    if start == goal {
        return SearchPath::trivial(start);
    }

    let node_count = graph.node_count();
    let heuristic = HeuristicProvider::new(graph, heuristic);
    let mut tree = SearchTree::new(start, node_count);
    let mut frontier = Frontier::with_capacity(node_count);
    let mut explored = Vec::new();

    let start_priority = heuristic.estimate(start, goal, counters);
    frontier.push(start, 0.0, start_priority, counters);
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
            let tentative = entry.cost + edge.weight;
            if tree.relax(node, next, tentative) {
                counters.edges_relaxed += 1;
                let priority = tentative + heuristic.estimate(next, goal, counters);
                frontier.push(next, tentative, priority, counters);
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
