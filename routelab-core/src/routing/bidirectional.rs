use std::{cmp::Ordering, iter};

use crate::{Meters, RouteGraph, RouteNodeId};

use super::{
    counters::PerformanceCounters,
    state::{ExplorationTrace, ExploredNode, Frontier, SearchDirection, SearchPath, SearchTree},
};

/// One half of a bidirectional search
struct DirectionalSearch {
    direction: SearchDirection,
    tree: SearchTree,
    frontier: Frontier,
    explored: Vec<ExploredNode>,
}

impl DirectionalSearch {
    fn new(
        direction: SearchDirection,
        origin: RouteNodeId,
        node_count: usize,
        counters: &mut PerformanceCounters,
    ) -> Self {
        let mut frontier = Frontier::with_capacity(node_count);
        frontier.push(origin, 0.0, 0.0, counters);
        Self {
            direction,
            tree: SearchTree::new(origin, node_count),
            frontier,
            explored: Vec::new(),
        }
    }

    /// Settles the next node of this direction and relaxes its edges.
    ///
    /// Stale entries met on the way are skipped and counted. Returns `None`
    /// once the frontier is exhausted.
    fn step(&mut self, graph: &RouteGraph, counters: &mut PerformanceCounters) -> Option<RouteNodeId> {
        while let Some(entry) = self.frontier.pop() {
            if self.tree.is_stale(&entry) {
                counters.priority_queue_operations += 1;
                continue;
            }

            let node = entry.node;
            self.tree.settle(node);
            counters.record_expansion(self.direction);
            self.explored.push(ExploredNode {
                node,
                distance: entry.cost,
            });

            for (next, edge) in graph.adjacent(node, self.direction.edge_direction()) {
                if self.tree.is_settled(next) {
                    continue;
                }
                let next_cost = entry.cost + edge.weight;
                if self.tree.relax(node, next, next_cost) {
                    counters.edges_relaxed += 1;
                    self.frontier.push(next, next_cost, next_cost, counters);
                }
            }
            return Some(node);
        }
        None
    }
}

/// Best connection found so far between the two frontiers
struct Meeting {
    distance: Meters,
    node: Option<RouteNodeId>,
}

impl Meeting {
    fn offer(&mut self, node: RouteNodeId, active: &SearchTree, opposite: &SearchTree) {
        if let (Some(here), Some(there)) = (active.distance(node), opposite.distance(node)) {
            let total = here + there;
            if total < self.distance {
                self.distance = total;
                self.node = Some(node);
            }
        }
    }
}

/// Bidirectional Dijkstra: a forward search from `start` over outgoing edges
/// and a reverse search from `goal` over incoming edges.
///
/// The frontier with the smaller queue head expands next (alternating on
/// ties). The search stops once the two queue heads together cannot beat the
/// best connection found, or when either frontier runs dry.
pub(crate) fn bidirectional_dijkstra(
    graph: &RouteGraph,
    start: RouteNodeId,
    goal: RouteNodeId,
    counters: &mut PerformanceCounters,
) -> SearchPath {
    if start == goal {
        let mut path = SearchPath::trivial(start);
        path.trace.meeting_node = Some(start);
        return path;
    }

    let node_count = graph.node_count();
    let mut forward = DirectionalSearch::new(SearchDirection::Forward, start, node_count, counters);
    let mut backward = DirectionalSearch::new(SearchDirection::Backward, goal, node_count, counters);
    counters.record_frontier_size(forward.frontier.len() + backward.frontier.len());

    let mut meeting = Meeting {
        distance: f64::INFINITY,
        node: None,
    };
    let mut forward_on_tie = true;

    loop {
        let (Some(forward_head), Some(backward_head)) =
            (forward.frontier.peek_priority(), backward.frontier.peek_priority())
        else {
            break;
        };
        if forward_head + backward_head >= meeting.distance {
            break;
        }

        let expand_forward = match forward_head.total_cmp(&backward_head) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                let turn = forward_on_tie;
                forward_on_tie = !forward_on_tie;
                turn
            }
        };

        let (active, opposite) = if expand_forward {
            (&mut forward, &backward)
        } else {
            (&mut backward, &forward)
        };

        let Some(node) = active.step(graph, counters) else {
            continue;
        };

        // The settled node and every neighbour it touched may now connect to
        // the opposite frontier
        let touched = graph
            .adjacent(node, active.direction.edge_direction())
            .map(|(next, _)| next);
        for candidate in iter::once(node).chain(touched) {
            meeting.offer(candidate, &active.tree, &opposite.tree);
        }

        counters.record_frontier_size(forward.frontier.len() + backward.frontier.len());
    }

    let trace = ExplorationTrace {
        forward: forward.explored,
        reverse: backward.explored,
        meeting_node: meeting.node,
    };

    let Some(meeting_node) = meeting.node else {
        return SearchPath::unreachable(trace);
    };

    let mut nodes = forward.tree.path_from(start, meeting_node);
    let mut tail = backward.tree.path_from(goal, meeting_node);
    tail.reverse();
    nodes.extend(tail.into_iter().skip(1));

    SearchPath {
        nodes,
        distance: meeting.distance,
        trace,
    }
}
