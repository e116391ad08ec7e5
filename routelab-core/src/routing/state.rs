use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, hash_map::Entry};
use petgraph::Direction;

use super::counters::PerformanceCounters;
use crate::{Meters, RouteNodeId};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    /// Graph edges followed when searching in this direction
    pub(crate) fn edge_direction(self) -> Direction {
        match self {
            SearchDirection::Forward => Direction::Outgoing,
            SearchDirection::Backward => Direction::Incoming,
        }
    }
}

/// Open set entry. `cost` is the distance from the search origin, `priority`
/// the queue key (equal to `cost` for Dijkstra, `cost + h` for A*).
#[derive(Copy, Clone, Debug)]
pub(crate) struct QueueEntry {
    pub(crate) priority: Meters,
    pub(crate) cost: Meters,
    pub(crate) node: RouteNodeId,
    sequence: u64,
}

// Min-heap by priority, FIFO among equal priorities
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Priority queue with lazy decrease-key: improved nodes are pushed again
/// and outdated entries are skipped when they surface
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl Frontier {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub(crate) fn push(
        &mut self,
        node: RouteNodeId,
        cost: Meters,
        priority: Meters,
        counters: &mut PerformanceCounters,
    ) {
        self.heap.push(QueueEntry {
            priority,
            cost,
            node,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        counters.priority_queue_operations += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    pub(crate) fn peek_priority(&self) -> Option<Meters> {
        self.heap.peek().map(|entry| entry.priority)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Best-known distances, predecessors and settled nodes of one search direction
#[derive(Debug)]
pub(crate) struct SearchTree {
    distances: HashMap<RouteNodeId, Meters>,
    predecessors: HashMap<RouteNodeId, RouteNodeId>,
    settled: FixedBitSet,
}

impl SearchTree {
    pub(crate) fn new(origin: RouteNodeId, node_count: usize) -> Self {
        let mut distances = HashMap::with_capacity(node_count);
        distances.insert(origin, 0.0);
        Self {
            distances,
            predecessors: HashMap::with_capacity(node_count),
            settled: FixedBitSet::with_capacity(node_count),
        }
    }

    pub(crate) fn distance(&self, node: RouteNodeId) -> Option<Meters> {
        self.distances.get(&node).copied()
    }

    pub(crate) fn is_settled(&self, node: RouteNodeId) -> bool {
        self.settled.contains(node.index())
    }

    /// An entry is stale if its node was settled already or improved since
    pub(crate) fn is_stale(&self, entry: &QueueEntry) -> bool {
        self.is_settled(entry.node)
            || self
                .distance(entry.node)
                .is_some_and(|best| entry.cost > best)
    }

    pub(crate) fn settle(&mut self, node: RouteNodeId) {
        self.settled.insert(node.index());
    }

    /// Records `cost` for `to` via `from` if it strictly improves the best
    /// known distance
    pub(crate) fn relax(&mut self, from: RouteNodeId, to: RouteNodeId, cost: Meters) -> bool {
        match self.distances.entry(to) {
            Entry::Vacant(entry) => {
                entry.insert(cost);
            }
            Entry::Occupied(mut entry) => {
                if cost < *entry.get() {
                    *entry.get_mut() = cost;
                } else {
                    return false;
                }
            }
        }
        self.predecessors.insert(to, from);
        true
    }

    /// Nodes from `origin` to `node` following predecessors backwards
    pub(crate) fn path_from(&self, origin: RouteNodeId, node: RouteNodeId) -> Vec<RouteNodeId> {
        let mut path = vec![node];
        let mut current = node;
        while current != origin {
            match self.predecessors.get(&current) {
                Some(&previous) => {
                    path.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// A node settled by a search, with its distance from the search origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExploredNode {
    pub node: RouteNodeId,
    pub distance: Meters,
}

/// Order in which nodes were settled, for animation layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplorationTrace {
    pub forward: Vec<ExploredNode>,
    /// Only filled by bidirectional search
    pub reverse: Vec<ExploredNode>,
    pub meeting_node: Option<RouteNodeId>,
}

/// Raw output of a search strategy
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchPath {
    pub(crate) nodes: Vec<RouteNodeId>,
    pub(crate) distance: Meters,
    pub(crate) trace: ExplorationTrace,
}

impl SearchPath {
    pub(crate) fn trivial(node: RouteNodeId) -> Self {
        Self {
            nodes: vec![node],
            distance: 0.0,
            trace: ExplorationTrace::default(),
        }
    }

    pub(crate) fn unreachable(trace: ExplorationTrace) -> Self {
        Self {
            nodes: Vec::new(),
            distance: f64::INFINITY,
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(index: usize) -> RouteNodeId {
        RouteNodeId::new(index)
    }

    #[test]
    fn equal_priorities_pop_in_insertion_order() {
        let mut counters = PerformanceCounters::new();
        let mut frontier = Frontier::with_capacity(4);
        frontier.push(node(3), 1.0, 1.0, &mut counters);
        frontier.push(node(1), 0.5, 0.5, &mut counters);
        frontier.push(node(2), 1.0, 1.0, &mut counters);
        frontier.push(node(0), 1.0, 1.0, &mut counters);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.node.index())
            .collect();
        assert_eq!(order, vec![1, 3, 2, 0]);
        assert_eq!(counters.priority_queue_operations, 4);
    }

    #[test]
    fn relax_only_accepts_strict_improvements() {
        let mut tree = SearchTree::new(node(0), 3);
        assert!(tree.relax(node(0), node(1), 5.0));
        assert!(!tree.relax(node(2), node(1), 5.0));
        assert!(tree.relax(node(2), node(1), 4.0));
        assert_eq!(tree.distance(node(1)), Some(4.0));
        assert_eq!(tree.path_from(node(0), node(1)), vec![node(2), node(1)]);
    }

    #[test]
    fn improved_entries_become_stale() {
        let mut counters = PerformanceCounters::new();
        let mut frontier = Frontier::with_capacity(2);
        let mut tree = SearchTree::new(node(0), 2);
        tree.relax(node(0), node(1), 5.0);
        frontier.push(node(1), 5.0, 5.0, &mut counters);
        tree.relax(node(0), node(1), 3.0);
        frontier.push(node(1), 3.0, 3.0, &mut counters);

        let fresh = frontier.pop().unwrap();
        assert!(!tree.is_stale(&fresh));
        tree.settle(fresh.node);
        let outdated = frontier.pop().unwrap();
        assert!(tree.is_stale(&outdated));
    }

    #[test]
    fn directions_follow_edge_orientation() {
        assert_eq!(
            SearchDirection::Forward.edge_direction(),
            Direction::Outgoing
        );
        assert_eq!(
            SearchDirection::Backward.edge_direction(),
            Direction::Incoming
        );
    }
}
