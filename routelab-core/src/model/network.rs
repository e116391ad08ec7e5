use geo::Point;
use petgraph::{Direction, graph::DiGraph, visit::EdgeRef};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{EdgeKind, RouteEdge, RouteNode};
use crate::{Error, Meters, RouteNodeId};

/// Point in the spatial index, tagged with its graph node
pub type IndexedPoint = GeomWithData<[f64; 2], RouteNodeId>;

/// Synthetic weighted graph built from one sampled route.
///
/// Node `i` is the `i`-th sampled point. The graph lives for a single request
/// and is never shared between searches that mutate it.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub(crate) graph: DiGraph<RouteNode, RouteEdge>,
    rtree: RTree<IndexedPoint>,
}

impl RouteGraph {
    /// Creates a graph with one node per point and no edges
    pub fn from_points(points: &[Point<f64>]) -> Self {
        let mut graph = DiGraph::with_capacity(points.len(), points.len() * 3);
        let mut indexed = Vec::with_capacity(points.len());

        for (sequence, &geometry) in points.iter().enumerate() {
            let id = graph.add_node(RouteNode { sequence, geometry });
            indexed.push(IndexedPoint::new([geometry.x(), geometry.y()], id));
        }

        Self {
            graph,
            rtree: RTree::bulk_load(indexed),
        }
    }

    /// Adds a directed edge
    ///
    /// # Panics
    ///
    /// If `weight` is negative or not finite, or if either node does not exist.
    /// Such an edge would silently invalidate every search run on the graph.
    pub fn add_edge(&mut self, from: RouteNodeId, to: RouteNodeId, weight: Meters, kind: EdgeKind) {
        assert!(
            weight.is_finite() && weight >= 0.0,
            "edge {}->{} has invalid weight {weight}",
            from.index(),
            to.index()
        );
        self.graph.add_edge(from, to, RouteEdge { weight, kind });
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, node: RouteNodeId) -> bool {
        node.index() < self.graph.node_count()
    }

    pub fn node(&self, node: RouteNodeId) -> Option<&RouteNode> {
        self.graph.node_weight(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RouteNode> {
        self.graph.node_weights()
    }

    pub fn edges(&self) -> impl Iterator<Item = (RouteNodeId, RouteNodeId, &RouteEdge)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    /// Node geometry, panicking on ids that were not produced by this graph
    pub(crate) fn geometry(&self, node: RouteNodeId) -> Point<f64> {
        self.graph[node].geometry
    }

    /// Neighbours of `node` along edges pointing in `direction`.
    ///
    /// `Outgoing` yields edge targets, `Incoming` yields edge sources, so a
    /// reverse search walks the same edges backwards.
    pub fn adjacent(
        &self,
        node: RouteNodeId,
        direction: Direction,
    ) -> impl Iterator<Item = (RouteNodeId, &RouteEdge)> + '_ {
        self.graph
            .edges_directed(node, direction)
            .map(move |edge| {
                let neighbor = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (neighbor, edge.weight())
            })
    }

    /// Lightest edge from `from` to `to`, if any
    pub fn edge_weight_between(&self, from: RouteNodeId, to: RouteNodeId) -> Option<Meters> {
        self.graph
            .edges_connecting(from, to)
            .map(|edge| edge.weight().weight)
            .min_by(f64::total_cmp)
    }

    /// Closest node to `point` by planar distance on lon/lat degrees.
    ///
    /// Good enough to snap route endpoints onto a handful of sampled nodes.
    pub fn nearest_node(&self, point: Point<f64>) -> Option<RouteNodeId> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|indexed| indexed.data)
    }

    /// Checks that all weights are valid and that the primary chain links
    /// every node to its successor
    pub fn check_invariants(&self) -> Result<(), Error> {
        if let Some(edge) = self
            .graph
            .edge_references()
            .find(|edge| !(edge.weight().weight.is_finite() && edge.weight().weight >= 0.0))
        {
            return Err(Error::GraphInvariant(format!(
                "edge {}->{} has weight {}",
                edge.source().index(),
                edge.target().index(),
                edge.weight().weight
            )));
        }

        for index in 1..self.graph.node_count() {
            let from = RouteNodeId::new(index - 1);
            let to = RouteNodeId::new(index);
            let linked = self
                .graph
                .edges_connecting(from, to)
                .any(|edge| edge.weight().is_primary());
            if !linked {
                return Err(Error::GraphInvariant(format!(
                    "primary chain is broken between nodes {} and {}",
                    index - 1,
                    index
                )));
            }
        }

        Ok(())
    }

    /// Number of edges of the given kind
    pub fn count_edges(&self, kind: EdgeKind) -> usize {
        self.graph
            .edge_weights()
            .filter(|edge| edge.kind == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_points() -> Vec<Point<f64>> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.01, 0.0),
            Point::new(0.02, 0.0),
        ]
    }

    #[test]
    fn nodes_are_indexed_by_sequence() {
        let graph = RouteGraph::from_points(&three_points());
        assert_eq!(graph.node_count(), 3);
        for (index, node) in graph.nodes().enumerate() {
            assert_eq!(node.sequence, index);
        }
    }

    #[test]
    fn nearest_node_snaps_to_closest_point() {
        let graph = RouteGraph::from_points(&three_points());
        let snapped = graph.nearest_node(Point::new(0.0112, 0.0003));
        assert_eq!(snapped, Some(RouteNodeId::new(1)));
    }

    #[test]
    fn lightest_parallel_edge_wins() {
        let mut graph = RouteGraph::from_points(&three_points());
        let (a, b) = (RouteNodeId::new(0), RouteNodeId::new(1));
        graph.add_edge(a, b, 10.0, EdgeKind::Primary);
        graph.add_edge(a, b, 4.0, EdgeKind::Shortcut);
        assert_eq!(graph.edge_weight_between(a, b), Some(4.0));
        assert_eq!(graph.edge_weight_between(b, a), None);
    }

    #[test]
    fn incoming_adjacency_walks_edges_backwards() {
        let mut graph = RouteGraph::from_points(&three_points());
        graph.add_edge(RouteNodeId::new(0), RouteNodeId::new(2), 5.0, EdgeKind::Shortcut);
        let incoming: Vec<_> = graph
            .adjacent(RouteNodeId::new(2), Direction::Incoming)
            .map(|(node, _)| node)
            .collect();
        assert_eq!(incoming, vec![RouteNodeId::new(0)]);
    }

    #[test]
    fn broken_chain_is_reported() {
        let mut graph = RouteGraph::from_points(&three_points());
        graph.add_edge(RouteNodeId::new(0), RouteNodeId::new(1), 1.0, EdgeKind::Primary);
        assert!(matches!(
            graph.check_invariants(),
            Err(Error::GraphInvariant(_))
        ));
    }

    #[test]
    #[should_panic(expected = "invalid weight")]
    fn negative_weight_panics() {
        let mut graph = RouteGraph::from_points(&three_points());
        graph.add_edge(RouteNodeId::new(0), RouteNodeId::new(1), -1.0, EdgeKind::Primary);
    }
}
