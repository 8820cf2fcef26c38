//! Storage shape graph
//!
//! One node per surviving representative reachable from a program variable.
//! Edges follow the representative's term: `PointsTo` for `Ref`,
//! `Parameter(i)` and `Return` for `Lambda`.

use super::type_term::{EcrId, TermShape};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Node label: a representative and what is known about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeNode {
    pub ecr: EcrId,
    pub shape: TermShape,
    pub conflicted: bool,
    /// Qualified variable names in the class, sorted
    pub variables: Vec<String>,
    /// `alloc@line:col` labels of allocations whose cells live here
    pub alloc_sites: Vec<String>,
}

impl fmt::Display for ShapeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ecr, self.shape)?;
        if self.conflicted {
            f.write_str("!")?;
        }
        let members: Vec<&str> = self
            .variables
            .iter()
            .chain(self.alloc_sites.iter())
            .map(String::as_str)
            .collect();
        if !members.is_empty() {
            write!(f, "\n{{{}}}", members.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeEdge {
    PointsTo,
    Parameter(usize),
    Return,
}

impl fmt::Display for ShapeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeEdge::PointsTo => f.write_str("points-to"),
            ShapeEdge::Parameter(i) => write!(f, "param {}", i),
            ShapeEdge::Return => f.write_str("return"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShapeGraph {
    graph: DiGraph<ShapeNode, ShapeEdge>,
    index: FxHashMap<EcrId, NodeIndex>,
}

impl ShapeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; a second node for the same representative is ignored
    pub fn add_node(&mut self, node: ShapeNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.ecr) {
            return idx;
        }
        let ecr = node.ecr;
        let idx = self.graph.add_node(node);
        self.index.insert(ecr, idx);
        idx
    }

    /// Connect two existing nodes; returns false when either is missing
    pub fn add_edge(&mut self, from: EcrId, to: EcrId, edge: ShapeEdge) -> bool {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&a), Some(&b)) => {
                self.graph.add_edge(a, b, edge);
                true
            }
            _ => false,
        }
    }

    pub fn node(&self, ecr: EcrId) -> Option<&ShapeNode> {
        self.index.get(&ecr).map(|&idx| &self.graph[idx])
    }

    /// Node holding the given qualified variable name
    pub fn node_of_variable(&self, name: &str) -> Option<&ShapeNode> {
        self.nodes()
            .find(|node| node.variables.iter().any(|v| v == name))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ShapeNode> {
        self.graph.node_weights()
    }

    /// Outgoing edges of a representative with their target representatives
    pub fn successors(&self, ecr: EcrId) -> Vec<(ShapeEdge, EcrId)> {
        let Some(&idx) = self.index.get(&ecr) else {
            return Vec::new();
        };
        let mut out: Vec<(ShapeEdge, EcrId)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (*edge.weight(), self.graph[edge.target()].ecr))
            .collect();
        out.sort_by_key(|(edge, target)| (edge_order(edge), *target));
        out
    }

    /// Target of the `PointsTo` edge, if any
    pub fn points_to(&self, ecr: EcrId) -> Option<EcrId> {
        self.successors(ecr)
            .into_iter()
            .find(|(edge, _)| *edge == ShapeEdge::PointsTo)
            .map(|(_, target)| target)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Underlying petgraph graph, for renderers
    pub fn graph(&self) -> &DiGraph<ShapeNode, ShapeEdge> {
        &self.graph
    }
}

fn edge_order(edge: &ShapeEdge) -> (u8, usize) {
    match edge {
        ShapeEdge::PointsTo => (0, 0),
        ShapeEdge::Parameter(i) => (1, *i),
        ShapeEdge::Return => (2, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, shape: TermShape, vars: &[&str]) -> ShapeNode {
        ShapeNode {
            ecr: EcrId(id),
            shape,
            conflicted: false,
            variables: vars.iter().map(|v| v.to_string()).collect(),
            alloc_sites: Vec::new(),
        }
    }

    #[test]
    fn test_nodes_are_deduplicated_by_ecr() {
        let mut graph = ShapeGraph::new();
        let a = graph.add_node(node(0, TermShape::Ref, &["p"]));
        let b = graph.add_node(node(0, TermShape::Ref, &["p"]));
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_successors_are_ordered() {
        let mut graph = ShapeGraph::new();
        graph.add_node(node(0, TermShape::Lambda, &["f"]));
        graph.add_node(node(1, TermShape::Unknown, &["f.r"]));
        graph.add_node(node(2, TermShape::Unknown, &["f.a"]));
        assert!(graph.add_edge(EcrId(0), EcrId(1), ShapeEdge::Return));
        assert!(graph.add_edge(EcrId(0), EcrId(2), ShapeEdge::Parameter(0)));
        assert!(!graph.add_edge(EcrId(0), EcrId(9), ShapeEdge::PointsTo));

        assert_eq!(
            graph.successors(EcrId(0)),
            vec![
                (ShapeEdge::Parameter(0), EcrId(2)),
                (ShapeEdge::Return, EcrId(1))
            ]
        );
        assert_eq!(graph.points_to(EcrId(0)), None);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_node_label() {
        let mut n = node(3, TermShape::Unknown, &["x", "y"]);
        n.conflicted = true;
        n.alloc_sites.push("alloc@1:6".into());
        assert_eq!(n.to_string(), "#3:unknown!\n{x, y, alloc@1:6}");
        assert_eq!(ShapeEdge::Parameter(1).to_string(), "param 1");
    }
}
