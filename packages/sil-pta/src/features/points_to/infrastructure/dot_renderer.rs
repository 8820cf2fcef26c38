//! Graphviz DOT output for the storage shape graph

use crate::features::points_to::domain::{ShapeEdge, ShapeGraph, ShapeNode, TermShape};
use crate::features::points_to::ports::ShapeGraphRenderer;
use petgraph::dot::Dot;

/// Renders a [`ShapeGraph`] with `petgraph::dot`
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl ShapeGraphRenderer for DotRenderer {
    fn render(&self, graph: &ShapeGraph) -> String {
        let dot = Dot::with_attr_getters(
            graph.graph(),
            &[],
            &|_, edge| edge_attributes(edge.weight()),
            &|_, (_, node)| node_attributes(node),
        );
        format!("{}", dot)
    }

    fn format_name(&self) -> &'static str {
        "dot"
    }
}

fn node_attributes(node: &ShapeNode) -> String {
    let shape = match node.shape {
        TermShape::Lambda => "component",
        TermShape::Ref => "box",
        TermShape::Base => "ellipse",
        TermShape::Unknown => "plaintext",
    };
    if node.conflicted {
        format!("shape = {} color = red", shape)
    } else {
        format!("shape = {}", shape)
    }
}

fn edge_attributes(edge: &ShapeEdge) -> String {
    match edge {
        ShapeEdge::PointsTo => String::new(),
        ShapeEdge::Parameter(_) => "style = dashed".to_string(),
        ShapeEdge::Return => "style = bold".to_string(),
    }
}
