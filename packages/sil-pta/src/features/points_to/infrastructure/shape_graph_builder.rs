//! Shape graph and typing report over a finished store
//!
//! Works on `&EcrStore` only, so every lookup goes through `find_readonly`.

use super::union_find::EcrStore;
use crate::config::DEFAULT_MAX_RENDER_DEPTH;
use crate::features::parsing::domain::Variable;
use crate::features::points_to::domain::{
    EcrId, ShapeEdge, ShapeGraph, ShapeNode, TypeTerm, TypingReport, VariableTyping,
};
use rustc_hash::{FxHashMap, FxHashSet};

pub struct ShapeGraphBuilder<'a> {
    store: &'a EcrStore,
    variables: &'a FxHashMap<Variable, EcrId>,
    max_depth: usize,
}

impl<'a> ShapeGraphBuilder<'a> {
    pub fn new(store: &'a EcrStore, variables: &'a FxHashMap<Variable, EcrId>) -> Self {
        Self {
            store,
            variables,
            max_depth: DEFAULT_MAX_RENDER_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Program variables sorted by qualified name, with their representative
    fn sorted_roots(&self) -> Vec<(String, EcrId)> {
        let mut roots: Vec<(String, EcrId)> = self
            .variables
            .iter()
            .map(|(var, &id)| (var.qualified_name(), self.store.find_readonly(id)))
            .collect();
        roots.sort();
        roots
    }

    /// Graph of every representative reachable from a program variable
    pub fn build_graph(&self) -> ShapeGraph {
        let mut graph = ShapeGraph::new();
        let mut seen: FxHashSet<EcrId> = FxHashSet::default();
        let mut worklist: Vec<EcrId> = self
            .sorted_roots()
            .into_iter()
            .map(|(_, root)| root)
            .collect();
        worklist.reverse();

        let mut order = Vec::new();
        while let Some(root) = worklist.pop() {
            if !seen.insert(root) {
                continue;
            }
            graph.add_node(self.node(root));
            order.push(root);

            let targets = self.store.term(root).targets();
            for target in targets.into_iter().rev() {
                let target = self.store.find_readonly(target);
                if !seen.contains(&target) {
                    worklist.push(target);
                }
            }
        }

        for root in order {
            match self.store.term(root) {
                TypeTerm::Unknown | TypeTerm::Base => {}
                TypeTerm::Ref(target) => {
                    graph.add_edge(root, self.store.find_readonly(*target), ShapeEdge::PointsTo);
                }
                TypeTerm::Lambda { params, ret } => {
                    for (i, param) in params.iter().enumerate() {
                        graph.add_edge(
                            root,
                            self.store.find_readonly(*param),
                            ShapeEdge::Parameter(i),
                        );
                    }
                    graph.add_edge(root, self.store.find_readonly(*ret), ShapeEdge::Return);
                }
            }
        }

        graph
    }

    fn node(&self, root: EcrId) -> ShapeNode {
        ShapeNode {
            ecr: root,
            shape: self.store.term(root).shape(),
            conflicted: self.store.is_conflicted(root),
            variables: self.store.names(root).map(str::to_string).collect(),
            alloc_sites: self.store.alloc_sites(root).to_vec(),
        }
    }

    /// Typing of every program variable
    pub fn typing_report(&self) -> TypingReport {
        let typings = self
            .sorted_roots()
            .into_iter()
            .map(|(variable, root)| VariableTyping {
                variable,
                ecr: root,
                shape: self.store.term(root).shape(),
                conflicted: self.store.is_conflicted(root),
                rendered: self.render(root),
            })
            .collect();
        TypingReport::new(typings)
    }

    /// Render the term of a class, e.g. `#2:ref(#5:lam(#6:base) -> #7:unknown)`
    ///
    /// A class met again while its own rendering is in progress prints as
    /// `^#id`. Nesting deeper than `max_depth` prints as `#id:..`.
    pub fn render(&self, ecr: EcrId) -> String {
        let mut out = String::new();
        let mut in_progress: FxHashSet<EcrId> = FxHashSet::default();
        let mut tasks = vec![RenderTask::Enter(ecr, 0)];

        while let Some(task) = tasks.pop() {
            match task {
                RenderTask::Text(text) => out.push_str(text),
                RenderTask::Leave(root) => {
                    in_progress.remove(&root);
                }
                RenderTask::Enter(ecr, depth) => {
                    let root = self.store.find_readonly(ecr);
                    if in_progress.contains(&root) {
                        out.push_str(&format!("^{}", root));
                        continue;
                    }
                    if depth >= self.max_depth {
                        out.push_str(&format!("{}:..", root));
                        continue;
                    }

                    let mark = if self.store.is_conflicted(root) { "!" } else { "" };
                    out.push_str(&format!("{}:", root));

                    match self.store.term(root) {
                        TypeTerm::Unknown => {
                            out.push_str("unknown");
                            out.push_str(mark);
                        }
                        TypeTerm::Base => {
                            out.push_str("base");
                            out.push_str(mark);
                        }
                        TypeTerm::Ref(target) => {
                            out.push_str("ref(");
                            in_progress.insert(root);
                            tasks.push(RenderTask::Leave(root));
                            tasks.push(RenderTask::Text(mark));
                            tasks.push(RenderTask::Text(")"));
                            tasks.push(RenderTask::Enter(*target, depth + 1));
                        }
                        TypeTerm::Lambda { params, ret } => {
                            out.push_str("lam(");
                            in_progress.insert(root);
                            tasks.push(RenderTask::Leave(root));
                            tasks.push(RenderTask::Text(mark));
                            tasks.push(RenderTask::Enter(*ret, depth + 1));
                            tasks.push(RenderTask::Text(") -> "));
                            for (i, param) in params.iter().enumerate().rev() {
                                tasks.push(RenderTask::Enter(*param, depth + 1));
                                if i > 0 {
                                    tasks.push(RenderTask::Text(", "));
                                }
                            }
                        }
                    }
                }
            }
        }
        out
    }
}

/// Pending step of an iterative term rendering
enum RenderTask {
    Enter(EcrId, usize),
    Text(&'static str),
    Leave(EcrId),
}
