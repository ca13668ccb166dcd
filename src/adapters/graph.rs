//! Undirected graphs and their traversal adapters
//!
//! Nodes are identified by their position in declaration order; traces over a
//! graph snapshot the node labels and refer to nodes by that position.
//! Neighbors are explored in edge insertion order, and a neighbor that is
//! already visited is skipped without recording a step.

use super::errors::InputError;
use crate::trace::{Aux, SnapshotPolicy, StepKind, Trace, TraceRecorder};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::debug;

/// An undirected graph stored as adjacency lists
#[derive(Debug, Clone, Default)]
pub struct Graph {
    labels: Vec<String>,
    adjacency: Vec<Vec<usize>>,
    index: FxHashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six-node demo graph: A-B, B-C, A-D, B-E, C-F, D-E, E-F
    pub fn sample() -> Self {
        let edges = [
            ("A", "B"),
            ("B", "C"),
            ("A", "D"),
            ("B", "E"),
            ("C", "F"),
            ("D", "E"),
            ("E", "F"),
        ];
        Self::from_edges(&edges).unwrap_or_default()
    }

    /// Build a graph from edge pairs, creating nodes in first-seen order
    pub fn from_edges(edges: &[(&str, &str)]) -> Result<Self, InputError> {
        let mut graph = Graph::new();
        for (from, to) in edges {
            for label in [from, to] {
                if graph.node_index(label).is_none() {
                    graph.add_node(label)?;
                }
            }
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Parse text of the form `A-B, B-C, D`. A bare label declares a node
    /// with no edges; labels that already exist are not declared again.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut graph = Graph::new();
        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let Some((from, to)) = token.split_once('-') else {
                if graph.node_index(token).is_none() {
                    graph.add_node(token)?;
                }
                continue;
            };
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() || to.is_empty() {
                return Err(InputError::MalformedEdge {
                    text: token.to_string(),
                });
            }
            for label in [from, to] {
                if graph.node_index(label).is_none() {
                    graph.add_node(label)?;
                }
            }
            graph.add_edge(from, to)?;
        }
        if graph.labels.is_empty() {
            return Err(InputError::EmptyGraph);
        }
        Ok(graph)
    }

    pub fn add_node(&mut self, label: &str) -> Result<usize, InputError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(InputError::BlankValue);
        }
        if self.index.contains_key(label) {
            return Err(InputError::DuplicateNode {
                label: label.to_string(),
            });
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.adjacency.push(Vec::new());
        self.index.insert(label.to_string(), id);
        Ok(id)
    }

    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), InputError> {
        let a = self.require(from)?;
        let b = self.require(to)?;
        if a == b {
            return Err(InputError::SelfLoop {
                label: from.trim().to_string(),
            });
        }
        if self.adjacency[a].contains(&b) {
            return Err(InputError::DuplicateEdge {
                from: self.labels[a].clone(),
                to: self.labels[b].clone(),
            });
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        Ok(())
    }

    fn require(&self, label: &str) -> Result<usize, InputError> {
        self.node_index(label).ok_or_else(|| InputError::UnknownNode {
            label: label.trim().to_string(),
        })
    }

    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.index.get(label.trim()).copied()
    }

    pub fn label(&self, node: usize) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Undirected edges, each listed once
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, nbs)| nbs.iter().filter(move |b| a < **b).map(move |b| (a, *b)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn traversal_start(
    graph: &Graph,
    start: &str,
    name: &str,
) -> Result<(usize, TraceRecorder<String>), InputError> {
    if graph.is_empty() {
        return Err(InputError::EmptyGraph);
    }
    let start_id = graph.require(start)?;
    let mut rec = TraceRecorder::new();
    rec.start(
        graph.labels(),
        Aux::None,
        format!("Starting {} from {}", name, graph.labels[start_id]),
    );
    Ok((start_id, rec))
}

fn record_visit(rec: &mut TraceRecorder<String>, graph: &Graph, node: usize, order: &mut Vec<usize>) {
    rec.record(
        StepKind::Visit,
        [node],
        SnapshotPolicy::Omit,
        Aux::Order {
            position: order.len(),
        },
        format!("Visiting {}", graph.labels[node]),
    );
    order.push(node);
}

fn traversal_finish(
    mut rec: TraceRecorder<String>,
    graph: &Graph,
    order: Vec<usize>,
    name: &str,
) -> Trace<String> {
    let path: Vec<&str> = order.iter().map(|n| graph.labels[*n].as_str()).collect();
    rec.complete(
        order.iter().copied(),
        graph.labels(),
        Aux::None,
        format!("{} order: {}", name, path.join(" → ")),
    );
    let trace = rec.finalize();
    debug!(algorithm = name, visited = order.len(), steps = trace.len(), "recorded traversal trace");
    trace
}

/// Breadth-first traversal; nodes are marked visited when enqueued
pub fn bfs(graph: &Graph, start: &str) -> Result<Trace<String>, InputError> {
    let (start_id, mut rec) = traversal_start(graph, start, "BFS")?;
    let mut visited = vec![false; graph.len()];
    let mut order = Vec::with_capacity(graph.len());
    let mut queue = VecDeque::from([start_id]);
    visited[start_id] = true;

    while let Some(node) = queue.pop_front() {
        record_visit(&mut rec, graph, node, &mut order);
        for &next in graph.neighbors(node) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    Ok(traversal_finish(rec, graph, order, "BFS"))
}

/// Depth-first traversal in recursive order, driven by an explicit stack
pub fn dfs(graph: &Graph, start: &str) -> Result<Trace<String>, InputError> {
    let (start_id, mut rec) = traversal_start(graph, start, "DFS")?;
    let mut visited = vec![false; graph.len()];
    let mut order = Vec::with_capacity(graph.len());

    visited[start_id] = true;
    record_visit(&mut rec, graph, start_id, &mut order);
    // (node, position of the next neighbor to try)
    let mut stack = vec![(start_id, 0usize)];

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        match graph.neighbors(node).get(cursor) {
            Some(&next) => {
                frame.1 += 1;
                if !visited[next] {
                    visited[next] = true;
                    record_visit(&mut rec, graph, next, &mut order);
                    stack.push((next, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    Ok(traversal_finish(rec, graph, order, "DFS"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit_labels(graph: &Graph, trace: &Trace<String>) -> Vec<String> {
        trace
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .map(|s| graph.label(s.indices[0]).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_bfs_visits_in_insertion_order() {
        let graph = Graph::from_edges(&[("A", "B"), ("B", "C"), ("A", "D")]).unwrap();
        let trace = bfs(&graph, "A").unwrap();
        assert_eq!(visit_labels(&graph, &trace), vec!["A", "B", "D", "C"]);
        assert_eq!(trace.steps().last().unwrap().indices, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_dfs_goes_deep_first() {
        let graph = Graph::from_edges(&[("A", "B"), ("B", "C"), ("A", "D")]).unwrap();
        let trace = dfs(&graph, "A").unwrap();
        assert_eq!(visit_labels(&graph, &trace), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_sample_graph_orders() {
        let graph = Graph::sample();
        assert_eq!(graph.len(), 6);
        assert_eq!(graph.edges().len(), 7);
        let bfs_order = visit_labels(&graph, &bfs(&graph, "A").unwrap());
        assert_eq!(bfs_order, vec!["A", "B", "D", "C", "E", "F"]);
        let dfs_order = visit_labels(&graph, &dfs(&graph, "A").unwrap());
        assert_eq!(dfs_order, vec!["A", "B", "C", "F", "E", "D"]);
    }

    #[test]
    fn test_cycles_do_not_revisit() {
        let graph = Graph::parse("A-B, B-C, C-A").unwrap();
        for trace in [bfs(&graph, "A").unwrap(), dfs(&graph, "A").unwrap()] {
            let visits = trace.iter().filter(|s| s.kind == StepKind::Visit).count();
            assert_eq!(visits, 3);
        }
    }

    #[test]
    fn test_visit_order_positions() {
        let graph = Graph::sample();
        let trace = bfs(&graph, "C").unwrap();
        let positions: Vec<usize> = trace
            .iter()
            .filter_map(|s| match s.aux {
                Aux::Order { position } => Some(position),
                _ => None,
            })
            .collect();
        assert_eq!(positions, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_unreachable_nodes_are_not_visited() {
        let mut graph = Graph::parse("A-B").unwrap();
        graph.add_node("Z").unwrap();
        let trace = bfs(&graph, "A").unwrap();
        assert_eq!(visit_labels(&graph, &trace), vec!["A", "B"]);
    }

    #[test]
    fn test_bare_labels_declare_isolated_nodes() {
        let graph = Graph::parse("A-B, C").unwrap();
        assert_eq!(graph.labels(), &["A", "B", "C"]);
        assert_eq!(graph.edges(), vec![(0, 1)]);
        assert!(graph.neighbors(2).is_empty());
        assert_eq!(visit_labels(&graph, &bfs(&graph, "A").unwrap()), vec!["A", "B"]);
        assert_eq!(visit_labels(&graph, &dfs(&graph, "C").unwrap()), vec!["C"]);

        // Repeating a known label declares nothing new
        let graph = Graph::parse("A, A-B, B").unwrap();
        assert_eq!(graph.len(), 2);

        let single = Graph::parse("Q").unwrap();
        assert_eq!(single.len(), 1);
        assert!(single.edges().is_empty());
    }

    #[test]
    fn test_traversal_rejects_unknown_start() {
        let graph = Graph::sample();
        assert_eq!(
            bfs(&graph, "Q").unwrap_err(),
            InputError::UnknownNode {
                label: "Q".to_string()
            }
        );
        assert_eq!(dfs(&Graph::new(), "A").unwrap_err(), InputError::EmptyGraph);
    }

    #[test]
    fn test_graph_construction_errors() {
        assert!(matches!(
            Graph::parse("A-A"),
            Err(InputError::SelfLoop { .. })
        ));
        assert!(matches!(
            Graph::parse("A-B, B-A"),
            Err(InputError::DuplicateEdge { .. })
        ));
        assert!(matches!(
            Graph::parse("A-B, C-"),
            Err(InputError::MalformedEdge { .. })
        ));
        assert!(matches!(Graph::parse(" , "), Err(InputError::EmptyGraph)));

        let mut graph = Graph::new();
        graph.add_node("A").unwrap();
        assert!(matches!(
            graph.add_node("A"),
            Err(InputError::DuplicateNode { .. })
        ));
        assert!(matches!(
            graph.add_edge("A", "B"),
            Err(InputError::UnknownNode { .. })
        ));
    }
}
