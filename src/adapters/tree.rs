//! Binary search tree adapters
//!
//! The tree lives in an arena: nodes are never removed, the root is slot 0,
//! and children are referenced by slot. Traces snapshot the whole arena so a
//! renderer can rebuild the shape at any step.

use super::errors::InputError;
use crate::trace::{Aux, SnapshotPolicy, StepKind, Trace, TraceRecorder};
use std::fmt;
use tracing::debug;

/// One arena slot of a [`Bst`]
#[derive(Debug, Clone, PartialEq)]
pub struct BstNode {
    pub value: f64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl BstNode {
    fn leaf(value: f64) -> Self {
        BstNode {
            value,
            left: None,
            right: None,
        }
    }
}

impl fmt::Display for BstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Depth-first visiting orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOrder {
    Inorder,
    Preorder,
    Postorder,
}

impl TreeOrder {
    pub fn name(self) -> &'static str {
        match self {
            TreeOrder::Inorder => "Inorder",
            TreeOrder::Preorder => "Preorder",
            TreeOrder::Postorder => "Postorder",
        }
    }
}

/// Arena-backed binary search tree; duplicate values are ignored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bst {
    nodes: Vec<BstNode>,
}

impl Bst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every value in order, skipping duplicates
    pub fn from_values(values: &[f64]) -> Result<Self, InputError> {
        let mut tree = Bst::new();
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(InputError::NonFinite { index });
            }
            if let Descent::Vacant { parent } = tree.descend(*value) {
                tree.attach(parent, *value);
            }
        }
        Ok(tree)
    }

    pub fn nodes(&self) -> &[BstNode] {
        &self.nodes
    }

    pub fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Slots on the path from the root towards `value`
    fn path_to(&self, value: f64) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self.root();
        while let Some(id) = current {
            path.push(id);
            let node = &self.nodes[id];
            current = if value < node.value {
                node.left
            } else if value > node.value {
                node.right
            } else {
                None
            };
        }
        path
    }

    fn descend(&self, value: f64) -> Descent {
        match self.path_to(value).last() {
            None => Descent::Vacant { parent: None },
            Some(&id) if self.nodes[id].value == value => Descent::Present(id),
            Some(&id) => Descent::Vacant { parent: Some(id) },
        }
    }

    fn attach(&mut self, parent: Option<usize>, value: f64) -> usize {
        let id = self.nodes.len();
        self.nodes.push(BstNode::leaf(value));
        if let Some(parent) = parent {
            let parent = &mut self.nodes[parent];
            if value < parent.value {
                parent.left = Some(id);
            } else {
                parent.right = Some(id);
            }
        }
        id
    }

    /// Slot order for a traversal
    pub fn order(&self, order: TreeOrder) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk(self.root(), order, &mut out);
        out
    }

    fn walk(&self, node: Option<usize>, order: TreeOrder, out: &mut Vec<usize>) {
        let Some(id) = node else {
            return;
        };
        let BstNode { left, right, .. } = self.nodes[id];
        match order {
            TreeOrder::Preorder => {
                out.push(id);
                self.walk(left, order, out);
                self.walk(right, order, out);
            }
            TreeOrder::Inorder => {
                self.walk(left, order, out);
                out.push(id);
                self.walk(right, order, out);
            }
            TreeOrder::Postorder => {
                self.walk(left, order, out);
                self.walk(right, order, out);
                out.push(id);
            }
        }
    }

    /// Depth of every slot, root at 0
    pub fn depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.nodes.len()];
        for id in self.order(TreeOrder::Preorder) {
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                depths[child] = depths[id] + 1;
            }
        }
        depths
    }
}

enum Descent {
    Present(usize),
    Vacant { parent: Option<usize> },
}

fn compare_message(probe: f64, node: &BstNode) -> String {
    if probe < node.value {
        format!("{} < {}, going left", probe, node.value)
    } else if probe > node.value {
        format!("{} > {}, going right", probe, node.value)
    } else {
        format!("{} equals {}", probe, node.value)
    }
}

/// Insert `value` into a copy of `tree`, recording the descent and the new
/// slot. The caller's tree is left as it was.
pub fn insert(tree: &Bst, value: f64) -> Result<(Bst, Trace<BstNode>), InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { index: 0 });
    }
    let mut tree = tree.clone();
    let mut rec = TraceRecorder::new();
    rec.start(&tree.nodes, Aux::None, format!("Inserting {}", value));

    for id in tree.path_to(value) {
        rec.record(
            StepKind::Compare,
            [id],
            SnapshotPolicy::Omit,
            Aux::None,
            compare_message(value, &tree.nodes[id]),
        );
    }

    match tree.descend(value) {
        Descent::Present(id) => {
            rec.record(
                StepKind::Custom("duplicate"),
                [id],
                SnapshotPolicy::Omit,
                Aux::None,
                format!("{} is already in the tree, nothing to insert", value),
            );
            rec.complete([id], &tree.nodes, Aux::None, "Insert complete");
        }
        Descent::Vacant { parent } => {
            let id = tree.attach(parent, value);
            let message = match parent {
                Some(p) => format!(
                    "Attached {} as the {} child of {}",
                    value,
                    if value < tree.nodes[p].value { "left" } else { "right" },
                    tree.nodes[p].value
                ),
                None => format!("{} becomes the root", value),
            };
            rec.record(
                StepKind::InsertAt,
                [id],
                SnapshotPolicy::Capture(&tree.nodes),
                Aux::None,
                message,
            );
            rec.complete([id], &tree.nodes, Aux::None, "Insert complete");
        }
    }

    let trace = rec.finalize();
    debug!(value, nodes = tree.len(), steps = trace.len(), "recorded tree insert trace");
    Ok((tree, trace))
}

pub fn search(tree: &Bst, value: f64) -> Result<Trace<BstNode>, InputError> {
    if !value.is_finite() {
        return Err(InputError::InvalidTarget);
    }
    if tree.is_empty() {
        return Err(InputError::EmptyTree);
    }
    let mut rec = TraceRecorder::new();
    rec.start(&tree.nodes, Aux::None, format!("Searching for {}", value));

    for id in tree.path_to(value) {
        rec.record(
            StepKind::Compare,
            [id],
            SnapshotPolicy::Omit,
            Aux::None,
            compare_message(value, &tree.nodes[id]),
        );
    }

    let found = match tree.descend(value) {
        Descent::Present(id) => Some(id),
        Descent::Vacant { .. } => None,
    };
    match found {
        Some(id) => rec.record(
            StepKind::Found,
            [id],
            SnapshotPolicy::Omit,
            Aux::Outcome { found: Some(id) },
            format!("Found {}", value),
        ),
        None => rec.record(
            StepKind::NotFound,
            [],
            SnapshotPolicy::Omit,
            Aux::Outcome { found: None },
            format!("{} is not in the tree", value),
        ),
    }
    rec.complete(found, &tree.nodes, Aux::Outcome { found }, "Search complete");

    let trace = rec.finalize();
    debug!(value, found = ?found, steps = trace.len(), "recorded tree search trace");
    Ok(trace)
}

pub fn traverse(tree: &Bst, order: TreeOrder) -> Result<Trace<BstNode>, InputError> {
    if tree.is_empty() {
        return Err(InputError::EmptyTree);
    }
    let mut rec = TraceRecorder::new();
    rec.start(
        &tree.nodes,
        Aux::None,
        format!("Starting {} traversal", order.name().to_lowercase()),
    );

    let visits = tree.order(order);
    for (position, id) in visits.iter().enumerate() {
        rec.record(
            StepKind::Visit,
            [*id],
            SnapshotPolicy::Omit,
            Aux::Order { position },
            format!("Visiting {}", tree.nodes[*id].value),
        );
    }

    let values: Vec<String> = visits
        .iter()
        .map(|id| tree.nodes[*id].value.to_string())
        .collect();
    rec.complete(
        visits.iter().copied(),
        &tree.nodes,
        Aux::None,
        format!("{} order: {}", order.name(), values.join(", ")),
    );
    let trace = rec.finalize();
    debug!(order = order.name(), steps = trace.len(), "recorded tree traversal trace");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bst {
        Bst::from_values(&[50.0, 30.0, 70.0, 20.0, 40.0, 60.0, 80.0]).unwrap()
    }

    fn visited_values(tree: &Bst, trace: &Trace<BstNode>) -> Vec<f64> {
        trace
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .map(|s| tree.nodes()[s.indices[0]].value)
            .collect()
    }

    #[test]
    fn test_traversal_orders() {
        let tree = sample();
        let inorder = traverse(&tree, TreeOrder::Inorder).unwrap();
        assert_eq!(
            visited_values(&tree, &inorder),
            vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]
        );
        let preorder = traverse(&tree, TreeOrder::Preorder).unwrap();
        assert_eq!(
            visited_values(&tree, &preorder),
            vec![50.0, 30.0, 20.0, 40.0, 70.0, 60.0, 80.0]
        );
        let postorder = traverse(&tree, TreeOrder::Postorder).unwrap();
        assert_eq!(
            visited_values(&tree, &postorder),
            vec![20.0, 40.0, 30.0, 60.0, 80.0, 70.0, 50.0]
        );
    }

    #[test]
    fn test_insert_records_descent() {
        let before = sample();
        let (tree, trace) = insert(&before, 45.0).unwrap();
        let compares: Vec<usize> = trace
            .iter()
            .filter(|s| s.is_comparison())
            .map(|s| s.indices[0])
            .collect();
        // 50 -> 30 -> 40
        assert_eq!(compares, vec![0, 1, 4]);
        let inserted = trace.iter().find(|s| s.kind == StepKind::InsertAt).unwrap();
        assert_eq!(inserted.indices, vec![7]);
        assert_eq!(tree.nodes()[4].right, Some(7));
        assert_eq!(trace.final_snapshot().unwrap().len(), 8);

        // The input tree keeps its shape
        assert_eq!(before, sample());
        assert_eq!(before.nodes()[4].right, None);
    }

    #[test]
    fn test_insert_chains_from_returned_tree() {
        let tree = Bst::from_values(&[50.0]).unwrap();
        let (tree, _) = insert(&tree, 20.0).unwrap();
        let (grown, trace) = insert(&tree, 30.0).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(grown.len(), 3);
        assert_eq!(grown.nodes()[1].right, Some(2));
        assert_eq!(trace.get(0).unwrap().snapshot.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_insert_into_empty_tree() {
        let (tree, trace) = insert(&Bst::new(), 10.0).unwrap();
        assert_eq!(tree.root(), Some(0));
        assert_eq!(trace.get(0).unwrap().snapshot.as_deref(), Some(&[][..]));
        assert_eq!(trace.stats().mutations, 1);
    }

    #[test]
    fn test_insert_duplicate_is_ignored() {
        let (tree, trace) = insert(&sample(), 30.0).unwrap();
        assert_eq!(tree.len(), 7);
        assert!(trace
            .iter()
            .any(|s| s.kind == StepKind::Custom("duplicate")));
        assert_eq!(trace.stats().mutations, 0);
    }

    #[test]
    fn test_search_paths() {
        let tree = sample();
        let hit = search(&tree, 60.0).unwrap();
        assert_eq!(hit.stats().comparisons, 3);
        assert_eq!(hit.steps().last().unwrap().aux, Aux::Outcome { found: Some(5) });

        let miss = search(&tree, 65.0).unwrap();
        assert_eq!(miss.steps()[miss.len() - 2].kind, StepKind::NotFound);
        assert_eq!(miss.steps().last().unwrap().aux, Aux::Outcome { found: None });
    }

    #[test]
    fn test_empty_tree_is_rejected() {
        assert_eq!(
            traverse(&Bst::new(), TreeOrder::Inorder),
            Err(InputError::EmptyTree)
        );
        assert_eq!(search(&Bst::new(), 1.0), Err(InputError::EmptyTree));
    }

    #[test]
    fn test_depths() {
        let tree = sample();
        assert_eq!(tree.depths(), vec![0, 1, 1, 2, 2, 2, 2]);
    }
}
