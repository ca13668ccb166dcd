//! Algorithm adapters
//!
//! Each adapter runs a textbook algorithm over a private copy of its input and
//! records a [`Step`](crate::trace::Step) at every point worth animating:
//! - [`sorting`]: bubble, selection, insertion, quick and merge sort
//! - [`search`]: linear and binary search
//! - [`graph`]: breadth-first and depth-first traversal of undirected graphs
//! - [`tree`]: binary search tree insert, search and traversals
//! - [`structures`]: stack, queue and linked list operation scripts
//! - [`errors`]: input validation errors
//!
//! # Failure Model
//!
//! Adapters validate their input up front and return an
//! [`InputError`](errors::InputError) instead of an empty trace. Once
//! validation passes, recording cannot fail.

pub mod errors;
pub mod graph;
pub mod search;
pub mod sorting;
pub mod structures;
pub mod tree;

use crate::playback::Pace;
use errors::InputError;
use std::fmt;
use std::str::FromStr;

/// Smallest collection an array adapter accepts
pub const MIN_ELEMENTS: usize = 1;

/// Largest collection an array adapter accepts
pub const MAX_ELEMENTS: usize = 50;

/// Algorithm families share input shape and view layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Sort,
    Search,
    Graph,
    Tree,
    /// Linear structures driven by a script of operations
    Structure,
}

/// Every algorithm the visualizer can trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    MergeSort,
    LinearSearch,
    BinarySearch,
    Bfs,
    Dfs,
    TreeInorder,
    TreePreorder,
    TreePostorder,
    BstInsert,
    BstSearch,
    Stack,
    Queue,
    LinkedList,
}

impl Algorithm {
    pub const ALL: [Algorithm; 17] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::QuickSort,
        Algorithm::MergeSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::TreeInorder,
        Algorithm::TreePreorder,
        Algorithm::TreePostorder,
        Algorithm::BstInsert,
        Algorithm::BstSearch,
        Algorithm::Stack,
        Algorithm::Queue,
        Algorithm::LinkedList,
    ];

    /// Short name accepted on the command line
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble",
            Algorithm::SelectionSort => "selection",
            Algorithm::InsertionSort => "insertion",
            Algorithm::QuickSort => "quick",
            Algorithm::MergeSort => "merge",
            Algorithm::LinearSearch => "linear",
            Algorithm::BinarySearch => "binary",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::TreeInorder => "inorder",
            Algorithm::TreePreorder => "preorder",
            Algorithm::TreePostorder => "postorder",
            Algorithm::BstInsert => "bst-insert",
            Algorithm::BstSearch => "bst-search",
            Algorithm::Stack => "stack",
            Algorithm::Queue => "queue",
            Algorithm::LinkedList => "list",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::SelectionSort => "Selection Sort",
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::TreeInorder => "BST Inorder Traversal",
            Algorithm::TreePreorder => "BST Preorder Traversal",
            Algorithm::TreePostorder => "BST Postorder Traversal",
            Algorithm::BstInsert => "BST Insert",
            Algorithm::BstSearch => "BST Search",
            Algorithm::Stack => "Stack",
            Algorithm::Queue => "Queue",
            Algorithm::LinkedList => "Linked List",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => {
                "Repeatedly swaps adjacent elements that are out of order"
            }
            Algorithm::SelectionSort => {
                "Selects the minimum of the unsorted part and moves it to the front"
            }
            Algorithm::InsertionSort => {
                "Inserts each element into its place within the sorted prefix"
            }
            Algorithm::QuickSort => {
                "Partitions around the last element as pivot, then sorts each side"
            }
            Algorithm::MergeSort => "Divides the array in halves, then merges sorted halves",
            Algorithm::LinearSearch => "Checks each element in turn until the target is found",
            Algorithm::BinarySearch => "Halves a sorted search range around its midpoint",
            Algorithm::Bfs => "Explores the graph level by level from the start node",
            Algorithm::Dfs => "Explores as deep as possible before backtracking",
            Algorithm::TreeInorder => "Visits left subtree, node, then right subtree",
            Algorithm::TreePreorder => "Visits node, then left and right subtrees",
            Algorithm::TreePostorder => "Visits left and right subtrees, then the node",
            Algorithm::BstInsert => "Descends from the root and attaches the value as a new leaf",
            Algorithm::BstSearch => "Descends left or right of each node until the value is found",
            Algorithm::Stack => "Last in, first out: push and pop at the top",
            Algorithm::Queue => "First in, first out: enqueue at the rear, dequeue at the front",
            Algorithm::LinkedList => "Nodes reached by following links from the head",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Algorithm::BubbleSort
            | Algorithm::SelectionSort
            | Algorithm::InsertionSort
            | Algorithm::QuickSort
            | Algorithm::MergeSort => Family::Sort,
            Algorithm::LinearSearch | Algorithm::BinarySearch => Family::Search,
            Algorithm::Bfs | Algorithm::Dfs => Family::Graph,
            Algorithm::TreeInorder
            | Algorithm::TreePreorder
            | Algorithm::TreePostorder
            | Algorithm::BstInsert
            | Algorithm::BstSearch => Family::Tree,
            Algorithm::Stack | Algorithm::Queue | Algorithm::LinkedList => Family::Structure,
        }
    }

    /// Whether a run needs a numeric target
    pub fn needs_target(self) -> bool {
        self.family() == Family::Search
            || matches!(self, Algorithm::BstInsert | Algorithm::BstSearch)
    }

    /// Nominal animation pace
    pub fn pace(self) -> Pace {
        match self {
            Algorithm::MergeSort | Algorithm::BinarySearch => Pace::from_millis(1500, 200),
            Algorithm::Stack | Algorithm::Queue | Algorithm::LinkedList => structures::PACE,
            _ => Pace::from_millis(1000, 100),
        }
    }

    /// The algorithm after this one, wrapping around
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .iter()
            .copied()
            .find(|a| a.key() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Algorithm::ALL.iter().map(|a| a.key()).collect();
                format!("unknown algorithm '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Check an array adapter's input: 1..=50 finite values
pub fn validate_values(values: &[f64]) -> Result<(), InputError> {
    if values.len() < MIN_ELEMENTS {
        return Err(InputError::Empty);
    }
    if values.len() > MAX_ELEMENTS {
        return Err(InputError::TooLarge {
            len: values.len(),
            max: MAX_ELEMENTS,
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(InputError::NonFinite { index });
    }
    Ok(())
}
