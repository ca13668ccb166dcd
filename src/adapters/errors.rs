//! Input validation errors for the algorithm adapters
//!
//! This module defines [`InputError`], which represents every way a caller can
//! hand an adapter input it refuses to run on.
//!
//! All input errors are raised before any step is recorded: a rejected input
//! never produces a partial trace, and the caller keeps whatever state it had.

use thiserror::Error;

/// Errors raised while validating adapter input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The collection has no elements
    #[error("the collection is empty")]
    Empty,

    /// The collection exceeds the supported element count
    #[error("the collection has {len} elements, at most {max} are allowed")]
    TooLarge { len: usize, max: usize },

    /// A requested collection size lies outside the supported range
    #[error("size {size} is outside the supported range 1..={max}")]
    SizeOutOfRange { size: usize, max: usize },

    /// A value is NaN or infinite
    #[error("the value at position {index} is not a finite number")]
    NonFinite { index: usize },

    /// A token in custom input text is not a number
    #[error("could not parse '{token}' as a number")]
    Malformed { token: String },

    /// A search was requested without a target
    #[error("a search target is required")]
    MissingTarget,

    /// The search target is NaN or infinite
    #[error("the search target is not a finite number")]
    InvalidTarget,

    /// Binary search input is not in ascending order
    #[error("binary search needs ascending input, position {index} breaks the order")]
    Unsorted { index: usize },

    /// A graph node was referenced but never declared
    #[error("node '{label}' does not exist in the graph")]
    UnknownNode { label: String },

    /// The same node label was declared twice
    #[error("node '{label}' already exists")]
    DuplicateNode { label: String },

    /// An edge connects a node to itself
    #[error("cannot add an edge from '{label}' to itself")]
    SelfLoop { label: String },

    /// The same undirected edge was declared twice
    #[error("edge {from}-{to} already exists")]
    DuplicateEdge { from: String, to: String },

    /// Edge text was not of the form `A-B`
    #[error("malformed edge '{text}', expected the form A-B")]
    MalformedEdge { text: String },

    /// A traversal was requested on a graph without nodes
    #[error("the graph has no nodes")]
    EmptyGraph,

    /// A tree operation needs at least one node
    #[error("the tree is empty")]
    EmptyTree,

    /// Pop, dequeue, peek or delete on an empty structure
    #[error("the {structure} is empty")]
    EmptyStructure { structure: &'static str },

    /// A list position outside the valid range
    #[error("index {index} is out of range 0..={max}")]
    IndexOutOfRange { index: usize, max: usize },

    /// A structure element that is empty after trimming
    #[error("the value is blank")]
    BlankValue,

    /// Operation text the structure does not understand
    #[error("'{text}' is not a {structure} operation")]
    UnknownOperation { text: String, structure: &'static str },
}
