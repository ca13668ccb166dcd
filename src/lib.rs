//! # Introduction
//!
//! Algoscope runs classic algorithms over small inputs, recording every
//! comparison, write and visit as a [`trace::Step`]. The finished
//! [`trace::Trace`] is then replayed forward and backward through a terminal
//! UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Adapter → Trace → Playback → Projector → TUI
//! ```
//!
//! 1. [`adapters`]: sorting, searching, graph, tree and container
//!    algorithms, each emitting a trace through a [`trace::TraceRecorder`].
//! 2. [`trace`]: the immutable step log and its summary counters.
//! 3. [`playback`]: a cursor over a trace with epoch-guarded timer ticks,
//!    so a stale tick can never move the cursor.
//! 4. [`projector`]: a pure function from `(trace, cursor)` to a
//!    [`projector::ViewState`] the panes draw from.
//! 5. [`config`] and [`session`]: command-line options, input generation
//!    and dispatch to the right adapter.
//! 6. [`snippets`]: reference code shown next to the visualization.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorts: bubble, selection, insertion, quick, merge.
//! Searches: linear, binary.
//! Graphs: breadth-first and depth-first traversal.
//! Trees: binary search tree inorder, preorder and postorder traversal.
//! Containers: stack, queue and singly linked list operations.

pub mod adapters;
pub mod config;
pub mod playback;
pub mod projector;
pub mod session;
pub mod snippets;
pub mod trace;
pub mod ui;
