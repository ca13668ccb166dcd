//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`bars`]: Array elements as vertical bars colored by their step marks
//! - [`graph`]: Graph nodes, adjacency lists and visit order
//! - [`tree`]: Binary search tree laid out by inorder rank and depth
//! - [`cells`]: Stack, queue and linked list elements in structure order
//! - [`info`]: Algorithm description, current step message and counters
//! - [`code`]: Reference implementation with the current line highlighted
//! - [`status`]: Status bar with keybindings and playback state
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function that draws from
//! a projected view and never mutates application state.

pub mod bars;
pub mod cells;
pub mod code;
pub mod graph;
pub mod info;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use bars::render_bars_pane;
pub use cells::render_cells_pane;
pub use code::render_code_pane;
pub use graph::render_graph_pane;
pub use info::{render_info_pane, InfoRenderData};
pub use status::render_status_bar;
pub use tree::render_tree_pane;
