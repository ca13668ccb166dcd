//! Binary search tree pane
//!
//! Nodes are laid out on a grid: the column is the node's inorder rank and the
//! row is its depth. Edge rows between levels draw `/` and `\` halfway between
//! a parent and its children.

use crate::adapters::tree::BstNode;
use crate::projector::ViewState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Grid position of a node: (column of its center, depth)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    center: usize,
    depth: usize,
}

fn layout(nodes: &[BstNode], cell_width: usize) -> Vec<Option<Cell>> {
    let mut cells = vec![None; nodes.len()];
    if nodes.is_empty() {
        return cells;
    }
    // Iterative inorder walk carrying depth
    let mut rank = 0;
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut current = Some((0usize, 0usize));
    while current.is_some() || !stack.is_empty() {
        while let Some((id, depth)) = current {
            stack.push((id, depth));
            current = nodes
                .get(id)
                .and_then(|n| n.left)
                .map(|left| (left, depth + 1));
        }
        if let Some((id, depth)) = stack.pop() {
            if let Some(slot) = cells.get_mut(id) {
                *slot = Some(Cell {
                    center: rank * cell_width + cell_width / 2,
                    depth,
                });
            }
            rank += 1;
            current = nodes
                .get(id)
                .and_then(|n| n.right)
                .map(|right| (right, depth + 1));
        }
    }
    cells
}

/// Place `(column, text, style)` pieces on one line, left to right
fn compose(mut pieces: Vec<(usize, String, Style)>) -> Line<'static> {
    pieces.sort_by_key(|(column, _, _)| *column);
    let mut spans = Vec::with_capacity(pieces.len() * 2);
    let mut cursor = 0;
    for (column, text, style) in pieces {
        if column < cursor {
            continue;
        }
        spans.push(Span::raw(" ".repeat(column - cursor)));
        cursor = column + text.chars().count();
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn value_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

pub fn render_tree_pane(frame: &mut Frame, area: Rect, title: &str, view: &ViewState<BstNode>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let nodes = &view.items;
    if nodes.is_empty() {
        let paragraph = Paragraph::new("(empty tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let labels: Vec<String> = nodes.iter().map(|n| value_text(n.value)).collect();
    let cell_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1) + 1;
    let cells = layout(nodes, cell_width);
    let depth = cells.iter().flatten().map(|c| c.depth).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(depth * 2 + 3);
    for level in 0..=depth {
        let mut values = Vec::new();
        let mut edges = Vec::new();
        for (id, cell) in cells.iter().enumerate() {
            let Some(cell) = cell.filter(|c| c.depth == level) else {
                continue;
            };
            let text = &labels[id];
            let start = cell.center.saturating_sub(text.chars().count() / 2);
            let mut style = Style::default()
                .fg(DEFAULT_THEME.mark(view.mark(id)))
                .add_modifier(Modifier::BOLD);
            if view.active == Some(id) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            values.push((start, text.clone(), style));

            let edge_style = Style::default().fg(DEFAULT_THEME.comment);
            if let Some(left) = nodes[id].left.and_then(|l| cells.get(l).copied().flatten()) {
                edges.push(((left.center + cell.center) / 2, "/".to_string(), edge_style));
            }
            if let Some(right) = nodes[id].right.and_then(|r| cells.get(r).copied().flatten()) {
                edges.push(((right.center + cell.center).div_ceil(2), "\\".to_string(), edge_style));
            }
        }
        lines.push(compose(values));
        if level < depth {
            lines.push(compose(edges));
        }
    }

    lines.push(Line::from(""));
    let order: Vec<String> = view
        .visited
        .iter()
        .filter_map(|&id| labels.get(id).cloned())
        .collect();
    lines.push(Line::from(vec![
        Span::styled("Visited  ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            if order.is_empty() {
                "(none yet)".to_string()
            } else {
                order.join(", ")
            },
            Style::default().fg(DEFAULT_THEME.settled),
        ),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
