//! Graph traversal pane
//!
//! Shows every node as a chip colored by its mark, the adjacency list of each
//! node, and the visit order so far.

use crate::adapters::graph::Graph;
use crate::projector::{Mark, ViewState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn chip_style(mark: Mark) -> Style {
    match mark {
        Mark::Default => Style::default().fg(DEFAULT_THEME.fg).bg(DEFAULT_THEME.current_line_bg),
        mark => Style::default()
            .fg(Color::Black)
            .bg(DEFAULT_THEME.mark(mark))
            .add_modifier(Modifier::BOLD),
    }
}

/// Render the graph with traversal marks
pub fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    graph: &Graph,
    view: &ViewState<String>,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let mut lines = Vec::new();

    let mut chips = vec![Span::styled("Nodes  ", Style::default().fg(DEFAULT_THEME.comment))];
    for (index, label) in view.items.iter().enumerate() {
        chips.push(Span::styled(format!(" {} ", label), chip_style(view.mark(index))));
        chips.push(Span::raw(" "));
    }
    lines.push(Line::from(chips));
    lines.push(Line::from(""));

    let width = view.items.iter().map(|l| l.chars().count()).max().unwrap_or(1);
    for (index, label) in view.items.iter().enumerate() {
        let is_active = view.active == Some(index);
        let marker = if is_active { "▶ " } else { "  " };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(DEFAULT_THEME.special)),
            Span::styled(
                format!("{:<width$}", label, width = width),
                Style::default()
                    .fg(DEFAULT_THEME.mark(view.mark(index)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ── ", Style::default().fg(DEFAULT_THEME.comment)),
        ];
        for &next in graph.neighbors(index) {
            let style = if view.visited.contains(&next) {
                Style::default().fg(DEFAULT_THEME.settled)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(graph.label(next).unwrap_or("?").to_string(), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let order: Vec<&str> = view
        .visited
        .iter()
        .filter_map(|&node| view.items.get(node).map(String::as_str))
        .collect();
    lines.push(Line::from(vec![
        Span::styled("Order  ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            if order.is_empty() {
                "(none yet)".to_string()
            } else {
                order.join(" → ")
            },
            Style::default().fg(DEFAULT_THEME.settled),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
