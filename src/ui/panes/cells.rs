//! Linear structure pane
//!
//! Stacks are drawn top-down with the top element first. Queues and linked
//! lists are drawn left to right, front or head first.

use crate::adapters::Algorithm;
use crate::projector::{Mark, ViewState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn cell_style(mark: Mark) -> Style {
    match mark {
        Mark::Default => Style::default().fg(DEFAULT_THEME.fg).bg(DEFAULT_THEME.current_line_bg),
        mark => Style::default()
            .fg(Color::Black)
            .bg(DEFAULT_THEME.mark(mark))
            .add_modifier(Modifier::BOLD),
    }
}

/// Label for the element at `index` of a `len` long structure
fn caption(algorithm: Algorithm, index: usize, len: usize) -> Option<&'static str> {
    match algorithm {
        Algorithm::Stack if index + 1 == len => Some("top"),
        Algorithm::Queue if index == 0 => Some("front"),
        Algorithm::Queue if index + 1 == len => Some("rear"),
        Algorithm::LinkedList if index == 0 => Some("head"),
        _ => None,
    }
}

fn comment(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.comment))
}

fn stack_lines(view: &ViewState<String>) -> Vec<Line<'static>> {
    let width = view.items.iter().map(|i| i.chars().count()).max().unwrap_or(1);
    let len = view.items.len();
    (0..len)
        .rev()
        .map(|index| {
            let mut spans = vec![Span::styled(
                format!(" {:^width$} ", view.items[index], width = width),
                cell_style(view.mark(index)),
            )];
            if let Some(caption) = caption(Algorithm::Stack, index, len) {
                spans.push(comment(format!("  ← {}", caption)));
            }
            Line::from(spans)
        })
        .collect()
}

fn row_lines(algorithm: Algorithm, view: &ViewState<String>) -> Vec<Line<'static>> {
    let len = view.items.len();
    let link = if algorithm == Algorithm::LinkedList { " → " } else { " " };
    let mut cells = Vec::new();
    let mut captions = Vec::new();
    for (index, item) in view.items.iter().enumerate() {
        let text = format!(" {} ", item);
        let width = text.chars().count();
        captions.push(format!(
            "{:<width$}",
            caption(algorithm, index, len).unwrap_or(""),
            width = width + link.chars().count()
        ));
        cells.push(Span::styled(text, cell_style(view.mark(index))));
        cells.push(comment(link));
    }
    if algorithm == Algorithm::LinkedList {
        cells.push(comment("null"));
    }
    vec![Line::from(cells), Line::from(comment(captions.concat()))]
}

/// Render a stack, queue or linked list with per-element marks
pub fn render_cells_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    algorithm: Algorithm,
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

    let mut lines = if view.items.is_empty() {
        vec![Line::from(comment("(empty)"))]
    } else if algorithm == Algorithm::Stack {
        stack_lines(view)
    } else {
        row_lines(algorithm, view)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        comment("Size   "),
        Span::styled(
            view.items.len().to_string(),
            Style::default().fg(DEFAULT_THEME.settled),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
