//! Bar chart pane for array traces
//!
//! Each element is a column whose height is proportional to its value. The
//! column color follows the element's [`Mark`]; during a binary search the
//! elements outside the current bracket are dimmed.

use crate::projector::{Mark, ViewState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Height of every column in eighths of a row
fn scaled_heights(values: &[f64], rows: usize) -> Vec<usize> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min).min(0.0);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);
    let full = (rows * 8) as f64;
    values
        .iter()
        .map(|v| (((v - min) / span) * full).round().max(1.0) as usize)
        .collect()
}

fn in_bracket(view: &ViewState<f64>, index: usize) -> bool {
    match view.bounds {
        Some(b) if !b.is_exhausted() => (b.low..=b.high).contains(&(index as isize)),
        Some(_) => false,
        None => true,
    }
}

fn column_style(view: &ViewState<f64>, index: usize) -> Style {
    let mark = view.mark(index);
    if mark == Mark::Default && !in_bracket(view, index) {
        return Style::default().fg(DEFAULT_THEME.dimmed);
    }
    Style::default().fg(DEFAULT_THEME.mark(mark))
}

fn label(value: f64, width: usize) -> String {
    let text = if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    };
    if text.chars().count() > width {
        String::new()
    } else {
        format!("{:^width$}", text, width = width)
    }
}

/// Render the array as vertical bars
pub fn render_bars_pane(frame: &mut Frame, area: Rect, title: &str, view: &ViewState<f64>) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let n = view.items.len();
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    if n == 0 || inner_width == 0 || inner_height < 3 {
        let paragraph = Paragraph::new("(nothing to show)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Columns are separated by one blank cell when there is room
    let slot = (inner_width / n).max(1);
    let gap = usize::from(slot > 2);
    let width = slot - gap;
    let chart_rows = inner_height - 2; // value and index rows below
    let heights = scaled_heights(&view.items, chart_rows);

    let mut lines: Vec<Line> = Vec::with_capacity(inner_height);
    for row in (0..chart_rows).rev() {
        let mut spans = Vec::with_capacity(n * 2);
        for (index, height) in heights.iter().enumerate() {
            let filled = height.saturating_sub(row * 8).min(8);
            let glyph = EIGHTHS[filled].to_string().repeat(width);
            spans.push(Span::styled(glyph, column_style(view, index)));
            if gap > 0 {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    let mut values = Vec::with_capacity(n * 2);
    let mut indices = Vec::with_capacity(n * 2);
    for (index, value) in view.items.iter().enumerate() {
        let style = column_style(view, index);
        values.push(Span::styled(label(*value, width), style));
        let index_style = if view.found() == Some(index) {
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };
        indices.push(Span::styled(label(index as f64, width), index_style));
        if gap > 0 {
            values.push(Span::raw(" "));
            indices.push(Span::raw(" "));
        }
    }
    lines.push(Line::from(values));
    lines.push(Line::from(indices));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
