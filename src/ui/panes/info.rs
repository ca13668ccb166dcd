//! Step information pane
//!
//! Renders the algorithm description, the current step message and the
//! counters derived from the applied prefix of the trace.

use crate::adapters::Algorithm;
use crate::playback::{Mode, Speed};
use crate::projector::{Outcome, Phase};
use crate::trace::{Bounds, StepKind, TraceStats};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Everything the info pane shows, independent of the trace item type
pub struct InfoRenderData<'a> {
    pub algorithm: Algorithm,
    pub mode: Mode,
    pub speed: Speed,
    pub cursor: usize,
    pub total: usize,
    pub kind: Option<StepKind>,
    pub message: &'a str,
    pub stats: TraceStats,
    pub bounds: Option<Bounds>,
    pub phase: Option<Phase>,
    pub outcome: Option<Outcome>,
    pub target: Option<f64>,
    pub error: Option<&'a str>,
}

fn field<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", name), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

fn span_text((start, end): (usize, usize)) -> String {
    format!("[{}..={}]", start, end)
}

pub fn render_info_pane(frame: &mut Frame, area: Rect, data: &InfoRenderData) {
    let block = Block::default()
        .title(format!(" {} ", data.algorithm.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let mut lines = vec![
        Line::from(Span::styled(
            data.algorithm.description(),
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    if let Some(error) = data.error {
        lines.push(Line::from(Span::styled(
            format!("Input rejected: {}", error),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    let kind = data.kind.map_or_else(|| "ready".to_string(), |k| k.to_string());
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", kind.to_uppercase()),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(ratatui::style::Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(data.message.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ]));
    lines.push(Line::from(""));

    lines.push(field("Step", format!("{} / {}", data.cursor, data.total)));
    lines.push(field("State", format!("{} at {}", data.mode, data.speed)));
    lines.push(field(
        "Counters",
        format!(
            "{} comparisons, {} writes",
            data.stats.comparisons, data.stats.mutations
        ),
    ));
    if let Some(target) = data.target {
        lines.push(field("Target", target.to_string()));
    }
    if let Some(b) = data.bounds {
        let mid = b.mid.map_or_else(|| "-".to_string(), |m| m.to_string());
        lines.push(field(
            "Range",
            format!("low {}, high {}, mid {}", b.low, b.high, mid),
        ));
    }
    match data.phase {
        Some(Phase::Divide { left, right, depth }) => lines.push(field(
            "Divide",
            format!("{} | {} at depth {}", span_text(left), span_text(right), depth),
        )),
        Some(Phase::Merge { left, right }) => lines.push(field(
            "Merge",
            format!("{} + {}", span_text(left), span_text(right)),
        )),
        None => {}
    }
    match data.outcome {
        Some(Outcome::Found(index)) => lines.push(Line::from(Span::styled(
            format!("Found at index {}", index),
            Style::default().fg(DEFAULT_THEME.success),
        ))),
        Some(Outcome::NotFound) => lines.push(Line::from(Span::styled(
            "Not found",
            Style::default().fg(DEFAULT_THEME.error),
        ))),
        None => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
