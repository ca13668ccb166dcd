//! Code pane rendering with syntax highlighting
//!
//! Displays the reference implementation of the selected algorithm in the
//! chosen language. The line most related to the current step is highlighted.

use crate::snippets::Language;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Keyword-level highlighting for one line of a snippet
fn highlight_line(line: &str, language: Language) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();
    let comment = language.comment();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>, is_call: bool| {
        if !word.is_empty() {
            spans.push(Span::styled(word.clone(), word_style(word, language, is_call)));
            word.clear();
        }
    };

    while i < chars.len() {
        let c = chars[i];

        let rest: String = chars[i..].iter().collect();
        if rest.starts_with(comment) {
            flush(&mut current_word, &mut spans, false);
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        if c == '"' || c == '\'' {
            flush(&mut current_word, &mut spans, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += 1;
            }
            end = (end + 1).min(chars.len());
            let literal: String = chars[i..end].iter().collect();
            spans.push(Span::styled(literal, Style::default().fg(DEFAULT_THEME.string)));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' {
            flush(&mut current_word, &mut spans, c == '(');
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }
    flush(&mut current_word, &mut spans, false);

    Line::from(spans)
}

fn word_style(word: &str, language: Language, is_call: bool) -> Style {
    if language.keywords().contains(&word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else if is_call {
        Style::default().fg(DEFAULT_THEME.function)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the code pane; `focus` is a 1-based line number
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    code: &str,
    language: Language,
    focus: Option<usize>,
) {
    let block = Block::default()
        .title(format!(" Code ({}) ", language))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines: Vec<&str> = code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the focused line inside the window
    let offset = match focus {
        Some(line) if line > visible_height => {
            (line - visible_height / 2).min(lines.len().saturating_sub(visible_height))
        }
        _ => 0,
    };

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = focus == Some(line_num);
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line, language);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{:3} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
