//! Main TUI application state and logic

use crate::adapters::tree::BstNode;
use crate::adapters::Algorithm;
use crate::playback::{Mode, Pace, PlaybackController, Speed, Tick, TickOutcome};
use crate::projector::{Outcome, Phase, ViewState};
use crate::session::{Recording, Session};
use crate::snippets::{focus_line, snippet, Language};
use crate::trace::{Bounds, StepKind, TraceStats};
use crate::ui::panes::{self, InfoRenderData};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Controller operations that do not depend on the item type
trait Controls {
    fn play(&mut self) -> Option<Tick>;
    fn pause(&mut self);
    fn stop(&mut self);
    fn reset(&mut self);
    fn step_forward(&mut self);
    fn step_backward(&mut self);
    fn seek(&mut self, position: usize);
    fn set_speed(&mut self, speed: Speed);
    fn fire(&mut self, tick: Tick) -> TickOutcome;
    fn pending(&self) -> Option<Tick>;
    fn mode(&self) -> Mode;
    fn cursor(&self) -> usize;
    fn len(&self) -> usize;
}

impl<T> Controls for PlaybackController<T> {
    fn play(&mut self) -> Option<Tick> {
        PlaybackController::play(self)
    }
    fn pause(&mut self) {
        PlaybackController::pause(self)
    }
    fn stop(&mut self) {
        PlaybackController::stop(self)
    }
    fn reset(&mut self) {
        PlaybackController::reset(self)
    }
    fn step_forward(&mut self) {
        PlaybackController::step_forward(self)
    }
    fn step_backward(&mut self) {
        PlaybackController::step_backward(self)
    }
    fn seek(&mut self, position: usize) {
        PlaybackController::seek(self, position)
    }
    fn set_speed(&mut self, speed: Speed) {
        PlaybackController::set_speed(self, speed)
    }
    fn fire(&mut self, tick: Tick) -> TickOutcome {
        PlaybackController::fire(self, tick)
    }
    fn pending(&self) -> Option<Tick> {
        PlaybackController::pending(self)
    }
    fn mode(&self) -> Mode {
        PlaybackController::mode(self)
    }
    fn cursor(&self) -> usize {
        PlaybackController::cursor(self)
    }
    fn len(&self) -> usize {
        PlaybackController::len(self)
    }
}

/// One controller per trace item type
enum Player {
    Array(PlaybackController<f64>),
    Graph(PlaybackController<String>),
    Tree(PlaybackController<BstNode>),
    Items(PlaybackController<String>),
}

impl Player {
    /// A controller of the right item type with `recording` loaded
    fn from_recording(recording: Recording, pace: Pace, speed: Speed) -> Self {
        let mut player = match recording {
            Recording::Array(trace) => {
                let mut controller = PlaybackController::new(pace);
                controller.load(trace);
                Player::Array(controller)
            }
            Recording::Graph(trace) => {
                let mut controller = PlaybackController::new(pace);
                controller.load(trace);
                Player::Graph(controller)
            }
            Recording::Tree(trace) => {
                let mut controller = PlaybackController::new(pace);
                controller.load(trace);
                Player::Tree(controller)
            }
            Recording::Items(trace) => {
                let mut controller = PlaybackController::new(pace);
                controller.load(trace);
                Player::Items(controller)
            }
        };
        player.controls_mut().set_speed(speed);
        player
    }

    fn controls(&self) -> &dyn Controls {
        match self {
            Player::Array(c) => c,
            Player::Graph(c) => c,
            Player::Tree(c) => c,
            Player::Items(c) => c,
        }
    }

    fn controls_mut(&mut self) -> &mut dyn Controls {
        match self {
            Player::Array(c) => c,
            Player::Graph(c) => c,
            Player::Tree(c) => c,
            Player::Items(c) => c,
        }
    }
}

/// The main application state
pub struct App {
    /// Prepared input and the selected algorithm
    pub session: Session,

    /// Playback over the current trace; `None` until a trace is recorded
    player: Option<Player>,

    /// The tick the timer is waiting on and when it was armed
    armed: Option<(Tick, Instant)>,

    pub speed: Speed,
    pub language: Language,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last rejected input, shown until the next successful recording
    pub error: Option<String>,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session, speed: Speed) -> Self {
        let mut app = App {
            session,
            player: None,
            armed: None,
            speed,
            language: Language::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
            error: None,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        };
        app.rebuild();
        app
    }

    /// Record a fresh trace for the session and park at its start
    fn rebuild(&mut self) -> bool {
        self.armed = None;
        match self.session.record() {
            Ok(recording) => {
                let steps = recording.len();
                self.player = Some(Player::from_recording(
                    recording,
                    self.session.algorithm.pace(),
                    self.speed,
                ));
                self.error = None;
                self.status_message = format!("{} ready, {} steps", self.session.algorithm, steps);
                true
            }
            Err(e) => {
                self.player = None;
                self.status_message = "Input rejected".to_string();
                self.error = Some(e.to_string());
                false
            }
        }
    }

    fn mode(&self) -> Mode {
        self.player.as_ref().map_or(Mode::Idle, |p| p.controls().mode())
    }

    /// Re-arm the timer from the controller's pending tick
    fn sync_timer(&mut self) {
        let pending = self.player.as_ref().and_then(|p| p.controls().pending());
        self.armed = match (pending, self.armed) {
            (Some(tick), Some((armed, at))) if armed == tick => Some((armed, at)),
            (Some(tick), _) => Some((tick, Instant::now())),
            (None, _) => None,
        };
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Some((tick, armed_at)) = self.armed {
                if armed_at.elapsed() >= tick.delay() {
                    self.fire(tick);
                }
            }

            // Poll with a short timeout so the timer stays responsive
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn fire(&mut self, tick: Tick) {
        let Some(player) = self.player.as_mut() else {
            self.armed = None;
            return;
        };
        match player.controls_mut().fire(tick) {
            TickOutcome::Advanced => {}
            TickOutcome::Finished => {
                self.status_message = "Playback complete".to_string();
            }
            TickOutcome::Stale => trace!(serial = tick.serial(), "timer fired a stale tick"),
        }
        self.armed = None;
        self.sync_timer();
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_chunks[0]);

        // Left column: visualization (top) | step info (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let algorithm = self.session.algorithm;
        let title = format!("{} ({})", algorithm.title(), algorithm.key());
        let (cursor, total, mode) = self
            .player
            .as_ref()
            .map_or((0, 0, Mode::Idle), |p| {
                let c = p.controls();
                (c.cursor(), c.len(), c.mode())
            });

        let summary = match &self.player {
            Some(Player::Array(controller)) => controller.view().map(|view| {
                panes::render_bars_pane(frame, left_rows[0], &title, &view);
                Summary::of(&view)
            }),
            Some(Player::Graph(controller)) => controller.view().map(|view| {
                panes::render_graph_pane(frame, left_rows[0], &title, &self.session.graph, &view);
                Summary::of(&view)
            }),
            Some(Player::Tree(controller)) => controller.view().map(|view| {
                panes::render_tree_pane(frame, left_rows[0], &title, &view);
                Summary::of(&view)
            }),
            Some(Player::Items(controller)) => controller.view().map(|view| {
                panes::render_cells_pane(frame, left_rows[0], &title, algorithm, &view);
                Summary::of(&view)
            }),
            None => None,
        };
        if summary.is_none() {
            render_placeholder(frame, left_rows[0], &title);
        }
        let summary = summary.unwrap_or_default();

        let message = if summary.message.is_empty() {
            "Press space to record and play"
        } else {
            summary.message.as_str()
        };
        let target = if algorithm.needs_target() {
            self.session.target
        } else {
            None
        };
        panes::render_info_pane(
            frame,
            left_rows[1],
            &InfoRenderData {
                algorithm,
                mode,
                speed: self.speed,
                cursor,
                total,
                kind: summary.kind,
                message,
                stats: summary.stats,
                bounds: summary.bounds,
                phase: summary.phase,
                outcome: summary.outcome,
                target,
                error: self.error.as_deref(),
            },
        );

        let code = snippet(algorithm, self.language);
        let focus = summary.kind.and_then(|kind| focus_line(code, kind));
        panes::render_code_pane(frame, columns[1], code, self.language, focus);

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            cursor,
            total,
            mode,
            self.error.is_some(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle playback (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Left => self.with_controls("Stepped backward", |c| c.step_backward()),
            KeyCode::Right => self.with_controls("Stepped forward", |c| c.step_forward()),
            KeyCode::Char('s') => self.with_controls("Stopped", |c| c.stop()),
            KeyCode::Char('r') => {
                self.with_controls("Reset, press space to record again", |c| c.reset());
            }
            KeyCode::Enter => {
                self.with_controls("Jumped to end", |c| {
                    c.pause();
                    let end = c.len();
                    c.seek(end);
                });
            }
            KeyCode::Backspace => {
                self.with_controls("Jumped to start", |c| {
                    c.pause();
                    c.seek(0);
                });
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(self.speed.faster()),
            KeyCode::Char('-') | KeyCode::Char('_') => self.change_speed(self.speed.slower()),
            KeyCode::Char('l') => {
                self.language = self.language.next();
                self.status_message = format!("Showing {} code", self.language);
            }
            KeyCode::Char('n') => match self.session.regenerate() {
                Ok(()) => {
                    if self.rebuild() {
                        self.status_message = "Generated new input".to_string();
                    }
                }
                Err(e) => self.error = Some(e.to_string()),
            },
            KeyCode::Tab => self.select(self.session.algorithm.next()),
            KeyCode::BackTab => self.select(self.session.algorithm.prev()),
            _ => {}
        }
    }

    /// Apply a controller operation, then re-arm the timer
    fn with_controls(&mut self, message: &str, op: impl FnOnce(&mut dyn Controls)) {
        if let Some(player) = self.player.as_mut() {
            op(player.controls_mut());
            self.status_message = message.to_string();
        }
        self.sync_timer();
    }

    fn toggle_play(&mut self) {
        match self.mode() {
            Mode::Running => self.with_controls("Paused", |c| c.pause()),
            Mode::Idle => {
                // Reset discarded the trace; record it again before playing
                if self.rebuild() {
                    self.with_controls("Playing...", |c| {
                        c.play();
                    });
                }
            }
            Mode::Paused | Mode::Finished => {
                self.with_controls("Playing...", |c| {
                    c.play();
                });
            }
        }
        debug!(mode = %self.mode(), "toggled playback");
    }

    fn change_speed(&mut self, speed: Speed) {
        self.speed = speed;
        if let Some(player) = self.player.as_mut() {
            player.controls_mut().set_speed(speed);
        }
        self.status_message = format!("Speed {}", speed);
    }

    fn select(&mut self, algorithm: Algorithm) {
        if let Err(e) = self.session.select(algorithm) {
            self.error = Some(e.to_string());
            return;
        }
        self.rebuild();
    }
}

/// Type-independent parts of a projected view
#[derive(Default)]
struct Summary {
    kind: Option<StepKind>,
    message: String,
    stats: TraceStats,
    bounds: Option<Bounds>,
    phase: Option<Phase>,
    outcome: Option<Outcome>,
}

impl Summary {
    fn of<T>(view: &ViewState<T>) -> Self {
        Summary {
            kind: view.kind,
            message: view.message.clone(),
            stats: view.stats,
            bounds: view.bounds,
            phase: view.phase,
            outcome: view.outcome,
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
    let paragraph = Paragraph::new("No trace loaded. Press space to record one, n for new input.")
        .block(block)
        .style(Style::default().fg(DEFAULT_THEME.comment));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn app(algorithm: Algorithm) -> App {
        let config = Config {
            algorithm,
            seed: Some(3),
            size: 6,
            ..Config::default()
        };
        App::new(Session::from_config(&config).unwrap(), Speed::Normal)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code));
    }

    #[test]
    fn test_space_arms_the_timer() {
        let mut app = app(Algorithm::BubbleSort);
        assert_eq!(app.mode(), Mode::Paused);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.mode(), Mode::Running);
        assert!(app.armed.is_some());

        let (tick, _) = app.armed.unwrap();
        app.fire(tick);
        let cursor = app.player.as_ref().unwrap().controls().cursor();
        assert_eq!(cursor, 1);
        assert_ne!(app.armed.map(|(t, _)| t), Some(tick));
    }

    #[test]
    fn test_reset_then_space_records_again() {
        let mut app = app(Algorithm::QuickSort);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.mode(), Mode::Idle);
        assert!(app.armed.is_none());

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.mode(), Mode::Running);
    }

    #[test]
    fn test_tab_switches_algorithm_and_rebuilds() {
        let mut app = app(Algorithm::InsertionSort);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.algorithm, Algorithm::InsertionSort.next());
        assert_eq!(app.mode(), Mode::Paused);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_structures_play_in_their_own_pane() {
        let mut app = app(Algorithm::Queue);
        assert!(matches!(app.player, Some(Player::Items(_))));
        assert!(app.error.is_none());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::Finished);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.algorithm, Algorithm::LinkedList);
        assert!(matches!(app.player, Some(Player::Items(_))));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_speed_keys_saturate() {
        let mut app = app(Algorithm::BubbleSort);
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.speed, Speed::Double);
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.speed, Speed::Quarter);
    }
}
