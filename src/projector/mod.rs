//! Projection of a trace position into renderable state
//!
//! [`project`] is a pure function of `(trace, cursor)`. The cursor counts
//! applied steps, so the step being shown at cursor `c > 0` is `trace[c - 1]`.
//! Nothing is cached between calls; stepping backwards is just projecting a
//! smaller cursor.

use crate::trace::{Aux, Bounds, Span, Step, StepKind, Trace, TraceStats};

/// Highlight class of one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Mark {
    #[default]
    Default,
    Settled,
    Special,
    Comparing,
    Mutating,
}

/// Merge sort phase shown by the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Divide { left: Span, right: Span, depth: usize },
    Merge { left: Span, right: Span },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found(usize),
    NotFound,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub items: Vec<T>,
    pub marks: Vec<Mark>,
    /// Visited indices in visit order
    pub visited: Vec<usize>,
    pub active: Option<usize>,
    pub bounds: Option<Bounds>,
    pub pivot: Option<usize>,
    pub key: Option<usize>,
    pub phase: Option<Phase>,
    pub outcome: Option<Outcome>,
    pub kind: Option<StepKind>,
    pub message: String,
    pub cursor: usize,
    pub total: usize,
    /// Counters over the applied steps only
    pub stats: TraceStats,
}

impl<T> ViewState<T> {
    pub fn found(&self) -> Option<usize> {
        match self.outcome {
            Some(Outcome::Found(index)) => Some(index),
            _ => None,
        }
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor == self.total
    }

    pub fn mark(&self, index: usize) -> Mark {
        self.marks.get(index).copied().unwrap_or_default()
    }
}

fn raise(marks: &mut [Mark], index: usize, mark: Mark) {
    if let Some(slot) = marks.get_mut(index) {
        *slot = (*slot).max(mark);
    }
}

/// Highlight class for the indices of the current step
fn current_mark<T>(step: &Step<T>) -> Option<Mark> {
    match step.kind {
        StepKind::Start | StepKind::Complete => None,
        StepKind::Compare => Some(Mark::Comparing),
        kind if kind.is_mutation() => Some(Mark::Mutating),
        _ => Some(Mark::Special),
    }
}

pub fn project<T: Clone>(trace: &Trace<T>, cursor: usize) -> ViewState<T> {
    let total = trace.len();
    let cursor = cursor.min(total);
    let applied = &trace.steps()[..cursor];
    let current = applied.last();

    let items = applied
        .iter()
        .rev()
        .find_map(|step| step.snapshot.clone())
        .or_else(|| trace.get(0).and_then(|start| start.snapshot.clone()))
        .unwrap_or_default();

    let mut marks = vec![Mark::Default; items.len()];
    let mut visited = Vec::new();
    let mut bounds = None;
    let mut pivot = None;
    let mut outcome = None;

    for step in applied {
        if step.settles() {
            for &index in &step.indices {
                raise(&mut marks, index, Mark::Settled);
            }
        }
        if step.kind == StepKind::Visit {
            visited.extend(step.indices.iter().copied());
        }
        match step.aux {
            Aux::Bounds(b) => bounds = Some(b),
            Aux::Pivot { index } => pivot = Some(index),
            Aux::Partition { .. } => pivot = None,
            Aux::Outcome { found } => {
                outcome = Some(found.map_or(Outcome::NotFound, Outcome::Found));
            }
            _ => {}
        }
        match step.kind {
            StepKind::Found => outcome = step.indices.first().map(|&i| Outcome::Found(i)),
            StepKind::NotFound => outcome = Some(Outcome::NotFound),
            _ => {}
        }
    }
    for &index in &visited {
        raise(&mut marks, index, Mark::Settled);
    }

    let mut active = None;
    let mut key = None;
    let mut phase = None;
    if let Some(step) = current {
        if let Some(mark) = current_mark(step) {
            for &index in &step.indices {
                raise(&mut marks, index, mark);
            }
        }
        if let Some(index) = pivot {
            raise(&mut marks, index, Mark::Special);
        }
        if step.kind == StepKind::Visit {
            active = step.indices.first().copied();
        }
        match step.aux {
            Aux::Key { index } => {
                key = Some(index);
                raise(&mut marks, index, Mark::Special);
            }
            Aux::Divide { left, right, depth } => phase = Some(Phase::Divide { left, right, depth }),
            Aux::Merge { left, right } => phase = Some(Phase::Merge { left, right }),
            _ => {}
        }
    }

    let message = current
        .or_else(|| trace.get(0))
        .map(|step| step.message.clone())
        .unwrap_or_default();

    ViewState {
        items,
        marks,
        visited,
        active,
        bounds,
        pivot,
        key,
        phase,
        outcome,
        kind: current.map(|step| step.kind),
        message,
        cursor,
        total,
        stats: TraceStats::from_steps(applied),
    }
}
