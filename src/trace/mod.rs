// Step recording for replayable algorithm traces

use std::fmt;

/// What a recorded step did to the working collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Start,
    Compare,
    Swap,
    Overwrite,
    RangeMark,
    Visit,
    InsertAt,
    Remove,
    Found,
    NotFound,
    Complete,
    Custom(&'static str),
}

impl StepKind {
    /// Whether this kind changes the working collection
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            StepKind::Swap | StepKind::Overwrite | StepKind::InsertAt | StepKind::Remove
        )
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Start => "start",
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Overwrite => "overwrite",
            StepKind::RangeMark => "mark",
            StepKind::Visit => "visit",
            StepKind::InsertAt => "insert",
            StepKind::Remove => "remove",
            StepKind::Found => "found",
            StepKind::NotFound => "not found",
            StepKind::Complete => "complete",
            StepKind::Custom(label) => label,
        };
        f.write_str(label)
    }
}

/// Binary search bracket; `high` goes negative once the bracket is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub low: isize,
    pub high: isize,
    pub mid: Option<usize>,
}

impl Bounds {
    pub fn is_exhausted(&self) -> bool {
        self.low > self.high
    }
}

/// Inclusive index range `[start, end]`
pub type Span = (usize, usize);

/// Kind-specific payload carried by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aux {
    #[default]
    None,
    Bounds(Bounds),
    Pivot {
        index: usize,
    },
    Partition {
        partition_index: usize,
    },
    /// Recorded when a range is split; replayed by the matching merge
    Divide {
        left: Span,
        right: Span,
        depth: usize,
    },
    Merge {
        left: Span,
        right: Span,
    },
    /// Marks the step's indices as being in their final position
    Settled,
    /// Running key/minimum of a selection or insertion pass
    Key {
        index: usize,
    },
    /// Position of the visited node within the traversal
    Order {
        position: usize,
    },
    Outcome {
        found: Option<usize>,
    },
}

/// One recorded, replayable unit of algorithm execution
#[derive(Debug, Clone, PartialEq)]
pub struct Step<T> {
    pub kind: StepKind,
    pub indices: Vec<usize>,
    /// The working collection after this step was applied
    pub snapshot: Option<Vec<T>>,
    pub aux: Aux,
    pub message: String,
}

impl<T> Step<T> {
    pub fn is_comparison(&self) -> bool {
        self.kind == StepKind::Compare
    }

    pub fn is_mutation(&self) -> bool {
        self.kind.is_mutation()
    }

    /// Whether this step adds its indices to the settled set
    pub fn settles(&self) -> bool {
        matches!(self.aux, Aux::Settled | Aux::Partition { .. })
    }
}

/// Whether a recorded step carries a copy of the working collection
#[derive(Debug, Clone, Copy)]
pub enum SnapshotPolicy<'a, T> {
    Capture(&'a [T]),
    Omit,
}

/// Summary counters derived from a trace by filtering on step kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceStats {
    pub comparisons: usize,
    pub mutations: usize,
    pub total: usize,
}

impl TraceStats {
    pub fn from_steps<T>(steps: &[Step<T>]) -> Self {
        TraceStats {
            comparisons: steps.iter().filter(|s| s.is_comparison()).count(),
            mutations: steps.iter().filter(|s| s.is_mutation()).count(),
            total: steps.len(),
        }
    }
}

/// The complete, immutable step sequence of one algorithm run
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<T> {
    steps: Vec<Step<T>>,
}

impl<T> Trace<T> {
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step<T>> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }

    /// The collection as it stands after the last snapshotting step
    pub fn final_snapshot(&self) -> Option<&[T]> {
        self.steps
            .iter()
            .rev()
            .find_map(|step| step.snapshot.as_deref())
    }

    pub fn stats(&self) -> TraceStats {
        TraceStats::from_steps(&self.steps)
    }
}

impl<'a, T> IntoIterator for &'a Trace<T> {
    type Item = &'a Step<T>;
    type IntoIter = std::slice::Iter<'a, Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps while an algorithm runs
#[derive(Debug)]
pub struct TraceRecorder<T> {
    steps: Vec<Step<T>>,
}

impl<T: Clone> TraceRecorder<T> {
    pub fn new() -> Self {
        TraceRecorder { steps: Vec::new() }
    }

    /// Append one step to the buffer
    pub fn record<I>(
        &mut self,
        kind: StepKind,
        indices: I,
        snapshot: SnapshotPolicy<'_, T>,
        aux: Aux,
        message: impl Into<String>,
    ) where
        I: IntoIterator<Item = usize>,
    {
        let snapshot = match snapshot {
            SnapshotPolicy::Capture(items) => Some(items.to_vec()),
            SnapshotPolicy::Omit => None,
        };
        self.steps.push(Step {
            kind,
            indices: indices.into_iter().collect(),
            snapshot,
            aux,
            message: message.into(),
        });
    }

    /// Record the opening step; it always carries the initial collection
    pub fn start(&mut self, working: &[T], aux: Aux, message: impl Into<String>) {
        debug_assert!(self.steps.is_empty(), "start must be the first step");
        self.record(
            StepKind::Start,
            [],
            SnapshotPolicy::Capture(working),
            aux,
            message,
        );
    }

    /// Record the closing step; it always carries the final collection
    pub fn complete<I>(&mut self, indices: I, working: &[T], aux: Aux, message: impl Into<String>)
    where
        I: IntoIterator<Item = usize>,
    {
        self.record(
            StepKind::Complete,
            indices,
            SnapshotPolicy::Capture(working),
            aux,
            message,
        );
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finalize(self) -> Trace<T> {
        debug_assert!(
            self.steps.first().map(|s| s.kind) == Some(StepKind::Start),
            "trace must open with a start step"
        );
        debug_assert!(
            self.steps.last().map(|s| s.kind) == Some(StepKind::Complete),
            "trace must close with a complete step"
        );
        Trace { steps: self.steps }
    }
}

impl<T: Clone> Default for TraceRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace<i32> {
        let mut working = vec![2, 1];
        let mut rec = TraceRecorder::new();
        rec.start(&working, Aux::None, "start");
        rec.record(StepKind::Compare, [0, 1], SnapshotPolicy::Omit, Aux::None, "cmp");
        working.swap(0, 1);
        rec.record(
            StepKind::Swap,
            [0, 1],
            SnapshotPolicy::Capture(&working),
            Aux::None,
            "swap",
        );
        rec.complete(0..2, &working, Aux::Settled, "done");
        rec.finalize()
    }

    #[test]
    fn test_snapshot_policy_controls_copy() {
        let trace = sample();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.get(0).unwrap().snapshot.as_deref(), Some(&[2, 1][..]));
        assert!(trace.get(1).unwrap().snapshot.is_none());
        assert_eq!(trace.get(2).unwrap().snapshot.as_deref(), Some(&[1, 2][..]));
    }

    #[test]
    fn test_recorded_snapshot_is_independent_of_buffer() {
        let mut working = vec![1, 2, 3];
        let mut rec = TraceRecorder::new();
        rec.start(&working, Aux::None, "start");
        working[0] = 99;
        rec.complete([], &working, Aux::None, "done");
        let trace = rec.finalize();
        assert_eq!(trace.get(0).unwrap().snapshot.as_deref(), Some(&[1, 2, 3][..]));
        assert_eq!(trace.final_snapshot(), Some(&[99, 2, 3][..]));
    }

    #[test]
    fn test_stats_count_by_kind() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            TraceStats {
                comparisons: 1,
                mutations: 1,
                total: 4
            }
        );
    }

    #[test]
    fn test_settling_steps() {
        let trace = sample();
        assert!(trace.get(3).unwrap().settles());
        assert!(!trace.get(2).unwrap().settles());
        let partition: Step<i32> = Step {
            kind: StepKind::RangeMark,
            indices: vec![4],
            snapshot: None,
            aux: Aux::Partition { partition_index: 4 },
            message: String::new(),
        };
        assert!(partition.settles());
    }

    #[test]
    fn test_step_kind_display() {
        assert_eq!(StepKind::NotFound.to_string(), "not found");
        assert_eq!(StepKind::Custom("base case").to_string(), "base case");
    }
}
