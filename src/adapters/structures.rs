//! Stack, queue and linked list operation adapters
//!
//! Each operation validates first and only then mutates the caller's items,
//! so a rejected request leaves the structure untouched. The recorded trace
//! ends with a snapshot of the structure after the operation.
//!
//! [`script`] replays a whole sequence of operations as one trace, which is
//! how the visualizer plays these structures back.

use super::errors::InputError;
use crate::playback::Pace;
use crate::trace::{Aux, SnapshotPolicy, StepKind, Trace, TraceRecorder};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Structure operations animate faster than algorithms
pub const PACE: Pace = Pace::from_millis(500, 100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOp {
    Push(String),
    Pop,
    Peek,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueOp {
    Enqueue(String),
    Dequeue,
    Peek,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp {
    InsertHead(String),
    InsertTail(String),
    InsertAt(usize, String),
    DeleteHead,
    DeleteTail,
    DeleteAt(usize),
    Search(String),
}

type Recorder = TraceRecorder<String>;

/// One operation on a linear structure
pub trait Operation: FromStr<Err = InputError> + fmt::Display {
    /// Name used in messages and errors, e.g. `"stack"`
    const STRUCTURE: &'static str;

    /// Validate against `items`, then mutate them while recording steps
    fn apply(&self, rec: &mut TraceRecorder<String>, items: &mut Vec<String>)
        -> Result<(), InputError>;
}

fn clean(value: &str) -> Result<String, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::BlankValue);
    }
    Ok(value.to_string())
}

fn non_empty(items: &[String], structure: &'static str) -> Result<(), InputError> {
    if items.is_empty() {
        return Err(InputError::EmptyStructure { structure });
    }
    Ok(())
}

fn end(mut rec: Recorder, items: &[String], structure: &str) -> Trace<String> {
    rec.complete(
        [],
        items,
        Aux::None,
        format!("The {} now holds {} item(s)", structure, items.len()),
    );
    let trace = rec.finalize();
    debug!(structure, len = items.len(), steps = trace.len(), "recorded structure trace");
    trace
}

fn insert(rec: &mut Recorder, items: &mut Vec<String>, index: usize, value: String) {
    let message = format!("Inserted {} at position {}", value, index);
    items.insert(index, value);
    rec.record(
        StepKind::InsertAt,
        [index],
        SnapshotPolicy::Capture(items),
        Aux::None,
        message,
    );
}

fn remove(rec: &mut Recorder, items: &mut Vec<String>, index: usize) {
    let value = items.remove(index);
    rec.record(
        StepKind::Remove,
        [index],
        SnapshotPolicy::Capture(items),
        Aux::None,
        format!("Removed {} from position {}", value, index),
    );
}

fn clear(rec: &mut Recorder, items: &mut Vec<String>, structure: &str) {
    let all: Vec<usize> = (0..items.len()).collect();
    items.clear();
    rec.record(
        StepKind::Remove,
        all,
        SnapshotPolicy::Capture(items),
        Aux::None,
        format!("Cleared every element from the {}", structure),
    );
}

fn highlight(rec: &mut Recorder, items: &[String], index: usize, what: &str) {
    rec.record(
        StepKind::Visit,
        [index],
        SnapshotPolicy::Omit,
        Aux::None,
        format!("{}: {}", what, items[index]),
    );
}

fn peek(rec: &mut Recorder, items: &[String], index: usize, what: &str) {
    rec.record(
        StepKind::Found,
        [index],
        SnapshotPolicy::Omit,
        Aux::Outcome { found: Some(index) },
        format!("{}: {}", what, items[index]),
    );
}

/// Walk from the head to `index`, one visit per node
fn walk_to(rec: &mut Recorder, items: &[String], index: usize) {
    for (position, item) in items.iter().enumerate().take(index) {
        rec.record(
            StepKind::Visit,
            [position],
            SnapshotPolicy::Omit,
            Aux::Order { position },
            format!("Following the link past {}", item),
        );
    }
}

/// Split `name:arg:arg` operation text
fn tokens(text: &str) -> (String, Vec<&str>) {
    let mut parts = text.trim().split(':');
    let name = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    (name, parts.map(str::trim).collect())
}

fn unknown(text: &str, structure: &'static str) -> InputError {
    InputError::UnknownOperation {
        text: text.trim().to_string(),
        structure,
    }
}

fn position(text: &str) -> Result<usize, InputError> {
    text.parse().map_err(|_| InputError::Malformed {
        token: text.to_string(),
    })
}

impl FromStr for StackOp {
    type Err = InputError;

    /// `push:<value>`, `pop`, `peek` or `clear`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match tokens(s) {
            (name, args) if name == "push" && args.len() == 1 => Ok(StackOp::Push(clean(args[0])?)),
            (name, args) if name == "pop" && args.is_empty() => Ok(StackOp::Pop),
            (name, args) if name == "peek" && args.is_empty() => Ok(StackOp::Peek),
            (name, args) if name == "clear" && args.is_empty() => Ok(StackOp::Clear),
            _ => Err(unknown(s, Self::STRUCTURE)),
        }
    }
}

impl fmt::Display for StackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackOp::Push(value) => write!(f, "push {}", value),
            StackOp::Pop => f.write_str("pop"),
            StackOp::Peek => f.write_str("peek"),
            StackOp::Clear => f.write_str("clear"),
        }
    }
}

impl Operation for StackOp {
    const STRUCTURE: &'static str = "stack";

    fn apply(&self, rec: &mut Recorder, items: &mut Vec<String>) -> Result<(), InputError> {
        match self {
            StackOp::Push(value) => {
                let value = clean(value)?;
                let top = items.len();
                insert(rec, items, top, value);
            }
            StackOp::Pop => {
                non_empty(items, Self::STRUCTURE)?;
                let top = items.len() - 1;
                highlight(rec, items, top, "Top element");
                remove(rec, items, top);
            }
            StackOp::Peek => {
                non_empty(items, Self::STRUCTURE)?;
                peek(rec, items, items.len() - 1, "Top element");
            }
            StackOp::Clear => {
                non_empty(items, Self::STRUCTURE)?;
                clear(rec, items, Self::STRUCTURE);
            }
        }
        Ok(())
    }
}

impl FromStr for QueueOp {
    type Err = InputError;

    /// `enqueue:<value>`, `dequeue`, `peek` or `clear`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match tokens(s) {
            (name, args) if name == "enqueue" && args.len() == 1 => {
                Ok(QueueOp::Enqueue(clean(args[0])?))
            }
            (name, args) if name == "dequeue" && args.is_empty() => Ok(QueueOp::Dequeue),
            (name, args) if name == "peek" && args.is_empty() => Ok(QueueOp::Peek),
            (name, args) if name == "clear" && args.is_empty() => Ok(QueueOp::Clear),
            _ => Err(unknown(s, Self::STRUCTURE)),
        }
    }
}

impl fmt::Display for QueueOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueOp::Enqueue(value) => write!(f, "enqueue {}", value),
            QueueOp::Dequeue => f.write_str("dequeue"),
            QueueOp::Peek => f.write_str("peek"),
            QueueOp::Clear => f.write_str("clear"),
        }
    }
}

impl Operation for QueueOp {
    const STRUCTURE: &'static str = "queue";

    fn apply(&self, rec: &mut Recorder, items: &mut Vec<String>) -> Result<(), InputError> {
        match self {
            QueueOp::Enqueue(value) => {
                let value = clean(value)?;
                let rear = items.len();
                insert(rec, items, rear, value);
            }
            QueueOp::Dequeue => {
                non_empty(items, Self::STRUCTURE)?;
                highlight(rec, items, 0, "Front element");
                remove(rec, items, 0);
            }
            QueueOp::Peek => {
                non_empty(items, Self::STRUCTURE)?;
                peek(rec, items, 0, "Front element");
            }
            QueueOp::Clear => {
                non_empty(items, Self::STRUCTURE)?;
                clear(rec, items, Self::STRUCTURE);
            }
        }
        Ok(())
    }
}

impl FromStr for ListOp {
    type Err = InputError;

    /// `insert-head:<v>`, `insert-tail:<v>`, `insert-at:<i>:<v>`,
    /// `delete-head`, `delete-tail`, `delete-at:<i>` or `search:<v>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = tokens(s);
        match (name.as_str(), args.as_slice()) {
            ("insert-head", [value]) => Ok(ListOp::InsertHead(clean(value)?)),
            ("insert-tail", [value]) => Ok(ListOp::InsertTail(clean(value)?)),
            ("insert-at", [index, value]) => Ok(ListOp::InsertAt(position(index)?, clean(value)?)),
            ("delete-head", []) => Ok(ListOp::DeleteHead),
            ("delete-tail", []) => Ok(ListOp::DeleteTail),
            ("delete-at", [index]) => Ok(ListOp::DeleteAt(position(index)?)),
            ("search", [value]) => Ok(ListOp::Search(clean(value)?)),
            _ => Err(unknown(s, Self::STRUCTURE)),
        }
    }
}

impl fmt::Display for ListOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOp::InsertHead(value) => write!(f, "insert {} at the head", value),
            ListOp::InsertTail(value) => write!(f, "insert {} at the tail", value),
            ListOp::InsertAt(index, value) => write!(f, "insert {} at index {}", value, index),
            ListOp::DeleteHead => f.write_str("delete the head"),
            ListOp::DeleteTail => f.write_str("delete the tail"),
            ListOp::DeleteAt(index) => write!(f, "delete index {}", index),
            ListOp::Search(value) => write!(f, "search for {}", value),
        }
    }
}

impl Operation for ListOp {
    const STRUCTURE: &'static str = "list";

    fn apply(&self, rec: &mut Recorder, items: &mut Vec<String>) -> Result<(), InputError> {
        match self {
            ListOp::InsertHead(value) => {
                let value = clean(value)?;
                insert(rec, items, 0, value);
            }
            ListOp::InsertTail(value) => {
                let value = clean(value)?;
                let tail = items.len();
                walk_to(rec, items, tail);
                insert(rec, items, tail, value);
            }
            ListOp::InsertAt(index, value) => {
                let value = clean(value)?;
                let index = *index;
                if index > items.len() {
                    return Err(InputError::IndexOutOfRange {
                        index,
                        max: items.len(),
                    });
                }
                walk_to(rec, items, index);
                insert(rec, items, index, value);
            }
            ListOp::DeleteHead => {
                non_empty(items, Self::STRUCTURE)?;
                highlight(rec, items, 0, "Head");
                remove(rec, items, 0);
            }
            ListOp::DeleteTail => {
                non_empty(items, Self::STRUCTURE)?;
                let tail = items.len() - 1;
                walk_to(rec, items, tail);
                highlight(rec, items, tail, "Tail");
                remove(rec, items, tail);
            }
            ListOp::DeleteAt(index) => {
                non_empty(items, Self::STRUCTURE)?;
                let index = *index;
                if index >= items.len() {
                    return Err(InputError::IndexOutOfRange {
                        index,
                        max: items.len() - 1,
                    });
                }
                walk_to(rec, items, index);
                highlight(rec, items, index, "Target");
                remove(rec, items, index);
            }
            ListOp::Search(value) => {
                let value = clean(value)?;
                non_empty(items, Self::STRUCTURE)?;
                let mut found = None;
                for (i, item) in items.iter().enumerate() {
                    rec.record(
                        StepKind::Compare,
                        [i],
                        SnapshotPolicy::Omit,
                        Aux::None,
                        format!("Checking {}", item),
                    );
                    if *item == value {
                        found = Some(i);
                        break;
                    }
                }
                match found {
                    Some(i) => peek(rec, items, i, "Found"),
                    None => rec.record(
                        StepKind::NotFound,
                        [],
                        SnapshotPolicy::Omit,
                        Aux::Outcome { found: None },
                        format!("{} is not in the list", value),
                    ),
                }
            }
        }
        Ok(())
    }
}

/// Apply one operation to `items`, leaving them untouched on error
pub fn apply<O: Operation>(items: &mut Vec<String>, op: &O) -> Result<Trace<String>, InputError> {
    let mut working = items.clone();
    let mut rec = Recorder::new();
    rec.start(items, Aux::None, format!("The {}: {}", O::STRUCTURE, op));
    op.apply(&mut rec, &mut working)?;
    *items = working;
    Ok(end(rec, items, O::STRUCTURE))
}

/// Replay `ops` over a copy of `initial` as a single trace.
///
/// A rejected operation rejects the whole script; no partial trace is
/// returned.
pub fn script<O: Operation>(initial: &[String], ops: &[O]) -> Result<Trace<String>, InputError> {
    let mut items = initial.to_vec();
    let mut rec = Recorder::new();
    rec.start(
        &items,
        Aux::None,
        format!(
            "A {} with {} item(s), {} operation(s) to run",
            O::STRUCTURE,
            items.len(),
            ops.len()
        ),
    );
    for (position, op) in ops.iter().enumerate() {
        rec.record(
            StepKind::Custom("operation"),
            [],
            SnapshotPolicy::Omit,
            Aux::Order { position },
            format!("Operation {}: {}", position + 1, op),
        );
        op.apply(&mut rec, &mut items)?;
    }
    Ok(end(rec, &items, O::STRUCTURE))
}

/// Parse a list of operation texts for one structure
pub fn parse_ops<O: Operation, S: AsRef<str>>(texts: &[S]) -> Result<Vec<O>, InputError> {
    texts.iter().map(|text| text.as_ref().parse()).collect()
}

/// Stack operations; the top of the stack is the last element
pub fn stack(items: &mut Vec<String>, op: StackOp) -> Result<Trace<String>, InputError> {
    apply(items, &op)
}

/// Queue operations; the front of the queue is the first element
pub fn queue(items: &mut Vec<String>, op: QueueOp) -> Result<Trace<String>, InputError> {
    apply(items, &op)
}

/// Singly linked list operations; reaching position `i` costs `i` link hops
pub fn linked_list(items: &mut Vec<String>, op: ListOp) -> Result<Trace<String>, InputError> {
    apply(items, &op)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack_items = items(&["a", "b"]);
        let trace = stack(&mut stack_items, StackOp::Push(" c ".to_string())).unwrap();
        assert_eq!(stack_items, items(&["a", "b", "c"]));
        assert_eq!(trace.final_snapshot(), Some(&stack_items[..]));

        let trace = stack(&mut stack_items, StackOp::Pop).unwrap();
        assert_eq!(stack_items, items(&["a", "b"]));
        let removal = trace.iter().find(|s| s.kind == StepKind::Remove).unwrap();
        assert_eq!(removal.indices, vec![2]);
    }

    #[test]
    fn test_stack_peek_does_not_mutate() {
        let mut stack_items = items(&["x", "y"]);
        let trace = stack(&mut stack_items, StackOp::Peek).unwrap();
        assert_eq!(trace.stats().mutations, 0);
        assert_eq!(stack_items.len(), 2);
        assert!(trace.iter().any(|s| s.aux == Aux::Outcome { found: Some(1) }));
    }

    #[test]
    fn test_empty_structures_are_rejected() {
        let mut empty = Vec::new();
        assert_eq!(
            stack(&mut empty, StackOp::Pop),
            Err(InputError::EmptyStructure { structure: "stack" })
        );
        assert_eq!(
            queue(&mut empty, QueueOp::Peek),
            Err(InputError::EmptyStructure { structure: "queue" })
        );
        assert_eq!(
            linked_list(&mut empty, ListOp::DeleteTail),
            Err(InputError::EmptyStructure { structure: "list" })
        );
        assert_eq!(
            stack(&mut empty, StackOp::Push("   ".to_string())),
            Err(InputError::BlankValue)
        );
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue_items = Vec::new();
        for value in ["1", "2", "3"] {
            queue(&mut queue_items, QueueOp::Enqueue(value.to_string())).unwrap();
        }
        queue(&mut queue_items, QueueOp::Dequeue).unwrap();
        assert_eq!(queue_items, items(&["2", "3"]));
        queue(&mut queue_items, QueueOp::Clear).unwrap();
        assert!(queue_items.is_empty());
    }

    #[test]
    fn test_linked_list_insert_walks_links() {
        let mut list = items(&["a", "b", "c"]);
        let trace = linked_list(&mut list, ListOp::InsertAt(2, "z".to_string())).unwrap();
        assert_eq!(list, items(&["a", "b", "z", "c"]));
        let hops = trace.iter().filter(|s| s.kind == StepKind::Visit).count();
        assert_eq!(hops, 2);
    }

    #[test]
    fn test_linked_list_index_bounds() {
        let mut list = items(&["a"]);
        assert_eq!(
            linked_list(&mut list, ListOp::InsertAt(3, "q".to_string())),
            Err(InputError::IndexOutOfRange { index: 3, max: 1 })
        );
        assert_eq!(
            linked_list(&mut list, ListOp::DeleteAt(1)),
            Err(InputError::IndexOutOfRange { index: 1, max: 0 })
        );
        assert_eq!(list, items(&["a"]));
    }

    #[test]
    fn test_linked_list_delete_and_search() {
        let mut list = items(&["a", "b", "c"]);
        linked_list(&mut list, ListOp::DeleteHead).unwrap();
        linked_list(&mut list, ListOp::InsertHead("n".to_string())).unwrap();
        linked_list(&mut list, ListOp::InsertTail("t".to_string())).unwrap();
        assert_eq!(list, items(&["n", "b", "c", "t"]));

        let hit = linked_list(&mut list, ListOp::Search("c".to_string())).unwrap();
        assert_eq!(hit.stats().comparisons, 3);
        let miss = linked_list(&mut list, ListOp::Search("q".to_string())).unwrap();
        assert_eq!(miss.steps()[miss.len() - 2].kind, StepKind::NotFound);
    }

    #[test]
    fn test_operation_text() {
        assert_eq!("push:7".parse::<StackOp>(), Ok(StackOp::Push("7".to_string())));
        assert_eq!(" Pop ".parse::<StackOp>(), Ok(StackOp::Pop));
        assert_eq!("dequeue".parse::<QueueOp>(), Ok(QueueOp::Dequeue));
        assert_eq!(
            "insert-at:2:x".parse::<ListOp>(),
            Ok(ListOp::InsertAt(2, "x".to_string()))
        );
        assert_eq!("delete-at:0".parse::<ListOp>(), Ok(ListOp::DeleteAt(0)));
        assert_eq!(
            "enqueue".parse::<QueueOp>(),
            Err(InputError::UnknownOperation {
                text: "enqueue".to_string(),
                structure: "queue"
            })
        );
        assert_eq!(
            "push:1".parse::<ListOp>(),
            Err(InputError::UnknownOperation {
                text: "push:1".to_string(),
                structure: "list"
            })
        );
        assert_eq!(
            "delete-at:x".parse::<ListOp>(),
            Err(InputError::Malformed {
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn test_script_replays_in_one_trace() {
        let ops: Vec<StackOp> = parse_ops(&["push:1", "push:2", "pop", "peek"]).unwrap();
        let trace = script(&[], &ops).unwrap();
        assert_eq!(trace.get(0).unwrap().kind, StepKind::Start);
        assert_eq!(trace.steps().last().unwrap().kind, StepKind::Complete);
        assert_eq!(trace.final_snapshot(), Some(&items(&["1"])[..]));
        let markers = trace
            .iter()
            .filter(|s| s.kind == StepKind::Custom("operation"))
            .count();
        assert_eq!(markers, 4);
        assert_eq!(trace.stats().mutations, 3);
    }

    #[test]
    fn test_script_rejects_on_first_bad_operation() {
        let ops: Vec<QueueOp> = parse_ops(&["enqueue:a", "dequeue", "dequeue"]).unwrap();
        assert_eq!(
            script(&[], &ops),
            Err(InputError::EmptyStructure { structure: "queue" })
        );
    }

    #[test]
    fn test_structure_pace() {
        assert_eq!(PACE, Pace::from_millis(500, 100));
    }
}
