//! Comparison sort adapters
//!
//! Every comparison and every mutation is its own step. Mutating steps carry a
//! snapshot of the array after the change, so any prefix of the trace can be
//! replayed without re-running the sort.

use super::errors::InputError;
use super::validate_values;
use crate::trace::{Aux, SnapshotPolicy, StepKind, Trace, TraceRecorder};
use tracing::debug;

type Recorder = TraceRecorder<f64>;

fn finish(name: &str, rec: Recorder) -> Trace<f64> {
    let trace = rec.finalize();
    debug!(algorithm = name, steps = trace.len(), "recorded sort trace");
    trace
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn bubble_sort(values: &[f64]) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();
    rec.start(&arr, Aux::None, "Starting bubble sort");

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            rec.record(
                StepKind::Compare,
                [j, j + 1],
                SnapshotPolicy::Omit,
                Aux::None,
                format!("Pass {}: comparing {} and {}", pass + 1, arr[j], arr[j + 1]),
            );
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                swapped = true;
                rec.record(
                    StepKind::Swap,
                    [j, j + 1],
                    SnapshotPolicy::Capture(&arr),
                    Aux::None,
                    format!("Swapped {} and {}", arr[j + 1], arr[j]),
                );
            }
        }

        let settled = n - pass - 1;
        rec.record(
            StepKind::RangeMark,
            [settled],
            SnapshotPolicy::Omit,
            Aux::Settled,
            format!("Position {}: {} is now sorted", settled, arr[settled]),
        );

        if !swapped {
            if settled > 0 {
                rec.record(
                    StepKind::RangeMark,
                    0..settled,
                    SnapshotPolicy::Omit,
                    Aux::Settled,
                    "No swaps in this pass, the remaining elements are already sorted",
                );
            }
            break;
        }
    }

    rec.complete(0..n, &arr, Aux::Settled, "Bubble sort complete");
    Ok(finish("bubble", rec))
}

pub fn selection_sort(values: &[f64]) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();
    rec.start(&arr, Aux::None, "Starting selection sort");

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        rec.record(
            StepKind::RangeMark,
            [i],
            SnapshotPolicy::Omit,
            Aux::Key { index: i },
            format!(
                "Pass {}: position {} holds the initial minimum {}",
                i + 1,
                i,
                arr[i]
            ),
        );

        for j in i + 1..n {
            rec.record(
                StepKind::Compare,
                [j, min],
                SnapshotPolicy::Omit,
                Aux::Key { index: min },
                format!("Comparing {} with current minimum {}", arr[j], arr[min]),
            );
            if arr[j] < arr[min] {
                min = j;
                rec.record(
                    StepKind::RangeMark,
                    [j],
                    SnapshotPolicy::Omit,
                    Aux::Key { index: j },
                    format!("New minimum {} at position {}", arr[j], j),
                );
            }
        }

        if min != i {
            arr.swap(i, min);
            rec.record(
                StepKind::Swap,
                [i, min],
                SnapshotPolicy::Capture(&arr),
                Aux::None,
                format!("Swapped minimum {} into position {}", arr[i], i),
            );
        }

        rec.record(
            StepKind::RangeMark,
            [i],
            SnapshotPolicy::Omit,
            Aux::Settled,
            format!("Position {} is now sorted with {}", i, arr[i]),
        );
    }

    rec.complete(0..n, &arr, Aux::Settled, "Selection sort complete");
    Ok(finish("selection", rec))
}

pub fn insertion_sort(values: &[f64]) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();
    rec.start(
        &arr,
        Aux::None,
        "Starting insertion sort, the first element forms the sorted prefix",
    );

    for i in 1..n {
        let key = arr[i];
        rec.record(
            StepKind::RangeMark,
            [i],
            SnapshotPolicy::Omit,
            Aux::Key { index: i },
            format!("Selecting {} at position {} as the key", key, i),
        );

        // `hole` is where the key would land if inserted now
        let mut hole = i;
        while hole > 0 {
            rec.record(
                StepKind::Compare,
                [hole - 1, hole],
                SnapshotPolicy::Omit,
                Aux::Key { index: i },
                format!("Comparing {} with key {}", arr[hole - 1], key),
            );
            if arr[hole - 1] <= key {
                break;
            }
            arr[hole] = arr[hole - 1];
            rec.record(
                StepKind::Overwrite,
                [hole],
                SnapshotPolicy::Capture(&arr),
                Aux::None,
                format!("Shifting {} one position to the right", arr[hole]),
            );
            hole -= 1;
        }

        arr[hole] = key;
        rec.record(
            StepKind::InsertAt,
            [hole],
            SnapshotPolicy::Capture(&arr),
            Aux::None,
            format!("Inserting {} at position {}", key, hole),
        );
        rec.record(
            StepKind::RangeMark,
            0..=i,
            SnapshotPolicy::Omit,
            Aux::Settled,
            format!("The first {} elements are now in order", i + 1),
        );
    }

    rec.complete(0..n, &arr, Aux::Settled, "Insertion sort complete");
    Ok(finish("insertion", rec))
}

/// Quick sort with the Lomuto scheme: the last element of each range is the pivot
pub fn quick_sort(values: &[f64]) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();
    rec.start(&arr, Aux::None, "Starting quick sort");

    quick_sort_range(&mut arr, &mut rec, 0, n - 1);

    rec.complete(0..n, &arr, Aux::Settled, "Quick sort complete");
    Ok(finish("quick", rec))
}

fn quick_sort_range(arr: &mut [f64], rec: &mut Recorder, low: usize, high: usize) {
    if low >= high {
        return;
    }
    let p = partition(arr, rec, low, high);
    if p > low {
        quick_sort_range(arr, rec, low, p - 1);
    }
    quick_sort_range(arr, rec, p + 1, high);
}

fn partition(arr: &mut [f64], rec: &mut Recorder, low: usize, high: usize) -> usize {
    let pivot = arr[high];
    rec.record(
        StepKind::RangeMark,
        [high],
        SnapshotPolicy::Omit,
        Aux::Pivot { index: high },
        format!("Selected pivot {} at position {}", pivot, high),
    );

    // Everything left of `store` is <= pivot
    let mut store = low;
    for j in low..high {
        rec.record(
            StepKind::Compare,
            [j, high],
            SnapshotPolicy::Omit,
            Aux::Pivot { index: high },
            format!("Comparing {} with pivot {}", arr[j], pivot),
        );
        if arr[j] <= pivot {
            if store != j {
                arr.swap(store, j);
                rec.record(
                    StepKind::Swap,
                    [store, j],
                    SnapshotPolicy::Capture(arr),
                    Aux::Pivot { index: high },
                    format!("Swapped {} and {}", arr[store], arr[j]),
                );
            }
            store += 1;
        }
    }

    if store != high {
        arr.swap(store, high);
        rec.record(
            StepKind::Swap,
            [store, high],
            SnapshotPolicy::Capture(arr),
            Aux::None,
            format!("Moved pivot {} to position {}", pivot, store),
        );
    }

    rec.record(
        StepKind::RangeMark,
        [store],
        SnapshotPolicy::Omit,
        Aux::Partition {
            partition_index: store,
        },
        format!("Pivot {} is in its final position {}", pivot, store),
    );
    store
}

pub fn merge_sort(values: &[f64]) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();
    rec.start(
        &arr,
        Aux::None,
        "Starting merge sort, first divide the array into single elements",
    );

    merge_sort_range(&mut arr, &mut rec, 0, n - 1, 0);

    rec.complete(0..n, &arr, Aux::Settled, "Merge sort complete");
    Ok(finish("merge", rec))
}

fn merge_sort_range(arr: &mut [f64], rec: &mut Recorder, left: usize, right: usize, depth: usize) {
    if left >= right {
        rec.record(
            StepKind::Custom("base case"),
            [left],
            SnapshotPolicy::Omit,
            Aux::None,
            format!("[{}] is a single element and already sorted", arr[left]),
        );
        return;
    }

    let mid = left + (right - left) / 2;
    rec.record(
        StepKind::RangeMark,
        [left, mid, right],
        SnapshotPolicy::Omit,
        Aux::Divide {
            left: (left, mid),
            right: (mid + 1, right),
            depth,
        },
        format!(
            "Divide [{}] into [{}] and [{}]",
            join(&arr[left..=right]),
            join(&arr[left..=mid]),
            join(&arr[mid + 1..=right])
        ),
    );

    merge_sort_range(arr, rec, left, mid, depth + 1);
    merge_sort_range(arr, rec, mid + 1, right, depth + 1);
    merge(arr, rec, left, mid, right);
}

/// Merge two sorted runs: comparisons first, then one write per position
fn merge(arr: &mut [f64], rec: &mut Recorder, left: usize, mid: usize, right: usize) {
    let ranges = Aux::Merge {
        left: (left, mid),
        right: (mid + 1, right),
    };
    rec.record(
        StepKind::RangeMark,
        left..=right,
        SnapshotPolicy::Omit,
        ranges,
        format!(
            "Merging [{}] with [{}]",
            join(&arr[left..=mid]),
            join(&arr[mid + 1..=right])
        ),
    );

    let mut merged = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (left, mid + 1);
    while i <= mid && j <= right {
        let take_left = arr[i] <= arr[j];
        rec.record(
            StepKind::Compare,
            [i, j],
            SnapshotPolicy::Omit,
            ranges,
            format!(
                "Comparing {} (left) with {} (right), take {}",
                arr[i],
                arr[j],
                if take_left { "left" } else { "right" }
            ),
        );
        if take_left {
            merged.push(arr[i]);
            i += 1;
        } else {
            merged.push(arr[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&arr[i..=mid]);
    merged.extend_from_slice(&arr[j..=right]);

    for (offset, value) in merged.iter().enumerate() {
        let k = left + offset;
        arr[k] = *value;
        rec.record(
            StepKind::Overwrite,
            [k],
            SnapshotPolicy::Capture(arr),
            ranges,
            format!("Writing {} to position {}", value, k),
        );
    }

    rec.record(
        StepKind::Custom("merged"),
        left..=right,
        SnapshotPolicy::Omit,
        ranges,
        format!("Merged into [{}]", join(&arr[left..=right])),
    );
}
