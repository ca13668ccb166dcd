//! Search adapters
//!
//! Both searches record one `Compare` step per probe and finish with a
//! `Found` or `NotFound` step ahead of the closing `Complete`. Binary search
//! steps carry the current `[low, high, mid]` bracket.

use super::errors::InputError;
use super::validate_values;
use crate::trace::{Aux, Bounds, SnapshotPolicy, StepKind, Trace, TraceRecorder};
use tracing::debug;

fn require_target(target: Option<f64>) -> Result<f64, InputError> {
    let target = target.ok_or(InputError::MissingTarget)?;
    if !target.is_finite() {
        return Err(InputError::InvalidTarget);
    }
    Ok(target)
}

pub fn linear_search(values: &[f64], target: Option<f64>) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let target = require_target(target)?;
    let mut rec = TraceRecorder::new();
    rec.start(
        values,
        Aux::None,
        format!("Searching for {} one element at a time", target),
    );

    for (i, value) in values.iter().enumerate() {
        rec.record(
            StepKind::Compare,
            [i],
            SnapshotPolicy::Omit,
            Aux::None,
            format!("Checking index {}: {}", i, value),
        );
        if *value == target {
            rec.record(
                StepKind::Found,
                [i],
                SnapshotPolicy::Omit,
                Aux::Outcome { found: Some(i) },
                format!("Found {} at index {}", target, i),
            );
            rec.complete([i], values, Aux::Outcome { found: Some(i) }, "Search complete");
            let trace = rec.finalize();
            debug!(steps = trace.len(), found = i, "recorded linear search trace");
            return Ok(trace);
        }
    }

    rec.record(
        StepKind::NotFound,
        [],
        SnapshotPolicy::Omit,
        Aux::Outcome { found: None },
        format!("{} is not in the array", target),
    );
    rec.complete([], values, Aux::Outcome { found: None }, "Search complete");
    let trace = rec.finalize();
    debug!(steps = trace.len(), "recorded linear search trace without a match");
    Ok(trace)
}

/// Indices covered by a bracket, empty once it is exhausted
fn bracket(low: isize, high: isize) -> Vec<usize> {
    if low > high {
        Vec::new()
    } else {
        (low as usize..=high as usize).collect()
    }
}

/// Binary search over ascending input.
///
/// With duplicates this reports the first probed `mid` that matches, which is
/// not necessarily the first or last occurrence.
pub fn binary_search(values: &[f64], target: Option<f64>) -> Result<Trace<f64>, InputError> {
    validate_values(values)?;
    let target = require_target(target)?;
    if let Some(pos) = values.windows(2).position(|w| w[0] > w[1]) {
        return Err(InputError::Unsorted { index: pos + 1 });
    }

    let mut low: isize = 0;
    let mut high: isize = values.len() as isize - 1;
    let mut rec = TraceRecorder::new();
    rec.start(
        values,
        Aux::Bounds(Bounds {
            low,
            high,
            mid: None,
        }),
        format!("Starting binary search for {} in the sorted array", target),
    );

    while low <= high {
        let mid = ((low + high) / 2) as usize;
        let probe = Bounds {
            low,
            high,
            mid: Some(mid),
        };
        rec.record(
            StepKind::Compare,
            [mid],
            SnapshotPolicy::Omit,
            Aux::Bounds(probe),
            format!("Checking middle index {}: {}", mid, values[mid]),
        );

        if values[mid] == target {
            rec.record(
                StepKind::Found,
                [mid],
                SnapshotPolicy::Omit,
                Aux::Bounds(probe),
                format!("Found {} at index {}", target, mid),
            );
            rec.complete(
                [mid],
                values,
                Aux::Outcome { found: Some(mid) },
                "Search complete",
            );
            let trace = rec.finalize();
            debug!(steps = trace.len(), found = mid, "recorded binary search trace");
            return Ok(trace);
        }

        let message = if values[mid] < target {
            low = mid as isize + 1;
            format!(
                "{} < {}, searching the right half (indices {} to {})",
                values[mid], target, low, high
            )
        } else {
            high = mid as isize - 1;
            format!(
                "{} > {}, searching the left half (indices {} to {})",
                values[mid], target, low, high
            )
        };
        rec.record(
            StepKind::RangeMark,
            bracket(low, high),
            SnapshotPolicy::Omit,
            Aux::Bounds(Bounds {
                low,
                high,
                mid: None,
            }),
            message,
        );
    }

    rec.record(
        StepKind::NotFound,
        [],
        SnapshotPolicy::Omit,
        Aux::Bounds(Bounds {
            low,
            high,
            mid: None,
        }),
        format!("{} is not in the array", target),
    );
    rec.complete([], values, Aux::Outcome { found: None }, "Search complete");
    let trace = rec.finalize();
    debug!(steps = trace.len(), "recorded binary search trace without a match");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTED: [f64; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];

    fn probes(trace: &Trace<f64>) -> Vec<Bounds> {
        trace
            .iter()
            .filter(|s| s.is_comparison())
            .filter_map(|s| match s.aux {
                Aux::Bounds(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_binary_search_found() {
        let trace = binary_search(&SORTED, Some(8.0)).unwrap();
        let probes = probes(&trace);
        assert_eq!(
            probes,
            vec![
                Bounds {
                    low: 0,
                    high: 4,
                    mid: Some(2)
                },
                Bounds {
                    low: 3,
                    high: 4,
                    mid: Some(3)
                },
            ]
        );
        let found = &trace.steps()[trace.len() - 2];
        assert_eq!(found.kind, StepKind::Found);
        assert_eq!(found.indices, vec![3]);
        assert_eq!(
            trace.steps().last().unwrap().aux,
            Aux::Outcome { found: Some(3) }
        );
    }

    #[test]
    fn test_binary_search_not_found() {
        let trace = binary_search(&SORTED, Some(5.0)).unwrap();
        let terminal = &trace.steps()[trace.len() - 2];
        assert_eq!(terminal.kind, StepKind::NotFound);
        let Aux::Bounds(bounds) = terminal.aux else {
            panic!("missing bounds on {:?}", terminal);
        };
        assert!(bounds.is_exhausted());
        assert_eq!(trace.steps().last().unwrap().kind, StepKind::Complete);
    }

    #[test]
    fn test_binary_search_below_range_goes_negative() {
        let trace = binary_search(&SORTED, Some(1.0)).unwrap();
        let terminal = &trace.steps()[trace.len() - 2];
        assert_eq!(
            terminal.aux,
            Aux::Bounds(Bounds {
                low: 0,
                high: -1,
                mid: None
            })
        );
    }

    #[test]
    fn test_binary_search_duplicates_reports_first_probe() {
        let trace = binary_search(&[1.0, 3.0, 3.0, 3.0, 3.0, 3.0, 9.0], Some(3.0)).unwrap();
        assert_eq!(
            trace.steps().last().unwrap().aux,
            Aux::Outcome { found: Some(3) }
        );
    }

    #[test]
    fn test_binary_search_rejects_unsorted_input() {
        assert_eq!(
            binary_search(&[1.0, 5.0, 3.0], Some(3.0)),
            Err(InputError::Unsorted { index: 2 })
        );
    }

    #[test]
    fn test_search_requires_target() {
        assert_eq!(
            binary_search(&SORTED, None),
            Err(InputError::MissingTarget)
        );
        assert_eq!(
            linear_search(&SORTED, None),
            Err(InputError::MissingTarget)
        );
        assert_eq!(
            linear_search(&SORTED, Some(f64::NAN)),
            Err(InputError::InvalidTarget)
        );
    }

    #[test]
    fn test_linear_search_probes_every_element() {
        let trace = linear_search(&[7.0, 3.0, 9.0], Some(9.0)).unwrap();
        assert_eq!(trace.stats().comparisons, 3);
        assert_eq!(
            trace.steps().last().unwrap().aux,
            Aux::Outcome { found: Some(2) }
        );

        let missing = linear_search(&[7.0, 3.0, 9.0], Some(4.0)).unwrap();
        assert_eq!(missing.stats().comparisons, 3);
        assert_eq!(missing.steps()[missing.len() - 2].kind, StepKind::NotFound);
    }

    #[test]
    fn test_search_never_mutates() {
        let trace = binary_search(&SORTED, Some(10.0)).unwrap();
        assert_eq!(trace.stats().mutations, 0);
        assert_eq!(trace.final_snapshot(), Some(&SORTED[..]));
    }
}
