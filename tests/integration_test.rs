// Integration tests: record a trace, drive playback, project views

use algoscope::adapters::graph::{bfs, Graph};
use algoscope::adapters::search::binary_search;
use algoscope::adapters::sorting::{bubble_sort, insertion_sort, quick_sort};
use algoscope::adapters::structures::{linked_list, stack, ListOp, StackOp};
use algoscope::adapters::errors::InputError;
use algoscope::adapters::Algorithm;
use algoscope::config::Config;
use algoscope::playback::{Mode, PlaybackController, Speed, TickOutcome};
use algoscope::projector::{project, Mark, Outcome};
use algoscope::session::{Recording, Session};
use algoscope::trace::{Aux, StepKind};
use clap::Parser;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fire ticks until playback stops asking for more
fn play_to_end<T>(controller: &mut PlaybackController<T>) -> usize {
    let mut fired = 0;
    let mut tick = controller.play();
    while let Some(t) = tick {
        fired += 1;
        match controller.fire(t) {
            TickOutcome::Advanced => tick = controller.pending(),
            TickOutcome::Finished | TickOutcome::Stale => tick = None,
        }
    }
    fired
}

#[test]
fn test_bubble_sort_plays_to_sorted_view() {
    let trace = bubble_sort(&[5.0, 3.0, 1.0]).unwrap();
    let total = trace.len();
    let mut controller = PlaybackController::new(Algorithm::BubbleSort.pace());
    controller.load(trace);
    assert_eq!(controller.mode(), Mode::Paused);

    let fired = play_to_end(&mut controller);
    assert_eq!(fired, total);
    assert_eq!(controller.mode(), Mode::Finished);
    assert_eq!(controller.cursor(), total);

    let view = controller.view().unwrap();
    assert_eq!(view.items, vec![1.0, 3.0, 5.0]);
    assert!(view.is_at_end());
    assert!((0..3).all(|i| view.mark(i) == Mark::Settled));
}

#[test]
fn test_binary_search_found_and_not_found() {
    let sorted = [2.0, 4.0, 6.0, 8.0, 10.0];

    let found = binary_search(&sorted, Some(8.0)).unwrap();
    let view = project(&found, found.len());
    assert_eq!(view.outcome, Some(Outcome::Found(3)));
    assert_eq!(view.found(), Some(3));

    let missing = binary_search(&sorted, Some(5.0)).unwrap();
    let view = project(&missing, missing.len());
    assert_eq!(view.outcome, Some(Outcome::NotFound));
    assert_eq!(view.found(), None);
    assert_eq!(view.stats.mutations, 0);
}

#[test]
fn test_bfs_visit_order_through_session() {
    let config = Config::try_parse_from([
        "algoscope", "-a", "bfs", "--graph", "A-B,B-C,A-D", "--start", "A",
    ])
    .unwrap();
    let session = Session::from_config(&config).unwrap();
    let Recording::Graph(trace) = session.record().unwrap() else {
        panic!("bfs should record a graph trace");
    };
    let order: Vec<&str> = trace
        .iter()
        .filter(|s| s.kind == StepKind::Visit)
        .map(|s| session.graph.label(s.indices[0]).unwrap())
        .collect();
    assert_eq!(order, vec!["A", "B", "D", "C"]);

    // Direct call agrees with the session dispatch
    let graph = Graph::parse("A-B,B-C,A-D").unwrap();
    assert_eq!(bfs(&graph, "A").unwrap(), trace);
}

#[test]
fn test_quick_sort_partition_settles_pivot() {
    let trace = quick_sort(&[3.0, 1.0, 4.0, 1.0, 5.0]).unwrap();
    let position = trace
        .iter()
        .position(|s| matches!(s.aux, Aux::Partition { .. }))
        .unwrap();
    assert_eq!(
        trace.get(position).unwrap().aux,
        Aux::Partition { partition_index: 4 }
    );

    let view = project(&trace, position + 1);
    assert!(view.mark(4) >= Mark::Settled);
    assert_eq!(view.pivot, None);
}

#[test]
fn test_pause_discards_in_flight_tick() {
    let mut controller = PlaybackController::new(Algorithm::QuickSort.pace());
    controller.load(quick_sort(&[4.0, 2.0, 3.0, 1.0]).unwrap());

    let first = controller.play().unwrap();
    controller.pause();
    assert_eq!(controller.fire(first), TickOutcome::Stale);
    assert_eq!(controller.cursor(), 0);

    // Resuming issues a new tick; the old one stays dead
    let second = controller.play().unwrap();
    assert_ne!(first, second);
    assert_eq!(controller.fire(first), TickOutcome::Stale);
    assert_eq!(controller.fire(second), TickOutcome::Advanced);
    assert_eq!(controller.cursor(), 1);
}

#[test]
fn test_reset_then_stale_tick_is_ignored() {
    let mut controller = PlaybackController::new(Algorithm::BubbleSort.pace());
    controller.load(bubble_sort(&[2.0, 1.0]).unwrap());
    let tick = controller.play().unwrap();
    controller.reset();
    assert_eq!(controller.fire(tick), TickOutcome::Stale);
    assert_eq!(controller.mode(), Mode::Idle);
    assert!(controller.view().is_none());
}

#[test]
fn test_stepping_back_restores_earlier_views() {
    let trace = insertion_sort(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    let mut controller = PlaybackController::new(Algorithm::InsertionSort.pace());
    controller.load(trace);

    let mut forward = Vec::new();
    while controller.mode() == Mode::Paused {
        forward.push(controller.view().unwrap());
        controller.step_forward();
    }
    assert_eq!(controller.mode(), Mode::Finished);

    for expected in forward.iter().rev() {
        controller.step_backward();
        assert_eq!(&controller.view().unwrap(), expected);
    }
    assert_eq!(controller.cursor(), 0);
}

#[test]
fn test_speed_scales_tick_delay() {
    let mut controller = PlaybackController::new(Algorithm::BubbleSort.pace());
    controller.load(bubble_sort(&[3.0, 2.0, 1.0]).unwrap());
    let normal = controller.play().unwrap().delay();
    controller.pause();
    controller.set_speed(Speed::Double);
    let double = controller.play().unwrap().delay();
    assert!(double < normal);
    assert_eq!(double, Algorithm::BubbleSort.pace().delay(Speed::Double));
}

#[test]
fn test_structures_validate_before_mutating() {
    let mut items = strings(&["a", "b"]);
    stack(&mut items, StackOp::Push("c".to_string())).unwrap();
    assert_eq!(items, strings(&["a", "b", "c"]));

    let mut empty = Vec::new();
    assert!(matches!(
        stack(&mut empty, StackOp::Pop),
        Err(InputError::EmptyStructure { .. })
    ));
    assert!(empty.is_empty());

    let mut list = strings(&["x", "y"]);
    assert_eq!(
        linked_list(&mut list, ListOp::DeleteAt(5)),
        Err(InputError::IndexOutOfRange { index: 5, max: 1 })
    );
    assert_eq!(list, strings(&["x", "y"]));

    let trace = linked_list(&mut list, ListOp::InsertAt(1, "z".to_string())).unwrap();
    assert_eq!(list, strings(&["x", "z", "y"]));
    assert_eq!(trace.final_snapshot(), Some(&list[..]));
}

#[test]
fn test_print_listing_matches_recording() {
    let config =
        Config::try_parse_from(["algoscope", "-a", "bubble", "--values", "2,1", "--print"]).unwrap();
    assert!(config.print);
    let session = Session::from_config(&config).unwrap();
    let recording = session.record().unwrap();
    let listing = recording.listing();
    assert_eq!(listing.lines().count(), recording.len() + 1);
    assert!(listing.ends_with(&format!(
        "{} steps, {} comparisons, {} mutations",
        recording.len(),
        recording.stats().comparisons,
        recording.stats().mutations
    )));
}

#[test]
fn test_stack_script_through_session() {
    let config = Config::try_parse_from([
        "algoscope", "-a", "stack", "--ops", "push:3,push:9,peek,pop", "--print",
    ])
    .unwrap();
    let session = Session::from_config(&config).unwrap();
    let recording = session.record().unwrap();
    let Recording::Items(trace) = &recording else {
        panic!("stack should record an item trace");
    };
    assert_eq!(trace.final_snapshot(), Some(&strings(&["3"])[..]));

    let mut controller = PlaybackController::new(Algorithm::Stack.pace());
    controller.load(trace.clone());
    play_to_end(&mut controller);
    let view = controller.view().unwrap();
    assert_eq!(view.items, strings(&["3"]));
    assert!(recording.listing().contains("Operation 3: peek"));
}

#[test]
fn test_isolated_graph_node_is_never_reached() {
    let config =
        Config::try_parse_from(["algoscope", "-a", "dfs", "--graph", "A-B, C", "--start", "A"])
            .unwrap();
    let session = Session::from_config(&config).unwrap();
    assert_eq!(session.graph.labels(), &strings(&["A", "B", "C"])[..]);
    let Recording::Graph(trace) = session.record().unwrap() else {
        panic!("dfs should record a graph trace");
    };
    let view = project(&trace, trace.len());
    assert_eq!(view.visited, vec![0, 1]);
}
