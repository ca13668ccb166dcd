// Property tests over random inputs and random playback commands

use algoscope::adapters::sorting::{bubble_sort, insertion_sort, merge_sort, quick_sort, selection_sort};
use algoscope::adapters::errors::InputError;
use algoscope::adapters::Algorithm;
use algoscope::playback::{Mode, PlaybackController, Speed, TickOutcome};
use algoscope::projector::project;
use algoscope::trace::{StepKind, Trace};
use proptest::prelude::*;

type Sorter = fn(&[f64]) -> Result<Trace<f64>, InputError>;

const SORTERS: [Sorter; 5] = [bubble_sort, selection_sort, insertion_sort, quick_sort, merge_sort];

fn values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-500i32..500).prop_map(f64::from), 1..=30)
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Play,
    Pause,
    Stop,
    Forward,
    Backward,
    Seek(usize),
    Speed(usize),
    Fire,
    FireStale,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Play),
        Just(Command::Pause),
        Just(Command::Stop),
        Just(Command::Forward),
        Just(Command::Backward),
        (0usize..80).prop_map(Command::Seek),
        (0usize..Speed::ALL.len()).prop_map(Command::Speed),
        Just(Command::Fire),
        Just(Command::FireStale),
    ]
}

proptest! {
    #[test]
    fn sorts_are_deterministic_and_sorted(input in values()) {
        for sort in SORTERS {
            let trace = sort(&input).unwrap();
            prop_assert_eq!(&trace, &sort(&input).unwrap());

            let last = trace.final_snapshot().unwrap();
            prop_assert!(last.windows(2).all(|w| w[0] <= w[1]));

            let mut expected = input.clone();
            expected.sort_by(f64::total_cmp);
            prop_assert_eq!(last, &expected[..]);

            prop_assert_eq!(trace.get(0).map(|s| s.kind), Some(StepKind::Start));
            prop_assert_eq!(trace.steps().last().map(|s| s.kind), Some(StepKind::Complete));
        }
    }

    #[test]
    fn cursor_stays_in_range(input in values(), commands in prop::collection::vec(command(), 0..60)) {
        let trace = quick_sort(&input).unwrap();
        let len = trace.len();
        let mut controller = PlaybackController::new(Algorithm::QuickSort.pace());
        controller.load(trace);
        let mut stale = controller.pending();

        for command in commands {
            let before = controller.cursor();
            match command {
                Command::Play => {
                    stale = controller.pending().or(stale);
                    controller.play();
                }
                Command::Pause => controller.pause(),
                Command::Stop => controller.stop(),
                Command::Forward => controller.step_forward(),
                Command::Backward => controller.step_backward(),
                Command::Seek(position) => controller.seek(position),
                Command::Speed(index) => controller.set_speed(Speed::ALL[index]),
                Command::Fire => {
                    if let Some(tick) = controller.pending() {
                        stale = Some(tick);
                        controller.fire(tick);
                    }
                }
                Command::FireStale => {
                    if let Some(tick) = stale.filter(|t| controller.pending() != Some(*t)) {
                        prop_assert_eq!(controller.fire(tick), TickOutcome::Stale);
                        prop_assert_eq!(controller.cursor(), before);
                    }
                }
            }

            prop_assert!(controller.cursor() <= len);
            prop_assert_eq!(controller.mode() == Mode::Finished, controller.cursor() == len);
            prop_assert_eq!(controller.mode() == Mode::Running, controller.pending().is_some());
        }
    }

    #[test]
    fn projection_depends_only_on_cursor(input in values(), cursor in 0usize..200) {
        let trace = insertion_sort(&input).unwrap();
        let direct = project(&trace, cursor);

        // Walk there and back again through the controller
        let mut controller = PlaybackController::new(Algorithm::InsertionSort.pace());
        controller.load(trace.clone());
        controller.seek(trace.len());
        controller.seek(cursor);
        prop_assert_eq!(controller.view().unwrap(), direct.clone());

        controller.seek(0);
        while controller.cursor() < cursor.min(trace.len()) {
            controller.step_forward();
        }
        prop_assert_eq!(controller.view().unwrap(), direct);
    }
}
