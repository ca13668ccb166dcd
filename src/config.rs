//! Command-line configuration and input preparation
//!
//! [`Config`] is derived with clap. Custom values arrive as comma separated
//! numbers; when none are given, [`random_values`] generates them from a
//! seedable [`StdRng`], and [`random_ops`] scripts the structure algorithms.

use crate::adapters::errors::InputError;
use crate::adapters::{Algorithm, Family, MAX_ELEMENTS, MIN_ELEMENTS};
use crate::playback::Speed;
use clap::builder::{PossibleValue, RangedU64ValueParser};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SIZE: usize = 20;

/// Random values for sorts fall in this range
pub const VALUE_RANGE: std::ops::RangeInclusive<u32> = 10..=310;

/// Random structure elements fall in this range
const ITEM_RANGE: std::ops::RangeInclusive<u32> = 1..=99;

/// Input that parsed but cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Input(#[from] InputError),
}

const EXAMPLES: &str = "Examples:
  algoscope --algorithm quick --values 3,1,4,1,5
  algoscope -a binary --values 2,4,6,8,10 --target 8 --print
  algoscope -a bfs --graph A-B,B-C,A-D,E --start A
  algoscope -a stack --ops push:3,push:7,pop,peek";

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(
    name = "algoscope",
    version,
    about = "Step-by-step algorithm visualizer",
    after_help = EXAMPLES
)]
pub struct Config {
    /// Algorithm to trace
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Algorithm::BubbleSort)]
    pub algorithm: Algorithm,

    /// Comma separated numbers, e.g. 5,3,1
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_value)]
    pub values: Option<Vec<f64>>,

    /// Number of random values to generate
    #[arg(
        long,
        default_value_t = DEFAULT_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new()
            .range(MIN_ELEMENTS as u64..=MAX_ELEMENTS as u64)
    )]
    pub size: usize,

    /// Value to look for or insert
    #[arg(long, allow_hyphen_values = true, value_parser = parse_target)]
    pub target: Option<f64>,

    /// Undirected edges and bare nodes, e.g. A-B,B-C,D
    #[arg(long)]
    pub graph: Option<String>,

    /// Start node for graph traversals
    #[arg(long)]
    pub start: Option<String>,

    /// Structure operations, e.g. push:3,pop or insert-at:1:x,search:x
    #[arg(long, value_delimiter = ',')]
    pub ops: Option<Vec<String>>,

    /// Playback speed: 0.25x, 0.5x, 0.75x, 1x, 1.25x, 1.5x or 2x
    #[arg(long, default_value_t = Speed::Normal)]
    pub speed: Speed,

    /// Seed for random input
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the trace instead of opening the UI
    #[arg(long)]
    pub print: bool,

    /// Write logs to a file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: Algorithm::BubbleSort,
            values: None,
            size: DEFAULT_SIZE,
            target: None,
            graph: None,
            start: None,
            ops: None,
            speed: Speed::Normal,
            seed: None,
            print: false,
            log_file: None,
        }
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        &Algorithm::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.key()).help(self.title()))
    }
}

impl Config {
    /// Random source for generated input, reproducible when seeded
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn check_size(size: usize) -> Result<(), InputError> {
    if !(MIN_ELEMENTS..=MAX_ELEMENTS).contains(&size) {
        return Err(InputError::SizeOutOfRange {
            size,
            max: MAX_ELEMENTS,
        });
    }
    Ok(())
}

/// One finite number from a `--values` list
pub fn parse_value(text: &str) -> Result<f64, InputError> {
    let token = text.trim();
    let value: f64 = token.parse().map_err(|_| InputError::Malformed {
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::NonFinite { index: 0 });
    }
    Ok(value)
}

fn parse_target(text: &str) -> Result<f64, InputError> {
    let token = text.trim();
    let value: f64 = token.parse().map_err(|_| InputError::Malformed {
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::InvalidTarget);
    }
    Ok(value)
}

/// Generate `size` values shaped for `family`.
///
/// Search input is strictly increasing so binary search can run on it;
/// everything else is drawn uniformly from [`VALUE_RANGE`].
pub fn random_values<R: Rng>(rng: &mut R, size: usize, family: Family) -> Result<Vec<f64>, InputError> {
    check_size(size)?;
    let values = match family {
        Family::Search => {
            let mut next: u32 = rng.gen_range(1..=10);
            (0..size)
                .map(|_| {
                    let value = next;
                    next += rng.gen_range(1..=15);
                    f64::from(value)
                })
                .collect()
        }
        _ => (0..size)
            .map(|_| f64::from(rng.gen_range(VALUE_RANGE)))
            .collect(),
    };
    Ok(values)
}

/// Pick a search target, usually one that is present
pub fn random_target<R: Rng>(rng: &mut R, values: &[f64]) -> Option<f64> {
    if rng.gen_bool(0.2) {
        values.last().map(|last| last + 1.0)
    } else {
        values.choose(rng).copied()
    }
}

/// A short operation script for a structure algorithm, starting from an
/// empty structure. Other algorithms get no operations.
pub fn random_ops<R: Rng>(rng: &mut R, algorithm: Algorithm) -> Vec<String> {
    let mut item = || rng.gen_range(ITEM_RANGE);
    let (a, b, c, d) = (item(), item(), item(), item());
    match algorithm {
        Algorithm::Stack => vec![
            format!("push:{a}"),
            format!("push:{b}"),
            format!("push:{c}"),
            "peek".to_string(),
            "pop".to_string(),
            format!("push:{d}"),
        ],
        Algorithm::Queue => vec![
            format!("enqueue:{a}"),
            format!("enqueue:{b}"),
            format!("enqueue:{c}"),
            "peek".to_string(),
            "dequeue".to_string(),
            format!("enqueue:{d}"),
        ],
        Algorithm::LinkedList => vec![
            format!("insert-tail:{a}"),
            format!("insert-tail:{b}"),
            format!("insert-head:{c}"),
            format!("insert-at:2:{d}"),
            format!("search:{b}"),
            "delete-at:1".to_string(),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("algoscope").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.size, 20);
    }

    #[test]
    fn test_full_command_line() {
        let config = parse(&[
            "--algorithm",
            "binary",
            "--values=2,4,6",
            "--target",
            "4",
            "--speed",
            "1.5x",
            "--seed",
            "7",
            "--print",
        ])
        .unwrap();
        assert_eq!(config.algorithm, Algorithm::BinarySearch);
        assert_eq!(config.values, Some(vec![2.0, 4.0, 6.0]));
        assert_eq!(config.target, Some(4.0));
        assert_eq!(config.speed, Speed::ThreeHalves);
        assert_eq!(config.seed, Some(7));
        assert!(config.print);
    }

    #[test]
    fn test_flags_take_no_inline_value() {
        let error = parse(&["--print=false"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TooManyValues);
        assert!(!parse(&[]).unwrap().print);
    }

    #[test]
    fn test_option_errors() {
        assert_eq!(parse(&["--bogus"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse(&["--size"]).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(parse(&["--size", "51"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--size", "0"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--speed", "3"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["-a", "heap"]).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(parse(&["--target", "nan"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--values", "1,two"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_list_options() {
        let config = parse(&["-a", "Stack", "--values", "-1.5, 3", "--ops", "push:4,pop"]).unwrap();
        assert_eq!(config.algorithm, Algorithm::Stack);
        assert_eq!(config.values, Some(vec![-1.5, 3.0]));
        assert_eq!(config.ops, Some(vec!["push:4".to_string(), "pop".to_string()]));

        let config = parse(&["--target", "-2", "--size", "50"]).unwrap();
        assert_eq!(config.target, Some(-2.0));
        assert_eq!(config.size, 50);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 5 "), Ok(5.0));
        assert_eq!(
            parse_value("two"),
            Err(InputError::Malformed {
                token: "two".to_string()
            })
        );
        assert_eq!(parse_value("inf"), Err(InputError::NonFinite { index: 0 }));
        assert_eq!(parse_target("NaN"), Err(InputError::InvalidTarget));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = Config {
            seed: Some(42),
            ..Config::default()
        };
        let a = random_values(&mut config.rng(), 12, Family::Sort).unwrap();
        let b = random_values(&mut config.rng(), 12, Family::Sort).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (10.0..=310.0).contains(v)));
        assert_eq!(
            random_ops(&mut config.rng(), Algorithm::Queue),
            random_ops(&mut config.rng(), Algorithm::Queue)
        );
    }

    #[test]
    fn test_search_values_strictly_increase() {
        let mut rng = StdRng::seed_from_u64(3);
        let values = random_values(&mut rng, 30, Family::Search).unwrap();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(random_target(&mut rng, &values).is_some());
        assert_eq!(
            random_values(&mut rng, 0, Family::Sort),
            Err(InputError::SizeOutOfRange { size: 0, max: 50 })
        );
    }

    #[test]
    fn test_random_ops_only_for_structures() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(random_ops(&mut rng, Algorithm::Stack).len(), 6);
        assert!(random_ops(&mut rng, Algorithm::Stack)[0].starts_with("push:"));
        assert!(random_ops(&mut rng, Algorithm::LinkedList)[0].starts_with("insert-tail:"));
        assert!(random_ops(&mut rng, Algorithm::QuickSort).is_empty());
    }

    #[test]
    fn test_help_lists_algorithms() {
        let help = Config::command().render_long_help().to_string();
        for algorithm in Algorithm::ALL {
            assert!(help.contains(algorithm.key()), "{} missing", algorithm.key());
        }
    }
}
