//! Input assembly and trace dispatch
//!
//! A [`Session`] holds the prepared input for the selected algorithm and
//! knows how to turn it into a [`Recording`]. Both the terminal UI and the
//! `--print` mode go through here.

use crate::adapters::errors::InputError;
use crate::adapters::graph::{bfs, dfs, Graph};
use crate::adapters::structures::{self, ListOp, Operation, QueueOp, StackOp};
use crate::adapters::tree::{self, Bst, BstNode, TreeOrder};
use crate::adapters::{search, sorting, validate_values, Algorithm};
use crate::config::{random_ops, random_target, random_values, Config, ConfigError};
use crate::trace::{Trace, TraceStats};
use rand::rngs::StdRng;
use std::fmt::{self, Write};
use tracing::debug;

/// A trace of whichever item type the algorithm works over
#[derive(Debug, Clone, PartialEq)]
pub enum Recording {
    Array(Trace<f64>),
    Graph(Trace<String>),
    Tree(Trace<BstNode>),
    /// Stack, queue or linked list elements
    Items(Trace<String>),
}

impl Recording {
    pub fn len(&self) -> usize {
        match self {
            Recording::Array(trace) => trace.len(),
            Recording::Graph(trace) | Recording::Items(trace) => trace.len(),
            Recording::Tree(trace) => trace.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> TraceStats {
        match self {
            Recording::Array(trace) => trace.stats(),
            Recording::Graph(trace) | Recording::Items(trace) => trace.stats(),
            Recording::Tree(trace) => trace.stats(),
        }
    }

    /// One line per step followed by the summary counters
    pub fn listing(&self) -> String {
        match self {
            Recording::Array(trace) => listing(trace),
            Recording::Graph(trace) | Recording::Items(trace) => listing(trace),
            Recording::Tree(trace) => listing(trace),
        }
    }
}

fn listing<T: fmt::Display>(trace: &Trace<T>) -> String {
    let mut out = String::new();
    for (index, step) in trace.iter().enumerate() {
        let _ = write!(out, "{:>4}  {:<10} {}", index, step.kind.to_string(), step.message);
        if let Some(snapshot) = &step.snapshot {
            let items: Vec<String> = snapshot.iter().map(|item| item.to_string()).collect();
            let _ = write!(out, "  [{}]", items.join(", "));
        }
        out.push('\n');
    }
    let stats = trace.stats();
    let _ = write!(
        out,
        "{} steps, {} comparisons, {} mutations",
        stats.total, stats.comparisons, stats.mutations
    );
    out
}

/// Prepared input for one algorithm
#[derive(Debug, Clone)]
pub struct Session {
    pub algorithm: Algorithm,
    pub values: Vec<f64>,
    pub target: Option<f64>,
    pub graph: Graph,
    pub start: String,
    /// Operation script for the structure algorithms
    pub ops: Vec<String>,
    pub size: usize,
    /// Whether `values` came from the user rather than the generator
    pub custom: bool,
    /// Whether `ops` came from the user rather than the generator
    pub custom_ops: bool,
    rng: StdRng,
}

impl Session {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut rng = config.rng();
        let family = config.algorithm.family();
        let (values, custom) = match &config.values {
            Some(values) => {
                validate_values(values)?;
                (values.clone(), true)
            }
            None => (random_values(&mut rng, config.size, family)?, false),
        };
        let target = match config.target {
            Some(target) => Some(target),
            None if !custom => random_target(&mut rng, &values),
            None => None,
        };
        let graph = match &config.graph {
            Some(text) => Graph::parse(text)?,
            None => Graph::sample(),
        };
        let start = match &config.start {
            Some(start) => start.trim().to_string(),
            None => graph.labels().first().cloned().unwrap_or_default(),
        };
        let (ops, custom_ops) = match &config.ops {
            Some(ops) => (ops.clone(), true),
            None => (random_ops(&mut rng, config.algorithm), false),
        };
        Ok(Session {
            algorithm: config.algorithm,
            values,
            target,
            graph,
            start,
            ops,
            size: config.size,
            custom,
            custom_ops,
            rng,
        })
    }

    /// Run the selected algorithm over the current input
    pub fn record(&self) -> Result<Recording, InputError> {
        let result = self.dispatch();
        match &result {
            Ok(recording) => debug!(
                algorithm = self.algorithm.key(),
                steps = recording.len(),
                "recorded trace"
            ),
            Err(error) => debug!(algorithm = self.algorithm.key(), %error, "input rejected"),
        }
        result
    }

    fn dispatch(&self) -> Result<Recording, InputError> {
        let values = &self.values;
        let target = self.target;
        let recording = match self.algorithm {
            Algorithm::BubbleSort => Recording::Array(sorting::bubble_sort(values)?),
            Algorithm::SelectionSort => Recording::Array(sorting::selection_sort(values)?),
            Algorithm::InsertionSort => Recording::Array(sorting::insertion_sort(values)?),
            Algorithm::QuickSort => Recording::Array(sorting::quick_sort(values)?),
            Algorithm::MergeSort => Recording::Array(sorting::merge_sort(values)?),
            Algorithm::LinearSearch => Recording::Array(search::linear_search(values, target)?),
            Algorithm::BinarySearch => Recording::Array(search::binary_search(values, target)?),
            Algorithm::Bfs => Recording::Graph(bfs(&self.graph, &self.start)?),
            Algorithm::Dfs => Recording::Graph(dfs(&self.graph, &self.start)?),
            Algorithm::TreeInorder => Recording::Tree(self.traverse(TreeOrder::Inorder)?),
            Algorithm::TreePreorder => Recording::Tree(self.traverse(TreeOrder::Preorder)?),
            Algorithm::TreePostorder => Recording::Tree(self.traverse(TreeOrder::Postorder)?),
            Algorithm::BstInsert => {
                let target = target.ok_or(InputError::MissingTarget)?;
                let (_, trace) = tree::insert(&Bst::from_values(values)?, target)?;
                Recording::Tree(trace)
            }
            Algorithm::BstSearch => {
                let target = target.ok_or(InputError::MissingTarget)?;
                Recording::Tree(tree::search(&Bst::from_values(values)?, target)?)
            }
            Algorithm::Stack => Recording::Items(self.script::<StackOp>()?),
            Algorithm::Queue => Recording::Items(self.script::<QueueOp>()?),
            Algorithm::LinkedList => Recording::Items(self.script::<ListOp>()?),
        };
        Ok(recording)
    }

    fn traverse(&self, order: TreeOrder) -> Result<Trace<BstNode>, InputError> {
        tree::traverse(&Bst::from_values(&self.values)?, order)
    }

    /// Replay the operation script from the custom values, or from empty
    fn script<O: Operation>(&self) -> Result<Trace<String>, InputError> {
        let initial: Vec<String> = if self.custom {
            self.values.iter().map(f64::to_string).collect()
        } else {
            Vec::new()
        };
        let ops: Vec<O> = structures::parse_ops(&self.ops)?;
        structures::script(&initial, &ops)
    }

    /// Replace the generated input with fresh random input shaped for the
    /// algorithm. Operations the user supplied are kept.
    pub fn regenerate(&mut self) -> Result<(), InputError> {
        let family = self.algorithm.family();
        self.values = random_values(&mut self.rng, self.size, family)?;
        self.target = random_target(&mut self.rng, &self.values);
        self.custom = false;
        if !self.custom_ops {
            self.ops = random_ops(&mut self.rng, self.algorithm);
        }
        Ok(())
    }

    /// Switch algorithm.
    ///
    /// Generated input is reshaped when the new algorithm cannot run on it:
    /// binary search needs ascending values, searches need a target, and each
    /// structure gets its own operation script. Custom input is never
    /// replaced; if it does not fit, recording reports why.
    pub fn select(&mut self, algorithm: Algorithm) -> Result<(), InputError> {
        self.algorithm = algorithm;
        if !self.custom_ops {
            self.ops = random_ops(&mut self.rng, algorithm);
        }
        if self.custom {
            return Ok(());
        }
        let unsorted = algorithm == Algorithm::BinarySearch
            && self.values.windows(2).any(|w| w[0] > w[1]);
        if unsorted || (algorithm.needs_target() && self.target.is_none()) {
            self.regenerate()?;
        }
        Ok(())
    }
}
