//! Shared context and scripted leaves for the scenario tests.

#![allow(dead_code)]

use behavior_stack::{Behavior, Status};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; `RUST_LOG=trace` shows every node evaluation.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Init(&'static str),
    Tick(&'static str),
}

/// Test context: records every leaf activation and evaluation in order.
#[derive(Debug, Default)]
pub struct Trace {
    pub events: Vec<Event>,
}

impl Trace {
    pub fn inits(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Init(n) if *n == name))
            .count()
    }

    pub fn ticks(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Tick(n) if *n == name))
            .count()
    }

    /// Leaf names in the order they were ticked.
    pub fn ticked(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Tick(name) => Some(*name),
                Event::Init(_) => None,
            })
            .collect()
    }
}

/// Runs for `frames` ticks, then reports `outcome`.
#[derive(Debug, Clone)]
pub struct Countdown {
    name: &'static str,
    frames: u32,
    outcome: Status,
    remaining: u32,
}

impl Countdown {
    pub fn new(name: &'static str, frames: u32, outcome: Status) -> Self {
        Self {
            name,
            frames,
            outcome,
            remaining: frames,
        }
    }
}

impl Behavior<Trace> for Countdown {
    fn init(&mut self, ctx: &mut Trace) {
        ctx.events.push(Event::Init(self.name));
        self.remaining = self.frames;
    }

    fn tick(&mut self, ctx: &mut Trace) -> Status {
        ctx.events.push(Event::Tick(self.name));
        if self.remaining > 1 {
            self.remaining -= 1;
            Status::Running
        } else {
            self.outcome
        }
    }

    fn type_name(&self) -> &str {
        self.name
    }
}

pub fn succeeds(name: &'static str) -> Countdown {
    Countdown::new(name, 1, Status::Success)
}

pub fn fails(name: &'static str) -> Countdown {
    Countdown::new(name, 1, Status::Failure)
}

pub fn runs_forever(name: &'static str) -> Countdown {
    Countdown::new(name, u32::MAX, Status::Success)
}

/// Reports `outcomes[n]` on every tick of its n-th run (the last entry repeats).
#[derive(Debug, Clone)]
pub struct PerRun {
    name: &'static str,
    outcomes: Vec<Status>,
    run: usize,
}

impl PerRun {
    pub fn new(name: &'static str, outcomes: Vec<Status>) -> Self {
        assert!(!outcomes.is_empty());
        Self {
            name,
            outcomes,
            run: 0,
        }
    }
}

impl Behavior<Trace> for PerRun {
    fn init(&mut self, ctx: &mut Trace) {
        ctx.events.push(Event::Init(self.name));
        self.run += 1;
    }

    fn tick(&mut self, ctx: &mut Trace) -> Status {
        ctx.events.push(Event::Tick(self.name));
        let index = (self.run.max(1) - 1).min(self.outcomes.len() - 1);
        self.outcomes[index]
    }

    fn type_name(&self) -> &str {
        self.name
    }
}
