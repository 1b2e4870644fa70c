//! Parallel composite nodes.
//!
//! A parallel node wraps each child in its own [`ExecutionStack`] (a subtree)
//! and ticks every subtree once per cycle, sequentially and in child order.
//! To its owner it is an opaque leaf: `init` never names a next node, so the
//! owning stack ticks the parallel node itself on every cycle.

use std::mem;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::node::Arena;
use crate::{ExecutionStack, Node, NodeId, Status};

/// The aggregation policy of a [`Parallel`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ParallelKind {
    /// All subtrees must keep succeeding together; any failure aborts.
    ///
    /// # Semantics
    ///
    /// Each cycle, subtrees are ticked in order:
    /// - A subtree reporting `Failure` makes the node report `Failure` at once;
    ///   later subtrees are not ticked that cycle
    /// - A subtree reporting `Success` is counted and immediately restarted
    /// - If every subtree reported `Success` in the same cycle, the node
    ///   reports `Success`, otherwise `Running`
    SequenceParallel,
}

impl ParallelKind {
    /// Type name used in flat definitions.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A multi-child node whose children run as independent subtrees.
#[derive(Debug, Clone)]
pub struct Parallel {
    kind: ParallelKind,
    children: Vec<NodeId>,
    subtrees: Vec<ExecutionStack>,
}

impl Parallel {
    pub(crate) fn new(kind: ParallelKind, children: Vec<NodeId>) -> Self {
        Self {
            kind,
            children,
            subtrees: Vec::new(),
        }
    }

    pub fn kind(&self) -> ParallelKind {
        self.kind
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The per-child execution stacks, empty until the node is first activated.
    pub fn subtrees(&self) -> &[ExecutionStack] {
        &self.subtrees
    }
}

/// Removes the subtrees from the node at `id` so they can be driven against
/// the same arena. Callers must hand them back with [`restore`].
fn take<C>(arena: &mut Arena<C>, id: NodeId) -> (ParallelKind, usize, Vec<ExecutionStack>) {
    match arena.node_mut(id) {
        Node::Parallel(parallel) => (
            parallel.kind,
            parallel.children.len(),
            mem::take(&mut parallel.subtrees),
        ),
        other => panic!("node {id} is not a parallel node: {other:?}"),
    }
}

fn restore<C>(arena: &mut Arena<C>, id: NodeId, subtrees: Vec<ExecutionStack>) {
    if let Node::Parallel(parallel) = arena.node_mut(id) {
        parallel.subtrees = subtrees;
    }
}

/// Activates the parallel node at `id`: (re)creates one subtree per child when
/// the counts disagree, then starts every subtree that is not already fresh.
///
/// Subtrees restarted by the previous tick (or skipped by a fail-fast) have
/// not been ticked since their start and are left as they are, so each leaf
/// sees one `init` per activation. Subtrees that terminated or were abandoned
/// mid-run start over from their child root.
pub(crate) fn init<C>(arena: &mut Arena<C>, id: NodeId, ctx: &mut C) {
    let (_, _, mut subtrees) = take(arena, id);

    let children = match arena.node_mut(id) {
        Node::Parallel(parallel) => parallel.children.clone(),
        _ => Vec::new(),
    };
    if subtrees.len() != children.len() {
        subtrees = children.into_iter().map(ExecutionStack::new).collect();
    }

    let mut started = 0;
    for subtree in subtrees.iter_mut().filter(|subtree| !subtree.is_fresh()) {
        subtree.start(arena, ctx);
        started += 1;
    }

    tracing::trace!(node = %id, subtrees = subtrees.len(), started, "activated parallel node");
    restore(arena, id, subtrees);
}

/// Ticks every subtree of the parallel node at `id` once and aggregates.
pub(crate) fn tick<C>(arena: &mut Arena<C>, id: NodeId, ctx: &mut C) -> Status {
    let (kind, expected, mut subtrees) = take(arena, id);
    assert_eq!(
        subtrees.len(),
        expected,
        "parallel node {id} has {} subtrees for {expected} children; it was not initialized",
        subtrees.len()
    );

    let status = match kind {
        ParallelKind::SequenceParallel => tick_sequence(arena, &mut subtrees, ctx),
    };

    tracing::trace!(node = %id, ?status, "ticked parallel node");
    restore(arena, id, subtrees);
    status
}

fn tick_sequence<C>(arena: &mut Arena<C>, subtrees: &mut [ExecutionStack], ctx: &mut C) -> Status {
    let total = subtrees.len();
    let mut successes = 0;

    for (index, subtree) in subtrees.iter_mut().enumerate() {
        match subtree.tick(arena, ctx) {
            Status::Failure => {
                tracing::debug!(subtree = index, "parallel subtree failed, aborting");
                return Status::Failure;
            }
            Status::Success => {
                successes += 1;
                subtree.start(arena, ctx);
                if successes == total {
                    return Status::Success;
                }
            }
            Status::Running => {}
        }
    }

    Status::Running
}
