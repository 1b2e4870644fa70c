//! The execution stack: the engine that resumes a tree where it left off.
//!
//! Instead of descending from the root on every tick, an [`ExecutionStack`]
//! keeps the currently active path (root first, leaf-equivalent on top) and
//! only ticks the top. Completion unwinds the stack into the parent; a node
//! reporting [`NodeStatus::RunningWithNewChildren`] gets the path below it
//! rebuilt through `init`.

use crate::node::Arena;
use crate::{NodeId, NodeStatus, Status};

/// One active path through a tree, rooted at a fixed node.
///
/// The stack is empty before [`start`](ExecutionStack::start) and after the
/// root reports a terminal status. Ticking an empty stack is a protocol
/// violation and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStack {
    root: NodeId,
    stack: Vec<NodeId>,
    /// Started and not ticked since.
    fresh: bool,
}

impl ExecutionStack {
    pub(crate) fn new(root: NodeId) -> Self {
        Self {
            root,
            stack: Vec::new(),
            fresh: false,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns `true` between `start` and the root's terminal status.
    pub fn is_running(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Returns `true` if the stack was started and has not been ticked since.
    ///
    /// A fresh stack is exactly in its just-started state, so starting it
    /// again would only repeat every `init` on its path.
    pub(crate) fn is_fresh(&self) -> bool {
        self.fresh && self.is_running()
    }

    /// The node ticked first on the next cycle.
    pub fn current_leaf(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// The active path, root first.
    pub fn active_path(&self) -> &[NodeId] {
        &self.stack
    }

    /// Begins a fresh run: clears per-run state under the root, then pushes
    /// the root and every node its activation chain names.
    pub(crate) fn start<C>(&mut self, arena: &mut Arena<C>, ctx: &mut C) {
        arena.reset(self.root);
        self.stack.clear();
        self.stack.push(self.root);
        self.push_all_children(self.root, arena, ctx);
        self.fresh = true;
    }

    /// Runs one cycle.
    ///
    /// Ticks the top of the stack, feeding each parent the terminal status of
    /// the child just popped, until a node reports `Running`, a node reports
    /// `RunningWithNewChildren` (its new path is pushed and will be ticked on
    /// the next cycle), or the root itself terminates.
    ///
    /// # Panics
    ///
    /// Panics if the stack has already terminated (or was never started).
    pub(crate) fn tick<C>(&mut self, arena: &mut Arena<C>, ctx: &mut C) -> Status {
        assert!(
            self.is_running(),
            "execution stack rooted at {} ticked after termination; call start first",
            self.root
        );
        self.fresh = false;

        // Leaf-equivalents receive `Success` by convention.
        let mut status = NodeStatus::Success;

        while let Some(&top) = self.stack.last() {
            status = arena.tick(top, status, ctx);
            tracing::trace!(node = %top, ?status, "ticked node");

            match status {
                NodeStatus::Success | NodeStatus::Failure => {
                    self.stack.pop();
                }
                NodeStatus::RunningWithNewChildren => {
                    self.push_all_children(top, arena, ctx);
                    return Status::Running;
                }
                NodeStatus::Running => return Status::Running,
            }
        }

        tracing::debug!(root = %self.root, ?status, "execution stack terminated");
        status.settle()
    }

    /// Activates `node` and pushes every node its activation chain names,
    /// leaving the ancestors already on the stack untouched.
    fn push_all_children<C>(&mut self, node: NodeId, arena: &mut Arena<C>, ctx: &mut C) {
        let mut next = arena.init(node, ctx);
        while let Some(child) = next {
            self.stack.push(child);
            next = arena.init(child, ctx);
        }
        tracing::trace!(root = %self.root, depth = self.stack.len(), "rebuilt active path");
    }
}
