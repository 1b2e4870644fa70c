//! Compositor nodes.
//!
//! Compositors own an ordered list of children and activate exactly one of
//! them at a time, strictly left to right: [`CompositorKind::Sequence`]
//! (AND logic) and [`CompositorKind::Selector`] (OR logic).

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{NodeId, NodeStatus};

/// The selection policy of a [`Compositor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum CompositorKind {
    /// Runs children in order until one fails.
    ///
    /// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
    /// - If a child returns `Success`, the sequence **advances** to the next child
    /// - If all children return `Success`, the sequence returns `Success`
    Sequence,

    /// Runs children in order until one succeeds.
    ///
    /// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
    /// - If a child returns `Failure`, the selector **advances** to the next child
    /// - If all children return `Failure`, the selector returns `Failure`
    Selector,
}

impl CompositorKind {
    /// Type name used in flat definitions.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A multi-child node with a cursor on its currently selected child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    kind: CompositorKind,
    children: Vec<NodeId>,
    cursor: usize,
}

impl Compositor {
    /// Tree validation guarantees `children` is non-empty.
    pub(crate) fn new(kind: CompositorKind, children: Vec<NodeId>) -> Self {
        Self {
            kind,
            children,
            cursor: 0,
        }
    }

    pub fn kind(&self) -> CompositorKind {
        self.kind
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the currently selected child.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the currently selected child.
    ///
    /// This does not move the cursor: the execution stack calls it both on
    /// activation and after `RunningWithNewChildren` to find the next child.
    pub(crate) fn init(&self) -> Option<NodeId> {
        self.children.get(self.cursor).copied()
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn tick(&mut self, child_status: NodeStatus) -> NodeStatus {
        // The status that advances the cursor; the other one ends the run.
        let advance_on = match self.kind {
            CompositorKind::Sequence => NodeStatus::Success,
            CompositorKind::Selector => NodeStatus::Failure,
        };

        if !child_status.is_terminal() {
            return NodeStatus::Running;
        }

        if child_status != advance_on {
            self.reset();
            return child_status;
        }

        self.cursor += 1;
        if self.cursor >= self.children.len() {
            self.reset();
            return advance_on;
        }

        NodeStatus::RunningWithNewChildren
    }
}
