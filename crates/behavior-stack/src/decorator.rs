//! Decorator nodes.
//!
//! Decorators wrap exactly one child and transform or gate its result. This
//! module provides [`DecoratorKind::Invert`] (NOT logic), result overrides
//! ([`DecoratorKind::Succeed`], [`DecoratorKind::Fail`]) and the two
//! repeaters, which are the only decorators that restart their child.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{NodeId, NodeStatus};

/// The policy a [`Decorator`] applies to its child's result.
///
/// The string form of each variant is the type name used in flat tree
/// definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum DecoratorKind {
    /// `Success` becomes `Failure` and vice versa.
    Invert,

    /// Any terminal result becomes `Success`.
    ///
    /// Useful for optional behaviors that shouldn't cause a sequence to fail.
    Succeed,

    /// Any terminal result becomes `Failure`.
    Fail,

    /// Restart the child after every `Success`; stop with `Success` on the
    /// child's first `Failure`.
    RepeatUntilFail,

    /// Restart the child after every `Failure`; stop with `Success` on the
    /// child's first `Success`.
    RepeatUntilSuccess,
}

impl DecoratorKind {
    /// Type name used in flat definitions.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A single-child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    kind: DecoratorKind,
    child: NodeId,
}

impl Decorator {
    pub(crate) fn new(kind: DecoratorKind, child: NodeId) -> Self {
        Self { kind, child }
    }

    pub fn kind(&self) -> DecoratorKind {
        self.kind
    }

    pub fn child(&self) -> NodeId {
        self.child
    }

    pub(crate) fn child_ref(&self) -> &NodeId {
        &self.child
    }

    /// Every decorator activates its single child.
    pub(crate) fn init(&self) -> Option<NodeId> {
        Some(self.child)
    }

    /// Maps the child's just-produced status to this decorator's status.
    ///
    /// The repeaters answer `RunningWithNewChildren` on their restart trigger;
    /// the execution stack then re-activates the child through
    /// [`init`](Decorator::init), which starts its next run.
    pub(crate) fn tick(&self, child_status: NodeStatus) -> NodeStatus {
        use NodeStatus::*;

        if !child_status.is_terminal() {
            return Running;
        }

        match (self.kind, child_status) {
            (DecoratorKind::Invert, Success) => Failure,
            (DecoratorKind::Invert, _) => Success,
            (DecoratorKind::Succeed, _) => Success,
            (DecoratorKind::Fail, _) => Failure,
            (DecoratorKind::RepeatUntilFail, Success) => RunningWithNewChildren,
            (DecoratorKind::RepeatUntilFail, _) => Success,
            (DecoratorKind::RepeatUntilSuccess, Success) => Success,
            (DecoratorKind::RepeatUntilSuccess, _) => RunningWithNewChildren,
        }
    }
}
