//! Builder utilities for ergonomic behavior tree construction.
//!
//! Trees live in a flat arena, which is awkward to write by hand. This module
//! provides a nested [`Blueprint`] and shorthand functions such as
//! `sequence(vec![...])` that flatten into a validated [`Tree`].
//!
//! # Example
//!
//! ```rust,ignore
//! use behavior_stack::builder::*;
//!
//! let tree = selector(vec![
//!     sequence(vec![leaf(IsEnemyVisible), leaf(Attack)]),
//!     repeat_until_fail(leaf(Patrol::default())),
//! ])
//! .build()?;
//! ```

use crate::composite::{Compositor, CompositorKind};
use crate::decorator::{Decorator, DecoratorKind};
use crate::error::Result;
use crate::parallel::{Parallel, ParallelKind};
use crate::{Behavior, Node, NodeId, Tree};

/// Nested description of a tree, flattened by [`Blueprint::build`].
pub enum Blueprint<C> {
    Leaf(Box<dyn Behavior<C>>),
    Decorator(DecoratorKind, Box<Blueprint<C>>),
    Compositor(CompositorKind, Vec<Blueprint<C>>),
    Parallel(ParallelKind, Vec<Blueprint<C>>),
}

impl<C> Blueprint<C> {
    /// Flattens into an arena in pre-order (the root gets id 0) and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::EmptyComposite`](crate::BuildError::EmptyComposite)
    /// if any compositor or parallel node has no children.
    pub fn build(self) -> Result<Tree<C>> {
        let mut nodes = Vec::new();
        let root = self.flatten(&mut nodes);
        Tree::from_nodes(nodes, root)
    }

    fn flatten(self, nodes: &mut Vec<Node<C>>) -> NodeId {
        let id = NodeId::new(nodes.len());

        match self {
            Blueprint::Leaf(behavior) => nodes.push(Node::Leaf(behavior)),
            Blueprint::Decorator(kind, child) => {
                // Reserve the slot so the parent precedes its child.
                nodes.push(Node::Decorator(Decorator::new(kind, id)));
                let child = child.flatten(nodes);
                nodes[id.index()] = Node::Decorator(Decorator::new(kind, child));
            }
            Blueprint::Compositor(kind, children) => {
                nodes.push(Node::Compositor(Compositor::new(kind, Vec::new())));
                let children = children.into_iter().map(|child| child.flatten(nodes)).collect();
                nodes[id.index()] = Node::Compositor(Compositor::new(kind, children));
            }
            Blueprint::Parallel(kind, children) => {
                nodes.push(Node::Parallel(Parallel::new(kind, Vec::new())));
                let children = children.into_iter().map(|child| child.flatten(nodes)).collect();
                nodes[id.index()] = Node::Parallel(Parallel::new(kind, children));
            }
        }

        id
    }
}

/// Creates a leaf node from a behavior.
#[inline]
pub fn leaf<C, B>(behavior: B) -> Blueprint<C>
where
    B: Behavior<C> + 'static,
{
    Blueprint::Leaf(Box::new(behavior))
}

/// Creates a sequence node.
#[inline]
pub fn sequence<C>(children: Vec<Blueprint<C>>) -> Blueprint<C> {
    Blueprint::Compositor(CompositorKind::Sequence, children)
}

/// Creates a selector node.
#[inline]
pub fn selector<C>(children: Vec<Blueprint<C>>) -> Blueprint<C> {
    Blueprint::Compositor(CompositorKind::Selector, children)
}

/// Creates a sequence-parallel node.
#[inline]
pub fn sequence_parallel<C>(children: Vec<Blueprint<C>>) -> Blueprint<C> {
    Blueprint::Parallel(ParallelKind::SequenceParallel, children)
}

/// Wraps `child` in a decorator of the given kind.
#[inline]
pub fn decorate<C>(kind: DecoratorKind, child: Blueprint<C>) -> Blueprint<C> {
    Blueprint::Decorator(kind, Box::new(child))
}

/// Creates an inverter node.
#[inline]
pub fn invert<C>(child: Blueprint<C>) -> Blueprint<C> {
    decorate(DecoratorKind::Invert, child)
}

/// Creates an always-succeed node.
#[inline]
pub fn succeed<C>(child: Blueprint<C>) -> Blueprint<C> {
    decorate(DecoratorKind::Succeed, child)
}

/// Creates an always-fail node.
#[inline]
pub fn fail<C>(child: Blueprint<C>) -> Blueprint<C> {
    decorate(DecoratorKind::Fail, child)
}

/// Repeats `child` until it fails.
#[inline]
pub fn repeat_until_fail<C>(child: Blueprint<C>) -> Blueprint<C> {
    decorate(DecoratorKind::RepeatUntilFail, child)
}

/// Repeats `child` until it succeeds.
#[inline]
pub fn repeat_until_success<C>(child: Blueprint<C>) -> Blueprint<C> {
    decorate(DecoratorKind::RepeatUntilSuccess, child)
}
