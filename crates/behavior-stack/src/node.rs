//! Node arena and the two-operation node contract.
//!
//! Every node in a tree lives in a flat [`Arena`] owned by that tree and is
//! addressed by [`NodeId`]. Cloning an arena deep-copies every node, so each
//! agent gets structurally distinct per-node state (cursors, leaf fields,
//! parallel subtrees) without any sharing.
//!
//! The contract the execution stack drives:
//! - `init(id) -> Option<NodeId>`: activate the node and name the next node on
//!   the active path, or `None` if the node is leaf-equivalent.
//! - `tick(id, child_status) -> NodeStatus`: advance the node given the status
//!   its active child just produced (`Success` for leaf-equivalents).

use std::fmt;

use crate::behavior::Behavior;
use crate::composite::Compositor;
use crate::decorator::Decorator;
use crate::parallel::{self, Parallel};
use crate::NodeStatus;

/// Position of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of a behavior tree.
pub enum Node<C> {
    /// Terminal domain behavior.
    Leaf(Box<dyn Behavior<C>>),
    /// Exactly one child, result transformed.
    Decorator(Decorator),
    /// Ordered children, one active at a time.
    Compositor(Compositor),
    /// Children run as independent subtrees, presented to the owner as a leaf.
    Parallel(Parallel),
}

impl<C> Node<C> {
    /// The name this node is written under in a flat definition.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Leaf(leaf) => leaf.type_name(),
            Node::Decorator(decorator) => decorator.kind().name(),
            Node::Compositor(compositor) => compositor.kind().name(),
            Node::Parallel(parallel) => parallel.kind().name(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf(_) => &[],
            Node::Decorator(decorator) => std::slice::from_ref(decorator.child_ref()),
            Node::Compositor(compositor) => compositor.children(),
            Node::Parallel(parallel) => parallel.children(),
        }
    }
}

impl<C> Clone for Node<C> {
    fn clone(&self) -> Self {
        match self {
            Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
            Node::Decorator(decorator) => Node::Decorator(decorator.clone()),
            Node::Compositor(compositor) => Node::Compositor(compositor.clone()),
            Node::Parallel(parallel) => Node::Parallel(parallel.clone()),
        }
    }
}

impl<C> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => f.debug_tuple("Leaf").field(&leaf.type_name()).finish(),
            Node::Decorator(decorator) => fmt::Debug::fmt(decorator, f),
            Node::Compositor(compositor) => fmt::Debug::fmt(compositor, f),
            Node::Parallel(parallel) => fmt::Debug::fmt(parallel, f),
        }
    }
}

/// Flat storage for the nodes of one tree.
pub(crate) struct Arena<C> {
    nodes: Vec<Node<C>>,
}

impl<C> Arena<C> {
    pub(crate) fn new(nodes: Vec<Node<C>>) -> Self {
        Self { nodes }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<C>> {
        self.nodes.get(id.index())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node<C>> {
        self.nodes.iter()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        &mut self.nodes[id.index()]
    }

    /// Activates `id` and returns the next node on the active path.
    pub(crate) fn init(&mut self, id: NodeId, ctx: &mut C) -> Option<NodeId> {
        if self.is_parallel(id) {
            parallel::init(self, id, ctx);
            return None;
        }

        match self.node_mut(id) {
            Node::Leaf(leaf) => {
                leaf.init(ctx);
                None
            }
            Node::Decorator(decorator) => decorator.init(),
            Node::Compositor(compositor) => compositor.init(),
            Node::Parallel(_) => None,
        }
    }

    /// Advances `id` with the status its active child just produced.
    pub(crate) fn tick(&mut self, id: NodeId, child_status: NodeStatus, ctx: &mut C) -> NodeStatus {
        if self.is_parallel(id) {
            assert_eq!(
                child_status,
                NodeStatus::Success,
                "parallel node {id} must be ticked as a leaf"
            );
            return parallel::tick(self, id, ctx).into();
        }

        match self.node_mut(id) {
            Node::Leaf(leaf) => leaf.tick(ctx).into(),
            Node::Decorator(decorator) => decorator.tick(child_status),
            Node::Compositor(compositor) => compositor.tick(child_status),
            Node::Parallel(_) => unreachable!("parallel nodes are dispatched above"),
        }
    }

    fn is_parallel(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.index()], Node::Parallel(_))
    }

    /// Clears the per-run cursors of `id` and everything below it.
    pub(crate) fn reset(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Node::Compositor(compositor) = self.node_mut(next) {
                compositor.reset();
            }
            pending.extend_from_slice(self.nodes[next.index()].children());
        }
    }
}

impl<C> Clone for Arena<C> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}
