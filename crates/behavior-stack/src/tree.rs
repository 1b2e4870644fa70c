//! Tree templates and per-agent tree instances.

use std::collections::BTreeSet;

use crate::error::{BuildError, Result};
use crate::node::Arena;
use crate::{ExecutionStack, Node, NodeId, Status};

/// A validated, authored tree: an arena of nodes plus its root.
///
/// A `Tree` is a template. Agents never run it directly; each one gets its own
/// deep copy through [`Tree::instantiate`], because nodes carry per-agent
/// state.
pub struct Tree<C> {
    arena: Arena<C>,
    root: NodeId,
}

impl<C> Tree<C> {
    /// Validates `nodes` as a tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] when the nodes do not form a single tree
    /// (out-of-bounds or shared children, unreachable nodes) or when a node has
    /// the wrong number of children for its kind.
    pub fn from_nodes(nodes: Vec<Node<C>>, root: NodeId) -> Result<Self> {
        if nodes.is_empty() {
            return Err(BuildError::EmptyTree);
        }
        if root.index() >= nodes.len() {
            return Err(BuildError::RootOutOfBounds {
                root: root.index(),
                len: nodes.len(),
            });
        }

        let mut parents: Vec<Option<usize>> = vec![None; nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            let children = node.children();
            if children.is_empty() && !matches!(node, Node::Leaf(_)) {
                return Err(BuildError::EmptyComposite {
                    node: index,
                    kind: node.type_name().to_string(),
                });
            }

            for &child in children {
                let slot = parents.get_mut(child.index()).ok_or(BuildError::ChildOutOfBounds {
                    node: index,
                    child: child.index(),
                    len: nodes.len(),
                })?;
                if slot.is_some() || child == root {
                    return Err(BuildError::SharedChild {
                        child: child.index(),
                    });
                }
                *slot = Some(index);
            }
        }

        // Every node has at most one parent and the root has none, so a walk
        // from the root cannot revisit a node.
        let mut reached = BTreeSet::new();
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            reached.insert(id.index());
            pending.extend_from_slice(nodes[id.index()].children());
        }
        if let Some(node) = (0..nodes.len()).find(|index| !reached.contains(index)) {
            return Err(BuildError::Unreachable { node });
        }

        Ok(Self {
            arena: Arena::new(nodes),
            root,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<C>> {
        self.arena.get(id)
    }

    /// Nodes in arena order, paired with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<C>)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Deep-copies this template into an independent, not yet initialized
    /// instance.
    pub fn instantiate(&self) -> BehaviorTree<C> {
        BehaviorTree::new(self.clone())
    }
}

impl<C> Clone for Tree<C> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
        }
    }
}

impl<C> std::fmt::Debug for Tree<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.arena.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// One agent's running tree: its own nodes and the top-level execution stack.
///
/// # Protocol
///
/// Call [`init`](BehaviorTree::init) once, then [`tick`](BehaviorTree::tick)
/// once per frame. After a terminal status the owner decides whether to stop,
/// or to `init` again for a fresh run.
pub struct BehaviorTree<C> {
    tree: Tree<C>,
    stack: ExecutionStack,
}

impl<C> BehaviorTree<C> {
    /// Takes ownership of `tree`. Use [`Tree::instantiate`] to keep the
    /// template.
    pub fn new(tree: Tree<C>) -> Self {
        let stack = ExecutionStack::new(tree.root);
        Self { tree, stack }
    }

    /// Starts a fresh run from the root, discarding any run in progress.
    pub fn init(&mut self, ctx: &mut C) {
        self.stack = ExecutionStack::new(self.tree.root);
        self.stack.start(&mut self.tree.arena, ctx);
        tracing::debug!(
            root = %self.tree.root,
            depth = self.stack.active_path().len(),
            "behavior tree started"
        );
    }

    /// Runs one cycle and returns the root's status.
    ///
    /// # Panics
    ///
    /// Panics if the tree was never initialized or already returned a
    /// terminal status since its last `init`.
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        self.stack.tick(&mut self.tree.arena, ctx)
    }

    pub fn is_running(&self) -> bool {
        self.stack.is_running()
    }

    pub fn current_leaf(&self) -> Option<NodeId> {
        self.stack.current_leaf()
    }

    pub fn active_path(&self) -> &[NodeId] {
        self.stack.active_path()
    }

    pub fn tree(&self) -> &Tree<C> {
        &self.tree
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.tree.node(id).map(Node::type_name)
    }
}

impl<C> Clone for BehaviorTree<C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            stack: self.stack.clone(),
        }
    }
}
