//! Flat tree definitions: a node list plus child indices.
//!
//! This is the form external tools (editors, asset files) exchange trees in.
//! Interior nodes are reconstructed from their type name alone; leaves are
//! looked up in a [`LeafRegistry`] supplied by the integrator. Only the tree's
//! structure is stored, never execution state.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "type": "Selector", "children": [1, 2] },
//!     { "type": "Probability", "params": { "probability": 0.25 } },
//!     { "type": "NullNode" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::behavior::LeafParams;
use crate::composite::{Compositor, CompositorKind};
use crate::decorator::{Decorator, DecoratorKind};
use crate::error::{BuildError, Result};
use crate::leaves::{NullNode, Probability};
use crate::parallel::{Parallel, ParallelKind};
use crate::{Behavior, Node, NodeId, Tree};

/// One node of a flat definition.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRecord {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_name: String,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<usize>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "LeafParams::is_empty"))]
    pub params: LeafParams,
}

impl NodeRecord {
    pub fn new(type_name: impl Into<String>, children: Vec<usize>) -> Self {
        Self {
            type_name: type_name.into(),
            children,
            params: LeafParams::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f32) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// A tree in flat form. The first record is the root.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeDefinition {
    pub nodes: Vec<NodeRecord>,
}

impl<C> Tree<C> {
    /// Flattens this tree into records, keeping arena order.
    ///
    /// Ids are remapped so that the root becomes record 0.
    pub fn to_definition(&self) -> TreeDefinition {
        let root = self.root().index();
        // Swap the root into slot 0.
        let remap = |index: usize| match index {
            i if i == root => 0,
            0 => root,
            i => i,
        };

        let mut nodes = vec![NodeRecord::default(); self.len()];
        for (id, node) in self.nodes() {
            let params = match node {
                Node::Leaf(leaf) => leaf.params(),
                _ => LeafParams::new(),
            };
            nodes[remap(id.index())] = NodeRecord {
                type_name: node.type_name().to_string(),
                children: node.children().iter().map(|child| remap(child.index())).collect(),
                params,
            };
        }

        TreeDefinition { nodes }
    }
}

type LeafFactory<C> = Box<dyn Fn(&LeafParams) -> Result<Box<dyn Behavior<C>>>>;

/// Maps leaf type names to constructors.
///
/// `NullNode` and `Probability` are registered by [`LeafRegistry::new`].
/// Decorator, compositor and parallel names are built in and cannot be
/// overridden.
pub struct LeafRegistry<C> {
    factories: HashMap<String, LeafFactory<C>>,
}

impl<C: 'static> LeafRegistry<C> {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("NullNode", |_| Ok(NullNode));
        registry.register("Probability", Probability::from_params);
        registry
    }

    /// A registry with no leaves at all.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for leaf type `name`.
    pub fn register<B, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        B: Behavior<C> + 'static,
        F: Fn(&LeafParams) -> Result<B> + 'static,
    {
        let boxed: LeafFactory<C> = Box::new(move |params: &LeafParams| {
            factory(params).map(|leaf| Box::new(leaf) as Box<dyn Behavior<C>>)
        });
        self.factories.insert(name.into(), boxed);
        self
    }

    /// Registers a leaf that is cloned from `prototype` for every record.
    pub fn register_prototype<B>(&mut self, name: impl Into<String>, prototype: B) -> &mut Self
    where
        B: Behavior<C> + Clone + 'static,
    {
        self.register(name, move |_| Ok(prototype.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Reconstructs a validated tree from `definition`.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] for unknown type names, wrong child counts,
    /// leaf parameter problems, or anything [`Tree::from_nodes`] rejects.
    pub fn build(&self, definition: &TreeDefinition) -> Result<Tree<C>> {
        let nodes = definition
            .nodes
            .iter()
            .enumerate()
            .map(|(index, record)| self.build_node(index, record))
            .collect::<Result<Vec<_>>>()?;

        Tree::from_nodes(nodes, NodeId::new(0))
    }

    fn build_node(&self, index: usize, record: &NodeRecord) -> Result<Node<C>> {
        let name = record.type_name.as_str();
        let children: Vec<NodeId> = record.children.iter().copied().map(NodeId::new).collect();

        if let Ok(kind) = name.parse::<DecoratorKind>() {
            return match children.as_slice() {
                [child] => Ok(Node::Decorator(Decorator::new(kind, *child))),
                _ => Err(BuildError::DecoratorArity {
                    node: index,
                    found: children.len(),
                }),
            };
        }
        if let Ok(kind) = name.parse::<CompositorKind>() {
            return Ok(Node::Compositor(Compositor::new(kind, children)));
        }
        if let Ok(kind) = name.parse::<ParallelKind>() {
            return Ok(Node::Parallel(Parallel::new(kind, children)));
        }

        let factory = self.factories.get(name).ok_or_else(|| BuildError::UnknownNodeType {
            node: index,
            type_name: name.to_string(),
        })?;
        if !children.is_empty() {
            return Err(BuildError::LeafWithChildren {
                node: index,
                found: children.len(),
            });
        }

        tracing::trace!(node = index, leaf = name, "constructed leaf from definition");
        factory(&record.params).map(Node::Leaf)
    }
}

impl<C: 'static> Default for LeafRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for LeafRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("LeafRegistry").field("leaves", &names).finish()
    }
}
