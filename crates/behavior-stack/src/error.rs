//! Errors raised while constructing a tree.
//!
//! Only structural misconfiguration is an error. A leaf failing is the
//! ordinary [`Status::Failure`](crate::Status::Failure), and engine protocol
//! violations panic.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("root index {root} is out of bounds for {len} nodes")]
    RootOutOfBounds { root: usize, len: usize },

    #[error("{kind} node {node} has no children")]
    EmptyComposite { node: usize, kind: String },

    #[error("decorator node {node} needs exactly one child, found {found}")]
    DecoratorArity { node: usize, found: usize },

    #[error("leaf node {node} cannot have children, found {found}")]
    LeafWithChildren { node: usize, found: usize },

    #[error("node {node} references child {child}, but the tree has {len} nodes")]
    ChildOutOfBounds { node: usize, child: usize, len: usize },

    #[error("node {child} is the root or has more than one parent")]
    SharedChild { child: usize },

    #[error("node {node} is not reachable from the root")]
    Unreachable { node: usize },

    #[error("node {node} has unknown type {type_name:?}")]
    UnknownNodeType { node: usize, type_name: String },

    #[error("leaf {type_name:?} is missing parameter {param:?}")]
    MissingParam { type_name: String, param: String },

    #[error("leaf {type_name:?} parameter {param:?} is out of range: {value}")]
    InvalidParam {
        type_name: String,
        param: String,
        value: f32,
    },
}
