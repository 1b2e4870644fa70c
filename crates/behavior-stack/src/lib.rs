//! Re-entrant behavior tree engine driven by an explicit execution stack.
//!
//! Trees are evaluated once per frame, but not re-walked from the root: an
//! [`ExecutionStack`] remembers the active path and resumes exactly where the
//! previous frame left off, unwinding completions into parents and rebuilding
//! the path downward when a node switches to a new child.
//!
//! - **Multi-frame nodes**: leaves may report `Running` across many frames
//! - **Per-agent instances**: a [`Tree`] is a template; each agent owns a
//!   deep copy ([`BehaviorTree`]) with its own node state
//! - **Typed context**: the integrator's context type `C` flows to every
//!   leaf untouched by the engine
//!
//! # Architecture
//!
//! - [`Behavior`]: leaf extension trait
//! - [`Status`] / [`NodeStatus`]: leaf results and node-to-engine results
//! - Decorators: [`DecoratorKind`] (`Invert`, `Succeed`, `Fail`,
//!   `RepeatUntilFail`, `RepeatUntilSuccess`)
//! - Compositors: [`CompositorKind`] (`Sequence`, `Selector`)
//! - Parallel composites: [`ParallelKind`] (`SequenceParallel`)
//! - [`ExecutionStack`]: the tick/unwind/rebuild algorithm
//! - [`BehaviorTree`]: one agent's instance; [`AgentRunner`] drives it
//! - [`builder`] and [`definition`]: constructing and loading trees

#![forbid(unsafe_code)]

pub mod agent;
pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod definition;
pub mod error;
pub mod leaves;
pub mod node;
pub mod parallel;
pub mod stack;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use agent::{AgentRunner, AgentState, CompletionPolicy, RunnerConfig};
pub use behavior::{Behavior, BehaviorClone, LeafParams};
pub use builder::Blueprint;
pub use composite::{Compositor, CompositorKind};
pub use decorator::{Decorator, DecoratorKind};
pub use definition::{LeafRegistry, NodeRecord, TreeDefinition};
pub use error::{BuildError, Result};
pub use leaves::{NullNode, Probability, SubtreeLeaf};
pub use node::{Node, NodeId};
pub use parallel::{Parallel, ParallelKind};
pub use stack::ExecutionStack;
pub use status::{NodeStatus, Status};
pub use tree::{BehaviorTree, Tree};
