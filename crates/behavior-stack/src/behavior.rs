//! Leaf behavior trait.
//!
//! This module defines the [`Behavior`] trait, the only extension point where
//! domain-specific behavior is plugged into a tree. The trait is generic over
//! a context type `C`, declared by the integrator (an agent handle, shared
//! blackboard values, ...), which the engine passes through untouched.

use std::collections::BTreeMap;

use crate::Status;

/// Named numeric parameters carried by a leaf in a flat tree definition.
pub type LeafParams = BTreeMap<String, f32>;

/// A leaf node: terminal behavior with no children.
///
/// Leaves hold per-agent mutable state, so every agent owns its own copy of
/// each leaf. Implementors only need `Clone`; [`BehaviorClone`] is provided
/// by a blanket impl.
pub trait Behavior<C>: BehaviorClone<C> + Send {
    /// Prepare a fresh run under the given context.
    ///
    /// Called exactly once each time the leaf becomes active, before its first
    /// [`tick`](Behavior::tick) of that run.
    fn init(&mut self, _ctx: &mut C) {}

    /// Advance the behavior by one frame.
    ///
    /// # Returns
    ///
    /// - `Status::Running` if the behavior needs more frames
    /// - `Status::Success` / `Status::Failure` when the run is over
    fn tick(&mut self, ctx: &mut C) -> Status;

    /// Type name used when the leaf is written to or read from a definition.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Parameters written alongside the type name in a definition.
    fn params(&self) -> LeafParams {
        LeafParams::new()
    }
}

/// Object-safe cloning for boxed behaviors.
pub trait BehaviorClone<C> {
    fn clone_box(&self) -> Box<dyn Behavior<C>>;
}

impl<C, T> BehaviorClone<C> for T
where
    T: Behavior<C> + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Behavior<C>> {
        Box::new(self.clone())
    }
}

impl<C> Clone for Box<dyn Behavior<C>> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
