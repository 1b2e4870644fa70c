//! General-purpose leaves that do not depend on any game domain.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::behavior::LeafParams;
use crate::error::{BuildError, Result};
use crate::{Behavior, BehaviorTree, Status, Tree};

/// Does nothing and succeeds immediately.
///
/// Placeholder for branches that are not authored yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNode;

impl<C> Behavior<C> for NullNode {
    fn tick(&mut self, _ctx: &mut C) -> Status {
        Status::Success
    }

    fn type_name(&self) -> &str {
        "NullNode"
    }
}

/// Succeeds with a fixed probability on each tick, fails otherwise.
#[derive(Debug, Clone)]
pub struct Probability {
    probability: f32,
    rng: StdRng,
}

impl Probability {
    pub const PARAM: &'static str = "probability";

    /// Creates a probability leaf seeded from the operating system.
    ///
    /// `probability` is clamped to `[0, 1]`.
    pub fn new(probability: f32) -> Self {
        Self::with_rng(probability, StdRng::from_entropy())
    }

    /// Creates a probability leaf with a deterministic random stream.
    pub fn seeded(probability: f32, seed: u64) -> Self {
        Self::with_rng(probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(probability: f32, rng: StdRng) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Reads the `probability` parameter of a flat definition record.
    pub fn from_params(params: &LeafParams) -> Result<Self> {
        let value = *params.get(Self::PARAM).ok_or_else(|| BuildError::MissingParam {
            type_name: "Probability".to_string(),
            param: Self::PARAM.to_string(),
        })?;
        if !(0.0..=1.0).contains(&value) {
            return Err(BuildError::InvalidParam {
                type_name: "Probability".to_string(),
                param: Self::PARAM.to_string(),
                value,
            });
        }
        Ok(Self::new(value))
    }
}

impl<C> Behavior<C> for Probability {
    fn tick(&mut self, _ctx: &mut C) -> Status {
        if self.rng.gen_range(0.0f32..1.0) < self.probability {
            Status::Success
        } else {
            Status::Failure
        }
    }

    fn type_name(&self) -> &str {
        "Probability"
    }

    fn params(&self) -> LeafParams {
        LeafParams::from([(Self::PARAM.to_string(), self.probability)])
    }
}

/// Runs a whole tree as a single leaf.
///
/// Every activation instantiates a fresh copy of the embedded template and
/// starts it with the caller's context, so reusable behaviors (patrol, flee,
/// ...) can be authored once and embedded in many trees.
pub struct SubtreeLeaf<C> {
    name: String,
    template: Tree<C>,
    instance: Option<BehaviorTree<C>>,
}

impl<C> SubtreeLeaf<C> {
    pub fn new(name: impl Into<String>, template: Tree<C>) -> Self {
        Self {
            name: name.into(),
            template,
            instance: None,
        }
    }

    /// The running copy, if the leaf has been activated.
    pub fn instance(&self) -> Option<&BehaviorTree<C>> {
        self.instance.as_ref()
    }
}

impl<C> Clone for SubtreeLeaf<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            template: self.template.clone(),
            instance: self.instance.clone(),
        }
    }
}

impl<C: 'static> Behavior<C> for SubtreeLeaf<C> {
    fn init(&mut self, ctx: &mut C) {
        let mut instance = self.template.instantiate();
        instance.init(ctx);
        self.instance = Some(instance);
    }

    fn tick(&mut self, ctx: &mut C) -> Status {
        match self.instance.as_mut() {
            Some(instance) => instance.tick(ctx),
            None => panic!("subtree leaf {:?} ticked before init", self.name),
        }
    }

    fn type_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{leaf, sequence};

    struct TestContext {
        value: i32,
    }

    #[derive(Clone)]
    struct Increment;

    impl Behavior<TestContext> for Increment {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    #[test]
    fn probability_extremes_are_deterministic() {
        let mut ctx = TestContext { value: 0 };
        let mut never = Probability::seeded(0.0, 7);
        let mut always = Probability::seeded(1.0, 7);
        for _ in 0..32 {
            assert_eq!(Behavior::<TestContext>::tick(&mut never, &mut ctx), Status::Failure);
            assert_eq!(Behavior::<TestContext>::tick(&mut always, &mut ctx), Status::Success);
        }
    }

    #[test]
    fn probability_params_are_validated() {
        let params = LeafParams::from([("probability".to_string(), 1.5)]);
        assert!(matches!(
            Probability::from_params(&params),
            Err(BuildError::InvalidParam { .. })
        ));
        assert!(matches!(
            Probability::from_params(&LeafParams::new()),
            Err(BuildError::MissingParam { .. })
        ));
    }

    #[test]
    fn subtree_restarts_on_every_init() {
        let template = sequence(vec![leaf(Increment), leaf(Increment)]).build().unwrap();
        let mut subtree = SubtreeLeaf::new("Twice", template);
        let mut ctx = TestContext { value: 0 };

        subtree.init(&mut ctx);
        assert_eq!(subtree.tick(&mut ctx), Status::Running);
        assert_eq!(subtree.tick(&mut ctx), Status::Success);

        subtree.init(&mut ctx);
        assert_eq!(subtree.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 3);
        assert_eq!(Behavior::<TestContext>::type_name(&subtree), "Twice");
    }
}
