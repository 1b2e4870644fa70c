//! Frame-by-frame scenarios for the execution stack, decorators and compositors.

mod common;

use behavior_stack::builder::*;
use behavior_stack::{BehaviorTree, Status, Tree};
use common::{Countdown, Event, PerRun, Trace, fails, init_tracing, runs_forever, succeeds};

fn start(tree: &Tree<Trace>) -> (BehaviorTree<Trace>, Trace) {
    init_tracing();
    let mut ctx = Trace::default();
    let mut instance = tree.instantiate();
    instance.init(&mut ctx);
    (instance, ctx)
}

fn run(instance: &mut BehaviorTree<Trace>, ctx: &mut Trace, frames: usize) -> Vec<Status> {
    (0..frames).map(|_| instance.tick(ctx)).collect()
}

#[test]
fn single_leaf_result_is_tree_result() {
    for outcome in [Status::Success, Status::Failure] {
        let tree = leaf(Countdown::new("a", 1, outcome)).build().unwrap();
        let (mut instance, mut ctx) = start(&tree);

        assert_eq!(instance.tick(&mut ctx), outcome);
        assert!(!instance.is_running());
        assert!(instance.active_path().is_empty());
        assert_eq!(ctx.events, [Event::Init("a"), Event::Tick("a")]);
    }
}

#[test]
#[should_panic(expected = "ticked after termination")]
fn ticking_a_finished_tree_panics() {
    let tree = leaf(succeeds("a")).build().unwrap();
    let (mut instance, mut ctx) = start(&tree);

    instance.tick(&mut ctx);
    instance.tick(&mut ctx);
}

#[test]
fn sequence_runs_one_child_per_frame() {
    let tree = sequence(vec![leaf(succeeds("a")), leaf(succeeds("b")), leaf(succeeds("c"))])
        .build()
        .unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(
        run(&mut instance, &mut ctx, 3),
        [Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(
        ctx.events,
        [
            Event::Init("a"),
            Event::Tick("a"),
            Event::Init("b"),
            Event::Tick("b"),
            Event::Init("c"),
            Event::Tick("c"),
        ]
    );
}

#[test]
fn sequence_stops_at_first_failure() {
    let tree = sequence(vec![leaf(fails("a")), leaf(succeeds("b"))]).build().unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(instance.tick(&mut ctx), Status::Failure);
    assert_eq!(ctx.inits("b"), 0);
    assert_eq!(ctx.ticks("b"), 0);
}

#[test]
fn selector_stops_at_first_success() {
    let tree = selector(vec![leaf(fails("a")), leaf(succeeds("b")), leaf(succeeds("c"))])
        .build()
        .unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(run(&mut instance, &mut ctx, 2), [Status::Running, Status::Success]);
    assert_eq!(ctx.ticked(), ["a", "b"]);
    assert_eq!(ctx.inits("c"), 0);
}

#[test]
fn selector_fails_when_every_child_fails() {
    let tree = selector(vec![leaf(fails("a")), leaf(fails("b"))]).build().unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(run(&mut instance, &mut ctx, 2), [Status::Running, Status::Failure]);
}

#[test]
fn double_inversion_is_transparent() {
    for outcome in [Status::Success, Status::Failure] {
        let tree = invert(invert(leaf(Countdown::new("a", 2, outcome)))).build().unwrap();
        let (mut instance, mut ctx) = start(&tree);

        assert_eq!(run(&mut instance, &mut ctx, 2), [Status::Running, outcome]);
    }
}

#[test]
fn succeed_and_fail_force_the_outcome() {
    for outcome in [Status::Success, Status::Failure] {
        let tree = succeed(leaf(Countdown::new("a", 1, outcome))).build().unwrap();
        let (mut instance, mut ctx) = start(&tree);
        assert_eq!(instance.tick(&mut ctx), Status::Success);

        let tree = fail(leaf(Countdown::new("a", 1, outcome))).build().unwrap();
        let (mut instance, mut ctx) = start(&tree);
        assert_eq!(instance.tick(&mut ctx), Status::Failure);
    }
}

#[test]
fn repeat_until_fail_restarts_child_each_success() {
    let child = PerRun::new("a", vec![Status::Success, Status::Success, Status::Failure]);
    let tree = repeat_until_fail(leaf(child)).build().unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(
        run(&mut instance, &mut ctx, 3),
        [Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(ctx.inits("a"), 3);
    assert_eq!(ctx.ticks("a"), 3);
}

#[test]
fn repeat_until_success_restarts_child_each_failure() {
    let child = PerRun::new("a", vec![Status::Failure, Status::Failure, Status::Success]);
    let tree = repeat_until_success(leaf(child)).build().unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(
        run(&mut instance, &mut ctx, 3),
        [Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(ctx.inits("a"), 3);
}

#[test]
fn running_leaf_keeps_the_active_path() {
    let tree = sequence(vec![invert(leaf(runs_forever("a"))), leaf(succeeds("b"))])
        .build()
        .unwrap();
    let (mut instance, mut ctx) = start(&tree);
    let path = instance.active_path().to_vec();

    for _ in 0..5 {
        assert_eq!(instance.tick(&mut ctx), Status::Running);
        assert_eq!(instance.active_path(), path.as_slice());
    }
    assert_eq!(ctx.inits("a"), 1);
    assert_eq!(ctx.ticks("a"), 5);
    assert_eq!(ctx.inits("b"), 0);
}

#[test]
fn completion_unwinds_through_nested_composites() {
    // Inner sequence and its parent both finish on the same frame.
    let tree = sequence(vec![sequence(vec![leaf(succeeds("a"))]), leaf(runs_forever("b"))])
        .build()
        .unwrap();
    let (mut instance, mut ctx) = start(&tree);

    assert_eq!(instance.tick(&mut ctx), Status::Running);
    let current = instance.current_leaf().unwrap();
    assert_eq!(instance.node_name(current), Some("b"));
    assert_eq!(instance.active_path().len(), 2);
    assert_eq!(ctx.ticks("b"), 0);

    assert_eq!(instance.tick(&mut ctx), Status::Running);
    assert_eq!(ctx.ticks("b"), 1);
}

#[test]
fn init_restarts_from_the_first_child() {
    let tree = sequence(vec![leaf(succeeds("a")), leaf(runs_forever("b"))])
        .build()
        .unwrap();
    let (mut instance, mut ctx) = start(&tree);

    instance.tick(&mut ctx);
    instance.tick(&mut ctx);
    let current = instance.current_leaf().unwrap();
    assert_eq!(instance.node_name(current), Some("b"));

    instance.init(&mut ctx);
    let current = instance.current_leaf().unwrap();
    assert_eq!(instance.node_name(current), Some("a"));
    assert_eq!(ctx.inits("a"), 2);
}

#[test]
fn agents_share_a_template_but_not_state() {
    let tree = sequence(vec![leaf(succeeds("a")), leaf(runs_forever("b"))])
        .build()
        .unwrap();
    let (mut first, mut first_ctx) = start(&tree);
    let (second, _) = start(&tree);

    first.tick(&mut first_ctx);

    assert_ne!(first.current_leaf(), second.current_leaf());
    assert_eq!(second.node_name(second.current_leaf().unwrap()), Some("a"));
}
