//! Per-agent driver.
//!
//! [`AgentRunner`] is the thin loop that owns one tree instance and one
//! context, ticks the tree once per frame, and applies a [`CompletionPolicy`]
//! when the tree finishes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BehaviorTree, NodeId, Status, Tree};

/// What the runner does when its tree reports `Success` or `Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompletionPolicy {
    /// Stop ticking and keep reporting the final status.
    #[default]
    Stop,
    /// Re-initialize the tree and keep running.
    Restart,
}

/// Runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunnerConfig {
    pub on_complete: CompletionPolicy,
    /// Upper bound on restarts under [`CompletionPolicy::Restart`]; `None`
    /// restarts forever.
    pub max_restarts: Option<u32>,
}

impl RunnerConfig {
    /// Restart forever.
    pub fn looping() -> Self {
        Self {
            on_complete: CompletionPolicy::Restart,
            max_restarts: None,
        }
    }
}

/// Observable state of an agent after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Running,
    Finished(Status),
}

/// Owns one agent's tree instance and context.
pub struct AgentRunner<C> {
    tree: BehaviorTree<C>,
    context: C,
    config: RunnerConfig,
    frames: u64,
    restarts: u32,
    finished: Option<Status>,
}

impl<C> AgentRunner<C> {
    /// Instantiates `template` for this agent and starts it.
    pub fn spawn(template: &Tree<C>, context: C, config: RunnerConfig) -> Self {
        let mut runner = Self {
            tree: template.instantiate(),
            context,
            config,
            frames: 0,
            restarts: 0,
            finished: None,
        };
        runner.tree.init(&mut runner.context);
        runner
    }

    /// Advances the agent by one frame.
    ///
    /// Once the agent has finished, further calls do not tick the tree and
    /// keep returning the final state.
    pub fn update(&mut self) -> AgentState {
        if let Some(status) = self.finished {
            return AgentState::Finished(status);
        }

        self.frames += 1;
        let status = self.tree.tick(&mut self.context);
        if !status.is_terminal() {
            return AgentState::Running;
        }

        let may_restart = self.config.on_complete == CompletionPolicy::Restart
            && self.config.max_restarts.is_none_or(|max| self.restarts < max);

        if may_restart {
            self.restarts += 1;
            tracing::debug!(
                frame = self.frames,
                ?status,
                restarts = self.restarts,
                "agent tree completed, restarting"
            );
            self.tree.init(&mut self.context);
            return AgentState::Running;
        }

        tracing::info!(frame = self.frames, ?status, "agent tree exited");
        self.finished = Some(status);
        AgentState::Finished(status)
    }

    pub fn state(&self) -> AgentState {
        match self.finished {
            Some(status) => AgentState::Finished(status),
            None => AgentState::Running,
        }
    }

    /// Frames ticked so far (finished frames are not counted).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn current_leaf(&self) -> Option<NodeId> {
        self.tree.current_leaf()
    }

    pub fn active_path(&self) -> &[NodeId] {
        self.tree.active_path()
    }

    pub fn tree(&self) -> &BehaviorTree<C> {
        &self.tree
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}
