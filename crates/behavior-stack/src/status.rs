//! Status values exchanged between nodes and the execution stack.

/// The result a leaf behavior (or a whole tree) reports for one tick.
///
/// # Frame Semantics
///
/// Unlike a turn-based tree where every action completes instantly, nodes here
/// may take many frames to finish:
/// - `Running` asks to be ticked again next frame, nothing else changes
/// - `Success` / `Failure` end the node's current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior completed successfully.
    Success,

    /// The behavior failed. This is an ordinary outcome, not an error.
    Failure,

    /// The behavior has not finished yet and must be ticked again.
    Running,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }

    /// Swaps `Success` and `Failure`, leaving `Running` untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

/// The status a node reports to the execution stack.
///
/// This is a superset of [`Status`]: interior nodes may additionally report
/// [`NodeStatus::RunningWithNewChildren`] when the child they want executed
/// next has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    /// The node's run ended successfully.
    Success,

    /// The node's run ended in failure.
    Failure,

    /// Tick again next cycle; the active path below this node is unchanged.
    Running,

    /// Still running, but the active path below this node changed. The
    /// execution stack re-derives the path through `init` before the next
    /// cycle.
    RunningWithNewChildren,
}

impl NodeStatus {
    /// Returns `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeStatus::Success | NodeStatus::Failure)
    }

    /// Narrows to a [`Status`], folding `RunningWithNewChildren` into `Running`.
    #[inline]
    pub fn settle(self) -> Status {
        match self {
            NodeStatus::Success => Status::Success,
            NodeStatus::Failure => Status::Failure,
            NodeStatus::Running | NodeStatus::RunningWithNewChildren => Status::Running,
        }
    }
}

impl From<Status> for NodeStatus {
    #[inline]
    fn from(status: Status) -> Self {
        match status {
            Status::Success => NodeStatus::Success,
            Status::Failure => NodeStatus::Failure,
            Status::Running => NodeStatus::Running,
        }
    }
}
