//! Lifecycle states of a single launch.

use std::fmt;

/// Where a launch is in its lifecycle.
///
/// ```text
/// Idle -> Creating -> AwaitingReady -> Active -> Terminating -> Terminated
/// ```
///
/// Any non-terminal state may jump straight to `Terminating`; `Creating` may
/// also end in `Terminated` when nothing was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Creating,
    AwaitingReady,
    Active,
    Terminating,
    Terminated,
}

impl LifecycleState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Terminated
    }

    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        use LifecycleState::{Active, AwaitingReady, Creating, Idle, Terminated, Terminating};
        match (self, next) {
            (Terminated, _) => false,
            (Terminating, Terminated) => true,
            (Terminating, _) => false,
            (_, Terminating) => true,
            (Idle, Creating)
            | (Creating, AwaitingReady | Terminated)
            | (AwaitingReady, Active) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Creating => "creating",
            Self::AwaitingReady => "awaiting-ready",
            Self::Active => "active",
            Self::Terminating => "terminating",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// What ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// SIGINT / SIGTERM / console close.
    Interrupted,
    /// The operator confirmed termination (Enter).
    Confirmed,
    /// Confirmation input closed (stdin EOF).
    InputClosed,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interrupted => "interrupt signal",
            Self::Confirmed => "confirmation",
            Self::InputClosed => "input closed",
        };
        f.write_str(name)
    }
}
