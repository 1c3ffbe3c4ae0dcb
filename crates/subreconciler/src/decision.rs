//! Flow decisions: the control-flow value every subreconciler produces.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StepError;

/// The outcome a subreconciler signals to the sequential runner.
///
/// `FlowDecision` is control flow as data: instead of implicit returns or
/// panics, every step reports exactly one of these cases and the runner and
/// evaluator act on it. A decision carries at most one reschedule directive
/// (none / immediate / delayed) and at most one error; the two axes are
/// independent.
///
/// [`Continue`](Self::Continue) is the identity for chaining: a sequence of
/// all-`Continue` decisions is equivalent to never having halted. Every other
/// case is terminal for the current invocation - once produced, no further
/// step runs.
///
/// There is deliberately no delayed-requeue-with-error case. An error already
/// lets the scheduler apply its own backoff policy; pairing it with a fixed
/// delay would let a step fight that policy. A step that wants both should
/// pick one axis: [`RequeueAfter`](Self::RequeueAfter) if the delay matters,
/// [`RequeueWithError`](Self::RequeueWithError) if the error does.
#[derive(Debug)]
pub enum FlowDecision {
    /// Proceed to the next step; no requeue, no error.
    Continue,

    /// Halt the whole reconciliation now; no requeue, no error.
    ///
    /// For organically terminal states, e.g. the managed object no longer
    /// exists. "Not found" is an expected steady state, not a fault.
    Stop,

    /// Halt now and surface the error to the caller.
    StopWithError(StepError),

    /// Halt now and ask the scheduler to re-invoke immediately.
    Requeue,

    /// Halt now and ask the scheduler to re-invoke after the delay.
    RequeueAfter(Duration),

    /// Halt now, ask for immediate re-invocation, and surface the error.
    RequeueWithError(StepError),
}

impl FlowDecision {
    /// Halt now and surface `err` to the caller.
    pub fn stop_with_error(err: impl Into<StepError>) -> Self {
        Self::StopWithError(err.into())
    }

    /// Halt now and ask the scheduler to re-invoke after `delay`.
    ///
    /// `Duration` is unsigned, so a negative delay is unrepresentable.
    pub const fn requeue_after(delay: Duration) -> Self {
        Self::RequeueAfter(delay)
    }

    /// Halt now, ask for immediate re-invocation, and surface `err`.
    pub fn requeue_with_error(err: impl Into<StepError>) -> Self {
        Self::RequeueWithError(err.into())
    }

    /// Whether this decision halts the step sequence.
    ///
    /// `false` only for [`Continue`](Self::Continue). This is the single
    /// point of truth for halting; the runner and any hand-written step
    /// sequence must go through it rather than matching variants ad hoc.
    pub const fn should_halt(&self) -> bool {
        !matches!(self, Self::Continue)
    }

    /// Convert this decision into the terminal pair the outer reconcile
    /// entry point returns to its scheduler.
    ///
    /// Total over all variants; the reschedule directive and the error are
    /// orthogonal, so an error can be surfaced without forcing a reschedule
    /// policy. `Continue` and `Stop` both evaluate to `(Requeue::None, None)`;
    /// only [`should_halt`](Self::should_halt) distinguishes them.
    pub fn evaluate(self) -> (Requeue, Option<StepError>) {
        match self {
            Self::Continue | Self::Stop => (Requeue::None, None),
            Self::StopWithError(err) => (Requeue::None, Some(err)),
            Self::Requeue => (Requeue::Immediate, None),
            Self::RequeueAfter(delay) => (Requeue::After(delay), None),
            Self::RequeueWithError(err) => (Requeue::Immediate, Some(err)),
        }
    }

    /// Short label for structured log fields.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Stop => "stop",
            Self::StopWithError(_) => "stop_with_error",
            Self::Requeue => "requeue",
            Self::RequeueAfter(_) => "requeue_after",
            Self::RequeueWithError(_) => "requeue_with_error",
        }
    }
}

impl fmt::Display for FlowDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Stop => write!(f, "stop"),
            Self::StopWithError(err) => write!(f, "stop with error: {err}"),
            Self::Requeue => write!(f, "requeue immediately"),
            Self::RequeueAfter(delay) => write!(f, "requeue after {delay:?}"),
            Self::RequeueWithError(err) => write!(f, "requeue immediately with error: {err}"),
        }
    }
}

/// The reschedule directive handed to the external scheduler.
///
/// The scheduler interprets it: `None` triggers no further action this cycle,
/// `Immediate` re-invokes the reconcile entry point as soon as feasible,
/// `After` re-invokes no earlier than the given delay. How soon a directive
/// is honored is entirely the scheduler's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requeue {
    /// No further action this cycle.
    None,
    /// Re-invoke as soon as feasible.
    Immediate,
    /// Re-invoke no earlier than the given delay.
    After(Duration),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_only_continue_proceeds() {
        assert!(!FlowDecision::Continue.should_halt());
        assert!(FlowDecision::Stop.should_halt());
        assert!(FlowDecision::stop_with_error("boom").should_halt());
        assert!(FlowDecision::Requeue.should_halt());
        assert!(FlowDecision::requeue_after(Duration::from_secs(5)).should_halt());
        assert!(FlowDecision::requeue_with_error("boom").should_halt());
    }

    #[test]
    fn test_evaluate_continue_and_stop_are_identical() {
        let (requeue, err) = FlowDecision::Continue.evaluate();
        assert_eq!(requeue, Requeue::None);
        assert!(err.is_none());

        let (requeue, err) = FlowDecision::Stop.evaluate();
        assert_eq!(requeue, Requeue::None);
        assert!(err.is_none());

        // Only the halt predicate tells them apart.
        assert!(!FlowDecision::Continue.should_halt());
        assert!(FlowDecision::Stop.should_halt());
    }

    #[test]
    fn test_evaluate_stop_with_error() {
        let (requeue, err) = FlowDecision::stop_with_error("read failed").evaluate();
        assert_eq!(requeue, Requeue::None);
        assert_eq!(err.unwrap().to_string(), "read failed");
    }

    #[test]
    fn test_evaluate_requeue() {
        let (requeue, err) = FlowDecision::Requeue.evaluate();
        assert_eq!(requeue, Requeue::Immediate);
        assert!(err.is_none());
    }

    #[test]
    fn test_evaluate_requeue_after() {
        let delay = Duration::from_secs(60);
        let (requeue, err) = FlowDecision::requeue_after(delay).evaluate();
        assert_eq!(requeue, Requeue::After(delay));
        assert!(err.is_none());
    }

    #[test]
    fn test_evaluate_requeue_with_error() {
        let (requeue, err) = FlowDecision::requeue_with_error("conflict").evaluate();
        assert_eq!(requeue, Requeue::Immediate);
        assert_eq!(err.unwrap().to_string(), "conflict");
    }

    #[test]
    fn test_kind_and_display() {
        let decision = FlowDecision::requeue_after(Duration::from_secs(60));
        assert_eq!(decision.kind(), "requeue_after");
        assert_eq!(decision.to_string(), "requeue after 60s");

        let decision = FlowDecision::stop_with_error("boom");
        assert_eq!(decision.kind(), "stop_with_error");
        assert!(decision.to_string().contains("boom"));
    }

    #[test]
    fn test_requeue_serialization() {
        let requeue = Requeue::After(Duration::from_secs(30));
        let json = serde_json::to_string(&requeue).unwrap();
        let back: Requeue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, requeue);
    }
}
