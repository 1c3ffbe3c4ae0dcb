//! Flow control for composing level-triggered reconciliation loops.
//!
//! This crate decomposes an operator's single large reconcile operation into
//! an ordered sequence of independent steps ("subreconcilers"). Each step
//! signals one of a small set of outcomes and the runner chains them with
//! first-halt-wins semantics:
//!
//! - **Flow decisions**: control flow as data - continue, stop, stop with
//!   error, requeue now, requeue after a delay, requeue with error
//! - **Halt predicate**: the single point of truth for "does this decision
//!   end the cycle"
//! - **Evaluator**: converts a decision into the `(Requeue, error)` pair the
//!   outer entry point returns to its scheduler
//! - **Sequential runner**: runs steps strictly in order and short-circuits
//!   on the first non-continue decision
//!
//! Retries, backoff, and timers live in the external scheduler; this crate
//! only expresses intent.
//!
//! # Example
//!
//! ```ignore
//! use subreconciler::{FlowDecision, Request, Sequence, Subreconciler};
//!
//! async fn reconcile(ctx: &Ctx, req: Request) -> (subreconciler::Requeue, Option<subreconciler::StepError>) {
//!     let steps = Sequence::new("widget")
//!         .with_step(CheckDeletion)
//!         .with_step(EnsureFinalizer)
//!         .with_step(ApplyDesiredState)
//!         .with_step(UpdateStatus);
//!
//!     steps.run(ctx, &req).await.evaluate()
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod decision;
pub mod error;
pub mod request;
pub mod runner;
pub mod subreconciler;

// Re-export main types
pub use decision::{FlowDecision, Requeue};
pub use error::{RequestError, Result, StepError};
pub use request::Request;
pub use runner::{run_subreconcilers, Sequence};
pub use subreconciler::{FnSubreconciler, Subreconciler};
