//! The step contract every subreconciler satisfies.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::decision::FlowDecision;
use crate::request::Request;

/// One independent unit of reconciliation logic.
///
/// A subreconciler is a reconciler in miniature, not a stage in a data
/// pipeline. The contract:
///
/// - **Independence**: never assume a shared, pre-fetched representation of
///   the managed resource. If the step needs current state, it re-reads it
///   through the client carried by `ctx`.
/// - **Idempotence**: running the same step twice with no intervening
///   external change produces an equivalent decision and no duplicated side
///   effects.
/// - **Errors are values**: a recoverable failure becomes
///   [`FlowDecision::StopWithError`] or [`FlowDecision::RequeueWithError`],
///   never a panic or out-of-band propagation. A benign "not found" (the
///   resource was deleted) maps to [`FlowDecision::Stop`], not an error.
/// - **Cancellation**: the runner never cancels a step on its behalf. A step
///   observes cancellation through whatever its context carries and returns
///   promptly with an appropriate decision, typically a requeue or an error.
///
/// Return [`FlowDecision::Continue`] to let the runner proceed; any other
/// decision halts the whole invocation for this cycle.
///
/// `C` is the invocation context the outer reconcile entry point owns
/// (client handles, cancellation, whatever the operator needs). It is passed
/// explicitly so unit tests can stub it.
#[async_trait]
pub trait Subreconciler<C>: Send + Sync
where
    C: Send + Sync,
{
    /// Step name for log fields. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Run this step for one reconcile cycle.
    async fn reconcile(&self, ctx: &C, req: &Request) -> FlowDecision;
}

/// A named function value satisfying the step contract.
///
/// Lets a step be a plain async function instead of a dedicated type:
///
/// ```ignore
/// use futures::future::BoxFuture;
/// use subreconciler::{FlowDecision, FnSubreconciler, Request};
///
/// fn check_deletion<'a>(ctx: &'a Ctx, req: &'a Request) -> BoxFuture<'a, FlowDecision> {
///     Box::pin(async move {
///         match ctx.client.get(req).await {
///             Ok(_) => FlowDecision::Continue,
///             Err(e) if e.is_not_found() => FlowDecision::Stop,
///             Err(e) => FlowDecision::stop_with_error(e),
///         }
///     })
/// }
///
/// let step = FnSubreconciler::new("check_deletion", check_deletion);
/// ```
pub struct FnSubreconciler<F> {
    name: String,
    f: F,
}

impl<F> FnSubreconciler<F> {
    /// Wrap `f` as a subreconciler with the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<C, F> Subreconciler<C> for FnSubreconciler<F>
where
    C: Send + Sync,
    F: for<'a> Fn(&'a C, &'a Request) -> BoxFuture<'a, FlowDecision> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn reconcile(&self, ctx: &C, req: &Request) -> FlowDecision {
        (self.f)(ctx, req).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    struct NoopStep;

    #[async_trait]
    impl Subreconciler<()> for NoopStep {
        async fn reconcile(&self, _ctx: &(), _req: &Request) -> FlowDecision {
            FlowDecision::Continue
        }
    }

    fn always_stop<'a>(_ctx: &'a (), _req: &'a Request) -> BoxFuture<'a, FlowDecision> {
        Box::pin(async { FlowDecision::Stop })
    }

    fn step_name<C, S>(step: &S) -> &str
    where
        C: Send + Sync,
        S: Subreconciler<C>,
    {
        step.name()
    }

    #[tokio::test]
    async fn test_default_name_is_type_name() {
        let step = NoopStep;
        assert!(step_name::<(), _>(&step).contains("NoopStep"));
    }

    #[tokio::test]
    async fn test_fn_subreconciler() {
        let step = FnSubreconciler::new("always_stop", always_stop);
        assert_eq!(step_name::<(), _>(&step), "always_stop");

        let req = Request::new("widget-a");
        let decision = step.reconcile(&(), &req).await;
        assert!(matches!(decision, FlowDecision::Stop));
    }
}
