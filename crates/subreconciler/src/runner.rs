//! Sequential runner: chains subreconcilers with first-halt-wins semantics.

use async_trait::async_trait;
use tracing::debug;

use crate::decision::FlowDecision;
use crate::request::Request;
use crate::subreconciler::Subreconciler;

/// Run `steps` strictly in order, short-circuiting on the first halt.
///
/// Each step runs once, to completion, on the calling task. The first
/// decision for which [`FlowDecision::should_halt`] is true is returned
/// verbatim and no later step runs this cycle. An exhausted list returns
/// [`FlowDecision::Continue`].
///
/// The runner holds no state and never retries; requeue intent travels only
/// in the returned decision.
pub async fn run_subreconcilers<C>(
    steps: &[Box<dyn Subreconciler<C>>],
    ctx: &C,
    req: &Request,
) -> FlowDecision
where
    C: Send + Sync,
{
    for step in steps {
        debug!(step = step.name(), request = %req, "running subreconciler");
        let decision = step.reconcile(ctx, req).await;
        if decision.should_halt() {
            debug!(
                step = step.name(),
                request = %req,
                decision = decision.kind(),
                "subreconciler halted the cycle"
            );
            return decision;
        }
    }
    FlowDecision::Continue
}

/// A named, ordered list of subreconcilers.
///
/// A sequence is itself a subreconciler, so composed sequences nest as steps
/// of a larger one.
pub struct Sequence<C> {
    name: String,
    steps: Vec<Box<dyn Subreconciler<C>>>,
}

impl<C> Sequence<C>
where
    C: Send + Sync + 'static,
{
    /// Create an empty sequence.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step, builder style.
    #[must_use]
    pub fn with_step<S: Subreconciler<C> + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Append a step.
    pub fn push<S: Subreconciler<C> + 'static>(&mut self, step: S) {
        self.steps.push(Box::new(step));
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the sequence for one cycle.
    pub async fn run(&self, ctx: &C, req: &Request) -> FlowDecision {
        run_subreconcilers(&self.steps, ctx, req).await
    }
}

#[async_trait]
impl<C> Subreconciler<C> for Sequence<C>
where
    C: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn reconcile(&self, ctx: &C, req: &Request) -> FlowDecision {
        self.run(ctx, req).await
    }
}
