// One decision cycle: validate, submit, render, report.
//
// The submit control is disabled by acquiring a `SubmissionGate` and
// re-enabled when the gate drops, so every exit from `submit` (success,
// service error, transport error, malformed body) releases it exactly once.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::{info, warn};

use crate::client::DecisionTransport;
use crate::collector::{collect, ConditionForm};
use crate::display::DisplayPort;
use crate::error::DecisionError;
use crate::protocol::{DecisionRequest, DecisionResponse};
use crate::render::render_response;

pub const STATUS_COMPUTING: &str = "Computing decision…";
pub const STATUS_DONE: &str = "Done.";

// ---------------------------------------------------------------------------
// SubmissionGate
// ---------------------------------------------------------------------------

/// Holds the submit control disabled for as long as it lives.
///
/// Derefs to the wrapped display so the cycle keeps rendering through it.
pub struct SubmissionGate<'a, D: DisplayPort + ?Sized> {
    display: &'a mut D,
}

impl<'a, D: DisplayPort + ?Sized> SubmissionGate<'a, D> {
    pub fn acquire(display: &'a mut D) -> Self {
        display.set_status(STATUS_COMPUTING);
        display.set_submit_enabled(false);
        SubmissionGate { display }
    }
}

impl<D: DisplayPort + ?Sized> Deref for SubmissionGate<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.display
    }
}

impl<D: DisplayPort + ?Sized> DerefMut for SubmissionGate<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.display
    }
}

impl<D: DisplayPort + ?Sized> Drop for SubmissionGate<'_, D> {
    fn drop(&mut self) {
        self.display.set_submit_enabled(true);
    }
}

// ---------------------------------------------------------------------------
// DecisionRenderer
// ---------------------------------------------------------------------------

/// Runs the network exchange and maps the verdict onto a display.
#[derive(Clone)]
pub struct DecisionRenderer {
    transport: Arc<dyn DecisionTransport>,
}

impl DecisionRenderer {
    pub fn new(transport: Arc<dyn DecisionTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn DecisionTransport> {
        &self.transport
    }

    /// Submit `request` and render the verdict. Nothing is rendered on error.
    pub async fn submit<D: DisplayPort + ?Sized>(
        &self,
        request: &DecisionRequest,
        display: &mut D,
    ) -> Result<DecisionResponse, DecisionError> {
        let mut gate = SubmissionGate::acquire(display);
        let response = self.transport.post_decision(request).await?;
        render_response(&response, &mut *gate);
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// How a cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Validation failed; the service was never called.
    Rejected(DecisionError),
    Rendered(Box<DecisionResponse>),
    Failed(DecisionError),
}

impl CycleOutcome {
    pub fn error(&self) -> Option<&DecisionError> {
        match self {
            CycleOutcome::Rejected(e) | CycleOutcome::Failed(e) => Some(e),
            CycleOutcome::Rendered(_) => None,
        }
    }
}

/// Collect the form, submit it, and leave a status message on `display`.
pub async fn run_cycle<D: DisplayPort + ?Sized>(
    form: &ConditionForm,
    renderer: &DecisionRenderer,
    display: &mut D,
) -> CycleOutcome {
    let request = match collect(form) {
        Ok(request) => request,
        Err(e) => {
            display.set_status(&e.status_message());
            return CycleOutcome::Rejected(e);
        }
    };

    match renderer.submit(&request, display).await {
        Ok(response) => {
            info!(
                query = %request.query,
                decision = %response.decision,
                confidence = response.confidence,
                currency = %response.market_value.currency,
                "decision rendered"
            );
            display.set_status(STATUS_DONE);
            CycleOutcome::Rendered(Box::new(response))
        }
        Err(e) => {
            warn!(query = %request.query, error = %e, "decision cycle failed");
            display.set_status(&e.status_message());
            CycleOutcome::Failed(e)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
