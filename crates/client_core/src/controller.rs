//! One-request-at-a-time operation lifecycle: `Idle -> Busy -> Succeeded | Failed`.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    classifier::{ErrorClassifier, Failure},
    error::{RemoteFailure, RunRejected},
    transport::RemoteCall,
    validation::{FieldSource, ValidationGate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationState {
    #[default]
    Idle,
    Busy,
    Succeeded,
    Failed(RemoteFailure),
}

/// Events that drive [`OperationState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Dispatch,
    Succeed,
    Fail(RemoteFailure),
    /// Local validation refused the submission.
    Reject,
    Reset,
    /// The in-flight call was dropped before it settled.
    Abandon,
}

impl OperationState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    pub fn failure(&self) -> Option<&RemoteFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Next state for `trigger`, or `None` when the trigger is ignored in this state.
    pub fn apply(&self, trigger: Trigger) -> Option<OperationState> {
        match (self, trigger) {
            (Self::Busy, Trigger::Succeed) => Some(Self::Succeeded),
            (Self::Busy, Trigger::Fail(failure)) => Some(Self::Failed(failure)),
            (Self::Busy, Trigger::Abandon) => Some(Self::Idle),
            (Self::Busy, Trigger::Dispatch | Trigger::Reject | Trigger::Reset) => None,
            (_, Trigger::Dispatch) => Some(Self::Busy),
            (_, Trigger::Reject | Trigger::Reset) => Some(Self::Idle),
            (_, Trigger::Succeed | Trigger::Fail(_) | Trigger::Abandon) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement<T> {
    Succeeded(T),
    Failed(RemoteFailure),
}

impl<T> Settlement<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Settlement<U> {
        match self {
            Self::Succeeded(value) => Settlement::Succeeded(f(value)),
            Self::Failed(failure) => Settlement::Failed(failure),
        }
    }
}

pub struct OperationController<C> {
    name: &'static str,
    call: C,
    classifier: ErrorClassifier,
    gate: Option<ValidationGate>,
    success_status: u16,
    state: watch::Sender<OperationState>,
}

impl<C> OperationController<C>
where
    C: RemoteCall,
    C::Payload: FieldSource,
{
    pub fn new(
        name: &'static str,
        call: C,
        classifier: ErrorClassifier,
        success_status: u16,
    ) -> Self {
        let (state, _) = watch::channel(OperationState::Idle);
        Self {
            name,
            call,
            classifier,
            gate: None,
            success_status,
            state,
        }
    }

    /// Requires the gate to pass before anything is dispatched.
    pub fn with_validation(mut self, gate: ValidationGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn success_status(&self) -> u16 {
        self.success_status
    }

    pub fn state(&self) -> OperationState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Receives every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<OperationState> {
        self.state.subscribe()
    }

    /// Back to `Idle` after a settlement. Returns false while busy.
    pub fn reset(&self) -> bool {
        self.fire(Trigger::Reset)
    }

    fn fire(&self, trigger: Trigger) -> bool {
        transition(&self.state, trigger)
    }

    /// Validates, dispatches and settles one operation.
    ///
    /// A call made while another is in flight is rejected with
    /// [`RunRejected::Busy`] and dispatches nothing. Validation failures are
    /// returned as [`RunRejected::Invalid`] and also never dispatch. Every
    /// dispatched call settles into `Succeeded` or `Failed`; if the returned
    /// future is dropped first, the controller goes back to `Idle`.
    pub async fn run(&self, payload: C::Payload) -> Result<Settlement<C::Output>, RunRejected> {
        if self.is_busy() {
            warn!(operation = self.name, "run rejected: operation already in flight");
            return Err(RunRejected::Busy);
        }

        if let Some(gate) = &self.gate {
            let result = gate.validate_all(&payload.field_values());
            if !result.is_valid() {
                self.fire(Trigger::Reject);
                debug!(
                    operation = self.name,
                    invalid_fields = result.error_count(),
                    "submission failed validation"
                );
                return Err(RunRejected::Invalid(result));
            }
        }

        // The busy check and the transition happen under the same lock.
        if !self.fire(Trigger::Dispatch) {
            warn!(operation = self.name, "run rejected: operation already in flight");
            return Err(RunRejected::Busy);
        }
        let in_flight = InFlight {
            state: &self.state,
            operation: self.name,
            armed: true,
        };
        info!(operation = self.name, "operation dispatched");

        let outcome = match self.call.submit(&payload).await {
            Ok(reply) if reply.status == self.success_status => {
                self.call.decode(&reply).map_err(|error| {
                    warn!(operation = self.name, %error, "success reply could not be decoded");
                    self.classifier.undecodable()
                })
            }
            Ok(reply) => Err(self.classifier.classify(Failure::Reply(&reply))),
            Err(error) => {
                debug!(operation = self.name, %error, "transport failure");
                Err(self.classifier.classify(Failure::Transport(&error)))
            }
        };

        match outcome {
            Ok(output) => {
                in_flight.settle(Trigger::Succeed);
                info!(operation = self.name, "operation succeeded");
                Ok(Settlement::Succeeded(output))
            }
            Err(failure) => {
                in_flight.settle(Trigger::Fail(failure.clone()));
                warn!(
                    operation = self.name,
                    kind = %failure.kind,
                    message = %failure.message,
                    "operation failed"
                );
                Ok(Settlement::Failed(failure))
            }
        }
    }
}

fn transition(state: &watch::Sender<OperationState>, trigger: Trigger) -> bool {
    state.send_if_modified(|state| match state.apply(trigger) {
        Some(next) => {
            *state = next;
            true
        }
        None => false,
    })
}

/// Releases `Busy` when a dispatched `run` is dropped before settling.
struct InFlight<'a> {
    state: &'a watch::Sender<OperationState>,
    operation: &'static str,
    armed: bool,
}

impl InFlight<'_> {
    fn settle(mut self, trigger: Trigger) {
        self.armed = false;
        transition(self.state, trigger);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed && transition(self.state, Trigger::Abandon) {
            warn!(operation = self.operation, "operation abandoned before settling");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
