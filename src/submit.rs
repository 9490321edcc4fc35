//! Contact form submission: the flow state machine and the delivery
//! transport it hands messages to.

use crate::form::ContactMessage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Where a submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
}

/// Inputs that move the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Submit,
    /// All four fields checked; `true` when every one passed
    Validated(bool),
    /// The transport completed; `true` on successful delivery
    Delivered(bool),
    /// Notification shown and controls restored
    Settle,
}

impl SubmissionState {
    /// The state `event` leads to, or `None` when it does not apply here.
    pub fn next(self, event: FlowEvent) -> Option<SubmissionState> {
        use FlowEvent::*;
        use SubmissionState::*;
        match (self, event) {
            (Idle, Submit) => Some(Validating),
            (Validating, Validated(false)) => Some(Rejected),
            (Validating, Validated(true)) => Some(Submitting),
            (Submitting, Delivered(true)) => Some(Succeeded),
            (Submitting, Delivered(false)) => Some(Failed),
            (Rejected | Succeeded | Failed, Settle) => Some(Idle),
            _ => None,
        }
    }
}

/// Tracks one form's submission state
#[derive(Debug, Clone, Default)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Apply `event`; returns the new state, or `None` (state unchanged) when
    /// the event does not apply.
    pub fn apply(&mut self, event: FlowEvent) -> Option<SubmissionState> {
        let next = self.state.next(event);
        match next {
            Some(s) => {
                log::debug!("submission {:?} -> {:?}", self.state, s);
                self.state = s;
            }
            None => log::debug!("submission ignores {:?} while {:?}", event, self.state),
        }
        next
    }
}

/// Delivery failure reported by a transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// A delivery the transport has accepted: what happens, and after how long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub after_ms: u64,
    pub outcome: Result<(), DeliveryError>,
}

/// Whatever actually carries a contact message somewhere
pub trait Transport: Send {
    fn send(&mut self, message: &ContactMessage) -> Delivery;
}

/// Placeholder transport: fixed latency, random failures
pub struct SimulatedTransport {
    delay_ms: u64,
    success_rate: f64,
    rng: StdRng,
}

impl SimulatedTransport {
    /// Seeded from OS entropy
    pub fn new(delay_ms: u64, success_rate: f64) -> Self {
        Self::with_rng(delay_ms, success_rate, StdRng::from_entropy())
    }

    /// Deterministic outcomes for tests and reproducible runs
    pub fn seeded(delay_ms: u64, success_rate: f64, seed: u64) -> Self {
        Self::with_rng(delay_ms, success_rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(delay_ms: u64, success_rate: f64, rng: StdRng) -> Self {
        Self {
            delay_ms,
            success_rate: success_rate.clamp(0.0, 1.0),
            rng,
        }
    }
}

impl Transport for SimulatedTransport {
    fn send(&mut self, message: &ContactMessage) -> Delivery {
        log::debug!("simulating delivery of {:?} from {}", message.subject, message.email);
        let outcome = if self.rng.gen_bool(self.success_rate) {
            Ok(())
        } else {
            Err(DeliveryError("Simulation error".to_string()))
        };
        Delivery {
            after_ms: self.delay_ms,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Hello there, friend".into(),
        }
    }

    #[test]
    fn happy_path_transitions() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.apply(FlowEvent::Submit), Some(SubmissionState::Validating));
        assert_eq!(flow.apply(FlowEvent::Validated(true)), Some(SubmissionState::Submitting));
        assert_eq!(flow.apply(FlowEvent::Delivered(true)), Some(SubmissionState::Succeeded));
        assert_eq!(flow.apply(FlowEvent::Settle), Some(SubmissionState::Idle));
    }

    #[test]
    fn rejection_never_reaches_submitting() {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::Submit);
        assert_eq!(flow.apply(FlowEvent::Validated(false)), Some(SubmissionState::Rejected));
        assert_eq!(flow.apply(FlowEvent::Delivered(true)), None);
        assert_eq!(flow.state(), SubmissionState::Rejected);
    }

    #[test]
    fn submit_while_submitting_is_ignored() {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::Submit);
        flow.apply(FlowEvent::Validated(true));
        assert_eq!(flow.apply(FlowEvent::Submit), None);
        assert_eq!(flow.state(), SubmissionState::Submitting);
        assert_eq!(flow.apply(FlowEvent::Delivered(false)), Some(SubmissionState::Failed));
    }

    #[test]
    fn simulated_success_rate_converges() {
        let mut t = SimulatedTransport::seeded(2000, 0.9, 7);
        let trials = 10_000;
        let ok = (0..trials).filter(|_| t.send(&msg()).outcome.is_ok()).count();
        let rate = ok as f64 / trials as f64;
        assert!((0.88..=0.92).contains(&rate), "rate was {}", rate);
    }

    #[test]
    fn simulated_delay_is_reported() {
        let mut t = SimulatedTransport::seeded(2000, 1.0, 1);
        let d = t.send(&msg());
        assert_eq!(d.after_ms, 2000);
        assert!(d.outcome.is_ok());
        let mut t = SimulatedTransport::seeded(5, 0.0, 1);
        assert_eq!(t.send(&msg()).outcome, Err(DeliveryError("Simulation error".into())));
    }
}
