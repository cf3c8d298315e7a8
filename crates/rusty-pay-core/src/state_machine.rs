use thiserror::Error;

use crate::domain::PaymentPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    Start,
    Submit,
    Reject,
    Include,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: PaymentPhase,
    pub to: PaymentPhase,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal payment transition: {from:?} --{action:?}-->")]
pub struct TransitionError {
    pub from: PaymentPhase,
    pub action: PaymentAction,
}

pub fn payment_transition(
    from: PaymentPhase,
    action: PaymentAction,
) -> Result<(PaymentPhase, PhaseTransition), TransitionError> {
    use PaymentAction as A;
    use PaymentPhase as P;

    let (to, reason) = match (from, action) {
        (P::Idle | P::Mined | P::Failed, A::Start) => (P::Building, "payment_started"),
        (P::Building, A::Submit) => (P::Submitted, "accepted_by_provider"),
        (P::Building, A::Reject) => (P::Failed, "submission_rejected"),
        (P::Submitted, A::Include) => (P::Mined, "included_on_chain"),
        (P::Submitted, A::Fail) => (P::Failed, "inclusion_failed"),
        _ => return Err(TransitionError { from, action }),
    };
    Ok((to, PhaseTransition { from, to, reason }))
}
