use crate::domain::models::actor::Actor;
use crate::domain::models::booking::{Booking, BookingStatus, PaymentConfirmation};
use crate::error::AppError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    Approve,
    Reject,
    Confirm,
    Complete,
    Cancel,
}

impl BookingAction {
    pub const ALL: [BookingAction; 5] = [
        BookingAction::Approve,
        BookingAction::Reject,
        BookingAction::Confirm,
        BookingAction::Complete,
        BookingAction::Cancel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingAction::Approve => "approve",
            BookingAction::Reject => "reject",
            BookingAction::Confirm => "confirm",
            BookingAction::Complete => "complete",
            BookingAction::Cancel => "cancel",
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The legal-transition table. Every status mutation in the service resolves
/// against these rows; anything absent is an illegal edge.
const TRANSITIONS: &[(BookingStatus, BookingAction, BookingStatus)] = &[
    (BookingStatus::PendingApproval, BookingAction::Approve, BookingStatus::Approved),
    (BookingStatus::PendingApproval, BookingAction::Reject, BookingStatus::Rejected),
    (BookingStatus::PendingApproval, BookingAction::Cancel, BookingStatus::Cancelled),
    (BookingStatus::Approved, BookingAction::Confirm, BookingStatus::Confirmed),
    (BookingStatus::Approved, BookingAction::Cancel, BookingStatus::Cancelled),
    (BookingStatus::Confirmed, BookingAction::Complete, BookingStatus::Completed),
    (BookingStatus::Confirmed, BookingAction::Cancel, BookingStatus::Cancelled),
];

pub fn next_status(from: BookingStatus, action: BookingAction) -> Option<BookingStatus> {
    TRANSITIONS
        .iter()
        .find(|(f, a, _)| *f == from && *a == action)
        .map(|(_, _, to)| *to)
}

/// Role/ownership guard for an action, independent of the current status.
/// Failing this is an authorization error, not an illegal transition.
pub fn authorize(booking: &Booking, action: BookingAction, actor: &Actor) -> Result<(), AppError> {
    let allowed = match action {
        BookingAction::Approve | BookingAction::Reject => actor.is_admin(),
        BookingAction::Confirm | BookingAction::Complete => match actor {
            Actor::Admin { .. } => true,
            Actor::Trainer { id } => *id == booking.trainer_id,
            Actor::Company { .. } => false,
        },
        BookingAction::Cancel => match actor {
            Actor::Company { id } => *id == booking.company_id,
            Actor::Trainer { id } => *id == booking.trainer_id,
            Actor::Admin { .. } => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{} {} may not {} booking {}",
            actor.role_name(),
            actor.id(),
            action,
            booking.id
        )))
    }
}

/// Resolves the target status for `action` on `booking` as `actor`, or the
/// error that stops it: authorization first, then table legality.
pub fn plan_transition(
    booking: &Booking,
    action: BookingAction,
    actor: &Actor,
) -> Result<BookingStatus, AppError> {
    authorize(booking, action, actor)?;
    next_status(booking.status, action).ok_or_else(|| {
        AppError::Conflict(format!(
            "Cannot {} a booking in status {}",
            action, booking.status
        ))
    })
}

/// Approve carries the payment capture; the record must be complete before
/// any state is planned.
pub fn validate_payment(payment: &PaymentConfirmation) -> Result<(), AppError> {
    if payment.mode.trim().is_empty() {
        return Err(AppError::Validation("Payment mode is required".into()));
    }
    if payment.transaction_id.trim().is_empty() {
        return Err(AppError::Validation(
            "Payment transaction id is required".into(),
        ));
    }
    if payment.payment_type.trim().is_empty() {
        return Err(AppError::Validation("Payment type is required".into()));
    }
    if !(payment.amount >= 0.0) {
        return Err(AppError::Validation(
            "Payment amount must be zero or positive".into(),
        ));
    }
    Ok(())
}

pub const MAX_NOTE_LEN: usize = 2000;

pub fn validate_note(note: &str) -> Result<(), AppError> {
    if note.len() > MAX_NOTE_LEN {
        return Err(AppError::Validation(format!(
            "Note exceeds {MAX_NOTE_LEN} characters"
        )));
    }
    Ok(())
}
