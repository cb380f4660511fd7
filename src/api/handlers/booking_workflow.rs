use crate::api::dtos::requests::{
    ApproveBookingRequest, RejectBookingRequest, TransitionNoteRequest,
};
use crate::api::extractors::actor::AuthActor;
use crate::domain::models::actor::Actor;
use crate::domain::models::booking::{Booking, PaymentStatus};
use crate::domain::services::workflow::{self, BookingAction};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::types::Json as SqlJson;
use std::sync::Arc;
use tracing::info;

async fn load_booking(state: &AppState, booking_id: &str) -> Result<Booking, AppError> {
    state
        .booking_repo
        .find_by_id(booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))
}

/// The approve transition and the payment capture commit together: every
/// field below lands in one status-guarded UPDATE, or none of them do.
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<ApproveBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &booking_id).await?;
    let target = workflow::plan_transition(&booking, BookingAction::Approve, &actor)?;
    workflow::validate_payment(&payload.payment)?;
    if let Some(ref notes) = payload.admin_notes {
        workflow::validate_note(notes)?;
    }

    let now = state.clock.now();
    let mut updated = booking.clone();
    updated.status = target;
    updated.is_approved_by_admin = true;
    updated.approved_by_admin_id = Some(actor.id().to_string());
    updated.approved_at = Some(now);
    updated.payment_status = PaymentStatus::Confirmed;
    updated.payment_confirmation = Some(SqlJson(payload.payment));
    if payload.admin_notes.is_some() {
        updated.admin_notes = payload.admin_notes;
    }
    updated.updated_at = now;

    let saved = state
        .booking_repo
        .apply_transition(&updated, booking.status)
        .await?;
    info!("Booking approved: {} by admin {}", saved.id, actor.id());
    Ok(Json(saved))
}

pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    payload: Option<Json<RejectBookingRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let booking = load_booking(&state, &booking_id).await?;
    let target = workflow::plan_transition(&booking, BookingAction::Reject, &actor)?;

    let admin_notes = payload.and_then(|Json(p)| p.admin_notes);
    if let Some(ref notes) = admin_notes {
        workflow::validate_note(notes)?;
    }

    let now = state.clock.now();
    let mut updated = booking.clone();
    updated.status = target;
    updated.approved_by_admin_id = Some(actor.id().to_string());
    updated.approved_at = Some(now);
    if admin_notes.is_some() {
        updated.admin_notes = admin_notes;
    }
    updated.updated_at = now;

    let saved = state
        .booking_repo
        .apply_transition(&updated, booking.status)
        .await?;
    info!("Booking rejected: {} by admin {}", saved.id, actor.id());
    Ok(Json(saved))
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    payload: Option<Json<TransitionNoteRequest>>,
) -> Result<impl IntoResponse, AppError> {
    apply_note_transition(&state, &actor, &booking_id, BookingAction::Confirm, payload).await
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    payload: Option<Json<TransitionNoteRequest>>,
) -> Result<impl IntoResponse, AppError> {
    apply_note_transition(&state, &actor, &booking_id, BookingAction::Complete, payload).await
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    payload: Option<Json<TransitionNoteRequest>>,
) -> Result<impl IntoResponse, AppError> {
    apply_note_transition(&state, &actor, &booking_id, BookingAction::Cancel, payload).await
}

async fn apply_note_transition(
    state: &AppState,
    actor: &Actor,
    booking_id: &str,
    action: BookingAction,
    payload: Option<Json<TransitionNoteRequest>>,
) -> Result<Json<Booking>, AppError> {
    let booking = load_booking(state, booking_id).await?;
    let target = workflow::plan_transition(&booking, action, actor)?;

    let note = payload.and_then(|Json(p)| p.note);
    if let Some(ref n) = note {
        workflow::validate_note(n)?;
    }

    let mut updated = booking.clone();
    updated.status = target;
    if let Some(n) = note {
        match actor {
            Actor::Company { .. } => updated.requester_notes = Some(n),
            Actor::Trainer { .. } => updated.trainer_notes = Some(n),
            Actor::Admin { .. } => updated.admin_notes = Some(n),
        }
    }
    updated.updated_at = state.clock.now();

    let saved = state
        .booking_repo
        .apply_transition(&updated, booking.status)
        .await?;
    info!(
        "Booking {}: {} -> {} by {} {}",
        action,
        booking.status,
        saved.status,
        actor.role_name(),
        actor.id()
    );
    Ok(Json(saved))
}
