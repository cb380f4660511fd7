use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingRequest};
use crate::api::extractors::actor::AuthActor;
use crate::domain::models::actor::Actor;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::services::{allocation, catalog, workflow};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use sqlx::types::Json as SqlJson;
use std::sync::Arc;
use tracing::info;

pub(crate) fn parse_booking_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

pub(crate) fn parse_start_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

fn duration_to_minutes(hours: f64) -> Result<i32, AppError> {
    if !(0.5..=24.0).contains(&hours) {
        return Err(AppError::Validation(
            "Duration must be between 0.5 and 24 hours".into(),
        ));
    }
    Ok((hours * 60.0).round() as i32)
}

fn slot_conflict_error(conflict: &Booking) -> AppError {
    AppError::Conflict(format!(
        "Slot unavailable: overlaps booking {} starting {} for {} min",
        conflict.id,
        conflict.start_time.format("%H:%M"),
        conflict.duration_min
    ))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = match &actor {
        Actor::Company { id } => id.clone(),
        _ => {
            return Err(AppError::Forbidden(
                "Only a company may request a booking".into(),
            ));
        }
    };

    info!(
        "create_booking: company {} requesting trainer {}",
        company_id, payload.trainer_id
    );

    let company = state
        .company_dir
        .find_by_id(&company_id)
        .await?
        .ok_or(AppError::NotFound("Company not found".into()))?;
    if !company.is_active {
        return Err(AppError::Validation("Company is not active".into()));
    }

    let trainer = state
        .trainer_dir
        .find_by_id(&payload.trainer_id)
        .await?
        .ok_or(AppError::NotFound("Trainer not found".into()))?;
    if !trainer.is_active {
        return Err(AppError::Validation("Trainer is not active".into()));
    }

    let training_types =
        catalog::validate_requested(&payload.training_types, &trainer.offered_training_types.0)?;

    let booking_date = parse_booking_date(&payload.date)?;
    let start_time = parse_start_time(&payload.start_time)?;
    let duration_min = duration_to_minutes(payload.duration_hours)?;
    if let Some(ref notes) = payload.notes {
        workflow::validate_note(notes)?;
    }

    let now = state.clock.now();
    if booking_date < now.date_naive() {
        return Err(AppError::Validation("Booking date is in the past".into()));
    }

    // Availability check and insert hold the trainer's schedule lock together,
    // so a concurrent conflicting request cannot slip in between them.
    let gate = state.schedule_gate.lock_for(&payload.trainer_id);
    let _guard = gate.lock().await;

    let existing = state
        .booking_repo
        .list_active_on_date(&payload.trainer_id, booking_date)
        .await?;
    if let Some(conflict) = allocation::find_conflict(start_time, duration_min, &existing, None) {
        return Err(slot_conflict_error(conflict));
    }

    let booking = Booking::new(NewBookingParams {
        company_id,
        trainer_id: payload.trainer_id,
        booking_date,
        start_time,
        duration_min,
        training_types,
        requester_notes: payload.notes,
        now,
    });

    let created = state.booking_repo.insert(&booking).await?;
    info!(
        "Booking requested: {} for trainer {} on {}",
        created.id, created.trainer_id, created.booking_date
    );
    Ok(Json(created))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    match &actor {
        Actor::Admin { .. } => {}
        Actor::Company { id } if *id == booking.company_id => {}
        Actor::Trainer { id } if *id == booking.trainer_id => {
            // The pre-approval backlog is invisible to trainers.
            if !booking.is_approved_by_admin {
                return Err(AppError::NotFound("Booking not found".into()));
            }
        }
        _ => {
            return Err(AppError::Forbidden(
                "Not allowed to view this booking".into(),
            ));
        }
    }

    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    match &actor {
        Actor::Admin { .. } => {}
        Actor::Company { id } if *id == booking.company_id => {}
        _ => {
            return Err(AppError::Forbidden(
                "Only an admin or the requesting company may modify a booking".into(),
            ));
        }
    }

    if booking.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "Cannot modify a booking in status {}",
            booking.status
        )));
    }

    if let Some(types) = payload.training_types {
        let trainer = state
            .trainer_dir
            .find_by_id(&booking.trainer_id)
            .await?
            .ok_or(AppError::NotFound("Trainer not found".into()))?;
        booking.training_types =
            SqlJson(catalog::validate_requested(&types, &trainer.offered_training_types.0)?);
    }

    if let Some(ref notes) = payload.notes {
        workflow::validate_note(notes)?;
        booking.requester_notes = Some(notes.clone());
    }

    let schedule_changed =
        payload.date.is_some() || payload.start_time.is_some() || payload.duration_hours.is_some();

    if let Some(ref date) = payload.date {
        booking.booking_date = parse_booking_date(date)?;
    }
    if let Some(ref time) = payload.start_time {
        booking.start_time = parse_start_time(time)?;
    }
    if let Some(hours) = payload.duration_hours {
        booking.duration_min = duration_to_minutes(hours)?;
    }

    let now = state.clock.now();
    booking.updated_at = now;

    if schedule_changed {
        if booking.booking_date < now.date_naive() {
            return Err(AppError::Validation("Booking date is in the past".into()));
        }

        let gate = state.schedule_gate.lock_for(&booking.trainer_id);
        let _guard = gate.lock().await;

        let existing = state
            .booking_repo
            .list_active_on_date(&booking.trainer_id, booking.booking_date)
            .await?;
        if let Some(conflict) = allocation::find_conflict(
            booking.start_time,
            booking.duration_min,
            &existing,
            Some(booking.id.as_str()),
        ) {
            return Err(slot_conflict_error(conflict));
        }

        let updated = state.booking_repo.update_schedule(&booking).await?;
        info!("Booking rescheduled: {}", updated.id);
        return Ok(Json(updated));
    }

    let updated = state.booking_repo.update_schedule(&booking).await?;
    info!("Booking updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden(
            "Only an admin may delete a booking".into(),
        ));
    }

    state.booking_repo.delete(&booking_id).await?;
    info!("Booking deleted: {}", booking_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
