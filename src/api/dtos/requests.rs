use crate::domain::models::booking::PaymentConfirmation;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub trainer_id: String,
    pub date: String,
    pub start_time: String,
    pub duration_hours: f64,
    pub training_types: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub duration_hours: Option<f64>,
    pub training_types: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ApproveBookingRequest {
    pub payment: PaymentConfirmation,
    pub admin_notes: Option<String>,
}

#[derive(Deserialize)]
pub struct RejectBookingRequest {
    pub admin_notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct TransitionNoteRequest {
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub status: Option<String>,
    pub trainer_id: Option<String>,
    pub company_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
