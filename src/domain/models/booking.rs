use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    PendingApproval,
    Approved,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::PendingApproval,
        BookingStatus::Approved,
        BookingStatus::Confirmed,
        BookingStatus::Rejected,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    /// Terminal bookings no longer occupy their slot and accept no transition.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::PendingApproval => "PENDING_APPROVAL",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub mode: String,
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub payment_type: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub company_id: String,
    pub trainer_id: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_min: i32,
    pub training_types: Json<Vec<String>>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_confirmation: Option<Json<PaymentConfirmation>>,
    pub is_approved_by_admin: bool,
    pub approved_by_admin_id: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub requester_notes: Option<String>,
    pub trainer_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub company_id: String,
    pub trainer_id: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_min: i32,
    pub training_types: Vec<String>,
    pub requester_notes: Option<String>,
    pub now: DateTime<Utc>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id: params.company_id,
            trainer_id: params.trainer_id,
            booking_date: params.booking_date,
            start_time: params.start_time,
            duration_min: params.duration_min,
            training_types: Json(params.training_types),
            status: BookingStatus::PendingApproval,
            payment_status: PaymentStatus::Pending,
            payment_confirmation: None,
            is_approved_by_admin: false,
            approved_by_admin_id: None,
            approved_at: None,
            admin_notes: None,
            requester_notes: params.requester_notes,
            trainer_notes: None,
            created_at: params.now,
            updated_at: params.now,
        }
    }
}
