use crate::domain::models::{
    booking::{Booking, BookingStatus},
    company::Company,
    query::{BookingFilter, Pagination},
    trainer::Trainer,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Injected time source so date validation and approval stamping are
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Non-terminal bookings of one trainer on one date; the allocator's input.
    async fn list_active_on_date(
        &self,
        trainer_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>;
    /// Rewrites schedule fields (date, time, duration, types, requester notes).
    /// Fails with Conflict if the booking has meanwhile reached a terminal status.
    async fn update_schedule(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Persists a workflow transition as one statement guarded by
    /// `status = expected`; zero affected rows is a Conflict and writes nothing.
    async fn apply_transition(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> Result<Booking, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn list(
        &self,
        filter: &BookingFilter,
        page: &Pagination,
    ) -> Result<(Vec<Booking>, i64), AppError>;
}

#[async_trait]
pub trait TrainerDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>, AppError>;
}

#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Company>, AppError>;
}
