use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::query::{BookingFilter, Pagination};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &BookingFilter) {
    qb.push(" WHERE 1=1");
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(ref trainer_id) = filter.trainer_id {
        qb.push(" AND trainer_id = ").push_bind(trainer_id.clone());
    }
    if let Some(ref company_id) = filter.company_id {
        qb.push(" AND company_id = ").push_bind(company_id.clone());
    }
    if filter.approved_only {
        qb.push(" AND is_approved_by_admin = 1");
    }
    if let Some(from) = filter.date_from {
        qb.push(" AND booking_date >= ").push_bind(from);
    }
    if let Some(to) = filter.date_to {
        qb.push(" AND booking_date <= ").push_bind(to);
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, company_id, trainer_id, booking_date, start_time, duration_min, training_types, status, payment_status, payment_confirmation, is_approved_by_admin, approved_by_admin_id, approved_at, admin_notes, requester_notes, trainer_notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.company_id).bind(&booking.trainer_id)
            .bind(booking.booking_date).bind(booking.start_time).bind(booking.duration_min)
            .bind(&booking.training_types).bind(booking.status).bind(booking.payment_status)
            .bind(&booking.payment_confirmation).bind(booking.is_approved_by_admin)
            .bind(&booking.approved_by_admin_id).bind(booking.approved_at)
            .bind(&booking.admin_notes).bind(&booking.requester_notes).bind(&booking.trainer_notes)
            .bind(booking.created_at).bind(booking.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_on_date(
        &self,
        trainer_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE trainer_id = ? AND booking_date = ?
             AND status IN ('PENDING_APPROVAL', 'APPROVED', 'CONFIRMED')
             ORDER BY start_time ASC",
        )
        .bind(trainer_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_schedule(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET booking_date=?, start_time=?, duration_min=?, training_types=?, requester_notes=?, updated_at=?
             WHERE id=? AND status IN ('PENDING_APPROVAL', 'APPROVED', 'CONFIRMED')
             RETURNING *"
        )
            .bind(booking.booking_date).bind(booking.start_time).bind(booking.duration_min)
            .bind(&booking.training_types).bind(&booking.requester_notes).bind(booking.updated_at)
            .bind(&booking.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict("Booking is no longer modifiable".into()))
    }

    async fn apply_transition(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status=?, payment_status=?, payment_confirmation=?, is_approved_by_admin=?, approved_by_admin_id=?, approved_at=?, admin_notes=?, requester_notes=?, trainer_notes=?, updated_at=?
             WHERE id=? AND status=?
             RETURNING *"
        )
            .bind(booking.status).bind(booking.payment_status).bind(&booking.payment_confirmation)
            .bind(booking.is_approved_by_admin).bind(&booking.approved_by_admin_id).bind(booking.approved_at)
            .bind(&booking.admin_notes).bind(&booking.requester_notes).bind(&booking.trainer_notes)
            .bind(booking.updated_at)
            .bind(&booking.id).bind(expected)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict(format!(
                "Booking {} is no longer in status {}", booking.id, expected
            )))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &BookingFilter,
        page: &Pagination,
    ) -> Result<(Vec<Booking>, i64), AppError> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM bookings");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM bookings");
        push_filters(&mut query, filter);
        query.push(format!(
            " ORDER BY {} {}",
            page.sort.column(),
            page.order.keyword()
        ));
        query.push(" LIMIT ").push_bind(page.limit);
        query.push(" OFFSET ").push_bind(page.offset);

        let items = query
            .build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok((items, total))
    }
}
