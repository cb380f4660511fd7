use super::booking::BookingStatus;
use chrono::NaiveDate;

#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub trainer_id: Option<String>,
    pub company_id: Option<String>,
    /// Restricts results to admin-approved bookings (trainer views).
    pub approved_only: bool,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    BookingDate,
    CreatedAt,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::BookingDate => "booking_date",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            sort: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}
