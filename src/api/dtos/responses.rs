use crate::domain::models::booking::Booking;
use serde::Serialize;

#[derive(Serialize)]
pub struct BookingPage {
    pub items: Vec<Booking>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
