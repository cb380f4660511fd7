use crate::domain::models::booking::Booking;
use chrono::{NaiveTime, Timelike};

/// Minutes since midnight. Interval ends are left unwrapped, so a booking
/// crossing midnight (e.g. 23:00 + 3h -> [1380, 1560)) compares correctly
/// against same-day intervals without modular arithmetic.
pub fn minute_of_day(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// Canonical half-open overlap test: touching intervals do not overlap.
pub fn overlaps(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Decides whether `[start_time, start_time + duration_min)` collides with any
/// of the trainer's bookings on the same date. Terminal bookings never occupy
/// a slot; `exclude_booking_id` lets an update ignore the booking being moved.
/// Returns the first colliding booking so callers can name it in the error.
pub fn find_conflict<'a>(
    start_time: NaiveTime,
    duration_min: i32,
    existing: &'a [Booking],
    exclude_booking_id: Option<&str>,
) -> Option<&'a Booking> {
    let req_start = minute_of_day(start_time);
    let req_end = req_start + duration_min;

    existing
        .iter()
        .filter(|b| !b.status.is_terminal())
        .filter(|b| exclude_booking_id != Some(b.id.as_str()))
        .find(|b| {
            let b_start = minute_of_day(b.start_time);
            let b_end = b_start + b.duration_min;
            overlaps(req_start, req_end, b_start, b_end)
        })
}
