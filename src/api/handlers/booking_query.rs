use crate::api::dtos::requests::ListBookingsQuery;
use crate::api::dtos::responses::BookingPage;
use crate::api::extractors::actor::AuthActor;
use crate::domain::models::actor::Actor;
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::query::{
    BookingFilter, MAX_PAGE_LIMIT, Pagination, SortField, SortOrder,
};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use std::sync::Arc;

fn parse_filter_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date filter (YYYY-MM-DD)".into()))
}

fn build_query(query: &ListBookingsQuery) -> Result<(BookingFilter, Pagination), AppError> {
    let mut filter = BookingFilter {
        trainer_id: query.trainer_id.clone(),
        company_id: query.company_id.clone(),
        ..Default::default()
    };

    if let Some(ref raw) = query.status {
        filter.status = Some(
            BookingStatus::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown status '{raw}'")))?,
        );
    }
    if let Some(ref raw) = query.from {
        filter.date_from = Some(parse_filter_date(raw)?);
    }
    if let Some(ref raw) = query.to {
        filter.date_to = Some(parse_filter_date(raw)?);
    }

    let mut page = Pagination::default();
    if let Some(limit) = query.limit {
        page.limit = limit.clamp(1, MAX_PAGE_LIMIT);
    }
    if let Some(offset) = query.offset {
        page.offset = offset.max(0);
    }
    if let Some(ref raw) = query.sort {
        page.sort = match raw.as_str() {
            "booking_date" => SortField::BookingDate,
            "created_at" => SortField::CreatedAt,
            _ => return Err(AppError::Validation(format!("Unknown sort field '{raw}'"))),
        };
    }
    if let Some(ref raw) = query.order {
        page.order = match raw.as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(AppError::Validation(format!("Unknown sort order '{raw}'"))),
        };
    }

    Ok((filter, page))
}

async fn run_query(
    state: &AppState,
    filter: &BookingFilter,
    page: &Pagination,
) -> Result<Json<BookingPage>, AppError> {
    let (items, total) = state.booking_repo.list(filter, page).await?;
    Ok(Json(BookingPage {
        items,
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden("Admin only".into()));
    }
    let (filter, page) = build_query(&query)?;
    run_query(&state, &filter, &page).await
}

pub async fn list_pending_approvals(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden("Admin only".into()));
    }
    let (mut filter, page) = build_query(&query)?;
    filter.status = Some(BookingStatus::PendingApproval);
    run_query(&state, &filter, &page).await
}

pub async fn list_company_bookings(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let Actor::Company { id } = &actor else {
        return Err(AppError::Forbidden("Company only".into()));
    };
    let (mut filter, page) = build_query(&query)?;
    filter.company_id = Some(id.clone());
    run_query(&state, &filter, &page).await
}

/// Trainer view: scoped to the trainer AND to admin-approved bookings, so
/// the pre-approval backlog never surfaces here.
pub async fn list_trainer_bookings(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let Actor::Trainer { id } = &actor else {
        return Err(AppError::Forbidden("Trainer only".into()));
    };
    let (mut filter, page) = build_query(&query)?;
    filter.trainer_id = Some(id.clone());
    filter.approved_only = true;
    run_query(&state, &filter, &page).await
}
