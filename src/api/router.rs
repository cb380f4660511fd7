use crate::api::handlers::{booking, booking_query, booking_workflow, health};
use crate::state::AppState;
use axum::{
    Router,
    body::Body,
    extract::Request,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{Span, error, info, info_span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Booking lifecycle
        .route("/api/v1/bookings", post(booking::create_booking))
        .route(
            "/api/v1/bookings/{booking_id}",
            get(booking::get_booking)
                .put(booking::update_booking)
                .delete(booking::delete_booking),
        )

        // Workflow transitions
        .route("/api/v1/bookings/{booking_id}/approve", post(booking_workflow::approve_booking))
        .route("/api/v1/bookings/{booking_id}/reject", post(booking_workflow::reject_booking))
        .route("/api/v1/bookings/{booking_id}/confirm", post(booking_workflow::confirm_booking))
        .route("/api/v1/bookings/{booking_id}/complete", post(booking_workflow::complete_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking_workflow::cancel_booking))

        // Role-scoped queries
        .route("/api/v1/admin/bookings", get(booking_query::list_all_bookings))
        .route("/api/v1/admin/bookings/pending", get(booking_query::list_pending_approvals))
        .route("/api/v1/company/bookings", get(booking_query::list_company_bookings))
        .route("/api/v1/trainer/bookings", get(booking_query::list_trainer_bookings))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        actor_id = tracing::field::Empty,
                        actor_role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
