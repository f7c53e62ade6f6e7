use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post, delete};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use lodge_api::error::{ApiError, ApiErrorKind, GeneralKind};

use crate::state::ArcShared;

mod layer;
mod handle;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

async fn ping() -> (StatusCode, &'static str) {
    (StatusCode::OK, "pong")
}

async fn handle_error(error: tower::BoxError) -> ApiError {
    if error.is::<tower::timeout::error::Elapsed>() {
        return ApiError::from(ApiErrorKind::General(GeneralKind::Timeout));
    }

    tracing::error!("unhandled error when processing request: {error:#?}");

    ApiError::new()
}

pub fn routes(state: &ArcShared) -> Router {
    Router::new()
        .route(
            "/api/auth/register",
            post(handle::auth::register)
        )
        .route(
            "/api/auth/login",
            post(handle::auth::login)
        )
        .route(
            "/api/auth/session",
            delete(handle::auth::logout)
        )
        .route(
            "/api/group",
            get(handle::group::get)
                .post(handle::group::post)
        )
        .route(
            "/api/group/:group_id",
            get(handle::group::group_id::get)
                .patch(handle::group::group_id::patch)
                .delete(handle::group::group_id::delete)
        )
        .route(
            "/api/group/:group_id/role",
            get(handle::group::group_id::role)
        )
        .route(
            "/api/group/:group_id/members",
            get(handle::group::group_id::members::get)
                .post(handle::group::group_id::members::post)
                .patch(handle::group::group_id::members::patch)
                .delete(handle::group::group_id::members::delete)
        )
        .route(
            "/api/apartment",
            get(handle::apartment::get)
                .post(handle::apartment::post)
        )
        .route(
            "/api/apartment/:apartment_id",
            get(handle::apartment::apartment_id::get)
                .patch(handle::apartment::apartment_id::patch)
                .delete(handle::apartment::apartment_id::delete)
        )
        .route(
            "/api/booking",
            get(handle::booking::get)
                .post(handle::booking::post)
        )
        .route(
            "/api/booking/:booking_id",
            get(handle::booking::booking_id::get)
                .patch(handle::booking::booking_id::patch)
                .delete(handle::booking::booking_id::delete)
        )
        .route("/ping", get(ping))
        .layer(ServiceBuilder::new()
            .layer(layer::RIDLayer::new())
            .layer(TraceLayer::new_for_http()
                .make_span_with(layer::make_span_with)
                .on_request(layer::on_request)
                .on_response(layer::on_response)
                .on_failure(layer::on_failure))
            .layer(HandleErrorLayer::new(handle_error))
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT)))
        .with_state(state.clone())
}
