//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::resolver::ResolveError;
use crate::trips::{NewTripRecord, TripError, TripRecord};

use super::auth::AuthenticatedUser;
use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rolling-stock", get(lookup_rolling_stock))
        .route("/api/trips", get(list_trips).post(save_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Look up which train-set operated a service on a date.
async fn lookup_rolling_stock(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(req): Query<RollingStockRequest>,
) -> Result<Json<RollingStockResponse>, AppError> {
    let train_number = req.train_number.unwrap_or_default();

    let date = req
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "date is required".to_string(),
        })?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("Invalid date: {date}"),
    })?;

    debug!(user = %user.id, train = %train_number, %date, "rolling stock lookup");
    let stock = state.resolver.resolve(&train_number, date).await?;

    Ok(Json(RollingStockResponse {
        rolling_stock: stock.to_string(),
    }))
}

/// Store a trip record for the caller.
async fn save_trip(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(trip): Json<NewTripRecord>,
) -> Result<Json<TripRecord>, AppError> {
    let record = state.trips.save(&user.id, trip).await?;
    Ok(Json(record))
}

/// List the caller's trip records, newest first.
async fn list_trips(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TripRecord>>, AppError> {
    let records = state.trips.list_for_user(&user.id).await?;
    Ok(Json(records))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized,
    Upstream { status: u16, message: String },
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidInput(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            ResolveError::Upstream { status, .. } => AppError::Upstream {
                status,
                message: e.to_string(),
            },
        }
    }
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl AppError {
    /// HTTP status for this error. Upstream statuses pass through verbatim.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest { message } | AppError::Upstream { message, .. } => {
                message.clone()
            }
            AppError::Unauthorized => "authentication required".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
