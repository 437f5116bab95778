//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use futures::future::try_join;
use tracing::{error, info, warn};

use crate::geocode::GeocodeError;
use crate::planner::{RouteError, RouteOutcome};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/route", get(route_by_place))
        .route("/route/coordinates", post(route_by_coordinates))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with route form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    accept_contains(headers, "text/html")
}

/// Check if request asked for plain text.
fn accepts_text(headers: &HeaderMap) -> bool {
    accept_contains(headers, "text/plain")
}

fn accept_contains(headers: &HeaderMap, media_type: &str) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(media_type))
}

/// Route between two place names.
///
/// Both names are geocoded concurrently. Responds with HTML, plain text, or
/// JSON depending on the `Accept` header.
async fn route_by_place(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteQuery>,
) -> Response {
    let html = accepts_html(&headers);
    match plan_by_place(&state, &headers, &req).await {
        Ok(response) => response,
        Err(e) if html => e.into_html_response(),
        Err(e) => e.into_response(),
    }
}

async fn plan_by_place(
    state: &AppState,
    headers: &HeaderMap,
    req: &RouteQuery,
) -> Result<Response, AppError> {
    let (from, to) = (req.from.trim(), req.to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest {
            message: "Both 'from' and 'to' are required".to_string(),
        });
    }

    info!(from, to, "Route request");

    let (origin, destination) =
        try_join(state.geocoder.geocode(from), state.geocoder.geocode(to)).await?;

    let outcome = state.router.route(origin, destination)?;
    let response = RouteResponse::from_outcome(
        &outcome,
        state.router.network().catalog(),
        origin,
        destination,
    );

    // Return HTML, text or JSON based on Accept header
    if accepts_html(headers) {
        let template = RouteTemplate {
            from: from.to_string(),
            to: to.to_string(),
            route: RouteView::from_response(&response),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else if accepts_text(headers) {
        Ok(plain_text(&outcome))
    } else {
        Ok(Json(response).into_response())
    }
}

/// Route between two coordinates given as JSON.
async fn route_by_coordinates(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so malformed and out-of-range input are both a 400
    let req: CoordinateRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Rejected route body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let outcome = state.router.route(req.origin, req.destination)?;

    if accepts_text(&headers) {
        return Ok(plain_text(&outcome));
    }

    Ok(Json(RouteResponse::from_outcome(
        &outcome,
        state.router.network().catalog(),
        req.origin,
        req.destination,
    ))
    .into_response())
}

/// Render an outcome in the compact text form.
fn plain_text(outcome: &RouteOutcome) -> Response {
    let body = match outcome.itinerary() {
        Some(itinerary) => itinerary.to_string(),
        None => "No route found\n".to_string(),
    };
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, message = self.message(), "Request failed");
        } else {
            warn!(%status, message = self.message(), "Request rejected");
        }
    }

    /// Render as the HTML error page.
    fn into_html_response(self) -> Response {
        self.log();
        let status = self.status();
        let template = ErrorTemplate {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message().to_string(),
        };
        let html = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(html)).into_response()
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NoResults(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        // Network was validated at load time
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}
