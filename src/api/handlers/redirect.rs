//! Handler for slug redirects and QR images.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::application::services::redirect_target::{qr_target, redirect_target, wants_qr};
use crate::application::services::{Resolution, ResolvedLink};
use crate::domain::entities::AccessRecord;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::{client_ip, header_str};
use crate::utils::query::parse_query;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Resolves a request path to a redirect or a QR image.
///
/// # Endpoints
///
/// `GET /` and `GET /{*path}`
///
/// # Request Flow
///
/// 1. Resolve the path (home URL, slug validation, store lookups)
/// 2. With `showQR=true`: render the target as SVG and return 200
/// 3. Otherwise: notify the access log (best effort) and redirect
///
/// # Response Codes
///
/// - **302 Found**: Root path with a configured home URL
/// - **3xx** (configured, default 301): Slug found
/// - **200 OK** `image/svg+xml`: Slug found and `showQR=true`
/// - **404 Not Found**: Invalid, reserved, or unknown slug
/// - **500 Internal Server Error**: Store or encoder failure
///
/// # Access Log
///
/// Only plain redirects are logged. A failed write is logged and counted;
/// the redirect is still returned.
pub async fn redirect_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let (parts, _) = request.into_parts();
    let path = parts.uri.path();
    let query = parse_query(parts.uri.query());

    let resolved = match state.resolver.resolve(path).await? {
        Resolution::Home(url) => return location_response(StatusCode::FOUND, &url),
        Resolution::NoMatch => {
            debug!(path, "no link for path");
            return Err(AppError::not_found(
                "Link not found",
                json!({ "path": path }),
            ));
        }
        Resolution::Found(resolved) => resolved,
    };

    let policy = state.policy();

    if wants_qr(&query) {
        let target = qr_target(&resolved.link, &query, policy.redirect_with_query);
        let svg = state.qr_renderer.render(&target)?;
        metrics::counter!("qr_renders_total").increment(1);
        debug!(slug = %resolved.slug, "QR rendered");

        return Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response());
    }

    record_access(&state, &parts, &resolved).await;

    let target = redirect_target(&resolved.link, &query, policy.redirect_with_query);
    metrics::counter!("redirects_total").increment(1);
    debug!(slug = %resolved.slug, target = %target, "redirecting");

    location_response(policy.redirect_status, &target)
}

/// Notifies the access log. Failures never reach the caller.
async fn record_access(state: &AppState, parts: &Parts, resolved: &ResolvedLink) {
    let headers = &parts.headers;
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let record = AccessRecord::new(
        resolved.slug.clone(),
        resolved.link.url.clone(),
        client_ip(headers, peer, state.behind_proxy),
        header_str(headers, header::USER_AGENT),
        header_str(headers, header::REFERER),
        header_str(headers, header::ACCEPT_LANGUAGE),
    );

    if let Err(e) = state.access_log.write(record).await {
        metrics::counter!("access_log_failures_total").increment(1);
        error!(slug = %resolved.slug, "Failed to record access: {}", e);
    }
}

fn location_response(status: StatusCode, target: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(target).map_err(|e| {
        AppError::internal(
            "Redirect target is not a valid header value",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok((status, [(header::LOCATION, location)]).into_response())
}
