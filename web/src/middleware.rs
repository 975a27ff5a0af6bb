//! Request tracking middleware.
//!
//! Every request gets a correlation id:
//!
//! 1. **Extract** it from the `X-Correlation-ID` header when that is a valid UUID,
//!    otherwise generate a new one
//! 2. **Store** it in request extensions as [`CorrelationId`]
//! 3. **Run** the handler inside an `http_request` tracing span carrying it
//! 4. **Echo** it back in the response `X-Correlation-ID` header
//!
//! ```ignore
//! use axum::{middleware, Router};
//! use todolist_web::middleware::correlation_id;
//!
//! let app = Router::new()
//!     .route("/todos", get(list_todos))
//!     .layer(middleware::from_fn(correlation_id));
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Correlation id of the current request, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
    /// Read the id from request headers, generating a new one when the header
    /// is missing or not a UUID.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self(id)
    }
}

/// Middleware function attaching a correlation id to the request, its span,
/// and the response.
pub async fn correlation_id(mut req: Request, next: Next) -> Response {
    let correlation_id = CorrelationId::from_headers(req.headers());
    req.extensions_mut().insert(correlation_id);

    let span = tracing::info_span!(
        "http_request",
        correlation_id = %correlation_id.0,
        method = %req.method(),
        uri = %req.uri(),
    );

    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.0.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}
