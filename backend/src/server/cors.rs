//! CORS policy for the browser client.

use actix_cors::Cors;
use actix_web::http::{Method, header};

use trip_planner::domain::TRACE_ID_HEADER;

const MAX_AGE_SECONDS: usize = 3600;

/// Allow the configured client origin, with credentials, on every verb the
/// API exposes.
pub(crate) fn build_cors(client_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(client_origin)
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .supports_credentials()
        .max_age(MAX_AGE_SECONDS)
}
