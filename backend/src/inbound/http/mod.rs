//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod places;
pub mod schemas;
pub mod state;
pub mod trips;
pub mod trips_dto;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Build the `/api` scope with every REST handler and the shared extractor
/// configuration.
///
/// Malformed JSON bodies and query strings are answered with the standard
/// error envelope instead of actix's plain-text defaults.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(health::status)
        .service(users::register)
        .service(users::login)
        .service(users::me)
        .service(trips::list_trips)
        .service(trips::create_trip)
        .service(trips::get_trip)
        .service(trips::add_activity)
        .service(trips::reorder_activities)
        .service(trips::complete_activity)
        .service(trips::add_expense)
        .service(trips::update_notes)
        .service(trips::delete_trip)
        .service(trips::budget)
        .service(trips::itinerary)
        .service(places::autocomplete)
}
