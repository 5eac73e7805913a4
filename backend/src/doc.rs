//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every `/api` handler, the health checks and the
//! schema wrappers for domain types. Authenticated routes use the `BearerAuth`
//! scheme; registration, login and health opt out per operation.
//!
//! The document backs Swagger UI (debug builds) and is printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ActivityKindSchema, ActivitySchema, DestinationSchema, ErrorCodeSchema, ErrorSchema,
    ExpenseSchema,
};
use crate::inbound::http::trips_dto::{
    ActivitiesEnvelope, AddActivityRequest, AddExpenseRequest, CreateTripRequest,
    ExpensesEnvelope, MessageResponse, NotesResponse, TripEnvelope, TripsEnvelope,
};
use crate::inbound::http::users::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/auth/register or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Trip planner API",
        description = "Accounts, trips with their activities and expenses, and place search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::me,
        crate::inbound::http::trips::list_trips,
        crate::inbound::http::trips::create_trip,
        crate::inbound::http::trips::get_trip,
        crate::inbound::http::trips::add_activity,
        crate::inbound::http::trips::reorder_activities,
        crate::inbound::http::trips::complete_activity,
        crate::inbound::http::trips::add_expense,
        crate::inbound::http::trips::update_notes,
        crate::inbound::http::trips::delete_trip,
        crate::inbound::http::trips::budget,
        crate::inbound::http::trips::itinerary,
        crate::inbound::http::places::autocomplete,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        DestinationSchema,
        ActivitySchema,
        ActivityKindSchema,
        ExpenseSchema,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        MeResponse,
        CreateTripRequest,
        AddActivityRequest,
        AddExpenseRequest,
        TripEnvelope,
        TripsEnvelope,
        ActivitiesEnvelope,
        ExpensesEnvelope,
        NotesResponse,
        MessageResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and the current user"),
        (name = "trips", description = "Trips and their activities, expenses and notes"),
        (name = "places", description = "City autocompletion"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;
