//! Shared harness for HTTP integration tests.
//!
//! Builds the full application over the in-memory repositories, real bcrypt
//! hashing (minimum cost) and real JWT signing.
#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use trip_planner::Trace;
use trip_planner::domain::ports::FixturePlaceSearch;
use trip_planner::domain::{AuthService, TripService};
use trip_planner::inbound::http::api_scope;
use trip_planner::inbound::http::error::not_found;
use trip_planner::inbound::http::state::{HttpState, HttpStatePorts};
use trip_planner::outbound::memory::{InMemoryTripRepository, InMemoryUserRepository};
use trip_planner::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};

const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";
const TEST_BCRYPT_COST: u32 = 4;

/// Application wired exactly like the server, minus CORS and Swagger.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let auth = Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
        Arc::new(JwtTokenCodec::new(
            TEST_SECRET,
            Duration::days(7),
            Arc::clone(&clock),
        )),
    ));
    let trips = Arc::new(TripService::new(
        Arc::new(InMemoryTripRepository::new()),
        clock,
    ));
    let state = HttpState::new(HttpStatePorts {
        auth: auth.clone(),
        tokens: auth,
        trips: trips.clone(),
        trips_query: trips,
        places: Arc::new(FixturePlaceSearch),
    });

    App::new()
        .app_data(web::Data::new(state))
        .service(api_scope())
        .default_service(web::route().to(not_found))
        .wrap(Trace)
}

/// Send `request` and decode the JSON body alongside the status.
pub async fn send<S, B>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, request.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, body)
}

pub fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

/// Register an account and return its bearer token.
pub async fn register<S, B>(app: &S, name: &str, email: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": name, "email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().expect("token string").to_owned()
}

/// Create a trip titled `title` and return its id.
pub async fn create_trip<S, B>(app: &S, token: &str, title: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        bearer(TestRequest::post().uri("/api/trips"), token).set_json(json!({"title": title})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create trip failed: {body}");
    body["trip"]["id"].as_str().expect("trip id").to_owned()
}
