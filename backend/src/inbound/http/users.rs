//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Demo User","email":"demo@example.com","password":"password123"}
//! POST /api/auth/login {"email":"demo@example.com","password":"password123"}
//! GET /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AuthSession, AuthValidationError, Error, LoginCredentials, Registration, User,
    UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Registration request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public user summary; never includes the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Demo User")]
    pub name: String,
    #[schema(example = "demo@example.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
        }
    }
}

/// Token plus user summary returned by register and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token.as_str().to_owned(),
            user: UserResponse::from(&session.user),
        }
    }
}

/// Envelope for `GET /api/auth/me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: UserResponse,
}

fn validation_code(err: &AuthValidationError) -> &'static str {
    match err {
        AuthValidationError::User(inner) => match inner {
            UserValidationError::InvalidId => "invalid_id",
            UserValidationError::EmptyName => "empty_name",
            UserValidationError::NameTooLong { .. } => "name_too_long",
            UserValidationError::EmptyEmail => "empty_email",
            UserValidationError::EmailTooLong { .. } => "email_too_long",
            UserValidationError::InvalidEmail => "invalid_email",
        },
        AuthValidationError::EmptyEmail => "empty_email",
        AuthValidationError::EmptyPassword => "empty_password",
        AuthValidationError::PasswordTooShort { .. } => "password_too_short",
    }
}

fn map_auth_validation_error(err: AuthValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": validation_code(&err),
    }))
}

fn parse_registration(payload: RegisterRequest) -> Result<Registration, Error> {
    let name = require(payload.name, FieldName::new("name"))?;
    let email = require(payload.email, FieldName::new("email"))?;
    let password = require(payload.password, FieldName::new("password"))?;
    Registration::try_from_parts(&name, &email, &password).map_err(map_auth_validation_error)
}

fn parse_login(payload: LoginRequest) -> Result<LoginCredentials, Error> {
    let email = require(payload.email, FieldName::new("email"))?;
    let password = require(payload.password, FieldName::new("password"))?;
    LoginCredentials::try_from_parts(&email, &password).map_err(map_auth_validation_error)
}

/// Create an account and return a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(payload.into_inner())?;
    let session = state.auth.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials = parse_login(payload.into_inner())?;
    let session = state.auth.login(credentials).await?;
    Ok(web::Json(AuthResponse::from(session)))
}

/// Return the caller's own user summary.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser) -> web::Json<MeResponse> {
    web::Json(MeResponse {
        user: UserResponse::from(user.user()),
    })
}
