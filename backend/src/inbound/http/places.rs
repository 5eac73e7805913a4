//! Place autocompletion handler.
//!
//! ```text
//! GET /api/places/autocomplete?q=Par
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query string for [`autocomplete`].
#[derive(Debug, Deserialize, IntoParams)]
pub struct AutocompleteParams {
    /// Free text typed by the user.
    pub q: Option<String>,
}

/// Provider predictions, passed through untouched.
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionsResponse {
    #[schema(value_type = Vec<Object>)]
    pub predictions: Vec<Value>,
}

/// Suggest cities matching the query.
#[utoipa::path(
    get,
    path = "/api/places/autocomplete",
    params(AutocompleteParams),
    responses(
        (status = 200, description = "City predictions", body = PredictionsResponse),
        (status = 400, description = "Query required", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Provider unavailable or not configured", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "autocompletePlaces"
)]
#[get("/places/autocomplete")]
pub async fn autocomplete(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    params: web::Query<AutocompleteParams>,
) -> ApiResult<web::Json<PredictionsResponse>> {
    let raw_query = params.into_inner().q.unwrap_or_default();
    let predictions = state.places.autocomplete(&raw_query).await?;
    Ok(web::Json(PredictionsResponse { predictions }))
}
