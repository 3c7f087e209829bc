use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, warn};

use super::evaluation::AssessmentEngine;
use super::validation::{ProfileGuard, ProfileValidationError};

/// Router builder exposing the coverage check endpoint.
pub fn insurance_router(engine: Arc<AssessmentEngine>) -> Router {
    Router::new()
        .route("/insurance/check", post(check_handler))
        .with_state(engine)
}

pub(crate) async fn check_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection @ JsonRejection::MissingJsonContentType(_)) => {
            return rejection.into_response();
        }
        Err(rejection) => {
            let error = ProfileValidationError::malformed_body(rejection.body_text());
            warn!(%error, "rejected malformed insurance check payload");
            return unprocessable(&error);
        }
    };

    match ProfileGuard.profile_from_payload(&payload) {
        Ok(profile) => {
            let recommendation = engine.assess(&profile);
            info!(
                umbrella = %recommendation.umbrella,
                vehicles = profile.vehicles.len(),
                houses = profile.houses.len(),
                "insurance check served"
            );
            (StatusCode::OK, Json(recommendation)).into_response()
        }
        Err(error) => {
            warn!(%error, "rejected invalid insurance check payload");
            unprocessable(&error)
        }
    }
}

fn unprocessable(error: &ProfileValidationError) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(error.detail())).into_response()
}
