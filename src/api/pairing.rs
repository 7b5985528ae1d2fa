use axum::{Json, extract::State, response::Response};
use serde_json::{Value, json};

use super::{ApiError, JsonOrForm};
use crate::{
    management::PairingError,
    server::AppState,
    types::{PairRequest, VerifyPairRequest},
};

const INVALID_NUMBER: ApiError = ApiError::bad_request("Invalid phone number");
const ISSUE_FAILED: ApiError = ApiError::internal("Failed to generate pair code");
const INVALID_CODE: ApiError = ApiError::not_found("Invalid or expired pair code");
const VERIFY_FAILED: ApiError = ApiError::internal("Verification failed");

/// `POST /api/pair` issues a pairing code for `{ "number": "..." }`.
///
/// A missing body, a missing or non-string `number`, or one shorter than ten
/// characters is rejected with 400 and nothing is stored.
pub async fn pair(
    State(state): State<AppState>,
    body: Result<JsonOrForm<PairRequest>, Response>,
) -> Result<Json<Value>, ApiError> {
    let number = match body {
        Ok(JsonOrForm(PairRequest {
            number: Some(Value::String(number)),
        })) => number,
        _ => return Err(INVALID_NUMBER),
    };

    match state.pairing.issue(&number).await {
        Ok(issued) => Ok(Json(json!({
            "success": true,
            "code": issued.code,
            "message": issued.message,
        }))),
        Err(PairingError::InvalidInput) => Err(INVALID_NUMBER),
        Err(e) => {
            tracing::error!(error = %e, "pair code issuance failed");
            Err(ISSUE_FAILED)
        }
    }
}

/// `POST /api/verify-pair` consumes a pairing code sent as `{ "code": "..." }`.
///
/// Unknown, consumed and expired codes all answer 404 with the same body.
pub async fn verify_pair(
    State(state): State<AppState>,
    body: Result<JsonOrForm<VerifyPairRequest>, Response>,
) -> Result<Json<Value>, ApiError> {
    let Some(code) = body.ok().and_then(|JsonOrForm(req)| req.code) else {
        return Err(INVALID_CODE);
    };

    match state.pairing.verify(&code).await {
        Ok(verified) => Ok(Json(json!({
            "success": true,
            "number": verified.number,
            "message": verified.message,
        }))),
        Err(PairingError::StoreUnavailable(e)) => {
            tracing::error!(error = %e, "pair code verification failed");
            Err(VERIFY_FAILED)
        }
        Err(_) => Err(INVALID_CODE),
    }
}
