use crate::error::{AppError, Result};
use crate::models::{account::VerifyRequest, user::Claim};
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};

/// POST /api/verify
///
/// Returns a simulated verdict. The result is not attached to any user.
/// The body is read as JSON whatever its content type; an empty body is the
/// same as an empty claim text.
pub async fn verify_claim_handler(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<Claim>> {
    let request = parse_verify_request(&body)?;
    Ok(Json(app_state.claim_service.verify(&request.claim_text)))
}

fn parse_verify_request(body: &[u8]) -> Result<VerifyRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(VerifyRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Malformed JSON body: {}", e)))
}
