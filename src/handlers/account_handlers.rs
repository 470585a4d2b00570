use crate::error::{AppError, Result};
use crate::models::account::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::AppState;
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use tracing::instrument;

/// POST /api/signup (multipart form, optional `profilePicture` file)
pub async fn signup_handler(
    State(app_state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let mut multipart = multipart?;
    let mut request = RegisterRequest::default();
    let mut picture: Option<(Option<String>, axum::body::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "profilePicture" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                // Browsers send an empty part when no file was chosen.
                if !data.is_empty() {
                    picture = Some((file_name, data));
                }
            }
            "username" => request.username = Some(field.text().await?),
            "email" => request.email = Some(field.text().await?),
            "password" => request.password = Some(field.text().await?),
            "category" => request.category = Some(field.text().await?),
            "trustScore" => {
                request.trust_score = parse_count("trustScore", &field.text().await?)?;
            }
            "followers" => {
                request.followers = parse_count("followers", &field.text().await?)?;
            }
            _ => {}
        }
    }

    if let Some((file_name, data)) = picture {
        let reference = app_state
            .upload_store
            .save(file_name.as_deref(), &data)
            .await?;
        request.profile_picture = Some(reference);
    }

    let stored_picture = request.profile_picture.clone();
    match app_state.account_service.register(request).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "User created".to_string(),
            }),
        )),
        Err(err) => {
            if let Some(reference) = stored_picture {
                app_state.upload_store.discard(&reference).await;
            }
            Err(err.into())
        }
    }
}

/// POST /api/login
#[instrument(skip(app_state, payload))]
pub async fn login_handler(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;
    let response = app_state.account_service.login(request).await?;
    Ok(Json(response))
}

/// Blank input counts as absent; anything else must be a whole number.
fn parse_count(field: &str, raw: &str) -> Result<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{} must be a whole number", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_keeps_zero() {
        assert_eq!(parse_count("followers", "0").unwrap(), Some(0));
        assert_eq!(parse_count("followers", " 12 ").unwrap(), Some(12));
        assert_eq!(parse_count("followers", "").unwrap(), None);
        assert!(parse_count("followers", "1.5").is_err());
        assert!(parse_count("followers", "many").is_err());
    }
}
