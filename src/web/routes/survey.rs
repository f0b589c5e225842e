use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::services::demographics_service::{self, DemographicsOutcome};
use crate::services::label_service::{self, SubmitLabelOutcome};
use crate::services::session_service;
use crate::web::error::ApiError;
use crate::web::AppState;

pub async fn start_survey_session_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let mut rng = state.sample_rng();
    let session = session_service::start_session(&state.pool, &mut rng).await?;

    info!(
        "survey session started: participant_id={}, images={}",
        session.participant_id,
        session.images.len()
    );

    Ok(Json(json!({
        "participant_id": session.participant_id,
        "images": session.images,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SubmitLabelBody {
    participant_id: Option<i64>,
    image_id: Option<i64>,
    rating: Option<i64>,
}

pub async fn submit_survey_label_handler(
    State(state): State<AppState>,
    Json(body): Json<SubmitLabelBody>,
) -> Result<Json<Value>, ApiError> {
    let participant_id = body
        .participant_id
        .ok_or(ApiError::MissingField("participant_id"))?;
    let image_id = body.image_id.ok_or(ApiError::MissingField("image_id"))?;
    // Zero is a valid rating; only absence (or JSON null) is rejected.
    let rating = body.rating.ok_or(ApiError::MissingField("rating"))?;

    match label_service::submit_label(&state.pool, participant_id, image_id, rating).await? {
        SubmitLabelOutcome::Created => Ok(Json(json!({ "success": true }))),
        SubmitLabelOutcome::RatingOutOfRange => Err(ApiError::RatingOutOfRange(rating)),
        SubmitLabelOutcome::ParticipantMissing => Err(ApiError::ParticipantNotFound(participant_id)),
        SubmitLabelOutcome::ImageMissing => Err(ApiError::ImageNotFound(image_id)),
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitDemographicsBody {
    participant_id: Option<i64>,
    age: Option<Value>,
    gender: Option<String>,
}

pub async fn submit_demographics_handler(
    State(state): State<AppState>,
    Json(body): Json<SubmitDemographicsBody>,
) -> Result<Json<Value>, ApiError> {
    let participant_id = body
        .participant_id
        .ok_or(ApiError::MissingField("participant_id"))?;
    let age = parse_optional_age(body.age.as_ref())?;

    let outcome = demographics_service::submit_demographics(
        &state.pool,
        participant_id,
        age,
        body.gender.as_deref(),
    )
    .await?;

    match outcome {
        DemographicsOutcome::Updated => Ok(Json(json!({ "success": true }))),
        DemographicsOutcome::ParticipantMissing => Err(ApiError::ParticipantNotFound(participant_id)),
    }
}

/// Age arrives as a JSON number or as a string (browser form values).
/// An empty string means the question was left unanswered.
fn parse_optional_age(age: Option<&Value>) -> Result<Option<i64>, ApiError> {
    let Some(age) = age else {
        return Ok(None);
    };
    match age {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_i64().map(Some).ok_or(ApiError::InvalidAge),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>().map(Some).map_err(|_| ApiError::InvalidAge)
        }
        _ => Err(ApiError::InvalidAge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_accepts_integers_and_numeric_strings() {
        assert_eq!(parse_optional_age(Some(&json!(34))).unwrap(), Some(34));
        assert_eq!(parse_optional_age(Some(&json!("34"))).unwrap(), Some(34));
        assert_eq!(parse_optional_age(Some(&json!(" 34 "))).unwrap(), Some(34));
        assert_eq!(parse_optional_age(None).unwrap(), None);
        assert_eq!(parse_optional_age(Some(&Value::Null)).unwrap(), None);
        assert_eq!(parse_optional_age(Some(&json!(""))).unwrap(), None);
    }

    #[test]
    fn age_rejects_non_integers() {
        assert!(parse_optional_age(Some(&json!("abc"))).is_err());
        assert!(parse_optional_age(Some(&json!(33.5))).is_err());
        assert!(parse_optional_age(Some(&json!([1]))).is_err());
    }
}
