use axum::extract::State;
use axum::Json;
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::errors::ApiError;
use super::session::SessionId;
use super::AppState;
use crate::models::{
    ActivityLevel, BmiCategory, DietType, Gender, Goal, Session, UserProfile,
};
use crate::services::calculations::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_daily_calories,
};

#[derive(Debug, Deserialize)]
pub struct SubmitProfileRequest {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_type: DietType,
}

impl SubmitProfileRequest {
    /// Form-level range constraints. Out-of-range values never reach the
    /// calculators.
    fn validate(&self) -> Result<(), String> {
        if !(15..=70).contains(&self.age) {
            return Err(format!("age must be between 15 and 70, got {}", self.age));
        }
        if !(50.0..=250.0).contains(&self.height_cm) {
            return Err(format!("height_cm must be between 50 and 250, got {}", self.height_cm));
        }
        if !(20.0..=300.0).contains(&self.weight_kg) {
            return Err(format!("weight_kg must be between 20 and 300, got {}", self.weight_kg));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitProfileResponse {
    pub session_id: Uuid,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub bmr: f64,
    pub daily_calories: i64,
    pub success: bool,
}

/// Submit body metrics: derive BMI/BMR/calories, reset the session's plan
/// slots and append one progress record dated today. Reuses the session id
/// from the `X-Session-Id` header when one is presented.
pub async fn submit_profile(
    State(state): State<AppState>,
    session: Option<SessionId>,
    WithRejection(Json(request), _): WithRejection<Json<SubmitProfileRequest>, ApiError>,
) -> Result<Json<SubmitProfileResponse>, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let bmi = calculate_bmi(request.weight_kg, request.height_cm);
    let bmr = calculate_bmr(request.gender, request.weight_kg, request.height_cm, request.age);
    let daily_calories = calculate_daily_calories(bmr, request.activity_level);

    let profile = UserProfile {
        age: request.age,
        gender: request.gender,
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        activity_level: request.activity_level,
        goal: request.goal,
        diet_type: request.diet_type,
        bmi,
        bmr,
        daily_calories,
    };

    let today = Utc::now().date_naive();
    state.progress.record(&profile, today).await?;

    let session_value = Session::new(profile);
    let existing = match &session {
        Some(SessionId(id)) => state.sessions.get(*id).await.map(|_| *id),
        None => None,
    };
    let session_id = match existing {
        Some(id) => {
            state.sessions.set(id, session_value).await;
            id
        }
        None => state.sessions.create(session_value).await,
    };

    info!(%session_id, "profile submitted");

    Ok(Json(SubmitProfileResponse {
        session_id,
        bmi,
        bmi_category: bmi.map(bmi_category),
        bmr,
        daily_calories,
        success: true,
    }))
}
