use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::errors::ApiError;
use super::session::SessionId;
use super::AppState;
use crate::models::{
    BmiCategory, Goal, ProgressReport, ProgressSummary, WeightObservation, WeightTrend,
};
use crate::services::calculations::bmi_category;

/// Session-derived figures shown beside the weight series.
#[derive(Debug, Serialize)]
pub struct HealthSummary {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub daily_calories: i64,
    pub goal: Goal,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgressResponse {
    NoData {
        message: &'static str,
    },
    Summary {
        series: Vec<WeightObservation>,
        latest_weight: f64,
        start_weight: f64,
        weight_change: f64,
        days_tracked: usize,
        trend: WeightTrend,
        health: HealthSummary,
    },
}

/// Progress dashboard data: the cleaned weight series with its summary
/// scalars, or the explicit no-data state.
pub async fn progress_report(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<ProgressResponse>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or(ApiError::MissingProfile)?;
    let bmi = session.profile.bmi.ok_or(ApiError::MissingProfile)?;

    let response = match state.progress.report().await? {
        ProgressReport::NoData => ProgressResponse::NoData {
            message: "No progress data recorded yet. Submit your details to start tracking.",
        },
        ProgressReport::Summary(ProgressSummary {
            series,
            latest_weight,
            start_weight,
            weight_change,
            days_tracked,
        }) => ProgressResponse::Summary {
            series,
            latest_weight,
            start_weight,
            weight_change,
            days_tracked,
            trend: WeightTrend::from_change(weight_change),
            health: HealthSummary {
                bmi,
                bmi_category: bmi_category(bmi),
                daily_calories: session.profile.daily_calories,
                goal: session.profile.goal,
            },
        },
    };

    Ok(Json(response))
}
