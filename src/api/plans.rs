use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use super::errors::ApiError;
use super::session::SessionId;
use super::AppState;
use crate::models::{
    BmiCategory, DietPlan, MacroSplit, PlanKind, PlanSlot, PlanSource, Session,
};
use crate::services::calculations::{bmi_category, bmi_scale_ratio};
use crate::services::plan_rules::{diet_plan, macro_split, NUTRITION_TIPS, WEEKLY_SCHEDULE};

/// Flattened slot view returned by every plan endpoint.
#[derive(Debug, Serialize)]
pub struct PlanSlotView {
    pub kind: PlanKind,
    pub mode: PlanSource,
    pub source: Option<PlanSource>,
    pub text: Option<String>,
    pub exportable: bool,
}

impl PlanSlotView {
    fn from_slot(slot: &PlanSlot) -> Self {
        Self {
            kind: slot.kind,
            mode: slot.mode,
            source: slot.state.source(),
            text: slot.state.text().map(str::to_string),
            exportable: slot.is_exportable(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PlanOverviewResponse {
    Workout {
        bmi: f64,
        bmi_category: BmiCategory,
        bmi_scale: f64,
        weekly_schedule: Vec<&'static str>,
        plan: PlanSlotView,
    },
    Diet {
        formula_calories: i64,
        ml_calories: i64,
        protein: String,
        meals: Vec<String>,
        macros: MacroSplit,
        nutrition_tips: Vec<&'static str>,
        plan: PlanSlotView,
    },
}

async fn load_session(state: &AppState, id: uuid::Uuid) -> Result<Session, ApiError> {
    state.sessions.get(id).await.ok_or(ApiError::MissingProfile)
}

/// Kind-specific overview: the data the corresponding page renders before
/// any plan is generated.
pub async fn plan_overview(
    Path(kind): Path<PlanKind>,
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<PlanOverviewResponse>, ApiError> {
    let session = load_session(&state, session_id).await?;
    let profile = &session.profile;
    let slot = session.slot(kind);

    let response = match kind {
        PlanKind::Workout => {
            let bmi = profile.bmi.ok_or(ApiError::MissingProfile)?;
            PlanOverviewResponse::Workout {
                bmi,
                bmi_category: bmi_category(bmi),
                bmi_scale: bmi_scale_ratio(bmi),
                weekly_schedule: WEEKLY_SCHEDULE.to_vec(),
                plan: PlanSlotView::from_slot(slot),
            }
        }
        PlanKind::Diet => {
            let DietPlan { calories, protein, meals } =
                diet_plan(profile.goal, profile.daily_calories, profile.diet_type);
            let ml_calories = state.calorie_model.predict_calories(
                profile.age,
                profile.weight_kg,
                profile.height_cm,
                profile.activity_level.factor(),
            );
            PlanOverviewResponse::Diet {
                formula_calories: calories,
                ml_calories,
                protein,
                meals,
                macros: macro_split(calories),
                nutrition_tips: NUTRITION_TIPS.to_vec(),
                plan: PlanSlotView::from_slot(slot),
            }
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct SwitchModeRequest {
    pub mode: PlanSource,
}

/// Flip the generation-mode toggle for one plan kind.
pub async fn switch_mode(
    Path(kind): Path<PlanKind>,
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    WithRejection(Json(request), _): WithRejection<Json<SwitchModeRequest>, ApiError>,
) -> Result<Json<PlanSlotView>, ApiError> {
    let mut session = load_session(&state, session_id).await?;
    let slot = state
        .plans
        .switch_mode(session.slot(kind), request.mode, &session.profile);
    let view = PlanSlotView::from_slot(&slot);

    session.set_slot(slot);
    state.sessions.set(session_id, session).await;

    Ok(Json(view))
}

/// Explicit AI-generation action. The session lock is not held across the
/// external call; on failure nothing is committed.
pub async fn generate_plan(
    Path(kind): Path<PlanKind>,
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<PlanSlotView>, ApiError> {
    let mut session = load_session(&state, session_id).await?;

    let slot = state.plans.generate(session.slot(kind), &session.profile).await?;
    let view = PlanSlotView::from_slot(&slot);

    session.set_slot(slot);
    state.sessions.set(session_id, session).await;

    Ok(Json(view))
}

/// Download the active plan as a document. Rejected unless the held plan's
/// source matches the selected mode.
pub async fn export_plan(
    Path(kind): Path<PlanKind>,
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<impl IntoResponse, ApiError> {
    let session = load_session(&state, session_id).await?;
    let document = state.plans.export(session.slot(kind))?;

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ),
    ];

    Ok((headers, document.bytes))
}
