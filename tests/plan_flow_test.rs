use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use youthfit::api::routes::create_routes;
use youthfit::api::session::SessionStore;
use youthfit::api::AppState;
use youthfit::services::{CalorieModel, PlanService, ProgressService, TextGenerator};

struct StubGenerator {
    response: Option<&'static str>,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> anyhow::Result<String> {
        match self.response {
            Some(text) => Ok(text.to_string()),
            None => Err(anyhow!("service unavailable")),
        }
    }
}

async fn test_app(generator: StubGenerator) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::migrate!().run(&pool).await.expect("migrations failed");

    let state = AppState {
        sessions: SessionStore::new(),
        progress: ProgressService::new(pool),
        plans: PlanService::new(Arc::new(generator)),
        calorie_model: Arc::new(CalorieModel::fit().expect("model fit failed")),
    };

    create_routes(state)
}

fn profile_body(weight_kg: f64) -> Value {
    json!({
        "age": 30,
        "gender": "Male",
        "height_cm": 175.0,
        "weight_kg": weight_kg,
        "activity_level": "Moderately Active",
        "goal": "Weight Loss",
        "diet_type": "Vegetarian",
    })
}

fn post_json(uri: &str, session: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(id) = session {
        builder = builder.header("x-session-id", id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(id) = session {
        builder = builder.header("x-session-id", id);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn submit_profile(app: &Router) -> String {
    let (status, body) = send(app, post_json("/api/profile", None, &profile_body(70.0))).await;
    assert_eq!(status, StatusCode::OK);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_is_live() {
    let app = test_app(StubGenerator { response: None }).await;
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn submitting_a_profile_returns_derived_metrics() {
    let app = test_app(StubGenerator { response: None }).await;

    let (status, body) = send(&app, post_json("/api/profile", None, &profile_body(70.0))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bmi"], 22.86);
    assert_eq!(body["bmi_category"], "Normal");
    assert_eq!(body["bmr"], 1648.75);
    assert_eq!(body["daily_calories"], 2555);
    assert!(body["session_id"].as_str().is_some());
}

#[tokio::test]
async fn out_of_range_inputs_are_rejected_at_the_boundary() {
    let app = test_app(StubGenerator { response: None }).await;

    let mut body = profile_body(70.0);
    body["age"] = json!(12);
    let (status, _) = send(&app, post_json("/api/profile", None, &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = profile_body(70.0);
    body["weight_kg"] = json!(350.0);
    let (status, _) = send(&app, post_json("/api/profile", None, &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn plan_endpoints_require_a_submitted_profile() {
    let app = test_app(StubGenerator { response: None }).await;

    let (status, _) = send(&app, get("/api/plans/workout/overview", None)).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    let unknown = uuid::Uuid::new_v4().to_string();
    let (status, _) = send(&app, get("/api/plans/diet/overview", Some(&unknown))).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    let (status, _) = send(&app, get("/api/progress", None)).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn workout_overview_carries_bmi_analysis() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    let (status, body) = send(&app, get("/api/plans/workout/overview", Some(&session))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bmi"], 22.86);
    assert_eq!(body["bmi_category"], "Normal");
    assert_eq!(body["plan"]["mode"], "ai");
    assert_eq!(body["plan"]["text"], Value::Null);
    assert_eq!(body["weekly_schedule"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn diet_overview_carries_calorie_targets_and_macros() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    let (status, body) = send(&app, get("/api/plans/diet/overview", Some(&session))).await;

    assert_eq!(status, StatusCode::OK);
    // 2555 daily calories minus the 400 kcal weight-loss adjustment
    assert_eq!(body["formula_calories"], 2155);
    assert_eq!(body["protein"], "Paneer, Dal, Tofu");
    assert_eq!(body["meals"].as_array().unwrap().len(), 3);
    assert_eq!(body["macros"]["protein_kcal"].as_f64().unwrap(), 2155.0 * 0.30);
    assert!(body["ml_calories"].as_i64().unwrap() > 1000);
}

#[tokio::test]
async fn rule_mode_yields_a_plan_synchronously_and_exports() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    let (status, body) = send(
        &app,
        post_json("/api/plans/workout/mode", Some(&session), &json!({ "mode": "rule_based" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "rule_based");
    assert_eq!(body["source"], "rule_based");
    assert!(body["text"].as_str().unwrap().contains("Cardio"));
    assert_eq!(body["exportable"], true);

    let response = app
        .clone()
        .oneshot(get("/api/plans/workout/export", Some(&session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("YOUTHFIT_AI_Workout_Plan"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let document = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(document.starts_with("YOUTHFIT AI – Workout Plan"));
}

#[tokio::test]
async fn toggling_to_ai_clears_the_rule_plan() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    send(
        &app,
        post_json("/api/plans/diet/mode", Some(&session), &json!({ "mode": "rule_based" })),
    )
    .await;
    let (status, body) = send(
        &app,
        post_json("/api/plans/diet/mode", Some(&session), &json!({ "mode": "ai" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "ai");
    assert_eq!(body["source"], Value::Null);
    assert_eq!(body["text"], Value::Null);
    assert_eq!(body["exportable"], false);
}

#[tokio::test]
async fn ai_generation_stores_the_returned_text() {
    let app = test_app(StubGenerator { response: Some("Monday: rest\nEND") }).await;
    let session = submit_profile(&app).await;

    let (status, body) = send(
        &app,
        post_json("/api/plans/workout/generate", Some(&session), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "ai");
    assert_eq!(body["text"], "Monday: rest\nEND");
    assert_eq!(body["exportable"], true);

    let response = app
        .clone()
        .oneshot(get("/api/plans/workout/export", Some(&session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn truncated_generation_gets_a_notice_appended() {
    let app = test_app(StubGenerator { response: Some("Monday: squats and") }).await;
    let session = submit_profile(&app).await;

    let (_, body) = send(
        &app,
        post_json("/api/plans/diet/generate", Some(&session), &json!({})),
    )
    .await;

    assert!(body["text"]
        .as_str()
        .unwrap()
        .ends_with("[Note: Response ended early by the model]"));
}

#[tokio::test]
async fn failed_generation_surfaces_an_error_and_keeps_state() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    let (status, _) = send(
        &app,
        post_json("/api/plans/workout/generate", Some(&session), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = send(&app, get("/api/plans/workout/overview", Some(&session))).await;
    assert_eq!(body["plan"]["text"], Value::Null);
    assert_eq!(body["plan"]["source"], Value::Null);
}

#[tokio::test]
async fn generation_is_rejected_in_rule_mode() {
    let app = test_app(StubGenerator { response: Some("END") }).await;
    let session = submit_profile(&app).await;

    send(
        &app,
        post_json("/api/plans/workout/mode", Some(&session), &json!({ "mode": "rule_based" })),
    )
    .await;
    let (status, _) = send(
        &app,
        post_json("/api/plans/workout/generate", Some(&session), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn export_is_rejected_without_an_active_matching_plan() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    // AI mode selected, nothing generated yet
    let (status, _) = send(&app, get("/api/plans/workout/export", Some(&session))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn progress_reports_the_latest_same_day_submission() {
    let app = test_app(StubGenerator { response: None }).await;
    let session = submit_profile(&app).await;

    // resubmission on the same day overwrites the session and appends a row
    let (status, body) = send(
        &app,
        post_json("/api/profile", Some(&session), &profile_body(69.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"].as_str().unwrap(), session);

    let (status, body) = send(&app, get("/api/progress", Some(&session))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "summary");
    assert_eq!(body["days_tracked"], 1);
    assert_eq!(body["latest_weight"], 69.0);
    assert_eq!(body["weight_change"], 0.0);
    assert_eq!(body["trend"], "stable");
    assert_eq!(body["health"]["goal"], "Weight Loss");
    assert!(body["health"]["daily_calories"].as_i64().unwrap() > 0);
}
