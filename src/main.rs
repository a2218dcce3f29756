use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use youthfit::api::routes::create_routes;
use youthfit::api::session::SessionStore;
use youthfit::api::AppState;
use youthfit::config::{AppConfig, DatabaseConfig};
use youthfit::services::{CalorieModel, HfTextGenerator, PlanService, ProgressService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Missing credential is a startup failure, not a runtime error
    let config = AppConfig::from_env()?;
    let database = DatabaseConfig::from_env()?;

    let pool = database.create_pool().await?;
    sqlx::migrate!().run(&pool).await?;

    let generator = Arc::new(HfTextGenerator::new(config.hf_api_token.clone()));
    let calorie_model = Arc::new(CalorieModel::fit()?);

    let state = AppState {
        sessions: SessionStore::new(),
        progress: ProgressService::new(pool),
        plans: PlanService::new(generator),
        calorie_model,
    };

    let app = create_routes(state);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("YouthFit server starting on http://{}", config.server_address());
    info!("Health check available at http://{}/health", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
