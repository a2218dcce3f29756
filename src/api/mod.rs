// API routes and handlers

pub mod errors;
pub mod health;
pub mod plans;
pub mod profile;
pub mod progress;
pub mod routes;
pub mod session;

use std::sync::Arc;

use crate::services::{CalorieModel, PlanService, ProgressService};
use self::session::SessionStore;

/// Shared handler state: the session map plus the service layer.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub progress: ProgressService,
    pub plans: PlanService,
    pub calorie_model: Arc<CalorieModel>,
}
