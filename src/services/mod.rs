// Business logic services

pub mod calculations;
pub mod document_service;
pub mod llm_service;
pub mod ml_model_service;
pub mod plan_rules;
pub mod plan_service;
pub mod progress_service;

pub use document_service::{DocumentRenderer, TextDocumentRenderer};
pub use llm_service::{HfTextGenerator, TextGenerator};
pub use ml_model_service::CalorieModel;
pub use plan_service::{PlanDocument, PlanError, PlanService};
pub use progress_service::ProgressService;
