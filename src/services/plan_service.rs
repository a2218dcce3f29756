use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{PlanKind, PlanSlot, PlanSource, PlanState, UserProfile};
use crate::services::document_service::{DocumentRenderer, TextDocumentRenderer};
use crate::services::llm_service::{TextGenerator, DEFAULT_MAX_TOKENS};
use crate::services::plan_rules::{diet_plan, workout_plan};

/// Trailing marker the generator is instructed to emit; its absence means
/// the response was cut off.
const COMPLETION_SENTINEL: &str = "END";

/// Appended to generated text that arrives without the sentinel.
const TRUNCATION_NOTICE: &str = "\n\n[Note: Response ended early by the model]";

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("plan generation is only available in AI mode")]
    WrongMode,
    #[error("no active plan matches the selected mode")]
    ExportUnavailable,
    #[error("plan generation failed: {0}")]
    Generation(#[source] anyhow::Error),
}

/// Rendered export document plus its download filename.
#[derive(Debug, Clone)]
pub struct PlanDocument {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Manages the per-kind plan state machine: Empty -> RuleActive | AiActive.
/// Transitions return new slots; callers commit them to the session.
#[derive(Clone)]
pub struct PlanService {
    generator: Arc<dyn TextGenerator>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl PlanService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            renderer: Arc::new(TextDocumentRenderer),
        }
    }

    /// Apply the generation-mode toggle.
    ///
    /// Switching to AI clears a rule-based plan (generation stays an explicit
    /// action); switching to rule-based recomputes the deterministic plan
    /// synchronously, overwriting whatever was active.
    pub fn switch_mode(&self, slot: &PlanSlot, mode: PlanSource, profile: &UserProfile) -> PlanSlot {
        match mode {
            PlanSource::Ai => {
                let state = match &slot.state {
                    PlanState::RuleActive { .. } => PlanState::Empty,
                    other => other.clone(),
                };
                PlanSlot {
                    kind: slot.kind,
                    mode: PlanSource::Ai,
                    state,
                }
            }
            PlanSource::RuleBased => PlanSlot {
                kind: slot.kind,
                mode: PlanSource::RuleBased,
                state: PlanState::RuleActive {
                    text: rule_plan_text(slot.kind, profile),
                },
            },
        }
    }

    /// Explicit AI-generation action. Only legal while the AI mode is
    /// selected; on any failure the caller keeps the previous slot so no
    /// partial plan is ever stored.
    pub async fn generate(&self, slot: &PlanSlot, profile: &UserProfile) -> Result<PlanSlot, PlanError> {
        if slot.mode != PlanSource::Ai {
            return Err(PlanError::WrongMode);
        }

        let prompt = build_prompt(slot.kind, profile);
        let text = self
            .generator
            .generate(&prompt, DEFAULT_MAX_TOKENS)
            .await
            .map_err(PlanError::Generation)?;

        let text = ensure_complete(text, slot.kind);
        info!(kind = slot.kind.as_str(), "stored AI-generated plan");

        Ok(PlanSlot {
            kind: slot.kind,
            mode: PlanSource::Ai,
            state: PlanState::AiActive { text },
        })
    }

    /// Render the active plan to a downloadable document. Rejected unless the
    /// held plan's source matches the currently selected mode.
    pub fn export(&self, slot: &PlanSlot) -> Result<PlanDocument, PlanError> {
        if !slot.is_exportable() {
            return Err(PlanError::ExportUnavailable);
        }
        let text = slot.state.text().ok_or(PlanError::ExportUnavailable)?;
        Ok(PlanDocument {
            file_name: slot.kind.export_file_name(),
            bytes: self.renderer.render(slot.kind.document_title(), text),
        })
    }
}

/// Deterministic plan text for the rule-based mode.
fn rule_plan_text(kind: PlanKind, profile: &UserProfile) -> String {
    match kind {
        PlanKind::Workout => workout_plan(profile.goal, profile.bmi.unwrap_or_default()).join("\n"),
        PlanKind::Diet => {
            diet_plan(profile.goal, profile.daily_calories, profile.diet_type)
                .meals
                .join("\n")
        }
    }
}

fn ensure_complete(text: String, kind: PlanKind) -> String {
    if text.trim_end().ends_with(COMPLETION_SENTINEL) {
        text
    } else {
        warn!(kind = kind.as_str(), "generated plan missing completion sentinel");
        format!("{text}{TRUNCATION_NOTICE}")
    }
}

/// Kind-specific prompt built from the current profile.
fn build_prompt(kind: PlanKind, profile: &UserProfile) -> String {
    match kind {
        PlanKind::Workout => format!(
            "You are a certified fitness trainer.\n\n\
             Create a structured 7-day workout plan using these details:\n\
             - Age: {}\n\
             - Gender: {}\n\
             - Height: {} cm\n\
             - Weight: {} kg\n\
             - BMI: {:.2}\n\
             - Fitness Goal: {}\n\n\
             Rules:\n\
             - Day-wise plan (Monday–Sunday)\n\
             - Include rest days\n\
             - Beginner friendly\n\
             - Use bullet points\n\
             - End the response with the word END",
            profile.age,
            profile.gender.as_str(),
            profile.height_cm,
            profile.weight_kg,
            profile.bmi.unwrap_or_default(),
            profile.goal.as_str(),
        ),
        PlanKind::Diet => {
            let adjusted = diet_plan(profile.goal, profile.daily_calories, profile.diet_type);
            format!(
                "You are a certified nutritionist.\n\n\
                 Create a daily diet plan using:\n\
                 - Age: {}\n\
                 - Gender: {}\n\
                 - Height: {} cm\n\
                 - Weight: {} kg\n\
                 - Goal: {}\n\
                 - Diet Preference: {}\n\
                 - Activity Level: {}\n\
                 - Daily Calories: {} kcal\n\n\
                 Rules:\n\
                 - Include breakfast, lunch, snacks, dinner\n\
                 - Simple & affordable foods\n\
                 - Beginner friendly\n\
                 - Brief explanation\n\
                 - End with the word END",
                profile.age,
                profile.gender.as_str(),
                profile.height_cm,
                profile.weight_kg,
                profile.goal.as_str(),
                profile.diet_type.as_str(),
                profile.activity_level.as_str(),
                adjusted.calories,
            )
        }
    }
}
