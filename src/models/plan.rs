use serde::{Deserialize, Serialize};

/// The two plan surfaces the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Workout,
    Diet,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Workout => "workout",
            PlanKind::Diet => "diet",
        }
    }

    /// Title printed on the exported document.
    pub fn document_title(&self) -> &'static str {
        match self {
            PlanKind::Workout => "YOUTHFIT AI – Workout Plan",
            PlanKind::Diet => "YOUTHFIT AI – Diet Plan",
        }
    }

    /// Download filename for the exported document.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            PlanKind::Workout => "YOUTHFIT_AI_Workout_Plan.txt",
            PlanKind::Diet => "YOUTHFIT_AI_Diet_Plan.txt",
        }
    }
}

/// Tag distinguishing an AI-generated from a rule-based plan. Doubles as the
/// generation-mode toggle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Ai,
    RuleBased,
}

/// Per-kind plan state. A source tag exists iff text exists, which the
/// variants encode directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlanState {
    Empty,
    RuleActive { text: String },
    AiActive { text: String },
}

impl PlanState {
    pub fn source(&self) -> Option<PlanSource> {
        match self {
            PlanState::Empty => None,
            PlanState::RuleActive { .. } => Some(PlanSource::RuleBased),
            PlanState::AiActive { .. } => Some(PlanSource::Ai),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            PlanState::Empty => None,
            PlanState::RuleActive { text } | PlanState::AiActive { text } => Some(text),
        }
    }
}

/// Current toggle position plus the currently held plan for one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSlot {
    pub kind: PlanKind,
    pub mode: PlanSource,
    pub state: PlanState,
}

impl PlanSlot {
    /// Fresh slot: AI mode selected, nothing generated yet.
    pub fn new(kind: PlanKind) -> Self {
        Self {
            kind,
            mode: PlanSource::Ai,
            state: PlanState::Empty,
        }
    }

    /// True when the held plan's source matches the selected mode, which is
    /// the precondition for exporting it.
    pub fn is_exportable(&self) -> bool {
        self.state.source() == Some(self.mode)
    }
}

/// Deterministic diet plan produced by the rule tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlan {
    pub calories: i64,
    pub protein: String,
    pub meals: Vec<String>,
}

/// Formula-based calorie breakdown across macronutrients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_kcal: f64,
    pub carbs_kcal: f64,
    pub fats_kcal: f64,
}
