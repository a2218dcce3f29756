use serde::{Deserialize, Serialize};

use super::plan::{PlanKind, PlanSlot};
use super::profile::UserProfile;

/// Per-session state: the current profile plus one plan slot per kind.
/// Submitting a new profile replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub profile: UserProfile,
    pub workout: PlanSlot,
    pub diet: PlanSlot,
}

impl Session {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            workout: PlanSlot::new(PlanKind::Workout),
            diet: PlanSlot::new(PlanKind::Diet),
        }
    }

    pub fn slot(&self, kind: PlanKind) -> &PlanSlot {
        match kind {
            PlanKind::Workout => &self.workout,
            PlanKind::Diet => &self.diet,
        }
    }

    pub fn set_slot(&mut self, slot: PlanSlot) {
        match slot.kind {
            PlanKind::Workout => self.workout = slot,
            PlanKind::Diet => self.diet = slot,
        }
    }
}
