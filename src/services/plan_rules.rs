use crate::models::{DietPlan, DietType, Goal, MacroSplit};

/// Static weekly schedule shown with the rule-based workout plan.
pub const WEEKLY_SCHEDULE: &[&str] = &[
    "Monday – Cardio",
    "Tuesday – Upper Body",
    "Wednesday – Rest",
    "Thursday – Lower Body",
    "Friday – Core",
    "Saturday – Optional Cardio",
    "Sunday – Rest",
];

/// Static tips shown with the rule-based diet plan.
pub const NUTRITION_TIPS: &[&str] = &[
    "Drink at least 3L water daily",
    "Avoid processed sugar",
    "Eat every 3–4 hours",
    "Maintain sufficient protein intake",
];

/// Fixed exercise list per goal. The BMI argument is accepted but does not
/// affect the output yet; it is kept as a hook for BMI-aware adjustments.
pub fn workout_plan(goal: Goal, _bmi: f64) -> Vec<&'static str> {
    match goal {
        Goal::WeightLoss => vec![
            "30–40 min Cardio",
            "Jump rope",
            "Bodyweight squats",
            "Plank & core exercises",
        ],
        Goal::MuscleGain => vec![
            "Strength training",
            "Chest & Back workouts",
            "Leg day & shoulder training",
            "Progressive overload",
        ],
        Goal::StayFit => vec![
            "Mixed cardio + strength",
            "Yoga & stretching",
            "Light resistance training",
        ],
    }
}

/// Goal-adjusted calories, a protein-source label per diet preference and a
/// fixed three-meal skeleton.
pub fn diet_plan(goal: Goal, daily_calories: i64, diet_type: DietType) -> DietPlan {
    let calories = match goal {
        Goal::WeightLoss => daily_calories - 400,
        Goal::MuscleGain => daily_calories + 300,
        Goal::StayFit => daily_calories,
    };

    let protein = match diet_type {
        DietType::Vegetarian => "Paneer, Dal, Tofu",
        DietType::NonVegetarian => "Eggs, Chicken, Fish",
    };

    DietPlan {
        calories,
        protein: protein.to_string(),
        meals: vec![
            "Breakfast: Oats & fruits".to_string(),
            "Lunch: Rice/Roti + protein".to_string(),
            "Dinner: Salad + protein".to_string(),
        ],
    }
}

/// Formula-based macronutrient breakdown: 30% protein, 45% carbs, 25% fats.
pub fn macro_split(calories: i64) -> MacroSplit {
    let calories = calories as f64;
    MacroSplit {
        protein_kcal: calories * 0.30,
        carbs_kcal: calories * 0.45,
        fats_kcal: calories * 0.25,
    }
}
