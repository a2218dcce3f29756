use crate::models::{ActivityLevel, BmiCategory, Gender};

/// Upper end of the BMI gauge shown alongside the workout plan.
const BMI_SCALE_MAX: f64 = 40.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// BMI from weight in kg and height in cm, rounded to 2 decimal places.
/// Returns None for non-positive inputs instead of dividing by zero.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round2(weight_kg / (height_m * height_m)))
}

/// Basal metabolic rate, Mifflin-St Jeor formula. Inputs are assumed valid;
/// out-of-range values are rejected at the submission boundary.
pub fn calculate_bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Daily calorie target: BMR times the activity multiplier, truncated.
pub fn calculate_daily_calories(bmr: f64, activity: ActivityLevel) -> i64 {
    (bmr * activity.factor()) as i64
}

/// Band the BMI value. Boundary values fall into the higher band.
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Position of the BMI value on the 0-40 gauge, clamped to 1.0.
pub fn bmi_scale_ratio(bmi: f64) -> f64 {
    (bmi / BMI_SCALE_MAX).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_matches_reference_value() {
        assert_eq!(calculate_bmi(70.0, 175.0), Some(22.86));
    }

    #[test]
    fn bmi_rejects_non_positive_inputs() {
        assert_eq!(calculate_bmi(0.0, 175.0), None);
        assert_eq!(calculate_bmi(-10.0, 175.0), None);
        assert_eq!(calculate_bmi(70.0, 0.0), None);
        assert_eq!(calculate_bmi(70.0, -175.0), None);
    }

    #[test]
    fn bmr_applies_gender_offset() {
        let male = calculate_bmr(Gender::Male, 70.0, 175.0, 30);
        let female = calculate_bmr(Gender::Female, 70.0, 175.0, 30);
        assert_eq!(male, 1648.75);
        assert_eq!(female, 1482.75);
        assert_eq!(male - female, 166.0);
    }

    #[test]
    fn daily_calories_truncates_to_integer() {
        assert_eq!(calculate_daily_calories(1673.75, ActivityLevel::Sedentary), 2008);
        assert_eq!(
            calculate_daily_calories(1648.75, ActivityLevel::VeryActive),
            (1648.75_f64 * 1.725) as i64
        );
    }

    #[test]
    fn activity_factors_match_reference_table() {
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.factor(), 1.375);
        assert_eq!(ActivityLevel::ModeratelyActive.factor(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.factor(), 1.725);
    }

    #[test]
    fn bmi_category_boundaries_belong_to_higher_band() {
        assert_eq!(bmi_category(18.49), BmiCategory::Underweight);
        assert_eq!(bmi_category(18.5), BmiCategory::Normal);
        assert_eq!(bmi_category(24.99), BmiCategory::Normal);
        assert_eq!(bmi_category(25.0), BmiCategory::Overweight);
        assert_eq!(bmi_category(29.99), BmiCategory::Overweight);
        assert_eq!(bmi_category(30.0), BmiCategory::Obese);
        assert_eq!(bmi_category(40.0), BmiCategory::Obese);
    }

    #[test]
    fn bmi_scale_ratio_is_clamped() {
        assert_eq!(bmi_scale_ratio(20.0), 0.5);
        assert_eq!(bmi_scale_ratio(48.0), 1.0);
    }
}
