use anyhow::{anyhow, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{arr2, Array1};

/// Reference observations: (age, weight kg, height cm, activity factor).
const REFERENCE_FEATURES: [[f64; 4]; 6] = [
    [20.0, 55.0, 160.0, 1.2],
    [25.0, 65.0, 165.0, 1.375],
    [30.0, 75.0, 170.0, 1.55],
    [35.0, 85.0, 175.0, 1.55],
    [40.0, 90.0, 178.0, 1.725],
    [45.0, 95.0, 180.0, 1.725],
];

/// Daily calories observed for each reference row.
const REFERENCE_CALORIES: [f64; 6] = [2000.0, 2200.0, 2500.0, 2600.0, 2800.0, 3000.0];

/// Secondary calorie estimate from an ordinary least squares fit over the
/// embedded reference table. Illustrative only; the formula-based target in
/// `calculations` remains the primary figure. Fitted once at startup, never
/// retrained.
pub struct CalorieModel {
    model: FittedLinearRegression<f64>,
}

impl CalorieModel {
    pub fn fit() -> Result<Self> {
        let records = arr2(&REFERENCE_FEATURES);
        let targets = Array1::from(REFERENCE_CALORIES.to_vec());
        let dataset = Dataset::new(records, targets);

        let model = LinearRegression::default()
            .fit(&dataset)
            .map_err(|e| anyhow!("failed to fit calorie model: {e}"))?;

        Ok(Self { model })
    }

    /// Predicted daily calories, truncated to an integer.
    pub fn predict_calories(&self, age: u32, weight_kg: f64, height_cm: f64, activity_factor: f64) -> i64 {
        let features = arr2(&[[f64::from(age), weight_kg, height_cm, activity_factor]]);
        let predicted = self.model.predict(&features);
        predicted[0] as i64
    }
}
