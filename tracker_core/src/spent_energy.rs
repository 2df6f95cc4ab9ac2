//! Energy formulas: distance, mean speed and calories burned.
//!
//! Distance is derived from a stride length of `height * 0.45`. Calories
//! scale with weight, mean speed and time spent; walking burns half of
//! what running does for the same inputs.

use crate::duration::{hours, minutes};
use crate::{Error, Result};
use chrono::TimeDelta;

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;
/// Stride length as a fraction of height
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;
/// Walking burns this fraction of the running figure
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

/// Distance in kilometers covered by `steps` for a person of `height` meters
pub fn distance(steps: u32, height: f64) -> f64 {
    f64::from(steps) * (height * STEP_LENGTH_COEFFICIENT) / M_IN_KM
}

/// Mean speed in km/h, or `0.0` when the duration is not positive
pub fn mean_speed(steps: u32, height: f64, duration: TimeDelta) -> f64 {
    if duration <= TimeDelta::zero() {
        return 0.0;
    }

    distance(steps, height) / hours(duration)
}

/// Calories spent walking
pub fn walking_spent_calories(
    steps: u32,
    weight: f64,
    height: f64,
    duration: TimeDelta,
) -> Result<f64> {
    Ok(base_calories(steps, weight, height, duration)? * WALKING_CALORIES_COEFFICIENT)
}

/// Calories spent running
pub fn running_spent_calories(
    steps: u32,
    weight: f64,
    height: f64,
    duration: TimeDelta,
) -> Result<f64> {
    base_calories(steps, weight, height, duration)
}

fn base_calories(steps: u32, weight: f64, height: f64, duration: TimeDelta) -> Result<f64> {
    if steps == 0 {
        return Err(Error::InvalidSteps("steps must be > 0".into()));
    }
    if duration <= TimeDelta::zero() {
        return Err(Error::InvalidDuration("duration must be > 0".into()));
    }
    // NaN fails these comparisons too
    if !(weight > 0.0) {
        return Err(Error::InvalidProfileField {
            field: "weight",
            value: weight,
        });
    }
    if !(height > 0.0) {
        return Err(Error::InvalidProfileField {
            field: "height",
            value: height,
        });
    }

    let speed = mean_speed(steps, height, duration);
    Ok(weight * speed * minutes(duration) / MIN_IN_H)
}
