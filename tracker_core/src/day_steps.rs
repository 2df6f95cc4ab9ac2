//! Daily walk records in the `"678,0h50m"` format.

use crate::action_info::{parse_positive_duration, parse_steps, split_fields, DataParser};
use crate::spent_energy::{distance, walking_spent_calories};
use crate::{Profile, Result};
use chrono::TimeDelta;

/// A daily walk: step count, duration and the walker's profile
#[derive(Clone, Debug, PartialEq)]
pub struct DaySteps {
    pub steps: u32,
    pub duration: TimeDelta,
    pub profile: Profile,
}

impl DaySteps {
    /// Empty record for `profile`; fill it with [`DataParser::parse`]
    pub fn new(profile: Profile) -> Self {
        Self {
            steps: 0,
            duration: TimeDelta::zero(),
            profile,
        }
    }
}

impl DataParser for DaySteps {
    fn parse(&mut self, datastring: &str) -> Result<()> {
        let [steps, duration] = split_fields::<2>(datastring)?;

        let steps = parse_steps(steps)?;
        let duration = parse_positive_duration(duration)?;

        self.steps = steps;
        self.duration = duration;
        Ok(())
    }

    fn action_info(&self) -> Result<String> {
        let distance = distance(self.steps, self.profile.height);
        let calories = walking_spent_calories(
            self.steps,
            self.profile.weight,
            self.profile.height,
            self.duration,
        )?;

        Ok(format!(
            "Количество шагов: {}.\nДистанция составила {:.2} км.\nВы сожгли {:.2} ккал.\n",
            self.steps, distance, calories
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn record() -> DaySteps {
        DaySteps::new(Profile::new("Гоша", 84.6, 1.87))
    }

    #[test]
    fn test_parse_valid_record() {
        let mut ds = record();
        ds.parse("678,0h50m").unwrap();
        assert_eq!(ds.steps, 678);
        assert_eq!(ds.duration, TimeDelta::minutes(50));
    }

    #[test]
    fn test_report_matches_formulas() {
        let mut ds = record();
        ds.parse("678,0h50m").unwrap();

        let expected_distance = 678.0 * 1.87 * 0.45 / 1000.0;
        let expected_calories =
            walking_spent_calories(678, 84.6, 1.87, TimeDelta::minutes(50)).unwrap();

        let info = ds.action_info().unwrap();
        assert_eq!(
            info,
            format!(
                "Количество шагов: 678.\nДистанция составила {:.2} км.\nВы сожгли {:.2} ккал.\n",
                expected_distance, expected_calories
            )
        );
        assert!(info.contains("0.57 км"));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut ds = record();
        assert!(matches!(ds.parse("0,0h50m"), Err(Error::InvalidSteps(_))));
    }

    #[test]
    fn test_non_numeric_steps_rejected() {
        let mut ds = record();
        assert!(matches!(ds.parse("abc,0h50m"), Err(Error::InvalidSteps(_))));
        assert!(matches!(ds.parse("-5,0h50m"), Err(Error::InvalidSteps(_))));
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let mut ds = record();
        assert!(matches!(
            ds.parse("678,0h50m,extra"),
            Err(Error::MalformedInput { expected: 2, found: 3 })
        ));
        assert!(matches!(
            ds.parse("678"),
            Err(Error::MalformedInput { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_bad_duration_rejected() {
        let mut ds = record();
        assert!(matches!(ds.parse("678,fifty"), Err(Error::InvalidDuration(_))));
        assert!(matches!(ds.parse("678,0h0m"), Err(Error::InvalidDuration(_))));
        assert!(matches!(ds.parse("678,-10m"), Err(Error::InvalidDuration(_))));
    }

    #[test]
    fn test_failed_parse_keeps_previous_fields() {
        let mut ds = record();
        ds.parse("678,0h50m").unwrap();
        assert!(ds.parse("1000,bad").is_err());
        assert_eq!(ds.steps, 678);
        assert_eq!(ds.duration, TimeDelta::minutes(50));
    }

    #[test]
    fn test_report_fails_on_invalid_profile() {
        let mut ds = DaySteps::new(Profile::new("x", 0.0, 1.8));
        ds.parse("678,0h50m").unwrap();
        assert!(matches!(
            ds.action_info(),
            Err(Error::InvalidProfileField { field: "weight", .. })
        ));
    }

    #[test]
    fn test_report_before_parse_fails() {
        let ds = record();
        assert!(matches!(ds.action_info(), Err(Error::InvalidSteps(_))));
    }
}
