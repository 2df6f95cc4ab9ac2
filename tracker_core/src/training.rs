//! Training records in the `"3456,Бег,0h45m"` format.

use crate::action_info::{parse_positive_duration, parse_steps, split_fields, DataParser};
use crate::duration::hours;
use crate::spent_energy::{distance, mean_speed, running_spent_calories, walking_spent_calories};
use crate::{Error, Profile, Result};
use chrono::TimeDelta;

/// Recognized training types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Walking,
    Running,
}

impl ActivityKind {
    /// Label used in input records and reports
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Walking => "Ходьба",
            ActivityKind::Running => "Бег",
        }
    }

    /// Resolve an input label; anything but an exact match is unknown
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Ходьба" => Some(ActivityKind::Walking),
            "Бег" => Some(ActivityKind::Running),
            _ => None,
        }
    }
}

/// A training session: steps, activity label, duration and profile
///
/// The label is kept verbatim. It is only resolved to an [`ActivityKind`]
/// when a report is generated, so unknown types parse fine and fail later.
#[derive(Clone, Debug, PartialEq)]
pub struct Training {
    pub steps: u32,
    pub training_type: String,
    pub duration: TimeDelta,
    pub profile: Profile,
}

impl Training {
    /// Empty record for `profile`; fill it with [`DataParser::parse`]
    pub fn new(profile: Profile) -> Self {
        Self {
            steps: 0,
            training_type: String::new(),
            duration: TimeDelta::zero(),
            profile,
        }
    }

    pub fn kind(&self) -> Result<ActivityKind> {
        ActivityKind::from_label(&self.training_type)
            .ok_or_else(|| Error::UnknownActivityKind(self.training_type.clone()))
    }
}

impl DataParser for Training {
    fn parse(&mut self, datastring: &str) -> Result<()> {
        let [steps, training_type, duration] = split_fields::<3>(datastring)?;

        let steps = parse_steps(steps)?;
        if training_type.is_empty() {
            return Err(Error::EmptyActivityKind);
        }
        let duration = parse_positive_duration(duration)?;

        self.steps = steps;
        self.training_type = training_type.to_string();
        self.duration = duration;
        Ok(())
    }

    fn action_info(&self) -> Result<String> {
        let Profile { weight, height, .. } = self.profile;

        let calories = match self.kind()? {
            ActivityKind::Walking => {
                walking_spent_calories(self.steps, weight, height, self.duration)?
            }
            ActivityKind::Running => {
                running_spent_calories(self.steps, weight, height, self.duration)?
            }
        };
        let distance = distance(self.steps, height);
        let speed = mean_speed(self.steps, height, self.duration);

        Ok(format!(
            "Тип тренировки: {}\nДлительность: {:.2} ч.\nДистанция: {:.2} км.\nСкорость: {:.2} км/ч\nСожгли калорий: {:.2}\n",
            self.training_type,
            hours(self.duration),
            distance,
            speed,
            calories
        ))
    }
}
