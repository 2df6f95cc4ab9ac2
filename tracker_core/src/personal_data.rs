//! Personal profile attached to every record.

use crate::{Error, Result};
use std::fmt;

/// Static user attributes used by the energy formulas
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub name: String,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters
    pub height: f64,
}

impl Profile {
    pub fn new(name: impl Into<String>, weight: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            height,
        }
    }

    /// Check that weight and height are positive
    ///
    /// Records never call this while parsing; an invalid profile only
    /// surfaces when a report is generated.
    pub fn validate(&self) -> Result<()> {
        if !(self.weight > 0.0) {
            return Err(Error::InvalidProfileField {
                field: "weight",
                value: self.weight,
            });
        }
        if !(self.height > 0.0) {
            return Err(Error::InvalidProfileField {
                field: "height",
                value: self.height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Имя: {}\nВес: {:.2} кг.\nРост: {:.2} м.\n\n",
            self.name, self.weight, self.height
        )
    }
}
