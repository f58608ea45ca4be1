//! Rounding mode applied when averaging vote points.
//!
//! The averaging itself happens outside this crate; sessions only carry
//! the mode as a revisable attribute.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How a vote average is rounded to a card value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    #[default]
    Ceil,
    Round,
    Floor,
}

impl RoundingMode {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Ceil => "ceil",
            RoundingMode::Round => "round",
            RoundingMode::Floor => "floor",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "ceil" => Ok(RoundingMode::Ceil),
            "round" => Ok(RoundingMode::Round),
            "floor" => Ok(RoundingMode::Floor),
            other => Err(ValidationError::invalid_format(
                "point_average_rounding",
                format!("unknown rounding mode '{}'", other),
            )),
        }
    }
}
