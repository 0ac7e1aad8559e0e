use std::fmt;
use std::str::FromStr;

use crate::error::{ContourError, OperationError};

/// Unit system tag for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl Unit {
    /// Length of one unit in millimeters.
    #[must_use]
    pub fn in_millimeters(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 10.0,
            Self::Meter => 1000.0,
            Self::Inch => 25.4,
            Self::Foot => 304.8,
        }
    }

    /// Abbreviation used when formatting.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }
}

/// Factor that converts a length in `from` units to `to` units.
#[must_use]
pub fn conversion_scale(from: Unit, to: Unit) -> f64 {
    if from == to {
        return 1.0;
    }
    from.in_millimeters() / to.in_millimeters()
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Self::Millimeter),
            "cm" => Ok(Self::Centimeter),
            "m" => Ok(Self::Meter),
            "in" => Ok(Self::Inch),
            "ft" => Ok(Self::Foot),
            other => Err(OperationError::InvalidInput(format!("unknown unit `{other}`")).into()),
        }
    }
}
