//! Unit conversion utilities.
//!
//! The document model works exclusively in canvas pixels; conversion to and
//! from physical units happens at the UI boundary. All conversions route
//! through inches: 1 in = `dpi` px = 25.4 mm = 72 pt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MM_PER_INCH: f64 = 25.4;
const PT_PER_INCH: f64 = 72.0;

/// Display/measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Canvas pixels
    Px,
    /// Millimeters
    Mm,
    /// Inches
    In,
    /// Typographic points (1/72 in)
    Pt,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Px
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px => write!(f, "px"),
            Self::Mm => write!(f, "mm"),
            Self::In => write!(f, "in"),
            Self::Pt => write!(f, "pt"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Ok(Self::Px),
            "mm" | "millimeter" | "millimeters" => Ok(Self::Mm),
            "in" | "inch" | "inches" => Ok(Self::In),
            "pt" | "point" | "points" => Ok(Self::Pt),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

fn to_inches(value: f64, from: Unit, dpi: f64) -> f64 {
    match from {
        Unit::Px => value / dpi,
        Unit::Mm => value / MM_PER_INCH,
        Unit::In => value,
        Unit::Pt => value / PT_PER_INCH,
    }
}

fn from_inches(value: f64, to: Unit, dpi: f64) -> f64 {
    match to {
        Unit::Px => value * dpi,
        Unit::Mm => value * MM_PER_INCH,
        Unit::In => value,
        Unit::Pt => value * PT_PER_INCH,
    }
}

/// Converts a value between units at the given DPI.
///
/// Same-unit conversions return the value untouched so round trips are
/// exact to floating-point precision.
pub fn convert(value: f64, from: Unit, to: Unit, dpi: f64) -> f64 {
    if from == to {
        return value;
    }
    from_inches(to_inches(value, from, dpi), to, dpi)
}
