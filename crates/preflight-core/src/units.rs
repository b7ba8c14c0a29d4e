// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Unit conversions and the numeric guards shared by both engines.
//!
//! Internally everything is pounds, gallons, knots, feet and degrees. Kilograms and
//! liters only exist at the input/display boundary.

use serde::{Deserialize, Serialize};

pub const KG_TO_LBS: f64 = 2.20462;
pub const GAL_TO_LITER: f64 = 3.78541;

/// Weight unit the pilot is typing in. Fuel stays in gallons either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitSystem {
    #[default]
    Lbs,
    Kg,
}

impl UnitSystem {
    pub fn label(&self) -> &'static str {
        match self {
            UnitSystem::Lbs => "lbs",
            UnitSystem::Kg => "kg",
        }
    }
}

/// Converts an entered weight into pounds.
pub fn to_lbs(value: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Lbs => value,
        UnitSystem::Kg => value * KG_TO_LBS,
    }
}

/// Converts a weight in pounds into the display unit.
pub fn from_lbs(value: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Lbs => value,
        UnitSystem::Kg => value / KG_TO_LBS,
    }
}

pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons * GAL_TO_LITER
}

/// Replaces NaN and ±Infinity with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Division that never yields NaN or Infinity.
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den == 0.0 || !den.is_finite() {
        return fallback;
    }
    finite_or(num / den, fallback)
}

/// Parses a form field. Empty or garbage input reads as zero.
pub fn parse_num(text: &str) -> f64 {
    parse_opt_num(text).unwrap_or(0.0)
}

/// Parses an optional form field. Empty or garbage input reads as "not entered".
pub fn parse_opt_num(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
