// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::PreflightError;
use serde::{Deserialize, Serialize};

/// Lowest weight drawn on a derived envelope polygon (lbs).
pub const ENVELOPE_FLOOR_LBS: f64 = 1500.0;

/// Relative tolerance between `basic_empty_moment` and weight × arm.
const EMPTY_MOMENT_TOLERANCE: f64 = 0.001;

/// Fixed moment arms of the loading stations, inches aft of datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationArms {
    pub pilot_front_pax: f64,
    pub rear_pax: f64,
    pub baggage_1: f64,
    pub baggage_2: f64,
    pub fuel: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgPoint {
    pub weight: f64,
    pub arm: f64,
}

/// Piecewise-linear forward limit plus a constant aft limit.
///
/// Without `fwd_low` the forward limit is the constant `fwd_high.arm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fwd_low: Option<CgPoint>,
    pub fwd_high: CgPoint,
    pub aft: f64,
}

impl CgLimits {
    /// C172 normal category: 35.0" up to 1950 lbs, 39.2" at 2400 lbs, 47.3" aft.
    pub fn standard_c172() -> Self {
        Self {
            fwd_low: Some(CgPoint {
                weight: 1950.0,
                arm: 35.0,
            }),
            fwd_high: CgPoint {
                weight: 2400.0,
                arm: 39.2,
            },
            aft: 47.3,
        }
    }

    fn is_usable(&self) -> bool {
        self.fwd_high.arm > 0.0 && self.aft > 0.0
    }
}

/// A vertex of the chart envelope: `x` is the arm, `y` the weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    Variable,
    Fuel,
}

/// A loading station as drawn on the aircraft diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: &'static str,
    pub name: &'static str,
    pub arm: f64,
    pub kind: StationKind,
    pub max_weight: Option<f64>,
}

/// Static aircraft profile. Weights in lbs, arms in inches, fuel in US gallons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tail_number: String,
    pub basic_empty_weight: f64,
    pub basic_empty_moment: f64,
    pub empty_weight_arm: f64,
    pub fuel_capacity: f64,
    pub usable_fuel_per_gal: f64,
    #[serde(default)]
    pub datum_location: String,
    pub max_baggage1_weight: f64,
    pub max_baggage2_weight: f64,
    pub max_total_baggage_weight: f64,
    #[serde(default)]
    pub max_front_seat_weight: f64,
    #[serde(default)]
    pub max_rear_seat_weight: f64,
    pub max_takeoff_weight: f64,
    pub station_arms: StationArms,
    pub cg_limits: CgLimits,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envelope_points: Vec<EnvelopePoint>,
}

impl Aircraft {
    /// Updates the empty weight and arm, keeping the empty moment consistent.
    pub fn set_empty_weight(&mut self, weight: f64, arm: f64) {
        self.basic_empty_weight = weight;
        self.empty_weight_arm = arm;
        self.basic_empty_moment = weight * arm;
    }

    /// Checks the profile invariants the engines assume but never enforce.
    pub fn validate(&self) -> Result<(), PreflightError> {
        let limits = &self.cg_limits;
        if let Some(low) = limits.fwd_low {
            if low.weight >= limits.fwd_high.weight {
                return Err(PreflightError::InvalidAircraft(format!(
                    "{}: forward limit low weight {} must be below high weight {}",
                    self.label(),
                    low.weight,
                    limits.fwd_high.weight
                )));
            }
        }

        if limits.aft <= limits.fwd_high.arm {
            return Err(PreflightError::InvalidAircraft(format!(
                "{}: aft limit {} must be aft of forward limit {}",
                self.label(),
                limits.aft,
                limits.fwd_high.arm
            )));
        }

        let expected = self.basic_empty_weight * self.empty_weight_arm;
        let drift = (self.basic_empty_moment - expected).abs();
        if drift > EMPTY_MOMENT_TOLERANCE * expected.abs().max(1.0) {
            return Err(PreflightError::InvalidAircraft(format!(
                "{}: empty moment {:.2} does not match {:.2} x {:.2} = {:.2}",
                self.label(),
                self.basic_empty_moment,
                self.basic_empty_weight,
                self.empty_weight_arm,
                expected
            )));
        }

        Ok(())
    }

    /// Replaces unusable CG limits with the standard C172 ones and fills in a missing
    /// envelope. A stored envelope is kept as is.
    pub fn with_fallback_limits(mut self) -> Self {
        if !self.cg_limits.is_usable() {
            log::warn!(
                "Unusable CG limits on custom profile; using standard C172 limits — aircraft={}",
                self.label()
            );
            self.cg_limits = CgLimits::standard_c172();
        }
        if self.envelope_points.is_empty() {
            self.envelope_points = self.envelope_polygon();
        }
        self
    }

    /// Closed envelope ring for charting, derived from `cg_limits` when none is stored.
    pub fn envelope_polygon(&self) -> Vec<EnvelopePoint> {
        if !self.envelope_points.is_empty() {
            return self.envelope_points.clone();
        }

        let limits = &self.cg_limits;
        let high = limits.fwd_high;
        let low = limits.fwd_low.unwrap_or(CgPoint {
            weight: ENVELOPE_FLOOR_LBS,
            arm: high.arm,
        });
        let p = |x, y| EnvelopePoint { x, y };

        vec![
            p(low.arm, ENVELOPE_FLOOR_LBS),
            p(low.arm, low.weight),
            p(high.arm, high.weight),
            p(limits.aft, high.weight),
            p(limits.aft, ENVELOPE_FLOOR_LBS),
            p(low.arm, ENVELOPE_FLOOR_LBS),
        ]
    }

    pub fn stations(&self) -> Vec<Station> {
        let arms = &self.station_arms;
        vec![
            Station {
                id: "pilot_front_pax",
                name: "Pilot & Front Passenger",
                arm: arms.pilot_front_pax,
                kind: StationKind::Variable,
                max_weight: Some(self.max_front_seat_weight).filter(|w| *w > 0.0),
            },
            Station {
                id: "rear_pax",
                name: "Rear Passengers",
                arm: arms.rear_pax,
                kind: StationKind::Variable,
                max_weight: Some(self.max_rear_seat_weight).filter(|w| *w > 0.0),
            },
            Station {
                id: "baggage_1",
                name: "Baggage Area 1",
                arm: arms.baggage_1,
                kind: StationKind::Variable,
                max_weight: Some(self.max_baggage1_weight),
            },
            Station {
                id: "baggage_2",
                name: "Baggage Area 2",
                arm: arms.baggage_2,
                kind: StationKind::Variable,
                max_weight: Some(self.max_baggage2_weight),
            },
            Station {
                id: "fuel",
                name: "Fuel",
                arm: arms.fuel,
                kind: StationKind::Fuel,
                max_weight: Some(self.fuel_capacity * self.usable_fuel_per_gal),
            },
        ]
    }

    /// Tail number, or the id when no tail number is set.
    pub fn label(&self) -> &str {
        if self.tail_number.is_empty() {
            &self.id
        } else {
            &self.tail_number
        }
    }
}
