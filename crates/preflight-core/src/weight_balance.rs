// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Weight & balance: totals, CG, envelope status, landing projection and per-station
//! structural checks.
//!
//! `compute` runs on every keystroke of a live form, so it is total. Every division is
//! guarded and any non-finite load field reads as zero.

use crate::aircraft::{Aircraft, CgLimits};
use crate::units::{finite_or, safe_div, to_lbs, UnitSystem};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Seat-row cap used when a profile leaves the row limit unset.
pub const DEFAULT_SEAT_ROW_LIMIT_LBS: f64 = 400.0;

/// Slack on the fuel capacity check to absorb floating-point noise (gal).
pub const FUEL_CAPACITY_EPSILON_GAL: f64 = 0.01;

const STANDARD_PILOT_LBS: f64 = 170.0;

/// What the pilot loaded. Weights are in `unit_preference`, fuel in gallons.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightLoad {
    pub pilot_weight: f64,
    pub front_pax_weight: f64,
    pub rear_pax1_weight: f64,
    pub rear_pax2_weight: f64,
    pub baggage1_weight: f64,
    pub baggage2_weight: f64,
    pub fuel_left_gallons: f64,
    pub fuel_right_gallons: f64,
    pub fuel_burn_gallons: f64,
    pub unit_preference: UnitSystem,
}

impl FlightLoad {
    /// Pilot only, full tanks split evenly, no planned burn.
    pub fn standard(aircraft: &Aircraft) -> Self {
        Self {
            pilot_weight: STANDARD_PILOT_LBS,
            fuel_left_gallons: aircraft.fuel_capacity / 2.0,
            fuel_right_gallons: aircraft.fuel_capacity / 2.0,
            ..Self::default()
        }
    }

    pub fn total_fuel_gallons(&self) -> f64 {
        finite_or(self.fuel_left_gallons, 0.0) + finite_or(self.fuel_right_gallons, 0.0)
    }
}

/// Envelope verdict. The first failing check wins, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CgStatus {
    Ok,
    Overweight,
    FwdCg,
    AftCg,
}

impl CgStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CgStatus::Ok)
    }
}

impl std::fmt::Display for CgStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CgStatus::Ok => "OK",
            CgStatus::Overweight => "OVERWEIGHT",
            CgStatus::FwdCg => "FWD_CG",
            CgStatus::AftCg => "AFT_CG",
        };
        f.write_str(label)
    }
}

/// Forward (`min`) and aft (`max`) CG bounds at a given weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgRanges {
    pub takeoff: CgRange,
    pub landing: CgRange,
}

/// Structural overloads. Each flag is independent of the others and of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationWarnings {
    pub baggage1: bool,
    pub baggage2: bool,
    pub total_baggage: bool,
    pub front_seats: bool,
    pub rear_seats: bool,
    pub fuel_capacity: bool,
}

impl StationWarnings {
    pub fn any(&self) -> bool {
        self.baggage1
            || self.baggage2
            || self.total_baggage
            || self.front_seats
            || self.rear_seats
            || self.fuel_capacity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WbResult {
    pub total_weight: f64,
    pub total_moment: f64,
    pub cg: f64,
    pub status: CgStatus,
    pub landing_weight: f64,
    pub landing_moment: f64,
    #[serde(rename = "landingCG")]
    pub landing_cg: f64,
    pub landing_status: CgStatus,
    pub limits: CgRanges,
    pub station_warnings: StationWarnings,
    /// Takeoff status is OK and no station is overloaded. Landing status does not gate this.
    pub is_within_limits: bool,
    pub is_fuel_burn_invalid: bool,
    /// Weight of the fuel actually burned, after clamping to fuel on board (lbs).
    pub fuel_burn_weight: f64,
    pub total_fuel_gallons: f64,
}

/// Forward CG limit at `weight`, linearly interpolated between `fwd_low` and `fwd_high`.
pub fn forward_limit(limits: &CgLimits, weight: f64) -> f64 {
    let high = limits.fwd_high;
    let Some(low) = limits.fwd_low else {
        return high.arm;
    };

    if weight <= low.weight {
        low.arm
    } else if weight >= high.weight {
        high.arm
    } else {
        let slope = safe_div(high.arm - low.arm, high.weight - low.weight, 0.0);
        low.arm + slope * (weight - low.weight)
    }
}

/// Envelope status. Landing is checked against the max takeoff weight as well; the
/// profiles carry no separate landing weight.
pub fn classify(weight: f64, cg: f64, range: CgRange, max_weight: f64) -> CgStatus {
    if weight > max_weight {
        CgStatus::Overweight
    } else if cg < range.min {
        CgStatus::FwdCg
    } else if cg > range.max {
        CgStatus::AftCg
    } else {
        CgStatus::Ok
    }
}

fn cg_of(moment: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        safe_div(moment, weight, 0.0)
    } else {
        0.0
    }
}

fn seat_row_cap(cap: f64) -> f64 {
    if cap > 0.0 {
        cap
    } else {
        DEFAULT_SEAT_ROW_LIMIT_LBS
    }
}

pub fn compute(aircraft: &Aircraft, load: &FlightLoad) -> WbResult {
    let unit = load.unit_preference;
    let lbs = |value: f64| to_lbs(finite_or(value, 0.0), unit);
    let arms = &aircraft.station_arms;

    let front = lbs(load.pilot_weight) + lbs(load.front_pax_weight);
    let rear = lbs(load.rear_pax1_weight) + lbs(load.rear_pax2_weight);
    let baggage1 = lbs(load.baggage1_weight);
    let baggage2 = lbs(load.baggage2_weight);
    let fuel_gallons = load.total_fuel_gallons();
    let fuel_weight = fuel_gallons * aircraft.usable_fuel_per_gal;

    let mut total_weight = aircraft.basic_empty_weight;
    let mut total_moment = aircraft.basic_empty_moment;
    for (weight, arm) in [
        (front, arms.pilot_front_pax),
        (rear, arms.rear_pax),
        (baggage1, arms.baggage_1),
        (baggage2, arms.baggage_2),
        (fuel_weight, arms.fuel),
    ] {
        total_weight += weight;
        total_moment += weight * arm;
    }
    let cg = cg_of(total_moment, total_weight);

    let requested_burn = finite_or(load.fuel_burn_gallons, 0.0);
    let is_fuel_burn_invalid = requested_burn > fuel_gallons;
    let actual_burn = requested_burn.min(fuel_gallons);
    if is_fuel_burn_invalid {
        warn!(
            "Planned burn exceeds fuel on board, clamping — requested={:.1} on_board={:.1}",
            requested_burn, fuel_gallons
        );
    }
    let fuel_burn_weight = actual_burn * aircraft.usable_fuel_per_gal;

    let landing_weight = total_weight - fuel_burn_weight;
    let landing_moment = total_moment - fuel_burn_weight * arms.fuel;
    let landing_cg = cg_of(landing_moment, landing_weight);

    let limits = &aircraft.cg_limits;
    let takeoff_range = CgRange {
        min: forward_limit(limits, total_weight),
        max: limits.aft,
    };
    let landing_range = CgRange {
        min: forward_limit(limits, landing_weight),
        max: limits.aft,
    };

    let status = classify(total_weight, cg, takeoff_range, aircraft.max_takeoff_weight);
    let landing_status = classify(
        landing_weight,
        landing_cg,
        landing_range,
        aircraft.max_takeoff_weight,
    );

    let station_warnings = StationWarnings {
        baggage1: baggage1 > aircraft.max_baggage1_weight,
        baggage2: baggage2 > aircraft.max_baggage2_weight,
        total_baggage: baggage1 + baggage2 > aircraft.max_total_baggage_weight,
        front_seats: front > seat_row_cap(aircraft.max_front_seat_weight),
        rear_seats: rear > seat_row_cap(aircraft.max_rear_seat_weight),
        fuel_capacity: fuel_gallons > aircraft.fuel_capacity + FUEL_CAPACITY_EPSILON_GAL,
    };

    debug!(
        "W&B computed — weight={:.1} cg={:.2} status={} landing_weight={:.1} landing_cg={:.2} landing_status={} burn_invalid={}",
        total_weight, cg, status, landing_weight, landing_cg, landing_status, is_fuel_burn_invalid
    );

    WbResult {
        total_weight,
        total_moment,
        cg,
        status,
        landing_weight,
        landing_moment,
        landing_cg,
        landing_status,
        limits: CgRanges {
            takeoff: takeoff_range,
            landing: landing_range,
        },
        is_within_limits: status.is_ok() && !station_warnings.any(),
        station_warnings,
        is_fuel_burn_invalid,
        fuel_burn_weight,
        total_fuel_gallons: fuel_gallons,
    }
}
