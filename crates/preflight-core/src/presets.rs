// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Built-in fleet profiles.

use crate::aircraft::{Aircraft, CgLimits, CgPoint, EnvelopePoint, StationArms};
use serde::Serialize;

pub const DEFAULT_AIRCRAFT_ID: &str = "default-172s";

const DATUM: &str = "Lower portion of front face of firewall";

const C172_ARMS: StationArms = StationArms {
    pilot_front_pax: 37.0,
    rear_pax: 73.0,
    baggage_1: 95.0,
    baggage_2: 123.0,
    fuel: 48.0,
};

/// One line of the aircraft picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
    pub tail_number: String,
    pub max_takeoff_weight: f64,
}

fn limits(low: Option<(f64, f64)>, high: (f64, f64), aft: f64) -> CgLimits {
    CgLimits {
        fwd_low: low.map(|(weight, arm)| CgPoint { weight, arm }),
        fwd_high: CgPoint {
            weight: high.0,
            arm: high.1,
        },
        aft,
    }
}

fn ring(points: &[(f64, f64)]) -> Vec<EnvelopePoint> {
    points.iter().map(|&(x, y)| EnvelopePoint { x, y }).collect()
}

/// A C172 with the standard station layout and structural caps.
#[allow(clippy::too_many_arguments)]
fn c172(
    id: &str,
    tail: &str,
    empty_weight: f64,
    empty_moment: f64,
    empty_arm: f64,
    fuel_capacity: f64,
    mtow: f64,
    cg_limits: CgLimits,
) -> Aircraft {
    Aircraft {
        id: id.to_string(),
        tail_number: tail.to_string(),
        basic_empty_weight: empty_weight,
        basic_empty_moment: empty_moment,
        empty_weight_arm: empty_arm,
        fuel_capacity,
        usable_fuel_per_gal: 6.0,
        datum_location: DATUM.to_string(),
        max_baggage1_weight: 120.0,
        max_baggage2_weight: 50.0,
        max_total_baggage_weight: 120.0,
        max_front_seat_weight: 400.0,
        max_rear_seat_weight: 400.0,
        max_takeoff_weight: mtow,
        station_arms: C172_ARMS,
        cg_limits,
        envelope_points: Vec::new(),
    }
}

pub fn all_presets() -> Vec<Aircraft> {
    let heavy_ring = ring(&[
        (35.0, 1500.0),
        (35.0, 1960.0),
        (39.6, 2550.0),
        (47.3, 2550.0),
        (47.3, 1500.0),
        (35.0, 1500.0),
    ]);

    vec![
        Aircraft {
            envelope_points: heavy_ring.clone(),
            ..c172(
                "4x-cdo",
                "4X-CDO",
                1573.0,
                1573.0 * 42.28,
                42.28,
                60.0,
                2550.0,
                limits(Some((1500.0, 35.0)), (2550.0, 39.6), 47.3),
            )
        },
        // Placarded with a fixed 35.0-47.3 band.
        c172(
            "4x-cdj",
            "4X-CDJ",
            1512.0,
            1512.0 * 39.16,
            39.16,
            40.0,
            2300.0,
            limits(Some((1950.0, 35.0)), (2300.0, 35.0), 47.3),
        ),
        Aircraft {
            envelope_points: ring(&[
                (35.0, 1500.0),
                (35.0, 1960.0),
                (39.6, 2300.0),
                (47.3, 2300.0),
                (47.3, 1500.0),
                (35.0, 1500.0),
            ]),
            ..c172(
                "4x-cgi",
                "4X-CGI",
                1553.0,
                64703.51,
                41.67,
                40.0,
                2300.0,
                limits(Some((1500.0, 35.0)), (2300.0, 39.6), 47.3),
            )
        },
        Aircraft {
            max_baggage1_weight: 76.0,
            ..c172(
                "4x-chl",
                "4X-CHL",
                1635.0,
                68179.5,
                41.7,
                40.0,
                2400.0,
                limits(Some((1950.0, 35.0)), (2400.0, 39.2), 47.3),
            )
        },
        Aircraft {
            envelope_points: heavy_ring,
            ..c172(
                "4x-cwz",
                "4X-CWZ",
                1502.0,
                57827.0,
                38.5,
                40.0,
                2550.0,
                limits(Some((1500.0, 35.0)), (2550.0, 39.6), 47.3),
            )
        },
        Aircraft {
            envelope_points: ring(&[
                (35.0, 1500.0),
                (35.0, 1950.0),
                (39.2, 2400.0),
                (47.3, 2400.0),
                (47.3, 1500.0),
                (35.0, 1500.0),
            ]),
            ..c172(
                "4x-cau",
                "4X-CAU",
                1541.0,
                1541.0 * 38.6,
                38.6,
                50.0,
                2400.0,
                limits(Some((1950.0, 35.0)), (2400.0, 39.2), 47.3),
            )
        },
        default_aircraft(),
    ]
}

/// Case-insensitive lookup by id (`4x-cgi`) or tail number (`4X-CGI`).
pub fn preset(id: &str) -> Option<Aircraft> {
    let needle = id.trim().to_lowercase();
    all_presets()
        .into_iter()
        .find(|a| a.id == needle || a.tail_number.to_lowercase() == needle)
}

/// The C172S the planner opens with.
pub fn default_aircraft() -> Aircraft {
    Aircraft {
        envelope_points: ring(&[
            (35.0, 1500.0),
            (35.0, 2050.0),
            (41.0, 2550.0),
            (47.3, 2550.0),
            (47.3, 1500.0),
            (35.0, 1500.0),
        ]),
        ..c172(
            DEFAULT_AIRCRAFT_ID,
            "N172SP",
            1615.0,
            68547.75,
            42.45,
            60.0,
            2550.0,
            limits(Some((2050.0, 35.0)), (2550.0, 41.0), 47.3),
        )
    }
}

pub fn preset_summaries() -> Vec<PresetSummary> {
    all_presets()
        .into_iter()
        .map(|a| PresetSummary {
            name: format!(
                "{} (BEW: {:.0} | MTW: {:.0})",
                a.tail_number, a.basic_empty_weight, a.max_takeoff_weight
            ),
            id: a.id,
            tail_number: a.tail_number,
            max_takeoff_weight: a.max_takeoff_weight,
        })
        .collect()
}
