// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use preflight_core::aircraft::CgLimits;
use preflight_core::scenario::{AircraftSource, Scenario};
use preflight_core::units::KG_TO_LBS;
use preflight_core::{CgStatus, PreflightError};
use std::fs;

const PRESET_SCENARIO: &str = r#"{
    "aircraft": "4X-CGI",
    "load": {
        "pilotWeight": 170,
        "frontPaxWeight": 160,
        "rearPax1Weight": 140,
        "baggage1Weight": 30,
        "fuelLeftGallons": 20,
        "fuelRightGallons": 20,
        "fuelBurnGallons": 12
    },
    "parameters": {
        "cruiseIas": 100,
        "cruiseGph": 9,
        "taxiFuel": 1.1,
        "tocFuel": 1.5,
        "takeoffTime": "09:15"
    },
    "legs": [
        { "from": "LLHZ", "to": "LLHA", "distanceNm": 50, "course": 20, "altitude": 3000, "temperature": 15, "windDir": 270, "windSpeed": 15 },
        { "from": "LLHA", "to": "LLIB", "distanceNm": 35, "course": 60, "altitude": 3000, "temperature": 15 }
    ]
}"#;

/// Custom profile with the CG limits left blank, as a half-filled editor form produces.
const CUSTOM_SCENARIO: &str = r#"{
    "aircraft": {
        "tailNumber": "4X-NEW",
        "basicEmptyWeight": 1600,
        "basicEmptyMoment": 64000,
        "emptyWeightArm": 40,
        "fuelCapacity": 53,
        "usableFuelPerGal": 6,
        "maxBaggage1Weight": 120,
        "maxBaggage2Weight": 50,
        "maxTotalBaggageWeight": 120,
        "maxTakeoffWeight": 2400,
        "stationArms": { "pilot_front_pax": 37, "rear_pax": 73, "baggage_1": 95, "baggage_2": 123, "fuel": 48 },
        "cgLimits": { "fwd_high": { "weight": 0, "arm": 0 }, "aft": 0 }
    },
    "load": { "pilotWeight": 80, "unitPreference": "KG", "fuelLeftGallons": 10, "fuelRightGallons": 10 }
}"#;

#[test]
fn test_load_preset_scenario_from_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scenario.json");
    fs::write(&path, PRESET_SCENARIO)?;

    let scenario = Scenario::load(&path)?;
    assert_eq!(scenario.aircraft, AircraftSource::Preset("4X-CGI".to_string()));
    assert_eq!(scenario.legs.len(), 2);
    assert_eq!(scenario.legs[0].wind_dir, Some(270.0));
    assert_eq!(scenario.legs[1].wind_speed, None);

    let report = scenario.evaluate()?;
    assert_eq!(report.aircraft.id, "4x-cgi");
    assert_eq!(report.weight_balance.total_fuel_gallons, 40.0);
    assert!(!report.weight_balance.is_fuel_burn_invalid);
    assert_eq!(report.weight_balance.fuel_burn_weight, 72.0);
    assert_eq!(report.legs.len(), 2);
    assert_eq!(report.legs[1].leg.from, "LLHA");
    assert!(report.legs[1].clock_time_over_point.is_some());

    let leg_fuel: f64 = report.legs.iter().map(|l| l.fuel_used).sum();
    assert!((report.trip.total_fuel_used - (leg_fuel + 2.6)).abs() < 1e-9);
    assert!((report.trip.reserve_45_min - 6.75).abs() < 1e-9);
    assert_eq!(report.trip.total_distance, 85.0);
    Ok(())
}

#[test]
fn test_custom_aircraft_gets_fallback_limits() -> anyhow::Result<()> {
    let scenario = Scenario::from_json(CUSTOM_SCENARIO)?;
    let report = scenario.evaluate()?;

    assert_eq!(report.aircraft.cg_limits, CgLimits::standard_c172());
    assert_eq!(report.aircraft.envelope_points.len(), 6);
    assert_eq!(report.aircraft.envelope_points[0], report.aircraft.envelope_points[5]);

    // 80 kg pilot, 20 gal of fuel.
    let expected_weight = 1600.0 + 80.0 * KG_TO_LBS + 120.0;
    assert!((report.weight_balance.total_weight - expected_weight).abs() < 1e-9);
    assert_eq!(report.weight_balance.status, CgStatus::Ok);
    Ok(())
}

#[test]
fn test_custom_aircraft_with_inconsistent_moment_is_rejected() {
    let json = CUSTOM_SCENARIO.replace("\"basicEmptyMoment\": 64000", "\"basicEmptyMoment\": 70000");
    let scenario = Scenario::from_json(&json).unwrap();
    match scenario.evaluate() {
        Err(PreflightError::InvalidAircraft(msg)) => assert!(msg.contains("4X-NEW"), "{}", msg),
        other => panic!("expected InvalidAircraft, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Scenario::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, PreflightError::Io(_)));
    assert!(err.to_string().starts_with("IO error"));
}

#[test]
fn test_report_serializes_with_display_field_names() -> anyhow::Result<()> {
    let report = Scenario::from_json(PRESET_SCENARIO)?.evaluate()?;
    let value = serde_json::to_value(&report)?;

    assert!(value["weightBalance"]["landingCG"].is_number());
    assert_eq!(value["weightBalance"]["status"], "OK");
    assert!(value["trip"]["reserve45Min"].is_number());
    assert!(value["legs"][0]["calculatedGS"].is_number());
    assert_eq!(value["legs"][0]["from"], "LLHZ");
    Ok(())
}
