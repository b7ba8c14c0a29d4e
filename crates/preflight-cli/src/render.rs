// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Plain-text tables for the terminal.

use preflight_core::aircraft::Aircraft;
use preflight_core::presets::PresetSummary;
use preflight_core::scenario::ScenarioReport;
use preflight_core::units::{from_lbs, gallons_to_liters, UnitSystem};
use preflight_core::weight_balance::StationWarnings;
use preflight_core::CgStatus;

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn weight(lbs: f64, unit: UnitSystem) -> String {
    format!("{:.1} {}", from_lbs(lbs, unit), unit.label())
}

fn fuel(gallons: f64) -> String {
    format!("{:.1} gal ({:.1} L)", gallons, gallons_to_liters(gallons))
}

fn status(status: CgStatus) -> String {
    if status.is_ok() {
        "OK".to_string()
    } else {
        format!("{} !", status)
    }
}

pub fn presets(summaries: &[PresetSummary]) -> String {
    finish(
        summaries
            .iter()
            .map(|s| format!("{:<14} {}", s.id, s.name))
            .collect(),
    )
}

pub fn aircraft(aircraft: &Aircraft) -> String {
    let limits = &aircraft.cg_limits;
    let mut lines = vec![
        format!("Aircraft {} ({})", aircraft.label(), aircraft.id),
        format!(
            "  Empty weight   {:.1} lbs @ {:.2} in (moment {:.1})",
            aircraft.basic_empty_weight, aircraft.empty_weight_arm, aircraft.basic_empty_moment
        ),
        format!("  Max takeoff    {:.0} lbs", aircraft.max_takeoff_weight),
        format!(
            "  Fuel           {} at {:.1} lbs/gal",
            fuel(aircraft.fuel_capacity),
            aircraft.usable_fuel_per_gal
        ),
    ];

    match limits.fwd_low {
        Some(low) => lines.push(format!(
            "  Forward limit  {:.1} in to {:.0} lbs, {:.1} in at {:.0} lbs",
            low.arm, low.weight, limits.fwd_high.arm, limits.fwd_high.weight
        )),
        None => lines.push(format!("  Forward limit  {:.1} in", limits.fwd_high.arm)),
    }
    lines.push(format!("  Aft limit      {:.1} in", limits.aft));

    lines.push("  Stations".to_string());
    for station in aircraft.stations() {
        let cap = station
            .max_weight
            .map(|w| format!("max {:.0} lbs", w))
            .unwrap_or_else(|| "no limit".to_string());
        lines.push(format!("    {:<24} arm {:>6.1}  {}", station.name, station.arm, cap));
    }

    finish(lines)
}

fn warning_lines(warnings: &StationWarnings) -> Vec<String> {
    [
        (warnings.baggage1, "Baggage area 1 over limit"),
        (warnings.baggage2, "Baggage area 2 over limit"),
        (warnings.total_baggage, "Total baggage over limit"),
        (warnings.front_seats, "Front seats over limit"),
        (warnings.rear_seats, "Rear seats over limit"),
        (warnings.fuel_capacity, "Fuel exceeds tank capacity"),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .map(|(_, text)| format!("  WARNING: {}", text))
    .collect()
}

pub fn weight_balance(report: &ScenarioReport) -> String {
    let wb = &report.weight_balance;
    let unit = report.load.unit_preference;

    let mut lines = vec![
        "Weight & Balance".to_string(),
        format!(
            "  Takeoff  {:>16}  CG {:>6.2} in  [{:.2} .. {:.2}]  {}",
            weight(wb.total_weight, unit),
            wb.cg,
            wb.limits.takeoff.min,
            wb.limits.takeoff.max,
            status(wb.status)
        ),
        format!(
            "  Landing  {:>16}  CG {:>6.2} in  [{:.2} .. {:.2}]  {}",
            weight(wb.landing_weight, unit),
            wb.landing_cg,
            wb.limits.landing.min,
            wb.limits.landing.max,
            status(wb.landing_status)
        ),
        format!(
            "  Fuel on board {}, planned burn {}",
            fuel(wb.total_fuel_gallons),
            weight(wb.fuel_burn_weight, unit)
        ),
    ];

    if wb.is_fuel_burn_invalid {
        lines.push("  WARNING: Planned burn exceeds fuel on board".to_string());
    }
    lines.extend(warning_lines(&wb.station_warnings));
    lines.push(if wb.is_within_limits {
        "  Within limits".to_string()
    } else {
        "  NOT within limits".to_string()
    });

    finish(lines)
}

pub fn navigation(report: &ScenarioReport) -> String {
    let mut lines = vec![
        "Navigation Log".to_string(),
        format!(
            "  {:<6} {:<6} {:>6} {:>5} {:>6} {:>6} {:>5} {:>6} {:>9} {:>9} {:>9} {:>6}",
            "From", "To", "Dist", "Crs", "TAS", "WCA", "Hdg", "GS", "Time", "ETE", "ETA", "Fuel"
        ),
    ];

    for leg in &report.legs {
        lines.push(format!(
            "  {:<6} {:<6} {:>6.1} {:>5.0} {:>6.1} {:>+6.1} {:>5.0} {:>6.1} {:>9} {:>9} {:>9} {:>6.1}",
            leg.leg.from,
            leg.leg.to,
            leg.leg.distance_nm,
            leg.leg.course,
            leg.calculated_tas,
            leg.calculated_wca,
            leg.calculated_heading,
            leg.calculated_gs,
            leg.flight_time,
            leg.time_over_point,
            leg.clock_time_over_point.as_deref().unwrap_or("--"),
            leg.fuel_used
        ));
    }

    let trip = &report.trip;
    let params = &report.parameters;
    lines.push(format!(
        "  Total {:.1} nm, {} en route",
        trip.total_distance,
        preflight_core::navigation::format_duration(trip.total_time_hours)
    ));
    lines.push(format!(
        "  Trip fuel {} (incl. taxi {:.1} gal, climb {:.1} gal)",
        fuel(trip.total_fuel_used),
        params.taxi_fuel,
        params.toc_fuel
    ));
    lines.push(format!("  45 min reserve {}", fuel(trip.reserve_45_min)));
    lines.push(format!("  Required (45 min) {}", fuel(trip.req_fuel_45_min)));
    lines.push(format!("  Required (60 min) {}", fuel(trip.req_fuel_60_min)));

    let on_board = report.weight_balance.total_fuel_gallons;
    if on_board + 1e-9 < trip.req_fuel_45_min {
        lines.push(format!(
            "  WARNING: {} on board is below the 45 min requirement",
            fuel(on_board)
        ));
    }

    finish(lines)
}
