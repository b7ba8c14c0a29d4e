// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Leg-by-leg navigation performance: TAS from IAS, the wind triangle, and time/fuel
//! accumulated along the route.
//!
//! Like the W&B engine this never fails. Half-typed input (wind speed without a
//! direction, a crosswind stronger than the TAS) falls back to documented values instead
//! of leaking NaN into the log.

use crate::units::{finite_or, safe_div};
use chrono::{Duration, NaiveTime};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const ISA_SEA_LEVEL_C: f64 = 15.0;
const ISA_LAPSE_C_PER_1000FT: f64 = 2.0;
/// Rule of thumb: TAS grows 2 % per 1000 ft over IAS.
const TAS_GAIN_PER_1000FT: f64 = 0.02;
/// And a further 1 % per 5 °C above standard.
const TAS_GAIN_PER_5C: f64 = 0.01;
const RESERVE_45_MIN_HOURS: f64 = 0.75;
const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Cruise performance and departure time shared by every leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightParameters {
    /// Indicated airspeed in cruise (kt).
    pub cruise_ias: f64,
    /// Cruise fuel flow (gal/hr).
    pub cruise_gph: f64,
    pub taxi_fuel: f64,
    /// Climb allowance to top of climb (gal).
    pub toc_fuel: f64,
    /// Local takeoff time as `HH:MM`. May be empty.
    pub takeoff_time: String,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            cruise_ias: 90.0,
            cruise_gph: 8.0,
            taxi_fuel: 1.1,
            toc_fuel: 0.0,
            takeoff_time: "08:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightLeg {
    pub from: String,
    pub to: String,
    pub distance_nm: f64,
    /// True course (degrees).
    pub course: f64,
    /// Cruise altitude (ft).
    pub altitude: f64,
    /// Outside air temperature at altitude (°C).
    pub temperature: f64,
    /// Direction the wind blows from (degrees true).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSolution {
    /// Wind correction angle (degrees, positive to the right).
    pub wca: f64,
    pub groundspeed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResult {
    #[serde(flatten)]
    pub leg: FlightLeg,
    #[serde(rename = "calculatedTAS")]
    pub calculated_tas: f64,
    #[serde(rename = "calculatedWCA")]
    pub calculated_wca: f64,
    #[serde(rename = "calculatedGS")]
    pub calculated_gs: f64,
    /// True heading to fly, in [0, 360).
    pub calculated_heading: f64,
    pub flight_time_hours: f64,
    pub flight_time: String,
    pub fuel_used: f64,
    /// Hours since takeoff at the end of this leg.
    pub cumulative_hours: f64,
    /// Elapsed time over the leg's end point, `HH:MM:SS`.
    pub time_over_point: String,
    /// Clock time over the leg's end point, when a takeoff time is known.
    pub clock_time_over_point: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_distance: f64,
    pub total_time_hours: f64,
    /// Leg fuel plus taxi and climb allowances (gal).
    pub total_fuel_used: f64,
    #[serde(rename = "reserve45Min")]
    pub reserve_45_min: f64,
    #[serde(rename = "reqFuel45Min")]
    pub req_fuel_45_min: f64,
    #[serde(rename = "reqFuel60Min")]
    pub req_fuel_60_min: f64,
}

/// True airspeed from indicated, altitude (ft) and outside air temperature (°C).
pub fn true_airspeed(ias: f64, altitude: f64, temperature: f64) -> f64 {
    let ias = finite_or(ias, 0.0);
    if ias <= 0.0 {
        return 0.0;
    }

    let thousands = finite_or(altitude, 0.0) / 1000.0;
    let std_temp = ISA_SEA_LEVEL_C - ISA_LAPSE_C_PER_1000FT * thousands;
    let deviation = finite_or(temperature, 0.0) - std_temp;

    let base = ias * (1.0 + TAS_GAIN_PER_1000FT * thousands);
    let tas = base + base * (deviation / 5.0) * TAS_GAIN_PER_5C;
    finite_or(tas, 0.0).max(0.0)
}

fn calm(tas: f64) -> WindSolution {
    WindSolution {
        wca: 0.0,
        groundspeed: tas.max(0.0),
    }
}

/// Solves the wind triangle for a true course.
///
/// Missing or non-finite wind, or no TAS, means a no-wind leg. When the crosswind
/// component exceeds the TAS the correction angle has no solution; the WCA is then 0
/// and the groundspeed is still floored at zero.
pub fn wind_triangle(
    tas: f64,
    course: f64,
    wind_dir: Option<f64>,
    wind_speed: Option<f64>,
) -> WindSolution {
    let (Some(dir), Some(speed)) = (
        wind_dir.filter(|v| v.is_finite()),
        wind_speed.filter(|v| v.is_finite()),
    ) else {
        return calm(tas);
    };
    if tas <= 0.0 || !tas.is_finite() {
        return calm(tas);
    }

    let wind_angle = (dir - finite_or(course, 0.0)).to_radians();
    let ratio = safe_div(speed * wind_angle.sin(), tas, 0.0);
    let wca = if (-1.0..=1.0).contains(&ratio) {
        ratio.asin()
    } else {
        warn!(
            "Crosswind exceeds TAS, no wind correction — tas={:.1} wind_speed={:.1} ratio={:.3}",
            tas, speed, ratio
        );
        0.0
    };

    let groundspeed = tas * wca.cos() - speed * wind_angle.cos();
    WindSolution {
        wca: wca.to_degrees(),
        groundspeed: finite_or(groundspeed, 0.0).max(0.0),
    }
}

/// Renders fractional hours as `HH:MM:SS`.
///
/// Hours and minutes are truncated, seconds rounded; a rounded 60 s carries into the
/// minutes. Non-finite or negative input renders as `00:00:00`.
pub fn format_duration(hours: f64) -> String {
    if !hours.is_finite() || hours < 0.0 {
        return "00:00:00".to_string();
    }

    let mut h = hours.floor();
    let minutes = (hours - h) * 60.0;
    let mut m = minutes.floor();
    let mut s = ((minutes - m) * 60.0).round();
    if s >= 60.0 {
        s -= 60.0;
        m += 1.0;
    }
    if m >= 60.0 {
        m -= 60.0;
        h += 1.0;
    }

    format!("{:02}:{:02}:{:02}", h as u64, m as u64, s as u64)
}

fn parse_takeoff_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

/// Wall-clock time `hours` after `takeoff_time`, wrapping past midnight.
pub fn clock_time_after(takeoff_time: &str, hours: f64) -> Option<String> {
    let takeoff = parse_takeoff_time(takeoff_time)?;
    let seconds = (finite_or(hours, 0.0) * 3600.0).round() as i64;
    let offset = Duration::seconds(seconds.rem_euclid(SECONDS_PER_DAY));
    let (time, _) = takeoff.overflowing_add_signed(offset);
    Some(time.format("%H:%M:%S").to_string())
}

pub fn compute_leg(
    params: &FlightParameters,
    leg: &FlightLeg,
    cumulative_before: f64,
) -> LegResult {
    let tas = true_airspeed(params.cruise_ias, leg.altitude, leg.temperature);
    let course = finite_or(leg.course, 0.0);
    let wind = wind_triangle(tas, course, leg.wind_dir, leg.wind_speed);

    let distance = finite_or(leg.distance_nm, 0.0);
    let flight_time_hours = if wind.groundspeed > 0.0 {
        safe_div(distance, wind.groundspeed, 0.0)
    } else {
        0.0
    };
    let fuel_used = flight_time_hours * finite_or(params.cruise_gph, 0.0);
    let cumulative_hours = finite_or(cumulative_before, 0.0) + flight_time_hours;

    debug!(
        "Leg computed — {}->{} tas={:.1} wca={:.1} gs={:.1} time_h={:.3} fuel={:.2}",
        leg.from, leg.to, tas, wind.wca, wind.groundspeed, flight_time_hours, fuel_used
    );

    LegResult {
        leg: leg.clone(),
        calculated_tas: tas,
        calculated_wca: wind.wca,
        calculated_gs: wind.groundspeed,
        calculated_heading: (course + wind.wca).rem_euclid(360.0),
        flight_time_hours,
        flight_time: format_duration(flight_time_hours),
        fuel_used,
        cumulative_hours,
        time_over_point: format_duration(cumulative_hours),
        clock_time_over_point: clock_time_after(&params.takeoff_time, cumulative_hours),
    }
}

/// Computes every leg in order, threading the elapsed time through.
pub fn compute_legs(params: &FlightParameters, legs: &[FlightLeg]) -> Vec<LegResult> {
    let mut cumulative = 0.0;
    legs.iter()
        .map(|leg| {
            let result = compute_leg(params, leg, cumulative);
            cumulative = result.cumulative_hours;
            result
        })
        .collect()
}

pub fn summarize(params: &FlightParameters, results: &[LegResult]) -> TripSummary {
    let gph = finite_or(params.cruise_gph, 0.0);
    let total_distance: f64 = results
        .iter()
        .map(|r| finite_or(r.leg.distance_nm, 0.0))
        .sum();
    let total_time_hours: f64 = results.iter().map(|r| r.flight_time_hours).sum();
    let leg_fuel: f64 = results.iter().map(|r| r.fuel_used).sum();

    let total_fuel_used =
        leg_fuel + finite_or(params.taxi_fuel, 0.0) + finite_or(params.toc_fuel, 0.0);
    let reserve_45_min = RESERVE_45_MIN_HOURS * gph;

    TripSummary {
        total_distance,
        total_time_hours,
        total_fuel_used,
        reserve_45_min,
        req_fuel_45_min: total_fuel_used + reserve_45_min,
        req_fuel_60_min: total_fuel_used + gph,
    }
}

/// An ordered list of legs being edited.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    legs: Vec<FlightLeg>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    /// Appends a blank leg starting where the last one ended.
    pub fn add_leg(&mut self) -> &mut FlightLeg {
        self.push_leg(FlightLeg::default())
    }

    /// Appends `leg`, filling an empty `from` with the previous leg's `to`.
    pub fn push_leg(&mut self, mut leg: FlightLeg) -> &mut FlightLeg {
        if leg.from.is_empty() {
            if let Some(last) = self.legs.last() {
                leg.from = last.to.clone();
            }
        }
        self.legs.push(leg);
        let last = self.legs.len() - 1;
        &mut self.legs[last]
    }

    pub fn remove_leg(&mut self, index: usize) -> Option<FlightLeg> {
        (index < self.legs.len()).then(|| self.legs.remove(index))
    }

    pub fn compute(&self, params: &FlightParameters) -> (Vec<LegResult>, TripSummary) {
        let results = compute_legs(params, &self.legs);
        let summary = summarize(params, &results);
        (results, summary)
    }
}

impl From<Vec<FlightLeg>> for Route {
    fn from(legs: Vec<FlightLeg>) -> Self {
        Self { legs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(distance: f64, course: f64, altitude: f64, temperature: f64) -> FlightLeg {
        FlightLeg {
            from: "LLHZ".to_string(),
            to: "LLMG".to_string(),
            distance_nm: distance,
            course,
            altitude,
            temperature,
            ..FlightLeg::default()
        }
    }

    #[test]
    fn test_tas_at_sea_level_standard() {
        assert_eq!(true_airspeed(90.0, 0.0, 15.0), 90.0);
    }

    #[test]
    fn test_tas_at_6000ft_warm() {
        let tas = true_airspeed(90.0, 6000.0, 15.0);
        assert!(tas > 90.0 * 1.12);
        assert!((tas - 103.2192).abs() < 1e-9);
    }

    #[test]
    fn test_tas_cold_day_is_lower() {
        let standard = true_airspeed(100.0, 4000.0, 7.0);
        let cold = true_airspeed(100.0, 4000.0, -3.0);
        assert!((standard - 108.0).abs() < 1e-9);
        assert!(cold < standard);
    }

    #[test]
    fn test_tas_zero_for_non_positive_ias() {
        assert_eq!(true_airspeed(0.0, 5000.0, 0.0), 0.0);
        assert_eq!(true_airspeed(-10.0, 5000.0, 0.0), 0.0);
        assert_eq!(true_airspeed(f64::NAN, 5000.0, 0.0), 0.0);
    }

    #[test]
    fn test_no_wind_leaves_groundspeed_equal_tas() {
        let solution = wind_triangle(110.0, 45.0, None, None);
        assert_eq!(solution, WindSolution { wca: 0.0, groundspeed: 110.0 });

        let half_typed = wind_triangle(110.0, 45.0, None, Some(20.0));
        assert_eq!(half_typed.groundspeed, 110.0);
        assert_eq!(half_typed.wca, 0.0);

        let nan = wind_triangle(110.0, 45.0, Some(f64::NAN), Some(20.0));
        assert_eq!(nan.groundspeed, 110.0);
    }

    #[test]
    fn test_direct_headwind_and_tailwind() {
        let head = wind_triangle(100.0, 360.0, Some(360.0), Some(20.0));
        assert!(head.wca.abs() < 1e-9);
        assert!((head.groundspeed - 80.0).abs() < 1e-9);

        let tail = wind_triangle(100.0, 90.0, Some(270.0), Some(20.0));
        assert!((tail.groundspeed - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_crosswind_from_right_gives_positive_wca() {
        let solution = wind_triangle(100.0, 0.0, Some(90.0), Some(20.0));
        let expected_wca = (0.2_f64).asin().to_degrees();
        assert!((solution.wca - expected_wca).abs() < 1e-9);
        assert!((solution.groundspeed - 100.0 * (0.2_f64).asin().cos()).abs() < 1e-9);
    }

    #[test]
    fn test_crosswind_exceeding_tas_falls_back() {
        let solution = wind_triangle(30.0, 0.0, Some(90.0), Some(40.0));
        assert_eq!(solution.wca, 0.0);
        assert!(solution.groundspeed >= 0.0);
        assert!(solution.groundspeed.is_finite());
    }

    #[test]
    fn test_groundspeed_floored_in_strong_headwind() {
        let solution = wind_triangle(30.0, 180.0, Some(180.0), Some(60.0));
        assert_eq!(solution.groundspeed, 0.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(1.5), "01:30:00");
        assert_eq!(format_duration(2.0 + 15.0 / 60.0 + 30.0 / 3600.0), "02:15:30");
        assert_eq!(format_duration(125.25), "125:15:00");
        assert_eq!(format_duration(f64::NAN), "00:00:00");
        assert_eq!(format_duration(f64::INFINITY), "00:00:00");
        assert_eq!(format_duration(-1.0), "00:00:00");
    }

    #[test]
    fn test_format_duration_carries_rounded_seconds() {
        assert_eq!(format_duration(0.999_999), "01:00:00");
        assert_eq!(format_duration(59.9999 / 3600.0), "00:01:00");
    }

    #[test]
    fn test_clock_time_wraps_midnight() {
        assert_eq!(clock_time_after("08:00", 1.5).as_deref(), Some("09:30:00"));
        assert_eq!(clock_time_after("23:30", 1.0).as_deref(), Some("00:30:00"));
        assert_eq!(clock_time_after("10:00:30", 0.0).as_deref(), Some("10:00:30"));
        assert_eq!(clock_time_after("", 1.0), None);
        assert_eq!(clock_time_after("soon", 1.0), None);
    }

    #[test]
    fn test_still_air_sea_level_leg() {
        let params = FlightParameters::default();
        let result = compute_leg(&params, &leg(45.0, 90.0, 0.0, 15.0), 0.0);
        assert_eq!(result.calculated_tas, 90.0);
        assert_eq!(result.calculated_gs, 90.0);
        assert_eq!(result.calculated_wca, 0.0);
        assert_eq!(result.calculated_heading, 90.0);
        assert!((result.flight_time_hours - 0.5).abs() < 1e-12);
        assert!((result.fuel_used - 4.0).abs() < 1e-12);
        assert_eq!(result.time_over_point, "00:30:00");
        assert_eq!(result.clock_time_over_point.as_deref(), Some("08:30:00"));
    }

    #[test]
    fn test_zero_groundspeed_leg_takes_no_time() {
        let params = FlightParameters {
            cruise_ias: 0.0,
            ..FlightParameters::default()
        };
        let result = compute_leg(&params, &leg(45.0, 90.0, 0.0, 15.0), 1.0);
        assert_eq!(result.flight_time_hours, 0.0);
        assert_eq!(result.fuel_used, 0.0);
        assert_eq!(result.cumulative_hours, 1.0);
        assert_eq!(result.time_over_point, "01:00:00");
    }

    #[test]
    fn test_heading_wraps_below_north() {
        let params = FlightParameters::default();
        let mut westerly = leg(30.0, 5.0, 0.0, 15.0);
        westerly.wind_dir = Some(270.0);
        westerly.wind_speed = Some(20.0);
        let result = compute_leg(&params, &westerly, 0.0);
        assert!(result.calculated_wca < -5.0);
        assert!(result.calculated_heading > 350.0 && result.calculated_heading < 360.0);
    }

    #[test]
    fn test_summary_adds_taxi_climb_and_reserves() {
        let params = FlightParameters {
            cruise_gph: 10.0,
            taxi_fuel: 1.0,
            toc_fuel: 2.0,
            ..FlightParameters::default()
        };
        let legs = vec![leg(45.0, 0.0, 0.0, 15.0), leg(90.0, 180.0, 0.0, 15.0)];
        let results = compute_legs(&params, &legs);
        let summary = summarize(&params, &results);

        assert_eq!(summary.total_distance, 135.0);
        assert!((summary.total_time_hours - 1.5).abs() < 1e-12);
        assert!((summary.total_fuel_used - 18.0).abs() < 1e-12);
        assert!((summary.reserve_45_min - 7.5).abs() < 1e-12);
        assert!((summary.req_fuel_45_min - 25.5).abs() < 1e-12);
        assert!((summary.req_fuel_60_min - 28.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_route_summary() {
        let params = FlightParameters::default();
        let summary = summarize(&params, &[]);
        assert_eq!(summary.total_distance, 0.0);
        assert!((summary.total_fuel_used - 1.1).abs() < 1e-12);
        assert!((summary.req_fuel_60_min - 9.1).abs() < 1e-12);
    }

    #[test]
    fn test_route_chains_waypoints() {
        let mut route = Route::new();
        let first = route.add_leg();
        first.from = "LLHZ".to_string();
        first.to = "LLMG".to_string();
        let second = route.add_leg();
        assert_eq!(second.from, "LLMG");
        second.to = "LLIB".to_string();

        let explicit = route.push_leg(FlightLeg {
            from: "LLHA".to_string(),
            ..FlightLeg::default()
        });
        assert_eq!(explicit.from, "LLHA");

        assert_eq!(route.legs().len(), 3);
        assert_eq!(route.remove_leg(2).unwrap().from, "LLHA");
        assert!(route.remove_leg(5).is_none());
        assert_eq!(route.legs().len(), 2);
    }

    #[test]
    fn test_leg_json_uses_original_field_names() {
        let json = r#"{"from":"LLHZ","to":"LLMG","distanceNm":30,"course":40,"altitude":3000,"temperature":12,"windDir":270}"#;
        let parsed: FlightLeg = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.wind_dir, Some(270.0));
        assert_eq!(parsed.wind_speed, None);

        let result = compute_leg(&FlightParameters::default(), &parsed, 0.0);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["from"], "LLHZ");
        assert!(value.get("calculatedTAS").is_some());
        assert!(value.get("timeOverPoint").is_some());
    }
}
