// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Weight & balance and navigation leg calculations for light aircraft.
//!
//! Both engines are plain functions of their inputs. They never fail: degenerate input
//! produces a defined number, and out-of-limit conditions come back as data.

pub mod aircraft;
pub mod navigation;
pub mod presets;
pub mod scenario;
pub mod units;
pub mod weight_balance;

use thiserror::Error;

pub use aircraft::Aircraft;
pub use navigation::{FlightLeg, FlightParameters, LegResult, TripSummary};
pub use weight_balance::{CgStatus, FlightLoad, WbResult};

/// Problems with input data, raised before the engines run.
#[derive(Error, Debug)]
pub enum PreflightError {
    #[error("Unknown aircraft preset: {0}")]
    UnknownPreset(String),
    #[error("Invalid aircraft profile: {0}")]
    InvalidAircraft(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
