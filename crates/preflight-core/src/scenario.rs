// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Scenario files: an aircraft, a load and a route, read from JSON.

use crate::aircraft::Aircraft;
use crate::navigation::{self, FlightLeg, FlightParameters, LegResult, TripSummary};
use crate::presets::{self, DEFAULT_AIRCRAFT_ID};
use crate::weight_balance::{self, FlightLoad, WbResult};
use crate::PreflightError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Either a built-in preset id or a full custom profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AircraftSource {
    Preset(String),
    Custom(Box<Aircraft>),
}

impl Default for AircraftSource {
    fn default() -> Self {
        AircraftSource::Preset(DEFAULT_AIRCRAFT_ID.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub aircraft: AircraftSource,
    #[serde(default)]
    pub load: Option<FlightLoad>,
    #[serde(default)]
    pub parameters: Option<FlightParameters>,
    #[serde(default)]
    pub legs: Vec<FlightLeg>,
}

/// Everything the engines derive from one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub aircraft: Aircraft,
    pub load: FlightLoad,
    pub parameters: FlightParameters,
    pub weight_balance: WbResult,
    pub legs: Vec<LegResult>,
    pub trip: TripSummary,
}

impl Scenario {
    pub fn from_json(content: &str) -> Result<Self, PreflightError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PreflightError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let scenario = Self::from_json(&content)?;
        debug!(
            "Scenario loaded — path={} legs={}",
            path.display(),
            scenario.legs.len()
        );
        Ok(scenario)
    }

    /// Looks up the preset, or sanitizes and validates the custom profile.
    pub fn resolve_aircraft(&self) -> Result<Aircraft, PreflightError> {
        match &self.aircraft {
            AircraftSource::Preset(id) => {
                presets::preset(id).ok_or_else(|| PreflightError::UnknownPreset(id.clone()))
            }
            AircraftSource::Custom(aircraft) => {
                let aircraft = aircraft.as_ref().clone().with_fallback_limits();
                aircraft.validate()?;
                Ok(aircraft)
            }
        }
    }

    pub fn evaluate(&self) -> Result<ScenarioReport, PreflightError> {
        let aircraft = self.resolve_aircraft()?;
        let load = self
            .load
            .clone()
            .unwrap_or_else(|| FlightLoad::standard(&aircraft));
        let parameters = self.parameters.clone().unwrap_or_default();

        let weight_balance = weight_balance::compute(&aircraft, &load);
        let legs = navigation::compute_legs(&parameters, &self.legs);
        let trip = navigation::summarize(&parameters, &legs);

        Ok(ScenarioReport {
            aircraft,
            load,
            parameters,
            weight_balance,
            legs,
            trip,
        })
    }
}
