// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of ChargeION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use serde::{Deserialize, Serialize};

/// A public charging station as seen by the scorers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    /// Stable station identifier
    pub id: i64,
    /// Latitude in decimal degrees (WGS84)
    pub lat: f64,
    /// Longitude in decimal degrees (WGS84)
    pub lng: f64,
    /// Typical utilization in percent (0-100), used whenever no forecast exists
    pub density: i32,
    /// Charging price in CZK/kWh
    pub price: f64,
}

/// Predicted utilization of one station for one weekly hour slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadForecast {
    /// Station this forecast belongs to
    pub station_id: i64,
    /// Day of week, Sunday = 0
    pub day_of_week: u32,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Predicted load in percent; a value of 0 means "no data"
    pub predicted_load: i32,
}
