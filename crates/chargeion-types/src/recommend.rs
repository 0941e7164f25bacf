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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A recommendation request on behalf of one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRequest {
    /// Requesting user
    pub user_id: i64,
    /// User latitude in decimal degrees
    pub user_lat: f64,
    /// User longitude in decimal degrees
    pub user_lng: f64,
    /// Time slot the recommendation is for
    pub time_slot: DateTime<Utc>,
    /// Maximum number of results; values <= 0 fall back to the service default
    pub limit: i32,
}

/// One recommended station with its score breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredStation {
    /// Station being recommended
    pub station_id: i64,
    /// Final weighted score, higher is better
    pub score: f64,
    /// Per-criterion contributions keyed by component name
    pub components: HashMap<String, f64>,
    /// Human-readable explanation in the configured language
    pub explanation: String,
}
