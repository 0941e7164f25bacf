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

mod adaptive;
mod heuristic;

pub use adaptive::AdaptiveScorer;
pub use heuristic::HeuristicScorer;

use crate::traits::StationDataSource;
use crate::utils::{distance_km, normalize_score};
use anyhow::Result;
use async_trait::async_trait;
use chargeion_i18n::I18nHandle;
use chargeion_types::{ScoreRequest, ScoredStation, Station};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::warn;

// ============= Scoring Constants =============

/// Result cap used when a request does not carry a positive limit
pub const DEFAULT_LIMIT: i32 = 10;

/// Distance beyond which a station earns no proximity score (km)
pub(crate) const MAX_USEFUL_DISTANCE_KM: f64 = 20.0;

/// Stretch factor lifting the normalized proximity score
pub(crate) const DISTANCE_STRETCH: f64 = 2.5;

/// Flat bonus granted inside the green tariff window
pub(crate) const GREEN_TARIFF_BONUS: f64 = 25.0;

/// Price above which a station earns no price score (CZK/kWh)
pub(crate) const PRICE_CEILING_CZK: f64 = 15.0;

/// Stretch factor lifting the normalized price score
pub(crate) const PRICE_STRETCH: f64 = 1.5;

/// First hour of the night green tariff window
const GREEN_WINDOW_START_HOUR: u32 = 23;

/// Last full hour of the night green tariff window
const GREEN_WINDOW_END_HOUR: u32 = 6;

/// Load below this counts as low occupancy (percent)
pub(crate) const LOW_LOAD_THRESHOLD: i32 = 30;

/// Load above this counts as high occupancy (percent)
pub(crate) const HIGH_LOAD_THRESHOLD: i32 = 65;

/// Distance under which the explanation calls a station nearby (km)
const NEARBY_KM: f64 = 5.0;

/// Price under which the explanation calls a station cheap (CZK/kWh)
const GOOD_PRICE_CZK: f64 = 7.0;

/// Learned value above which past experience is called out
const PAST_EXPERIENCE_THRESHOLD: f64 = 10.0;

// ============= Component Names =============

/// Occupancy contribution
pub const COMPONENT_LOAD: &str = "load";
/// Proximity contribution
pub const COMPONENT_DISTANCE: &str = "distance";
/// Green tariff contribution
pub const COMPONENT_GREEN: &str = "green";
/// Price contribution
pub const COMPONENT_PRICE: &str = "price";
/// Learned preference contribution (personalized scorer only)
pub const COMPONENT_RL_BONUS: &str = "rl_bonus";
/// Raw learned value (personalized scorer only)
pub const COMPONENT_Q_VALUE: &str = "q_value";

/// Trait for station recommendation scorers
///
/// Each scorer ranks the known stations for one user and time slot,
/// considering:
/// - Predicted or typical station occupancy
/// - Distance from the user
/// - Green tariff windows
/// - Charging price
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Get scorer name for logging
    fn name(&self) -> &str;

    /// Score and rank stations for the given request
    ///
    /// Returns at most the requested number of stations, best first.
    async fn score(&self, request: &ScoreRequest) -> Result<Vec<ScoredStation>>;
}

/// Station data resolved for one scoring call
pub(crate) struct SlotSnapshot {
    pub stations: Vec<Station>,
    /// Predicted load per station id for the requested slot
    pub forecast_by_station: HashMap<i64, i32>,
    pub day_of_week: u32,
    pub hour: u32,
}

/// Fetch stations and forecasts for the requested time slot
///
/// A failing station listing aborts the call. A failing forecast lookup
/// only degrades it: scoring continues on typical station density.
pub(crate) async fn fetch_slot_snapshot(
    source: &dyn StationDataSource,
    time_slot: DateTime<Utc>,
) -> Result<SlotSnapshot> {
    let stations = source.list_stations().await?;

    let day_of_week = time_slot.weekday().num_days_from_sunday();
    let hour = time_slot.hour();

    let forecast_by_station = match source.forecasts_for_slot(day_of_week, hour).await {
        Ok(forecasts) => forecasts
            .into_iter()
            .map(|forecast| (forecast.station_id, forecast.predicted_load))
            .collect(),
        Err(error) => {
            warn!(
                "Forecast lookup failed on '{}', falling back to station density: {:#}",
                source.name(),
                error
            );
            HashMap::new()
        }
    };

    Ok(SlotSnapshot {
        stations,
        forecast_by_station,
        day_of_week,
        hour,
    })
}

/// Load used for scoring one station
///
/// A forecast value of exactly 0 counts as "no data", not as an empty
/// station, so it falls back to the station's typical density.
pub(crate) fn effective_load(snapshot: &SlotSnapshot, station: &Station) -> i32 {
    match snapshot.forecast_by_station.get(&station.id) {
        Some(&load) if load != 0 => load,
        _ => station.density,
    }
}

/// Check whether an hour falls into the night green tariff window
/// (23:00 through 06:59)
pub(crate) fn is_green_hour(hour: u32) -> bool {
    hour >= GREEN_WINDOW_START_HOUR || hour <= GREEN_WINDOW_END_HOUR
}

/// Criteria values shared by both scorers for one station
pub(crate) struct CriteriaScores {
    pub distance_km: f64,
    pub green_hour: bool,
    pub load_score: f64,
    pub distance_score: f64,
    pub green_score: f64,
    pub price_score: f64,
}

/// Compute the four shared criteria scores for one station
pub(crate) fn criteria_scores(
    station: &Station,
    request: &ScoreRequest,
    load: i32,
    hour: u32,
) -> CriteriaScores {
    // Idle stations score high, saturated ones score 0
    let load_score = normalize_score(f64::from(100 - load), 0.0, 100.0);

    let distance = distance_km(request.user_lat, request.user_lng, station.lat, station.lng);
    let distance_score = normalize_score(
        (MAX_USEFUL_DISTANCE_KM - distance).max(0.0),
        0.0,
        MAX_USEFUL_DISTANCE_KM,
    ) * DISTANCE_STRETCH;

    let green_hour = is_green_hour(hour);
    let green_score = if green_hour { GREEN_TARIFF_BONUS } else { 0.0 };

    let price_score =
        normalize_score(PRICE_CEILING_CZK - station.price, 0.0, PRICE_CEILING_CZK) * PRICE_STRETCH;

    CriteriaScores {
        distance_km: distance,
        green_hour,
        load_score,
        distance_score,
        green_score,
        price_score,
    }
}

/// Raw facts feeding one explanation string
pub(crate) struct ExplanationInputs {
    pub load: i32,
    pub green_hour: bool,
    pub distance_km: f64,
    pub price: f64,
    /// Learned value, when the personalized scorer produced one
    pub q_value: Option<f64>,
    /// Whether this batch was scored with the exploration bonus active
    pub exploring: bool,
}

/// Look up a phrase, falling back to English when no bundle is configured
fn phrase(i18n: Option<&I18nHandle>, key: &str, fallback: &str) -> String {
    match i18n {
        Some(handle) => handle
            .inner()
            .get(key)
            .unwrap_or_else(|_| fallback.to_string()),
        None => fallback.to_string(),
    }
}

/// Build the " & "-joined explanation for one scored station
pub(crate) fn build_explanation(i18n: Option<&I18nHandle>, inputs: &ExplanationInputs) -> String {
    let mut parts = Vec::new();

    if inputs.load < LOW_LOAD_THRESHOLD {
        parts.push(phrase(i18n, "explain-density-low", "Low density"));
    } else if inputs.load > HIGH_LOAD_THRESHOLD {
        parts.push(phrase(i18n, "explain-density-high", "High density"));
    } else {
        parts.push(phrase(i18n, "explain-density-medium", "Medium density"));
    }

    if inputs.green_hour {
        parts.push(phrase(i18n, "explain-green-tariff", "green tariff"));
    }
    if inputs.distance_km < NEARBY_KM {
        parts.push(phrase(i18n, "explain-nearby", "nearby"));
    }
    if inputs.price < GOOD_PRICE_CZK {
        parts.push(phrase(i18n, "explain-good-price", "good price"));
    }

    if let Some(q_value) = inputs.q_value {
        if q_value > PAST_EXPERIENCE_THRESHOLD {
            parts.push(phrase(i18n, "explain-past-experience", "good past experience"));
        }
    }
    if inputs.exploring {
        parts.push(phrase(i18n, "explain-exploration", "exploring new stations"));
    }

    parts.join(" & ")
}

/// Resolve the requested result count against the shared default
pub(crate) fn effective_limit(limit: i32) -> usize {
    if limit <= 0 {
        DEFAULT_LIMIT as usize
    } else {
        limit as usize
    }
}

/// Order scored stations best-first and keep the top `limit`
///
/// The sort is stable and ties on score break toward the smaller
/// station id, so repeated calls over identical inputs return identical
/// rankings.
pub fn select_top_k(mut scored: Vec<ScoredStation>, limit: usize) -> Vec<ScoredStation> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.station_id.cmp(&b.station_id))
    });
    scored.truncate(limit);
    scored
}
