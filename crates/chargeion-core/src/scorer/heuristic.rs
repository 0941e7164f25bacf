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

use crate::scorer::{
    COMPONENT_DISTANCE, COMPONENT_GREEN, COMPONENT_LOAD, COMPONENT_PRICE, ExplanationInputs,
    Scorer, build_explanation, criteria_scores, effective_limit, effective_load,
    fetch_slot_snapshot, select_top_k,
};
use crate::traits::StationDataSource;
use anyhow::Result;
use async_trait::async_trait;
use chargeion_i18n::I18nHandle;
use chargeion_types::{ScoreRequest, ScoredStation};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

// ============= Criteria Weights =============

const LOAD_WEIGHT: f64 = 0.4;
const DISTANCE_WEIGHT: f64 = 0.2;
const GREEN_WEIGHT: f64 = 0.25;
const PRICE_WEIGHT: f64 = 0.15;

/// Weighted-sum scorer treating every user the same
///
/// Ranks stations on four criteria: predicted occupancy, distance from
/// the user, green tariff windows and charging price. Stateless, so two
/// calls over the same data always produce the same ranking.
pub struct HeuristicScorer {
    source: Arc<dyn StationDataSource>,
    i18n: Option<I18nHandle>,
}

impl HeuristicScorer {
    /// Create a new heuristic scorer over the given station source
    pub fn new(source: Arc<dyn StationDataSource>) -> Self {
        Self { source, i18n: None }
    }

    /// Attach a translation handle for localized explanations
    #[must_use]
    pub fn with_i18n(mut self, i18n: I18nHandle) -> Self {
        self.i18n = Some(i18n);
        self
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn score(&self, request: &ScoreRequest) -> Result<Vec<ScoredStation>> {
        let snapshot = fetch_slot_snapshot(self.source.as_ref(), request.time_slot).await?;

        let mut scored = Vec::with_capacity(snapshot.stations.len());
        for station in &snapshot.stations {
            let load = effective_load(&snapshot, station);
            let criteria = criteria_scores(station, request, load, snapshot.hour);

            let total = LOAD_WEIGHT * criteria.load_score
                + DISTANCE_WEIGHT * criteria.distance_score
                + GREEN_WEIGHT * criteria.green_score
                + PRICE_WEIGHT * criteria.price_score;

            let components = HashMap::from([
                (COMPONENT_LOAD.to_string(), criteria.load_score),
                (COMPONENT_DISTANCE.to_string(), criteria.distance_score),
                (COMPONENT_GREEN.to_string(), criteria.green_score),
                (COMPONENT_PRICE.to_string(), criteria.price_score),
            ]);

            let explanation = build_explanation(
                self.i18n.as_ref(),
                &ExplanationInputs {
                    load,
                    green_hour: criteria.green_hour,
                    distance_km: criteria.distance_km,
                    price: station.price,
                    q_value: None,
                    exploring: false,
                },
            );

            scored.push(ScoredStation {
                station_id: station.id,
                score: total,
                components,
                explanation,
            });
        }

        debug!(
            "Heuristic scorer ranked {} stations for user {} (slot {}/{})",
            scored.len(),
            request.user_id,
            snapshot.day_of_week,
            snapshot.hour
        );

        Ok(select_top_k(scored, effective_limit(request.limit)))
    }
}
