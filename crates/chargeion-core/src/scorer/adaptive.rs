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

use crate::qtable::{QKey, QTable};
use crate::scorer::{
    COMPONENT_DISTANCE, COMPONENT_GREEN, COMPONENT_LOAD, COMPONENT_PRICE, COMPONENT_Q_VALUE,
    COMPONENT_RL_BONUS, ExplanationInputs, HIGH_LOAD_THRESHOLD, LOW_LOAD_THRESHOLD, Scorer,
    build_explanation, criteria_scores, effective_limit, effective_load, fetch_slot_snapshot,
    select_top_k,
};
use crate::traits::StationDataSource;
use anyhow::Result;
use async_trait::async_trait;
use chargeion_i18n::I18nHandle;
use chargeion_types::{AdaptiveScorerConfig, ScoreRequest, ScoredStation};
use parking_lot::RwLock;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

// ============= Criteria Weights =============

const LOAD_WEIGHT: f64 = 0.35;
const DISTANCE_WEIGHT: f64 = 0.2;
const GREEN_WEIGHT: f64 = 0.25;
const PRICE_WEIGHT: f64 = 0.15;

/// Scale converting a learned value into score points
const RL_BONUS_SCALE: f64 = 0.05;

/// Upper bound of the random bonus granted while exploring
const EXPLORATION_BONUS_MAX: f64 = 10.0;

/// Online-learning scorer personalizing rankings per user
///
/// Blends the shared criteria with a learned per-(user, station, hour)
/// preference, and occasionally explores: with probability epsilon an
/// entire scoring call runs with random bonuses so lesser known
/// stations can surface. Epsilon decays multiplicatively after every
/// call down to a configured floor.
pub struct AdaptiveScorer {
    source: Arc<dyn StationDataSource>,
    q_table: Arc<QTable>,
    config: AdaptiveScorerConfig,
    epsilon: RwLock<f64>,
    i18n: Option<I18nHandle>,
}

impl AdaptiveScorer {
    /// Create a scorer with its own private value store
    pub fn new(source: Arc<dyn StationDataSource>, config: AdaptiveScorerConfig) -> Self {
        let q_table = Arc::new(QTable::new(config.max_entries_per_user));
        Self::with_table(source, config, q_table)
    }

    /// Create a scorer over a shared value store
    pub fn with_table(
        source: Arc<dyn StationDataSource>,
        config: AdaptiveScorerConfig,
        q_table: Arc<QTable>,
    ) -> Self {
        let epsilon = RwLock::new(config.initial_epsilon);
        Self {
            source,
            q_table,
            config,
            epsilon,
            i18n: None,
        }
    }

    /// Attach a translation handle for localized explanations
    #[must_use]
    pub fn with_i18n(mut self, i18n: I18nHandle) -> Self {
        self.i18n = Some(i18n);
        self
    }

    /// Current exploration probability
    pub fn current_epsilon(&self) -> f64 {
        *self.epsilon.read()
    }

    /// Number of learned entries across all users
    pub fn table_size(&self) -> usize {
        self.q_table.len()
    }

    /// Shared handle to the value store backing this scorer
    pub fn q_table(&self) -> Arc<QTable> {
        Arc::clone(&self.q_table)
    }

    /// Fold the outcome of a completed charging session into the store
    ///
    /// One-step update `q += alpha * (reward - q)`. The discount factor
    /// multiplies a next-state value that is always zero here, so this
    /// behaves as a recency-weighted running average rather than
    /// bootstrapped temporal-difference learning.
    pub fn update_value(
        &self,
        user_id: i64,
        station_id: i64,
        hour: u32,
        day_of_week: u32,
        reward: f64,
    ) {
        let alpha = self.config.alpha;
        let gamma = self.config.gamma;

        self.q_table.upsert(
            QKey {
                user_id,
                station_id,
                hour,
            },
            |entry| {
                let next_state_value = 0.0;
                entry.q_value += alpha * (reward + gamma * next_state_value - entry.q_value);
                entry.visit_count += 1;
                entry.day_of_week = day_of_week;
            },
        );

        debug!(
            "Recorded reward {:.2} for user {} at station {} (hour {})",
            reward, user_id, station_id, hour
        );
    }

    /// Translate a session outcome into a scalar reward
    ///
    /// Rewards cheap green charging at idle stations; charging at a
    /// crowded station costs points.
    pub fn compute_reward(coins_earned: i32, co2_saved_kg: f64, is_green: bool, load: i32) -> f64 {
        let mut reward = f64::from(coins_earned) + co2_saved_kg * 10.0;

        if is_green {
            reward += 20.0;
        }

        if load < LOW_LOAD_THRESHOLD {
            reward += 15.0;
        } else if load > HIGH_LOAD_THRESHOLD {
            reward -= 10.0;
        }

        reward
    }

    /// Decay epsilon toward its floor after a scoring call
    fn decay_epsilon(&self) {
        let mut epsilon = self.epsilon.write();
        *epsilon = (*epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }
}

#[async_trait]
impl Scorer for AdaptiveScorer {
    fn name(&self) -> &str {
        "personalized"
    }

    async fn score(&self, request: &ScoreRequest) -> Result<Vec<ScoredStation>> {
        let snapshot = fetch_slot_snapshot(self.source.as_ref(), request.time_slot).await?;

        let mut rng = rand::thread_rng();
        // One exploration draw per call, so a whole batch is either
        // exploiting or exploring
        let exploring = rng.gen_range(0.0..1.0) < self.current_epsilon();

        let mut scored = Vec::with_capacity(snapshot.stations.len());
        for station in &snapshot.stations {
            let load = effective_load(&snapshot, station);
            let criteria = criteria_scores(station, request, load, snapshot.hour);

            let q_value = self.q_table.value(&QKey {
                user_id: request.user_id,
                station_id: station.id,
                hour: snapshot.hour,
            });
            let rl_bonus = q_value * RL_BONUS_SCALE;

            let mut total = LOAD_WEIGHT * criteria.load_score
                + DISTANCE_WEIGHT * criteria.distance_score
                + GREEN_WEIGHT * criteria.green_score
                + PRICE_WEIGHT * criteria.price_score
                + rl_bonus;

            if exploring {
                total += rng.gen_range(0.0..EXPLORATION_BONUS_MAX);
            }

            let components = HashMap::from([
                (COMPONENT_LOAD.to_string(), criteria.load_score),
                (COMPONENT_DISTANCE.to_string(), criteria.distance_score),
                (COMPONENT_GREEN.to_string(), criteria.green_score),
                (COMPONENT_PRICE.to_string(), criteria.price_score),
                (COMPONENT_RL_BONUS.to_string(), rl_bonus),
                (COMPONENT_Q_VALUE.to_string(), q_value),
            ]);

            let explanation = build_explanation(
                self.i18n.as_ref(),
                &ExplanationInputs {
                    load,
                    green_hour: criteria.green_hour,
                    distance_km: criteria.distance_km,
                    price: station.price,
                    q_value: Some(q_value),
                    exploring,
                },
            );

            scored.push(ScoredStation {
                station_id: station.id,
                score: total,
                components,
                explanation,
            });
        }

        self.decay_epsilon();

        debug!(
            "Personalized scorer ranked {} stations for user {} (epsilon {:.3}, exploring: {})",
            scored.len(),
            request.user_id,
            self.current_epsilon(),
            exploring
        );

        Ok(select_top_k(scored, effective_limit(request.limit)))
    }
}
