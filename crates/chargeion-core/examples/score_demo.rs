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

//! Scores a hardcoded Prague station grid with both scorers and prints
//! the rankings as JSON. Handy for eyeballing weight changes.

use anyhow::Result;
use async_trait::async_trait;
use chargeion_core::{AdaptiveScorer, HeuristicScorer, RecommendationService, StationDataSource};
use chargeion_types::{AdaptiveScorerConfig, LoadForecast, ScoreRequest, Station};
use chrono::{Datelike, Timelike, Utc};
use std::sync::Arc;

struct DemoStations;

#[async_trait]
impl StationDataSource for DemoStations {
    async fn list_stations(&self) -> Result<Vec<Station>> {
        Ok(vec![
            // Karlín, idle and cheap
            Station {
                id: 1,
                lat: 50.082,
                lng: 14.43,
                density: 20,
                price: 5.5,
            },
            // City center, usually crowded
            Station {
                id: 2,
                lat: 50.075,
                lng: 14.44,
                density: 75,
                price: 6.0,
            },
            // Smíchov
            Station {
                id: 3,
                lat: 50.05,
                lng: 14.4,
                density: 45,
                price: 8.5,
            },
            // Out of town, beyond the useful radius
            Station {
                id: 4,
                lat: 50.14,
                lng: 14.1,
                density: 10,
                price: 4.5,
            },
        ])
    }

    async fn forecasts_for_slot(&self, day_of_week: u32, hour: u32) -> Result<Vec<LoadForecast>> {
        Ok(vec![
            LoadForecast {
                station_id: 2,
                day_of_week,
                hour,
                predicted_load: 85,
            },
            LoadForecast {
                station_id: 3,
                day_of_week,
                hour,
                predicted_load: 30,
            },
        ])
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    tracing_subscriber::fmt::init();

    let now = Utc::now();
    let source: Arc<dyn StationDataSource> = Arc::new(DemoStations);

    let service = RecommendationService::new(Arc::new(HeuristicScorer::new(Arc::clone(&source))));
    let request = ScoreRequest {
        user_id: 42,
        user_lat: 50.08,
        user_lng: 14.43,
        time_slot: now,
        limit: 5,
    };

    println!("Heuristic ranking:");
    let ranked = service.recommend(request.clone()).await?;
    println!("{}", serde_json::to_string_pretty(&ranked)?);

    // Replay a few rewarded sessions at the out-of-town station, then
    // rank again with the personalized scorer
    let personalized = Arc::new(AdaptiveScorer::new(
        Arc::clone(&source),
        AdaptiveScorerConfig::default(),
    ));
    let reward = AdaptiveScorer::compute_reward(5, 1.8, false, 10);
    for _ in 0..6 {
        personalized.update_value(
            request.user_id,
            4,
            now.hour(),
            now.weekday().num_days_from_sunday(),
            reward,
        );
    }
    service.set_scorer(personalized);

    println!("Personalized ranking after 6 rewarded sessions at station 4:");
    let ranked = service.recommend(request).await?;
    println!("{}", serde_json::to_string_pretty(&ranked)?);

    Ok(())
}
