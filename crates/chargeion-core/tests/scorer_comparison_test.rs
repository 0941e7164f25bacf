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

use anyhow::Result;
use async_trait::async_trait;
use chargeion_core::{
    AdaptiveScorer, COMPONENT_DISTANCE, COMPONENT_GREEN, COMPONENT_LOAD, COMPONENT_PRICE,
    COMPONENT_Q_VALUE, COMPONENT_RL_BONUS, HeuristicScorer, Scorer, StationDataSource,
};
use chargeion_types::{AdaptiveScorerConfig, LoadForecast, ScoreRequest, Station};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Helper to create a realistic Prague station grid for testing
fn create_prague_grid() -> Vec<Station> {
    vec![
        // Karlín: idle, cheap, right next to the user
        Station {
            id: 1,
            lat: 50.082,
            lng: 14.43,
            density: 20,
            price: 5.5,
        },
        // City center: crowded but close
        Station {
            id: 2,
            lat: 50.075,
            lng: 14.44,
            density: 75,
            price: 6.0,
        },
        // Smíchov: moderate load, pricier
        Station {
            id: 3,
            lat: 50.05,
            lng: 14.4,
            density: 45,
            price: 8.5,
        },
        // Letňany: quiet edge-of-town site
        Station {
            id: 4,
            lat: 50.13,
            lng: 14.5,
            density: 30,
            price: 7.0,
        },
        // Beroun direction: cheapest and emptiest, but past the useful radius
        Station {
            id: 5,
            lat: 50.31,
            lng: 14.43,
            density: 10,
            price: 4.5,
        },
    ]
}

struct GridStations(Vec<Station>);

#[async_trait]
impl StationDataSource for GridStations {
    async fn list_stations(&self) -> Result<Vec<Station>> {
        Ok(self.0.clone())
    }

    async fn forecasts_for_slot(&self, _day_of_week: u32, _hour: u32) -> Result<Vec<LoadForecast>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "grid"
    }
}

fn request_at(hour: u32) -> ScoreRequest {
    ScoreRequest {
        user_id: 42,
        user_lat: 50.08,
        user_lng: 14.43,
        time_slot: Utc.with_ymd_and_hms(2025, 6, 15, hour, 0, 0).unwrap(),
        limit: 10,
    }
}

fn exploit_config() -> AdaptiveScorerConfig {
    // Floor must go to zero as well, otherwise the decay step lifts
    // epsilon back up to it after the first call
    AdaptiveScorerConfig {
        initial_epsilon: 0.0,
        min_epsilon: 0.0,
        ..AdaptiveScorerConfig::default()
    }
}

#[derive(Debug)]
struct ScorerComparison {
    station_id: i64,
    heuristic_score: f64,
    personalized_score: f64,
    heuristic_rank: usize,
    personalized_rank: usize,
    ranks_match: bool,
}

#[tokio::test]
async fn compare_scorers_on_prague_grid() {
    let source: Arc<dyn StationDataSource> = Arc::new(GridStations(create_prague_grid()));
    let heuristic = HeuristicScorer::new(Arc::clone(&source));
    let personalized = AdaptiveScorer::new(Arc::clone(&source), exploit_config());

    let request = request_at(12);
    let h_ranked = heuristic.score(&request).await.unwrap();
    let p_ranked = personalized.score(&request).await.unwrap();

    assert_eq!(h_ranked.len(), 5);
    assert_eq!(p_ranked.len(), 5);

    let h_rank: HashMap<i64, usize> = h_ranked
        .iter()
        .enumerate()
        .map(|(rank, s)| (s.station_id, rank))
        .collect();
    let p_rank: HashMap<i64, usize> = p_ranked
        .iter()
        .enumerate()
        .map(|(rank, s)| (s.station_id, rank))
        .collect();
    let p_by_id: HashMap<i64, _> = p_ranked.iter().map(|s| (s.station_id, s)).collect();

    // Build comparison rows in heuristic order
    let mut comparisons = Vec::new();
    for entry in &h_ranked {
        let peer = p_by_id[&entry.station_id];
        comparisons.push(ScorerComparison {
            station_id: entry.station_id,
            heuristic_score: entry.score,
            personalized_score: peer.score,
            heuristic_rank: h_rank[&entry.station_id],
            personalized_rank: p_rank[&entry.station_id],
            ranks_match: h_rank[&entry.station_id] == p_rank[&entry.station_id],
        });
    }

    // Print comparison table
    println!("\n=== Heuristic vs Personalized on the Prague grid ===\n");
    println!(
        "{:<10} {:>10} {:>14} {:>8} {:>4} {:>4} {:>8}",
        "Station", "Heuristic", "Personalized", "Gap", "H#", "P#", "Match?"
    );
    println!("{:-<70}", "");

    for comp in &comparisons {
        let match_indicator = if comp.ranks_match { "✓" } else { "✗" };
        println!(
            "{:<10} {:>10.2} {:>14.2} {:>8.2} {:>4} {:>4} {:>8}",
            comp.station_id,
            comp.heuristic_score,
            comp.personalized_score,
            comp.heuristic_score - comp.personalized_score,
            comp.heuristic_rank + 1,
            comp.personalized_rank + 1,
            match_indicator
        );
    }

    let matches = comparisons.iter().filter(|c| c.ranks_match).count();
    println!("\nRank agreement: {}/{}", matches, comparisons.len());

    // With no learned values and exploration off, the two scorers see the
    // same criteria; they differ only in how hard they weigh occupancy,
    // so each station's gap is exactly the load share that moved
    for entry in &h_ranked {
        let peer = p_by_id[&entry.station_id];
        for key in [
            COMPONENT_LOAD,
            COMPONENT_DISTANCE,
            COMPONENT_GREEN,
            COMPONENT_PRICE,
        ] {
            let ours = entry.components[key];
            let theirs = peer.components[key];
            assert!(
                (ours - theirs).abs() < 1e-9,
                "station {} component {} diverged: {} vs {}",
                entry.station_id,
                key,
                ours,
                theirs
            );
        }

        let gap = entry.score - peer.score;
        let expected = 0.05 * entry.components[COMPONENT_LOAD];
        assert!(
            (gap - expected).abs() < 1e-9,
            "station {} gap {} != 0.05 * load {}",
            entry.station_id,
            gap,
            expected
        );
        assert!(entry.score >= peer.score);
    }

    // The extremes are stable across both weightings: the idle cheap
    // station next door wins, the one past the useful radius loses
    assert_eq!(h_ranked[0].station_id, 1);
    assert_eq!(p_ranked[0].station_id, 1);
    assert_eq!(h_ranked[4].station_id, 5);
    assert_eq!(p_ranked[4].station_id, 5);
}

#[tokio::test]
async fn learning_diverges_personalized_from_heuristic() {
    // Two stations identical in every criterion, so both scorers start
    // from a tie broken by id
    let twins = vec![
        Station {
            id: 1,
            lat: 50.082,
            lng: 14.43,
            density: 40,
            price: 8.0,
        },
        Station {
            id: 2,
            lat: 50.082,
            lng: 14.43,
            density: 40,
            price: 8.0,
        },
    ];
    let source: Arc<dyn StationDataSource> = Arc::new(GridStations(twins));
    let heuristic = HeuristicScorer::new(Arc::clone(&source));
    let personalized = AdaptiveScorer::new(Arc::clone(&source), exploit_config());

    let request = request_at(14);
    let h_before = heuristic.score(&request).await.unwrap();
    let p_before = personalized.score(&request).await.unwrap();
    assert_eq!(h_before[0].station_id, 1);
    assert_eq!(p_before[0].station_id, 1);

    // Five good sessions at station 2 in the same hour
    let reward = AdaptiveScorer::compute_reward(3, 1.2, false, 25);
    for _ in 0..5 {
        personalized.update_value(request.user_id, 2, 14, 0, reward);
    }

    let h_after = heuristic.score(&request).await.unwrap();
    let p_after = personalized.score(&request).await.unwrap();

    // The heuristic never moves; the personalized ranking now leads with
    // the station the user kept rewarding
    assert_eq!(h_after[0].station_id, 1);
    assert_eq!(p_after[0].station_id, 2);

    let learned = &p_after[0];
    let q = learned.components[COMPONENT_Q_VALUE];
    let bonus = learned.components[COMPONENT_RL_BONUS];
    assert!(q > 10.0, "five rewarded sessions should push q past 10: {q}");
    assert!((bonus - q * 0.05).abs() < 1e-12);

    println!("\n=== Divergence after 5 rewarded sessions at station 2 ===");
    println!(
        "Heuristic:    [{}]",
        h_after
            .iter()
            .map(|s| s.station_id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Personalized: [{}]  (q = {q:.2}, bonus = {bonus:.2})",
        p_after
            .iter()
            .map(|s| s.station_id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

#[tokio::test]
async fn green_window_lifts_both_scorers_equally() {
    let station = vec![Station {
        id: 7,
        lat: 50.082,
        lng: 14.43,
        density: 40,
        price: 8.0,
    }];
    let source: Arc<dyn StationDataSource> = Arc::new(GridStations(station));
    let heuristic = HeuristicScorer::new(Arc::clone(&source));
    let personalized = AdaptiveScorer::new(Arc::clone(&source), exploit_config());

    let h_noon = heuristic.score(&request_at(12)).await.unwrap();
    let h_night = heuristic.score(&request_at(23)).await.unwrap();
    let p_noon = personalized.score(&request_at(12)).await.unwrap();
    let p_night = personalized.score(&request_at(23)).await.unwrap();

    // Both carry the green criterion at the same weight, so the night
    // window lifts each total by the same 25 * 0.25 margin
    let h_lift = h_night[0].score - h_noon[0].score;
    let p_lift = p_night[0].score - p_noon[0].score;
    assert!((h_lift - 6.25).abs() < 1e-9, "heuristic lift: {h_lift}");
    assert!((p_lift - 6.25).abs() < 1e-9, "personalized lift: {p_lift}");
}
