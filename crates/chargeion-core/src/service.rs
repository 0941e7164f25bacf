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

//! Recommendation facade owning the active scorer

use crate::scorer::{DEFAULT_LIMIT, Scorer};
use anyhow::Result;
use chargeion_types::{ScoreRequest, ScoredStation};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Entry point for recommendation requests
///
/// Holds the active scorer behind a lock so callers can swap the
/// strategy at runtime, for example from the heuristic scorer to the
/// personalized one once enough feedback has accumulated. In-flight
/// calls finish on the scorer they started with.
pub struct RecommendationService {
    scorer: RwLock<Arc<dyn Scorer>>,
    default_limit: i32,
}

impl RecommendationService {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self::with_default_limit(scorer, DEFAULT_LIMIT)
    }

    pub fn with_default_limit(scorer: Arc<dyn Scorer>, default_limit: i32) -> Self {
        Self {
            scorer: RwLock::new(scorer),
            default_limit,
        }
    }

    /// Rank stations for one user and time slot
    ///
    /// A non-positive limit on the request is replaced by the service
    /// default before scoring.
    pub async fn recommend(&self, mut request: ScoreRequest) -> Result<Vec<ScoredStation>> {
        if request.limit <= 0 {
            request.limit = self.default_limit;
        }

        // Clone the handle out so the lock is not held across the await
        let scorer = Arc::clone(&*self.scorer.read());
        scorer.score(&request).await
    }

    /// Swap the active scorer
    pub fn set_scorer(&self, scorer: Arc<dyn Scorer>) {
        let name = scorer.name().to_string();
        *self.scorer.write() = scorer;
        info!("Active scorer switched to '{}'", name);
    }

    /// Name of the currently active scorer
    pub fn scorer_name(&self) -> String {
        self.scorer.read().name().to_string()
    }
}
