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

use chargeion_i18n::Language;
use serde::{Deserialize, Serialize};

// ============= Recommendation Configuration =============

/// Top-level configuration for the recommendation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Result-count cap applied when a request carries no usable limit
    #[serde(default = "default_limit")]
    pub default_limit: i32,
    /// Language used for explanation strings
    #[serde(default)]
    pub language: Language,
    /// Hyperparameters of the personalized scorer
    #[serde(default)]
    pub adaptive: AdaptiveScorerConfig,
}

/// Hyperparameters of the online-learning scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveScorerConfig {
    /// Learning rate for value updates (0-1)
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Discount factor; kept for the one-step update formula even though
    /// the next-state value is always zero there
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Exploration probability at startup
    #[serde(default = "default_initial_epsilon")]
    pub initial_epsilon: f64,

    /// Multiplicative decay applied to epsilon after every scoring call
    #[serde(default = "default_epsilon_decay")]
    pub epsilon_decay: f64,

    /// Floor below which epsilon never drops
    #[serde(default = "default_min_epsilon")]
    pub min_epsilon: f64,

    /// Cap on learned entries kept per user; 0 disables eviction
    #[serde(default = "default_max_entries_per_user")]
    pub max_entries_per_user: usize,
}

// Default value functions for serde
fn default_limit() -> i32 {
    10
}
fn default_alpha() -> f64 {
    0.1
}
fn default_gamma() -> f64 {
    0.9
}

fn default_initial_epsilon() -> f64 {
    0.3
}
fn default_epsilon_decay() -> f64 {
    0.995
}
fn default_min_epsilon() -> f64 {
    0.05
}

fn default_max_entries_per_user() -> usize {
    512
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            language: Language::default(),
            adaptive: AdaptiveScorerConfig::default(),
        }
    }
}

impl Default for AdaptiveScorerConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            gamma: default_gamma(),
            initial_epsilon: default_initial_epsilon(),
            epsilon_decay: default_epsilon_decay(),
            min_epsilon: default_min_epsilon(),
            max_entries_per_user: default_max_entries_per_user(),
        }
    }
}
