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

pub mod config;
pub mod recommend;
pub mod station;

// Re-export common types for convenience
pub use config::{AdaptiveScorerConfig, RecommenderConfig};
pub use recommend::{ScoreRequest, ScoredStation};
pub use station::{LoadForecast, Station};
