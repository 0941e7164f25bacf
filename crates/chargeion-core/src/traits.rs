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
use chargeion_types::{LoadForecast, Station};

/// Generic data source for station records and load forecasts
/// Business logic uses this trait, never knows about the storage behind it
#[async_trait]
pub trait StationDataSource: Send + Sync {
    /// List every known charging station
    async fn list_stations(&self) -> Result<Vec<Station>>;

    /// Load forecasts for one weekly slot, Sunday = day 0
    async fn forecasts_for_slot(&self, day_of_week: u32, hour: u32) -> Result<Vec<LoadForecast>>;

    /// Get data source name for logging
    fn name(&self) -> &str;
}
