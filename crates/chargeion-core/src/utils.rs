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

//! Geometry and normalization helpers shared by the scorers

/// Mean Earth radius used for distance calculation (km)
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two WGS84 coordinates
///
/// Uses the haversine formula, which is accurate enough for ranking
/// charging stations at city scale.
///
/// # Arguments
/// * `lat1`, `lng1` - First point in decimal degrees
/// * `lat2`, `lng2` - Second point in decimal degrees
///
/// # Returns
/// Distance in kilometers
///
/// # Examples
/// ```
/// use chargeion_core::distance_km;
/// let km = distance_km(50.0755, 14.4378, 50.0875, 14.4213);
/// assert!(km > 1.0 && km < 3.0);
/// ```
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Map a raw value onto the 0-100 scale spanned by `min` and `max`
///
/// Values outside the range clamp to 0 or 100. A degenerate range
/// (`min == max`) yields the neutral score 50 instead of dividing by
/// zero.
///
/// # Arguments
/// * `value` - Raw criterion value
/// * `min`, `max` - Range the value is expected to fall into
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 50.0;
    }

    let scaled = (value - min) / (max - min) * 100.0;
    scaled.clamp(0.0, 100.0)
}
