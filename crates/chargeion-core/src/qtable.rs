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

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Composite key addressing one learned value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QKey {
    pub user_id: i64,
    pub station_id: i64,
    /// Hour of day (0-23)
    pub hour: u32,
}

/// One learned (user, station, hour) experience cell
#[derive(Debug, Clone, PartialEq)]
pub struct QEntry {
    /// Learned value, grows with positive session outcomes
    pub q_value: f64,
    /// Number of updates folded into this entry
    pub visit_count: u32,
    /// Day of week of the latest update, Sunday = 0
    pub day_of_week: u32,
    /// When this entry was last written
    pub last_updated: DateTime<Utc>,
}

impl QEntry {
    fn new() -> Self {
        Self {
            q_value: 0.0,
            visit_count: 0,
            day_of_week: 0,
            last_updated: Utc::now(),
        }
    }
}

/// Shared in-memory store for learned station preferences
///
/// One lock guards the whole map and every operation holds it only
/// briefly, so the store can sit behind an `Arc` and serve concurrent
/// scoring and reward paths. Entry counts are capped per user; when a
/// user exceeds the cap their least recently updated entry gives way.
pub struct QTable {
    entries: RwLock<HashMap<QKey, QEntry>>,
    max_entries_per_user: usize,
}

impl QTable {
    /// Create an empty table
    ///
    /// A `max_entries_per_user` of 0 disables eviction entirely.
    pub fn new(max_entries_per_user: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries_per_user,
        }
    }

    /// Learned value behind a key, 0.0 when nothing is known yet
    pub fn value(&self, key: &QKey) -> f64 {
        self.entries.read().get(key).map_or(0.0, |entry| entry.q_value)
    }

    /// Copy of the full entry behind a key
    pub fn entry(&self, key: &QKey) -> Option<QEntry> {
        self.entries.read().get(key).cloned()
    }

    /// Create or modify the entry behind `key`
    ///
    /// The closure runs under the write lock and `last_updated` is
    /// stamped afterwards, so every write refreshes recency. When the
    /// write pushes the user over the per-user cap, their least recently
    /// updated other entry is evicted.
    pub fn upsert(&self, key: QKey, apply: impl FnOnce(&mut QEntry)) {
        let mut entries = self.entries.write();

        let entry = entries.entry(key).or_insert_with(QEntry::new);
        apply(entry);
        entry.last_updated = Utc::now();

        if self.max_entries_per_user > 0 {
            let user_entries = entries.keys().filter(|k| k.user_id == key.user_id).count();
            if user_entries > self.max_entries_per_user {
                let victim = entries
                    .iter()
                    .filter(|&(k, _)| k.user_id == key.user_id && *k != key)
                    .min_by_key(|&(_, entry)| entry.last_updated)
                    .map(|(k, _)| *k);

                if let Some(victim) = victim {
                    entries.remove(&victim);
                    debug!(
                        "Evicted learned entry for user {} (station {}, hour {})",
                        victim.user_id, victim.station_id, victim.hour
                    );
                }
            }
        }
    }

    /// Number of learned entries across all users
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been learned yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
