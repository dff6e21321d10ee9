//! Y-axis limit overrides kept in a host key-value cache.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::model::SeriesSpec;

pub const Y_AXIS_LIMITS_CACHE_KEY: &str = "ECHARTS_LINKAGE_yAxis_limits_cache";

/// String key-value storage supplied by the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }
}

/// In-process store, for hosts without persistent storage and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

/// Persisted limits of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisLimits {
    pub y_axis_min_limit: f64,
    pub y_axis_max_limit: f64,
}

/// A limit edit as committed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisLimitUpdate {
    pub series_name: String,
    pub is_y_axis_limit_enabled: bool,
    pub y_axis_min_limit: f64,
    pub y_axis_max_limit: f64,
}

impl YAxisLimitUpdate {
    #[must_use]
    pub fn enabled(series_name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            series_name: series_name.into(),
            is_y_axis_limit_enabled: true,
            y_axis_min_limit: min,
            y_axis_max_limit: max,
        }
    }
}

pub type YAxisLimitMap = BTreeMap<String, YAxisLimits>;

/// `seriesName -> {min, max}` map serialized as JSON under one store key.
#[derive(Debug, Clone, Default)]
pub struct YAxisLimitCache<S> {
    store: S,
}

impl<S: KeyValueStore> YAxisLimitCache<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current cache contents. Unreadable JSON is logged and treated as empty.
    #[must_use]
    pub fn load(&self) -> YAxisLimitMap {
        let Some(text) = self.store.get(Y_AXIS_LIMITS_CACHE_KEY) else {
            return YAxisLimitMap::new();
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!(error = %err, "discarding unreadable y-axis limit cache");
            YAxisLimitMap::new()
        })
    }

    /// Merges the enabled updates into the cache; disabled ones are ignored.
    pub fn commit(&mut self, updates: &[YAxisLimitUpdate]) -> ChartResult<usize> {
        let enabled: Vec<&YAxisLimitUpdate> = updates
            .iter()
            .filter(|update| update.is_y_axis_limit_enabled)
            .collect();
        if enabled.is_empty() {
            return Ok(0);
        }
        let mut cache = self.load();
        for update in &enabled {
            cache.insert(
                update.series_name.clone(),
                YAxisLimits {
                    y_axis_min_limit: update.y_axis_min_limit,
                    y_axis_max_limit: update.y_axis_max_limit,
                },
            );
        }
        self.store
            .set(Y_AXIS_LIMITS_CACHE_KEY, serde_json::to_string(&cache)?);
        debug!(committed = enabled.len(), total = cache.len(), "y-axis limits committed");
        Ok(enabled.len())
    }

    /// Overrides `y_axis_min`/`y_axis_max` of every series with cached limits.
    pub fn apply_to(&self, series: &mut [SeriesSpec]) {
        let cache = self.load();
        if cache.is_empty() {
            return;
        }
        for spec in series {
            if let Some(limits) = cache.get(&spec.name) {
                spec.y_axis_min = Some(limits.y_axis_min_limit);
                spec.y_axis_max = Some(limits.y_axis_max_limit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        KeyValueStore, MemoryStore, Y_AXIS_LIMITS_CACHE_KEY, YAxisLimitCache, YAxisLimitUpdate,
    };
    use crate::model::SeriesSpec;

    #[test]
    fn commit_keeps_only_enabled_limits() {
        let mut cache = YAxisLimitCache::new(MemoryStore::new());
        let mut disabled = YAxisLimitUpdate::enabled("speed", 0.0, 10.0);
        disabled.is_y_axis_limit_enabled = false;
        let committed = cache
            .commit(&[YAxisLimitUpdate::enabled("temp", -5.0, 45.0), disabled])
            .unwrap();
        assert_eq!(committed, 1);

        let stored = cache.store().get(Y_AXIS_LIMITS_CACHE_KEY).unwrap();
        assert_eq!(stored, r#"{"temp":{"yAxisMinLimit":-5.0,"yAxisMaxLimit":45.0}}"#);
    }

    #[test]
    fn later_commits_update_existing_entries() {
        let mut cache = YAxisLimitCache::new(MemoryStore::new());
        cache.commit(&[YAxisLimitUpdate::enabled("temp", 0.0, 1.0)]).unwrap();
        cache.commit(&[YAxisLimitUpdate::enabled("temp", 2.0, 3.0)]).unwrap();
        let mut series = vec![SeriesSpec::from_values("temp", &[1.0]), SeriesSpec::from_values("other", &[1.0])];
        cache.apply_to(&mut series);
        assert_eq!(series[0].y_axis_min, Some(2.0));
        assert_eq!(series[0].y_axis_max, Some(3.0));
        assert_eq!(series[1].y_axis_min, None);
    }

    #[test]
    fn boxed_store_is_usable_as_a_cache_backend() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let mut cache = YAxisLimitCache::new(store);
        cache.commit(&[YAxisLimitUpdate::enabled("temp", 1.0, 2.0)]).unwrap();
        assert_eq!(cache.load().len(), 1);
        assert!(cache.store().get(Y_AXIS_LIMITS_CACHE_KEY).is_some());
    }

    #[test]
    fn unreadable_cache_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(Y_AXIS_LIMITS_CACHE_KEY, "not json".to_owned());
        assert!(YAxisLimitCache::new(store).load().is_empty());
    }
}
