//! Settings, usage counters and summary history.
//!
//! State lives behind an injected [`KeyValueStore`] with async get/set
//! semantics; [`StorageManager`] layers typed records over it. Nothing here is
//! process-global.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::summary::{SummaryLength, SummaryResult, Tone};

pub const SETTINGS_KEY: &str = "flash_tldr_settings";
pub const USAGE_KEY: &str = "flash_tldr_usage";
pub const HISTORY_KEY: &str = "flash_tldr_history";

/// Entries kept in the history, newest first.
pub const MAX_HISTORY: usize = 100;

/// Async key-value persistence supplied by the host.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing what was there.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_key: String,
    pub tone: Tone,
    pub length: SummaryLength,
    pub auto_detect_language: bool,
    pub show_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            tone: Tone::Neutral,
            length: SummaryLength::Medium,
            auto_detect_language: true,
            show_overlay: true,
        }
    }
}

/// A partial settings change; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub tone: Option<Tone>,
    pub length: Option<SummaryLength>,
    pub auto_detect_language: Option<bool>,
    pub show_overlay: Option<bool>,
}

impl Settings {
    /// Apply the fields present in `update`.
    #[must_use]
    pub fn merge(mut self, update: SettingsUpdate) -> Self {
        if let Some(api_key) = update.api_key {
            self.api_key = api_key;
        }
        if let Some(tone) = update.tone {
            self.tone = tone;
        }
        if let Some(length) = update.length {
            self.length = length;
        }
        if let Some(auto) = update.auto_detect_language {
            self.auto_detect_language = auto;
        }
        if let Some(show) = update.show_overlay {
            self.show_overlay = show;
        }
        self
    }
}

/// Summaries requested, per day and overall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub daily_count: u32,
    /// Calendar day `daily_count` belongs to.
    pub last_reset_date: NaiveDate,
    pub total_count: u64,
    pub is_pro: bool,
}

impl Usage {
    fn fresh(today: NaiveDate) -> Self {
        Self {
            daily_count: 0,
            last_reset_date: today,
            total_count: 0,
            is_pro: false,
        }
    }
}

/// One saved summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: SummaryResult,
    pub timestamp: DateTime<Utc>,
    pub word_count: usize,
    pub reading_time: usize,
}

/// A summary about to be saved; the manager assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDraft {
    pub url: String,
    pub title: String,
    pub summary: SummaryResult,
    pub word_count: usize,
    pub reading_time: usize,
}

/// Typed access to settings, usage and history.
#[derive(Debug)]
pub struct StorageManager<S> {
    store: S,
}

impl<S: KeyValueStore> StorageManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_value(value)?).await
    }

    /// Stored settings, or the defaults.
    pub async fn settings(&self) -> Result<Settings> {
        Ok(self.load(SETTINGS_KEY).await?.unwrap_or_default())
    }

    /// Merge `update` into the stored settings and return the result.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        let settings = self.settings().await?.merge(update);
        self.save(SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }

    /// Usage as of today's local date.
    pub async fn usage(&self) -> Result<Usage> {
        self.usage_on(Local::now().date_naive()).await
    }

    /// Usage as of `today`, resetting the daily counter on a new day.
    pub async fn usage_on(&self, today: NaiveDate) -> Result<Usage> {
        let Some(mut usage) = self.load::<Usage>(USAGE_KEY).await? else {
            return Ok(Usage::fresh(today));
        };
        if usage.last_reset_date != today {
            debug!(from = %usage.last_reset_date, to = %today, "daily usage reset");
            usage.daily_count = 0;
            usage.last_reset_date = today;
            self.save(USAGE_KEY, &usage).await?;
        }
        Ok(usage)
    }

    /// Count one more summary today.
    pub async fn increment_usage(&self) -> Result<Usage> {
        self.increment_usage_on(Local::now().date_naive()).await
    }

    pub async fn increment_usage_on(&self, today: NaiveDate) -> Result<Usage> {
        let mut usage = self.usage_on(today).await?;
        usage.daily_count += 1;
        usage.total_count += 1;
        self.save(USAGE_KEY, &usage).await?;
        Ok(usage)
    }

    /// Saved summaries, newest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.load(HISTORY_KEY).await?.unwrap_or_default())
    }

    /// Save a summary at the front of the history, keeping at most
    /// [`MAX_HISTORY`] entries. Returns the new entry.
    pub async fn save_summary(&self, draft: HistoryDraft) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: format!("summary_{}", Uuid::new_v4().simple()),
            url: draft.url,
            title: draft.title,
            summary: draft.summary,
            timestamp: Utc::now(),
            word_count: draft.word_count,
            reading_time: draft.reading_time,
        };

        let mut history = self.history().await?;
        history.insert(0, entry.clone());
        history.truncate(MAX_HISTORY);
        self.save(HISTORY_KEY, &history).await?;
        Ok(entry)
    }

    /// Remove the entry with `id`. Returns whether one was removed.
    pub async fn delete_summary(&self, id: &str) -> Result<bool> {
        let mut history = self.history().await?;
        let before = history.len();
        history.retain(|entry| entry.id != id);
        let removed = history.len() != before;
        if removed {
            self.save(HISTORY_KEY, &history).await?;
        }
        Ok(removed)
    }

    /// Drop the whole history.
    pub async fn clear_history(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY).await
    }
}
