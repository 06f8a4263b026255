use chrono::NaiveDate;
use fit_content::storage::{
    HistoryDraft, KeyValueStore, MemoryStore, SettingsUpdate, StorageManager, HISTORY_KEY, MAX_HISTORY,
    SETTINGS_KEY, USAGE_KEY,
};
use fit_content::summary::{SummaryLength, SummaryResult, Tone};
use fit_content::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn draft(title: &str) -> HistoryDraft {
    HistoryDraft {
        url: format!("https://example.com/{title}"),
        title: title.to_string(),
        summary: SummaryResult::from_model_json(&json!({ "tldr": format!("About {title}") })),
        word_count: 400,
        reading_time: 2,
    }
}

#[tokio::test]
async fn settings_default_when_absent() {
    let storage = StorageManager::new(MemoryStore::new());
    let settings = storage.settings().await.unwrap();
    assert_eq!(settings.api_key, "");
    assert_eq!(settings.tone, Tone::Neutral);
    assert_eq!(settings.length, SummaryLength::Medium);
    assert!(settings.auto_detect_language);
    assert!(settings.show_overlay);
}

#[tokio::test]
async fn settings_update_merges_and_persists() {
    let storage = StorageManager::new(MemoryStore::new());
    storage
        .update_settings(SettingsUpdate {
            api_key: Some("sk-test".into()),
            ..SettingsUpdate::default()
        })
        .await
        .unwrap();
    let settings = storage
        .update_settings(SettingsUpdate {
            length: Some(SummaryLength::Detailed),
            show_overlay: Some(false),
            ..SettingsUpdate::default()
        })
        .await
        .unwrap();

    assert_eq!(settings.api_key, "sk-test");
    assert_eq!(settings.length, SummaryLength::Detailed);
    assert!(!settings.show_overlay);
    assert_eq!(storage.settings().await.unwrap(), settings);
}

#[tokio::test]
async fn settings_are_stored_as_camel_case_json() {
    let store = MemoryStore::new();
    store
        .set(SETTINGS_KEY, json!({ "apiKey": "k", "tone": "friendly", "showOverlay": false }))
        .await
        .unwrap();
    let storage = StorageManager::new(store);

    let settings = storage.settings().await.unwrap();
    assert_eq!(settings.tone, Tone::Friendly);
    assert!(!settings.show_overlay);
    assert!(settings.auto_detect_language);
}

#[tokio::test]
async fn usage_counts_and_resets_daily() {
    let storage = StorageManager::new(MemoryStore::new());

    let fresh = storage.usage_on(day(1)).await.unwrap();
    assert_eq!((fresh.daily_count, fresh.total_count), (0, 0));
    assert!(!fresh.is_pro);

    storage.increment_usage_on(day(1)).await.unwrap();
    let usage = storage.increment_usage_on(day(1)).await.unwrap();
    assert_eq!((usage.daily_count, usage.total_count), (2, 2));

    let next_day = storage.usage_on(day(2)).await.unwrap();
    assert_eq!((next_day.daily_count, next_day.total_count), (0, 2));
    assert_eq!(next_day.last_reset_date, day(2));

    let usage = storage.increment_usage_on(day(2)).await.unwrap();
    assert_eq!((usage.daily_count, usage.total_count), (1, 3));
}

#[tokio::test]
async fn history_is_newest_first_and_capped() {
    let storage = StorageManager::new(MemoryStore::new());
    for i in 0..MAX_HISTORY + 5 {
        storage.save_summary(draft(&format!("post-{i}"))).await.unwrap();
    }

    let history = storage.history().await.unwrap();
    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history[0].title, format!("post-{}", MAX_HISTORY + 4));
    assert_eq!(history[MAX_HISTORY - 1].title, "post-5");
    assert_eq!(history[0].summary.tldr, format!("About post-{}", MAX_HISTORY + 4));
}

#[tokio::test]
async fn history_entries_get_unique_ids() {
    let storage = StorageManager::new(MemoryStore::new());
    let a = storage.save_summary(draft("a")).await.unwrap();
    let b = storage.save_summary(draft("b")).await.unwrap();
    assert_ne!(a.id, b.id);
    assert!(a.timestamp <= b.timestamp);
}

#[tokio::test]
async fn delete_and_clear_history() {
    let storage = StorageManager::new(MemoryStore::new());
    let keep = storage.save_summary(draft("keep")).await.unwrap();
    let gone = storage.save_summary(draft("gone")).await.unwrap();

    assert!(storage.delete_summary(&gone.id).await.unwrap());
    assert!(!storage.delete_summary("missing").await.unwrap());
    let history = storage.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, keep.id);

    storage.clear_history().await.unwrap();
    assert!(storage.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_values_are_reported() {
    let store = MemoryStore::new();
    store.set(USAGE_KEY, json!("not an object")).await.unwrap();
    store.set(HISTORY_KEY, json!({ "oops": true })).await.unwrap();
    let storage = StorageManager::new(store);

    assert!(matches!(storage.usage_on(day(1)).await, Err(Error::Serialization(_))));
    assert!(matches!(storage.history().await, Err(Error::Serialization(_))));
}
