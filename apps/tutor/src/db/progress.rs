//! Progress marker and slide progress.

use crate::db::gateway::{StorageGateway, CURRENT_DAY_KEY, SLIDE_PROGRESS_KEY};
use quest_core::{slide_key, SlideProgress};
use serde_json::Value;

pub struct ProgressStore<'a> {
    storage: &'a StorageGateway,
}

impl<'a> ProgressStore<'a> {
    pub fn new(storage: &'a StorageGateway) -> Self {
        Self { storage }
    }

    /// Highest lesson day answered correctly. Absent, non-numeric or
    /// negative markers read as 0.
    pub fn current_day(&self) -> u32 {
        let parsed = match self.storage.get(CURRENT_DAY_KEY, Value::Null) {
            Value::Null => return 0,
            Value::String(s) => parse_leading_int(&s),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };

        match parsed {
            Some(day) if day >= 0 => u32::try_from(day).unwrap_or(u32::MAX),
            _ => {
                tracing::warn!("invalid progress marker, treating as 0");
                0
            }
        }
    }

    /// Mark `day` as completed. The marker never moves backwards.
    pub fn complete_day(&self, day: u32) -> bool {
        let next = self.current_day().max(day);
        self.storage.set(CURRENT_DAY_KEY, &next.to_string())
    }

    /// Index of the furthest unlocked lesson out of `total_days`.
    pub fn unlocked_day(&self, total_days: u32) -> u32 {
        if total_days == 0 {
            return 0;
        }
        self.current_day().min(total_days - 1)
    }

    pub fn clear_current_day(&self) -> bool {
        self.storage.remove(CURRENT_DAY_KEY)
    }

    pub fn slide_progress(&self) -> SlideProgress {
        self.storage.get_or(SLIDE_PROGRESS_KEY, SlideProgress::new())
    }

    pub fn slides_seen(&self, day: u32) -> bool {
        self.slide_progress()
            .get(&slide_key(day))
            .copied()
            .unwrap_or(false)
    }

    pub fn mark_slides_seen(&self, day: u32) -> bool {
        let mut progress = self.slide_progress();
        progress.insert(slide_key(day), true);
        self.storage.set(SLIDE_PROGRESS_KEY, &progress)
    }

    pub fn clear_slides(&self) -> bool {
        self.storage.remove(SLIDE_PROGRESS_KEY)
    }
}

/// Leading integer of `s`, ignoring surrounding text: `" 12abc"` is 12.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int(" 12abc"), Some(12));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn marker_defaults_to_zero() {
        let gateway = StorageGateway::new(MemoryStore::new());
        assert_eq!(ProgressStore::new(&gateway).current_day(), 0);
    }

    #[test]
    fn invalid_marker_reads_as_zero() {
        for raw in ["banana", "-4", "{\"day\":3}", "[3"] {
            let store = MemoryStore::new();
            store.seed(CURRENT_DAY_KEY, raw);
            let gateway = StorageGateway::new(store);
            assert_eq!(ProgressStore::new(&gateway).current_day(), 0, "raw = {}", raw);
        }
    }

    #[test]
    fn marker_is_monotonic() {
        let store = MemoryStore::new();
        let gateway = StorageGateway::new(store.clone());
        let progress = ProgressStore::new(&gateway);

        assert!(progress.complete_day(3));
        assert!(progress.complete_day(1));
        assert_eq!(progress.current_day(), 3);
        assert_eq!(store.raw(CURRENT_DAY_KEY).as_deref(), Some("3"));
    }

    #[test]
    fn unlocked_day_is_clamped() {
        let gateway = StorageGateway::new(MemoryStore::new());
        let progress = ProgressStore::new(&gateway);
        progress.complete_day(12);
        assert_eq!(progress.unlocked_day(10), 9);
        assert_eq!(progress.unlocked_day(20), 12);
        assert_eq!(progress.unlocked_day(0), 0);
    }

    #[test]
    fn slide_progress_round_trip() {
        let store = MemoryStore::new();
        let gateway = StorageGateway::new(store.clone());
        let progress = ProgressStore::new(&gateway);

        assert!(!progress.slides_seen(2));
        assert!(progress.mark_slides_seen(2));
        assert!(progress.mark_slides_seen(5));
        assert!(progress.slides_seen(2));
        assert!(!progress.slides_seen(3));
        assert_eq!(
            store.raw(SLIDE_PROGRESS_KEY).as_deref(),
            Some(r#"{"day2":true,"day5":true}"#)
        );
    }

    #[test]
    fn corrupted_slide_progress_reads_empty() {
        let store = MemoryStore::new();
        store.seed(SLIDE_PROGRESS_KEY, "not an object");
        let gateway = StorageGateway::new(store);
        let progress = ProgressStore::new(&gateway);

        assert!(progress.slide_progress().is_empty());
        assert!(progress.mark_slides_seen(1));
        assert!(progress.slides_seen(1));
    }
}
