use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const MOOD_MIN: i32 = 1;
pub const MOOD_MAX: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub mood: i32,
    pub journal_entry: String,
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(owner: Uuid, mood: i32, journal_entry: String, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner,
            mood,
            journal_entry,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    /// Applies a partial update in place. Absent fields are left untouched.
    pub fn apply(&mut self, changes: &MoodChanges) {
        if let Some(mood) = changes.mood {
            self.mood = mood;
        }
        if let Some(journal_entry) = &changes.journal_entry {
            self.journal_entry = journal_entry.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Fields of an entry that may change after creation.
#[derive(Debug, Clone, Default)]
pub struct MoodChanges {
    pub mood: Option<i32>,
    pub journal_entry: Option<String>,
}

pub fn validate_mood(mood: i32) -> AppResult<i32> {
    if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
        return Err(AppError::Validation(format!(
            "Mood must be between {} and {}",
            MOOD_MIN, MOOD_MAX
        )));
    }
    Ok(mood)
}

/// Inclusive date window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(AppError::Validation(
                    "startDate must not be after endDate".into(),
                ));
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Newest date first; entries sharing a date keep newest-created first.
pub fn sort_newest_first(entries: &mut [MoodEntry]) {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Lenient calendar-date input: `YYYY-MM-DD` or an RFC 3339 timestamp
/// (reduced to its UTC date).
pub mod calendar_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    }

    /// For `Option<NaiveDate>` fields; blank strings count as absent.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse(s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date `{}`", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_mood_bounds() {
        assert!(validate_mood(1).is_ok());
        assert!(validate_mood(5).is_ok());
        assert!(matches!(validate_mood(0), Err(AppError::Validation(_))));
        assert!(matches!(validate_mood(6), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(Some(date("2024-01-01")), Some(date("2024-01-03"))).unwrap();
        assert!(range.contains(date("2024-01-01")));
        assert!(range.contains(date("2024-01-03")));
        assert!(!range.contains(date("2023-12-31")));
        assert!(!range.contains(date("2024-01-04")));
    }

    #[test]
    fn test_date_range_open_bounds() {
        let from = DateRange::new(Some(date("2024-01-02")), None).unwrap();
        assert!(from.contains(date("2030-01-01")));
        assert!(!from.contains(date("2024-01-01")));
        assert!(DateRange::default().contains(date("1999-01-01")));
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let result = DateRange::new(Some(date("2024-02-01")), Some(date("2024-01-01")));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_calendar_date_accepts_timestamps() {
        assert_eq!(calendar_date::parse("2024-01-01"), Some(date("2024-01-01")));
        assert_eq!(
            calendar_date::parse("2024-01-01T23:30:00-02:00"),
            Some(date("2024-01-02"))
        );
        assert_eq!(calendar_date::parse("yesterday"), None);
    }

    #[test]
    fn test_apply_leaves_absent_fields() {
        let mut entry = MoodEntry::new(Uuid::new_v4(), 3, "note".into(), date("2024-01-01"));
        entry.apply(&MoodChanges {
            mood: Some(5),
            journal_entry: None,
        });
        assert_eq!(entry.mood, 5);
        assert_eq!(entry.journal_entry, "note");

        entry.apply(&MoodChanges {
            mood: None,
            journal_entry: Some(String::new()),
        });
        assert_eq!(entry.mood, 5);
        assert_eq!(entry.journal_entry, "");
    }

    #[test]
    fn test_sort_newest_first() {
        let owner = Uuid::new_v4();
        let mut entries = vec![
            MoodEntry::new(owner, 1, String::new(), date("2024-01-01")),
            MoodEntry::new(owner, 2, String::new(), date("2024-01-03")),
            MoodEntry::new(owner, 3, String::new(), date("2024-01-02")),
        ];
        sort_newest_first(&mut entries);
        let moods: Vec<i32> = entries.iter().map(|e| e.mood).collect();
        assert_eq!(moods, vec![2, 3, 1]);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let entry = MoodEntry::new(Uuid::new_v4(), 4, "ok".into(), date("2024-01-01"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["journalEntry"], "ok");
        assert_eq!(json["date"], "2024-01-01");
        assert!(json.get("owner").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
