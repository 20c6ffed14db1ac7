use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::models::mood::{DateRange, MoodEntry};

/// Days shown on the dashboard, today included.
pub const TREND_DAYS: i64 = 7;

const FACES: [(&str, &str); 5] = [
    ("😢", "Very Sad"),
    ("😕", "Sad"),
    ("😐", "Okay"),
    ("🙂", "Good"),
    ("😄", "Great"),
];

/// Emoji and label for a mood on the 1-5 scale.
pub fn mood_face(mood: i32) -> Option<(&'static str, &'static str)> {
    mood.checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| FACES.get(i))
        .copied()
}

/// The dashboard window ending at `today`.
pub fn trend_window(today: NaiveDate) -> DateRange {
    DateRange {
        start: Some(today - Duration::days(TREND_DAYS - 1)),
        end: Some(today),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Mean mood rounded to one decimal, `None` without entries.
    pub average_mood: Option<f64>,
    pub total_entries: usize,
    /// Consecutive days with at least one entry, ending today or, when
    /// nothing is logged yet today, yesterday.
    pub current_streak: u32,
}

impl DashboardStats {
    pub fn from_entries(entries: &[MoodEntry], today: NaiveDate) -> Self {
        let average_mood = if entries.is_empty() {
            None
        } else {
            let total: i64 = entries.iter().map(|e| i64::from(e.mood)).sum();
            let mean = total as f64 / entries.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };

        Self {
            average_mood,
            total_entries: entries.len(),
            current_streak: current_streak(entries, today),
        }
    }

    pub fn average_face(&self) -> &'static str {
        self.average_mood
            .and_then(|avg| mood_face(avg.round() as i32))
            .map_or("😐", |(emoji, _)| emoji)
    }
}

pub fn current_streak(entries: &[MoodEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short label such as `Jan 5`.
    pub label: String,
    pub mood: i32,
}

/// One point per entry, oldest first.
pub fn trend_points(entries: &[MoodEntry]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = entries
        .iter()
        .map(|e| TrendPoint {
            date: e.date,
            label: e.date.format("%b %-d").to_string(),
            mood: e.mood,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entries(spec: &[(&str, i32)]) -> Vec<MoodEntry> {
        let owner = Uuid::new_v4();
        spec.iter()
            .map(|(d, m)| MoodEntry::new(owner, *m, String::new(), date(d)))
            .collect()
    }

    #[test]
    fn test_stats_empty() {
        let stats = DashboardStats::from_entries(&[], date("2024-01-07"));
        assert_eq!(stats.average_mood, None);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.average_face(), "😐");
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let list = entries(&[("2024-01-07", 4), ("2024-01-06", 4), ("2024-01-05", 3)]);
        let stats = DashboardStats::from_entries(&list, date("2024-01-07"));
        assert_eq!(stats.average_mood, Some(3.7));
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.average_face(), "🙂");
    }

    #[test]
    fn test_streak_counts_consecutive_days_not_entries() {
        let list = entries(&[
            ("2024-01-07", 4),
            ("2024-01-07", 2),
            ("2024-01-06", 3),
            ("2024-01-04", 5),
        ]);
        let stats = DashboardStats::from_entries(&list, date("2024-01-07"));
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn test_streak_survives_until_today_is_logged() {
        let list = entries(&[("2024-01-06", 3), ("2024-01-05", 3)]);
        assert_eq!(current_streak(&list, date("2024-01-07")), 2);
        assert_eq!(current_streak(&list, date("2024-01-08")), 0);
    }

    #[test]
    fn test_trend_points_oldest_first() {
        let list = entries(&[("2024-01-07", 5), ("2024-01-05", 1)]);
        let points = trend_points(&list);
        assert_eq!(points[0].label, "Jan 5");
        assert_eq!(points[0].mood, 1);
        assert_eq!(points[1].label, "Jan 7");
    }

    #[test]
    fn test_trend_window_spans_seven_days() {
        let window = trend_window(date("2024-01-07"));
        assert_eq!(window.start, Some(date("2024-01-01")));
        assert_eq!(window.end, Some(date("2024-01-07")));
    }

    #[test]
    fn test_mood_faces() {
        assert_eq!(mood_face(1), Some(("😢", "Very Sad")));
        assert_eq!(mood_face(5), Some(("😄", "Great")));
        assert_eq!(mood_face(0), None);
        assert_eq!(mood_face(6), None);
        assert_eq!(mood_face(i32::MIN), None);
        assert_eq!(mood_face(i32::MAX), None);
    }
}
