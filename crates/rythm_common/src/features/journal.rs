//! Daily mind journal and the weekly report built from it.

use crate::clock::Clock;
use crate::persistence::{load_or_default, save_best_effort, KeyValueStore};
use crate::progress::{Activity, ProgressStore};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const JOURNAL_KEY: &str = "rythmAI_journal";

const SCALE_MIN: u8 = 1;
const SCALE_MAX: u8 = 5;
const REPORT_DAYS: i64 = 7;

/// One day's entry. Mood and stress are on a 1-5 scale, sleep and screen time
/// in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub mood: u8,
    pub stress: u8,
    pub sleep: f64,
    pub screen_time: f64,
    #[serde(default)]
    pub notes: String,
}

impl JournalEntry {
    pub fn new(date: NaiveDate, mood: u8, stress: u8, sleep: f64, screen_time: f64) -> Self {
        Self {
            date,
            mood: mood.clamp(SCALE_MIN, SCALE_MAX),
            stress: stress.clamp(SCALE_MIN, SCALE_MAX),
            sleep: non_negative(sleep),
            screen_time: non_negative(screen_time),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn mood_emoji(&self) -> &'static str {
        match self.mood {
            0..=1 => "😞",
            2 => "😕",
            3 => "😐",
            4 => "🙂",
            _ => "😄",
        }
    }
}

fn non_negative(hours: f64) -> f64 {
    if hours.is_finite() {
        hours.max(0.0)
    } else {
        0.0
    }
}

/// Averages over the last seven days of entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub day_count: usize,
    pub avg_mood: f64,
    pub avg_stress: f64,
    pub avg_sleep: f64,
    pub avg_screen_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        load_or_default(storage, JOURNAL_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, storage: &S) -> bool {
        save_best_effort(storage, JOURNAL_KEY, self)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Replace the entry for the same day, or append
    pub fn upsert(&mut self, entry: JournalEntry) {
        match self.entries.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Report over entries dated within the seven days ending `today`.
    pub fn weekly_report(&self, today: NaiveDate) -> Option<WeeklyReport> {
        let cutoff = today - Duration::days(REPORT_DAYS);
        let week: Vec<&JournalEntry> = self
            .entries
            .iter()
            .filter(|e| e.date > cutoff && e.date <= today)
            .collect();

        if week.is_empty() {
            return None;
        }

        let n = week.len() as f64;
        let avg = |f: fn(&JournalEntry) -> f64| week.iter().map(|&e| f(e)).sum::<f64>() / n;
        Some(WeeklyReport {
            day_count: week.len(),
            avg_mood: avg(|e| f64::from(e.mood)),
            avg_stress: avg(|e| f64::from(e.stress)),
            avg_sleep: avg(|e| e.sleep),
            avg_screen_time: avg(|e| e.screen_time),
        })
    }
}

/// Save the entry (one per day) and award the journal XP. Saving the same
/// day again overwrites the entry and awards the XP again.
pub fn save_entry<S: KeyValueStore, C: Clock>(
    store: &mut ProgressStore<S, C>,
    entry: JournalEntry,
) -> i64 {
    let mut journal = Journal::load(store.storage());
    journal.upsert(entry);
    journal.save(store.storage());
    store.reward(Activity::JournalEntry)
}
