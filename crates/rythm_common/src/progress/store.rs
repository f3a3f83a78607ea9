//! Progress Store
//!
//! Owns the single `UserProgress` aggregate for a profile. Every mutation is
//! applied to the in-memory value first and then written through to the
//! key-value backend. Storage problems never reach the caller: a failed load
//! starts from defaults, a failed save keeps the in-memory result for the
//! rest of the session.

use super::badges::{Badge, REDEMPTION_MILESTONES};
use super::levels::level_for_xp;
use super::rewards::{Activity, MOOD_CHECK_IN_XP, REDEMPTION_XP, TASK_COMPLETION_XP};
use super::streak::{self, StreakStep};
use crate::clock::{Clock, SystemClock, DAY_MS};
use crate::persistence::{load_or_default, save_best_effort, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Storage key for the aggregate
pub const PROGRESS_KEY: &str = "rythmAI_progress";

/// Mood check-ins older than this (relative to the newest insert) are dropped
pub const CHECK_IN_RETENTION_MS: i64 = 30 * DAY_MS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCheckIn {
    pub mood: String,
    /// Epoch ms
    pub timestamp: i64,
    /// Assistant text shown for this check-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Gamification state for one profile.
///
/// Fields are only writable through the store so `level` can never drift
/// from `xp` and badge ids stay unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    xp: i64,
    level: i64,
    current_streak: u32,
    longest_streak: u32,
    mood_check_ins: Vec<MoodCheckIn>,
    badges: Vec<Badge>,
    redemption_points: i64,
    tasks_completed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_activity_time: Option<i64>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: level_for_xp(0),
            current_streak: 0,
            longest_streak: 0,
            mood_check_ins: Vec::new(),
            badges: Vec::new(),
            redemption_points: 0,
            tasks_completed: 0,
            last_activity_time: None,
        }
    }
}

impl UserProgress {
    pub fn xp(&self) -> i64 {
        self.xp
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    /// Oldest first
    pub fn mood_check_ins(&self) -> &[MoodCheckIn] {
        &self.mood_check_ins
    }

    pub fn last_check_in(&self) -> Option<&MoodCheckIn> {
        self.mood_check_ins.last()
    }

    /// In unlock order
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }

    pub fn redemption_points(&self) -> i64 {
        self.redemption_points
    }

    pub fn tasks_completed(&self) -> u64 {
        self.tasks_completed
    }

    pub fn last_activity_time(&self) -> Option<i64> {
        self.last_activity_time
    }

    fn add_xp(&mut self, amount: i64) {
        self.xp = self.xp.saturating_add(amount);
        self.level = level_for_xp(self.xp);
    }

    /// Append a check-in and drop everything outside the retention window
    fn push_check_in(&mut self, check_in: MoodCheckIn) {
        let cutoff = check_in.timestamp - CHECK_IN_RETENTION_MS;
        self.last_activity_time = Some(check_in.timestamp);
        self.mood_check_ins.push(check_in);
        self.mood_check_ins.retain(|c| c.timestamp > cutoff);
    }

    fn insert_badge(&mut self, mut badge: Badge, now_ms: i64) -> bool {
        if self.has_badge(&badge.id) {
            return false;
        }
        badge.unlocked_at = Some(now_ms);
        self.badges.push(badge);
        true
    }

    /// Restore invariants on a record that came from storage: recompute the
    /// level and collapse duplicate badge ids (first unlock wins).
    fn normalize(&mut self) {
        self.level = level_for_xp(self.xp);
        let mut seen = HashSet::new();
        self.badges.retain(|b| seen.insert(b.id.clone()));
    }
}

pub struct ProgressStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    progress: UserProgress,
}

impl<S: KeyValueStore> ProgressStore<S, SystemClock> {
    /// Load the persisted aggregate using the host clock
    pub fn open(storage: S) -> Self {
        Self::open_with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ProgressStore<S, C> {
    pub fn open_with_clock(storage: S, clock: C) -> Self {
        let mut progress: UserProgress = load_or_default(&storage, PROGRESS_KEY);
        progress.normalize();
        debug!(
            "Progress loaded: xp={} level={} streak={}",
            progress.xp, progress.level, progress.current_streak
        );
        Self {
            storage,
            clock,
            progress,
        }
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Backend shared with feature modules for their own records
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn persist(&self) {
        save_best_effort(&self.storage, PROGRESS_KEY, &self.progress);
    }

    /// Add `amount` XP (negative values are applied as-is) and recompute the level
    pub fn add_xp(&mut self, amount: i64) {
        let before = self.progress.level;
        self.progress.add_xp(amount);
        if self.progress.level > before {
            info!("Level up: {} -> {}", before, self.progress.level);
        }
        self.persist();
    }

    /// Record a mood check-in stamped now and award the check-in XP.
    ///
    /// Does not touch the streak; see `check_in` for the composed flow.
    pub fn record_mood_check_in(&mut self, mood: &str, response: Option<String>) {
        let now = self.clock.now_ms();
        self.progress.push_check_in(MoodCheckIn {
            mood: mood.to_string(),
            timestamp: now,
            response,
        });
        self.progress.add_xp(MOOD_CHECK_IN_XP);
        self.persist();
    }

    /// Advance the check-in streak against the most recent check-in's day.
    pub fn update_streak(&mut self) -> StreakStep {
        let last_day = self
            .progress
            .last_check_in()
            .and_then(|c| self.clock.day_of(c.timestamp));
        let step = streak::next_step(last_day, self.clock.today(), self.clock.yesterday());

        if step == StreakStep::Unchanged {
            return step;
        }

        let (current, longest) = streak::apply(
            step,
            self.progress.current_streak,
            self.progress.longest_streak,
        );
        self.progress.current_streak = current;
        self.progress.longest_streak = longest;
        debug!("Streak {:?}: current={} longest={}", step, current, longest);
        self.persist();
        step
    }

    /// Mood check-in as the mood feature performs it: the streak is evaluated
    /// against the previous check-in, then the new one is recorded.
    pub fn check_in(&mut self, mood: &str, response: Option<String>) -> StreakStep {
        let step = self.update_streak();
        self.record_mood_check_in(mood, response);
        step
    }

    /// Add a badge unless one with the same id is already held.
    /// Returns whether the badge was added.
    pub fn add_badge(&mut self, badge: Badge) -> bool {
        let now = self.clock.now_ms();
        let id = badge.id.clone();
        if !self.progress.insert_badge(badge, now) {
            return false;
        }
        info!("Badge unlocked: {}", id);
        self.persist();
        true
    }

    /// Add redemption points, unlock any milestone badges now reached and
    /// award the redemption XP. Returns the badges unlocked by this call.
    pub fn add_redemption_points(&mut self, points: i64) -> Vec<Badge> {
        let now = self.clock.now_ms();
        self.progress.redemption_points = self.progress.redemption_points.saturating_add(points);

        let mut unlocked = Vec::new();
        for milestone in REDEMPTION_MILESTONES {
            if milestone.reached(self.progress.redemption_points)
                && self.progress.insert_badge(milestone.badge(), now)
            {
                info!("Badge unlocked: {}", milestone.badge_id);
                if let Some(badge) = self.progress.badges.last() {
                    unlocked.push(badge.clone());
                }
            }
        }

        self.progress.add_xp(REDEMPTION_XP);
        self.persist();
        unlocked
    }

    pub fn complete_task(&mut self) {
        self.progress.tasks_completed += 1;
        self.progress.add_xp(TASK_COMPLETION_XP);
        self.persist();
    }

    /// Award the flat XP for a feature activity. Returns the XP granted.
    pub fn reward(&mut self, activity: Activity) -> i64 {
        let xp = activity.xp();
        debug!("Reward {}: +{} XP", activity, xp);
        self.add_xp(xp);
        xp
    }

    /// Back to defaults, and forget the persisted copy
    pub fn reset(&mut self) {
        self.progress = UserProgress::default();
        if let Err(e) = self.storage.remove(PROGRESS_KEY) {
            warn!("Failed to clear stored progress: {}", e);
        }
        info!("Progress reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::{load_record, MemoryStore};
    use crate::progress::badges::{CHARACTER_GROWTH, REBORN_MIND};
    use std::sync::Arc;

    fn store_at(
        year: i32,
        month: u32,
        day: u32,
    ) -> (ProgressStore<MemoryStore, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at(year, month, day, 10));
        let store = ProgressStore::open_with_clock(MemoryStore::new(), clock.clone());
        (store, clock)
    }

    fn badge(id: &str) -> Badge {
        Badge::new(id, "Name", "Description", "*")
    }

    #[test]
    fn test_fresh_profile_defaults() {
        let (store, _) = store_at(2026, 1, 5);
        let p = store.progress();
        assert_eq!(p.xp(), 0);
        assert_eq!(p.level(), 1);
        assert_eq!(p.current_streak(), 0);
        assert!(p.badges().is_empty());
        assert!(p.last_activity_time().is_none());
    }

    #[test]
    fn test_level_tracks_total_xp() {
        let (mut store, _) = store_at(2026, 1, 5);
        let grants = [10, 35, 60, 5, 90, 1, 250];
        let mut total = 0;
        for amount in grants {
            store.add_xp(amount);
            total += amount;
            assert_eq!(store.progress().level(), total / 100 + 1);
        }
        assert_eq!(store.progress().xp(), 451);
        assert_eq!(store.progress().level(), 5);
    }

    #[test]
    fn test_negative_xp_is_not_clamped() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.add_xp(30);
        store.add_xp(-50);
        assert_eq!(store.progress().xp(), -20);
        assert_eq!(store.progress().level(), 0);
    }

    #[test]
    fn test_first_check_in_scenario() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.check_in("happy", None);

        let p = store.progress();
        assert_eq!(p.xp(), 10);
        assert_eq!(p.level(), 1);
        assert_eq!(p.current_streak(), 1);
        assert_eq!(p.mood_check_ins().len(), 1);
        assert!(p.last_activity_time().is_some());
    }

    #[test]
    fn test_update_streak_same_day_is_idempotent() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.check_in("happy", None);
        assert_eq!(store.update_streak(), StreakStep::Unchanged);
        assert_eq!(store.update_streak(), StreakStep::Unchanged);
        assert_eq!(store.progress().current_streak(), 1);
    }

    #[test]
    fn test_record_then_update_same_day_keeps_streak() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.record_mood_check_in("sad", None);
        assert_eq!(store.update_streak(), StreakStep::Unchanged);
        assert_eq!(store.progress().current_streak(), 0);
    }

    #[test]
    fn test_consecutive_days_build_streak() {
        let (mut store, clock) = store_at(2026, 1, 5);
        store.check_in("happy", None);
        clock.advance_days(1);
        store.check_in("anxious", None);
        clock.advance_days(1);
        store.check_in("happy", None);

        assert_eq!(store.progress().current_streak(), 3);
        assert_eq!(store.progress().longest_streak(), 3);
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_longest() {
        let (mut store, clock) = store_at(2026, 1, 5);
        for _ in 0..4 {
            store.check_in("happy", None);
            clock.advance_days(1);
        }
        assert_eq!(store.progress().current_streak(), 4);

        // Check-ins on the 5th..8th, clock now on the 9th; jump to the 12th
        clock.advance_days(3);
        assert_eq!(store.check_in("empty", None), StreakStep::Restarted);
        assert_eq!(store.progress().current_streak(), 1);
        assert_eq!(store.progress().longest_streak(), 4);
    }

    #[test]
    fn test_late_night_then_early_morning_extends() {
        let clock = Arc::new(ManualClock::at(2026, 1, 5, 23));
        let mut store = ProgressStore::open_with_clock(MemoryStore::new(), clock.clone());
        store.check_in("happy", None);

        // Two hours later is the next calendar day
        clock.advance_ms(2 * 60 * 60 * 1000);
        assert_eq!(store.check_in("happy", None), StreakStep::Extended);
        assert_eq!(store.progress().current_streak(), 2);
    }

    #[test]
    fn test_check_ins_pruned_after_thirty_days() {
        let (mut store, clock) = store_at(2026, 1, 5);
        store.record_mood_check_in("happy", None);
        clock.advance_days(10);
        store.record_mood_check_in("sad", None);
        clock.advance_days(21);
        store.record_mood_check_in("angry", Some("breathe".to_string()));

        let moods: Vec<&str> = store
            .progress()
            .mood_check_ins()
            .iter()
            .map(|c| c.mood.as_str())
            .collect();
        assert_eq!(moods, vec!["sad", "angry"]);

        let now = clock.now_ms();
        assert!(store
            .progress()
            .mood_check_ins()
            .iter()
            .all(|c| c.timestamp > now - CHECK_IN_RETENTION_MS));
    }

    #[test]
    fn test_entry_exactly_thirty_days_old_is_dropped() {
        let (mut store, clock) = store_at(2026, 1, 5);
        store.record_mood_check_in("happy", None);
        clock.advance_days(30);
        store.record_mood_check_in("happy", None);
        assert_eq!(store.progress().mood_check_ins().len(), 1);
    }

    #[test]
    fn test_add_badge_is_idempotent() {
        let (mut store, clock) = store_at(2026, 1, 5);
        assert!(store.add_badge(badge("first-steps")));
        let first = store.progress().badges().to_vec();

        clock.advance_days(1);
        assert!(!store.add_badge(badge("first-steps")));
        assert_eq!(store.progress().badges(), first.as_slice());
        assert_eq!(first[0].unlocked_at, Some(ManualClock::at(2026, 1, 5, 10).now_ms()));
    }

    #[test]
    fn test_redemption_unlocks_reborn_mind_once() {
        let (mut store, _) = store_at(2026, 1, 5);
        let unlocked = store.add_redemption_points(7);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, REBORN_MIND);

        for _ in 0..3 {
            assert!(store.add_redemption_points(1).is_empty());
        }
        let count = store
            .progress()
            .badges()
            .iter()
            .filter(|b| b.id == REBORN_MIND)
            .count();
        assert_eq!(count, 1);
        assert_eq!(store.progress().redemption_points(), 10);
        assert_eq!(store.progress().xp(), 60);
    }

    #[test]
    fn test_redemption_thirty_unlocks_both() {
        let (mut store, _) = store_at(2026, 1, 5);
        let unlocked = store.add_redemption_points(30);

        let ids: Vec<&str> = unlocked.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec![REBORN_MIND, CHARACTER_GROWTH]);
        assert!(store.progress().has_badge(REBORN_MIND));
        assert!(store.progress().has_badge(CHARACTER_GROWTH));
        assert_eq!(store.progress().xp(), 15);
    }

    #[test]
    fn test_redemption_below_threshold_still_awards_xp() {
        let (mut store, _) = store_at(2026, 1, 5);
        assert!(store.add_redemption_points(2).is_empty());
        assert_eq!(store.progress().xp(), 15);
        assert!(store.progress().badges().is_empty());
    }

    #[test]
    fn test_complete_task() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.complete_task();
        store.complete_task();
        assert_eq!(store.progress().tasks_completed(), 2);
        assert_eq!(store.progress().xp(), 10);
    }

    #[test]
    fn test_reward_activity() {
        let (mut store, _) = store_at(2026, 1, 5);
        assert_eq!(store.reward(Activity::SleepSession), 25);
        assert_eq!(store.progress().xp(), 25);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.add_xp(40);
        store.check_in("happy", None);
        store.add_redemption_points(8);

        let stored: UserProgress = load_record(store.storage(), PROGRESS_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(&stored, store.progress());
    }

    #[test]
    fn test_reset_clears_storage() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.add_xp(500);
        assert!(store.storage().contains(PROGRESS_KEY));

        store.reset();
        assert_eq!(store.progress(), &UserProgress::default());
        assert!(!store.storage().contains(PROGRESS_KEY));
    }

    #[test]
    fn test_write_failure_keeps_session_state() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.add_xp(20);
        store.storage().set_fail_writes(true);

        store.add_xp(30);
        assert_eq!(store.progress().xp(), 50);

        // Storage still holds the last successful write
        let stored: UserProgress = load_record(store.storage(), PROGRESS_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(stored.xp(), 20);
    }

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        let storage = MemoryStore::new();
        storage.insert_raw(PROGRESS_KEY, "{\"xp\": \"lots\"");
        let store = ProgressStore::open_with_clock(storage, ManualClock::new(0));
        assert_eq!(store.progress(), &UserProgress::default());
    }

    #[test]
    fn test_load_normalizes_level_and_badges() {
        let storage = MemoryStore::new();
        storage.insert_raw(
            PROGRESS_KEY,
            r#"{
                "xp": 345,
                "level": 1,
                "badges": [
                    {"id": "a", "name": "A", "description": "", "icon": "", "unlockedAt": 1},
                    {"id": "a", "name": "A again", "description": "", "icon": "", "unlockedAt": 2}
                ]
            }"#,
        );
        let store = ProgressStore::open_with_clock(storage, ManualClock::new(0));
        assert_eq!(store.progress().level(), 4);
        assert_eq!(store.progress().badges().len(), 1);
        assert_eq!(store.progress().badges()[0].unlocked_at, Some(1));
        // Missing fields take defaults
        assert_eq!(store.progress().current_streak(), 0);
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let (mut store, _) = store_at(2026, 1, 5);
        store.check_in("happy", Some("nice".to_string()));
        let json = serde_json::to_value(store.progress()).unwrap();

        assert_eq!(json["xp"], 10);
        assert_eq!(json["level"], 1);
        assert_eq!(json["currentStreak"], 1);
        assert_eq!(json["longestStreak"], 1);
        assert_eq!(json["moodCheckIns"][0]["mood"], "happy");
        assert_eq!(json["moodCheckIns"][0]["response"], "nice");
        assert_eq!(json["redemptionPoints"], 0);
        assert_eq!(json["tasksCompleted"], 0);
        assert!(json["lastActivityTime"].is_i64());
    }
}
