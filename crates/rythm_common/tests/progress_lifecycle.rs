//! Progress lifecycle against a real data directory.

use rythm_common::clock::ManualClock;
use rythm_common::features::{fitness, journal, tasks};
use rythm_common::progress::{CHARACTER_GROWTH, PROGRESS_KEY, REBORN_MIND};
use rythm_common::{Activity, FileStore, KeyValueStore, ProgressStore};
use std::sync::Arc;

fn open(
    dir: &std::path::Path,
    clock: &Arc<ManualClock>,
) -> ProgressStore<FileStore, Arc<ManualClock>> {
    ProgressStore::open_with_clock(FileStore::new(dir), clock.clone())
}

#[test]
fn test_week_of_use_survives_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 9, 2, 18));

    for day in 0..3 {
        let mut store = open(dir.path(), &clock);
        store.check_in("happy", Some("Nice!".to_string()));
        store.reward(Activity::BreathingGame);
        assert_eq!(store.progress().current_streak(), day + 1);
        clock.advance_days(1);
    }

    let store = open(dir.path(), &clock);
    let progress = store.progress();
    assert_eq!(progress.current_streak(), 3);
    assert_eq!(progress.longest_streak(), 3);
    assert_eq!(progress.mood_check_ins().len(), 3);
    assert_eq!(progress.xp(), 3 * (10 + 20));
    assert_eq!(progress.level(), 1);
}

#[test]
fn test_redemption_badges_persist_once() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 9, 2, 12));

    let mut store = open(dir.path(), &clock);
    let unlocked = store.add_redemption_points(30);
    assert_eq!(unlocked.len(), 2);
    drop(store);

    let mut store = open(dir.path(), &clock);
    assert!(store.progress().has_badge(REBORN_MIND));
    assert!(store.progress().has_badge(CHARACTER_GROWTH));
    assert!(store.add_redemption_points(1).is_empty());
    assert_eq!(store.progress().badges().len(), 2);
    assert_eq!(store.progress().xp(), 30);
}

#[test]
fn test_features_share_one_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 9, 2, 8));
    let mut store = open(dir.path(), &clock);

    let walk = tasks::find_task("d4").unwrap();
    tasks::toggle(&mut store, walk);

    let plank = fitness::find_exercise("Plank").unwrap();
    fitness::toggle_exercise(&mut store, plank);

    let today = chrono::NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
    journal::save_entry(&mut store, journal::JournalEntry::new(today, 4, 2, 8.0, 2.5));

    // 5 + 15 task, 20 plank, 15 journal
    assert_eq!(store.progress().xp(), 55);

    let files = FileStore::new(dir.path());
    for key in [
        PROGRESS_KEY,
        tasks::TASKS_KEY,
        fitness::FITNESS_KEY,
        journal::JOURNAL_KEY,
    ] {
        assert!(files.get(key).unwrap().is_some(), "missing {}", key);
    }

    let reopened = open(dir.path(), &clock);
    assert_eq!(reopened.progress(), store.progress());
    assert!(tasks::TaskLog::load(reopened.storage()).is_done(walk, reopened.clock()));
}

#[test]
fn test_corrupt_record_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 9, 2, 8));
    FileStore::new(dir.path())
        .set(PROGRESS_KEY, "{not json")
        .unwrap();

    let mut store = open(dir.path(), &clock);
    assert_eq!(store.progress().xp(), 0);

    store.add_xp(120);
    let reopened = open(dir.path(), &clock);
    assert_eq!(reopened.progress().level(), 2);
}
