//! End-to-end command flows over a file-backed profile.

use rythm_common::clock::ManualClock;
use rythm_common::features::journal::JournalEntry;
use rythm_common::progress::{StreakStep, REBORN_MIND};
use rythm_common::{Assistant, FakeProvider, FileStore, GatewayError, ProgressStore};
use rythmctl::commands::Session;
use std::path::Path;
use std::sync::Arc;

type TestSession = Session<FileStore, Arc<ManualClock>, FakeProvider>;

fn session(dir: &Path, clock: &Arc<ManualClock>, provider: FakeProvider) -> TestSession {
    let store = ProgressStore::open_with_clock(FileStore::new(dir), clock.clone());
    Session::new(store, Assistant::new(provider))
}

#[tokio::test]
async fn test_three_day_mood_streak_offline() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 11, 4, 21));

    let mut steps = Vec::new();
    for _ in 0..3 {
        let offline = FakeProvider::always_error(GatewayError::Transport("refused".to_string()));
        let mut s = session(dir.path(), &clock, offline);
        let outcome = s.mood("sad").await;
        assert!(outcome.reply.is_fallback());
        assert!(outcome.reply.text.contains("5-4-3-2-1"));
        steps.push(outcome.streak);
        clock.advance_days(1);
    }

    assert_eq!(
        steps,
        vec![StreakStep::Restarted, StreakStep::Extended, StreakStep::Extended]
    );
    let s = session(dir.path(), &clock, FakeProvider::always("hi"));
    assert_eq!(s.store.progress().current_streak(), 3);
    assert_eq!(s.store.progress().xp(), 3 * 20);
}

#[tokio::test]
async fn test_redemption_week_earns_badge() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 11, 4, 9));

    for day in 1..=7 {
        let mut s = session(dir.path(), &clock, FakeProvider::always("You're growing."));
        let outcome = s.redeem("I was rude to a teacher").await;
        assert_eq!(outcome.unlocked.is_empty(), day != 7);
        clock.advance_days(1);
    }

    let s = session(dir.path(), &clock, FakeProvider::always("hi"));
    assert!(s.store.progress().has_badge(REBORN_MIND));
    assert_eq!(s.store.progress().xp(), 7 * 15);
}

#[test]
fn test_journal_report_over_days() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::at(2024, 11, 4, 22));

    for (mood, sleep) in [(2, 6.0), (4, 8.0)] {
        let mut s = session(dir.path(), &clock, FakeProvider::always("hi"));
        let entry = JournalEntry::new(s.today(), mood, 3, sleep, 2.0);
        assert_eq!(s.save_journal(entry), 15);
        clock.advance_days(1);
    }

    let s = session(dir.path(), &clock, FakeProvider::always("hi"));
    let report = s.weekly_report().unwrap();
    assert_eq!(report.day_count, 2);
    assert_eq!(report.avg_mood, 3.0);
    assert_eq!(report.avg_sleep, 7.0);
}
