//! Fixed XP rewards for feature activities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Awarded by `record_mood_check_in`
pub const MOOD_CHECK_IN_XP: i64 = 10;
/// Awarded by every `add_redemption_points` call
pub const REDEMPTION_XP: i64 = 15;
/// Awarded by `complete_task`
pub const TASK_COMPLETION_XP: i64 = 5;

/// Feature actions that earn a flat amount of XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    /// One assistant chat exchange
    ChatMessage,
    /// Five full breathe-in / hold / breathe-out cycles
    BreathingGame,
    /// One correct colour match
    ColorMatch,
    /// A sleep sound or meditation session that ran until its timer expired
    SleepSession,
    SleepBreathing,
    StoryRead,
    StoryGenerated,
    JournalEntry,
    /// Bonus for finishing the mood check-in flow, on top of `MOOD_CHECK_IN_XP`
    MoodCheckIn,
}

impl Activity {
    pub const ALL: [Activity; 9] = [
        Activity::ChatMessage,
        Activity::BreathingGame,
        Activity::ColorMatch,
        Activity::SleepSession,
        Activity::SleepBreathing,
        Activity::StoryRead,
        Activity::StoryGenerated,
        Activity::JournalEntry,
        Activity::MoodCheckIn,
    ];

    pub fn xp(self) -> i64 {
        match self {
            Activity::ChatMessage => 5,
            Activity::BreathingGame => 20,
            Activity::ColorMatch => 10,
            Activity::SleepSession => 25,
            Activity::SleepBreathing => 15,
            Activity::StoryRead => 10,
            Activity::StoryGenerated => 15,
            Activity::JournalEntry => 15,
            Activity::MoodCheckIn => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::ChatMessage => "chat-message",
            Activity::BreathingGame => "breathing-game",
            Activity::ColorMatch => "color-match",
            Activity::SleepSession => "sleep-session",
            Activity::SleepBreathing => "sleep-breathing",
            Activity::StoryRead => "story-read",
            Activity::StoryGenerated => "story-generated",
            Activity::JournalEntry => "journal-entry",
            Activity::MoodCheckIn => "mood-check-in",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown activity '{}'", s))
    }
}
