//! Command implementations.
//!
//! Each command mutates the session and returns what happened; printing is
//! left to `display` so the flows can be tested without a terminal.

use anyhow::{bail, Result};
use rythm_common::clock::Clock;
use rythm_common::features::fitness::{self, ExerciseOutcome};
use rythm_common::features::journal::{self, Journal, JournalEntry, WeeklyReport};
use rythm_common::features::tasks::{self, TaskToggle};
use rythm_common::gateway::fallback::{self, Story};
use rythm_common::progress::StreakStep;
use rythm_common::{
    Activity, Assistant, Badge, CompletionProvider, KeyValueStore, ProgressStore, Reply,
    ReplySource,
};
use tracing::{info, warn};

/// Redemption points granted per confession
pub const POINTS_PER_CONFESSION: i64 = 1;

/// Everything a command needs: the player's progress and the assistant
pub struct Session<S, C, P> {
    pub store: ProgressStore<S, C>,
    pub assistant: Assistant<P>,
}

#[derive(Debug)]
pub struct MoodOutcome {
    pub reply: Reply,
    pub streak: StreakStep,
    pub xp_gained: i64,
}

#[derive(Debug)]
pub struct ChatOutcome {
    pub reply: Reply,
    pub xp_gained: i64,
}

#[derive(Debug)]
pub struct RedeemOutcome {
    pub reply: Reply,
    pub unlocked: Vec<Badge>,
    pub xp_gained: i64,
}

#[derive(Debug)]
pub struct StoryOutcome {
    pub story: Story,
    pub source: ReplySource,
    pub xp_gained: i64,
}

impl<S, C, P> Session<S, C, P>
where
    S: KeyValueStore,
    C: Clock,
    P: CompletionProvider,
{
    pub fn new(store: ProgressStore<S, C>, assistant: Assistant<P>) -> Self {
        Self { store, assistant }
    }

    fn xp(&self) -> i64 {
        self.store.progress().xp()
    }

    /// Ask for support, record the check-in with the reply that was shown,
    /// then grant the check-in bonus. Live and fallback replies earn the same.
    pub async fn mood(&mut self, mood: &str) -> MoodOutcome {
        let before = self.xp();
        let reply = self.assistant.mood_support(mood).await;
        let streak = self.store.check_in(mood, Some(reply.text.clone()));
        self.store.reward(Activity::MoodCheckIn);
        MoodOutcome {
            reply,
            streak,
            xp_gained: self.xp() - before,
        }
    }

    /// One chat exchange. Fallback replies earn the same XP as live ones.
    pub async fn chat(&mut self, message: &str) -> ChatOutcome {
        let reply = self.assistant.chat(message).await;
        let xp_gained = self.store.reward(Activity::ChatMessage);
        ChatOutcome { reply, xp_gained }
    }

    pub async fn crisis(&mut self, message: &str) -> Reply {
        self.assistant.crisis(message).await
    }

    pub async fn redeem(&mut self, confession: &str) -> RedeemOutcome {
        let before = self.xp();
        let reply = self.assistant.redemption(confession).await;
        let unlocked = self.store.add_redemption_points(POINTS_PER_CONFESSION);
        RedeemOutcome {
            reply,
            unlocked,
            xp_gained: self.xp() - before,
        }
    }

    pub async fn generate_story(&mut self) -> StoryOutcome {
        let (story, source) = self.assistant.inspiration().await;
        let xp_gained = self.store.reward(Activity::StoryGenerated);
        StoryOutcome {
            story,
            source,
            xp_gained,
        }
    }

    /// Read pre-written story `number` (1-based)
    pub fn read_story(&mut self, number: usize) -> Result<StoryOutcome> {
        let stories = fallback::stories();
        let Some(story) = number.checked_sub(1).and_then(|i| stories.get(i)) else {
            bail!("No story {} (choose 1-{})", number, stories.len());
        };
        let xp_gained = self.store.reward(Activity::StoryRead);
        Ok(StoryOutcome {
            story: story.clone(),
            source: ReplySource::Fallback,
            xp_gained,
        })
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<(&'static tasks::Task, TaskToggle)> {
        let Some(task) = tasks::find_task(id) else {
            bail!("Unknown task '{}'. Run `rythmctl tasks` to see task ids", id);
        };
        let outcome = tasks::toggle(&mut self.store, task);
        Ok((task, outcome))
    }

    pub fn save_journal(&mut self, entry: JournalEntry) -> i64 {
        journal::save_entry(&mut self.store, entry)
    }

    /// Today's date by the session clock, or the host's local date if the
    /// clock cannot map its own timestamp.
    pub fn today(&self) -> chrono::NaiveDate {
        self.store
            .clock()
            .today()
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn weekly_report(&self) -> Option<WeeklyReport> {
        Journal::load(self.store.storage()).weekly_report(self.today())
    }

    pub fn toggle_exercise(
        &mut self,
        key: &str,
    ) -> Result<(&'static fitness::Exercise, ExerciseOutcome)> {
        let Some(exercise) = fitness::find_exercise(key) else {
            bail!("Unknown exercise '{}'. Run `rythmctl exercises` to list them", key);
        };
        let outcome = fitness::toggle_exercise(&mut self.store, exercise);
        Ok((exercise, outcome))
    }

    pub fn activity(&mut self, activity: Activity) -> i64 {
        self.store.reward(activity)
    }

    pub fn grant_xp(&mut self, amount: i64) {
        self.store.add_xp(amount);
    }

    /// Clear progress and every feature record
    pub fn reset(&mut self) {
        self.store.reset();
        for key in [tasks::TASKS_KEY, journal::JOURNAL_KEY, fitness::FITNESS_KEY] {
            if let Err(e) = self.store.storage().remove(key) {
                warn!("Failed to clear {}: {}", key, e);
            }
        }
        info!("All records cleared");
    }
}
