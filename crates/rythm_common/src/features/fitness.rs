//! Quick bodyweight exercises with their own daily streak.

use crate::clock::Clock;
use crate::persistence::{load_or_default, save_best_effort, KeyValueStore};
use crate::progress::streak::{self, StreakStep};
use crate::progress::ProgressStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const FITNESS_KEY: &str = "rythmAI_fitness";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn xp(self) -> i64 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    pub fn calories(self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 35,
            Difficulty::Hard => 50,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub reps: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
}

pub const EXERCISES: &[Exercise] = &[
    Exercise { id: "1", name: "Pushups", emoji: "💪", reps: "10-20", description: "Upper body strength", difficulty: Difficulty::Medium },
    Exercise { id: "2", name: "Squats", emoji: "🦵", reps: "15-25", description: "Leg strength", difficulty: Difficulty::Medium },
    Exercise { id: "3", name: "Stretching", emoji: "🧘", reps: "5 min", description: "Improve flexibility", difficulty: Difficulty::Easy },
    Exercise { id: "4", name: "Plank", emoji: "📍", reps: "30-60 sec", description: "Core strength", difficulty: Difficulty::Hard },
    Exercise { id: "5", name: "Jumping Jacks", emoji: "🤸", reps: "20-30", description: "Cardio workout", difficulty: Difficulty::Medium },
    Exercise { id: "6", name: "Running", emoji: "🏃", reps: "10-15 min", description: "Cardio endurance", difficulty: Difficulty::Hard },
    Exercise { id: "7", name: "Lunges", emoji: "🚶", reps: "10 each leg", description: "Leg and glute work", difficulty: Difficulty::Medium },
    Exercise { id: "8", name: "Yoga Flow", emoji: "🧘", reps: "15 min", description: "Flexibility and calm", difficulty: Difficulty::Easy },
];

/// Look up by id or (case-insensitive) name
pub fn find_exercise(key: &str) -> Option<&'static Exercise> {
    EXERCISES
        .iter()
        .find(|e| e.id == key || e.name.eq_ignore_ascii_case(key))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitnessLog {
    completed_today: Vec<String>,
    last_session_date: Option<NaiveDate>,
    current_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseOutcome {
    Completed { xp: i64, calories: u32 },
    /// Taken off today's list; XP already granted is kept
    Undone,
}

impl FitnessLog {
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        load_or_default(storage, FITNESS_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, storage: &S) -> bool {
        save_best_effort(storage, FITNESS_KEY, self)
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn last_session_date(&self) -> Option<NaiveDate> {
        self.last_session_date
    }

    /// Exercises done today. A log from an earlier day has none.
    pub fn completed_today<C: Clock + ?Sized>(&self, clock: &C) -> &[String] {
        if self.last_session_date.is_some() && self.last_session_date == clock.today() {
            &self.completed_today
        } else {
            &[]
        }
    }

    pub fn is_done<C: Clock + ?Sized>(&self, exercise: &Exercise, clock: &C) -> bool {
        self.completed_today(clock).iter().any(|id| id == exercise.id)
    }

    /// Start today's session if the log is from another day: advance the
    /// streak and clear the previous day's list.
    fn roll_over<C: Clock + ?Sized>(&mut self, clock: &C) -> StreakStep {
        let today = clock.today();
        if self.last_session_date.is_some() && self.last_session_date == today {
            return StreakStep::Unchanged;
        }

        let step = streak::next_step(self.last_session_date, today, clock.yesterday());
        let (current, _) = streak::apply(step, self.current_streak, self.current_streak);
        self.current_streak = current;
        self.completed_today.clear();
        self.last_session_date = today;
        debug!("Fitness session started: {:?}, streak={}", step, current);
        step
    }
}

/// Complete an exercise, or undo it if it is already done today.
pub fn toggle_exercise<S: KeyValueStore, C: Clock>(
    store: &mut ProgressStore<S, C>,
    exercise: &Exercise,
) -> ExerciseOutcome {
    let mut log = FitnessLog::load(store.storage());
    log.roll_over(store.clock());

    let outcome = if let Some(pos) = log.completed_today.iter().position(|id| id == exercise.id) {
        log.completed_today.remove(pos);
        ExerciseOutcome::Undone
    } else {
        log.completed_today.push(exercise.id.to_string());
        ExerciseOutcome::Completed {
            xp: exercise.difficulty.xp(),
            calories: exercise.difficulty.calories(),
        }
    };
    log.save(store.storage());

    if let ExerciseOutcome::Completed { xp, .. } = outcome {
        store.add_xp(xp);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::MemoryStore;
    use std::sync::Arc;

    fn setup() -> (ProgressStore<MemoryStore, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at(2024, 7, 1, 7));
        let store = ProgressStore::open_with_clock(MemoryStore::new(), clock.clone());
        (store, clock)
    }

    fn log(store: &ProgressStore<MemoryStore, Arc<ManualClock>>) -> FitnessLog {
        FitnessLog::load(store.storage())
    }

    #[test]
    fn test_difficulty_rewards() {
        let plank = find_exercise("plank").unwrap();
        assert_eq!(plank.difficulty.xp(), 20);
        assert_eq!(plank.difficulty.calories(), 50);
        assert_eq!(find_exercise("3").map(|e| e.difficulty), Some(Difficulty::Easy));
    }

    #[test]
    fn test_complete_then_undo() {
        let (mut store, _) = setup();
        let squats = find_exercise("Squats").unwrap();

        assert_eq!(
            toggle_exercise(&mut store, squats),
            ExerciseOutcome::Completed { xp: 15, calories: 35 }
        );
        assert!(log(&store).is_done(squats, store.clock()));
        assert_eq!(log(&store).current_streak(), 1);

        assert_eq!(toggle_exercise(&mut store, squats), ExerciseOutcome::Undone);
        assert_eq!(store.progress().xp(), 15);
        assert!(!log(&store).is_done(squats, store.clock()));
        assert_eq!(log(&store).current_streak(), 1);
    }

    #[test]
    fn test_streak_across_days() {
        let (mut store, clock) = setup();
        let yoga = find_exercise("8").unwrap();
        let run = find_exercise("6").unwrap();

        toggle_exercise(&mut store, yoga);
        toggle_exercise(&mut store, run);
        assert_eq!(log(&store).current_streak(), 1);

        clock.advance_days(1);
        assert!(log(&store).completed_today(store.clock()).is_empty());
        toggle_exercise(&mut store, yoga);
        assert_eq!(log(&store).current_streak(), 2);
        assert_eq!(log(&store).completed_today(store.clock()).len(), 1);

        clock.advance_days(3);
        toggle_exercise(&mut store, yoga);
        assert_eq!(log(&store).current_streak(), 1);
        assert_eq!(store.progress().xp(), 10 + 20 + 10 + 10);
    }
}
