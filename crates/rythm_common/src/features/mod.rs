//! Habit features that sit next to the Progress Store.
//!
//! Each feature keeps its own record in the same key-value backend and awards
//! XP through the store, never by editing the aggregate directly.

pub mod fitness;
pub mod journal;
pub mod tasks;

pub use fitness::{Difficulty, Exercise, ExerciseOutcome, FitnessLog, EXERCISES, FITNESS_KEY};
pub use journal::{Journal, JournalEntry, WeeklyReport, JOURNAL_KEY};
pub use tasks::{Task, TaskKind, TaskLog, TaskToggle, TASKS, TASKS_KEY};
