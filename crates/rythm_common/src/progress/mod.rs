//! Progression Module
//!
//! XP, levels, consecutive-day streaks and badges for a single profile.
//!
//! ## Pieces
//!
//! - `levels`: flat 100-XP-per-level curve
//! - `streak`: calendar-day streak transitions
//! - `badges`: badge records and redemption milestones
//! - `rewards`: fixed XP grants per activity
//! - `store`: the persisted `UserProgress` aggregate and its mutations

pub mod badges;
pub mod levels;
pub mod rewards;
pub mod store;
pub mod streak;

pub use badges::{Badge, RedemptionMilestone, CHARACTER_GROWTH, REBORN_MIND, REDEMPTION_MILESTONES};
pub use levels::{level_for_xp, XP_PER_LEVEL};
pub use rewards::{Activity, MOOD_CHECK_IN_XP, REDEMPTION_XP, TASK_COMPLETION_XP};
pub use store::{MoodCheckIn, ProgressStore, UserProgress, CHECK_IN_RETENTION_MS, PROGRESS_KEY};
pub use streak::StreakStep;
