//! Rythm Common - shared progression, persistence and assistant gateway types.
//!
//! The Progress Store is the single source of truth for XP, levels, streaks
//! and badges. Feature modules (tasks, journal, fitness) persist their own
//! records next to it and award XP through the store.

pub mod clock;
pub mod config;
pub mod error;
pub mod features;
pub mod gateway;
pub mod persistence;
pub mod progress;

pub use clock::{Clock, ManualClock, SystemClock, DAY_MS};
pub use config::RythmConfig;
pub use error::{ConfigError, GatewayError, PersistenceError, ValidationError};
pub use gateway::{
    Assistant, ChatMessage, ChatRole, CompletionProvider, DaemonProvider, FakeProvider, Reply,
    ReplySource, UpstreamProvider,
};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use progress::{Activity, Badge, MoodCheckIn, ProgressStore, UserProgress};
