//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use rythm_common::Activity;
use std::path::PathBuf;

/// Moods the check-in understands
pub const MOODS: [&str; 5] = ["happy", "sad", "anxious", "angry", "empty"];

#[derive(Parser)]
#[command(name = "rythmctl")]
#[command(about = "Rythm - mood check-ins, habits and a supportive assistant", long_about = None)]
#[command(version = env!("RYTHM_VERSION"))]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Where progress is stored (overrides $RYTHM_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// rythmd base URL (overrides $RYTHM_DAEMON_URL)
    #[arg(long, global = true)]
    pub daemon_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show XP, level, streaks and badges
    Status {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Check in with how you feel
    Mood {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(MOODS))]
        mood: String,
    },

    /// Talk about life, school, stress or motivation
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Get support right now, with crisis resources
    Crisis {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Own up to something and earn a redemption point
    Redeem {
        #[arg(required = true, num_args = 1..)]
        confession: Vec<String>,
    },

    /// Read an inspiring story
    Story {
        /// Read pre-written story N instead of generating one
        #[arg(long)]
        read: Option<usize>,

        /// List the pre-written stories
        #[arg(long, conflicts_with = "read")]
        list: bool,
    },

    /// List daily and weekly tasks
    Tasks,

    /// Toggle a task done / not done
    Task { id: String },

    /// Save today's journal entry
    Journal {
        /// 1 (low) to 5 (great)
        #[arg(long, default_value_t = 3)]
        mood: u8,

        /// 1 (calm) to 5 (overwhelmed)
        #[arg(long, default_value_t = 3)]
        stress: u8,

        /// Hours slept
        #[arg(long, default_value_t = 0.0)]
        sleep: f64,

        /// Hours of screen time
        #[arg(long, default_value_t = 0.0)]
        screen: f64,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Weekly journal report
    Report,

    /// List exercises
    Exercises,

    /// Toggle an exercise done / not done for today
    Exercise {
        /// Exercise number or name
        exercise: String,
    },

    /// Record a finished activity (breathing-game, color-match, ...)
    Activity { activity: Activity },

    /// Show unlocked badges
    Badges,

    /// Grant XP directly (hidden - for testing)
    #[command(hide = true)]
    Xp {
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },

    /// Reset all progress
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}
