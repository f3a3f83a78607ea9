//! Rythm Control - CLI client for the Rythm wellness companion
//!
//! Progress lives in local files; assistant features go through rythmd.

use anyhow::{bail, Result};
use clap::Parser;
use rythm_common::features::fitness::FitnessLog;
use rythm_common::features::journal::JournalEntry;
use rythm_common::features::tasks::TaskLog;
use rythm_common::gateway::fallback;
use rythm_common::{Assistant, DaemonProvider, FileStore, ProgressStore, RythmConfig};
use rythmctl::cli::{Cli, Commands};
use rythmctl::commands::Session;
use rythmctl::display;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "rythmctl=debug,rythm_common=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = RythmConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    if let Some(url) = cli.daemon_url {
        config.client.daemon_url = url;
    }

    let data_dir = config.storage.resolved_data_dir();
    debug!("Data dir: {}", data_dir.display());
    debug!("Gateway: {}", config.client.gateway_url());

    let store = ProgressStore::open(FileStore::new(data_dir));
    let assistant = Assistant::new(DaemonProvider::new(&config.client)?);
    let mut session = Session::new(store, assistant);

    match cli.command {
        Commands::Status { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.store.progress())?);
            } else {
                display::print_status(session.store.progress());
            }
        }
        Commands::Mood { mood } => {
            let outcome = session.mood(&mood).await;
            display::print_mood(&outcome, session.store.progress());
        }
        Commands::Chat { message } => {
            let outcome = session.chat(&message.join(" ")).await;
            display::print_chat(&outcome);
        }
        Commands::Crisis { message } => {
            let reply = session.crisis(&message.join(" ")).await;
            display::print_crisis(&reply);
        }
        Commands::Redeem { confession } => {
            let outcome = session.redeem(&confession.join(" ")).await;
            display::print_redeem(&outcome);
        }
        Commands::Story { read, list } => {
            if list {
                display::print_story_list(&fallback::stories());
            } else if let Some(number) = read {
                display::print_story(&session.read_story(number)?);
            } else {
                display::print_story(&session.generate_story().await);
            }
        }
        Commands::Tasks => {
            let log = TaskLog::load(session.store.storage());
            display::print_tasks(&log, session.store.clock());
        }
        Commands::Task { id } => {
            let (task, outcome) = session.toggle_task(&id)?;
            display::print_task_toggle(task, outcome);
        }
        Commands::Journal {
            mood,
            stress,
            sleep,
            screen,
            notes,
        } => {
            let entry = JournalEntry::new(session.today(), mood, stress, sleep, screen)
                .with_notes(notes);
            let xp = session.save_journal(entry);
            display::print_journal_saved(xp);
        }
        Commands::Report => display::print_report(session.weekly_report().as_ref()),
        Commands::Exercises => {
            let log = FitnessLog::load(session.store.storage());
            display::print_exercises(&log, session.store.clock());
        }
        Commands::Exercise { exercise } => {
            let (exercise, outcome) = session.toggle_exercise(&exercise)?;
            display::print_exercise_toggle(exercise.name, outcome);
        }
        Commands::Activity { activity } => {
            let xp = session.activity(activity);
            println!("{} +{} XP", activity, xp);
        }
        Commands::Badges => display::print_badges(session.store.progress().badges()),
        Commands::Xp { amount } => {
            session.grant_xp(amount);
            display::print_status(session.store.progress());
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("This erases all progress. Re-run with --yes to confirm");
            }
            session.reset();
            println!("Progress reset.");
        }
    }

    Ok(())
}
