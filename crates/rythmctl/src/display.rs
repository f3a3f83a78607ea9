//! Terminal rendering for rythmctl.

use crate::commands::{ChatOutcome, MoodOutcome, RedeemOutcome, StoryOutcome};
use owo_colors::OwoColorize;
use rythm_common::clock::Clock;
use rythm_common::features::fitness::{ExerciseOutcome, FitnessLog, EXERCISES};
use rythm_common::features::journal::WeeklyReport;
use rythm_common::features::tasks::{tasks_of, Task, TaskKind, TaskLog, TaskToggle};
use rythm_common::gateway::fallback::Story;
use rythm_common::progress::levels::{progress_percent, xp_to_next_level};
use rythm_common::progress::StreakStep;
use rythm_common::{Badge, Reply, UserProgress};

const HR: &str = "──────────────────────────────────────────";
const BAR_WIDTH: usize = 20;
const KEY_WIDTH: usize = 16;

fn print_kv(key: &str, value: &str) {
    println!("  {:width$} {}", key.dimmed(), value, width = KEY_WIDTH);
}

/// `[██████░░░░]` for a 0-100 percentage
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn print_status(progress: &UserProgress) {
    println!();
    println!("{}", "Rythm".bold().cyan());
    println!("{}", HR.dimmed());

    let xp = progress.xp();
    print_kv("level", &progress.level().to_string());
    print_kv(
        "xp",
        &format!("{} ({} to next level)", xp, xp_to_next_level(xp)),
    );
    println!("  {:width$} {}", "", progress_bar(progress_percent(xp)).green(), width = KEY_WIDTH);
    print_kv(
        "streak",
        &format!(
            "{} day(s), best {}",
            progress.current_streak(),
            progress.longest_streak()
        ),
    );
    print_kv("check-ins", &progress.mood_check_ins().len().to_string());
    print_kv("redemption", &progress.redemption_points().to_string());
    print_kv("tasks done", &progress.tasks_completed().to_string());
    print_kv("badges", &progress.badges().len().to_string());
    println!();
}

fn print_reply(reply: &Reply) {
    println!();
    println!("{}", reply.text);
    if reply.is_fallback() {
        println!();
        println!("{}", "(offline reply - the assistant is unreachable right now)".dimmed());
    }
}

fn print_xp(xp: i64) {
    if xp > 0 {
        println!("{}", format!("+{} XP", xp).green().bold());
    }
}

pub fn print_mood(outcome: &MoodOutcome, progress: &UserProgress) {
    print_reply(&outcome.reply);
    println!();
    print_xp(outcome.xp_gained);
    let note = match outcome.streak {
        StreakStep::Extended => "streak extended",
        StreakStep::Restarted => "new streak started",
        StreakStep::Unchanged => "already checked in today",
    };
    println!(
        "{} {} ({})",
        "Streak:".dimmed(),
        progress.current_streak(),
        note
    );
}

pub fn print_chat(outcome: &ChatOutcome) {
    print_reply(&outcome.reply);
    println!();
    print_xp(outcome.xp_gained);
}

pub fn print_crisis(reply: &Reply) {
    print_reply(reply);
    println!();
    println!(
        "{}",
        "If you are in danger, call or text 988 (US) or your local emergency number now."
            .red()
            .bold()
    );
}

pub fn print_redeem(outcome: &RedeemOutcome) {
    print_reply(&outcome.reply);
    println!();
    print_xp(outcome.xp_gained);
    for badge in &outcome.unlocked {
        println!("{} {} {}", "Badge unlocked:".yellow().bold(), badge.icon, badge.name);
    }
}

pub fn print_story(outcome: &StoryOutcome) {
    print_story_body(&outcome.story);
    print_xp(outcome.xp_gained);
}

fn print_story_body(story: &Story) {
    println!();
    println!("{}", story.title.bold().cyan());
    println!();
    println!("{}", story.content);
    println!();
    println!("{} {}", "Lesson:".bold(), story.lesson);
    println!("{} {}", "Action:".bold(), story.action);
    println!();
}

pub fn print_story_list(stories: &[Story]) {
    println!();
    for (i, story) in stories.iter().enumerate() {
        println!("  {}. {}", i + 1, story.title);
    }
    println!();
    println!("{}", "Read one with: rythmctl story --read N".dimmed());
}

fn print_task_row<C: Clock + ?Sized>(task: &Task, log: &TaskLog, clock: &C) {
    let mark = if log.is_done(task, clock) {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    println!(
        "  {} {:3} {} {}  {}  {}",
        mark,
        task.id,
        task.icon,
        task.name,
        format!("+{} XP", task.xp).green(),
        task.description.dimmed()
    );
}

pub fn print_tasks<C: Clock + ?Sized>(log: &TaskLog, clock: &C) {
    for kind in [TaskKind::Daily, TaskKind::Weekly] {
        println!();
        let total = tasks_of(kind).count();
        println!(
            "{} ({}/{})",
            format!("{} tasks", kind).bold(),
            log.done_count(kind, clock),
            total
        );
        for task in tasks_of(kind) {
            print_task_row(task, log, clock);
        }
    }
    println!();
}

pub fn print_task_toggle(task: &Task, outcome: TaskToggle) {
    match outcome {
        TaskToggle::Completed { xp } => {
            println!("{} {} {}", "Done:".green().bold(), task.icon, task.name);
            print_xp(xp);
        }
        TaskToggle::Uncompleted => {
            println!("{} {}", "Marked not done:".yellow(), task.name);
        }
    }
}

pub fn print_journal_saved(xp: i64) {
    println!("{}", "Journal entry saved!".green());
    print_xp(xp);
}

pub fn print_report(report: Option<&WeeklyReport>) {
    let Some(report) = report else {
        println!("No journal entries in the last 7 days. Start with `rythmctl journal`.");
        return;
    };
    println!();
    println!("{} ({} day(s))", "Weekly report".bold().cyan(), report.day_count);
    println!("{}", HR.dimmed());
    print_kv("mood", &format!("{:.1} / 5", report.avg_mood));
    print_kv("stress", &format!("{:.1} / 5", report.avg_stress));
    print_kv("sleep", &format!("{:.1} h", report.avg_sleep));
    print_kv("screen time", &format!("{:.1} h", report.avg_screen_time));
    println!();
}

pub fn print_exercises<C: Clock + ?Sized>(log: &FitnessLog, clock: &C) {
    println!();
    println!(
        "{} ({} today, streak {})",
        "Exercises".bold(),
        log.completed_today(clock).len(),
        log.current_streak()
    );
    for exercise in EXERCISES {
        let mark = if log.is_done(exercise, clock) {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        println!(
            "  {} {} {} {:14} {:10} {:6}  {}",
            mark,
            exercise.id,
            exercise.emoji,
            exercise.name,
            exercise.reps,
            exercise.difficulty.to_string(),
            exercise.description.dimmed()
        );
    }
    println!();
}

pub fn print_exercise_toggle(name: &str, outcome: ExerciseOutcome) {
    match outcome {
        ExerciseOutcome::Completed { xp, calories } => {
            println!("{} {} (~{} kcal)", "Done:".green().bold(), name, calories);
            print_xp(xp);
        }
        ExerciseOutcome::Undone => println!("{} {}", "Marked not done:".yellow(), name),
    }
}

pub fn print_badges(badges: &[Badge]) {
    if badges.is_empty() {
        println!("No badges yet. Keep going!");
        return;
    }
    println!();
    for badge in badges {
        println!("  {} {}  {}", badge.icon, badge.name.bold(), badge.description.dimmed());
    }
    println!();
}
