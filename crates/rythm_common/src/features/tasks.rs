//! Daily and weekly habit tasks.

use crate::clock::{Clock, DAY_MS};
use crate::persistence::{load_or_default, save_best_effort, KeyValueStore};
use crate::progress::ProgressStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

pub const TASKS_KEY: &str = "rythmAI_tasks";

/// A weekly task stays done for this long after completion
const WEEKLY_WINDOW_MS: i64 = 7 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Daily,
    Weekly,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Daily => write!(f, "daily"),
            TaskKind::Weekly => write!(f, "weekly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp: i64,
    pub kind: TaskKind,
}

const fn task(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    xp: i64,
    kind: TaskKind,
) -> Task {
    Task {
        id,
        name,
        description,
        icon,
        xp,
        kind,
    }
}

pub const TASKS: &[Task] = &[
    task("d1", "Make Your Bed", "Start your day with a tidy space", "🛏️", 10, TaskKind::Daily),
    task("d2", "Drink Water", "Stay hydrated - aim for 8 glasses", "💧", 10, TaskKind::Daily),
    task("d3", "Gratitude Practice", "Write down 3 things you're grateful for", "🙏", 15, TaskKind::Daily),
    task("d4", "5-Minute Walk", "Get some fresh air and movement", "🚶", 15, TaskKind::Daily),
    task("w1", "Organize Your Space", "Tidy up your room or workspace", "🧹", 25, TaskKind::Weekly),
    task("w2", "Screen Break", "Spend 1 hour without screens", "📱", 25, TaskKind::Weekly),
    task("w3", "Help Someone", "Do something kind for someone else", "🤝", 30, TaskKind::Weekly),
    task("w4", "Learn 3 Words", "Learn new vocabulary or concept", "📚", 20, TaskKind::Weekly),
];

pub fn find_task(id: &str) -> Option<&'static Task> {
    TASKS.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

pub fn tasks_of(kind: TaskKind) -> impl Iterator<Item = &'static Task> {
    TASKS.iter().filter(move |t| t.kind == kind)
}

/// Task id → completion time (epoch ms)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskLog {
    completed: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskToggle {
    /// Marked done; total XP awarded including the completion bonus
    Completed { xp: i64 },
    /// Marked not done; XP already granted is kept
    Uncompleted,
}

impl TaskLog {
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        load_or_default(storage, TASKS_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, storage: &S) -> bool {
        save_best_effort(storage, TASKS_KEY, self)
    }

    pub fn completed_at(&self, task_id: &str) -> Option<i64> {
        self.completed.get(task_id).copied()
    }

    /// Daily tasks are done on the day they were completed, weekly ones for
    /// seven days after.
    pub fn is_done<C: Clock + ?Sized>(&self, task: &Task, clock: &C) -> bool {
        let Some(at) = self.completed_at(task.id) else {
            return false;
        };
        match task.kind {
            TaskKind::Daily => {
                let day = clock.day_of(at);
                day.is_some() && day == clock.today()
            }
            TaskKind::Weekly => at > clock.now_ms() - WEEKLY_WINDOW_MS,
        }
    }

    pub fn done_count<C: Clock + ?Sized>(&self, kind: TaskKind, clock: &C) -> usize {
        tasks_of(kind).filter(|t| self.is_done(t, clock)).count()
    }
}

/// Flip a task between done and not done, persisting the log.
pub fn toggle<S: KeyValueStore, C: Clock>(
    store: &mut ProgressStore<S, C>,
    task: &Task,
) -> TaskToggle {
    let mut log = TaskLog::load(store.storage());

    if log.is_done(task, store.clock()) {
        log.completed.remove(task.id);
        log.save(store.storage());
        debug!("Task {} marked not done", task.id);
        return TaskToggle::Uncompleted;
    }

    log.completed
        .insert(task.id.to_string(), store.clock().now_ms());
    log.save(store.storage());

    let before = store.progress().xp();
    store.complete_task();
    store.add_xp(task.xp);
    TaskToggle::Completed {
        xp: store.progress().xp() - before,
    }
}
