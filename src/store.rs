// File: src/store.rs
use crate::error::{TaskError, TaskResult};
use crate::model::Task;
use chrono::NaiveDateTime;

pub const DEFAULT_ALERT_WINDOW_DAYS: i64 = 2;

/// In-memory, insertion-ordered task collection.
///
/// Tasks are only ever appended or have their completion flag changed.
/// A load swaps the whole list at once through [`TaskStore::replace`].
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    generation: u64,
}

/// Pending tasks as they were shown to the user.
///
/// Display index `i` addresses `positions[i]` in the store. The listing is
/// tied to the store generation it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingList {
    positions: Vec<usize>,
    generation: u64,
}

impl PendingList {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Store position behind a display index.
    pub fn position(&self, display_index: usize) -> Option<usize> {
        self.positions.get(display_index).copied()
    }

    /// Iterates `(display_index, task)` pairs in display order.
    pub fn iter<'a>(
        &'a self,
        store: &'a TaskStore,
    ) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.positions
            .iter()
            .enumerate()
            .filter_map(move |(i, pos)| store.get(*pos).map(|t| (i, t)))
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            generation: 0,
        }
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swaps in a fully built task list. Earlier pending listings become stale.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.generation += 1;
    }

    /// Not-completed tasks, earliest due date first. Equal dates keep insertion order.
    pub fn list_pending(&self) -> PendingList {
        let mut positions: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_completed())
            .map(|(i, _)| i)
            .collect();
        // sort_by_key is stable
        positions.sort_by_key(|&i| self.tasks[i].due_date());
        PendingList {
            positions,
            generation: self.generation,
        }
    }

    /// Marks the task shown at `raw_index` in `pending` as completed.
    ///
    /// The store is left untouched on any error.
    pub fn mark_completed(
        &mut self,
        pending: &PendingList,
        raw_index: &str,
    ) -> TaskResult<&Task> {
        let trimmed = raw_index.trim();
        let index: i64 = trimmed
            .parse()
            .map_err(|_| TaskError::InvalidInput(trimmed.to_string()))?;

        if pending.generation != self.generation {
            return Err(TaskError::StaleListing);
        }

        let position = usize::try_from(index)
            .ok()
            .and_then(|i| pending.position(i))
            .ok_or(TaskError::IndexOutOfRange {
                index,
                len: pending.len(),
            })?;

        let task = self.tasks.get_mut(position).ok_or(TaskError::StaleListing)?;
        task.set_completed(true);
        Ok(task)
    }

    /// Pending tasks due within `window_days` calendar days of `reference`.
    ///
    /// Days are counted between calendar dates, so a task due on the
    /// reference day is `0` regardless of the time of day. Overdue tasks
    /// are excluded. Results follow store order.
    pub fn due_soon(&self, reference: NaiveDateTime, window_days: i64) -> Vec<(&Task, i64)> {
        let today = reference.date();
        self.tasks
            .iter()
            .filter(|t| !t.is_completed())
            .filter_map(|t| {
                let days = t.due_date().signed_duration_since(today).num_days();
                (0..=window_days).contains(&days).then_some((t, days))
            })
            .collect()
    }
}
