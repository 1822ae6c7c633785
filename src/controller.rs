// File: src/controller.rs
//! Menu controller: the read-dispatch loop around the task store.
//!
//! The controller owns the store and the last pending listing shown to the
//! user. It talks to any line-based `BufRead`/`Write` pair so the binary can
//! hand it stdin/stdout and tests can hand it in-memory buffers.
use crate::config::Config;
use crate::error::TaskError;
use crate::model::{Priority, Task, TaskKind};
use crate::storage::LocalStorage;
use crate::store::{PendingList, TaskStore};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Source of the reference time for due-soon alerts.
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    List,
    Complete,
    Alert,
    Save,
    Load,
    Exit,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Complete),
            "4" => Some(Self::Alert),
            "5" => Some(Self::Save),
            "6" => Some(Self::Load),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct TaskController<R: BufRead, W: Write> {
    store: TaskStore,
    task_file: PathBuf,
    alert_window_days: i64,
    strict_priority: bool,
    last_pending: Option<PendingList>,
    clock: Clock,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TaskController<R, W> {
    pub fn new(
        store: TaskStore,
        task_file: PathBuf,
        config: &Config,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            task_file,
            alert_window_days: config.alert_window_days,
            strict_priority: config.strict_priority,
            last_pending: None,
            clock: Box::new(|| Local::now().naive_local()),
            input,
            output,
        }
    }

    /// Replaces the clock used for due-soon alerts.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn last_pending(&self) -> Option<&PendingList> {
        self.last_pending.as_ref()
    }

    pub fn into_parts(self) -> (TaskStore, W) {
        (self.store, self.output)
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// Task errors are reported and the loop continues; only console I/O
    /// failures are returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Select an option: ")? else {
                writeln!(self.output)?;
                self.exit_message()?;
                return Ok(());
            };
            let Some(command) = MenuCommand::parse(&line) else {
                writeln!(self.output, "Invalid option.")?;
                continue;
            };
            if !self.execute(command)? {
                return Ok(());
            }
        }
    }

    /// Executes one command. Returns `false` once the loop should stop.
    pub fn execute(&mut self, command: MenuCommand) -> Result<bool> {
        let result = match command {
            MenuCommand::Add => self.add_task(),
            MenuCommand::List => self.list_tasks(),
            MenuCommand::Complete => self.complete_task(),
            MenuCommand::Alert => self.alert_tasks(),
            MenuCommand::Save => self.save_tasks(),
            MenuCommand::Load => self.load_tasks(),
            MenuCommand::Exit => {
                self.exit_message()?;
                return Ok(false);
            }
        };

        if let Err(e) = result {
            let task_err = e.downcast::<TaskError>()?;
            log::warn!("{:?} failed: {}", command, task_err);
            writeln!(self.output, "Error: {}", task_err)?;
        }
        Ok(true)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Academic Task Manager")?;
        writeln!(self.output, "1. Add new task")?;
        writeln!(self.output, "2. List pending tasks")?;
        writeln!(self.output, "3. Mark task as completed")?;
        writeln!(self.output, "4. Show tasks due soon")?;
        writeln!(self.output, "5. Save tasks to file")?;
        writeln!(self.output, "6. Load tasks from file")?;
        writeln!(self.output, "0. Exit")?;
        Ok(())
    }

    fn exit_message(&mut self) -> Result<()> {
        writeln!(self.output, "Program finished.")?;
        Ok(())
    }

    /// Prints `label` and reads one line without its terminator.
    /// `None` means input has ended.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn add_task(&mut self) -> Result<()> {
        writeln!(self.output, "Task types:")?;
        for (i, kind) in TaskKind::selectable().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, kind)?;
        }
        let Some(choice) = self.prompt("Select the task type (1-3): ")? else {
            return Ok(());
        };
        let kind = TaskKind::from_choice(&choice).ok_or_else(|| {
            TaskError::InvalidSelection(format!("task type '{}'", choice.trim()))
        })?;

        let Some(title) = self.prompt("Title: ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(());
        };
        let Some(due) = self.prompt("Due date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(priority) = self.prompt("Priority (High/Medium/Low): ")? else {
            return Ok(());
        };

        let priority = Priority::parse(&priority);
        if self.strict_priority && priority.is_custom() {
            return Err(TaskError::InvalidSelection(format!("priority '{}'", priority)).into());
        }

        let task = Task::new(&title, &description, due.trim(), priority, kind)?;
        log::info!("Added {:?} '{}' due {}", task.kind(), task.title(), task.due_date());
        self.store.add(task);
        self.last_pending = None;
        writeln!(self.output, "Task added.")?;
        Ok(())
    }

    /// Prints the pending tasks with their display indexes and keeps the
    /// listing for a following completion.
    fn list_tasks(&mut self) -> Result<()> {
        let pending = self.store.list_pending();
        if pending.is_empty() {
            writeln!(self.output, "No pending tasks.")?;
        }
        for (i, task) in pending.iter(&self.store) {
            writeln!(
                self.output,
                "[{}] {} - Priority: {}",
                i,
                task.notify(),
                task.priority()
            )?;
        }
        self.last_pending = Some(pending);
        Ok(())
    }

    /// Shows the pending listing, then completes the entry the user picks
    /// from it. A successful completion retires the listing.
    fn complete_task(&mut self) -> Result<()> {
        self.list_tasks()?;
        let Some(pending) = self.last_pending.clone().filter(|p| !p.is_empty()) else {
            return Ok(());
        };
        let Some(raw) = self.prompt("Enter the number of the completed task: ")? else {
            return Ok(());
        };
        let task = self.store.mark_completed(&pending, &raw)?;
        log::info!("Completed '{}'", task.title());
        writeln!(self.output, "Task marked as completed: {}", task.title())?;
        self.last_pending = None;
        Ok(())
    }

    fn alert_tasks(&mut self) -> Result<()> {
        let reference = (self.clock)();
        let due = self.store.due_soon(reference, self.alert_window_days);
        if due.is_empty() {
            writeln!(self.output, "No tasks due soon.")?;
        }
        for (task, days) in due {
            writeln!(self.output, "Alert: {} ({} days left)", task.notify(), days)?;
        }
        Ok(())
    }

    fn save_tasks(&mut self) -> Result<()> {
        let count = LocalStorage::save(&self.store, &self.task_file)?;
        writeln!(
            self.output,
            "Saved {} task(s) to {}.",
            count,
            self.task_file.display()
        )?;
        Ok(())
    }

    fn load_tasks(&mut self) -> Result<()> {
        let count = LocalStorage::load_into(&mut self.store, &self.task_file)?;
        self.last_pending = None;
        writeln!(
            self.output,
            "Loaded {} task(s) from {}.",
            count,
            self.task_file.display()
        )?;
        Ok(())
    }
}
