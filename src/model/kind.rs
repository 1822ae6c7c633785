// File: ./src/model/kind.rs
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Category of a task. Only the notification wording depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum TaskKind {
    #[default]
    Generic,
    Exam,
    Project,
    QuickTask,
}

impl TaskKind {
    /// Tag written to the `type` field of a task record.
    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::Generic => "Tarea",
            TaskKind::Exam => "Examen",
            TaskKind::Project => "Proyecto",
            TaskKind::QuickTask => "TareaRapida",
        }
    }

    /// Resolves a record tag. Unknown tags fall back to `Generic`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Examen" => TaskKind::Exam,
            "Proyecto" => TaskKind::Project,
            "TareaRapida" => TaskKind::QuickTask,
            _ => TaskKind::Generic,
        }
    }

    /// Kinds offered when adding a task, in menu order (1-based).
    pub fn selectable() -> Vec<TaskKind> {
        TaskKind::iter().filter(|k| *k != TaskKind::Generic).collect()
    }

    /// Maps a 1-based menu choice to a selectable kind.
    pub fn from_choice(choice: &str) -> Option<TaskKind> {
        let n: usize = choice.trim().parse().ok()?;
        Self::selectable().get(n.checked_sub(1)?).copied()
    }

    pub fn notification(&self, title: &str, due: &str) -> String {
        match self {
            TaskKind::Generic => format!("General task: {} — due {}", title, due),
            TaskKind::Exam => format!("Exam: {} — study before {}", title, due),
            TaskKind::Project => format!("Project: {} — deliver by {}", title, due),
            TaskKind::QuickTask => format!("Quick task: {} — do before {}", title, due),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Generic => write!(f, "Task"),
            TaskKind::Exam => write!(f, "Exam"),
            TaskKind::Project => write!(f, "Project"),
            TaskKind::QuickTask => write!(f, "Quick task"),
        }
    }
}
