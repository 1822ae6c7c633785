// File: ./src/model/mod.rs
pub mod item;
pub mod kind;
pub mod priority;

pub use item::{DATE_FORMAT, Task, TaskRecord, parse_due_date};
pub use kind::TaskKind;
pub use priority::{CustomLabel, Priority};
