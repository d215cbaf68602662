use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable opaque identifier assigned when a task is created. Snapshots
/// written before ids existed carry none; those records deserialize as
/// `TaskId::UNASSIGNED` and get a fresh id on hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    pub const UNASSIGNED: TaskId = TaskId(0);

    fn unassigned() -> TaskId {
        TaskId::UNASSIGNED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Badge text shown in the first slot of a card's badge row.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "TaskId::unassigned")]
    pub id: TaskId,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub priority: Priority,
    #[serde(rename = "date")]
    pub due_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// What the creation form hands over on submission. Only presence is
/// validated; field edits are out of scope.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub due_date: String,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// A draft is complete when title, description, priority and date are
    /// all present. Tags are optional.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.priority.is_some()
            && !self.due_date.trim().is_empty()
    }
}

/// Formats a `YYYY-MM-DD` form date as e.g. `Jan 1, 2024`. Anything that
/// does not parse is kept verbatim; presence is the only validation done.
pub fn format_due_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}
