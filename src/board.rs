use serde::{Deserialize, Serialize};

use crate::task::Task;

/// The four fixed columns, in board order. `Done` is the terminal column:
/// membership there is what "completed" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 4] = [
        ColumnId::Backlog,
        ColumnId::Todo,
        ColumnId::InProgress,
        ColumnId::Done,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ColumnId::Backlog => "Backlog",
            ColumnId::Todo => "To-Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ColumnId::Done)
    }

    /// Column after this one, for the keyboard move gesture.
    pub fn next(self) -> Option<ColumnId> {
        match self {
            ColumnId::Backlog => Some(ColumnId::Todo),
            ColumnId::Todo => Some(ColumnId::InProgress),
            ColumnId::InProgress => Some(ColumnId::Done),
            ColumnId::Done => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ColumnId::Backlog => 0,
            ColumnId::Todo => 1,
            ColumnId::InProgress => 2,
            ColumnId::Done => 3,
        }
    }
}

/// The serializable board: one ordered task list per column. This is also
/// the snapshot shape persisted to disk; the JSON keys are the column
/// element ids of the snapshot format and stay stable across releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "backlog-column", default)]
    pub backlog: Vec<Task>,
    #[serde(rename = "todo-column", default)]
    pub todo: Vec<Task>,
    #[serde(rename = "progress-column", default)]
    pub in_progress: Vec<Task>,
    #[serde(rename = "done-column", default)]
    pub done: Vec<Task>,
}

impl Board {
    pub fn column(&self, id: ColumnId) -> &Vec<Task> {
        match id {
            ColumnId::Backlog => &self.backlog,
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut Vec<Task> {
        match id {
            ColumnId::Backlog => &mut self.backlog,
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }

    pub fn count(&self, id: ColumnId) -> usize {
        self.column(id).len()
    }

    pub fn total(&self) -> usize {
        ColumnId::ALL.iter().map(|&id| self.count(id)).sum()
    }
}
