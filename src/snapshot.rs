//! Converts between the live card views and the serializable board.
//!
//! Extraction reads tasks back out of rendered cards: priority from the
//! structural accent, the due date by stripping the `"Due: "` prefix, and
//! tags from every badge after the first (the first slot is reserved for
//! the priority badge). Hydration is the inverse and re-attaches the drag
//! capability, since rebuilding a card discards it.

use crate::board::{Board, ColumnId};
use crate::task::{Task, TaskId};
use crate::view::{BoardView, CardView, DUE_PREFIX};

fn read_card(card: &CardView) -> Task {
    // A footer without the fixed prefix yields an empty date rather than
    // garbage; extraction is lossy for anything the card cannot encode.
    let due_date = card
        .due_label
        .strip_prefix(DUE_PREFIX)
        .unwrap_or("")
        .to_string();
    let tags = card
        .badges
        .iter()
        .skip(1)
        .map(|badge| badge.label.clone())
        .collect();
    Task {
        id: card.id,
        title: card.title.clone(),
        description: card.description.clone(),
        priority: card.accent,
        due_date,
        tags,
    }
}

/// Walks every column in visual order and reads the board back out of the
/// presentation.
pub fn extract(view: &BoardView) -> Board {
    let mut board = Board::default();
    for id in ColumnId::ALL {
        *board.column_mut(id) = view.column(id).cards.iter().map(read_card).collect();
    }
    board
}

/// Clears each column and rebuilds one card per task in snapshot order.
/// Records persisted before ids existed come back as `TaskId::UNASSIGNED`
/// and are renumbered here so every live card has a usable identity.
pub fn hydrate(view: &mut BoardView, board: &Board) {
    let mut next_id = ColumnId::ALL
        .iter()
        .flat_map(|&id| board.column(id))
        .map(|task| task.id.0)
        .max()
        .unwrap_or(0)
        + 1;
    for id in ColumnId::ALL {
        let cards = board
            .column(id)
            .iter()
            .map(|task| {
                let mut task = task.clone();
                if task.id == TaskId::UNASSIGNED {
                    task.id = TaskId(next_id);
                    next_id += 1;
                }
                CardView::from_task(&task)
            })
            .collect();
        view.column_mut(id).cards = cards;
    }
}
