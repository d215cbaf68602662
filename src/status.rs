//! Recomputes derived board state after any structural change: the
//! completion decoration on every card and the per-column plus aggregate
//! counts. Always a full sweep over the current columns, never an
//! incremental patch, so a card that moved through an intermediate column
//! mid-gesture still ends up decorated correctly.

use crate::board::ColumnId;
use crate::view::BoardView;

/// Counts derived from column membership alone. Computed fresh on every
/// call; nothing here is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub per_column: [usize; 4],
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

pub fn compute_stats(view: &BoardView) -> BoardStats {
    let per_column = [
        view.column(ColumnId::Backlog).cards.len(),
        view.column(ColumnId::Todo).cards.len(),
        view.column(ColumnId::InProgress).cards.len(),
        view.column(ColumnId::Done).cards.len(),
    ];
    BoardStats {
        per_column,
        total: per_column.iter().sum(),
        completed: per_column[ColumnId::Done.index()],
        in_progress: per_column[ColumnId::InProgress.index()],
    }
}

fn apply_completion(view: &mut BoardView) {
    for column in &mut view.columns {
        let completed = column.id.is_terminal();
        for card in &mut column.cards {
            card.completed = completed;
        }
    }
}

/// Re-derives decoration and counts and writes them into the view.
/// Decoration runs first; both finish before the caller persists anything.
pub fn refresh(view: &mut BoardView) -> BoardStats {
    apply_completion(view);
    let stats = compute_stats(view);
    for id in ColumnId::ALL {
        view.column_mut(id).count_badge = stats.per_column[id.index()];
    }
    view.set_stat(0, stats.total);
    view.set_stat(1, stats.completed);
    view.set_stat(2, stats.in_progress);
    stats
}
