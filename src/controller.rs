use crate::board::ColumnId;
use crate::drag::drop_position;
use crate::snapshot;
use crate::status;
use crate::store::{KeyValueStore, PersistError, PersistenceGateway};
use crate::task::{format_due_date, Task, TaskDraft, TaskId};
use crate::view::{BoardView, CardView};

/// Owns the live board and wires gestures to the drop-position engine, the
/// status deriver and the persistence gateway. Orchestration only; the
/// components it calls hold the actual logic.
pub struct BoardController<S: KeyValueStore> {
    pub view: BoardView,
    gateway: PersistenceGateway<S>,
    drag: Option<TaskId>,
}

impl<S: KeyValueStore> BoardController<S> {
    pub fn new(gateway: PersistenceGateway<S>) -> BoardController<S> {
        BoardController {
            view: BoardView::new(),
            gateway,
            drag: None,
        }
    }

    /// Page-load path: restore the saved board if there is one, leave the
    /// seeded view alone otherwise, then re-derive decoration and counts.
    /// A malformed payload propagates; it is never swapped for defaults.
    pub fn restore(&mut self) -> Result<(), PersistError> {
        if let Some(board) = self.gateway.load()? {
            snapshot::hydrate(&mut self.view, &board);
        }
        status::refresh(&mut self.view);
        self.persist()
    }

    /// Form submission. Incomplete drafts are a silent no-op: no task, no
    /// state change, no save. Complete drafts land at the head of Backlog.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<bool, PersistError> {
        if !draft.is_complete() {
            return Ok(false);
        }
        let Some(priority) = draft.priority else {
            return Ok(false);
        };
        let task = Task {
            id: self.alloc_id(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            priority,
            due_date: format_due_date(&draft.due_date),
            tags: draft.tags,
        };
        self.view
            .column_mut(ColumnId::Backlog)
            .cards
            .insert(0, CardView::from_task(&task));
        status::refresh(&mut self.view);
        self.persist()?;
        Ok(true)
    }

    pub fn begin_drag(&mut self, column: ColumnId, index: usize) {
        if let Some(card) = self.view.column(column).cards.get(index) {
            if card.draggable {
                self.drag = Some(card.id);
            }
        }
    }

    pub fn dragging(&self) -> Option<TaskId> {
        self.drag
    }

    /// Continuous drag-over handling: recompute the drop position against
    /// the hovered column's current geometry and relocate the card live.
    /// Deliberately does not re-derive or persist; that happens on drop.
    pub fn drag_over(&mut self, column: ColumnId, pointer_y: f64) {
        let Some(id) = self.drag else {
            return;
        };
        let candidates = self.view.column(column).geometries_excluding(Some(id));
        let position = drop_position(&candidates, pointer_y);
        self.view.relocate(id, column, position);
    }

    /// Drop completion. Runs after the final drag-over has settled the
    /// card visually: re-derive, extract, save, in that order.
    pub fn complete_drop(&mut self) -> Result<(), PersistError> {
        if self.drag.take().is_none() {
            return Ok(());
        }
        status::refresh(&mut self.view);
        self.persist()
    }

    /// Keyboard move: append the card to the end of `target` and treat it
    /// like a completed drop.
    pub fn move_card(
        &mut self,
        source: ColumnId,
        index: usize,
        target: ColumnId,
    ) -> Result<(), PersistError> {
        let Some(card) = self.view.column(source).cards.get(index) else {
            return Ok(());
        };
        let id = card.id;
        self.view.relocate(id, target, None);
        status::refresh(&mut self.view);
        self.persist()
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let board = snapshot::extract(&self.view);
        self.gateway.save(&board)
    }

    fn alloc_id(&self) -> TaskId {
        let max = self
            .view
            .columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .map(|card| card.id.0)
            .max()
            .unwrap_or(0);
        TaskId(max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::task::Priority;
    use proptest::prelude::*;

    fn controller() -> BoardController<MemoryStore> {
        BoardController::new(PersistenceGateway::new(MemoryStore::default()))
    }

    fn fix_bug_draft() -> TaskDraft {
        TaskDraft {
            title: "Fix bug".to_string(),
            description: "Crash on load".to_string(),
            priority: Some(Priority::High),
            due_date: "2024-01-01".to_string(),
            tags: vec!["Backend".to_string()],
        }
    }

    #[test]
    fn created_task_lands_at_the_head_of_backlog() {
        let mut board = controller();
        board
            .create_task(TaskDraft {
                title: "Older".to_string(),
                ..fix_bug_draft()
            })
            .unwrap();
        board.create_task(fix_bug_draft()).unwrap();

        let titles: Vec<&str> = board
            .view
            .column(ColumnId::Backlog)
            .cards
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Fix bug", "Older"]);
    }

    #[test]
    fn incomplete_draft_changes_nothing_and_saves_nothing() {
        let mut board = controller();
        let created = board
            .create_task(TaskDraft {
                title: String::new(),
                ..fix_bug_draft()
            })
            .unwrap();

        assert!(!created);
        assert!(board.view.column(ColumnId::Backlog).cards.is_empty());
        let fresh = controller();
        assert_eq!(board.view, fresh.view);
    }

    #[test]
    fn create_then_drag_to_done_scenario() {
        let mut board = controller();
        assert!(board.create_task(fix_bug_draft()).unwrap());
        assert_eq!(board.view.column(ColumnId::Backlog).count_badge, 1);
        assert_eq!(board.view.stat_boxes[0].value, 1);
        assert_eq!(board.view.stat_boxes[1].value, 0);
        assert_eq!(
            board.view.column(ColumnId::Backlog).cards[0].due_label,
            "Due: Jan 1, 2024"
        );

        board.begin_drag(ColumnId::Backlog, 0);
        board.drag_over(ColumnId::Done, 0.0);
        board.complete_drop().unwrap();

        assert_eq!(board.view.column(ColumnId::Backlog).count_badge, 0);
        assert_eq!(board.view.column(ColumnId::Done).count_badge, 1);
        assert_eq!(board.view.stat_boxes[1].value, 1);
        assert!(board.view.column(ColumnId::Done).cards[0].completed);
    }

    #[test]
    fn drag_over_relocates_live_but_does_not_persist() {
        let mut board = controller();
        board.create_task(fix_bug_draft()).unwrap();

        board.begin_drag(ColumnId::Backlog, 0);
        board.drag_over(ColumnId::InProgress, 0.0);

        // The card has visibly moved...
        assert_eq!(board.view.column(ColumnId::InProgress).cards.len(), 1);
        // ...but the saved snapshot still has it in Backlog.
        let saved = board.gateway.load().unwrap().unwrap();
        assert_eq!(saved.backlog.len(), 1);
        assert!(saved.in_progress.is_empty());

        board.complete_drop().unwrap();
        let saved = board.gateway.load().unwrap().unwrap();
        assert!(saved.backlog.is_empty());
        assert_eq!(saved.in_progress.len(), 1);
    }

    #[test]
    fn same_column_drag_waits_for_the_rendered_center() {
        let mut board = controller();
        for title in ["third", "second", "first"] {
            board
                .create_task(TaskDraft {
                    title: title.to_string(),
                    ..fix_bug_draft()
                })
                .unwrap();
        }
        // Cards render at rows 0-3, 4-7 and 8-11; the second card's
        // rendered center is row 6.
        board.begin_drag(ColumnId::Backlog, 0);

        let order = |board: &BoardController<MemoryStore>| -> Vec<String> {
            board
                .view
                .column(ColumnId::Backlog)
                .cards
                .iter()
                .map(|c| c.title.clone())
                .collect()
        };

        // Pointer still above the second card's center: no reorder yet.
        board.drag_over(ColumnId::Backlog, 5.0);
        assert_eq!(order(&board), vec!["first", "second", "third"]);

        // Past the center: the dragged card swaps below its neighbor.
        board.drag_over(ColumnId::Backlog, 7.0);
        assert_eq!(order(&board), vec!["second", "first", "third"]);

        // Below every center: it falls to the end of the column.
        board.drag_over(ColumnId::Backlog, 11.0);
        board.complete_drop().unwrap();
        assert_eq!(order(&board), vec!["second", "third", "first"]);
    }

    #[test]
    fn drop_without_a_drag_in_flight_is_a_no_op() {
        let mut board = controller();
        board.complete_drop().unwrap();
        assert!(board.gateway.load().unwrap().is_none());
    }

    #[test]
    fn restore_hydrates_and_rederives() {
        let mut first = controller();
        first.create_task(fix_bug_draft()).unwrap();
        first.move_card(ColumnId::Backlog, 0, ColumnId::Done).unwrap();
        let saved = first.gateway.load().unwrap().unwrap();

        let mut second = controller();
        second.gateway.save(&saved).unwrap();
        second.restore().unwrap();

        assert_eq!(second.view.column(ColumnId::Done).cards.len(), 1);
        assert!(second.view.column(ColumnId::Done).cards[0].completed);
        assert_eq!(second.view.stat_boxes[1].value, 1);
    }

    #[test]
    fn restore_with_nothing_saved_keeps_the_seeded_view() {
        let mut board = controller();
        board.restore().unwrap();
        assert_eq!(board.view.stat_boxes[0].value, 0);
        assert!(board.view.column(ColumnId::Backlog).cards.is_empty());
    }

    #[test]
    fn restore_surfaces_a_malformed_snapshot() {
        let mut store = MemoryStore::default();
        use crate::store::{KeyValueStore as _, STORAGE_KEY};
        store.set(STORAGE_KEY, "not a board".to_string()).unwrap();
        let mut board = BoardController::new(PersistenceGateway::new(store));
        assert!(matches!(
            board.restore(),
            Err(PersistError::Malformed(_))
        ));
    }

    proptest! {
        // Any sequence of drags keeps every task in exactly one column and
        // conserves the total count.
        #[test]
        fn prop_moves_conserve_membership(
            moves in prop::collection::vec((0usize..4, 0usize..6, 0.0f64..40.0), 0..25)
        ) {
            let mut board = controller();
            for i in 0..5u64 {
                board.create_task(TaskDraft {
                    title: format!("task {i}"),
                    ..fix_bug_draft()
                }).unwrap();
            }

            for (target, index, pointer_y) in moves {
                let target = ColumnId::ALL[target];
                // Pick whichever column currently has a card at `index`.
                let source = ColumnId::ALL
                    .iter()
                    .copied()
                    .find(|&c| index < board.view.column(c).cards.len());
                let Some(source) = source else { continue };
                board.begin_drag(source, index);
                board.drag_over(target, pointer_y);
                board.complete_drop().unwrap();

                let stats = crate::status::compute_stats(&board.view);
                prop_assert_eq!(stats.total, 5);
                for id in 1..=5u64 {
                    let occurrences = board.view.columns.iter()
                        .flat_map(|c| c.cards.iter())
                        .filter(|card| card.id == TaskId(id))
                        .count();
                    prop_assert_eq!(occurrences, 1);
                }
            }
        }
    }
}
