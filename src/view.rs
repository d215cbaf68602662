use ratatui::style::Color;

use crate::board::ColumnId;
use crate::drag::CardGeometry;
use crate::task::{Priority, Task, TaskId};

/// Fixed prefix of the due-date footer label; the codec strips it back off
/// during extraction.
pub const DUE_PREFIX: &str = "Due: ";

/// Accent color for a card's priority marker and badge.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

/// Badge color for a tag. Tags outside the known set fall back to gray.
pub fn tag_color(tag: &str) -> Color {
    match tag {
        "Frontend" => Color::Magenta,
        "Backend" => Color::Blue,
        "Meeting" => Color::LightMagenta,
        "Discussion" => Color::Gray,
        _ => Color::Gray,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub color: Color,
}

/// One task as rendered: the card stores display text, not the record it
/// came from. The codec re-reads the record out of these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Structural priority marker (the card's left accent). Extraction
    /// decodes priority from this, never from badge text.
    pub accent: Priority,
    /// Badge row. The first badge is always the priority badge; every
    /// badge after it is a tag.
    pub badges: Vec<Badge>,
    /// Footer label, `"Due: <date>"`.
    pub due_label: String,
    /// Completion decoration, owned by the status deriver.
    pub completed: bool,
    /// Rebuilt cards must have the drag capability re-attached; hydrate
    /// sets this back to true.
    pub draggable: bool,
}

impl CardView {
    pub fn from_task(task: &Task) -> CardView {
        let mut badges = vec![Badge {
            label: task.priority.label().to_string(),
            color: priority_color(task.priority),
        }];
        badges.extend(task.tags.iter().map(|tag| Badge {
            label: tag.clone(),
            color: tag_color(tag),
        }));
        CardView {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            accent: task.priority,
            badges,
            due_label: format!("{DUE_PREFIX}{}", task.due_date),
            completed: false,
            draggable: true,
        }
    }

    /// Rendered height in rows: title/badge row, description, footer, and
    /// one spacing row.
    pub fn height(&self) -> usize {
        4
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub cards: Vec<CardView>,
    /// Count shown in the column header, written by the status deriver.
    pub count_badge: usize,
}

impl ColumnView {
    fn new(id: ColumnId) -> ColumnView {
        ColumnView {
            id,
            cards: Vec::new(),
            count_badge: 0,
        }
    }

    /// Positions and heights of this column's cards as stacked top to
    /// bottom, excluding the card being dragged. This is what the drop
    /// position computation runs against. The dragged card emits no
    /// candidate but still occupies its rows on screen, so its height
    /// still advances the positions of everything below it.
    pub fn geometries_excluding(&self, dragged: Option<TaskId>) -> Vec<CardGeometry> {
        let mut top = 0.0;
        let mut out = Vec::with_capacity(self.cards.len());
        for card in &self.cards {
            let height = card.height() as f64;
            if Some(card.id) != dragged {
                out.push(CardGeometry::new(top, height));
            }
            top += height;
        }
        out
    }
}

/// Summary figure shown above the board. Stat boxes are addressed by
/// position; writing to a missing box is skipped, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBox {
    pub label: &'static str,
    pub value: usize,
}

/// The live presentation: four column views plus the stat box row. All
/// structural mutation (create, drag, hydrate) goes through this.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub columns: [ColumnView; 4],
    pub stat_boxes: Vec<StatBox>,
}

impl Default for BoardView {
    fn default() -> Self {
        BoardView::new()
    }
}

impl BoardView {
    pub fn new() -> BoardView {
        BoardView {
            columns: [
                ColumnView::new(ColumnId::Backlog),
                ColumnView::new(ColumnId::Todo),
                ColumnView::new(ColumnId::InProgress),
                ColumnView::new(ColumnId::Done),
            ],
            stat_boxes: vec![
                StatBox { label: "Total Tasks", value: 0 },
                StatBox { label: "Completed", value: 0 },
                StatBox { label: "In Progress", value: 0 },
            ],
        }
    }

    pub fn column(&self, id: ColumnId) -> &ColumnView {
        &self.columns[id.index()]
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut ColumnView {
        &mut self.columns[id.index()]
    }

    /// Locates a card by id. Linear scan; the board is small by
    /// construction.
    pub fn find_card(&self, id: TaskId) -> Option<(ColumnId, usize)> {
        for column in &self.columns {
            if let Some(index) = column.cards.iter().position(|c| c.id == id) {
                return Some((column.id, index));
            }
        }
        None
    }

    /// Moves a card to `position` within `target` in one step: the card is
    /// never in two columns, and never in none. `None` appends at the end.
    pub fn relocate(&mut self, id: TaskId, target: ColumnId, position: Option<usize>) {
        let Some((source, index)) = self.find_card(id) else {
            return;
        };
        let card = self.column_mut(source).cards.remove(index);
        let cards = &mut self.column_mut(target).cards;
        match position {
            Some(at) if at <= cards.len() => cards.insert(at, card),
            _ => cards.push(card),
        }
    }

    /// Writes a stat box by position, skipping silently when the box does
    /// not exist.
    pub fn set_stat(&mut self, index: usize, value: usize) {
        if let Some(stat) = self.stat_boxes.get_mut(index) {
            stat.value = value;
        }
    }
}
