use crate::board::ColumnId;
use crate::controller::BoardController;
use crate::store::{KeyValueStore, PersistError};
use crate::task::{Priority, TaskDraft};
use crate::view::{priority_color, BoardView, CardView, ColumnView};
use crossterm::{
    event::{self, Event, KeyCode, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};
use std::io;

#[derive(Debug, Default)]
struct Selection {
    column: usize,
    card: usize,
}

pub fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    board: &mut BoardController<S>,
) -> Result<(), PersistError> {
    let mut selection = Selection::default();
    let mut columns_area = Rect::default();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(3), Constraint::Min(0)])
                .split(f.area());
            columns_area = chunks[1];

            draw_stat_boxes(f, chunks[0], &board.view);
            let rects = column_rects(columns_area);
            for (i, id) in ColumnId::ALL.iter().enumerate() {
                draw_column(f, rects[i], board, *id, &selection, i);
            }
        })?;

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('a') => {
                    // Add a new task
                    if let Some(draft) = prompt_draft() {
                        board.create_task(draft)?;
                    }
                }
                KeyCode::Left => {
                    if selection.column > 0 {
                        selection.column -= 1;
                        selection.card = 0;
                    }
                }
                KeyCode::Right => {
                    if selection.column < ColumnId::ALL.len() - 1 {
                        selection.column += 1;
                        selection.card = 0;
                    }
                }
                KeyCode::Up => {
                    if selection.card > 0 {
                        selection.card -= 1;
                    }
                }
                KeyCode::Down => {
                    let cards = board.view.columns[selection.column].cards.len();
                    if cards > 0 && selection.card < cards - 1 {
                        selection.card += 1;
                    }
                }
                KeyCode::Enter => {
                    // Move the selected card to the next column
                    let source = ColumnId::ALL[selection.column];
                    if let Some(target) = source.next() {
                        board.move_card(source, selection.card, target)?;
                        if selection.card >= board.view.column(source).cards.len()
                            && selection.card > 0
                        {
                            selection.card -= 1;
                        }
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse(board, columns_area, mouse)?,
            _ => {}
        }
    }
}

fn handle_mouse<S: KeyValueStore>(
    board: &mut BoardController<S>,
    columns_area: Rect,
    mouse: MouseEvent,
) -> Result<(), PersistError> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((column, pointer_y)) = hit_column(columns_area, mouse.column, mouse.row) {
                if let Some(index) = card_at(board.view.column(column), pointer_y) {
                    board.begin_drag(column, index);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            // Continuous: recompute the drop position on every move.
            if let Some((column, pointer_y)) = hit_column(columns_area, mouse.column, mouse.row) {
                board.drag_over(column, pointer_y as f64);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            board.complete_drop()?;
        }
        _ => {}
    }
    Ok(())
}

fn column_rects(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area)
        .to_vec()
}

/// Maps a terminal position to the column under it and the pointer's row
/// relative to the top of that column's card area.
fn hit_column(columns_area: Rect, x: u16, y: u16) -> Option<(ColumnId, usize)> {
    let rects = column_rects(columns_area);
    for (i, rect) in rects.iter().enumerate() {
        // Inside the block border
        let inner_top = rect.y + 1;
        if x >= rect.x && x < rect.x + rect.width && y >= inner_top {
            return Some((ColumnId::ALL[i], (y - inner_top) as usize));
        }
    }
    None
}

/// Index of the card covering `pointer_y`, walking the stacked card
/// heights the same way the drop geometry does.
fn card_at(column: &ColumnView, pointer_y: usize) -> Option<usize> {
    let mut top = 0;
    for (index, card) in column.cards.iter().enumerate() {
        if pointer_y < top + card.height() {
            return Some(index);
        }
        top += card.height();
    }
    None
}

fn draw_stat_boxes(f: &mut ratatui::Frame, area: Rect, view: &BoardView) {
    let constraints = vec![Constraint::Ratio(1, view.stat_boxes.len().max(1) as u32); view.stat_boxes.len()];
    let rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for (i, stat) in view.stat_boxes.iter().enumerate() {
        let text = Line::from(vec![
            Span::styled(
                stat.value.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}", stat.label)),
        ]);
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            rects[i],
        );
    }
}

fn draw_column<S: KeyValueStore>(
    f: &mut ratatui::Frame,
    rect: Rect,
    board: &BoardController<S>,
    id: ColumnId,
    selection: &Selection,
    column_index: usize,
) {
    let column = board.view.column(id);
    let items: Vec<ListItem> = column
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let selected = selection.column == column_index && selection.card == i;
            card_item(card, selected, board.dragging() == Some(card.id))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!("{} ({})", id.title(), column.count_badge))
            .borders(Borders::ALL)
            .border_style(if selection.column == column_index {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    f.render_widget(list, rect);
}

// Each card renders in exactly `CardView::height()` rows so the drop
// geometry matches what is on screen.
fn card_item(card: &CardView, selected: bool, dragging: bool) -> ListItem<'static> {
    let base = if dragging {
        Style::default().add_modifier(Modifier::DIM)
    } else if card.completed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut header = vec![Span::styled(
        card.title.clone(),
        if selected {
            base.add_modifier(Modifier::BOLD).fg(Color::White)
        } else {
            base.add_modifier(Modifier::BOLD)
        },
    )];
    for badge in &card.badges {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format!("[{}]", badge.label),
            Style::default().fg(badge.color),
        ));
    }

    let mut footer = vec![Span::styled(
        card.due_label.clone(),
        base.fg(priority_color(card.accent)),
    )];
    if card.completed {
        footer.push(Span::styled(
            " ✓ Completed",
            Style::default().fg(Color::Green),
        ));
    }

    ListItem::new(vec![
        Line::from(header),
        Line::from(Span::styled(card.description.clone(), base)),
        Line::from(footer),
        Line::from(""),
    ])
}

/// Reads the creation form from the terminal, one field per prompt.
/// Returns `None` when input could not be read at all; presence checks on
/// the individual fields are the controller's job.
fn prompt_draft() -> Option<TaskDraft> {
    let title = prompt("Enter task title")?;
    let description = prompt("Enter task description")?;
    let priority = prompt("Enter priority (low/medium/high)")?;
    let due_date = prompt("Enter due date (YYYY-MM-DD)")?;
    let tags = prompt("Enter tags (comma separated, optional)")?;
    Some(TaskDraft {
        title,
        description,
        priority: parse_priority(&priority),
        due_date,
        tags: tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    })
}

fn parse_priority(raw: &str) -> Option<Priority> {
    match raw.trim().to_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        enable_raw_mode().ok();
        Some(input.trim().to_string())
    } else {
        enable_raw_mode().ok();
        None
    }
}
