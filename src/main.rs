use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

mod board;
mod controller;
mod drag;
mod snapshot;
mod status;
mod store;
mod task;
mod ui;
mod view;

use controller::BoardController;
use store::{FileStore, PersistenceGateway};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Board setup: restore the saved board, if any, before the first draw.
    // A malformed snapshot aborts the session instead of being replaced
    // with an empty board.
    let gateway = PersistenceGateway::new(FileStore::new("."));
    let mut board = BoardController::new(gateway);
    let result = board
        .restore()
        .and_then(|()| ui::run_app(&mut terminal, &mut board));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{err}");
    }
    Ok(())
}
