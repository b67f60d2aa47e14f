//! Terminal dashboard mode.
//!
//! A two-pane layout: the package list on the left, the selected package's
//! accumulated output on the right. Every state transition is externally
//! triggered, either by a keyboard/resize event from the crossterm stream or
//! by a supervisor event from a child process; the two sources are
//! multiplexed with `tokio::select!` and the screen is redrawn only when the
//! event changed something visible.

mod app;
mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use wrun_core::supervisor::{ProcessEvent, Supervisor, SHUTDOWN_GRACE};

use self::app::App;

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard until the operator quits, then shut the children down.
pub async fn run(
    supervisor: Supervisor,
    mut events: mpsc::UnboundedReceiver<ProcessEvent>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(supervisor);
    let mut input = EventStream::new();

    terminal.draw(|frame| ui::render(frame, &app))?;

    loop {
        let redraw = tokio::select! {
            maybe_input = input.next() => match maybe_input {
                Some(Ok(Event::Key(key))) => {
                    if app.handle_key(key) {
                        break;
                    }
                    true
                }
                // Resize reflows pane geometry but never moves the selection.
                Some(Ok(Event::Resize(_, _))) => true,
                Some(Ok(_)) => false,
                Some(Err(_)) | None => break,
            },
            maybe_event = events.recv() => match maybe_event {
                Some(event) => app.apply(event),
                None => false,
            },
            // External SIGINT; in raw mode Ctrl-C arrives as a key event.
            _ = tokio::signal::ctrl_c() => break,
        };

        if redraw {
            terminal.draw(|frame| ui::render(frame, &app))?;
        }
    }

    restore_terminal(&mut terminal)?;
    app.into_supervisor().shutdown(SHUTDOWN_GRACE).await;
    Ok(())
}
