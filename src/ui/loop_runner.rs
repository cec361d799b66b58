//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, timer deliveries and a periodic tick.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::input::{handle_key, handle_paste};
use super::render::render;

/// Spinner frame interval; also bounds toast expiry latency.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Result of handling a key press event.
///
/// Returned by input handlers to signal whether the application should
/// continue running or terminate gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex:
/// - **Terminal input**: key presses and bracketed pastes from crossterm's event stream
/// - **Timers**: `AppEvent::Deadline` deliveries from the scheduler
/// - **Periodic tick**: spinner animation and toast expiry
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(app: &mut App, mut event_rx: mpsc::Receiver<AppEvent>) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

    // Signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    tracing::info!("LinkLux UI started");

    loop {
        // Only render when state has changed
        if app.needs_redraw {
            let frame = terminal.draw(|f| render(f, app))?;
            app.viewport = frame.area;
            app.needs_redraw = false;
        }

        // Drain timer deliveries before waiting on input
        while let Ok(event) = event_rx.try_recv() {
            handle_app_event(app, event);
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key(app, key.code, key.modifiers) == Action::Quit {
                            break;
                        }
                    }
                    Some(Ok(Event::Paste(text))) => handle_paste(app, &text),
                    Some(Ok(Event::Resize(_, _))) => app.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Terminal event stream error");
                        break;
                    }
                    None => break,
                }
            }

            Some(event) = event_rx.recv() => {
                handle_app_event(app, event);
            }

            _ = tick_interval.tick() => {
                app.tick();
            }
        }
    }

    tracing::info!("LinkLux UI stopped");
    restore_terminal(terminal)?;
    Ok(())
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Deadline(deadline) => app.on_deadline(deadline),
    }
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
