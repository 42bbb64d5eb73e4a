//! Terminal calculator binary.
//!
//! Wires the crossterm event loop to the [`TuiApp`]: keys and keypad
//! clicks mutate the display, `Enter`/`=` sends the expression to the
//! configured evaluation server.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing_subscriber::EnvFilter;

use sumpad::client::EvalClient;
use sumpad::tui::{layout, render, InputHandler, KeyAction, TuiApp};

/// Terminal calculator backed by a remote evaluation service.
#[derive(Debug, Parser)]
#[command(name = "sumpad", version, about)]
struct Cli {
    /// Base URL of the evaluation server.
    #[arg(
        long,
        env = "SUMPAD_SERVER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server_url: String,

    /// Append diagnostic logs to this file instead of discarding them.
    #[arg(long, env = "SUMPAD_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Installs the tracing subscriber. Logs go to a file because stderr
/// belongs to the alternate screen while the TUI runs.
fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, EvalClient::new(&cli.server_url)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {err}");
    }

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    client: EvalClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = TuiApp::new(client);
    let input_handler = InputHandler::new();

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        let action = match event::read()? {
            Event::Key(key) => input_handler.handle_key(key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let areas = layout(Rect::new(0, 0, size.width, size.height));
                app.keypad()
                    .hit_test_action(areas.keypad, mouse.column, mouse.row)
                    .unwrap_or(KeyAction::None)
            }
            _ => KeyAction::None,
        };

        if action == KeyAction::Evaluate {
            // Draw a busy frame before suspending on the network.
            app.set_busy(true);
            terminal.draw(|frame| render(&app, frame))?;
            app.handle_action(action).await;
            app.set_busy(false);
        } else {
            app.apply(action);
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
