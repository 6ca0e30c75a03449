//! Terminal UI for Strictly Digits

mod app;
mod feedback;
mod input;
mod ui;

pub use app::App;
pub use input::{map_key, KeyAction};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::{RandomNumberGenerator, Tick, TokioTicker, Trainer, TrainerConfig};

/// Run the trainer in the terminal until the user quits.
pub async fn run_tui(config: TrainerConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,strictly_digits=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(
        starting = %config.starting(),
        cadence = ?config.cadence(),
        "Starting Strictly Digits TUI"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (ticker, mut ticks) = TokioTicker::new();
    let trainer = Trainer::from_config(RandomNumberGenerator::from_entropy(), ticker, &config);
    let mut app = App::new(trainer);
    app.start();

    let res = run_app(&mut terminal, &mut app, &mut ticks).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Trainer loop error");
    }

    let stats = app.trainer().stats();
    info!(
        rounds = stats.total(),
        successes = stats.successes(),
        "Session finished"
    );
    res
}

/// Event loop: drain ticks, draw, handle one key.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<RandomNumberGenerator, TokioTicker>,
    ticks: &mut mpsc::UnboundedReceiver<Tick>,
) -> Result<()> {
    loop {
        while let Ok(tick) = ticks.try_recv() {
            app.on_tick(tick);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        if event::poll(Duration::from_millis(20))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind != KeyEventKind::Release {
                app.handle_key(key);
            }
        }

        tokio::task::yield_now().await;
    }
}
