//! Forge Drill - Entry Point
//!
//! Parses the command line, sets up file logging and the async runtime,
//! loads the catalog and history, then runs the terminal game loop.

use forge_drill::catalog::RecipeCatalog;
use forge_drill::core::config::QuizConfig;
use forge_drill::core::error::Result;
use forge_drill::history::{FileStorage, HistoryStore};
use forge_drill::round::{RandomPicker, RecipePicker};
use forge_drill::session::SessionController;
use forge_drill::ui::{render, App};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "forge-drill")]
#[command(about = "Practice crafting recipes against the clock")]
struct Args {
    /// Catalog TOML file (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Quiz configuration overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for history and the log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for question selection
    #[arg(long)]
    seed: Option<u64>,

    /// Erase the all-time history before starting
    #[arg(long, default_value_t = false)]
    reset_history: bool,

    /// Log filter, e.g. "forge_drill=debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|dir| dir.join("forge-drill")))
        .unwrap_or_else(|| PathBuf::from(".forge-drill"));
    fs::create_dir_all(&data_dir)?;

    init_logging(&data_dir, args.log_level.as_deref())?;
    tracing::info!(data_dir = %data_dir.display(), "Forge Drill starting...");

    // The coach runs on this runtime
    let rt = Runtime::new()?;

    let config = match &args.config {
        Some(path) => QuizConfig::load_from_toml(path)?,
        None => QuizConfig::default(),
    };

    let catalog = match &args.catalog {
        Some(path) => RecipeCatalog::load_from_toml(path),
        None => RecipeCatalog::with_defaults(),
    };
    let catalog = match catalog {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!(error = %e, "Catalog rejected");
            eprintln!("Cannot start: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!(
        components = catalog.component_count(),
        recipes = catalog.recipes().len(),
        "Catalog loaded"
    );

    let mut history = HistoryStore::load(Box::new(FileStorage::new(&data_dir)), &catalog, &config);
    if args.reset_history {
        history.clear_all_time();
        tracing::info!("All-time history reset");
    }

    let picker: Box<dyn RecipePicker> = match args.seed {
        Some(seed) => Box::new(RandomPicker::seeded(seed)),
        None => Box::new(RandomPicker::from_entropy()),
    };
    let controller = SessionController::new(catalog, picker, config);
    let mut app = App::new(history, controller, rt.handle().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut app);
    app.shutdown();

    // Cleanup runs even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &outcome {
        tracing::error!(error = %e, "Terminal loop failed");
    }
    tracing::info!("Forge Drill exiting");
    outcome.map_err(Into::into)
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while app.running {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| render::draw(frame, app, now))?;
        app.handle_input()?;
    }
    Ok(())
}

/// Log to a file; the terminal belongs to the game
fn init_logging(data_dir: &Path, level: Option<&str>) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("forge-drill.log"))?;

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forge_drill=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
