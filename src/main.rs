mod app;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use questboard_config::{constants::MAX_LOG_ENTRIES, get_cache_dir, Config};
use questboard_logger::{self as logger, LogLevel};
use questboard_theme::set_themes_dir;

use crate::app::App;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    // Initialize theme system with themes directory from config
    if let Ok(themes_dir) = Config::get_themes_dir() {
        set_themes_dir(themes_dir);
    }

    init_logging(&config);
    logger::info("Questboard starting");

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let mut app = App::new(&config, size.width, size.height);
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        logger::error(format!("Fatal: {:?}", err));
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let min_level = LogLevel::from_str(&config.logging.min_level).unwrap_or(LogLevel::Info);
    let file_path = match &config.logging.file_path {
        Some(path) => Some(PathBuf::from(path)),
        None => get_cache_dir().ok().map(|dir| dir.join("questboard.log")),
    };
    logger::init(file_path, MAX_LOG_ENTRIES, min_level);
}
