use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod ai;
mod app;
mod config;
mod db;
mod error;
mod feed;
mod models;
mod pipeline;
mod scheduler;
mod services;
mod tui;

use app::App;
use config::Config;
use error::Result;
use tui::{draw, handle_key_event};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let mut config = Config::load()?;

    // Check for --export flag
    let export_path = if args.len() >= 3 && args[1] == "--export" {
        Some(PathBuf::from(&args[2]))
    } else {
        None
    };

    // Check for --refresh flag (headless refresh)
    let headless_refresh = args.len() >= 2 && args[1] == "--refresh";
    let reset_history = args.len() >= 2 && args[1] == "--reset-history";

    // Headless modes never schedule background refreshes
    if export_path.is_some() || headless_refresh || reset_history {
        config.auto_refresh = false;
    }

    // Initialize app
    let mut app = App::new(config, Config::config_path()).await?;

    if let Some(path) = export_path {
        app.export(&path);
        if let Some(message) = &app.message {
            println!("{message}");
        }
        return Ok(());
    }

    if reset_history {
        app.reset_history();
        if let Some(message) = &app.message {
            println!("{message}");
        }
        return Ok(());
    }

    // If headless refresh, just refresh and exit
    if headless_refresh {
        let outcome = app.refresh_blocking().await;
        for group in &outcome.groups {
            println!("== {} ({})", group.keyword, group.items.len());
            for item in &group.items {
                let marker = if item.is_new { "*" } else { " " };
                println!("{marker} [{}] {}", item.published_display, item.title);
                println!("    {}", item.link);
            }
        }
        for error in &outcome.errors {
            eprintln!("{error}");
        }
        println!("{}", outcome.status_line());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // First fetch happens on startup, not after the first interval
    app.start_refresh();

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Poll for completed background work
        app.poll_refresh_result();
        app.poll_refresh_tick();
        app.poll_summary_result();

        // Poll for events with timeout to allow async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) =
                        handle_key_event(key, app.keyword_input_active, app.show_help)
                    {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
