use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tokio::runtime::Runtime;

use wardwatch::{
    commands, events, logging, ui, App, DashboardApi, HttpApi, Pollers, Settings, View,
};

#[derive(Parser, Debug)]
#[command(name = "wardwatch")]
#[command(about = "Terminal dashboard for a hospital resource-monitoring backend")]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Settings file (defaults to ./wardwatch.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File that receives log output
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export current metrics to JSON file and exit
    #[arg(short, long, conflicts_with_all = ["set", "scenario"])]
    export: Option<PathBuf>,

    /// Override a backend threshold (KEY=VALUE, repeatable) and exit
    #[arg(long, value_name = "KEY=VALUE", conflicts_with_all = ["export", "scenario"])]
    set: Vec<String>,

    /// Trigger a scenario on the backend and exit
    #[arg(short, long, value_name = "NAME", conflicts_with_all = ["export", "set"])]
    scenario: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.base_url = url;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    logging::init(&settings.log_file, &settings.log_level)?;

    let mut builder = HttpApi::builder().base_url(settings.base_url.clone());
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let api = builder.build().context("Failed to create HTTP client")?;

    tracing::info!(backend = %api.description(), "Starting wardwatch");

    let rt = Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        rt.block_on(commands::export_metrics(&api, &export_path))?;
        println!("Exported metrics to: {}", export_path.display());
        return Ok(());
    }

    // Handle threshold overrides (non-interactive)
    if !args.set.is_empty() {
        let ack = rt.block_on(commands::push_overrides(&api, &args.set))?;
        println!("Settings update: {}", ack.status);
        println!("{}", serde_json::to_string_pretty(&ack.config)?);
        return Ok(());
    }

    // Handle one-shot scenario
    if let Some(name) = args.scenario {
        let ack = rt
            .block_on(api.trigger_scenario(&name))
            .with_context(|| format!("Failed to trigger scenario '{}'", name))?;
        println!("{}", ack.message);
        return Ok(());
    }

    run_with_backend(rt, Arc::new(api))
}

/// Run the TUI in the main thread while the pollers run on `rt`.
fn run_with_backend(rt: Runtime, api: Arc<dyn DashboardApi>) -> Result<()> {
    let description = api.description().to_string();
    let pollers = Pollers::new(api);

    let tasks = {
        let _guard = rt.enter();
        pollers.spawn()
    };

    let app = App::new(pollers, rt.handle().clone(), &description, ui::Theme::auto_detect());
    let result = run_tui(app);

    // Signal shutdown
    tasks.abort();
    rt.shutdown_timeout(Duration::from_millis(500));

    result
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        app.drain_notices();

        // Snapshot the view models so the pollers never wait on a draw
        let board = app.board.lock().value().clone();
        let charts = app.charts.lock().value().clone();

        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(app.theme.warning));
                let top = (area.height / 2).saturating_sub(2);
                let centered =
                    ratatui::layout::Rect::new(0, top, area.width, 5u16.min(area.height - top));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, &board, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Live => ui::live::render(frame, app, &board, chunks[2]),
                View::Trends => ui::trends::render(frame, app, &charts, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}
