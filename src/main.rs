use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use quakemap::app::App;
use quakemap::config::Config;
use quakemap::feed::{self, HttpFeedClient, LineString};
use quakemap::present::Earthquake;
use quakemap::ui;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _log_guard = init_logging().context("failed to initialize logging")?;

    // Configuration and data load happen before any terminal setup so
    // failures print as plain errors, not into a raw-mode screen.
    let config = Config::from_env()?;
    info!(
        quake_url = %config.quake_url,
        plates = config.plates,
        "configuration loaded"
    );

    let client = HttpFeedClient::new()?;
    let plates_url = config.plates.then_some(config.plates_url.as_str());
    let (quakes, boundaries) = feed::fetch_all(&client, &config.quake_url, plates_url)
        .context("earthquake feed unavailable")?;
    info!(
        quakes = quakes.len(),
        boundary_lines = boundaries.len(),
        "feeds loaded"
    );

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &config, quakes, boundaries);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// File-only logging: stdout belongs to the TUI. Filtered via RUST_LOG.
fn init_logging() -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all("logs")?;
    let file = tracing_appender::rolling::never("logs", "quakemap.log");
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(guard)
}

fn run(
    terminal: &mut DefaultTerminal,
    config: &Config,
    quakes: Vec<Earthquake>,
    boundaries: Vec<LineString>,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, size.width as usize, size.height as usize);
    app.load(&quakes, boundaries);
    if !app.renderer.has_data() {
        tracing::warn!("feed contained no events, map will show the base layer only");
    }

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // ~60fps event polling
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Layer toggles
                            KeyCode::Char('e') | KeyCode::Char('E') => app.toggle_earthquakes(),
                            KeyCode::Char('f') | KeyCode::Char('F') => app.toggle_boundaries(),
                            KeyCode::Char('L') => app.toggle_legend(),

                            // Base style
                            KeyCode::Char('s') | KeyCode::Char('S') => app.cycle_style(),

                            // Reset view
                            KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle mouse events for panning, zooming and hover popups
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track the pointer so popups follow it
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        // Scroll wheel zooms towards the pointer
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll pans (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}
