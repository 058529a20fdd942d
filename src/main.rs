use pswp::app::{App, LoadSource};
use pswp::cli::{AppConfig, Args};
use pswp::config::UserConfig;
use pswp::feedback::{Haptics, SilentHaptics, TerminalBell};
use pswp::library::DirectoryLibrary;
use pswp::platform::{self, PlatformVerdict};
use pswp::tui::{handle_key_event, handle_mouse_event, render, render_platform_blocked, KeyAction};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Convert to config
    let config: AppConfig = args.into();

    init_logging(&config);

    // Run the app
    run_app_with_config(&config)
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("pswp").join("pswp.log"))
}

/// Logs go to a file since the TUI owns the terminal
fn init_logging(config: &AppConfig) {
    let Some(path) = config.log_file.clone().or_else(default_log_path) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Logging disabled, cannot create {}: {}", parent.display(), e);
            return;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Logging disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };

    let log_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig) -> io::Result<()> {
    let verdict = platform::detect();
    if verdict == PlatformVerdict::NotATerminal {
        eprintln!("Error: {}", verdict);
        std::process::exit(1);
    }

    // Load user configuration
    let user_config = UserConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load user config, using defaults");
        UserConfig::default()
    });

    // Background work (photo loads, preview rendering) runs here; the UI
    // thread stays outside the runtime so it may block on preview locks.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let haptics: Box<dyn Haptics> = if config.bell && user_config.bell.unwrap_or(true) {
        Box::new(TerminalBell::new())
    } else {
        Box::new(SilentHaptics)
    };
    let library = Arc::new(DirectoryLibrary::new(config.directory.clone()));

    let mut app = App::new(
        config,
        runtime.handle().clone(),
        library,
        haptics,
        user_config,
    );

    if config.demo {
        if let Err(e) = app.start_load(LoadSource::Demo) {
            warn!(error = %e, "could not start demo load");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = wait_for_supported_terminal(&mut terminal, verdict).and_then(|proceed| {
        if proceed {
            run_loop(&mut terminal, &mut app)
        } else {
            Ok(())
        }
    });

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.previews_mut().shutdown();

    // Print the marked photos after exit so they can be acted on
    let session = app.session();
    if session.candidate_count() > 0 {
        println!("Marked for deletion ({}):", session.candidate_count());
        for photo in session.candidates() {
            println!("  {}", photo.subtitle());
        }
    }

    info!("pswp exiting");
    result
}

/// Shows the blocking screen until the terminal is big enough.
///
/// Returns false if the user quit instead of resizing.
fn wait_for_supported_terminal<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut verdict: PlatformVerdict,
) -> io::Result<bool> {
    while !verdict.is_supported() {
        warn!(%verdict, "terminal not supported");
        terminal.draw(|frame| render_platform_blocked(frame, &verdict))?;

        match event::read()? {
            Event::Key(key) => {
                if handle_key_event(key) == KeyAction::Quit {
                    return Ok(false);
                }
            }
            Event::Resize(columns, rows) => {
                verdict = platform::evaluate(true, Some((columns, rows)));
            }
            _ => {}
        }
    }
    Ok(true)
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);

        if app.should_quit() {
            break;
        }

        terminal.draw(|frame| render(frame, app, now))?;

        // Sleep until input arrives or the next animation frame / timer is due
        let timeout = app.poll_timeout(Instant::now()).max(Duration::from_millis(1));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                let action = handle_key_event(key);
                app.handle_key(action, Instant::now());
            }
            Event::Mouse(mouse) => {
                let action = handle_mouse_event(mouse);
                app.handle_pointer(action, Instant::now());
            }
            Event::Resize(columns, rows) => {
                let verdict = platform::evaluate(true, Some((columns, rows)));
                if !verdict.is_supported() && !wait_for_supported_terminal(terminal, verdict)? {
                    break;
                }
            }
            _ => {}
        }
    }

    Ok(())
}
