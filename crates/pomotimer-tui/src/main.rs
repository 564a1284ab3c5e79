mod app;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use pomotimer_core::{
    models::AppConfig,
    storage::{
        init_config_dir, init_data_dir, ConfigStorage, FileStore, KeyValueStore, MemoryStore,
    },
    SystemClock,
};
use pomotimer_engine::{
    EngineEvent, EngineEventType, LoopScheduler, NotificationPermission, RunnerHandle,
    SessionEngine, TimerRunner,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tokio::time::Duration;
use tracing::{info, warn};

fn setup_logging(level: &str) -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("pomotimer.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "pomotimer={level},pomotimer_core={level},pomotimer_engine={level}"
        ))
    });

    let log_file = std::fs::File::create(log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

#[derive(Parser, Debug)]
#[command(name = "pomotimer")]
#[command(about = "Pomotimer - a terminal Pomodoro timer", long_about = None)]
struct Args {
    /// Directory holding settings and stats
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Never show desktop notifications
    #[arg(long)]
    no_notify: bool,

    /// Keep settings and stats in memory for this run only
    #[arg(long)]
    memory: bool,
}

/// Config file values, overridden by whatever was passed on the command line.
fn load_config(args: &Args) -> Result<AppConfig> {
    let storage = ConfigStorage::new(init_config_dir()?);
    let mut config = match storage.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring unreadable {}: {}", storage.config_path().display(), e);
            AppConfig::default()
        }
    };

    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if args.no_notify {
        config.notifications = false;
    }

    config.validate()?;
    Ok(config)
}

fn send_os_notification(title: String, body: String) {
    // The notification daemon round trip can block.
    tokio::task::spawn_blocking(move || {
        if let Err(e) = notify_rust::Notification::new()
            .summary(&title)
            .body(&body)
            .icon("alarm-clock")
            .timeout(notify_rust::Timeout::Milliseconds(5000))
            .show()
        {
            tracing::error!("Failed to send notification: {}", e);
        }
    });
}

fn audio_alert() {
    print!("\x07");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}

fn handle_engine_event(app: &mut App, event: EngineEvent) {
    match &event.event_type {
        EngineEventType::PlaySound => audio_alert(),
        EngineEventType::Notify { title, body, .. } => {
            send_os_notification(title.clone(), body.clone());
        }
        EngineEventType::Render { display } => {
            if display.title != app.display.title {
                let _ = execute!(io::stdout(), SetTitle(&display.title));
            }
        }
        _ => {}
    }
    app.apply_event(event.event_type);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    setup_logging(&config.log_level)?;
    setup_panic_hook();
    info!(?config, "Pomotimer starting up");

    if args.memory {
        run(MemoryStore::new(), &config).await
    } else {
        let data_dir = match &config.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                dir.clone()
            }
            None => init_data_dir()?,
        };
        run(FileStore::new(data_dir), &config).await
    }
}

async fn run<S>(store: S, config: &AppConfig) -> Result<()>
where
    S: KeyValueStore + Clone + Send + 'static,
{
    let (event_tx, _) = broadcast::channel(1000);
    let mut engine = SessionEngine::new(store, SystemClock, LoopScheduler::default(), event_tx);

    let permission = if config.notifications {
        NotificationPermission::Granted
    } else {
        NotificationPermission::Denied
    };
    engine.set_notification_permission(permission);

    let mut events = engine.subscribe();
    let mut app = App::new(engine.display(), *engine.settings());
    let (handle, runner_task) = TimerRunner::new(engine).spawn();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(&app.display.title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &handle, &mut events).await;

    if let Err(e) = handle.shutdown().await {
        warn!("Runner already stopped: {}", e);
    }
    if let Ok(engine) = runner_task.await {
        info!(counters = ?engine.counters(), "Pomotimer shutting down");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    handle: &RunnerHandle,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => handle_engine_event(app, event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Engine events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = tokio::time::sleep(Duration::from_millis(16)) => {
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if let Some(command) = app.handle_key(key.code, key.modifiers) {
                                handle.send(command).await?;
                            }
                        }
                        Event::Resize(width, height) => {
                            info!(width, height, "Terminal resized");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(())
}
