//! Terminal setup and the main event loop

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use crate::config::Config;
use crate::logger::Logger;
use crate::service::{Dataset, FixtureService};
use crate::ui::app_component::AppComponent;
use crate::ui::core::{Action, AppContext, EventHandler, EventType, TaskManager};

/// How often finished background tasks are swept
const CLEANUP_INTERVAL: Duration = Duration::from_secs(5);
/// Background tasks older than this are reported once per sweep
const SLOW_TASK_THRESHOLD: Duration = Duration::from_secs(10);

/// Build the fixture-backed services described by `config`.
pub fn build_service(config: &Config) -> Result<FixtureService> {
    let dataset = match &config.data.dataset_path {
        Some(path) => {
            log::info!("Loading dataset from {}", path.display());
            Dataset::load_from_file(path)?
        }
        None => Dataset::sample()?,
    };
    log::info!("Dataset ready with {} matters", dataset.matters.len());
    Ok(FixtureService::new(dataset, config.data.page_size).with_latency(config.data.simulated_latency()))
}

/// Run the terminal application until the user quits.
pub async fn run_app(config: Config, logger: Option<Logger>) -> Result<()> {
    let service = Arc::new(build_service(&config)?);
    let (tasks, mut actions) = TaskManager::new();

    let mut context = AppContext::new(config, tasks, service.clone(), service.clone(), service);
    if let Some(logger) = logger {
        context = context.with_logger(logger);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(&context);
    let mut event_handler = EventHandler::default();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler, &mut actions).await;

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
    actions: &mut mpsc::UnboundedReceiver<Action>,
) -> Result<()> {
    let mut needs_render = true;
    let mut last_cleanup = Instant::now();

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f))?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            EventType::Key(key) => {
                let action = app.handle_key(key);
                app.handle_app_action(action);
                needs_render = true;
            }
            EventType::Resize(_, _) => needs_render = true,
            EventType::Tick | EventType::Other => {}
        }

        // Background results are applied on the UI task, in arrival order
        while let Ok(action) = actions.try_recv() {
            app.handle_app_action(action);
            needs_render = true;
        }

        if last_cleanup.elapsed() >= CLEANUP_INTERVAL {
            app.on_tick();
            for description in app.slow_tasks(SLOW_TASK_THRESHOLD) {
                log::warn!("Background task still running: {}", description);
            }
            last_cleanup = Instant::now();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
