//! A terminal front end for logging into lexsearch and browsing search history

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::App;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
};
use futures::StreamExt;
use lexsearch_core::Client;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let config = config::Config::parse();
    let _guard = init_tracing(&config);

    let client = Client::connect(&config.server, config.timeout)?;
    tracing::info!(server = %client.server(), "starting");

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    terminal.clear()?;
    let res = run(terminal, Arc::new(client)).await;
    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    Ok(res?)
}

/// Log to a file in the data directory, since the terminal is busy. Logs are
/// flushed when the returned guard drops.
fn init_tracing(config: &config::Config) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(config.data_dir(), "lexsearch.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    guard
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, client: Arc<Client>) -> io::Result<ExitCode> {
    let mut app = App::new();

    // Requests take place via async tasks. Once those tasks are done, we read
    // their results off of a channel. We keep track of outstanding effects so
    // we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::with_capacity(1);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Start our event loop!
    loop {
        // Wait for either external input or the result of an effect. Not every
        // terminal event is interesting, so this is an `Option<_>`.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => Some(app::Action::Key(key_event)),
                    Some(Ok(Event::Mouse(mouse_event))) => Some(app::Action::Mouse(mouse_event)),
                    Some(Err(err)) => Some(app::Action::Problem(err.to_string())),
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&client),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        // This list should never be too long (since we do this on every pass
        // through the event loop) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // Let any outstanding requests finish before exiting so their results
        // make it into the logs.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::error!(?err, "effect task failed during shutdown");
                }
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    client: Arc<Client>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&client).await {
            // A closed channel means we're shutting down, so it's fine to
            // drop the message.
            let _ = effect_tx.send(next_action);
        }
    })
}
