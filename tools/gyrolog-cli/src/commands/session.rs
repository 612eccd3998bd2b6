//! Interactive session: events stream in while stdin drives the buttons.
//!
//! A paced replay behaves like live sensors and is consumed continuously.
//! An unpaced replay is only consumed while recording, so its events wait in
//! the channel until `start` instead of flowing past an inactive session.

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use gyrolog_common::clock::format_elapsed;
use gyrolog_common::config::AppConfig;
use gyrolog_common::error::{GyrologError, GyrologResult};
use gyrolog_sensor_model::event::SensorEvent;
use gyrolog_sensor_source::backends::ReplayBackend;
use gyrolog_sensor_source::SensorFeed;
use gyrolog_session::{Consent, DisplaySink, MotionApp, SensorObserver};

use super::{save_export, ReplayClock};
use crate::terminal::TerminalDisplay;

const HELP: &str = "Commands: activate, deny, start, stop, export, back, status, help, quit";

/// A parsed stdin command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Activate,
    Deny,
    Start,
    Stop,
    Export,
    Back,
    Status,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "activate" | "allow" => Some(Self::Activate),
            "deny" => Some(Self::Deny),
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "export" | "download" => Some(Self::Export),
            "back" => Some(Self::Back),
            "status" => Some(Self::Status),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The app plus the replay clock it runs on.
struct SessionRunner {
    app: MotionApp,
    clock: ReplayClock,
    realtime: bool,
}

impl SessionRunner {
    fn new(config: &AppConfig, realtime: bool, display: Arc<dyn DisplaySink>) -> Self {
        let clock = ReplayClock::new(realtime);
        let app = MotionApp::new(&config.recording, clock.shared(), display);
        Self {
            app,
            clock,
            realtime,
        }
    }

    /// Whether the next event should be taken off the stream now.
    fn accepts_events(&self) -> bool {
        self.realtime || self.app.session().is_recording()
    }

    fn on_event(&mut self, event: &SensorEvent) {
        self.clock.observe(event);
        self.app.dispatch(event);
    }

    fn handle(&mut self, command: Command, output: &Path) -> GyrologResult<()> {
        let app = &mut self.app;
        match command {
            Command::Activate => app.activate(Consent::Granted),
            Command::Deny => app.activate(Consent::Denied),
            Command::Start => app.on_start(),
            Command::Stop => {
                app.on_stop();
                Ok(())
            }
            Command::Export => app
                .export()
                .and_then(|export| save_export(export, output).map_err(GyrologError::from)),
            Command::Back => {
                app.back();
                Ok(())
            }
            Command::Status => {
                let session = app.session();
                println!(
                    "active={} recording={} samples={} elapsed={} speed={:.2} ft/s",
                    app.is_active(),
                    session.is_recording(),
                    session.sample_count(),
                    format_elapsed(session.elapsed_ms()),
                    session.speed_ft_s(),
                );
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }
}

pub async fn run(
    config: &AppConfig,
    events: PathBuf,
    output: PathBuf,
    realtime: bool,
) -> anyhow::Result<()> {
    let backend = ReplayBackend::from_path(&events, realtime)?;
    let (mut feed, mut receiver) = SensorFeed::with_channel(Box::new(backend), 256);
    let feed_stop = feed.stop_flag();

    let display = Arc::new(TerminalDisplay::new(false));
    let mut runner = SessionRunner::new(config, realtime, display);

    let feed_task = tokio::spawn(async move { feed.run().await });

    println!("Session over: {}", events.display());
    if !realtime {
        println!("Events are replayed while recording.");
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = receiver.recv(), if events_open && runner.accepts_events() => match event {
                Some(event) => runner.on_event(&event),
                None => {
                    events_open = false;
                    println!("Event stream ended.");
                }
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => {
                        if let Err(e) = runner.handle(command, &output) {
                            println!("{e}");
                        }
                    }
                    None => println!("Unknown command: {}. {HELP}", line.trim()),
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    feed_stop.store(true, Ordering::SeqCst);
    runner.app.back();
    drop(receiver);
    if let Err(e) = feed_task.await? {
        tracing::warn!(error = %e, "Sensor feed exited with error");
    }
    Ok(())
}
