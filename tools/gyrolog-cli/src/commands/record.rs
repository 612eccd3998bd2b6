//! Record a captured event stream to CSV.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use gyrolog_common::config::AppConfig;
use gyrolog_sensor_source::backends::ReplayBackend;
use gyrolog_sensor_source::SensorFeed;
use gyrolog_session::{Consent, MotionApp, SensorObserver};

use super::{save_export, ReplayClock};
use crate::terminal::TerminalDisplay;

pub async fn run(
    config: &AppConfig,
    events: PathBuf,
    output: PathBuf,
    realtime: bool,
) -> anyhow::Result<()> {
    println!("Recording from: {}", events.display());
    println!("  Output: {}", output.display());
    println!("  Realtime: {realtime}");
    println!();

    let backend = ReplayBackend::from_path(&events, realtime)?;
    let (mut feed, mut receiver) = SensorFeed::with_channel(Box::new(backend), 256);
    let feed_stop = feed.stop_flag();

    let clock = ReplayClock::new(realtime);
    let display = Arc::new(TerminalDisplay::new(true));
    let mut app = MotionApp::new(&config.recording, clock.shared(), display.clone());

    app.activate(Consent::NotRequired)?;
    app.start_recording()?;

    let feed_task = tokio::spawn(async move { feed.run().await });

    if realtime {
        println!("Press Ctrl+C to stop recording...");
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = receiver.recv() => match event {
                Some(event) => {
                    clock.observe(&event);
                    app.dispatch(&event);
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, stopping recording");
                break;
            }
        }
    }

    feed_stop.store(true, Ordering::SeqCst);
    app.stop_recording();
    display.finish_line();

    match feed_task.await? {
        Ok(forwarded) => tracing::debug!(forwarded, "Sensor feed finished"),
        Err(e) => tracing::warn!(error = %e, "Sensor feed exited with error"),
    }

    save_export(app.export()?, &output)
}
