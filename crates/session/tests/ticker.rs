use std::sync::{Arc, Mutex};
use std::time::Duration;

use gyrolog_common::clock::MonotonicClock;
use gyrolog_common::config::RecordingDefaults;
use gyrolog_session::{DisplaySink, SessionController};

#[derive(Default)]
struct ElapsedLog {
    ticks: Mutex<Vec<String>>,
}

impl DisplaySink for ElapsedLog {
    fn elapsed(&self, text: &str) {
        self.ticks.lock().unwrap().push(text.to_string());
    }
}

#[tokio::test]
async fn ticker_refreshes_elapsed_until_stop() {
    let display = Arc::new(ElapsedLog::default());
    let mut session = SessionController::new(
        &RecordingDefaults::default(),
        Arc::new(MonotonicClock::new()),
        display.clone(),
    );

    session.start().unwrap();
    assert!(session.has_ticker());
    tokio::time::sleep(Duration::from_millis(80)).await;
    session.stop();
    assert!(!session.has_ticker());

    let after_stop = display.ticks.lock().unwrap().len();
    // start and stop each render once, the ticker fills in between
    assert!(after_stop > 3, "expected ticks, got {after_stop}");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(display.ticks.lock().unwrap().len(), after_stop);

    let ticks = display.ticks.lock().unwrap();
    assert_eq!(ticks.first().map(String::as_str), Some("00:00:00"));
    assert!(ticks.iter().all(|t| t.len() == 8));
}
