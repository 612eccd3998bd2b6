//! Application lifecycle around a recording session.
//!
//! Handles the consent gate, the sensor subscription, and the "back"
//! navigation that tears the live view down.

use std::sync::Arc;

use gyrolog_common::clock::Clock;
use gyrolog_common::config::RecordingDefaults;
use gyrolog_common::error::{GyrologError, GyrologResult};
use gyrolog_export::CsvExport;
use gyrolog_sensor_model::event::{MotionEvent, OrientationEvent};

use crate::controller::SessionController;
use crate::display::{DisplaySink, SessionStatus};
use crate::SensorObserver;

/// Outcome of the host's motion-sensor consent prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Granted,
    Denied,
    /// The host does not gate sensor access.
    NotRequired,
}

/// A recording session plus its sensor subscription.
///
/// Events are only handled while subscribed. Subscription starts with a
/// successful [`activate`](Self::activate) and ends with [`back`](Self::back).
pub struct MotionApp {
    session: SessionController,
    subscribed: bool,
}

impl MotionApp {
    pub fn new(
        defaults: &RecordingDefaults,
        clock: Arc<dyn Clock>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        display.status(SessionStatus::Inactive);
        Self {
            session: SessionController::new(defaults, clock, display),
            subscribed: false,
        }
    }

    /// Subscribe to sensor events once consent is known.
    ///
    /// A denial leaves the app unsubscribed and can be retried. Activating
    /// an already active app does nothing.
    pub fn activate(&mut self, consent: Consent) -> GyrologResult<()> {
        if consent == Consent::Denied {
            tracing::warn!("Motion sensor permission denied");
            return Err(GyrologError::permission_denied(
                "Enable motion sensors in settings and try again",
            ));
        }
        if self.subscribed {
            return Ok(());
        }

        self.session.mark_motion_reference();
        self.session.reset_speed();
        self.session.reset_chart();
        self.subscribed = true;
        self.session.display().status(SessionStatus::Ready);
        tracing::info!(?consent, "Subscribed to sensor events");
        Ok(())
    }

    /// Leave the live view: stop any recording, unsubscribe, and zero the
    /// speed readout. The last recording stays exportable.
    pub fn back(&mut self) {
        if self.session.is_recording() {
            self.session.stop();
        }
        if !self.subscribed {
            return;
        }
        self.subscribed = false;
        self.session.reset_speed();
        self.session.display().status(SessionStatus::Inactive);
        tracing::info!("Unsubscribed from sensor events");
    }

    pub fn is_active(&self) -> bool {
        self.subscribed
    }

    /// Start recording. Requires an active subscription.
    pub fn start_recording(&mut self) -> GyrologResult<()> {
        if !self.subscribed {
            return Err(GyrologError::invalid_state(
                "Sensors are not active; grant permission first",
            ));
        }
        self.session.start()
    }

    pub fn stop_recording(&mut self) {
        self.session.stop();
    }

    /// CSV export of the last stopped recording, if there is anything to export.
    pub fn export(&self) -> GyrologResult<Option<CsvExport>> {
        self.session.export()
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }
}

impl SensorObserver for MotionApp {
    fn on_orientation(&mut self, event: &OrientationEvent) {
        if self.subscribed {
            self.session.handle_orientation(event);
        }
    }

    fn on_motion(&mut self, event: &MotionEvent) {
        if self.subscribed {
            self.session.handle_motion(event);
        }
    }

    fn on_start(&mut self) -> GyrologResult<()> {
        self.start_recording()
    }

    fn on_stop(&mut self) {
        self.stop_recording();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrolog_common::clock::ManualClock;
    use gyrolog_sensor_model::event::SensorEvent;

    use crate::display::NullDisplay;

    fn app() -> (MotionApp, ManualClock) {
        let clock = ManualClock::new(0);
        let app = MotionApp::new(
            &RecordingDefaults::default(),
            Arc::new(clock.clone()),
            Arc::new(NullDisplay),
        );
        (app, clock)
    }

    fn moving() -> SensorEvent {
        SensorEvent::motion(MotionEvent::with_gravity(0.0, 0.0, 9.8).linear(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_denied_consent_never_subscribes() {
        let (mut app, _clock) = app();
        let err = app.activate(Consent::Denied).unwrap_err();
        assert!(matches!(err, GyrologError::PermissionDenied { .. }));
        assert!(!app.is_active());
        assert!(app.start_recording().is_err());

        // retrying with consent recovers
        app.activate(Consent::Granted).unwrap();
        assert!(app.is_active());
    }

    #[test]
    fn test_events_ignored_before_activation() {
        let (mut app, clock) = app();
        clock.advance(1_000);
        app.dispatch(&moving());
        assert_eq!(app.session().speed_mps(), 0.0);
    }

    #[test]
    fn test_activation_resets_speed_reference() {
        let (mut app, clock) = app();
        clock.advance(60_000);
        app.activate(Consent::NotRequired).unwrap();
        clock.advance(500);
        app.dispatch(&moving());
        assert!((app.session().speed_mps() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_back_stops_and_unsubscribes() {
        let (mut app, clock) = app();
        app.activate(Consent::Granted).unwrap();
        app.start_recording().unwrap();
        clock.advance(100);
        app.dispatch(&moving());
        app.back();

        assert!(!app.is_active());
        assert!(!app.session().is_recording());
        assert_eq!(app.session().speed_mps(), 0.0);

        clock.advance(100);
        app.dispatch(&moving());
        assert_eq!(app.session().sample_count(), 1);
        assert!(app.export().unwrap().is_some());
    }

    #[test]
    fn test_observer_start_stop() {
        let (mut app, _clock) = app();
        app.activate(Consent::Granted).unwrap();
        app.on_start().unwrap();
        app.dispatch(&moving());
        app.on_stop();
        assert_eq!(app.session().sample_count(), 1);
    }
}
