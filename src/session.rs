// src/session.rs
//! Collection session: drives a line source into a bounded track

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use log::{debug, error, info};

use crate::{
    config::SessionConfig,
    error::Result,
    gps::{nmea, Track},
    source::{FixtureSource, LineSource, SerialSource},
};

/// How long a single read may block before the loop re-checks the stop flag.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// One collect-then-render session.
///
/// Owns the track for the duration of the collection phase; the finished
/// track is handed to the caller (and from there to the renderer) once
/// collection stops.
pub struct Session {
    config: SessionConfig,
    running: Arc<AtomicBool>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Shared stop flag. Store `false` (e.g. from a ctrl-c handler) and the
    /// collection loop winds down within its read timeout.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Request a cooperative stop.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Run the collection phase and hand back the finished track.
    ///
    /// Channel failures (cannot open the device, fault mid-read) end the
    /// phase early and are reported here; the caller always receives a
    /// usable, possibly empty, track and no error escapes to the render
    /// phase.
    pub async fn collect(&self) -> Track {
        let mut track = Track::new(self.config.max_points);

        if self.config.use_live_source {
            match SerialSource::open(&self.config.device_address, self.config.bit_rate) {
                Ok(source) => {
                    info!(
                        "listening on {} @ {} baud, collecting up to {} points",
                        self.config.device_address, self.config.bit_rate, self.config.max_points
                    );
                    if let Err(e) = self.drain(source, &mut track).await {
                        error!("read fault, stopping collection: {}", e);
                    }
                }
                Err(e) => error!("{}", e),
            }
        } else {
            info!("reading built-in test sentences");
            if let Err(e) = self.drain(FixtureSource::builtin(), &mut track).await {
                error!("fixture source fault: {}", e);
            }
        }

        info!("collected {} points", track.len());
        track
    }

    /// Pump `source` into `track` until the cap is reached, the source runs
    /// dry, the stop flag drops, or a read fault occurs.
    ///
    /// Teardown of the source runs on every exit path; a read fault is
    /// returned to the caller exactly once, after teardown.
    pub async fn drain<S: LineSource>(&self, mut source: S, track: &mut Track) -> Result<()> {
        let outcome = loop {
            if track.is_full() || !self.is_running() {
                break Ok(());
            }

            let line = match tokio::time::timeout(READ_TIMEOUT, source.next_line()).await {
                Err(_) => continue, // stalled read; go round and re-check the flag
                Ok(Ok(None)) => break Ok(()),
                Ok(Ok(Some(line))) => line,
                Ok(Err(e)) => break Err(e),
            };

            // blank lines consume no slot
            if line.trim().is_empty() {
                continue;
            }

            match nmea::parse_sentence(&line) {
                Ok(fix) => {
                    info!(
                        "{:03} | {} | {:.6}, {:.6} | {:.2} m",
                        track.len() + 1,
                        fix.time,
                        fix.latitude,
                        fix.longitude,
                        fix.altitude
                    );
                    track.append(fix);
                }
                Err(rejection) => debug!("skipping line ({:?}): {}", rejection, line),
            }
        };

        if let Err(e) = source.close().await {
            debug!("teardown of {} failed: {}", source.describe(), e);
        }

        outcome
    }
}
