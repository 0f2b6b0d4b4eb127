//! The per-frame tick loop and the application context that feeds it.

use crate::render;
use anyhow::Result;
use skittish_core::{LoudnessSource, SettingsRepository, StressMachine};
use std::time::Duration;

/// Explicit dependency bundle: the one machine instance, its loudness source,
/// and the settings repository, constructed once in `main` and handed to the
/// tick loop. No module-level globals.
pub struct AppContext {
    pub machine: StressMachine,
    pub source: Box<dyn LoudnessSource>,
    pub store: Box<dyn SettingsRepository>,
    pub fps: u32,
}

impl AppContext {
    pub fn new(
        machine: StressMachine,
        source: Box<dyn LoudnessSource>,
        store: Box<dyn SettingsRepository>,
        fps: u32,
    ) -> Self {
        Self {
            machine,
            source,
            store,
            fps: fps.clamp(1, 240),
        }
    }

    /// Run the frame loop until Ctrl-C.
    ///
    /// Each tick pulls one loudness sample, advances the machine one frame,
    /// and repaints the status line. A tick never blocks on anything but the
    /// interval itself.
    pub async fn run(&mut self) -> Result<()> {
        let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / self.fps as f64));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stdout = std::io::stdout();

        tracing::info!(fps = self.fps, "frame loop started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let loudness = self.source.sample();
                    let reading = self.machine.update(loudness);
                    let age = (chrono_secs_since(&self.machine)).max(0);
                    render::paint(&mut stdout, &reading, age)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    tracing::info!("interrupted, shutting down");
                    break;
                }
            }
        }

        // Persist whatever the settings are at exit.
        self.store.save(self.machine.settings())?;
        Ok(())
    }
}

fn chrono_secs_since(machine: &StressMachine) -> i64 {
    (chrono::Utc::now() - machine.since()).num_seconds()
}
