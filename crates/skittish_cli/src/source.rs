//! Loudness source implementations.
//!
//! Real microphone capture stays outside this crate; these sources stand in
//! for it behind the same interface: a silent fallback, a seeded synthetic
//! room, and a replay source for recorded loudness traces.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skittish_core::LoudnessSource;
use std::path::Path;

/// Always 0 — the degradation path when no capture is available.
pub struct SilentSource;

impl LoudnessSource for SilentSource {
    fn sample(&mut self) -> f32 {
        0.0
    }
}

/// Seeded pseudo-random ambience: a quiet hum with occasional loud bursts,
/// enough to walk the cat through every mood during a demo.
pub struct SyntheticSource {
    rng: StdRng,
    burst_frames_left: u32,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            burst_frames_left: 0,
        }
    }
}

impl LoudnessSource for SyntheticSource {
    fn sample(&mut self) -> f32 {
        if self.burst_frames_left > 0 {
            self.burst_frames_left -= 1;
            self.rng.gen_range(140.0..=255.0)
        } else {
            // Roughly one burst every ~5 s at 60 fps, lasting 1-6 s.
            if self.rng.gen_bool(1.0 / 300.0) {
                self.burst_frames_left = self.rng.gen_range(60..360);
            }
            self.rng.gen_range(0.0..15.0)
        }
    }
}

/// Replays one loudness value per line from a file; past end-of-file it goes
/// silent, letting the cat settle back to sleep.
pub struct ScriptSource {
    samples: std::vec::IntoIter<f32>,
}

impl ScriptSource {
    pub fn new<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read loudness script {}", path.display()))?;
        let samples: Vec<f32> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| match line.parse::<f32>() {
                Ok(v) if v.is_finite() => Some(v.clamp(0.0, 255.0)),
                _ => {
                    tracing::warn!(line, "skipping malformed loudness sample");
                    None
                }
            })
            .collect();
        tracing::info!(path = %path.display(), frames = samples.len(), "loudness script loaded");
        Ok(Self {
            samples: samples.into_iter(),
        })
    }
}

impl LoudnessSource for ScriptSource {
    fn sample(&mut self) -> f32 {
        self.samples.next().unwrap_or(0.0)
    }
}
