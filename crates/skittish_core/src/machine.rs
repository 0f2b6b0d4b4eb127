//! The stress accumulator and mood classifier.
//!
//! Stress evolves by one step per frame: above the volume floor it rises,
//! below it decays, and the per-frame rate is derived from the *active band*
//! so that crossing any one mood band takes exactly the configured transition
//! duration regardless of how wide the band is. This decouples perceived
//! reaction speed from threshold spacing.

use crate::mood::{Mood, MoodDescriptor};
use crate::settings::{Settings, SettingsPatch, MIN_BAND_WIDTH, STRESS_MAX, STRESS_MIN};
use chrono::{DateTime, Utc};

/// Assumed frames per second when none is given; all rate math uses it.
pub const DEFAULT_FRAME_RATE: f32 = 60.0;

/// The `{stress, mood}` pair returned by every update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub stress: f32,
    pub mood: Mood,
}

type Observer = Box<dyn FnMut(&MoodDescriptor) + Send>;

/// Integrates loudness into bounded stress and classifies it into a mood.
///
/// One instance lives for the whole session. `update` is deterministic given
/// (previous stress, previous mood, loudness, settings) and performs only
/// arithmetic plus at most one synchronous observer call; it never blocks.
pub struct StressMachine {
    stress: f32,
    mood: Mood,
    settings: Settings,
    frame_rate: f32,
    /// When the current mood was entered.
    since: DateTime<Utc>,
    observer: Option<Observer>,
}

impl StressMachine {
    pub fn new(settings: Settings) -> Self {
        Self::with_frame_rate(settings, DEFAULT_FRAME_RATE)
    }

    /// Create with an explicit assumed frame rate (ticks per second).
    pub fn with_frame_rate(mut settings: Settings, frame_rate: f32) -> Self {
        settings.normalize();
        let frame_rate = if frame_rate.is_finite() && frame_rate >= 1.0 {
            frame_rate
        } else {
            DEFAULT_FRAME_RATE
        };
        Self {
            stress: STRESS_MIN,
            mood: Mood::Sleeping,
            settings,
            frame_rate,
            since: Utc::now(),
            observer: None,
        }
    }

    /// Register the transition observer (single slot; replaces any previous).
    ///
    /// Invoked with the new mood's descriptor exactly once per mood change,
    /// synchronously, before `update` returns.
    pub fn on_transition<F>(&mut self, observer: F)
    where
        F: FnMut(&MoodDescriptor) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Advance one frame with the latest loudness sample.
    pub fn update(&mut self, loudness: f32) -> Reading {
        let loudness = if loudness.is_finite() {
            loudness.max(0.0)
        } else {
            0.0
        };

        // Band-relative rate: crossing the active band takes exactly
        // transition_secs at the assumed frame rate.
        let (lo, hi) = self.settings.thresholds.band(self.stress);
        let width = (hi - lo).max(MIN_BAND_WIDTH);
        let per_frame = width / (self.settings.transition_secs * self.frame_rate);

        let delta = if loudness > self.settings.volume_floor {
            per_frame * self.settings.sensitivity
        } else {
            -per_frame
        };
        self.stress = (self.stress + delta).clamp(STRESS_MIN, STRESS_MAX);

        let mood = self.settings.thresholds.classify(self.stress);
        if mood != self.mood {
            tracing::info!(prev = %self.mood, next = %mood, stress = self.stress, "mood transition");
            self.mood = mood;
            self.since = Utc::now();
            if let Some(observer) = self.observer.as_mut() {
                observer(mood.descriptor());
            }
        } else {
            tracing::trace!(stress = self.stress, mood = %mood, loudness, "frame");
        }

        Reading {
            stress: self.stress,
            mood,
        }
    }

    /// Classify an arbitrary stress value under the current thresholds.
    pub fn classify(&self, stress: f32) -> Mood {
        self.settings.thresholds.classify(stress)
    }

    /// Merge a partial settings update; effective on the very next `update`.
    pub fn apply_settings(&mut self, patch: &SettingsPatch) {
        self.settings.apply(patch);
        tracing::debug!(settings = ?self.settings, "settings applied");
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn reading(&self) -> Reading {
        Reading {
            stress: self.stress,
            mood: self.mood,
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn stress(&self) -> f32 {
        self.stress
    }

    /// When the current mood was entered.
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    #[cfg(test)]
    fn force_stress(&mut self, stress: f32) {
        self.stress = stress.clamp(STRESS_MIN, STRESS_MAX);
        self.mood = self.settings.thresholds.classify(self.stress);
    }
}
