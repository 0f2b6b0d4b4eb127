//! Tunable parameters: sensitivity, transition duration, and the stress
//! thresholds partitioning `[0, 100]` into the five mood bands.
//!
//! All numeric inputs are sanitized by clamping rather than rejected; a
//! malformed value degrades to its default field-by-field.

use crate::mood::Mood;
use serde::{Deserialize, Serialize};

/// Stress scale bounds.
pub const STRESS_MIN: f32 = 0.0;
pub const STRESS_MAX: f32 = 100.0;

/// Floor for the configured transition duration, to keep the per-frame rate
/// derivation away from division by zero.
pub const MIN_TRANSITION_SECS: f32 = 0.1;

/// Minimum band width used in rate derivation, so a degenerate (zero-width)
/// band never stalls the accumulator.
pub const MIN_BAND_WIDTH: f32 = 0.1;

/// Guard against NaN and Infinity in settings values.
#[inline]
fn sanitize_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf in settings value, resetting to {}", fallback);
        fallback
    }
}

/// The four ascending boundaries between the five mood bands.
///
/// Each field is the *lower* bound of the band it names; Sleeping owns
/// everything below `calm`. Normalization enforces the ascending invariant,
/// so first-match-wins classification always sees a monotone partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub calm: f32,
    pub anxious: f32,
    pub irritated: f32,
    pub panicked: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            calm: 10.0,
            anxious: 30.0,
            irritated: 60.0,
            panicked: 90.0,
        }
    }
}

impl Thresholds {
    /// Clamp each boundary into `[0, 100]` and to be no lower than its
    /// predecessor. Out-of-order input is repaired, not rejected.
    pub fn normalize(&mut self) {
        let d = Thresholds::default();
        self.calm = sanitize_f32(self.calm, d.calm).clamp(STRESS_MIN, STRESS_MAX);
        self.anxious = sanitize_f32(self.anxious, d.anxious)
            .clamp(self.calm, STRESS_MAX);
        self.irritated = sanitize_f32(self.irritated, d.irritated)
            .clamp(self.anxious, STRESS_MAX);
        self.panicked = sanitize_f32(self.panicked, d.panicked)
            .clamp(self.irritated, STRESS_MAX);
    }

    /// Classify a stress value into a mood, highest band first.
    ///
    /// Pure and idempotent: the first mood whose lower bound the stress meets
    /// or exceeds wins, defaulting to Sleeping.
    pub fn classify(&self, stress: f32) -> Mood {
        if stress >= self.panicked {
            Mood::Panicked
        } else if stress >= self.irritated {
            Mood::Irritated
        } else if stress >= self.anxious {
            Mood::Anxious
        } else if stress >= self.calm {
            Mood::Calm
        } else {
            Mood::Sleeping
        }
    }

    /// The `[min, max)` band containing the given stress value (the top band
    /// is closed at 100).
    pub fn band(&self, stress: f32) -> (f32, f32) {
        match self.classify(stress) {
            Mood::Sleeping => (STRESS_MIN, self.calm),
            Mood::Calm => (self.calm, self.anxious),
            Mood::Anxious => (self.anxious, self.irritated),
            Mood::Irritated => (self.irritated, self.panicked),
            Mood::Panicked => (self.panicked, STRESS_MAX),
        }
    }
}

/// Full tunable settings owned by the [`StressMachine`].
///
/// [`StressMachine`]: crate::machine::StressMachine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gain applied to rising stress (1.0 = crossing one band takes exactly
    /// one transition duration).
    pub sensitivity: f32,

    /// Seconds to traverse one mood band, in either direction.
    pub transition_secs: f32,

    /// Loudness floor (0-255) below which ambient noise is ignored and
    /// stress decays instead.
    pub volume_floor: f32,

    pub thresholds: Thresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            transition_secs: 3.0,
            volume_floor: 20.0,
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Clamp every field into its valid range.
    pub fn normalize(&mut self) {
        let d = Settings::default();
        self.sensitivity = sanitize_f32(self.sensitivity, d.sensitivity).clamp(0.01, 100.0);
        self.transition_secs =
            sanitize_f32(self.transition_secs, d.transition_secs).max(MIN_TRANSITION_SECS);
        self.volume_floor = sanitize_f32(self.volume_floor, d.volume_floor).clamp(0.0, 255.0);
        self.thresholds.normalize();
    }

    /// Merge a partial update, then re-normalize.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(s) = patch.sensitivity {
            self.sensitivity = s;
        }
        if let Some(t) = patch.transition_secs {
            self.transition_secs = t;
        }
        if let Some(v) = patch.volume_floor {
            self.volume_floor = v;
        }
        if let Some(th) = patch.thresholds {
            self.thresholds = th;
        }
        self.normalize();
    }
}

/// A partial settings update: any subset of fields.
///
/// This is what the settings UI pushes and what the repository yields on
/// load — absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub sensitivity: Option<f32>,
    pub transition_secs: Option<f32>,
    pub volume_floor: Option<f32>,
    pub thresholds: Option<Thresholds>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.sensitivity.is_none()
            && self.transition_secs.is_none()
            && self.volume_floor.is_none()
            && self.thresholds.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_bands() {
        let t = Thresholds::default();
        assert_eq!(t.classify(0.0), Mood::Sleeping);
        assert_eq!(t.classify(9.9), Mood::Sleeping);
        assert_eq!(t.classify(10.0), Mood::Calm);
        assert_eq!(t.classify(30.0), Mood::Anxious);
        assert_eq!(t.classify(59.9), Mood::Anxious);
        assert_eq!(t.classify(60.0), Mood::Irritated);
        assert_eq!(t.classify(90.0), Mood::Panicked);
        assert_eq!(t.classify(100.0), Mood::Panicked);
    }

    #[test]
    fn test_band_covers_scale() {
        let t = Thresholds::default();
        assert_eq!(t.band(5.0), (0.0, 10.0));
        assert_eq!(t.band(10.0), (10.0, 30.0));
        assert_eq!(t.band(45.0), (30.0, 60.0));
        assert_eq!(t.band(75.0), (60.0, 90.0));
        assert_eq!(t.band(100.0), (90.0, 100.0));
    }

    #[test]
    fn test_normalize_repairs_out_of_order() {
        let mut t = Thresholds {
            calm: 50.0,
            anxious: 20.0,
            irritated: 80.0,
            panicked: 10.0,
        };
        t.normalize();
        assert!(t.calm <= t.anxious);
        assert!(t.anxious <= t.irritated);
        assert!(t.irritated <= t.panicked);
        // First boundary is kept as given; later ones are pulled up to it.
        assert_eq!(t.calm, 50.0);
        assert_eq!(t.anxious, 50.0);
        assert_eq!(t.panicked, 80.0);
    }

    #[test]
    fn test_normalize_clamps_to_scale() {
        let mut t = Thresholds {
            calm: -5.0,
            anxious: 30.0,
            irritated: 60.0,
            panicked: 300.0,
        };
        t.normalize();
        assert_eq!(t.calm, 0.0);
        assert_eq!(t.panicked, 100.0);
    }

    #[test]
    fn test_normalize_replaces_nan() {
        let mut t = Thresholds {
            calm: f32::NAN,
            anxious: f32::INFINITY,
            irritated: 60.0,
            panicked: 90.0,
        };
        t.normalize();
        assert!(t.calm.is_finite());
        assert!(t.anxious.is_finite());
        assert!(t.anxious <= t.irritated);
    }

    #[test]
    fn test_transition_floor() {
        let mut s = Settings::default();
        s.apply(&SettingsPatch {
            transition_secs: Some(0.0),
            ..Default::default()
        });
        assert_eq!(s.transition_secs, MIN_TRANSITION_SECS);

        s.apply(&SettingsPatch {
            transition_secs: Some(-3.0),
            ..Default::default()
        });
        assert_eq!(s.transition_secs, MIN_TRANSITION_SECS);
    }

    #[test]
    fn test_apply_partial_keeps_other_fields() {
        let mut s = Settings::default();
        s.apply(&SettingsPatch {
            sensitivity: Some(2.5),
            ..Default::default()
        });
        assert_eq!(s.sensitivity, 2.5);
        assert_eq!(s.transition_secs, 3.0);
        assert_eq!(s.thresholds, Thresholds::default());
    }

    #[test]
    fn test_apply_thresholds_normalizes() {
        let mut s = Settings::default();
        s.apply(&SettingsPatch {
            thresholds: Some(Thresholds {
                calm: 90.0,
                anxious: 10.0,
                irritated: 20.0,
                panicked: 30.0,
            }),
            ..Default::default()
        });
        let t = s.thresholds;
        assert!(t.calm <= t.anxious && t.anxious <= t.irritated && t.irritated <= t.panicked);
    }

    #[test]
    fn test_patch_deserializes_from_partial_json() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"sensitivity": 1.5}"#).unwrap();
        assert_eq!(patch.sensitivity, Some(1.5));
        assert!(patch.transition_secs.is_none());
        assert!(patch.thresholds.is_none());
    }

    #[test]
    fn test_empty_patch() {
        assert!(SettingsPatch::default().is_empty());
        let patch = SettingsPatch {
            volume_floor: Some(5.0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
