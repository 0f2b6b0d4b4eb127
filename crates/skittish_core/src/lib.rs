//! # skittish_core
//!
//! The nervous system of a noise-shy cartoon cat. Ambient loudness is
//! integrated frame by frame into a bounded stress level, which is then
//! classified into one of five moods:
//!
//! - **Sleeping**: nothing is happening, the cat is out cold
//! - **Calm**: awake, unbothered
//! - **Anxious**: ears up, something is going on
//! - **Irritated**: actively annoyed
//! - **Panicked**: full fur-on-end alarm
//!
//! ## Architecture
//!
//! The [`StressMachine`] is pure synchronous arithmetic: once per frame the
//! host feeds it a loudness sample and it returns the updated
//! `{stress, mood}` pair, invoking a registered observer on the frame a mood
//! boundary is crossed. Everything around it — where loudness comes from,
//! where settings live, how the cat is drawn — enters through the two trait
//! seams defined here and implemented by the other crates.

pub mod machine;
pub mod mood;
pub mod settings;

pub use machine::{Reading, StressMachine, DEFAULT_FRAME_RATE};
pub use mood::{Mood, MoodDescriptor};
pub use settings::{Settings, SettingsPatch, Thresholds, MIN_TRANSITION_SECS};

/// Supplier of one scalar loudness reading per frame.
///
/// Values are expected in `[0, 255]` (the 8-bit magnitude scale of the
/// original analyser); a source that is not actively capturing returns 0,
/// which drives the machine toward [`Mood::Sleeping`].
pub trait LoudnessSource: Send {
    fn sample(&mut self) -> f32;
}

/// Narrow persistence seam for tunable settings.
///
/// `load` returns whatever subset of fields survived deserialization — a
/// missing or malformed field is skipped, never an error. `save` persists the
/// full current settings.
pub trait SettingsRepository: Send {
    fn load(&self) -> Option<SettingsPatch>;
    fn save(&self, settings: &Settings) -> anyhow::Result<()>;
}
