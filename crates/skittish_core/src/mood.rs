//! The five discrete moods and their display descriptors.

use serde::{Deserialize, Serialize};

/// Discrete mood band, derived from stress via [`Thresholds::classify`].
///
/// Never assigned directly; ordering matters (each variant sits one band
/// above the previous).
///
/// [`Thresholds::classify`]: crate::settings::Thresholds::classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Sleeping,
    Calm,
    Anxious,
    Irritated,
    Panicked,
}

impl Mood {
    /// Display descriptor for this mood (notification payload).
    pub fn descriptor(&self) -> &'static MoodDescriptor {
        &DESCRIPTORS[*self as usize]
    }

    /// All moods, lowest band first.
    pub const ALL: [Mood; 5] = [
        Mood::Sleeping,
        Mood::Calm,
        Mood::Anxious,
        Mood::Irritated,
        Mood::Panicked,
    ];
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descriptor().label)
    }
}

/// Static display record attached to each mood: which image to show, what the
/// caption says, and which style class the presentation layer applies.
#[derive(Debug, Clone, Serialize)]
pub struct MoodDescriptor {
    pub mood: Mood,
    pub label: &'static str,
    pub image: &'static str,
    pub caption: &'static str,
    pub style_class: &'static str,
    /// Terminal stand-in for the image asset.
    pub face: &'static str,
}

static DESCRIPTORS: [MoodDescriptor; 5] = [
    MoodDescriptor {
        mood: Mood::Sleeping,
        label: "sleeping",
        image: "cat_sleeping.png",
        caption: "zzz...",
        style_class: "mood-sleeping",
        face: "(=-ω-=)",
    },
    MoodDescriptor {
        mood: Mood::Calm,
        label: "calm",
        image: "cat_calm.png",
        caption: "all is well",
        style_class: "mood-calm",
        face: "(=^ω^=)",
    },
    MoodDescriptor {
        mood: Mood::Anxious,
        label: "anxious",
        image: "cat_anxious.png",
        caption: "what was that?",
        style_class: "mood-anxious",
        face: "(=o.o=)",
    },
    MoodDescriptor {
        mood: Mood::Irritated,
        label: "irritated",
        image: "cat_irritated.png",
        caption: "keep it down!",
        style_class: "mood-irritated",
        face: "(=`ε´=)",
    },
    MoodDescriptor {
        mood: Mood::Panicked,
        label: "panicked",
        image: "cat_panicked.png",
        caption: "TOO LOUD!!",
        style_class: "mood-panicked",
        face: "(=ﾟΔﾟ=)!!",
    },
];
