//! One-line terminal rendering: meter bar, stress value, cat face, caption.

use skittish_core::Reading;
use std::io::Write;

const METER_WIDTH: usize = 20;

/// Build the status line for one frame.
pub fn status_line(reading: &Reading, mood_age_secs: i64) -> String {
    let filled = ((reading.stress / 100.0) * METER_WIDTH as f32).round() as usize;
    let filled = filled.min(METER_WIDTH);
    let bar: String = "#".repeat(filled) + &"-".repeat(METER_WIDTH - filled);
    let d = reading.mood.descriptor();
    format!(
        "[{bar}] {:5.1}  {:<9} {}  \"{}\"  ({}s)",
        reading.stress, d.label, d.face, d.caption, mood_age_secs
    )
}

/// Repaint the status line in place (carriage return, clear to end of line).
pub fn paint(out: &mut impl Write, reading: &Reading, mood_age_secs: i64) -> std::io::Result<()> {
    write!(out, "\r\x1b[2K{}", status_line(reading, mood_age_secs))?;
    out.flush()
}
