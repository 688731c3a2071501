// Text glyphs for event readings.

use chrono::{DateTime, NaiveDateTime};
use envsnap_core::constants::MAX_STEM_WORDS;

const RING_MAX: usize = 3;

/// Reading as shown in the detail view; missing readings show "n/a".
pub fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "n/a".to_string(),
    }
}

/// Humidity ring around the temperature dot. The ring grows from none at
/// 0% to three layers at 100%, and is always padded to the same width.
pub fn humidity_ring(humidity_pct: Option<f64>) -> String {
    let layers = match humidity_pct {
        Some(h) if h.is_finite() => {
            let h = h.clamp(0.0, 100.0);
            (h / 100.0 * RING_MAX as f64).round() as usize
        }
        _ => 0,
    };
    let pad = " ".repeat(RING_MAX - layers);
    format!("{}{}●{}{}", pad, "(".repeat(layers), ")".repeat(layers), pad)
}

/// Horizontal loudness bar on a 0-100 scale.
pub fn sound_bar(loudness: Option<f64>, width: usize) -> String {
    let filled = match loudness {
        Some(l) if l.is_finite() => {
            ((l.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
        }
        _ => 0,
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Note stem whose length follows the word count, capped at
/// `MAX_STEM_WORDS`. Any non-zero count shows at least one cell.
pub fn note_stem(word_count: usize, width: usize) -> String {
    let capped = word_count.min(MAX_STEM_WORDS);
    let cells = (capped * width).div_ceil(MAX_STEM_WORDS);
    format!("{}{}", "┃".repeat(cells), " ".repeat(width - cells))
}

/// Human readable `created_at`. RFC 3339 and the spreadsheet's
/// "YYYY-MM-DD HH:MM:SS" layout are reformatted; anything else is shown as is.
pub fn format_created_at(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "(unknown)".to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.format("%Y-%m-%d %H:%M:%S %:z").to_string();
    }
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    trimmed.to_string()
}
