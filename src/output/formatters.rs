//! Formatting utilities for terminal output

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for one row of the win distribution, scaled to the largest row
#[must_use]
pub fn distribution_bar(count: u32, max: u32, width: usize) -> String {
    create_progress_bar(f64::from(count), f64::from(max), width)
}

/// Uppercase a word for display, keeping accents
#[must_use]
pub fn display_word(word: &str) -> String {
    word.to_uppercase()
}
