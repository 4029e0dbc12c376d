//! Dark color theme.

use ratatui::style::Color;

/// Background & Surface colors
pub const BG_DARK: Color = Color::Rgb(18, 18, 24); // #121218
pub const BG_SURFACE: Color = Color::Rgb(24, 24, 32); // #181820
pub const BG_ELEVATED: Color = Color::Rgb(32, 32, 42); // #20202A

/// Primary - Teal
pub const PRIMARY: Color = Color::Rgb(94, 214, 196); // #5ED6C4

/// Accent - Violet (SQL box, button)
pub const ACCENT: Color = Color::Rgb(177, 156, 255); // #B19CFF

/// Text colors
pub const TEXT_PRIMARY: Color = Color::Rgb(230, 230, 235); // #E6E6EB
pub const TEXT_SECONDARY: Color = Color::Rgb(160, 160, 170); // #A0A0AA
pub const TEXT_MUTED: Color = Color::Rgb(100, 100, 110); // #64646E

/// Semantic colors
pub const SUCCESS: Color = Color::Rgb(118, 218, 133); // #76DA85
pub const WARNING: Color = Color::Rgb(255, 193, 94); // #FFC15E
pub const ERROR: Color = Color::Rgb(255, 108, 108); // #FF6C6C

/// Border colors
pub const BORDER_DIM: Color = Color::Rgb(48, 48, 58); // #30303A
pub const BORDER_FOCUS: Color = PRIMARY;

/// Frames for the loading spinner.
pub const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Spinner frame for the current wall-clock time.
pub fn spinner_frame() -> &'static str {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    SPINNER[(millis / 100) as usize % SPINNER.len()]
}
