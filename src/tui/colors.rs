// Color palette shared by every screen
use ratatui::style::Color;

/// Delete / error accent
pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 83, 80);
/// Keep / success accent
pub const ACCENT_SECONDARY: Color = Color::Rgb(102, 187, 106);
/// Titles and focus
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(100, 181, 246);

pub const TEXT_PRIMARY: Color = Color::Rgb(236, 239, 241);
pub const TEXT_SECONDARY: Color = Color::Rgb(144, 164, 174);

pub const BG_DARK: Color = Color::Rgb(24, 26, 31);
pub const BG_CARD: Color = Color::Rgb(38, 42, 50);
pub const BORDER_COLOR: Color = Color::Rgb(84, 110, 122);

/// RGB components of the badge colors, for fading
pub const KEEP_RGB: (u8, u8, u8) = (102, 187, 106);
pub const DELETE_RGB: (u8, u8, u8) = (239, 83, 80);
pub const CARD_RGB: (u8, u8, u8) = (38, 42, 50);
pub const BORDER_RGB: (u8, u8, u8) = (84, 110, 122);
