use crossterm::style::Color;

// Base ANSI colours only.
pub const GREEN: Color = Color::Green;
pub const YELLOW: Color = Color::Yellow;
pub const RED: Color = Color::Red;
pub const BLUE: Color = Color::Blue;
pub const DARK_GREY: Color = Color::DarkGrey;
