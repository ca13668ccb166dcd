use crate::projector::Mark;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub function: Color,
    pub type_name: Color, // Cyan for type names
    pub bar: Color,
    pub comparing: Color,
    pub mutating: Color,
    pub special: Color,
    pub settled: Color,
    pub dimmed: Color, // Outside the active search range
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    function: Color::Rgb(249, 226, 175),       // Yellow for functions
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal for type names
    bar: Color::Rgb(137, 180, 250),
    comparing: Color::Rgb(249, 226, 175),
    mutating: Color::Rgb(243, 139, 168),
    special: Color::Rgb(203, 166, 247), // Mauve for pivots, keys and visits
    settled: Color::Rgb(166, 227, 161),
    dimmed: Color::Rgb(69, 71, 90),
};

impl Theme {
    pub fn mark(&self, mark: Mark) -> Color {
        match mark {
            Mark::Default => self.bar,
            Mark::Settled => self.settled,
            Mark::Special => self.special,
            Mark::Comparing => self.comparing,
            Mark::Mutating => self.mutating,
        }
    }
}
