use std::fmt;

/// sRGB color, one byte per channel. Renders as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One complete visual theme. Every role a consuming screen reads must be
/// defined here; there is no fallback for a missing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_soft: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_light: Color,
    pub text_lighter: Color,
    pub background: Color,
    pub background_light: Color,
    pub background_soft: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub blue: Color,
}

pub const LIGHT_PALETTE: Palette = Palette {
    primary: Color::rgb(0x6C, 0x63, 0xFF),
    primary_light: Color::rgb(0x8B, 0x84, 0xFF),
    primary_soft: Color::rgb(0xEF, 0xEE, 0xFF),
    secondary: Color::rgb(0xFF, 0x65, 0x84),
    text: Color::rgb(0x21, 0x21, 0x21),
    text_light: Color::rgb(0x61, 0x61, 0x61),
    text_lighter: Color::rgb(0x9E, 0x9E, 0x9E),
    background: Color::rgb(0xFF, 0xFF, 0xFF),
    background_light: Color::rgb(0xF8, 0xF9, 0xFA),
    background_soft: Color::rgb(0xF1, 0xF3, 0xF6),
    border: Color::rgb(0xE0, 0xE0, 0xE0),
    success: Color::rgb(0x4C, 0xAF, 0x50),
    warning: Color::rgb(0xFF, 0xC1, 0x07),
    error: Color::rgb(0xF4, 0x43, 0x36),
    blue: Color::rgb(0x21, 0x96, 0xF3),
};

pub const DARK_PALETTE: Palette = Palette {
    primary: Color::rgb(0x83, 0x7D, 0xFF),
    primary_light: Color::rgb(0xA3, 0x9E, 0xFF),
    primary_soft: Color::rgb(0x29, 0x26, 0x45),
    secondary: Color::rgb(0xFF, 0x7A, 0x94),
    text: Color::rgb(0xEC, 0xEF, 0xF4),
    text_light: Color::rgb(0xB5, 0xBA, 0xC6),
    text_lighter: Color::rgb(0x7E, 0x84, 0x94),
    background: Color::rgb(0x12, 0x12, 0x12),
    background_light: Color::rgb(0x1C, 0x1C, 0x22),
    background_soft: Color::rgb(0x26, 0x26, 0x2E),
    border: Color::rgb(0x35, 0x35, 0x3F),
    success: Color::rgb(0x66, 0xBB, 0x6A),
    warning: Color::rgb(0xFF, 0xCA, 0x28),
    error: Color::rgb(0xEF, 0x53, 0x50),
    blue: Color::rgb(0x42, 0xA5, 0xF5),
};
