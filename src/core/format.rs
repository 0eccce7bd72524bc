//! Purpose: Model the fixed legacy formatting vocabulary: colours, styles, reset.
//! Exports: `Rgb`, `Colour`, `Style`, `Styles`, `Format`.
//! Role: Value vocabulary shared by components, parsers, and wire conversion.
//! Invariants: `Rgb` always holds a 24-bit value; `Styles` bits stay within the five defined flags.
//! Invariants: The palette is the fixed vanilla set; code lookup is case-insensitive.

use crate::core::error::{Error, ErrorKind};

/// Packed 24-bit colour, `0x000000..=0xFFFFFF`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rgb(u32);

impl Rgb {
    pub const MAX: u32 = 0xFF_FF_FF;

    pub fn new(value: u32) -> Result<Self, Error> {
        Self::check_range(value)?;
        Ok(Self(value))
    }

    pub fn check_range(value: u32) -> Result<(), Error> {
        if value > Self::MAX {
            return Err(Error::new(ErrorKind::Range)
                .with_message(format!("colour {value:#x} exceeds 24-bit range"))
                .with_hint("Colours are packed RGB: 0x000000..=0xFFFFFF."));
        }
        Ok(())
    }

    pub const fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn bytes(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Lowercase six-digit hex, no `#` prefix.
    pub fn hex(self) -> String {
        format!("{:06x}", self.0)
    }

    /// Accepts `rrggbb` with or without a leading `#`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }
}

/// The sixteen legacy named colours.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Colour {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl Colour {
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
        }
    }

    /// Vanilla palette value.
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::from_bytes(0, 0, 0),
            Self::DarkBlue => Rgb::from_bytes(0, 0, 170),
            Self::DarkGreen => Rgb::from_bytes(0, 170, 0),
            Self::DarkAqua => Rgb::from_bytes(0, 170, 170),
            Self::DarkRed => Rgb::from_bytes(170, 0, 0),
            Self::DarkPurple => Rgb::from_bytes(170, 0, 170),
            Self::Gold => Rgb::from_bytes(255, 170, 0),
            Self::Gray => Rgb::from_bytes(170, 170, 170),
            Self::DarkGray => Rgb::from_bytes(85, 85, 85),
            Self::Blue => Rgb::from_bytes(85, 85, 255),
            Self::Green => Rgb::from_bytes(85, 255, 85),
            Self::Aqua => Rgb::from_bytes(85, 255, 255),
            Self::Red => Rgb::from_bytes(255, 85, 85),
            Self::LightPurple => Rgb::from_bytes(255, 85, 255),
            Self::Yellow => Rgb::from_bytes(255, 255, 85),
            Self::White => Rgb::from_bytes(255, 255, 255),
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|colour| colour.code() == code)
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|colour| colour.wire_name() == name)
    }

    /// Exact palette match; non-palette values have no legacy name.
    pub fn from_rgb(rgb: Rgb) -> Option<Self> {
        Self::ALL.into_iter().find(|colour| colour.rgb() == rgb)
    }
}

/// The five legacy styles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Style {
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
}

impl Style {
    pub const ALL: [Self; 5] = [
        Self::Obfuscated,
        Self::Bold,
        Self::Strikethrough,
        Self::Underline,
        Self::Italic,
    ];

    pub const fn code(self) -> char {
        match self {
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underline => 'n',
            Self::Italic => 'o',
        }
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Obfuscated => "obfuscated",
            Self::Bold => "bold",
            Self::Strikethrough => "strikethrough",
            Self::Underline => "underlined",
            Self::Italic => "italic",
        }
    }

    pub const fn bit(self) -> u8 {
        match self {
            Self::Obfuscated => 1 << 0,
            Self::Bold => 1 << 1,
            Self::Strikethrough => 1 << 2,
            Self::Underline => 1 << 3,
            Self::Italic => 1 << 4,
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|style| style.code() == code)
    }
}

/// Bitmask over the five style flags.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Styles(u8);

impl Styles {
    pub const EMPTY: Self = Self(0);
    const MASK: u8 = 0b0001_1111;

    pub fn from_bits(bits: u8) -> Result<Self, Error> {
        if bits & !Self::MASK != 0 {
            return Err(Error::new(ErrorKind::Range)
                .with_message(format!("style bits {bits:#07b} outside the five defined flags")));
        }
        Ok(Self(bits))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, style: Style) -> bool {
        self.0 & style.bit() != 0
    }

    pub const fn with(self, style: Style) -> Self {
        Self(self.0 | style.bit())
    }

    pub fn insert(&mut self, style: Style) {
        self.0 |= style.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Style> {
        Style::ALL.into_iter().filter(move |style| self.contains(*style))
    }
}

/// Closed sum of everything a single legacy code can mean.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Colour(Colour),
    Style(Style),
    Reset,
}

impl Format {
    pub fn from_code(code: char) -> Option<Self> {
        if code.eq_ignore_ascii_case(&'r') {
            return Some(Self::Reset);
        }
        if let Some(colour) = Colour::from_code(code) {
            return Some(Self::Colour(colour));
        }
        Style::from_code(code).map(Self::Style)
    }

    pub const fn code(self) -> char {
        match self {
            Self::Colour(colour) => colour.code(),
            Self::Style(style) => style.code(),
            Self::Reset => 'r',
        }
    }
}
