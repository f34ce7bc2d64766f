//! Inline color markup
//!
//! Interpreter output may embed `ESC[<code>m ... ESC[0m` to color part of a
//! line. Codes 30-37 and 90-97 pick one of eight logical colors, `0` resets.
//! The rendering side splits text on the escape pattern and tracks the
//! active color across segments.

use lazy_static::lazy_static;
use regex_lite::Regex;

lazy_static! {
    static ref ESCAPE: Regex = Regex::new(r"\x1b\[(\d{1,2})m").unwrap();
}

pub const RESET: &str = "\x1b[0m";

pub const RED: u8 = 31;
pub const BLUE: u8 = 34;
pub const BRIGHT_YELLOW: u8 = 93;
pub const BRIGHT_CYAN: u8 = 96;

/// Wrap `text` in a color escape and a reset.
pub fn paint(code: u8, text: &str) -> String {
    format!("\x1b[{}m{}{}", code, text, RESET)
}

/// Logical colors, rendered through theme tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Map an escape code to its color. Bright codes share the base color.
    pub fn from_code(code: u8) -> Option<Self> {
        let base = match code {
            30..=37 => code - 30,
            90..=97 => code - 90,
            _ => return None,
        };
        Some(match base {
            0 => Self::Black,
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Yellow,
            4 => Self::Blue,
            5 => Self::Magenta,
            6 => Self::Cyan,
            _ => Self::White,
        })
    }

    /// Theme token the renderer should paint this color with.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Black => "muted-foreground",
            Self::Red => "destructive",
            Self::Green => "chart-2",
            Self::Yellow => "chart-4",
            Self::Blue => "primary",
            Self::Magenta => "chart-5",
            Self::Cyan => "chart-1",
            Self::White => "foreground",
        }
    }
}

/// A run of text with the color active over it (`None` = default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub color: Option<Color>,
    pub text: String,
}

/// Split a line into colored segments.
///
/// Unknown codes leave the active color unchanged. Empty runs are dropped.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut color = None;
    let mut last = 0;

    let mut push = |color: Option<Color>, run: &str| {
        if !run.is_empty() {
            result.push(Segment { color, text: run.to_string() });
        }
    };

    for caps in ESCAPE.captures_iter(text) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push(color, &text[last..whole.start()]);
        last = whole.end();

        match code.as_str().parse::<u8>() {
            Ok(0) => color = None,
            Ok(code) => {
                if let Some(c) = Color::from_code(code) {
                    color = Some(c);
                }
            }
            Err(_) => {}
        }
    }
    push(color, &text[last..]);

    result
}

/// Remove all markup, keeping the text.
pub fn strip(text: &str) -> String {
    ESCAPE.replace_all(text, "").into_owned()
}
