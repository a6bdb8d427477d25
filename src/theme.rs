//! Theme loading: btop-style `theme[key]="value"` for cell glyphs and UI colours.

use crate::field::CellState;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Cell glyphs and UI colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Glyph for an empty cell.
    pub empty: String,
    /// Glyph for a wall cell.
    pub hard: String,
    /// Glyph for a cell of the falling block.
    pub falling: String,
    /// Playfield background.
    pub bg: Color,
    /// Border.
    pub div_line: Color,
    /// Board and help text.
    pub main_fg: Color,
    /// Panel title.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

const DEFAULT_BG: Color = Color::Rgb(0x31, 0x35, 0x3F);
const DEFAULT_DIV_LINE: Color = Color::Rgb(0x3F, 0x44, 0x4F);
const DEFAULT_MAIN_FG: Color = Color::Rgb(0xAB, 0xB2, 0xBF);
const DEFAULT_TITLE: Color = Color::Rgb(0xE5, 0xC0, 0x7B);

impl Default for Theme {
    fn default() -> Self {
        Self::fullwidth()
    }
}

impl Theme {
    /// Full-width glyphs: every cell is two terminal columns wide.
    pub fn fullwidth() -> Self {
        Self {
            empty: "\u{3000}".to_string(),
            hard: "＋".to_string(),
            falling: "〇".to_string(),
            bg: DEFAULT_BG,
            div_line: DEFAULT_DIV_LINE,
            main_fg: DEFAULT_MAIN_FG,
            title: DEFAULT_TITLE,
        }
    }

    /// Two-column ASCII glyphs for terminals without CJK fonts.
    pub fn ascii() -> Self {
        Self {
            empty: "  ".to_string(),
            hard: "[]".to_string(),
            falling: "()".to_string(),
            ..Self::fullwidth()
        }
    }

    /// ASCII or full-width glyphs with default colours.
    pub fn base(ascii: bool) -> Self {
        if ascii { Self::ascii() } else { Self::fullwidth() }
    }

    /// Load overrides from a btop-style file on top of `base(ascii)`.
    /// Returns the base theme if `path` is None or the file does not exist.
    pub fn load(path: Option<&Path>, ascii: bool) -> Result<Self, ThemeError> {
        let base = Self::base(ascii);
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(base),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        base.with_overrides(&map)
    }

    fn with_overrides(mut self, map: &HashMap<String, String>) -> Result<Self, ThemeError> {
        for (key, glyph) in [
            ("empty", &mut self.empty),
            ("hard", &mut self.hard),
            ("falling", &mut self.falling),
        ] {
            if let Some(v) = map.get(key) {
                glyph.clone_from(v);
            }
        }
        // `meter_bg` is the btop name for the background.
        for (keys, color) in [
            (&["bg", "meter_bg"][..], &mut self.bg),
            (&["div_line"][..], &mut self.div_line),
            (&["main_fg"][..], &mut self.main_fg),
            (&["title"][..], &mut self.title),
        ] {
            if let Some(v) = keys.iter().find_map(|k| map.get(*k)) {
                *color = parse_hex(v)?;
            }
        }
        Ok(self)
    }

    /// Display glyph for a cell state.
    #[inline]
    pub fn glyph(&self, cell: CellState) -> &str {
        match cell {
            CellState::Empty => &self.empty,
            CellState::Hard => &self.hard,
            CellState::Falling => &self.falling,
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("theme[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(eq) = rest.find('=') {
                    let value = rest[eq + 1..]
                        .trim()
                        .trim_matches('"')
                        .trim_matches('\'')
                        .to_string();
                    if !value.is_empty() {
                        map.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
    map
}

fn hex_byte(s: &str, full: &str) -> Result<u8, ThemeError> {
    u8::from_str_radix(s, 16).map_err(|_| ThemeError::InvalidHex(full.to_string()))
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ThemeError::InvalidHex(s.to_string()));
    }
    let (r, g, b) = match s.len() {
        6 => (
            hex_byte(&s[0..2], s)?,
            hex_byte(&s[2..4], s)?,
            hex_byte(&s[4..6], s)?,
        ),
        3 => (
            hex_byte(&s[0..1], s)? * 17,
            hex_byte(&s[1..2], s)? * 17,
            hex_byte(&s[2..3], s)? * 17,
        ),
        _ => return Err(ThemeError::InvalidHex(s.to_string())),
    };
    Ok(Color::Rgb(r, g, b))
}
