use super::{Grid, check_border, transform_rows};
use crate::error::UpnError;

/// Strings used for each module
///
/// The default is meant for dark terminals: black modules are left blank and
/// white modules are drawn with full blocks. Each module is two characters
/// wide so the symbol stays roughly square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// String for a black module
    pub black: String,
    /// String for a white module
    pub white: String,
}

impl TextStyle {
    /// Style with custom module strings
    pub fn new(black: impl Into<String>, white: impl Into<String>) -> Self {
        Self {
            black: black.into(),
            white: white.into(),
        }
    }

    /// Swap black and white, for light terminals
    pub fn inverted(self) -> Self {
        Self {
            black: self.white,
            white: self.black,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("  ", "\u{2588}\u{2588}")
    }
}

/// Render a grid as lines of text
pub fn to_text<G: Grid + ?Sized>(grid: &G, style: &TextStyle, border: i32) -> Result<String, UpnError> {
    let border = check_border(border)?;
    let to_chars = |_: i32, _: i32, module: bool| {
        if module {
            style.black.as_str()
        } else {
            style.white.as_str()
        }
    };
    let lines: Vec<String> = transform_rows(grid, border, to_chars)
        .map(|row| row.concat())
        .collect();
    Ok(lines.join("\n"))
}
