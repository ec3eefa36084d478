//! Fixed UPN QR layout constants and environment overrides.

use std::sync::OnceLock;

use crate::models::MaskPattern;

/// Literal tag opening every record
pub const UPN_TAG: &str = "UPNQR";

/// Maximum characters in a name, street or city line
pub const MAX_PERSON_FIELD_LEN: usize = 33;

/// Maximum characters in the free-text purpose
pub const MAX_PURPOSE_TEXT_LEN: usize = 42;

/// Width of the zero-padded amount field (hundredths)
pub const AMOUNT_DIGITS: usize = 11;

/// Amounts must be strictly below this value
pub const MAX_AMOUNT: f64 = 1e9;

/// Added to the summed field lengths: one per field separator
pub const CHECKSUM_OFFSET: usize = 19;

/// Account identifiers and references may be entered with grouping spaces
pub const STRIP_SPACES: bool = true;

/// UPN symbols are always version 15
pub const SYMBOL_VERSION: u8 = 15;

/// ECI assignment number for ISO-8859-2
pub const ECI_ISO_8859_2: u32 = 4;

/// Quiet zone used when no border is requested
pub const DEFAULT_BORDER: i32 = 4;

fn parse_env_i32(value: Option<String>, default: i32) -> i32 {
    value
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(default)
}

/// Parse a `UPNQR_MASK` value; anything but 0-7 means automatic selection
pub(crate) fn parse_mask(value: Option<String>) -> Option<MaskPattern> {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .and_then(MaskPattern::from_bits)
}

/// Parse a `UPNQR_BORDER` value, clamping negative widths to 0
pub(crate) fn parse_border(value: Option<String>) -> i32 {
    parse_env_i32(value, DEFAULT_BORDER).max(0)
}

static FORCED_MASK: OnceLock<Option<MaskPattern>> = OnceLock::new();

/// Mask forced through `UPNQR_MASK` (0-7), automatic selection otherwise
pub fn forced_mask() -> Option<MaskPattern> {
    *FORCED_MASK.get_or_init(|| parse_mask(std::env::var("UPNQR_MASK").ok()))
}

static BORDER: OnceLock<i32> = OnceLock::new();

/// Default quiet-zone width, overridable with `UPNQR_BORDER`
pub fn default_border() -> i32 {
    *BORDER.get_or_init(|| parse_border(std::env::var("UPNQR_BORDER").ok()))
}
