//! UPN record encoding
//!
//! This module turns payment data into the bytes placed in the QR symbol:
//! - Field validation and formatting
//! - Record layout and checksum
//! - ISO-8859-2 conversion
//! - Symbol construction through a pluggable QR encoder

/// ISO-8859-2 conversion and representability checks
pub mod charset;
pub mod config;
/// Per-field validators and formatters
pub mod fields;
/// Record assembly and checksum
pub mod record;
/// QR encoder seam and `qrcodegen` implementation
pub mod symbol;

pub use record::{EncodedRecord, encode_record};
pub use symbol::{EncodingMode, QrEncoder, QrcodegenEncoder, SymbolOptions};
