//! upn_qr - UPN QR payment codes
//!
//! Builds the Slovenian UPN QR payment record from payer, recipient and
//! payment data, encodes it into a version 15 QR symbol and renders the symbol
//! as text, SVG or a raster image.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use upn_qr::{PaymentRecord, Person, Recipient, make_from_data};
//! use upn_qr::render::svg::to_svg;
//!
//! let record = PaymentRecord::new(
//!     Person::new("Ime Plačnika", "Plačnikova ulica 1", "Kraj Plačnika"),
//!     Recipient::new(
//!         Person::new("Ime Prejemnika", "Prejemnikova ulica 1", "Kraj Prejemnika"),
//!         "SI56 0430 2000 2997 963",
//!     ),
//!     42.00,
//!     "COST",
//!     "Namen plačila",
//!     NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
//!     "SI12 1234 5678 909",
//! )?;
//! let symbol = make_from_data(&record)?;
//! let svg = to_svg(&symbol, 4)?;
//! # Ok::<(), upn_qr::UpnError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Record encoding (field validation, layout, checksum, QR symbol)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (ModuleGrid, PaymentRecord, QrSymbol, etc.)
pub mod models;
/// Symbol rendering (text, SVG, raster)
pub mod render;

pub use encoder::{EncodedRecord, encode_record};
pub use error::{Field, FieldError, UpnError};
pub use models::{ECLevel, MaskPattern, ModuleGrid, PaymentRecord, Person, QrSymbol, Recipient, Version};

use encoder::{EncodingMode, QrEncoder, QrcodegenEncoder, SymbolOptions};
use rayon::prelude::*;

/// Encode an already serialized record into a QR symbol
///
/// The text is converted to ISO-8859-2 and announced with ECI 4. Fails with
/// `CapacityExceeded` when it does not fit the fixed symbol version.
pub fn make_from_string(record: &str, options: SymbolOptions) -> Result<QrSymbol, UpnError> {
    let bytes = encoder::charset::encode(record).map_err(UpnError::field(Field::Record))?;
    QrcodegenEncoder::new(options).encode(EncodingMode::LATIN2, &bytes)
}

/// Encode a payment record into a QR symbol with default options
pub fn make_from_data(record: &PaymentRecord) -> Result<QrSymbol, UpnError> {
    make_with_encoder(record, &QrcodegenEncoder::new(SymbolOptions::from_env()))
}

/// Encode a payment record using a specific QR encoder
pub fn make_with_encoder<E: QrEncoder + ?Sized>(
    record: &PaymentRecord,
    qr_encoder: &E,
) -> Result<QrSymbol, UpnError> {
    let encoded = encode_record(record)?;
    let bytes = encoded.to_bytes()?;
    qr_encoder.encode(EncodingMode::LATIN2, &bytes)
}

/// Encode many records in parallel
///
/// Results keep the order of `records`; one failing record does not affect
/// the others.
pub fn encode_batch(records: &[PaymentRecord]) -> Vec<Result<EncodedRecord, UpnError>> {
    records.par_iter().map(encode_record).collect()
}
