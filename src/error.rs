//! Error types for record encoding and rendering.
//!
//! Field validators fail with a [`FieldError`]; everything above them wraps it
//! in [`UpnError`] together with the [`Field`] it was raised for.

use std::fmt;

use thiserror::Error;

/// Rule violated by a single field value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Value has more characters than the field allows.
    #[error("field too long: {len} characters, at most {max} allowed")]
    FieldTooLong {
        /// Character count of the value.
        len: usize,
        /// Maximum allowed character count.
        max: usize,
    },

    /// Value starts or ends with whitespace.
    #[error("leading or trailing whitespace")]
    WhitespacePadding,

    /// Character cannot be written in ISO-8859-2 or is a control character.
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),

    /// Purpose code is not four uppercase letters.
    #[error("purpose code must be four uppercase letters")]
    InvalidPurposeCode,

    /// Account identifier does not match the account pattern.
    #[error("account must be two letters followed by 17 digits")]
    InvalidAccountIdentifier,

    /// Payment reference does not match the reference pattern.
    #[error("reference must be two letters, two digits and up to 22 letters, digits or dashes")]
    InvalidReference,

    /// Amount is negative, not a number, or not below one billion.
    #[error("amount {0} is outside [0, 1e9)")]
    InvalidAmount(f64),

    /// Amount in hundredths does not fit the fixed-width field.
    #[error("amount {0} does not fit in 11 digits")]
    AmountOverflow(String),

    /// Date is not a valid DD.MM.20YY calendar date.
    #[error("invalid date {0:?}, expected DD.MM.YYYY in the 2000s")]
    InvalidDate(String),
}

/// Field of a payment record, used to point at the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Payer name
    PayerName,
    /// Payer street address
    PayerStreet,
    /// Payer city
    PayerCity,
    /// Amount
    Amount,
    /// Purpose code
    PurposeCode,
    /// Purpose text
    PurposeText,
    /// Due date
    DueDate,
    /// Recipient account identifier
    RecipientAccount,
    /// Payment reference
    Reference,
    /// Recipient name
    RecipientName,
    /// Recipient street address
    RecipientStreet,
    /// Recipient city
    RecipientCity,
    /// The assembled record as a whole
    Record,
}

impl Field {
    /// Human readable field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PayerName => "payer name",
            Field::PayerStreet => "payer street",
            Field::PayerCity => "payer city",
            Field::Amount => "amount",
            Field::PurposeCode => "purpose code",
            Field::PurposeText => "purpose text",
            Field::DueDate => "due date",
            Field::RecipientAccount => "recipient account",
            Field::Reference => "reference",
            Field::RecipientName => "recipient name",
            Field::RecipientStreet => "recipient street",
            Field::RecipientCity => "recipient city",
            Field::Record => "record",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error for encoding a payment into a QR symbol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpnError {
    /// A field failed validation.
    #[error("invalid {field}: {source}")]
    Field {
        /// Field that failed.
        field: Field,
        /// Rule that was violated.
        #[source]
        source: FieldError,
    },

    /// Encoded record does not fit the fixed symbol version.
    #[error("record of {len} bytes does not fit a version {version} symbol")]
    CapacityExceeded {
        /// Length of the encoded byte sequence.
        len: usize,
        /// Fixed symbol version.
        version: u8,
    },

    /// Negative quiet-zone width.
    #[error("border must be non-negative, got {0}")]
    InvalidBorder(i32),

    /// Output side does not fit an image buffer.
    #[error("image of {side}x{side} pixels is too large")]
    ImageTooLarge {
        /// Requested side length in pixels.
        side: usize,
    },
}

impl UpnError {
    /// Wrap a field failure with the field it belongs to
    pub fn field(field: Field) -> impl FnOnce(FieldError) -> UpnError {
        move |source| UpnError::Field { field, source }
    }
}
