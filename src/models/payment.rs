//! Payment data carried by a UPN form.
//!
//! The payer is a plain [`Person`]; the recipient composes a person with the
//! account the money is paid into.

use chrono::NaiveDate;

use crate::encoder::record;
use crate::error::UpnError;

/// Name and postal address of a party
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Name (max 33 characters)
    pub name: String,
    /// Street and house number (max 33 characters)
    pub street: String,
    /// Post code and city (max 33 characters)
    pub city: String,
}

impl Person {
    /// Create a person from its three address lines
    pub fn new(name: impl Into<String>, street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            street: street.into(),
            city: city.into(),
        }
    }
}

/// Recipient of the payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Recipient name and address
    pub person: Person,
    /// Account identifier (IBAN-shaped, spaces allowed on input)
    pub account: String,
}

impl Recipient {
    /// Create a recipient
    pub fn new(person: Person, account: impl Into<String>) -> Self {
        Self {
            person,
            account: account.into(),
        }
    }
}

/// Validated payment instruction
///
/// Only obtainable through [`PaymentRecord::new`], which rejects any invalid
/// field. Account and reference are kept in their space-stripped form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    payer: Person,
    recipient: Recipient,
    amount: f64,
    purpose_code: String,
    purpose_text: String,
    due_date: NaiveDate,
    reference: String,
}

impl PaymentRecord {
    /// Validate all fields and build the record
    ///
    /// Fails with the first violated rule, naming the offending field.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payer: Person,
        recipient: Recipient,
        amount: f64,
        purpose_code: impl Into<String>,
        purpose_text: impl Into<String>,
        due_date: NaiveDate,
        reference: impl Into<String>,
    ) -> Result<Self, UpnError> {
        let mut record = Self {
            payer,
            recipient,
            amount,
            purpose_code: purpose_code.into(),
            purpose_text: purpose_text.into(),
            due_date,
            reference: reference.into(),
        };
        let normalized = record::validate(&record)?;
        record.recipient.account = normalized.account;
        record.reference = normalized.reference;
        Ok(record)
    }

    /// Payer
    pub fn payer(&self) -> &Person {
        &self.payer
    }

    /// Recipient
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Amount in currency units
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Four-letter purpose code
    pub fn purpose_code(&self) -> &str {
        &self.purpose_code
    }

    /// Free-text purpose
    pub fn purpose_text(&self) -> &str {
        &self.purpose_text
    }

    /// Payment due date
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Payment reference
    pub fn reference(&self) -> &str {
        &self.reference
    }
}
