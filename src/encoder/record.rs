//! UPN record assembly
//!
//! A record is 19 fields, a 3-digit checksum and one reserved empty line, all
//! separated by `\n`. Blank fields are positions the payer side of the form
//! leaves empty.

use super::charset;
use super::config::{CHECKSUM_OFFSET, MAX_PERSON_FIELD_LEN, MAX_PURPOSE_TEXT_LEN, UPN_TAG};
use super::fields::{
    format_amount, format_date, validate_account_identifier, validate_amount, validate_date,
    validate_purpose_code, validate_reference, validate_text,
};
use crate::error::{Field, FieldError, UpnError};
use crate::models::PaymentRecord;

/// Number of data fields before the checksum
pub const FIELD_COUNT: usize = 19;

type Check = fn(&PaymentRecord, &mut Normalized) -> Result<(), FieldError>;

/// Ordered validation pipeline, one entry per record field
fn checks() -> [(Field, Check); 12] {
    [
        (Field::PayerName, |r, _| {
            validate_text(&r.payer().name, MAX_PERSON_FIELD_LEN).map(drop)
        }),
        (Field::PayerStreet, |r, _| {
            validate_text(&r.payer().street, MAX_PERSON_FIELD_LEN).map(drop)
        }),
        (Field::PayerCity, |r, _| {
            validate_text(&r.payer().city, MAX_PERSON_FIELD_LEN).map(drop)
        }),
        (Field::Amount, |r, _| validate_amount(r.amount()).map(drop)),
        (Field::PurposeCode, |r, _| validate_purpose_code(r.purpose_code()).map(drop)),
        (Field::PurposeText, |r, _| {
            validate_text(r.purpose_text(), MAX_PURPOSE_TEXT_LEN).map(drop)
        }),
        (Field::DueDate, |r, _| validate_date(&format_date(r.due_date())).map(drop)),
        (Field::RecipientAccount, |r, n| {
            n.account = validate_account_identifier(&r.recipient().account)?;
            Ok(())
        }),
        (Field::Reference, |r, n| {
            n.reference = validate_reference(r.reference())?;
            Ok(())
        }),
        (Field::RecipientName, |r, _| {
            validate_text(&r.recipient().person.name, MAX_PERSON_FIELD_LEN).map(drop)
        }),
        (Field::RecipientStreet, |r, _| {
            validate_text(&r.recipient().person.street, MAX_PERSON_FIELD_LEN).map(drop)
        }),
        (Field::RecipientCity, |r, _| {
            validate_text(&r.recipient().person.city, MAX_PERSON_FIELD_LEN).map(drop)
        }),
    ]
}

/// Values rewritten by validation
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Normalized {
    pub(crate) account: String,
    pub(crate) reference: String,
}

/// Run every field check once, in order, stopping at the first failure
pub(crate) fn validate(record: &PaymentRecord) -> Result<Normalized, UpnError> {
    let mut normalized = Normalized::default();
    for (field, check) in checks() {
        check(record, &mut normalized).map_err(UpnError::field(field))?;
    }
    Ok(normalized)
}

/// Compute the checksum line for a list of fields
pub fn checksum<S: AsRef<str>>(fields: &[S]) -> String {
    let total: usize = fields.iter().map(|f| f.as_ref().chars().count()).sum();
    format!("{:03}", total + CHECKSUM_OFFSET)
}

/// Serialized UPN record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRecord {
    fields: Vec<String>,
    checksum: String,
    text: String,
}

impl EncodedRecord {
    /// Full record text, `\n`-separated
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The 19 data fields in layout order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Three-digit checksum line
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Record as ISO-8859-2 bytes, ready for the QR encoder
    pub fn to_bytes(&self) -> Result<Vec<u8>, UpnError> {
        charset::encode(&self.text).map_err(UpnError::field(Field::Record))
    }
}

impl std::fmt::Display for EncodedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validate a payment record and serialize it
pub fn encode_record(record: &PaymentRecord) -> Result<EncodedRecord, UpnError> {
    let normalized = validate(record)?;
    let amount = format_amount(record.amount()).map_err(UpnError::field(Field::Amount))?;
    let payer = record.payer();
    let recipient = &record.recipient().person;

    let fields: Vec<String> = vec![
        UPN_TAG.to_string(),
        String::new(), // payer account
        String::new(), // deposit
        String::new(), // withdrawal
        String::new(), // payer reference
        payer.name.clone(),
        payer.street.clone(),
        payer.city.clone(),
        amount,
        String::new(), // payment date
        String::new(), // urgent
        record.purpose_code().to_string(),
        record.purpose_text().to_string(),
        format_date(record.due_date()),
        normalized.account,
        normalized.reference,
        recipient.name.clone(),
        recipient.street.clone(),
        recipient.city.clone(),
    ];
    debug_assert_eq!(fields.len(), FIELD_COUNT);

    let checksum = checksum(&fields);
    let mut lines: Vec<&str> = fields.iter().map(String::as_str).collect();
    lines.push(&checksum);
    lines.push(""); // reserved
    let text = lines.join("\n");

    tracing::debug!(
        checksum = %checksum,
        bytes = text.chars().count(),
        "encoded UPN record"
    );

    Ok(EncodedRecord {
        fields,
        checksum,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, Recipient};
    use chrono::NaiveDate;

    fn sample_record() -> PaymentRecord {
        PaymentRecord::new(
            Person::new("Ime Plačnika", "Plačnikova ulica 1", "Kraj Plačnika"),
            Recipient::new(
                Person::new("Ime Prejemnika", "Prejemnikova ulica 1", "Kraj Prejemnika"),
                "SI56043020002997963",
            ),
            42.0,
            "COST",
            "Namen plačila",
            NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            "SI1212345678909",
        )
        .unwrap()
    }

    #[test]
    fn test_sample_record_layout() {
        let encoded = encode_record(&sample_record()).unwrap();
        let expected = "UPNQR\n\n\n\n\nIme Plačnika\nPlačnikova ulica 1\nKraj Plačnika\n\
                        00000004200\n\n\nCOST\nNamen plačila\n01.05.2022\n\
                        SI56043020002997963\nSI1212345678909\nIme Prejemnika\n\
                        Prejemnikova ulica 1\nKraj Prejemnika\n188\n";
        assert_eq!(encoded.as_str(), expected);
        assert_eq!(encoded.fields().len(), FIELD_COUNT);
        assert_eq!(encoded.fields()[8], "00000004200");
        assert_eq!(encoded.checksum(), "188");
    }

    #[test]
    fn test_line_count() {
        let encoded = encode_record(&sample_record()).unwrap();
        // 19 fields, checksum, reserved
        assert_eq!(encoded.as_str().split('\n').count(), 21);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let record = sample_record();
        let a = encode_record(&record).unwrap();
        let b = encode_record(&record).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.checksum(), b.checksum());
    }

    #[test]
    fn test_checksum_padding() {
        assert_eq!(checksum(&["UPNQR"]), "024");
        assert_eq!(checksum::<&str>(&[]), "019");
        assert_eq!(checksum(&["a".repeat(990)]), "1009");
    }

    #[test]
    fn test_checksum_counts_characters() {
        assert_eq!(checksum(&["čšž"]), checksum(&["csz"]));
    }

    #[test]
    fn test_to_bytes_is_single_byte() {
        let encoded = encode_record(&sample_record()).unwrap();
        let bytes = encoded.to_bytes().unwrap();
        assert_eq!(bytes.len(), encoded.as_str().chars().count());
    }

    #[test]
    fn test_first_failure_wins() {
        let err = PaymentRecord::new(
            Person::new(" Ime", "Ulica", "Kraj"),
            Recipient::new(Person::new("Ime", "Ulica", "Kraj"), "bad"),
            -1.0,
            "cost",
            "Namen",
            NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            "bad",
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpnError::Field {
                field: Field::PayerName,
                source: FieldError::WhitespacePadding,
            }
        );
    }

    #[test]
    fn test_due_date_outside_2000s() {
        let err = PaymentRecord::new(
            Person::new("Ime", "Ulica", "Kraj"),
            Recipient::new(Person::new("Ime", "Ulica", "Kraj"), "SI56043020002997963"),
            1.0,
            "COST",
            "Namen",
            NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            "SI1212345678909",
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpnError::Field {
                field: Field::DueDate,
                source: FieldError::InvalidDate("31.12.1999".to_string()),
            }
        );
    }

    #[test]
    fn test_amount_too_large() {
        let err = PaymentRecord::new(
            Person::new("Ime", "Ulica", "Kraj"),
            Recipient::new(Person::new("Ime", "Ulica", "Kraj"), "SI56043020002997963"),
            1e9,
            "COST",
            "Namen",
            NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            "SI1212345678909",
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpnError::Field {
                field: Field::Amount,
                source: FieldError::InvalidAmount(1e9),
            }
        );
    }

    #[test]
    fn test_account_reported_before_reference() {
        let err = PaymentRecord::new(
            Person::new("Ime", "Ulica", "Kraj"),
            Recipient::new(Person::new(" Ime", "Ulica", "Kraj"), "SI56 0430"),
            1.0,
            "COST",
            "Namen",
            NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            "bad",
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpnError::Field {
                field: Field::RecipientAccount,
                source: FieldError::InvalidAccountIdentifier,
            }
        );
    }

    #[test]
    fn test_reference_reported_before_recipient_name() {
        let err = PaymentRecord::new(
            Person::new("Ime", "Ulica", "Kraj"),
            Recipient::new(Person::new(" Ime", "Ulica", "Kraj"), "SI56043020002997963"),
            1.0,
            "COST",
            "Namen",
            NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            "bad",
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpnError::Field {
                field: Field::Reference,
                source: FieldError::InvalidReference,
            }
        );
    }

    #[test]
    fn test_validate_returns_normalized_values() {
        let record = sample_record();
        let normalized = validate(&record).unwrap();
        assert_eq!(
            normalized,
            Normalized {
                account: "SI56043020002997963".to_string(),
                reference: "SI1212345678909".to_string(),
            }
        );
    }
}
