use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::charge::{Amount, AmountError};
use crate::protocol::{
    CHECKSUM_VALUE_LEN, FieldTag, MERCHANT_ACCOUNT_GUI_TAG, MERCHANT_ACCOUNT_KEY_TAG,
    PAYLOAD_FORMAT_VERSION, REFERENCE_LABEL_TAG,
};

use super::crc::{crc16, render_checksum};

const HEADER_LEN: usize = 4;

/// Errors returned while decoding a BR Code payload.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DecodeError {
    #[error("payload contains non-ASCII characters")]
    NonAscii,
    #[error("payload is truncated at offset {offset}")]
    Truncated { offset: usize },
    #[error("field at offset {offset} has an invalid length prefix `{raw}`")]
    InvalidLength { offset: usize, raw: String },
    #[error("payload does not end with a `6304` checksum field")]
    MissingChecksum,
    #[error("checksum `{raw}` is not four hexadecimal digits")]
    InvalidChecksum { raw: String },
    #[error("checksum mismatch: payload carries {expected:04X} but content hashes to {actual:04X}")]
    ChecksumMismatch { expected: u16, actual: u16 },
    #[error("unsupported payload format indicator `{value}`")]
    UnsupportedFormat { value: String },
    #[error("required field {tag} is missing")]
    MissingField { tag: String },
    #[error("transaction amount `{value}` is invalid")]
    InvalidAmount {
        value: String,
        #[source]
        source: AmountError,
    },
}

/// One raw TLV field sliced out of a payload.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RawField<'a> {
    tag: &'a str,
    value: &'a str,
}

impl<'a> RawField<'a> {
    /// Returns the two-digit tag.
    #[must_use]
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    /// Returns the field value.
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.value
    }
}

/// Semantic fields recovered from a verified payload.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DecodedPayload {
    format_indicator: String,
    merchant_account_gui: Option<String>,
    key: String,
    merchant_category_code: String,
    currency: String,
    amount: Option<Amount>,
    country_code: String,
    name: String,
    city: String,
    reference_label: Option<String>,
    #[serde(serialize_with = "serialize_checksum")]
    checksum: u16,
}

impl DecodedPayload {
    /// Payload format indicator (tag `00`).
    #[must_use]
    pub fn format_indicator(&self) -> &str {
        &self.format_indicator
    }

    /// Arrangement GUI from tag `26/00`, when present.
    #[must_use]
    pub fn merchant_account_gui(&self) -> Option<&str> {
        self.merchant_account_gui.as_deref()
    }

    /// Pix key from tag `26/01`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Merchant category code (tag `52`).
    #[must_use]
    pub fn merchant_category_code(&self) -> &str {
        &self.merchant_category_code
    }

    /// ISO 4217 numeric currency (tag `53`).
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Transaction amount (tag `54`), absent on open-amount codes.
    #[must_use]
    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    /// Country code (tag `58`).
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Beneficiary name (tag `59`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Beneficiary city (tag `60`).
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Reference label from tag `62/05`, when present.
    #[must_use]
    pub fn reference_label(&self) -> Option<&str> {
        self.reference_label.as_deref()
    }

    /// Verified checksum value.
    #[must_use]
    pub fn checksum(&self) -> u16 {
        self.checksum
    }
}

/// Parses and verifies BR Code payloads.
pub struct PayloadDecoder;

impl PayloadDecoder {
    /// Decodes a payload, verifying its trailing checksum.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is malformed, the checksum does not
    /// match, or a required field is missing.
    ///
    /// ```
    /// use pixcode::PayloadDecoder;
    ///
    /// let decoded = PayloadDecoder::decode(
    ///     "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-426655440000\
    ///      5204000053039865802BR5913Fulano de Tal6008BRASILIA62070503***63041D3D",
    /// )?;
    /// assert_eq!("Fulano de Tal", decoded.name());
    /// assert_eq!(None, decoded.amount());
    /// # Ok::<(), pixcode::DecodeError>(())
    /// ```
    #[instrument(level = "debug", fields(payload_len = payload.len()))]
    pub fn decode(payload: &str) -> Result<DecodedPayload, DecodeError> {
        let raw_fields = Self::split_fields(payload)?;
        let checksum = verify_checksum(payload, &raw_fields)?;
        let fields = classify(&raw_fields);

        let format_indicator = required(&fields, FieldTag::PayloadFormatIndicator)?;
        if format_indicator != PAYLOAD_FORMAT_VERSION {
            return Err(DecodeError::UnsupportedFormat {
                value: format_indicator.to_string(),
            });
        }

        let merchant_account = Self::split_fields(required(
            &fields,
            FieldTag::MerchantAccountInformation,
        )?)?;
        let key = find(&merchant_account, MERCHANT_ACCOUNT_KEY_TAG).ok_or_else(|| {
            DecodeError::MissingField {
                tag: format!(
                    "{}/{MERCHANT_ACCOUNT_KEY_TAG}",
                    FieldTag::MerchantAccountInformation.code()
                ),
            }
        })?;

        let amount = optional(&fields, FieldTag::TransactionAmount)
            .map(|raw| {
                Amount::parse_field(raw)
                    .map_err(|source| DecodeError::InvalidAmount {
                        value: raw.to_string(),
                        source,
                    })
            })
            .transpose()?;

        let reference_label = match optional(&fields, FieldTag::AdditionalDataField) {
            Some(additional) => {
                find(&Self::split_fields(additional)?, REFERENCE_LABEL_TAG).map(str::to_string)
            }
            None => None,
        };

        Ok(DecodedPayload {
            format_indicator: format_indicator.to_string(),
            merchant_account_gui: find(&merchant_account, MERCHANT_ACCOUNT_GUI_TAG)
                .map(str::to_string),
            key: key.to_string(),
            merchant_category_code: required(&fields, FieldTag::MerchantCategoryCode)?
                .to_string(),
            currency: required(&fields, FieldTag::TransactionCurrency)?.to_string(),
            amount,
            country_code: required(&fields, FieldTag::CountryCode)?.to_string(),
            name: required(&fields, FieldTag::MerchantName)?.to_string(),
            city: required(&fields, FieldTag::MerchantCity)?.to_string(),
            reference_label,
            checksum,
        })
    }

    /// Splits a field sequence into raw tag/value pairs without interpreting them.
    ///
    /// # Errors
    ///
    /// Returns an error when `input` is not ASCII, a header or value runs past
    /// the end of `input`, or a length prefix is not two decimal digits.
    ///
    /// ```
    /// use pixcode::PayloadDecoder;
    ///
    /// let fields = PayloadDecoder::split_fields("0014br.gov.bcb.pix0103abc")?;
    /// assert_eq!(2, fields.len());
    /// assert_eq!("abc", fields[1].value());
    /// # Ok::<(), pixcode::DecodeError>(())
    /// ```
    pub fn split_fields(input: &str) -> Result<Vec<RawField<'_>>, DecodeError> {
        // Headers are sliced by byte offset.
        if !input.is_ascii() {
            return Err(DecodeError::NonAscii);
        }

        let mut fields = Vec::new();
        let mut offset = 0;
        while offset < input.len() {
            let header = input
                .get(offset..offset + HEADER_LEN)
                .ok_or(DecodeError::Truncated { offset })?;
            let raw_len = &header[2..];
            if !raw_len.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(DecodeError::InvalidLength {
                    offset,
                    raw: raw_len.to_string(),
                });
            }
            let len = raw_len
                .parse::<usize>()
                .map_err(|_error| DecodeError::InvalidLength {
                    offset,
                    raw: raw_len.to_string(),
                })?;

            let value_start = offset + HEADER_LEN;
            let value = input
                .get(value_start..value_start + len)
                .ok_or(DecodeError::Truncated { offset })?;
            fields.push(RawField {
                tag: &header[..2],
                value,
            });
            offset = value_start + len;
        }
        Ok(fields)
    }
}

fn verify_checksum(payload: &str, fields: &[RawField<'_>]) -> Result<u16, DecodeError> {
    let Some(last) = fields.last() else {
        return Err(DecodeError::MissingChecksum);
    };
    if last.tag != FieldTag::Crc.code() || last.value.len() != CHECKSUM_VALUE_LEN {
        return Err(DecodeError::MissingChecksum);
    }

    let invalid = || DecodeError::InvalidChecksum {
        raw: last.value.to_string(),
    };
    if !last.value.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expected = u16::from_str_radix(last.value, 16).map_err(|_error| invalid())?;
    let covered = &payload[..payload.len() - CHECKSUM_VALUE_LEN];
    let actual = crc16(covered);
    if expected != actual {
        return Err(DecodeError::ChecksumMismatch { expected, actual });
    }
    Ok(actual)
}

fn find<'a>(fields: &[RawField<'a>], tag: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|field| field.tag == tag)
        .map(|field| field.value)
}

/// Indexes known top-level fields; the first occurrence of a tag wins.
fn classify<'a>(fields: &[RawField<'a>]) -> HashMap<FieldTag, &'a str> {
    let mut known = HashMap::new();
    for field in fields {
        match FieldTag::from_code(field.tag) {
            Some(tag) => {
                known.entry(tag).or_insert(field.value);
            }
            None => debug!(tag = field.tag, "skipping unknown field"),
        }
    }
    known
}

fn optional<'a>(fields: &HashMap<FieldTag, &'a str>, tag: FieldTag) -> Option<&'a str> {
    fields.get(&tag).copied()
}

fn required<'a>(
    fields: &HashMap<FieldTag, &'a str>,
    tag: FieldTag,
) -> Result<&'a str, DecodeError> {
    optional(fields, tag).ok_or_else(|| DecodeError::MissingField {
        tag: tag.code().to_string(),
    })
}

fn serialize_checksum<S>(checksum: &u16, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&render_checksum(*checksum))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const MANUAL_SAMPLE: &str = "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-426655440000\
                                 5204000053039865802BR5913Fulano de Tal6008BRASILIA62070503***63041D3D";

    const SCENARIO_ONE: &str = "00020126380014br.gov.bcb.pix0116joao@example.com\
                                520400005303986540550.005802BR5913JOAO DA SILVA6009SAO PAULO\
                                62070503***630473AA";

    fn with_checksum(body: &str) -> String {
        format!("{body}{}", render_checksum(crc16(body)))
    }

    #[test]
    fn decode_reads_manual_sample() {
        let decoded = PayloadDecoder::decode(MANUAL_SAMPLE).expect("manual sample should decode");
        assert_eq!("01", decoded.format_indicator());
        assert_eq!(Some("br.gov.bcb.pix"), decoded.merchant_account_gui());
        assert_eq!("123e4567-e12b-12d1-a456-426655440000", decoded.key());
        assert_eq!("0000", decoded.merchant_category_code());
        assert_eq!("986", decoded.currency());
        assert_eq!("BR", decoded.country_code());
        assert_eq!("BRASILIA", decoded.city());
        assert_eq!(Some("***"), decoded.reference_label());
        assert_eq!(0x1D3D, decoded.checksum());
    }

    #[test]
    fn decode_reads_amount_when_present() {
        let decoded = PayloadDecoder::decode(SCENARIO_ONE).expect("scenario payload should decode");
        assert_eq!(
            Some("50.00".to_string()),
            decoded.amount().map(|amount| amount.to_string())
        );
        assert_eq!("JOAO DA SILVA", decoded.name());
    }

    #[test]
    fn decode_rejects_altered_content() {
        let tampered = SCENARIO_ONE.replace("540550.00", "540590.00");
        let result = PayloadDecoder::decode(&tampered);
        assert_matches!(
            result,
            Err(DecodeError::ChecksumMismatch {
                expected: 0x73AA,
                ..
            })
        );
    }

    #[test]
    fn decode_rejects_missing_checksum_field() {
        let without_crc = &SCENARIO_ONE[..SCENARIO_ONE.len() - 8];
        let result = PayloadDecoder::decode(without_crc);
        assert_matches!(result, Err(DecodeError::MissingChecksum));
    }

    #[test]
    fn decode_rejects_non_hex_checksum() {
        let garbled = format!("{}ZZZZ", &SCENARIO_ONE[..SCENARIO_ONE.len() - 4]);
        let result = PayloadDecoder::decode(&garbled);
        assert_matches!(result, Err(DecodeError::InvalidChecksum { ref raw }) if raw == "ZZZZ");
    }

    #[rstest]
    #[case("000")]
    #[case("0002")]
    #[case("00050")]
    fn split_fields_rejects_truncated_input(#[case] input: &str) {
        let result = PayloadDecoder::split_fields(input);
        assert_matches!(result, Err(DecodeError::Truncated { offset: 0 }));
    }

    #[test]
    fn split_fields_rejects_non_numeric_length() {
        let result = PayloadDecoder::split_fields("00020159ABCD");
        assert_matches!(
            result,
            Err(DecodeError::InvalidLength { offset: 6, ref raw }) if raw == "AB"
        );
    }

    #[test]
    fn decode_rejects_signed_checksum() {
        let valid = SCENARIO_ONE.replace("62070503***630473AA", "62070503TX263040DE8");
        PayloadDecoder::decode(&valid).expect("zero-led checksum should verify");

        let signed = valid.replace("63040DE8", "6304+DE8");
        let result = PayloadDecoder::decode(&signed);
        assert_matches!(result, Err(DecodeError::InvalidChecksum { ref raw }) if raw == "+DE8");
    }

    #[rstest]
    #[case::comma("12,50")]
    #[case::leading_space(" 1.5")]
    #[case::underscore("1_000")]
    #[case::signed("+1.00")]
    #[case::trailing_point("10.")]
    fn decode_rejects_amount_forms_the_encoder_never_writes(#[case] raw: &str) {
        let payload = SCENARIO_ONE.replace("540550.00", &format!("54{:02}{raw}", raw.len()));
        let payload = with_checksum(&payload[..payload.len() - 4]);

        let result = PayloadDecoder::decode(&payload);
        assert_matches!(
            result,
            Err(DecodeError::InvalidAmount { ref value, .. }) if value == raw
        );
    }

    #[test]
    fn decode_skips_unknown_top_level_fields() {
        let payload = SCENARIO_ONE.replace("5802BR", "5802BR8003xyz");
        let payload = with_checksum(&payload[..payload.len() - 4]);

        let decoded = PayloadDecoder::decode(&payload).expect("unknown tags should be ignored");
        assert_eq!("SAO PAULO", decoded.city());
    }

    #[test]
    fn split_fields_rejects_non_ascii_input() {
        let result = PayloadDecoder::split_fields("0é00");
        assert_matches!(result, Err(DecodeError::NonAscii));
    }

    #[test]
    fn decode_rejects_non_ascii_input() {
        let result = PayloadDecoder::decode("0002015903JOÃ");
        assert_matches!(result, Err(DecodeError::NonAscii));
    }
}
