use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::codec::{FieldCodec, FieldCodecError, crc16, render_checksum};
use crate::protocol::{
    FieldTag, MERCHANT_ACCOUNT_GUI_TAG, MERCHANT_ACCOUNT_KEY_TAG, PAYLOAD_FORMAT_VERSION, PIX_GUI,
    REFERENCE_LABEL_TAG, WILDCARD_REFERENCE_LABEL,
};

use super::text::{MAX_CITY_CHARS, MAX_NAME_CHARS, normalize_display_text};
use super::{ChargeRequest, PayloadOptions};

/// Finished BR Code payload, ready for QR rendering or copy-paste.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    /// Returns the payload text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the trailing four-digit checksum.
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds static BR Code payloads from charge requests.
#[derive(Debug, Clone, Default)]
pub struct PayloadAssembler {
    options: PayloadOptions,
}

impl PayloadAssembler {
    /// Creates an assembler with explicit fixed-field options.
    #[must_use]
    pub fn new(options: PayloadOptions) -> Self {
        Self { options }
    }

    /// Encodes one charge.
    ///
    /// # Errors
    ///
    /// Returns an error when a field value is too long for its two-digit
    /// length prefix or is not ASCII after normalisation.
    ///
    /// ```
    /// use pixcode::{ChargeRequest, PayloadAssembler};
    ///
    /// let request = ChargeRequest::builder()
    ///     .key("joao@example.com")
    ///     .name("João da Silva")
    ///     .city("São Paulo")
    ///     .amount("12.5".parse()?)
    ///     .build();
    /// let payload = PayloadAssembler::default().encode(&request)?;
    /// assert!(payload.as_str().contains("540512.50"));
    /// assert_eq!("BEB3", payload.checksum());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        skip_all,
        level = "debug",
        fields(amount = %request.amount(), has_transaction_id = request.transaction_id().is_some())
    )]
    pub fn encode(&self, request: &ChargeRequest) -> Result<EncodedPayload, FieldCodecError> {
        let mut merchant_account = String::new();
        FieldCodec::encode_into(&mut merchant_account, MERCHANT_ACCOUNT_GUI_TAG, PIX_GUI)?;
        FieldCodec::encode_into(&mut merchant_account, MERCHANT_ACCOUNT_KEY_TAG, request.key())?;

        let reference_label = FieldCodec::encode(
            REFERENCE_LABEL_TAG,
            request
                .transaction_id()
                .unwrap_or(WILDCARD_REFERENCE_LABEL),
        )?;

        let currency = self.options.currency();
        let name = normalize_display_text(request.name(), MAX_NAME_CHARS);
        let city = normalize_display_text(request.city(), MAX_CITY_CHARS);
        let amount = request.amount().to_string();

        let mut payload = String::new();
        for (tag, value) in [
            (FieldTag::PayloadFormatIndicator, PAYLOAD_FORMAT_VERSION),
            (FieldTag::MerchantAccountInformation, merchant_account.as_str()),
            (
                FieldTag::MerchantCategoryCode,
                self.options.merchant_category_code().as_str(),
            ),
            (FieldTag::TransactionCurrency, currency.numeric_code()),
            (FieldTag::TransactionAmount, amount.as_str()),
            (FieldTag::CountryCode, currency.country_code()),
            (FieldTag::MerchantName, name.as_str()),
            (FieldTag::MerchantCity, city.as_str()),
            (FieldTag::AdditionalDataField, reference_label.as_str()),
        ] {
            FieldCodec::encode_into(&mut payload, tag.code(), value)?;
        }

        payload.push_str(FieldTag::Crc.code());
        payload.push_str("04");
        let checksum = render_checksum(crc16(&payload));
        payload.push_str(&checksum);

        debug!(payload_len = payload.len(), %checksum, "encoded payload");
        Ok(EncodedPayload(payload))
    }
}

/// Encodes one charge with the default fixed-field options.
///
/// # Errors
///
/// See [`PayloadAssembler::encode`].
pub fn encode_payload(request: &ChargeRequest) -> Result<EncodedPayload, FieldCodecError> {
    PayloadAssembler::default().encode(request)
}
