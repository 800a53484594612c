use std::collections::HashMap;
use std::sync::LazyLock;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Globally unique identifier of the Pix arrangement inside tag `26`.
pub(crate) const PIX_GUI: &str = "br.gov.bcb.pix";

/// Payload format indicator value for this revision of the standard.
pub(crate) const PAYLOAD_FORMAT_VERSION: &str = "01";

/// Reference label used when the charge carries no transaction id.
pub(crate) const WILDCARD_REFERENCE_LABEL: &str = "***";

/// Sub-tag of `26` carrying the arrangement GUI.
pub(crate) const MERCHANT_ACCOUNT_GUI_TAG: &str = "00";

/// Sub-tag of `26` carrying the Pix key.
pub(crate) const MERCHANT_ACCOUNT_KEY_TAG: &str = "01";

/// Sub-tag of `62` carrying the reference label (transaction id).
pub(crate) const REFERENCE_LABEL_TAG: &str = "05";

/// Length declared by the trailing checksum field.
pub(crate) const CHECKSUM_VALUE_LEN: usize = 4;

/// Top-level BR Code fields in emission order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumIter, Display)]
pub enum FieldTag {
    /// Payload format indicator (`00`).
    #[strum(to_string = "payload_format_indicator")]
    PayloadFormatIndicator,
    /// Merchant account information container (`26`).
    #[strum(to_string = "merchant_account_information")]
    MerchantAccountInformation,
    /// Merchant category code (`52`).
    #[strum(to_string = "merchant_category_code")]
    MerchantCategoryCode,
    /// ISO 4217 numeric transaction currency (`53`).
    #[strum(to_string = "transaction_currency")]
    TransactionCurrency,
    /// Transaction amount (`54`).
    #[strum(to_string = "transaction_amount")]
    TransactionAmount,
    /// ISO 3166 country code (`58`).
    #[strum(to_string = "country_code")]
    CountryCode,
    /// Beneficiary name (`59`).
    #[strum(to_string = "merchant_name")]
    MerchantName,
    /// Beneficiary city (`60`).
    #[strum(to_string = "merchant_city")]
    MerchantCity,
    /// Additional data field template (`62`).
    #[strum(to_string = "additional_data_field")]
    AdditionalDataField,
    /// CRC-16 checksum (`63`).
    #[strum(to_string = "crc")]
    Crc,
}

impl FieldTag {
    /// Returns the two-digit wire code for this field.
    ///
    /// ```
    /// use pixcode::FieldTag;
    ///
    /// assert_eq!("26", FieldTag::MerchantAccountInformation.code());
    /// assert_eq!("63", FieldTag::Crc.code());
    /// ```
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PayloadFormatIndicator => "00",
            Self::MerchantAccountInformation => "26",
            Self::MerchantCategoryCode => "52",
            Self::TransactionCurrency => "53",
            Self::TransactionAmount => "54",
            Self::CountryCode => "58",
            Self::MerchantName => "59",
            Self::MerchantCity => "60",
            Self::AdditionalDataField => "62",
            Self::Crc => "63",
        }
    }

    /// Looks up a top-level field by its wire code.
    ///
    /// ```
    /// use pixcode::FieldTag;
    ///
    /// assert_eq!(Some(FieldTag::MerchantName), FieldTag::from_code("59"));
    /// assert_eq!(None, FieldTag::from_code("80"));
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        TAGS_BY_CODE.get(code).copied()
    }
}

/// Top-level fields keyed by wire code.
static TAGS_BY_CODE: LazyLock<HashMap<&'static str, FieldTag>> =
    LazyLock::new(|| FieldTag::iter().map(|tag| (tag.code(), tag)).collect());
