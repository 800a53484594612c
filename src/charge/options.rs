use std::str::FromStr;

use bon::Builder;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

const MERCHANT_CATEGORY_CODE_LEN: usize = 4;

/// Errors returned when validating payload options.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PayloadOptionsError {
    #[error("merchant category code `{value}` must be exactly four ASCII digits")]
    InvalidMerchantCategoryCode { value: String },
}

/// Transaction currency carried in the payload.
///
/// Pix settles in Brazilian reais only.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    #[default]
    #[strum(to_string = "BRL")]
    Brl,
}

impl Currency {
    /// ISO 4217 numeric code written to tag `53`.
    #[must_use]
    pub const fn numeric_code(self) -> &'static str {
        match self {
            Self::Brl => "986",
        }
    }

    /// ISO 3166 country code written to tag `58`.
    #[must_use]
    pub const fn country_code(self) -> &'static str {
        match self {
            Self::Brl => "BR",
        }
    }
}

/// Four-digit ISO 18245 merchant category code.
#[derive(Debug, Clone, Eq, PartialEq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct MerchantCategoryCode(String);

impl MerchantCategoryCode {
    /// Code used when the merchant category is not specified.
    #[must_use]
    pub fn unspecified() -> Self {
        Self("0000".to_string())
    }

    /// Returns the raw four-digit code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MerchantCategoryCode {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl FromStr for MerchantCategoryCode {
    type Err = PayloadOptionsError;

    /// ```
    /// use pixcode::MerchantCategoryCode;
    ///
    /// let code = "5812".parse::<MerchantCategoryCode>()?;
    /// assert_eq!("5812", code.as_str());
    /// assert!("58".parse::<MerchantCategoryCode>().is_err());
    /// # Ok::<(), pixcode::PayloadOptionsError>(())
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() != MERCHANT_CATEGORY_CODE_LEN || !value.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PayloadOptionsError::InvalidMerchantCategoryCode {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }
}

/// Values for the fixed fields of a payload.
///
/// The defaults reproduce the standard static charge: category `0000`, BRL.
///
/// ```
/// use pixcode::{Currency, PayloadOptions};
///
/// let options = PayloadOptions::builder()
///     .merchant_category_code("5812".parse()?)
///     .build();
/// assert_eq!("5812", options.merchant_category_code().as_str());
/// assert_eq!(Currency::Brl, options.currency());
/// # Ok::<(), pixcode::PayloadOptionsError>(())
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Builder)]
pub struct PayloadOptions {
    #[builder(default)]
    merchant_category_code: MerchantCategoryCode,
    #[builder(default)]
    currency: Currency,
}

impl PayloadOptions {
    /// Merchant category code written to tag `52`.
    #[must_use]
    pub fn merchant_category_code(&self) -> &MerchantCategoryCode {
        &self.merchant_category_code
    }

    /// Currency written to tags `53` and `58`.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }
}
