use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

const AMOUNT_SCALE: u32 = 2;
const MAX_RENDERED_LEN: usize = 13;

/// Errors returned by amount validation.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AmountError {
    #[error("amount `{value}` is not a decimal number")]
    InvalidFormat { value: String },
    #[error("amount must be a finite number")]
    NotFinite,
    #[error("amount {value} is negative")]
    Negative { value: Decimal },
    #[error("amount {value} has more than {max_scale} fractional digits")]
    TooPrecise { value: Decimal, max_scale: u32 },
    #[error("amount {rendered} is longer than {max_len} characters")]
    TooLarge { rendered: String, max_len: usize },
}

/// Non-negative charge amount with exactly two fractional digits.
///
/// Renders without thousands separators or currency symbol, as required by
/// the transaction amount field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a validated amount.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` is negative, has more than two
    /// significant fractional digits, or renders longer than 13 characters.
    ///
    /// ```
    /// use pixcode::Amount;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Amount::new(Decimal::new(125, 1))?;
    /// assert_eq!("12.50", amount.to_string());
    /// # Ok::<(), pixcode::AmountError>(())
    /// ```
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_zero() {
            return Ok(Self(Decimal::new(0, AMOUNT_SCALE)));
        }
        if value.is_sign_negative() {
            return Err(AmountError::Negative { value });
        }
        if value.normalize().scale() > AMOUNT_SCALE {
            return Err(AmountError::TooPrecise {
                value,
                max_scale: AMOUNT_SCALE,
            });
        }

        let mut scaled = value;
        scaled.rescale(AMOUNT_SCALE);
        let rendered = scaled.to_string();
        if rendered.len() > MAX_RENDERED_LEN {
            return Err(AmountError::TooLarge {
                rendered,
                max_len: MAX_RENDERED_LEN,
            });
        }

        Ok(Self(scaled))
    }

    /// Parses the transaction amount field exactly as it appears on the wire:
    /// ASCII digits, optionally followed by `.` and more digits.
    pub(crate) fn parse_field(raw: &str) -> Result<Self, AmountError> {
        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (raw, None),
        };
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !fraction.is_none_or(all_digits) {
            return Err(AmountError::InvalidFormat {
                value: raw.to_string(),
            });
        }
        Self::parse_decimal(raw, raw)
    }

    fn parse_decimal(text: &str, original: &str) -> Result<Self, AmountError> {
        let decimal = Decimal::from_str(text).map_err(|_error| AmountError::InvalidFormat {
            value: original.to_string(),
        })?;
        Self::new(decimal)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses user input such as `12.50`, `12,50`, ` 12 ` or `-3`.
impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().replace(',', ".");
        let allowed = |byte: u8| byte.is_ascii_digit() || matches!(byte, b'.' | b'+' | b'-');
        if !normalised.bytes().all(allowed) {
            return Err(AmountError::InvalidFormat {
                value: value.to_string(),
            });
        }
        Self::parse_decimal(&normalised, value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    /// Converts through the shortest decimal rendering of `value`, so `12.5`
    /// becomes `12.50` rather than the nearest binary fraction.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        value.to_string().parse()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
