use bon::Builder;

use super::Amount;

/// One charge to encode.
///
/// `name` and `city` are stored as given; normalisation happens during
/// encoding.
///
/// ```
/// use pixcode::ChargeRequest;
///
/// let request = ChargeRequest::builder()
///     .key("joao@example.com")
///     .name("João da Silva")
///     .city("São Paulo")
///     .amount("50".parse()?)
///     .build();
/// assert_eq!(None, request.transaction_id());
/// # Ok::<(), pixcode::AmountError>(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Builder)]
pub struct ChargeRequest {
    #[builder(into)]
    key: String,
    #[builder(into)]
    name: String,
    #[builder(into)]
    city: String,
    amount: Amount,
    #[builder(into)]
    transaction_id: Option<String>,
}

impl ChargeRequest {
    /// Beneficiary Pix key, passed through verbatim.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Beneficiary display name before normalisation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Beneficiary city before normalisation.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Caller-supplied transaction id, if any.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }
}
