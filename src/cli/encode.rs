use std::io;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::charge::{
    Amount, ChargeRequest, EncodedPayload, MerchantCategoryCode, PayloadAssembler, PayloadOptions,
};
use crate::cli::OutputFormat;
use crate::codec::{DecodedPayload, PayloadDecoder};
use crate::error::PixError;
use crate::terminal::TerminalClient;

use super::profile::ProfileLocation;
use super::ui::{Painter, PayloadView};

/// Arguments for the `encode` command.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Charge amount, e.g. `50`, `12.5`, or `12,50`.
    #[arg(long)]
    amount: Amount,
    /// Pix key. Defaults to the saved profile.
    #[arg(long)]
    key: Option<String>,
    /// Beneficiary name. Defaults to the saved profile.
    #[arg(long)]
    name: Option<String>,
    /// Beneficiary city. Defaults to the saved profile.
    #[arg(long)]
    city: Option<String>,
    /// Transaction id written to the reference label. Defaults to `***`.
    #[arg(long = "txid")]
    transaction_id: Option<String>,
    /// Four-digit merchant category code.
    #[arg(long, default_value = "0000")]
    merchant_category_code: MerchantCategoryCode,
    #[command(flatten)]
    location: ProfileLocation,
}

impl EncodeArgs {
    /// Creates encode arguments for an amount; every other field comes from
    /// the saved profile until overridden.
    ///
    /// ```
    /// use pixcode::EncodeArgs;
    ///
    /// let args = EncodeArgs::new("50".parse()?)
    ///     .with_key("joao@example.com")
    ///     .with_name("João da Silva")
    ///     .with_city("São Paulo");
    /// let _ = args;
    /// # Ok::<(), pixcode::AmountError>(())
    /// ```
    #[must_use]
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            key: None,
            name: None,
            city: None,
            transaction_id: None,
            merchant_category_code: MerchantCategoryCode::default(),
            location: ProfileLocation::default(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Reads missing fields from the profile at `location`.
    #[must_use]
    pub fn with_profile_location(mut self, location: ProfileLocation) -> Self {
        self.location = location;
        self
    }

    fn needs_profile(&self) -> bool {
        self.key.is_none() || self.name.is_none() || self.city.is_none()
    }

    fn charge_request(&self) -> Result<ChargeRequest, PixError> {
        let saved = if self.needs_profile() {
            self.location.open()?.load()?
        } else {
            None
        };
        debug!(from_profile = saved.is_some(), "resolved merchant details");

        let profile = saved.unwrap_or_default().merged_with(
            self.key.clone(),
            self.name.clone(),
            self.city.clone(),
        );
        Ok(profile.charge(self.amount, self.transaction_id.clone())?)
    }

    fn encode(&self) -> Result<EncodedPayload, PixError> {
        let request = self.charge_request()?;
        let options = PayloadOptions::builder()
            .merchant_category_code(self.merchant_category_code.clone())
            .build();
        Ok(PayloadAssembler::new(options).encode(&request)?)
    }
}

#[derive(Serialize)]
struct EncodeReport<'a> {
    payload: &'a EncodedPayload,
    fields: &'a DecodedPayload,
}

/// Executes the `encode` command.
#[instrument(skip_all, level = "info", fields(amount = %args.amount))]
pub(crate) fn run<W>(
    args: &EncodeArgs,
    out: &mut W,
    terminal_client: &dyn TerminalClient,
    output_format: OutputFormat,
) -> Result<()>
where
    W: io::Write,
{
    let payload = args.encode()?;
    let fields = PayloadDecoder::decode(payload.as_str()).map_err(PixError::from)?;

    match output_format {
        OutputFormat::Pretty => {
            let painter = Painter::new(terminal_client.stdout_is_terminal());
            writeln!(
                out,
                "{}",
                PayloadView::new(&fields, &painter).with_payload(payload.as_str())
            )?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(
                &mut *out,
                &EncodeReport {
                    payload: &payload,
                    fields: &fields,
                },
            )?;
            writeln!(out)?;
        }
    }

    Ok(())
}
