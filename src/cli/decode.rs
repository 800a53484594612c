use std::io;

use anyhow::Result;
use clap::Args;
use tracing::instrument;

use crate::cli::OutputFormat;
use crate::codec::PayloadDecoder;
use crate::error::PixError;
use crate::terminal::TerminalClient;

use super::ui::{Painter, PayloadView};

/// Arguments for the `decode` command.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Payload text as scanned or pasted.
    payload: String,
}

impl DecodeArgs {
    /// Creates decode arguments.
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Executes the `decode` command.
#[instrument(skip_all, level = "info", fields(payload_len = args.payload.len()))]
pub(crate) fn run<W>(
    args: &DecodeArgs,
    out: &mut W,
    terminal_client: &dyn TerminalClient,
    output_format: OutputFormat,
) -> Result<()>
where
    W: io::Write,
{
    // Copy-paste from chat apps often drags along surrounding whitespace.
    let decoded = PayloadDecoder::decode(args.payload.trim()).map_err(PixError::from)?;

    match output_format {
        OutputFormat::Pretty => {
            let painter = Painter::new(terminal_client.stdout_is_terminal());
            writeln!(out, "{}", PayloadView::new(&decoded, &painter))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &decoded)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
