use std::io;

use anyhow::Result;
use tracing::instrument;

use crate::cli::{Command, LogLevel, OutputFormat};
use crate::telemetry;
use crate::terminal::{SystemTerminalClient, TerminalClient};

const SERVICE_NAME: &str = "pixcode";

/// Runs a CLI command against the real process streams.
///
/// ```
/// use clap::Parser;
///
/// let args = pixcode::Args::try_parse_from([
///     "pixcode",
///     "--output",
///     "json",
///     "encode",
///     "--key",
///     "joao@example.com",
///     "--name",
///     "Joao da Silva",
///     "--city",
///     "Sao Paulo",
///     "--amount",
///     "50.00",
/// ])?;
/// let log_level = args.log_level();
/// let output_format = args.output_format();
/// let mut out = Vec::new();
/// pixcode::run(args.into_command(), &mut out, log_level, output_format)?;
/// assert!(String::from_utf8(out)?.contains("\"payload\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if tracing initialisation fails, the command fails, or
/// output writing fails.
pub fn run<W>(
    command: Command,
    out: &mut W,
    log_level: Option<LogLevel>,
    output_format: Option<OutputFormat>,
) -> Result<()>
where
    W: io::Write,
{
    run_with_clients(
        command,
        out,
        &SystemTerminalClient,
        log_level,
        output_format,
    )
}

/// Runs a CLI command with an injected terminal client.
///
/// When `output_format` is `None`, output is pretty on a terminal and JSON
/// otherwise.
///
/// ```
/// use pixcode::{Command, DecodeArgs, OutputFormat};
///
/// struct FakeTerminal;
/// impl pixcode::TerminalClient for FakeTerminal {
///     fn stdout_is_terminal(&self) -> bool { false }
///     fn stderr_is_terminal(&self) -> bool { false }
/// }
///
/// let command = Command::Decode(DecodeArgs::new(
///     "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-426655440000\
///      5204000053039865802BR5913Fulano de Tal6008BRASILIA62070503***63041D3D",
/// ));
/// let mut out = Vec::new();
/// pixcode::run_with_clients(command, &mut out, &FakeTerminal, None, Some(OutputFormat::Pretty))?;
/// assert!(String::from_utf8(out)?.contains("BRASILIA"));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if tracing initialisation fails, the command fails, or
/// output writing fails.
#[instrument(
    skip(out, terminal_client),
    level = "info",
    fields(command = %command.name(), ?log_level)
)]
pub fn run_with_clients<W>(
    command: Command,
    out: &mut W,
    terminal_client: &dyn TerminalClient,
    log_level: Option<LogLevel>,
    output_format: Option<OutputFormat>,
) -> Result<()>
where
    W: io::Write,
{
    telemetry::initialise_tracing(
        SERVICE_NAME,
        terminal_client.stderr_is_terminal(),
        log_level.map(LogLevel::as_level_filter),
    )?;

    let output_format = output_format.unwrap_or(if terminal_client.stdout_is_terminal() {
        OutputFormat::Pretty
    } else {
        OutputFormat::Json
    });

    match command {
        Command::Encode(args) => crate::cli::encode::run(&args, out, terminal_client, output_format),
        Command::Decode(args) => crate::cli::decode::run(&args, out, terminal_client, output_format),
        Command::Profile(args) => crate::cli::profile::run(args, out, terminal_client, output_format),
    }
}
