use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::cli::decode::DecodeArgs;
use crate::cli::encode::EncodeArgs;
use crate::cli::profile::ProfileArgs;

/// Command-line options for the Pix BR Code tool.
#[derive(Debug, Parser)]
#[command(
    name = "pixcode",
    about = "Generate and verify static Pix BR Code payloads."
)]
pub struct Args {
    /// Log verbosity. Overrides `RUST_LOG` when set.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    /// Output format. Defaults to `pretty` on a terminal and `json` otherwise.
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,
    #[command(subcommand)]
    command: Command,
}

impl Args {
    /// Creates argument values directly without CLI parsing.
    ///
    /// ```
    /// use pixcode::{Args, Command, DecodeArgs};
    ///
    /// let args = Args::new(Command::Decode(DecodeArgs::new("000201")));
    /// assert_eq!(None, args.log_level());
    /// ```
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            log_level: None,
            output: None,
            command,
        }
    }

    /// Sets an explicit output format.
    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = Some(output);
        self
    }

    /// Returns the requested log level, if any.
    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }

    /// Returns the requested output format, if any.
    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output
    }

    /// Consumes the arguments and returns the selected command.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a charge into a BR Code payload.
    Encode(EncodeArgs),
    /// Verify a payload's checksum and print its fields.
    Decode(DecodeArgs),
    /// Show or update the saved merchant profile.
    Profile(ProfileArgs),
}

impl Command {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Encode(_args) => "encode",
            Self::Decode(_args) => "decode",
            Self::Profile(_args) => "profile",
        }
    }
}

/// Log verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub(crate) fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format accepted by `--output`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn encode_requires_amount() {
        let result = Args::try_parse_from(["pixcode", "encode", "--key", "a@b.c"]);

        let error = result.expect_err("missing --amount should fail argument parsing");
        assert_eq!(ErrorKind::MissingRequiredArgument, error.kind());
    }

    #[test]
    fn encode_rejects_malformed_amount() {
        let result = Args::try_parse_from(["pixcode", "encode", "--amount", "12.345"]);

        let error = result.expect_err("sub-cent amount should fail argument parsing");
        assert_eq!(ErrorKind::ValueValidation, error.kind());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = Args::try_parse_from([
            "pixcode",
            "decode",
            "000201",
            "--output",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("global flags should be accepted after the subcommand");

        assert_eq!(Some(OutputFormat::Json), args.output_format());
        assert_eq!(Some(LogLevel::Debug), args.log_level());
        assert_matches!(args.into_command(), Command::Decode(_));
    }

    #[test]
    fn log_level_maps_to_filter() {
        assert_eq!(LevelFilter::OFF, LogLevel::Off.as_level_filter());
        assert_eq!(LevelFilter::TRACE, LogLevel::Trace.as_level_filter());
    }
}
