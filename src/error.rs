use std::path::PathBuf;

use derive_more::From;
use thiserror::Error;

use crate::charge::{AmountError, PayloadOptionsError};
use crate::codec::{DecodeError, FieldCodecError};

/// Errors returned by the merchant profile store.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to access profile at `{path}`")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("profile at `{path}` is not valid JSON")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no platform configuration directory is available; pass --profile-path")]
    MissingConfigDirectory,
    #[error("no Pix key configured; run `pixcode profile set --key <KEY>` or pass --key")]
    MissingKey,
}

/// Errors returned by telemetry initialisation.
#[derive(Debug, Error)]
pub(crate) enum TelemetryError {
    #[error("failed to install tracing subscriber")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Top-level errors wrapping module-specific error types.
#[derive(Debug, Error, From)]
pub enum PixError {
    #[error(transparent)]
    #[from(FieldCodecError, Box<FieldCodecError>)]
    FieldCodec(Box<FieldCodecError>),
    #[error(transparent)]
    #[from(AmountError, Box<AmountError>)]
    Amount(Box<AmountError>),
    #[error(transparent)]
    #[from(PayloadOptionsError, Box<PayloadOptionsError>)]
    PayloadOptions(Box<PayloadOptionsError>),
    #[error(transparent)]
    #[from(DecodeError, Box<DecodeError>)]
    Decode(Box<DecodeError>),
    #[error(transparent)]
    #[from(ProfileError, Box<ProfileError>)]
    Profile(Box<ProfileError>),
}
