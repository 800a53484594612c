use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::{info, instrument};

use crate::cli::OutputFormat;
use crate::error::ProfileError;
use crate::profile::{MerchantProfile, ProfileStore};
use crate::terminal::TerminalClient;

use super::ui::{Painter, ProfileView};

/// Location of the saved merchant profile.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileLocation {
    /// Profile file to use instead of the platform config directory.
    #[arg(long, global = true)]
    profile_path: Option<PathBuf>,
}

impl ProfileLocation {
    /// Uses an explicit profile file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            profile_path: Some(path.into()),
        }
    }

    pub(crate) fn open(&self) -> Result<ProfileStore, ProfileError> {
        ProfileStore::open(self.profile_path.as_deref())
    }
}

/// Arguments for the `profile` command.
#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    action: ProfileAction,
    #[command(flatten)]
    location: ProfileLocation,
}

impl ProfileArgs {
    /// Creates profile arguments for one action.
    #[must_use]
    pub fn new(action: ProfileAction, location: ProfileLocation) -> Self {
        Self { action, location }
    }
}

/// Action performed by the `profile` command.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Print the saved profile.
    Show,
    /// Save the Pix key, name, or city.
    Set(ProfileSetArgs),
}

/// Arguments for `profile set`.
#[derive(Debug, Default, Args)]
pub struct ProfileSetArgs {
    /// Pix key (CPF/CNPJ, e-mail, phone, or random key).
    #[arg(long)]
    key: Option<String>,
    /// Beneficiary name shown to the payer.
    #[arg(long)]
    name: Option<String>,
    /// Beneficiary city.
    #[arg(long)]
    city: Option<String>,
}

impl ProfileSetArgs {
    /// Creates `profile set` arguments.
    ///
    /// ```
    /// use pixcode::ProfileSetArgs;
    ///
    /// let args = ProfileSetArgs::new(Some("loja@example.com".into()), None, None);
    /// let _ = args;
    /// ```
    #[must_use]
    pub fn new(key: Option<String>, name: Option<String>, city: Option<String>) -> Self {
        Self { key, name, city }
    }
}

#[derive(Serialize)]
struct ProfileReport<'a> {
    path: String,
    profile: Option<&'a MerchantProfile>,
}

/// Executes the `profile` command.
#[instrument(skip_all, level = "info")]
pub(crate) fn run<W>(
    args: ProfileArgs,
    out: &mut W,
    terminal_client: &dyn TerminalClient,
    output_format: OutputFormat,
) -> Result<()>
where
    W: io::Write,
{
    let store = args.location.open()?;
    let profile = match args.action {
        ProfileAction::Show => store.load()?,
        ProfileAction::Set(set) => {
            let updated = store
                .load()?
                .unwrap_or_default()
                .merged_with(set.key, set.name, set.city);
            if updated.key().trim().is_empty() {
                return Err(ProfileError::MissingKey.into());
            }
            store.save(&updated)?;
            info!(path = %store.path().display(), "saved merchant profile");
            Some(updated)
        }
    };

    match output_format {
        OutputFormat::Pretty => {
            let painter = Painter::new(terminal_client.stdout_is_terminal());
            writeln!(
                out,
                "{}",
                ProfileView::new(store.path(), profile.as_ref(), &painter)
            )?;
        }
        OutputFormat::Json => {
            let report = ProfileReport {
                path: store.path().display().to_string(),
                profile: profile.as_ref(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
