use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::charge::{Amount, ChargeRequest};
use crate::error::ProfileError;

const PROFILE_FILE_NAME: &str = "profile.json";
const FALLBACK_NAME: &str = "RECEBEDOR";
const FALLBACK_CITY: &str = "BRASIL";

/// Merchant Pix details saved between runs.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MerchantProfile {
    #[serde(default)]
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
}

impl MerchantProfile {
    /// Creates a profile.
    ///
    /// ```
    /// use pixcode::MerchantProfile;
    ///
    /// let profile = MerchantProfile::new("loja@example.com", None, Some("Recife".into()));
    /// assert_eq!("RECEBEDOR", profile.display_name());
    /// assert_eq!("Recife", profile.display_city());
    /// ```
    #[must_use]
    pub fn new(key: impl Into<String>, name: Option<String>, city: Option<String>) -> Self {
        Self {
            key: key.into(),
            name,
            city,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved beneficiary name, or `RECEBEDOR` when none is saved.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or(FALLBACK_NAME)
    }

    /// Saved beneficiary city, or `BRASIL` when none is saved.
    #[must_use]
    pub fn display_city(&self) -> &str {
        non_blank(self.city.as_deref()).unwrap_or(FALLBACK_CITY)
    }

    /// Overrides each field that is `Some`.
    #[must_use]
    pub fn merged_with(
        mut self,
        key: Option<String>,
        name: Option<String>,
        city: Option<String>,
    ) -> Self {
        if let Some(key) = key {
            self.key = key;
        }
        if name.is_some() {
            self.name = name;
        }
        if city.is_some() {
            self.city = city;
        }
        self
    }

    /// Builds a charge for this merchant.
    ///
    /// # Errors
    ///
    /// Returns an error when the profile has no Pix key.
    ///
    /// ```
    /// use pixcode::MerchantProfile;
    ///
    /// let profile = MerchantProfile::new("loja@example.com", Some("Loja".into()), None);
    /// let request = profile.charge("10".parse()?, Some("PDV1".into()))?;
    /// assert_eq!("BRASIL", request.city());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn charge(
        &self,
        amount: Amount,
        transaction_id: Option<String>,
    ) -> Result<ChargeRequest, ProfileError> {
        if self.key.trim().is_empty() {
            return Err(ProfileError::MissingKey);
        }

        Ok(ChargeRequest::builder()
            .key(self.key.clone())
            .name(self.display_name())
            .city(self.display_city())
            .amount(amount)
            .maybe_transaction_id(transaction_id)
            .build())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// JSON file holding the merchant profile.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Opens the store at `path`, or at the platform config directory when
    /// `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when no path is given and the platform has no config
    /// directory.
    pub fn open(path: Option<&Path>) -> Result<Self, ProfileError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_profile_path()?,
        };
        Ok(Self { path })
    }

    /// Location of the profile file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved profile. A missing file yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid JSON.
    #[instrument(skip(self), level = "debug", fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<MerchantProfile>, ProfileError> {
        if !self.path.exists() {
            debug!("no saved profile");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| ProfileError::Io {
            path: self.path.clone(),
            source,
        })?;
        let profile = serde_json::from_str(&raw).map_err(|source| ProfileError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(profile))
    }

    /// Writes `profile`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its directories cannot be written.
    #[instrument(skip(self, profile), level = "debug", fields(path = %self.path.display()))]
    pub fn save(&self, profile: &MerchantProfile) -> Result<(), ProfileError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ProfileError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut serialised = serde_json::to_string_pretty(profile).map_err(|source| {
            ProfileError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        serialised.push('\n');
        fs::write(&self.path, serialised).map_err(|source| ProfileError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

fn default_profile_path() -> Result<PathBuf, ProfileError> {
    ProjectDirs::from("br", "pixcode", "pixcode")
        .map(|dirs| dirs.config_dir().join(PROFILE_FILE_NAME))
        .ok_or(ProfileError::MissingConfigDirectory)
}
