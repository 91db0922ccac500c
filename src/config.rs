use crate::{ConfigError, SourceAddressSet};
use std::env;
use tracing::Level;

pub const ACCESS_KEY: &str = "ACCESS_KEY";
pub const SECRET_ACCESS_KEY: &str = "SECRET_ACCESS_KEY";
/// Source path, `[container-name]/path/to/file.ext`.
pub const SOURCE_BUCKET_NAME: &str = "SOURCE_BUCKET_NAME";
/// Comma-separated source addresses whose outbound traffic is kept.
pub const SOURCE_IP_ADDRESSES: &str = "SOURCE_IP_ADDRESSES";
/// Destination path, may contain the literal `[[timestamp]]`.
pub const DEST_BUCKET_NAME: &str = "DEST_BUCKET_NAME";
pub const AWS_REGION: &str = "AWS_REGION";
pub const S3_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";
pub const LOG_LEVEL: &str = "LOG_LEVEL";

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub access_key_id: String,
  pub secret_access_key: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("access_key_id", &self.access_key_id)
      .field("secret_access_key", &"** redacted **")
      .finish()
  }
}

/// How to reach the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
  pub region: String,
  /// Custom endpoint, e.g. LocalStack. Enables path-style addressing.
  pub endpoint: Option<String>,
  /// Static credentials. [`None`] uses the default AWS credential chain.
  pub credentials: Option<Credentials>,
}

impl Default for StoreConfig {
  fn default() -> Self {
    StoreConfig {
      region: DEFAULT_REGION.to_string(),
      endpoint: None,
      credentials: None,
    }
  }
}

/// Everything a run needs, resolved once by the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
  pub source_path: String,
  pub dest_path: String,
  pub source_addresses: SourceAddressSet,
  pub store: StoreConfig,
  pub log_level: Level,
}

impl JobConfig {
  /// Read the configuration from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|name| match env::var(name) {
      Ok(value) => Ok(Some(value)),
      Err(env::VarError::NotPresent) => Ok(None),
      Err(source) => Err(ConfigError::NotUnicode { name, source }),
    })
  }

  /// Build the configuration from `lookup`, which maps a variable name to its value.
  /// Empty values are treated as missing.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&'static str) -> Result<Option<String>, ConfigError>,
  {
    let optional = |name: &'static str| -> Result<Option<String>, ConfigError> {
      Ok(lookup(name)?.filter(|value| !value.is_empty()))
    };
    let required = |name: &'static str| -> Result<String, ConfigError> {
      optional(name)?.ok_or(ConfigError::Missing(name))
    };

    let source_path = required(SOURCE_BUCKET_NAME)?;
    let dest_path = required(DEST_BUCKET_NAME)?;

    let source_addresses = SourceAddressSet::parse(&required(SOURCE_IP_ADDRESSES)?);
    if source_addresses.is_empty() {
      return Err(ConfigError::NoAddresses(SOURCE_IP_ADDRESSES));
    }

    let credentials = match (optional(ACCESS_KEY)?, optional(SECRET_ACCESS_KEY)?) {
      (Some(access_key_id), Some(secret_access_key)) => Some(Credentials {
        access_key_id,
        secret_access_key,
      }),
      (None, None) => None,
      (Some(_), None) => {
        return Err(ConfigError::PartialCredentials {
          present: ACCESS_KEY,
          missing: SECRET_ACCESS_KEY,
        })
      }
      (None, Some(_)) => {
        return Err(ConfigError::PartialCredentials {
          present: SECRET_ACCESS_KEY,
          missing: ACCESS_KEY,
        })
      }
    };

    let log_level = match optional(LOG_LEVEL)? {
      Some(level) => level
        .parse::<Level>()
        .map_err(|_| ConfigError::LogLevel(level))?,
      None => Level::INFO,
    };

    Ok(JobConfig {
      source_path,
      dest_path,
      source_addresses,
      store: StoreConfig {
        region: optional(AWS_REGION)?.unwrap_or_else(|| DEFAULT_REGION.to_string()),
        endpoint: optional(S3_ENDPOINT_URL)?,
        credentials,
      },
      log_level,
    })
  }
}
