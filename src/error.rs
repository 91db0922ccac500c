use std::{env, io};
use thiserror::Error;

/// Boxed error returned by an [`ObjectStore`](crate::ObjectStore) backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
  /// A required configuration value is missing or unusable.
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  /// A path does not contain both a container and a key.
  #[error("file path string {path:?} not in the correct format - expected [container-name]/path/to/file.ext")]
  MalformedPath { path: String },

  /// Fetching or writing an object failed.
  #[error("failed to {operation} object {container}/{key}")]
  StoreAccess {
    operation: StoreOperation,
    container: String,
    key: String,
    #[source]
    source: BoxError,
  },

  /// Reading the fetched content failed before the end of the stream.
  #[error("failed to read flow log content: {0}")]
  StreamRead(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("missing environment variable `{0}`")]
  Missing(&'static str),
  #[error("environment variable `{name}` is not valid unicode")]
  NotUnicode {
    name: &'static str,
    #[source]
    source: env::VarError,
  },
  #[error("`{present}` is set but `{missing}` is not, credentials must be supplied as a pair")]
  PartialCredentials {
    present: &'static str,
    missing: &'static str,
  },
  #[error("`{0}` does not contain any address")]
  NoAddresses(&'static str),
  #[error("invalid log level {0:?}")]
  LogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
  Get,
  Put,
}

impl std::fmt::Display for StoreOperation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreOperation::Get => f.write_str("get"),
      StoreOperation::Put => f.write_str("put"),
    }
  }
}

impl Error {
  pub(crate) fn store(
    operation: StoreOperation,
    container: &str,
    key: &str,
    source: impl Into<BoxError>,
  ) -> Self {
    Error::StoreAccess {
      operation,
      container: container.to_string(),
      key: key.to_string(),
      source: source.into(),
    }
  }
}
