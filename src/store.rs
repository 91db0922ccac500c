mod memory;
mod s3;

use crate::Result;
use bytes::Bytes;
use std::future::Future;

pub use memory::*;
pub use s3::*;

/// A blob store addressed by container and key.
pub trait ObjectStore: Send + Sync {
  /// Fetch the full body of the object at `key`.
  fn get(&self, container: &str, key: &str) -> impl Future<Output = Result<Bytes>> + Send;

  /// Write `body` to `key`, replacing any existing object.
  fn put(&self, container: &str, key: &str, body: Bytes)
    -> impl Future<Output = Result<()>> + Send;
}
