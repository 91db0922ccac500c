use crate::{Error, ObjectStore, Result, StoreOperation};
use bytes::Bytes;
use std::{collections::HashMap, io};
use tokio::sync::Mutex;

/// Keeps objects in memory. Useful for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
  objects: Mutex<HashMap<(String, String), Bytes>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add an object to the store.
  pub fn with_object(mut self, container: &str, key: &str, body: impl Into<Bytes>) -> Self {
    self
      .objects
      .get_mut()
      .insert((container.to_string(), key.to_string()), body.into());
    self
  }

  /// Return a copy of the object at `key`, if any.
  pub async fn object(&self, container: &str, key: &str) -> Option<Bytes> {
    self
      .objects
      .lock()
      .await
      .get(&(container.to_string(), key.to_string()))
      .cloned()
  }

  pub async fn len(&self) -> usize {
    self.objects.lock().await.len()
  }
}

impl ObjectStore for MemoryStore {
  async fn get(&self, container: &str, key: &str) -> Result<Bytes> {
    self.object(container, key).await.ok_or_else(|| {
      Error::store(
        StoreOperation::Get,
        container,
        key,
        io::Error::new(io::ErrorKind::NotFound, "no such object"),
      )
    })
  }

  async fn put(&self, container: &str, key: &str, body: Bytes) -> Result<()> {
    self
      .objects
      .lock()
      .await
      .insert((container.to_string(), key.to_string()), body);
    Ok(())
  }
}
