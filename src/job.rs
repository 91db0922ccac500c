use crate::{JobConfig, LineFilter, ObjectStore, Result, RunTimestamp, StoragePath};
use bytes::Bytes;
use tracing::info;

/// Status returned by a successful run.
pub const DONE: &str = "Done.";

/// Fetch the source flow log, keep the lines sent from the configured addresses
/// and write them to the destination.
pub struct JobRunner<'a, S> {
  config: &'a JobConfig,
  store: &'a S,
  timestamp: RunTimestamp,
}

impl<'a, S: ObjectStore> JobRunner<'a, S> {
  pub fn new(config: &'a JobConfig, store: &'a S, timestamp: RunTimestamp) -> Self {
    JobRunner {
      config,
      store,
      timestamp,
    }
  }

  /// Run every stage in order. The destination is only written once all previous stages succeeded.
  pub async fn run(&self) -> Result<&'static str> {
    info!(
      addresses = self.config.source_addresses.len(),
      "Attempting to parse VPC logs from {}",
      self.config.source_path
    );

    let source = StoragePath::parse(&self.config.source_path)?;
    let body = self.store.get(&source.container, &source.key).await?;
    info!(
      container = %source.container,
      key = %source.key,
      size = body.len(),
      "Fetched flow log"
    );

    let output = LineFilter::new(&self.config.source_addresses)
      .filter(&body[..])
      .await?;
    info!(
      scanned = output.scanned,
      selected = output.selected,
      "Filtered flow log"
    );

    let dest = StoragePath::parse(&self.config.dest_path)?;
    let dest_key = self.timestamp.resolve(&dest.key);

    self
      .store
      .put(&dest.container, &dest_key, Bytes::from(output.lines))
      .await?;
    info!(container = %dest.container, key = %dest_key, "Wrote outbound flow log");

    Ok(DONE)
  }
}
