use crate::{Error, ObjectStore, Result, StoreConfig, StoreOperation};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{primitives::ByteStream, Client};
use bytes::Bytes;
use tracing::{debug, trace};

const CREDENTIALS_PROVIDER_NAME: &str = "vpc-flow-log-filter";

/// [`ObjectStore`] backed by Amazon S3, or any S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3Store {
  client: Client,
}

impl S3Store {
  pub fn new(client: Client) -> Self {
    S3Store { client }
  }

  /// Load the AWS configuration described by `config` and create a client.
  pub async fn connect(config: &StoreConfig) -> Self {
    let mut loader =
      aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint {
      loader = loader.endpoint_url(endpoint);
    }

    if let Some(credentials) = &config.credentials {
      loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
        &credentials.access_key_id,
        &credentials.secret_access_key,
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
      ));
    }

    let sdk_config = loader.load().await;

    // custom endpoints (LocalStack, MinIO) usually don't resolve virtual-hosted buckets
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
      .force_path_style(config.endpoint.is_some())
      .build();

    debug!(
      region = %config.region,
      endpoint = ?config.endpoint,
      static_credentials = config.credentials.is_some(),
      "Created S3 client"
    );

    S3Store::new(Client::from_conf(s3_config))
  }

  #[cfg(test)]
  fn client(&self) -> &Client {
    &self.client
  }
}

impl ObjectStore for S3Store {
  async fn get(&self, container: &str, key: &str) -> Result<Bytes> {
    debug!(container, key, "Downloading object");

    let output = self
      .client
      .get_object()
      .bucket(container)
      .key(key)
      .send()
      .await
      .map_err(|e| Error::store(StoreOperation::Get, container, key, e))?;

    let body = output
      .body
      .collect()
      .await
      .map_err(|e| Error::store(StoreOperation::Get, container, key, e))?
      .into_bytes();

    trace!(container, key, size = body.len(), "Downloaded object");
    Ok(body)
  }

  async fn put(&self, container: &str, key: &str, body: Bytes) -> Result<()> {
    debug!(container, key, size = body.len(), "Uploading object");

    self
      .client
      .put_object()
      .bucket(container)
      .key(key)
      .content_type("text/plain")
      .body(ByteStream::from(body))
      .send()
      .await
      .map_err(|e| Error::store(StoreOperation::Put, container, key, e))?;

    Ok(())
  }
}
