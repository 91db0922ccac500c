use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing::error;
use vpc_flow_log_filter::{logging, JobConfig, JobRunner, RunTimestamp, S3Store};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
  // configuration problems fail the init phase, before any invocation reaches the store
  let config = JobConfig::from_env()?;
  logging::init(config.log_level);

  let store = S3Store::connect(&config.store).await;

  let config = &config;
  let store = &store;
  lambda_runtime::run(service_fn(move |_: LambdaEvent<Value>| async move {
    JobRunner::new(config, store, RunTimestamp::now())
      .run()
      .await
      .map_err(|e| {
        error!(error = %e, "Job failed");
        lambda_runtime::Error::from(e)
      })
  }))
  .await
}
