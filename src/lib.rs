//! Filter a VPC flow log stored in S3 by source address and write the matching lines
//! to a new object whose key embeds the run date.
//!
//! ```no_run
//! use vpc_flow_log_filter::{logging, JobConfig, JobRunner, RunTimestamp, S3Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = JobConfig::from_env()?;
//!   logging::init(config.log_level);
//!
//!   let store = S3Store::connect(&config.store).await;
//!   JobRunner::new(&config, &store, RunTimestamp::now()).run().await?;
//!   Ok(())
//! }
//! ```

mod config;
mod error;
mod filter;
mod job;
pub mod logging;
mod path;
mod store;
mod timestamp;

pub use config::*;
pub use error::*;
pub use filter::*;
pub use job::*;
pub use path::*;
pub use store::*;
pub use timestamp::*;
