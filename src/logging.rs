use tracing::Level;
use tracing_subscriber::fmt;

/// Install a plain-text subscriber on stdout.
///
/// Timestamps are left out since CloudWatch Logs records its own for every line.
/// Calling this more than once is a no-op.
pub fn init(level: Level) {
  let _ = fmt::Subscriber::builder()
    .with_max_level(level)
    .with_ansi(false)
    .without_time()
    .with_target(false)
    .try_init();
}
