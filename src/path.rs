use crate::{Error, Result};

/// A `container/segment/.../file` path split into the container and object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
  pub container: String,
  /// Every segment after the container, each prefixed with `//`.
  pub key: String,
}

impl StoragePath {
  /// Parse `container/a/b/file.ext` into container `container` and key `//a//b//file.ext`.
  /// # Examples
  /// ```
  /// use vpc_flow_log_filter::StoragePath;
  ///
  /// let path = StoragePath::parse("bucket/a/b/c.csv").unwrap();
  /// assert_eq!(path.container, "bucket");
  /// assert_eq!(path.key, "//a//b//c.csv");
  /// ```
  pub fn parse(path: &str) -> Result<Self> {
    let mut parts = path.split('/');

    let container = match parts.next() {
      Some(container) if !container.is_empty() => container,
      _ => return Err(malformed(path)),
    };

    let segments: Vec<&str> = parts.collect();
    if segments.is_empty() {
      return Err(malformed(path));
    }

    Ok(StoragePath {
      container: container.to_string(),
      key: format!("//{}", segments.join("//")),
    })
  }
}

fn malformed(path: &str) -> Error {
  Error::MalformedPath {
    path: path.to_string(),
  }
}
