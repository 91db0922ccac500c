use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

/// Index of the `srcaddr` field in a flow log record:
/// `<version> <account-id> <interface-id> <srcaddr> <dstaddr> ...`
pub const SOURCE_ADDRESS_FIELD: usize = 3;

/// Ordered list of source addresses, matched by exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAddressSet(Vec<String>);

impl SourceAddressSet {
  pub fn new(addresses: Vec<String>) -> Self {
    SourceAddressSet(addresses)
  }

  /// Parse a comma-separated list. Entries are trimmed and empty entries are dropped,
  /// so `" 10.0.0.1"` is treated as `"10.0.0.1"`.
  pub fn parse(list: &str) -> Self {
    SourceAddressSet(
      list
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(String::from)
        .collect(),
    )
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  /// Return the first configured address equal to `field`.
  pub fn find(&self, field: &[u8]) -> Option<&str> {
    self.iter().find(|address| address.as_bytes() == field)
  }
}

/// Result of a [`LineFilter::filter`] pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FilterOutput {
  /// Selected lines in input order, each terminated by `'\n'`.
  pub lines: Vec<u8>,
  pub scanned: usize,
  pub selected: usize,
}

/// Select flow log records whose source address is in a [`SourceAddressSet`].
pub struct LineFilter<'a> {
  addresses: &'a SourceAddressSet,
}

impl<'a> LineFilter<'a> {
  pub fn new(addresses: &'a SourceAddressSet) -> Self {
    LineFilter { addresses }
  }

  /// Return the address matched by `line`, if any.
  /// Records with fewer than 4 space-separated fields never match.
  pub fn matches(&self, line: &[u8]) -> Option<&'a str> {
    let field = line.split(|b| *b == b' ').nth(SOURCE_ADDRESS_FIELD)?;
    self.addresses.find(field)
  }

  /// Scan `reader` line by line until the end of the stream.
  /// Any read error aborts the scan.
  pub async fn filter<R: AsyncBufRead + Unpin>(&self, reader: R) -> io::Result<FilterOutput> {
    let mut output = FilterOutput::default();
    let mut lines = reader.split(b'\n');

    while let Some(mut line) = lines.next_segment().await? {
      output.scanned += 1;

      if line.last() == Some(&b'\r') {
        line.pop();
      }

      if let Some(address) = self.matches(&line) {
        info!(
          address,
          "Found outbound log from {}: {}",
          address,
          String::from_utf8_lossy(&line)
        );
        output.lines.extend_from_slice(&line);
        output.lines.push(b'\n');
        output.selected += 1;
      }
    }

    Ok(output)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const FIRST: &str = "2 111 eni-1 10.0.0.1 10.0.0.2 443 80 6 1 52 1616 1619 ACCEPT OK";
  const SECOND: &str = "2 111 eni-2 10.0.0.9 10.0.0.2 443 80 6 1 52 1616 1619 ACCEPT OK";

  fn addresses(list: &str) -> SourceAddressSet {
    SourceAddressSet::parse(list)
  }

  #[test]
  fn parse_address_list() {
    let set = addresses("10.0.0.1, 10.0.0.9,,");
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["10.0.0.1", "10.0.0.9"]);
    assert_eq!(set.len(), 2);
    assert!(addresses("").is_empty());
    assert!(addresses(" , ").is_empty());
  }

  #[test]
  fn padded_entry_matches_bare_address() {
    let set = addresses(" 10.0.0.1 ");
    let filter = LineFilter::new(&set);
    assert_eq!(filter.matches(FIRST.as_bytes()), Some("10.0.0.1"));
  }

  #[test]
  fn matches_source_field_only() {
    let set = addresses("10.0.0.2");
    let filter = LineFilter::new(&set);
    // 10.0.0.2 is the destination here
    assert_eq!(filter.matches(FIRST.as_bytes()), None);
    assert_eq!(filter.matches(b"a b c 10.0.0.2"), Some("10.0.0.2"));
  }

  #[test]
  fn short_records_never_match() {
    let set = addresses("10.0.0.1");
    let filter = LineFilter::new(&set);
    assert_eq!(filter.matches(b"2 111 10.0.0.1"), None);
    assert_eq!(filter.matches(b""), None);
  }

  #[test]
  fn match_is_exact() {
    let set = addresses("10.0.0.1");
    let filter = LineFilter::new(&set);
    assert_eq!(filter.matches(b"2 111 eni-1 10.0.0.10 x"), None);
  }

  #[tokio::test]
  async fn selects_matching_lines() {
    let body = format!("{FIRST}\n{SECOND}\n");
    let set = addresses("10.0.0.1");
    let output = LineFilter::new(&set).filter(body.as_bytes()).await.unwrap();
    assert_eq!(output.lines, format!("{FIRST}\n").into_bytes());
    assert_eq!(output.scanned, 2);
    assert_eq!(output.selected, 1);
  }

  #[tokio::test]
  async fn keeps_input_order() {
    let body = format!("{SECOND}\n{FIRST}\n");
    let set = addresses("10.0.0.1,10.0.0.9");
    let output = LineFilter::new(&set).filter(body.as_bytes()).await.unwrap();
    assert_eq!(output.lines, format!("{SECOND}\n{FIRST}\n").into_bytes());
  }

  #[tokio::test]
  async fn duplicate_addresses_select_once() {
    let set = addresses("10.0.0.1,10.0.0.1");
    let output = LineFilter::new(&set).filter(FIRST.as_bytes()).await.unwrap();
    assert_eq!(output.lines, format!("{FIRST}\n").into_bytes());
    assert_eq!(output.selected, 1);
  }

  #[tokio::test]
  async fn last_line_without_newline() {
    let body = format!("{SECOND}\n{FIRST}");
    let set = addresses("10.0.0.1");
    let output = LineFilter::new(&set).filter(body.as_bytes()).await.unwrap();
    assert_eq!(output.lines, format!("{FIRST}\n").into_bytes());
  }

  #[tokio::test]
  async fn strips_carriage_return() {
    let body = format!("{FIRST}\r\n");
    let set = addresses("10.0.0.1");
    let output = LineFilter::new(&set).filter(body.as_bytes()).await.unwrap();
    assert_eq!(output.lines, format!("{FIRST}\n").into_bytes());
  }

  #[tokio::test]
  async fn skips_short_and_blank_lines() {
    let body = format!("version account\n\n{FIRST}\n");
    let set = addresses("10.0.0.1");
    let output = LineFilter::new(&set).filter(body.as_bytes()).await.unwrap();
    assert_eq!(output.lines, format!("{FIRST}\n").into_bytes());
    assert_eq!(output.scanned, 3);
  }

  #[tokio::test]
  async fn empty_input() {
    let set = addresses("10.0.0.1");
    let output = LineFilter::new(&set).filter(&b""[..]).await.unwrap();
    assert_eq!(output, FilterOutput::default());
  }

  #[tokio::test]
  async fn line_split_across_reads() {
    let reader = tokio::io::BufReader::new(
      tokio_test::io::Builder::new()
        .read(b"2 111 eni-1 10.0")
        .read(b".0.1 10.0.0.2 443\n2 111 eni-2 10.0.0.9")
        .read(b" 10.0.0.2 443\n")
        .build(),
    );
    let set = addresses("10.0.0.1");
    let output = LineFilter::new(&set).filter(reader).await.unwrap();
    assert_eq!(output.lines, b"2 111 eni-1 10.0.0.1 10.0.0.2 443\n".to_vec());
    assert_eq!(output.scanned, 2);
  }

  #[tokio::test]
  async fn read_error_aborts() {
    let reader = tokio::io::BufReader::new(
      tokio_test::io::Builder::new()
        .read(format!("{FIRST}\n").as_bytes())
        .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        .build(),
    );
    let set = addresses("10.0.0.1");
    let err = LineFilter::new(&set).filter(reader).await.unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
  }
}
