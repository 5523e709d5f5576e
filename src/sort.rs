//! Column sorting.
//!
//! Title and channel compare the raw stored strings case-sensitively. Length is
//! parsed from clock text (`SS`, `M:SS`, `H:MM:SS`) into seconds so that
//! `1:05` sorts before `10:05`; values that do not parse go last, in either
//! direction, ordered lexicographically among themselves.

use std::cmp::Ordering;

use crate::column::{Capability, ColumnKey};
use crate::error::Result;
use crate::projection::VideoRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
  pub column: ColumnKey,
  pub descending: bool,
}

/// Sort keys in priority order. Only the first may be a non-multi-sort column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
  keys: Vec<SortKey>,
}

impl SortState {
  pub fn keys(&self) -> &[SortKey] {
    &self.keys
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  pub fn clear(&mut self) {
    self.keys.clear();
  }

  /// Replace all keys with a single one.
  pub fn set(&mut self, column: ColumnKey, descending: bool) -> Result<()> {
    column.require(Capability::Sortable)?;
    self.keys = vec![SortKey { column, descending }];
    Ok(())
  }

  /// Append a secondary key, or update its direction if already present.
  pub fn add(&mut self, column: ColumnKey, descending: bool) -> Result<()> {
    column.require(Capability::Sortable)?;
    if let Some(key) = self.keys.iter_mut().find(|k| k.column == column) {
      key.descending = descending;
      return Ok(());
    }
    if !self.keys.is_empty() {
      column.require(Capability::MultiSort)?;
    }
    self.keys.push(SortKey { column, descending });
    Ok(())
  }

  /// Header-click cycle on a single column: ascending, descending, unsorted.
  pub fn cycle(&mut self, column: ColumnKey) -> Result<()> {
    column.require(Capability::Sortable)?;
    let current = match self.keys.as_slice() {
      [only] if only.column == column => Some(only.descending),
      _ => None,
    };
    match current {
      Some(false) => self.set(column, true),
      Some(true) => {
        self.clear();
        Ok(())
      }
      None => self.set(column, false),
    }
  }

  /// Stable sort of `indices` (into `rows`) by every key in turn.
  pub fn sort(&self, rows: &[VideoRow], indices: &mut [usize]) {
    if self.keys.is_empty() {
      return;
    }
    indices.sort_by(|&a, &b| {
      self
        .keys
        .iter()
        .map(|key| compare(&rows[a], &rows[b], *key))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
    });
  }
}

fn compare(a: &VideoRow, b: &VideoRow, key: SortKey) -> Ordering {
  let directed = |o: Ordering| if key.descending { o.reverse() } else { o };
  match key.column {
    ColumnKey::Title => directed(a.raw.title.cmp(&b.raw.title)),
    ColumnKey::Channel => directed(a.raw.channel_url.cmp(&b.raw.channel_url)),
    ColumnKey::Length => match (parse_clock(&a.raw.length), parse_clock(&b.raw.length)) {
      (Some(x), Some(y)) => directed(x.cmp(&y)),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => a.raw.length.cmp(&b.raw.length),
    },
    _ => Ordering::Equal,
  }
}

/// `"1:02:03"` → 3723 seconds. `None` for anything that is not 1–3 colon-separated numbers.
pub fn parse_clock(text: &str) -> Option<u64> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }
  let parts: Vec<&str> = text.split(':').collect();
  if parts.len() > 3 {
    return None;
  }
  parts.iter().try_fold(0u64, |acc, part| {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    let n: u64 = part.parse().ok()?;
    acc.checked_mul(60)?.checked_add(n)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::TableError;
  use crate::projection::Projector;
  use crate::record::{RawVideoRecord, RowId};
  use crate::title::TitleParser;

  fn rows(specs: &[(&str, &str, &str)]) -> Vec<VideoRow> {
    let mut p = Projector::new(TitleParser::Strict);
    specs
      .iter()
      .enumerate()
      .map(|(i, (title, length, channel))| {
        let raw = RawVideoRecord {
          title: title.to_string(),
          length: length.to_string(),
          channel_url: channel.to_string(),
          ..Default::default()
        };
        p.project(RowId::new(format!("r{}", i)), &raw)
      })
      .collect()
  }

  fn sorted(state: &SortState, rows: &[VideoRow]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..rows.len()).collect();
    state.sort(rows, &mut idx);
    idx
  }

  #[test]
  fn parse_clock_forms() {
    assert_eq!(parse_clock("45"), Some(45));
    assert_eq!(parse_clock("1:05"), Some(65));
    assert_eq!(parse_clock("10:05"), Some(605));
    assert_eq!(parse_clock("1:02:03"), Some(3723));
    assert_eq!(parse_clock(" 3:00 "), Some(180));
    assert_eq!(parse_clock(""), None);
    assert_eq!(parse_clock("LIVE"), None);
    assert_eq!(parse_clock("1::2"), None);
    assert_eq!(parse_clock("1:2:3:4"), None);
  }

  #[test]
  fn length_sorts_by_seconds_not_text() {
    let r = rows(&[("a", "10:05", ""), ("b", "1:05", ""), ("c", "59", "")]);
    let mut s = SortState::default();
    s.set(ColumnKey::Length, false).unwrap();
    assert_eq!(sorted(&s, &r), vec![2, 1, 0]);
    s.set(ColumnKey::Length, true).unwrap();
    assert_eq!(sorted(&s, &r), vec![0, 1, 2]);
  }

  #[test]
  fn unparseable_lengths_go_last_both_ways() {
    let r = rows(&[("a", "UPCOMING", ""), ("b", "2:00", ""), ("c", "LIVE", ""), ("d", "1:00", "")]);
    let mut s = SortState::default();
    s.set(ColumnKey::Length, false).unwrap();
    assert_eq!(sorted(&s, &r), vec![3, 1, 2, 0]);
    s.set(ColumnKey::Length, true).unwrap();
    assert_eq!(sorted(&s, &r), vec![1, 3, 2, 0]);
  }

  #[test]
  fn title_sort_is_case_sensitive() {
    let r = rows(&[("banana", "", ""), ("Apple", "", ""), ("apple", "", "")]);
    let mut s = SortState::default();
    s.set(ColumnKey::Title, false).unwrap();
    assert_eq!(sorted(&s, &r), vec![1, 2, 0]);
  }

  #[test]
  fn channel_sorts_on_raw_url() {
    let r = rows(&[("x", "", "/@zeta"), ("y", "", "/@Alpha"), ("z", "", "/channel/UC1")]);
    let mut s = SortState::default();
    s.set(ColumnKey::Channel, false).unwrap();
    assert_eq!(sorted(&s, &r), vec![1, 0, 2]);
  }

  #[test]
  fn secondary_length_key_breaks_ties() {
    let r = rows(&[("same", "3:00", ""), ("same", "1:00", ""), ("other", "2:00", "")]);
    let mut s = SortState::default();
    s.set(ColumnKey::Title, false).unwrap();
    s.add(ColumnKey::Length, false).unwrap();
    assert_eq!(sorted(&s, &r), vec![2, 1, 0]);
  }

  #[test]
  fn only_multi_sort_columns_can_be_secondary() {
    let mut s = SortState::default();
    s.set(ColumnKey::Length, false).unwrap();
    assert_eq!(s.add(ColumnKey::Title, false), Err(TableError::unsupported(ColumnKey::Title, Capability::MultiSort)));
    assert_eq!(s.keys().len(), 1);
  }

  #[test]
  fn array_columns_refuse_sorting() {
    let mut s = SortState::default();
    assert_eq!(
      s.set(ColumnKey::Categories, false),
      Err(TableError::unsupported(ColumnKey::Categories, Capability::Sortable))
    );
    assert!(s.cycle(ColumnKey::Topics).is_err());
    assert!(s.is_empty());
  }

  #[test]
  fn cycle_goes_asc_desc_off() {
    let mut s = SortState::default();
    s.cycle(ColumnKey::Title).unwrap();
    assert_eq!(s.keys(), &[SortKey { column: ColumnKey::Title, descending: false }]);
    s.cycle(ColumnKey::Title).unwrap();
    assert_eq!(s.keys(), &[SortKey { column: ColumnKey::Title, descending: true }]);
    s.cycle(ColumnKey::Title).unwrap();
    assert!(s.is_empty());
  }

  #[test]
  fn sort_is_stable_without_differences() {
    let r = rows(&[("same", "", ""), ("same", "", ""), ("same", "", "")]);
    let mut s = SortState::default();
    s.set(ColumnKey::Title, true).unwrap();
    assert_eq!(sorted(&s, &r), vec![0, 1, 2]);
  }
}
