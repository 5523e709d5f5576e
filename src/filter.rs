//! Text and tag-set filters over projected rows.
//!
//! Filters are a pure function of the rows and the [`FilterState`]; applying
//! the same state twice yields the same visible set.

use std::collections::{BTreeMap, BTreeSet};

use crate::column::{Capability, ColumnKey};
use crate::error::Result;
use crate::projection::VideoRow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
  text: BTreeMap<ColumnKey, String>,
  sets: BTreeMap<ColumnKey, BTreeSet<String>>,
}

impl FilterState {
  /// Set a substring needle. An empty needle removes the filter.
  pub fn set_text(&mut self, column: ColumnKey, needle: &str) -> Result<()> {
    column.require(Capability::TextFilter)?;
    if needle.is_empty() {
      self.text.remove(&column);
    } else {
      self.text.insert(column, needle.to_string());
    }
    Ok(())
  }

  /// Set the accepted tags for an array column. An empty set removes the filter.
  pub fn set_tags<I, S>(&mut self, column: ColumnKey, tags: I) -> Result<()>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    column.require(Capability::SetFilter)?;
    let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
    if tags.is_empty() {
      self.sets.remove(&column);
    } else {
      self.sets.insert(column, tags);
    }
    Ok(())
  }

  pub fn text(&self, column: ColumnKey) -> Option<&str> {
    self.text.get(&column).map(String::as_str)
  }

  pub fn tags(&self, column: ColumnKey) -> Option<&BTreeSet<String>> {
    self.sets.get(&column)
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty() && self.sets.is_empty()
  }

  pub fn clear(&mut self) {
    self.text.clear();
    self.sets.clear();
  }

  /// Every active filter must pass (AND across columns).
  pub fn matches(&self, row: &VideoRow) -> bool {
    self.text.iter().all(|(&column, needle)| text_matches(text_of(row, column), needle))
      && self.sets.iter().all(|(&column, accepted)| set_matches(tags_of(row, column), accepted))
  }

  /// Indices of the rows passing every active filter, in input order.
  pub fn apply(&self, rows: &[VideoRow]) -> Vec<usize> {
    rows.iter().enumerate().filter(|(_, row)| self.matches(row)).map(|(i, _)| i).collect()
  }
}

/// The raw title is searched, so a failed decomposition never hides a row.
fn text_of(row: &VideoRow, column: ColumnKey) -> &str {
  match column {
    ColumnKey::Title => &row.raw.title,
    _ => "",
  }
}

pub(crate) fn tags_of(row: &VideoRow, column: ColumnKey) -> &[String] {
  match column {
    ColumnKey::Categories => &row.raw.categories,
    ColumnKey::Topics => &row.raw.topics,
    _ => &[],
  }
}

/// Case-insensitive substring containment.
pub fn text_matches(haystack: &str, needle: &str) -> bool {
  if needle.is_empty() {
    return true;
  }
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Empty accepted set passes everything; otherwise any shared tag passes (OR within a column).
pub fn set_matches(row_tags: &[String], accepted: &BTreeSet<String>) -> bool {
  accepted.is_empty() || row_tags.iter().any(|t| accepted.contains(t))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::TableError;
  use crate::projection::Projector;
  use crate::record::{RawVideoRecord, RowId};
  use crate::title::TitleParser;

  fn row(title: &str, categories: &[&str], topics: &[&str]) -> VideoRow {
    let raw = RawVideoRecord {
      title: title.to_string(),
      categories: categories.iter().map(|s| s.to_string()).collect(),
      topics: topics.iter().map(|s| s.to_string()).collect(),
      ..Default::default()
    };
    Projector::new(TitleParser::Strict).project(RowId::new(title), &raw)
  }

  fn set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn text_filter_is_case_insensitive_on_raw_title() {
    let r = row("Intro to Rust by CodeChannel 12,345 views 3 days ago Part 1", &[], &[]);
    let mut f = FilterState::default();
    f.set_text(ColumnKey::Title, "codechannel").unwrap();
    // "CodeChannel" only lives in the raw string's channel part.
    assert!(f.matches(&r));
    f.set_text(ColumnKey::Title, "PART 1").unwrap();
    assert!(f.matches(&r));
    f.set_text(ColumnKey::Title, "python").unwrap();
    assert!(!f.matches(&r));
  }

  #[test]
  fn undecomposable_title_still_searchable() {
    let r = row("weird format no marker", &[], &[]);
    let mut f = FilterState::default();
    f.set_text(ColumnKey::Title, "MARKER").unwrap();
    assert!(f.matches(&r));
  }

  #[test]
  fn empty_set_passes_everything() {
    assert!(set_matches(&[], &BTreeSet::new()));
    assert!(set_matches(&["Music".to_string()], &BTreeSet::new()));
  }

  #[test]
  fn set_filter_uses_or_within_column() {
    let r = row("t", &["Music"], &[]);
    assert!(set_matches(&r.raw.categories, &set(&["Gaming", "Music"])));
    assert!(!set_matches(&r.raw.categories, &set(&["Gaming"])));
  }

  #[test]
  fn absent_tags_never_match_active_filter() {
    let r = row("t", &[], &[]);
    let mut f = FilterState::default();
    f.set_tags(ColumnKey::Categories, ["Music"]).unwrap();
    assert!(!f.matches(&r));
  }

  #[test]
  fn set_filters_combine_with_and_across_columns() {
    let rows =
      vec![row("a", &["Music"], &["Rock"]), row("b", &["Music"], &["Jazz"]), row("c", &["Education"], &["Rock"])];
    let mut f = FilterState::default();
    f.set_tags(ColumnKey::Categories, ["Music"]).unwrap();
    f.set_tags(ColumnKey::Topics, ["Rock"]).unwrap();
    assert_eq!(f.apply(&rows), vec![0]);
  }

  #[test]
  fn adding_a_tag_never_hides_a_row() {
    let mut f = FilterState::default();
    f.set_tags(ColumnKey::Categories, ["Music", "Gaming"]).unwrap();
    let before = row("t", &["Music"], &[]);
    let after = row("t", &["Music", "Sports"], &[]);
    assert!(f.matches(&before));
    assert!(f.matches(&after));
    let hidden = row("t", &["Sports"], &[]);
    let revealed = row("t", &["Sports", "Gaming"], &[]);
    assert!(!f.matches(&hidden));
    assert!(f.matches(&revealed));
  }

  #[test]
  fn apply_is_idempotent() {
    let rows = vec![row("Rust a", &["Edu"], &[]), row("Go b", &[], &[]), row("rust c", &["Edu"], &["x"])];
    let mut f = FilterState::default();
    f.set_text(ColumnKey::Title, "rust").unwrap();
    f.set_tags(ColumnKey::Categories, ["Edu"]).unwrap();
    let first = f.apply(&rows);
    let second = f.apply(&rows);
    assert_eq!(first, vec![0, 2]);
    assert_eq!(first, second);
  }

  #[test]
  fn clearing_with_empty_values_removes_filters() {
    let mut f = FilterState::default();
    f.set_text(ColumnKey::Title, "x").unwrap();
    f.set_tags(ColumnKey::Topics, ["y"]).unwrap();
    f.set_text(ColumnKey::Title, "").unwrap();
    f.set_tags(ColumnKey::Topics, Vec::<String>::new()).unwrap();
    assert!(f.is_empty());
  }

  #[test]
  fn filters_rejected_on_wrong_columns() {
    let mut f = FilterState::default();
    assert_eq!(
      f.set_tags(ColumnKey::Title, ["x"]),
      Err(TableError::unsupported(ColumnKey::Title, Capability::SetFilter))
    );
    assert_eq!(
      f.set_text(ColumnKey::Categories, "x"),
      Err(TableError::unsupported(ColumnKey::Categories, Capability::TextFilter))
    );
    assert!(f.is_empty());
  }
}
