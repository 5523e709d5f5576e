//! The tabular view model: projected rows plus filter, sort, selection,
//! pagination and column visibility.
//!
//! All state changes go through `&mut self` methods; the derived views
//! (`visible_indices`, `page_rows`, `cells`) are pure functions of that state
//! and can be recomputed on every frame.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::column::{Capability, ColumnKey};
use crate::constants::constants;
use crate::error::{Result, TableError};
use crate::filter::{FilterState, tags_of};
use crate::projection::{Projector, VideoRow};
use crate::record::{RawVideoRecord, RowId, assign_row_ids};
use crate::selection::{SelectionState, TriState};
use crate::sort::SortState;
use crate::title::{DecomposedTitle, TitleParser};

/// A renderable value for one cell, handed to whatever draws the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
  Checked(bool),
  Thumbnail { href: String, src: String, alt: String },
  Title { href: String, full: String, parts: DecomposedTitle },
  Text(String),
  Tags(Vec<String>),
  Link { href: String, label: String },
  Actions(RowId),
}

pub struct VideoTable {
  projector: Projector,
  rows: Vec<VideoRow>,
  filter: FilterState,
  sort: SortState,
  selection: SelectionState,
  hidden: BTreeSet<ColumnKey>,
  page_size: usize,
  page_index: usize,
}

impl VideoTable {
  pub fn new(records: Vec<RawVideoRecord>, parser: TitleParser, page_size: usize) -> Result<Self> {
    check_page_size(page_size)?;
    let mut table = Self {
      projector: Projector::new(parser),
      rows: Vec::new(),
      filter: FilterState::default(),
      sort: SortState::default(),
      selection: SelectionState::default(),
      hidden: BTreeSet::new(),
      page_size,
      page_index: 0,
    };
    table.replace_records(records);
    Ok(table)
  }

  /// Swap in a new record set. Filters, selection and paging reset; sort keys and hidden columns stay.
  pub fn replace_records(&mut self, records: Vec<RawVideoRecord>) {
    self.projector.clear();
    let ids = assign_row_ids(&records);
    self.rows = ids.into_iter().zip(records.iter()).map(|(id, raw)| self.projector.project(id, raw)).collect();
    self.filter.clear();
    self.selection.clear();
    self.page_index = 0;
    debug!(
      rows = self.rows.len(),
      unique_titles = self.projector.cached_titles(),
      parser = self.projector.parser().label(),
      "records replaced"
    );
  }

  pub fn parser(&self) -> TitleParser {
    self.projector.parser()
  }

  pub fn rows(&self) -> &[VideoRow] {
    &self.rows
  }

  pub fn row(&self, id: &RowId) -> Option<&VideoRow> {
    self.rows.iter().find(|r| &r.id == id)
  }

  pub fn filter(&self) -> &FilterState {
    &self.filter
  }

  pub fn sort_state(&self) -> &SortState {
    &self.sort
  }

  pub fn selection(&self) -> &SelectionState {
    &self.selection
  }

  // --- Filtering ---

  pub fn set_text_filter(&mut self, column: ColumnKey, needle: &str) -> Result<()> {
    self.filter.set_text(column, needle)?;
    self.page_index = 0;
    debug!(column = %column, needle, "text filter set");
    Ok(())
  }

  pub fn set_tag_filter<I, S>(&mut self, column: ColumnKey, tags: I) -> Result<()>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.filter.set_tags(column, tags)?;
    self.page_index = 0;
    debug!(column = %column, tags = ?self.filter.tags(column), "tag filter set");
    Ok(())
  }

  pub fn clear_filters(&mut self) {
    self.filter.clear();
    self.page_index = 0;
  }

  /// Distinct tags of an array column across all rows, sorted.
  pub fn tag_values(&self, column: ColumnKey) -> Result<Vec<String>> {
    column.require(Capability::SetFilter)?;
    let set: BTreeSet<&String> = self.rows.iter().flat_map(|r| tags_of(r, column)).collect();
    Ok(set.into_iter().cloned().collect())
  }

  // --- Sorting ---

  pub fn sort_by(&mut self, column: ColumnKey, descending: bool) -> Result<()> {
    self.sort.set(column, descending)
  }

  pub fn then_sort_by(&mut self, column: ColumnKey, descending: bool) -> Result<()> {
    self.sort.add(column, descending)
  }

  pub fn cycle_sort(&mut self, column: ColumnKey) -> Result<()> {
    self.sort.cycle(column)
  }

  pub fn clear_sort(&mut self) {
    self.sort.clear();
  }

  /// Indices into [`rows`](Self::rows) after filtering and sorting.
  pub fn visible_indices(&self) -> Vec<usize> {
    let mut indices = self.filter.apply(&self.rows);
    self.sort.sort(&self.rows, &mut indices);
    indices
  }

  pub fn visible_rows(&self) -> Vec<&VideoRow> {
    self.visible_indices().into_iter().map(|i| &self.rows[i]).collect()
  }

  // --- Pagination ---

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
    check_page_size(page_size)?;
    self.page_size = page_size;
    self.page_index = 0;
    Ok(())
  }

  /// At least one page, even when nothing is visible.
  pub fn page_count(&self) -> usize {
    self.filter.apply(&self.rows).len().div_ceil(self.page_size).max(1)
  }

  /// Current page, clamped to the last page when the visible set shrank.
  pub fn page_index(&self) -> usize {
    self.page_index.min(self.page_count() - 1)
  }

  pub fn set_page(&mut self, index: usize) {
    self.page_index = index.min(self.page_count() - 1);
  }

  pub fn next_page(&mut self) {
    self.set_page(self.page_index() + 1);
  }

  pub fn prev_page(&mut self) {
    self.set_page(self.page_index().saturating_sub(1));
  }

  pub fn page_rows(&self) -> Vec<&VideoRow> {
    let start = self.page_index() * self.page_size;
    self.visible_indices().into_iter().skip(start).take(self.page_size).map(|i| &self.rows[i]).collect()
  }

  pub fn page_ids(&self) -> Vec<RowId> {
    self.page_rows().into_iter().map(|r| r.id.clone()).collect()
  }

  // --- Selection ---

  pub fn toggle_all(&mut self, page_ids: &[RowId], select: bool) {
    self.selection.toggle_all(page_ids, select);
  }

  /// Header checkbox: select or clear every row on the current page.
  pub fn toggle_page(&mut self, select: bool) {
    let ids = self.page_ids();
    self.selection.toggle_all(&ids, select);
  }

  pub fn toggle_row(&mut self, id: &RowId, select: bool) {
    self.selection.toggle_row(id, select);
  }

  pub fn is_selected(&self, id: &RowId) -> bool {
    self.selection.is_selected(id)
  }

  pub fn tri_state(&self, page_ids: &[RowId]) -> TriState {
    self.selection.tri_state(page_ids)
  }

  /// Tri-state of the current page, for the header checkbox.
  pub fn header_selection(&self) -> TriState {
    self.selection.tri_state(&self.page_ids())
  }

  /// Selected rows in record order, whether or not they are visible.
  pub fn selected_rows(&self) -> Vec<&VideoRow> {
    self.rows.iter().filter(|r| self.selection.is_selected(&r.id)).collect()
  }

  // --- Columns ---

  pub fn set_column_hidden(&mut self, column: ColumnKey, hidden: bool) -> Result<()> {
    column.require(Capability::Hideable)?;
    if hidden {
      self.hidden.insert(column);
    } else {
      self.hidden.remove(&column);
    }
    Ok(())
  }

  pub fn is_hidden(&self, column: ColumnKey) -> bool {
    self.hidden.contains(&column)
  }

  pub fn hidden_columns(&self) -> impl Iterator<Item = ColumnKey> + '_ {
    self.hidden.iter().copied()
  }

  pub fn visible_columns(&self) -> Vec<ColumnKey> {
    ColumnKey::ALL.into_iter().filter(|c| !self.hidden.contains(c)).collect()
  }

  /// Cell values for every visible column of `row`, in column order.
  pub fn cells(&self, row: &VideoRow) -> Vec<(ColumnKey, CellValue)> {
    self.visible_columns().into_iter().map(|c| (c, self.cell(row, c))).collect()
  }

  pub fn cell(&self, row: &VideoRow, column: ColumnKey) -> CellValue {
    match column {
      ColumnKey::Select => CellValue::Checked(self.selection.is_selected(&row.id)),
      ColumnKey::Thumbnail => CellValue::Thumbnail {
        href: row.video_url.clone(),
        src: row.raw.thumbnail_url.clone(),
        alt: format!("Thumbnail for {}", row.raw.title),
      },
      ColumnKey::Title => {
        CellValue::Title { href: row.video_url.clone(), full: row.raw.title.clone(), parts: row.decomposed.clone() }
      }
      ColumnKey::Length => CellValue::Text(row.raw.length.clone()),
      ColumnKey::Categories | ColumnKey::Topics => CellValue::Tags(tags_of(row, column).to_vec()),
      ColumnKey::Channel => CellValue::Link { href: row.channel_link.clone(), label: row.channel_name.clone() },
      ColumnKey::Actions => CellValue::Actions(row.id.clone()),
    }
  }
}

fn check_page_size(page_size: usize) -> Result<()> {
  let max = constants().max_page_size;
  if page_size == 0 || page_size > max {
    return Err(TableError::PageSize { got: page_size, max });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: &str, title: &str, length: &str, categories: &[&str], topics: &[&str]) -> RawVideoRecord {
    RawVideoRecord {
      title: title.to_string(),
      length: length.to_string(),
      video_id: id.to_string(),
      channel_url: format!("/@{}", id),
      categories: categories.iter().map(|s| s.to_string()).collect(),
      topics: topics.iter().map(|s| s.to_string()).collect(),
      ..Default::default()
    }
  }

  fn sample() -> Vec<RawVideoRecord> {
    vec![
      record("a", "Intro to Rust by CodeChannel 12,345 views 3 days ago Part 1", "10:05", &["Education"], &["Rust"]),
      record("b", "Jazz night by Blue Note 1,000 views 2 hours", "1:05", &["Music"], &["Jazz"]),
      record("c", "Rust async deep dive by Tokio Team 50 views 1 week ago 45 minutes", "45:00", &["Education"], &[]),
      record("d", "Untitled upload", "LIVE", &[], &[]),
      record("e", "Rock anthems by Label 7 views 5:00", "5:00", &["Music"], &["Rock"]),
    ]
  }

  fn ids(rows: &[&VideoRow]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
  }

  fn table(page_size: usize) -> VideoTable {
    VideoTable::new(sample(), TitleParser::Strict, page_size).unwrap()
  }

  #[test]
  fn rejects_bad_page_size() {
    assert!(matches!(VideoTable::new(sample(), TitleParser::Strict, 0), Err(TableError::PageSize { got: 0, .. })));
  }

  #[test]
  fn text_and_set_filters_combine() {
    let mut t = table(20);
    t.set_text_filter(ColumnKey::Title, "rust").unwrap();
    assert_eq!(ids(&t.visible_rows()), vec!["a", "c"]);
    t.set_tag_filter(ColumnKey::Topics, ["Rust"]).unwrap();
    assert_eq!(ids(&t.visible_rows()), vec!["a"]);
    t.clear_filters();
    assert_eq!(t.visible_rows().len(), 5);
  }

  #[test]
  fn length_sort_uses_seconds() {
    let mut t = table(20);
    t.sort_by(ColumnKey::Length, false).unwrap();
    assert_eq!(ids(&t.visible_rows()), vec!["b", "e", "a", "c", "d"]);
  }

  #[test]
  fn selection_survives_filter_and_sort() {
    let mut t = table(20);
    let b = RowId::new("b");
    t.toggle_row(&b, true);
    t.set_tag_filter(ColumnKey::Categories, ["Education"]).unwrap();
    assert!(!t.page_ids().contains(&b));
    t.sort_by(ColumnKey::Title, true).unwrap();
    t.clear_filters();
    assert!(t.is_selected(&b));
    assert_eq!(ids(&t.selected_rows()), vec!["b"]);
  }

  #[test]
  fn header_selection_tracks_current_page() {
    let mut t = table(2);
    assert_eq!(t.page_count(), 3);
    t.toggle_page(true);
    assert_eq!(t.header_selection(), TriState::All);
    t.next_page();
    assert_eq!(t.header_selection(), TriState::None);
    t.toggle_row(&RowId::new("c"), true);
    assert_eq!(t.header_selection(), TriState::Some);
    t.prev_page();
    t.toggle_page(false);
    assert_eq!(t.header_selection(), TriState::None);
    assert_eq!(t.selection().ids(), vec![RowId::new("c")]);
  }

  #[test]
  fn toggle_all_touches_only_given_ids() {
    let mut t = table(20);
    let page = vec![RowId::new("a"), RowId::new("b")];
    t.toggle_all(&page, true);
    assert_eq!(t.tri_state(&page), TriState::All);
    assert_eq!(t.header_selection(), TriState::Some);
  }

  #[test]
  fn page_index_clamps_when_rows_shrink() {
    let mut t = table(2);
    t.set_page(2);
    assert_eq!(t.page_index(), 2);
    assert_eq!(ids(&t.page_rows()), vec!["e"]);
    t.set_page(99);
    assert_eq!(t.page_index(), 2);
    t.set_tag_filter(ColumnKey::Categories, ["Music"]).unwrap();
    assert_eq!(t.page_index(), 0);
    assert_eq!(t.page_count(), 1);
  }

  #[test]
  fn empty_filter_result_has_one_empty_page() {
    let mut t = table(2);
    t.set_text_filter(ColumnKey::Title, "no such video").unwrap();
    assert_eq!(t.page_count(), 1);
    assert!(t.page_rows().is_empty());
    assert_eq!(t.header_selection(), TriState::None);
  }

  #[test]
  fn replace_records_resets_filter_and_selection() {
    let mut t = table(20);
    t.set_text_filter(ColumnKey::Title, "rust").unwrap();
    t.sort_by(ColumnKey::Title, false).unwrap();
    t.toggle_row(&RowId::new("a"), true);
    t.replace_records(sample());
    assert!(t.filter().is_empty());
    assert!(t.selection().is_empty());
    assert!(!t.sort_state().is_empty());
  }

  #[test]
  fn misconfigured_columns_are_rejected() {
    let mut t = table(20);
    assert!(t.set_tag_filter(ColumnKey::Title, ["x"]).is_err());
    assert!(t.set_text_filter(ColumnKey::Topics, "x").is_err());
    assert!(t.sort_by(ColumnKey::Categories, false).is_err());
    assert!(t.set_column_hidden(ColumnKey::Select, true).is_err());
    assert!(t.tag_values(ColumnKey::Length).is_err());
    assert!(t.filter().is_empty());
  }

  #[test]
  fn tag_values_are_distinct_and_sorted() {
    let t = table(20);
    assert_eq!(t.tag_values(ColumnKey::Categories).unwrap(), vec!["Education", "Music"]);
    assert_eq!(t.tag_values(ColumnKey::Topics).unwrap(), vec!["Jazz", "Rock", "Rust"]);
  }

  #[test]
  fn hidden_columns_drop_out_of_cells() {
    let mut t = table(20);
    t.set_column_hidden(ColumnKey::Thumbnail, true).unwrap();
    let row = &t.rows()[0];
    let keys: Vec<ColumnKey> = t.cells(row).into_iter().map(|(k, _)| k).collect();
    assert!(!keys.contains(&ColumnKey::Thumbnail));
    assert_eq!(keys.len(), ColumnKey::ALL.len() - 1);
  }

  #[test]
  fn cells_carry_links_and_decomposition() {
    let mut t = table(20);
    t.toggle_row(&RowId::new("a"), true);
    let row = &t.rows()[0];
    assert_eq!(t.cell(row, ColumnKey::Select), CellValue::Checked(true));
    assert_eq!(
      t.cell(row, ColumnKey::Channel),
      CellValue::Link { href: "https://www.youtube.com/@a".into(), label: "@a".into() }
    );
    match t.cell(row, ColumnKey::Title) {
      CellValue::Title { href, parts, .. } => {
        assert_eq!(href, "https://www.youtube.com/watch?v=a");
        assert_eq!(parts.views.as_deref(), Some("12345"));
      }
      other => panic!("unexpected cell {:?}", other),
    }
    assert_eq!(t.cell(&t.rows()[3], ColumnKey::Categories), CellValue::Tags(vec![]));
  }

  #[test]
  fn lenient_parser_applies_table_wide() {
    let t = VideoTable::new(sample(), TitleParser::Lenient, 20).unwrap();
    assert_eq!(t.parser(), TitleParser::Lenient);
    assert_eq!(t.rows()[0].decomposed.duration.as_deref(), Some(""));
  }
}
