use std::collections::HashSet;

use crate::record::RowId;

/// Summary of a group of rows as fully, partially or not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
  All,
  Some,
  None,
}

impl TriState {
  /// Checkbox glyph for the header cell.
  pub fn glyph(self) -> &'static str {
    match self {
      TriState::All => "[x]",
      TriState::Some => "[-]",
      TriState::None => "[ ]",
    }
  }
}

/// Selected rows, keyed by identity so it survives re-filtering and re-sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
  selected: HashSet<RowId>,
}

impl SelectionState {
  /// Select or clear exactly the given page ids; ids off the page are untouched.
  pub fn toggle_all<'a, I>(&mut self, page_ids: I, select: bool)
  where
    I: IntoIterator<Item = &'a RowId>,
  {
    for id in page_ids {
      self.toggle_row(id, select);
    }
  }

  pub fn toggle_row(&mut self, id: &RowId, select: bool) {
    if select {
      self.selected.insert(id.clone());
    } else {
      self.selected.remove(id);
    }
  }

  pub fn is_selected(&self, id: &RowId) -> bool {
    self.selected.contains(id)
  }

  /// `All` needs a non-empty set with every id selected; an empty set is `None`.
  pub fn tri_state<'a, I>(&self, page_ids: I) -> TriState
  where
    I: IntoIterator<Item = &'a RowId>,
  {
    let (mut total, mut hits) = (0usize, 0usize);
    for id in page_ids {
      total += 1;
      if self.selected.contains(id) {
        hits += 1;
      }
    }
    match (total, hits) {
      (_, 0) => TriState::None,
      (t, h) if t == h => TriState::All,
      _ => TriState::Some,
    }
  }

  pub fn len(&self) -> usize {
    self.selected.len()
  }

  pub fn is_empty(&self) -> bool {
    self.selected.is_empty()
  }

  /// Selected ids in sorted order.
  pub fn ids(&self) -> Vec<RowId> {
    let mut ids: Vec<RowId> = self.selected.iter().cloned().collect();
    ids.sort();
    ids
  }

  pub fn clear(&mut self) {
    self.selected.clear();
  }
}
