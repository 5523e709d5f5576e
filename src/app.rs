use ratatui::widgets::TableState;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use ytwl::config::Config;
use ytwl::{ColumnKey, RowId, VideoTable};

use crate::theme::{THEMES, Theme};

/// Columns `s` steps through, in order, before returning to unsorted.
const SORT_CYCLE: [ColumnKey; 3] = [ColumnKey::Title, ColumnKey::Length, ColumnKey::Channel];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Browse,
  Filter,
}

pub struct App {
  pub table: VideoTable,
  pub source: PathBuf,
  pub mode: AppMode,
  pub theme_index: usize,
  /// Highlighted row within the current page.
  pub table_state: TableState,
  /// Title filter text.
  pub filter: String,
  /// Cursor position within the filter input (char index).
  pub filter_cursor: usize,
  pub filter_scroll: usize,
  /// Index into the category values of the active single-tag filter.
  category_pick: Option<usize>,
  topic_pick: Option<usize>,
  pub last_error: Option<String>,
  pub should_quit: bool,
  config: Config,
  error_time: Option<Instant>,
}

impl App {
  pub fn new(table: VideoTable, source: PathBuf, config: Config) -> Self {
    let theme_index = config.theme_name.as_ref().and_then(|name| THEMES.iter().position(|t| t.name == name)).unwrap_or(0);
    let mut table_state = TableState::default();
    if !table.page_rows().is_empty() {
      table_state.select(Some(0));
    }
    Self {
      table,
      source,
      mode: AppMode::Browse,
      theme_index,
      table_state,
      filter: String::new(),
      filter_cursor: 0,
      filter_scroll: 0,
      category_pick: None,
      topic_pick: None,
      last_error: None,
      should_quit: false,
      config,
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static Theme {
    // Safety: theme_index is bounded by modular arithmetic in next_theme() and position() on load.
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.config.theme_name = Some(self.theme().name.to_string());
    self.config.save();
  }

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after 5 seconds.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(5)
    {
      self.clear_error();
    }
  }

  // --- Cursor ---

  pub fn current_id(&self) -> Option<RowId> {
    let idx = self.table_state.selected()?;
    self.table.page_ids().into_iter().nth(idx)
  }

  /// Keep the highlighted row inside the current page after anything that changes it.
  pub fn clamp_cursor(&mut self) {
    let count = self.table.page_rows().len();
    if count == 0 {
      self.table_state.select(None);
    } else {
      let sel = self.table_state.selected().unwrap_or(0);
      self.table_state.select(Some(sel.min(count - 1)));
    }
  }

  pub fn move_down(&mut self) {
    let count = self.table.page_rows().len();
    if count > 0 {
      let i = self.table_state.selected().map_or(0, |i| (i + 1) % count);
      self.table_state.select(Some(i));
    }
  }

  pub fn move_up(&mut self) {
    let count = self.table.page_rows().len();
    if count > 0 {
      let i =
        self.table_state.selected().map_or(0, |i| if i == 0 { count.saturating_sub(1) } else { i.saturating_sub(1) });
      self.table_state.select(Some(i));
    }
  }

  pub fn next_page(&mut self) {
    self.table.next_page();
    self.table_state.select(Some(0));
    self.clamp_cursor();
  }

  pub fn prev_page(&mut self) {
    self.table.prev_page();
    self.table_state.select(Some(0));
    self.clamp_cursor();
  }

  // --- Selection ---

  pub fn toggle_current(&mut self) {
    let Some(id) = self.current_id() else { return };
    let select = !self.table.is_selected(&id);
    self.table.toggle_row(&id, select);
  }

  /// Header checkbox behaviour: a fully selected page clears, anything else selects all.
  pub fn toggle_page(&mut self) {
    let select = self.table.header_selection() != ytwl::TriState::All;
    self.table.toggle_page(select);
    debug!(select, selected = self.table.selection().len(), "page selection toggled");
  }

  // --- Filtering ---

  pub fn apply_text_filter(&mut self) {
    if let Err(e) = self.table.set_text_filter(ColumnKey::Title, &self.filter) {
      self.set_error(e.to_string());
    }
    self.clamp_cursor();
  }

  pub fn clear_text_filter(&mut self) {
    self.filter.clear();
    self.filter_cursor = 0;
    self.filter_scroll = 0;
    self.apply_text_filter();
  }

  pub fn cycle_category_filter(&mut self) {
    self.category_pick = self.cycle_tag_filter(ColumnKey::Categories, self.category_pick);
  }

  pub fn cycle_topic_filter(&mut self) {
    self.topic_pick = self.cycle_tag_filter(ColumnKey::Topics, self.topic_pick);
  }

  /// Step to the next single tag of `column`, wrapping back to "no filter".
  fn cycle_tag_filter(&mut self, column: ColumnKey, current: Option<usize>) -> Option<usize> {
    let values = match self.table.tag_values(column) {
      Ok(values) => values,
      Err(e) => {
        self.set_error(e.to_string());
        return None;
      }
    };
    let next = match current {
      None if !values.is_empty() => Some(0),
      Some(i) if i + 1 < values.len() => Some(i + 1),
      _ => None,
    };
    let tags: Vec<String> = next.and_then(|i| values.get(i).cloned()).into_iter().collect();
    if let Err(e) = self.table.set_tag_filter(column, tags) {
      self.set_error(e.to_string());
    }
    self.clamp_cursor();
    next
  }

  /// Label of the active tag filter on `column`, if any.
  pub fn tag_filter_label(&self, column: ColumnKey) -> Option<String> {
    let tags = self.table.filter().tags(column)?;
    Some(tags.iter().cloned().collect::<Vec<_>>().join(", "))
  }

  // --- Sorting ---

  pub fn cycle_sort_column(&mut self) {
    let current = self.table.sort_state().keys().first().map(|k| k.column);
    let next = match current.and_then(|c| SORT_CYCLE.iter().position(|s| *s == c)) {
      None => Some(SORT_CYCLE[0]),
      Some(i) => SORT_CYCLE.get(i + 1).copied(),
    };
    match next {
      Some(column) => {
        if let Err(e) = self.table.sort_by(column, false) {
          self.set_error(e.to_string());
        }
      }
      None => self.table.clear_sort(),
    }
    info!(sort = ?self.table.sort_state().keys(), "sort changed");
  }

  pub fn flip_sort_direction(&mut self) {
    let Some(key) = self.table.sort_state().keys().first().copied() else { return };
    if let Err(e) = self.table.sort_by(key.column, !key.descending) {
      self.set_error(e.to_string());
    }
  }

  pub fn sort_label(&self) -> String {
    match self.table.sort_state().keys().first() {
      Some(k) => format!("{} {}", k.column, if k.descending { "↓" } else { "↑" }),
      None => "unsorted".to_string(),
    }
  }

  // --- Columns ---

  pub fn toggle_thumbnail_column(&mut self) {
    let hidden = !self.table.is_hidden(ColumnKey::Thumbnail);
    if let Err(e) = self.table.set_column_hidden(ColumnKey::Thumbnail, hidden) {
      self.set_error(e.to_string());
      return;
    }
    self.config.hidden_columns = Some(self.table.hidden_columns().map(|c| c.as_str().to_string()).collect());
    self.config.save();
  }
}
