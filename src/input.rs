use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};

use crate::app::{App, AppMode};

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Event Handling ---

pub fn handle_key_event(app: &mut App, key: event::KeyEvent) {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return;
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return;
  }

  match app.mode {
    AppMode::Browse => handle_browse_key(app, key),
    AppMode::Filter => handle_filter_key(app, key),
  }
}

fn handle_browse_key(app: &mut App, key: event::KeyEvent) {
  app.clear_error();
  match key.code {
    KeyCode::Down | KeyCode::Char('j') => app.move_down(),
    KeyCode::Up | KeyCode::Char('k') => app.move_up(),
    KeyCode::Right | KeyCode::Char('n') => app.next_page(),
    KeyCode::Left | KeyCode::Char('p') => app.prev_page(),
    KeyCode::Char(' ') => app.toggle_current(),
    KeyCode::Char('a') => app.toggle_page(),
    KeyCode::Char('/') => {
      app.mode = AppMode::Filter;
      app.filter_cursor = app.filter.chars().count();
    }
    KeyCode::Char('c') => app.cycle_category_filter(),
    KeyCode::Char('t') => app.cycle_topic_filter(),
    KeyCode::Char('s') => app.cycle_sort_column(),
    KeyCode::Char('S') => app.flip_sort_direction(),
    KeyCode::Char('h') => app.toggle_thumbnail_column(),
    KeyCode::Esc => {
      if !app.filter.is_empty() {
        app.clear_text_filter();
      } else {
        app.should_quit = true;
      }
    }
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}

fn handle_filter_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Char(c) => {
      let byte_idx = char_to_byte_index(&app.filter, app.filter_cursor);
      app.filter.insert(byte_idx, c);
      app.filter_cursor += 1;
      app.apply_text_filter();
    }
    KeyCode::Backspace => {
      if app.filter_cursor > 0 {
        app.filter_cursor -= 1;
        let byte_idx = char_to_byte_index(&app.filter, app.filter_cursor);
        app.filter.remove(byte_idx);
        app.apply_text_filter();
      }
    }
    KeyCode::Delete => {
      if app.filter_cursor < app.filter.chars().count() {
        let byte_idx = char_to_byte_index(&app.filter, app.filter_cursor);
        app.filter.remove(byte_idx);
        app.apply_text_filter();
      }
    }
    KeyCode::Left => {
      app.filter_cursor = app.filter_cursor.saturating_sub(1);
    }
    KeyCode::Right => {
      if app.filter_cursor < app.filter.chars().count() {
        app.filter_cursor += 1;
      }
    }
    KeyCode::Home => {
      app.filter_cursor = 0;
    }
    KeyCode::End => {
      app.filter_cursor = app.filter.chars().count();
    }
    // Navigate filtered rows while typing
    KeyCode::Down => app.move_down(),
    KeyCode::Up => app.move_up(),
    KeyCode::Enter => {
      app.mode = AppMode::Browse;
    }
    KeyCode::Esc => {
      app.clear_text_filter();
      app.mode = AppMode::Browse;
    }
    _ => {}
  }
}
