use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span, Text},
  widgets::{Block, Cell, Padding, Paragraph, Row, Table},
};

use ytwl::{CellValue, ColumnKey};

use crate::app::{App, AppMode};
use crate::theme::Theme;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

fn column_width(column: ColumnKey) -> Constraint {
  match column {
    ColumnKey::Select => Constraint::Length(3),
    ColumnKey::Thumbnail => Constraint::Length(3),
    ColumnKey::Title => Constraint::Min(30),
    ColumnKey::Length => Constraint::Length(8),
    ColumnKey::Categories | ColumnKey::Topics => Constraint::Length(18),
    ColumnKey::Channel => Constraint::Length(20),
    ColumnKey::Actions => Constraint::Length(0),
  }
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();
  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, input_area, footer_area] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Min(3),
    Constraint::Length(1),
    Constraint::Length(3),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  render_header(frame, app, header_area);
  render_table(frame, app, main_area);
  render_status(frame, app, status_area);
  render_input(frame, app, input_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let left = Line::from(vec![
    Span::styled(" ▶ ytwl ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled(app.source.display().to_string(), Style::default().fg(theme.muted)),
  ]);
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn header_label(app: &App, column: ColumnKey) -> String {
  if column == ColumnKey::Select {
    return app.table.header_selection().glyph().to_string();
  }
  let key = app.table.sort_state().keys().iter().find(|k| k.column == column);
  let arrow = key.map_or("", |k| if k.descending { " ↓" } else { " ↑" });
  format!("{}{}", column.header(), arrow)
}

fn render_cell(value: CellValue, theme: &Theme, width: usize) -> Cell<'static> {
  match value {
    CellValue::Checked(on) => Cell::from(if on { "[x]" } else { "[ ]" }),
    CellValue::Thumbnail { src, .. } => {
      Cell::from(if src.is_empty() { " · " } else { " ▣ " }).style(Style::default().fg(theme.muted))
    }
    CellValue::Title { parts, .. } => {
      let subtitle = parts.subtitle();
      Cell::from(Text::from(vec![
        Line::from(Span::styled(truncate_str(&parts.title, width), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(truncate_str(&subtitle, width), Style::default().fg(theme.muted))),
      ]))
    }
    CellValue::Text(s) => Cell::from(truncate_str(&s, width)),
    CellValue::Tags(tags) if tags.is_empty() => Cell::from("N/A").style(Style::default().fg(theme.muted)),
    CellValue::Tags(tags) => Cell::from(truncate_str(&tags.join(", "), width)).style(Style::default().fg(theme.tag)),
    CellValue::Link { label, .. } => {
      Cell::from(truncate_str(&label, width)).style(Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED))
    }
    CellValue::Actions(_) => Cell::from(""),
  }
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let columns: Vec<ColumnKey> = app.table.visible_columns().into_iter().filter(|c| *c != ColumnKey::Actions).collect();
  let widths: Vec<Constraint> = columns.iter().map(|c| column_width(*c)).collect();

  // Fixed columns get their width; the title column takes the rest.
  let fixed: u16 = widths.iter().map(|w| if let Constraint::Length(n) = w { *n + 1 } else { 1 }).sum();
  let title_w = area.width.saturating_sub(fixed + 4) as usize;

  let header = Row::new(columns.iter().map(|c| Cell::from(header_label(app, *c))))
    .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = app
    .table
    .page_rows()
    .into_iter()
    .enumerate()
    .map(|(i, row)| {
      let cells = columns.iter().map(|c| {
        let width = match column_width(*c) {
          Constraint::Length(n) => n as usize,
          _ => title_w,
        };
        render_cell(app.table.cell(row, *c), theme, width)
      });
      let bg = if i % 2 == 1 { theme.stripe_bg } else { theme.bg };
      Row::new(cells).height(2).style(Style::default().fg(theme.fg)).bg(bg)
    })
    .collect();

  let title = format!(
    " {} of {} videos · page {}/{} ",
    app.table.visible_indices().len(),
    app.table.rows().len(),
    app.table.page_index() + 1,
    app.table.page_count()
  );

  let table = Table::new(rows, widths)
    .header(header)
    .block(
      Block::bordered()
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(theme.border)),
    )
    .row_highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg))
    .highlight_symbol("▶ ");

  frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let (text, style) = status_line(app);
  frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Pending error, else a summary of selection, sort, parser and tag filters.
fn status_line(app: &App) -> (String, Style) {
  let theme = app.theme();
  if let Some(err) = &app.last_error {
    return (format!(" ⚠  {}", err), Style::default().fg(theme.error));
  }
  let mut parts = vec![
    format!("{} selected", app.table.selection().len()),
    format!("sort: {}", app.sort_label()),
    format!("parser: {}", app.table.parser().label()),
  ];
  if let Some(c) = app.tag_filter_label(ColumnKey::Categories) {
    parts.push(format!("category: {}", c));
  }
  if let Some(t) = app.tag_filter_label(ColumnKey::Topics) {
    parts.push(format!("topic: {}", t));
  }
  (format!(" {}", parts.join(" · ")), Style::default().fg(theme.muted))
}

/// Horizontal scroll that keeps `cursor_col` inside a field `inner_w` columns wide.
/// A zero-width field never scrolls past the cursor.
fn filter_scroll(cursor_col: usize, scroll: usize, inner_w: usize) -> usize {
  if inner_w == 0 {
    scroll.min(cursor_col)
  } else if cursor_col < scroll {
    cursor_col
  } else if cursor_col >= scroll + inner_w {
    cursor_col + 1 - inner_w
  } else {
    scroll
  }
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let border_color = if app.mode == AppMode::Filter { theme.accent } else { theme.border };
  let input_block = Block::bordered()
    .title(" Filter titles ")
    .title_style(Style::default().fg(border_color))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.filter, app.filter_cursor);

  app.filter_scroll = filter_scroll(cursor_col, app.filter_scroll, inner_w);

  let visible: String = app
    .filter
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.filter_scroll)
    .take_while(|(start, _, _)| *start < app.filter_scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(input_block);
  frame.render_widget(paragraph, area);

  if app.mode == AppMode::Filter && inner_w > 0 {
    let cursor_x = area.x + 2 + cursor_col.saturating_sub(app.filter_scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let keys: Vec<(&str, &str)> = match app.mode {
    AppMode::Browse => vec![
      ("j/k", "Move"),
      ("Space", "Select"),
      ("a", "Page"),
      ("/", "Filter"),
      ("c/t", "Tags"),
      ("s/S", "Sort"),
      ("n/p", "Page"),
      ("h", "Thumb"),
      ("q", "Quit"),
    ],
    AppMode::Filter => vec![("Enter", "Apply"), ("↑/↓", "Move"), ("Esc", "Clear")],
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw(" "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}
