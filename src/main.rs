mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use ytwl::config::Config;
use ytwl::{CellValue, ColumnKey, RowId, TitleParser, VideoTable, ingest, logging, options};

use app::App;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Browse a YouTube watch-later list as a table", long_about = None)]
struct Args {
  /// Title parser: 'strict' (default) or 'lenient'
  #[arg(long, global = true)]
  parser: Option<TitleParser>,

  /// Rows per page
  #[arg(long, global = true)]
  page_size: Option<usize>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open the interactive table
  View { file: PathBuf },

  /// Print filtered, sorted rows
  List {
    file: PathBuf,
    /// Case-insensitive substring matched against the raw title
    #[arg(short, long)]
    query: Option<String>,
    /// Accept rows tagged with this category (repeatable, any may match)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Accept rows tagged with this topic (repeatable, any may match)
    #[arg(long = "topic")]
    topics: Vec<String>,
    /// Sort columns in priority order: title, length, channel
    #[arg(long, value_enum)]
    sort: Vec<ColumnKey>,
    /// Sort descending
    #[arg(long)]
    desc: bool,
    /// Print only this page (1-based)
    #[arg(long)]
    page: Option<usize>,
    /// Emit the per-column cell values as JSON
    #[arg(long)]
    json: bool,
  },

  /// Flatten a watch-later export into a record file
  Extract {
    export: PathBuf,
    #[arg(short, long, default_value = "videos.json")]
    output: PathBuf,
  },

  /// Copy categories and topics onto records with matching titles
  Merge {
    videos: PathBuf,
    tagged: PathBuf,
    #[arg(short, long, default_value = "merged_videos.json")]
    output: PathBuf,
  },

  /// Write category and topic picker options
  Options {
    file: PathBuf,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Keep first-seen order instead of sorting alphabetically
    #[arg(long)]
    unsorted: bool,
  },
}

// --- Main ---

fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = logging::init();
  let config = Config::load();
  info!(command = ?args.command, "ytwl starting");

  match args.command {
    Command::View { file } => {
      let table = build_table(&file, &config, args.parser, args.page_size)?;
      let app = App::new(table, file, config);

      let default_hook = std::panic::take_hook();
      std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        default_hook(info);
      }));

      let mut terminal = ratatui::init();
      let result = run(&mut terminal, app);
      ratatui::restore();
      result
    }
    Command::List { file, query, categories, topics, sort, desc, page, json } => {
      let mut table = build_table(&file, &config, args.parser, args.page_size)?;
      if let Some(q) = query {
        table.set_text_filter(ColumnKey::Title, &q)?;
      }
      table.set_tag_filter(ColumnKey::Categories, categories)?;
      table.set_tag_filter(ColumnKey::Topics, topics)?;
      for (i, column) in sort.into_iter().enumerate() {
        if i == 0 { table.sort_by(column, desc)? } else { table.then_sort_by(column, desc)? }
      }
      let rows = match page {
        Some(n) => {
          table.set_page(n.saturating_sub(1));
          table.page_rows()
        }
        None => table.visible_rows(),
      };
      if json {
        print_json(&table, &rows)?;
      } else {
        print_text(&rows);
      }
      Ok(())
    }
    Command::Extract { export, output } => {
      let records = ingest::load_export(&export)?;
      ingest::save_json(&output, &records)?;
      println!("Extracted {} videos to {}", records.len(), output.display());
      Ok(())
    }
    Command::Merge { videos, tagged, output } => {
      let mut records = ingest::load_records(&videos)?;
      let extra = ingest::load_records(&tagged)?;
      let matched = ingest::merge_tags(&mut records, &extra);
      ingest::save_json(&output, &records)?;
      println!("Merged tags into {} of {} videos, saved to {}", matched, records.len(), output.display());
      Ok(())
    }
    Command::Options { file, out_dir, unsorted } => {
      let records = ingest::load_records(&file)?;
      let opts = options::collect_options(&records, !unsorted);
      let (categories, topics) = options::write_options(&opts, &out_dir)?;
      println!("Saved {} categories to {}", opts.categories.len(), categories.display());
      println!("Saved {} topics to {}", opts.topics.len(), topics.display());
      Ok(())
    }
  }
}

fn build_table(file: &Path, config: &Config, parser: Option<TitleParser>, page_size: Option<usize>) -> Result<VideoTable> {
  let records = ingest::load_records(file)?;
  let parser = config.parser(parser);
  let mut table = VideoTable::new(records, parser, config.page_size(page_size)).context("Invalid table settings")?;
  for column in config.hidden_columns() {
    if let Err(e) = table.set_column_hidden(column, true) {
      warn!(err = %e, "ignoring hidden column from config");
    }
  }
  info!(rows = table.rows().len(), parser = parser.label(), "table ready");
  Ok(table)
}

#[derive(Serialize)]
struct ListedRow {
  id: RowId,
  cells: BTreeMap<ColumnKey, CellValue>,
}

fn print_json(table: &VideoTable, rows: &[&ytwl::projection::VideoRow]) -> Result<()> {
  let listed: Vec<ListedRow> =
    rows.iter().map(|row| ListedRow { id: row.id.clone(), cells: table.cells(row).into_iter().collect() }).collect();
  println!("{}", serde_json::to_string_pretty(&listed).context("Failed to serialize rows")?);
  Ok(())
}

fn print_text(rows: &[&ytwl::projection::VideoRow]) {
  for row in rows {
    let d = &row.decomposed;
    println!(
      "{}\t{}\t{}\t{}\t{}\t{}",
      d.title,
      d.channel.as_deref().unwrap_or(&row.channel_name),
      d.views.as_deref().unwrap_or("-"),
      row.raw.length,
      row.raw.categories.join(", "),
      row.video_url
    );
  }
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
  loop {
    app.expire_error();
    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    if event::poll(Duration::from_millis(250))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key);
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }
  info!(selected = app.table.selection().len(), "ytwl exiting");
  Ok(())
}
