//! Filter option lists for the category and topic pickers.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::constants;
use crate::record::RawVideoRecord;

/// One entry of a picker, `{ "value": tag, "label": tag }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
  pub value: String,
  pub label: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TagOptions {
  pub categories: Vec<FilterOption>,
  pub topics: Vec<FilterOption>,
}

/// Unique trimmed, non-empty tags across `records`. First-seen order unless `sorted`.
pub fn collect_options(records: &[RawVideoRecord], sorted: bool) -> TagOptions {
  TagOptions {
    categories: unique_tags(records, |r| r.categories.as_slice(), sorted),
    topics: unique_tags(records, |r| r.topics.as_slice(), sorted),
  }
}

fn unique_tags<F>(records: &[RawVideoRecord], pick: F, sorted: bool) -> Vec<FilterOption>
where
  F: Fn(&RawVideoRecord) -> &[String],
{
  let mut seen = BTreeSet::new();
  let mut tags = Vec::new();
  for tag in records.iter().flat_map(pick).map(|t| t.trim()).filter(|t| !t.is_empty()) {
    if seen.insert(tag) {
      tags.push(tag.to_string());
    }
  }
  if sorted {
    tags.sort();
  }
  tags.into_iter().map(|t| FilterOption { value: t.clone(), label: t }).collect()
}

/// Write `categoryOptions.json` and `topicOptions.json` into `dir`, creating it if needed.
pub fn write_options(options: &TagOptions, dir: &Path) -> Result<(PathBuf, PathBuf)> {
  std::fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {}", dir.display()))?;
  let c = constants();
  let categories_path = dir.join(&c.category_options_file);
  let topics_path = dir.join(&c.topic_options_file);
  write_json(&categories_path, &options.categories)?;
  write_json(&topics_path, &options.topics)?;
  info!(categories = options.categories.len(), topics = options.topics.len(), dir = %dir.display(), "options written");
  Ok((categories_path, topics_path))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize options")?;
  std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
