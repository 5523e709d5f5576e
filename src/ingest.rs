//! Reading and preparing record files.
//!
//! A watch-later export is first flattened into [`RawVideoRecord`]s
//! ([`extract_export`]); tags produced elsewhere are then attached by title
//! ([`merge_tags`]).

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::record::RawVideoRecord;

#[derive(Debug, Deserialize)]
struct ExportVideo {
  #[serde(rename = "titleLong")]
  title_long: Option<String>,
  #[serde(rename = "timeShort")]
  time_short: Option<String>,
  id: Option<String>,
  #[serde(rename = "setVideoId")]
  set_video_id: Option<String>,
  channel: Option<ExportChannel>,
  #[serde(default)]
  thumbnails: Vec<ExportThumbnail>,
}

#[derive(Debug, Deserialize)]
struct ExportChannel {
  url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportThumbnail {
  url: Option<String>,
}

impl From<ExportVideo> for RawVideoRecord {
  fn from(v: ExportVideo) -> Self {
    RawVideoRecord {
      title: v.title_long.unwrap_or_default(),
      length: v.time_short.unwrap_or_default(),
      video_id: v.id.unwrap_or_default(),
      set_video_id: v.set_video_id.unwrap_or_default(),
      channel_url: v.channel.and_then(|c| c.url).unwrap_or_default(),
      thumbnail_url: v.thumbnails.into_iter().next().and_then(|t| t.url).unwrap_or_default(),
      categories: Vec::new(),
      topics: Vec::new(),
    }
  }
}

/// Flatten an export of the form `{ "videos": [ ... ] }`.
pub fn extract_export(json: &str) -> Result<Vec<RawVideoRecord>> {
  let root: serde_json::Value = serde_json::from_str(json).context("Export is not valid JSON")?;
  let videos =
    root.get("videos").and_then(|v| v.as_array()).ok_or_else(|| anyhow!("'videos' key missing or not a list"))?;
  let mut records = Vec::with_capacity(videos.len());
  for (i, video) in videos.iter().enumerate() {
    match ExportVideo::deserialize(video) {
      Ok(v) => records.push(v.into()),
      Err(e) => warn!(index = i, err = %e, "skipping malformed export entry"),
    }
  }
  info!(count = records.len(), "extracted export entries");
  Ok(records)
}

/// Copy categories and topics from `tagged` onto `videos` with the same title.
/// Returns how many records were matched; unmatched ones keep their tags.
pub fn merge_tags(videos: &mut [RawVideoRecord], tagged: &[RawVideoRecord]) -> usize {
  let lookup: HashMap<&str, &RawVideoRecord> = tagged.iter().map(|r| (r.title.as_str(), r)).collect();
  let mut matched = 0;
  for video in videos.iter_mut() {
    if let Some(extra) = lookup.get(video.title.as_str()) {
      video.categories = extra.categories.clone();
      video.topics = extra.topics.clone();
      matched += 1;
    }
  }
  info!(matched, total = videos.len(), "merged tags by title");
  matched
}

pub fn parse_records(json: &str) -> Result<Vec<RawVideoRecord>> {
  serde_json::from_str(json).context("Expected a JSON list of video records")
}

pub fn load_records(path: &Path) -> Result<Vec<RawVideoRecord>> {
  let json = read(path)?;
  let records = parse_records(&json).with_context(|| format!("Failed to parse {}", path.display()))?;
  info!(count = records.len(), path = %path.display(), "loaded records");
  Ok(records)
}

pub fn load_export(path: &Path) -> Result<Vec<RawVideoRecord>> {
  extract_export(&read(path)?).with_context(|| format!("Failed to extract {}", path.display()))
}

pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize records")?;
  std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn read(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  const EXPORT: &str = r#"{
    "videos": [
      {
        "titleLong": "Intro to Rust by CodeChannel 12,345 views 3 days ago Part 1",
        "timeShort": "12:34",
        "id": "abc",
        "setVideoId": "S1",
        "channel": { "url": "/@CodeChannel" },
        "thumbnails": [{ "url": "https://i.ytimg.com/vi/abc/1.jpg" }, { "url": "https://i.ytimg.com/vi/abc/2.jpg" }]
      },
      { "titleLong": "Bare entry" },
      "not an object"
    ]
  }"#;

  #[test]
  fn extract_maps_export_fields() {
    let records = extract_export(EXPORT).unwrap();
    assert_eq!(records.len(), 2);
    let r = &records[0];
    assert_eq!(r.length, "12:34");
    assert_eq!(r.video_id, "abc");
    assert_eq!(r.set_video_id, "S1");
    assert_eq!(r.channel_url, "/@CodeChannel");
    assert_eq!(r.thumbnail_url, "https://i.ytimg.com/vi/abc/1.jpg");
    assert_eq!(records[1].title, "Bare entry");
    assert!(records[1].channel_url.is_empty());
  }

  #[test]
  fn extract_requires_videos_list() {
    assert!(extract_export(r#"{ "items": [] }"#).is_err());
    assert!(extract_export(r#"{ "videos": {} }"#).is_err());
    assert!(extract_export("[]").is_err());
    assert!(extract_export("not json").is_err());
  }

  #[test]
  fn merge_attaches_tags_by_title() {
    let mut videos = vec![
      RawVideoRecord { title: "A".into(), ..Default::default() },
      RawVideoRecord { title: "B".into(), categories: vec!["Keep".into()], ..Default::default() },
    ];
    let tagged = vec![RawVideoRecord {
      title: "A".into(),
      categories: vec!["Music".into()],
      topics: vec!["Rock".into()],
      ..Default::default()
    }];
    assert_eq!(merge_tags(&mut videos, &tagged), 1);
    assert_eq!(videos[0].categories, vec!["Music"]);
    assert_eq!(videos[0].topics, vec!["Rock"]);
    assert_eq!(videos[1].categories, vec!["Keep"]);
  }

  #[test]
  fn records_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("videos.json");
    let records = extract_export(EXPORT).unwrap();
    save_json(&path, &records).unwrap();
    assert_eq!(load_records(&path).unwrap(), records);
  }

  #[test]
  fn load_records_reports_path_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = load_records(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"));
  }
}
