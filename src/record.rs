use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// One watch-later entry as stored in `videos.json`.
///
/// Every field tolerates being missing or `null`; both read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVideoRecord {
  #[serde(default, deserialize_with = "null_as_default")]
  pub title: String,
  /// Free-form duration text such as `12:34`.
  #[serde(default, deserialize_with = "null_as_default")]
  pub length: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub video_id: String,
  /// Playlist entry id; unique even when a video is saved twice.
  #[serde(default, deserialize_with = "null_as_default")]
  pub set_video_id: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub channel_url: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub thumbnail_url: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub categories: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub topics: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stable row identity, independent of sort and filter order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowId(String);

impl RowId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for RowId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// Assign an id to each record: `set_video_id`, else `video_id`, else `row-<index>`.
/// Repeats get the first free `#<n>` suffix, skipping ids other records already own,
/// so every id in the set is distinct.
pub fn assign_row_ids(records: &[RawVideoRecord]) -> Vec<RowId> {
  let bases: Vec<String> = records.iter().enumerate().map(|(i, r)| base_id(i, r)).collect();
  let reserved: HashSet<&str> = bases.iter().map(String::as_str).collect();
  let mut issued = HashSet::<String>::new();
  bases
    .iter()
    .map(|base| {
      let id = if issued.contains(base) { first_free_suffix(base, &issued, &reserved) } else { base.clone() };
      issued.insert(id.clone());
      RowId(id)
    })
    .collect()
}

fn first_free_suffix(base: &str, issued: &HashSet<String>, reserved: &HashSet<&str>) -> String {
  let mut n = 2;
  loop {
    let candidate = format!("{}#{}", base, n);
    if !issued.contains(&candidate) && !reserved.contains(candidate.as_str()) {
      return candidate;
    }
    n += 1;
  }
}

fn base_id(index: usize, r: &RawVideoRecord) -> String {
  if !r.set_video_id.is_empty() {
    r.set_video_id.clone()
  } else if !r.video_id.is_empty() {
    r.video_id.clone()
  } else {
    format!("row-{}", index)
  }
}
