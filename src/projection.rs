use std::collections::HashMap;
use tracing::trace;

use crate::constants::constants;
use crate::record::{RawVideoRecord, RowId};
use crate::title::{DecomposedTitle, TitleParser};

/// A record plus everything derived from it for display and filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRow {
  pub id: RowId,
  pub raw: RawVideoRecord,
  pub video_url: String,
  pub channel_link: String,
  pub channel_name: String,
  pub decomposed: DecomposedTitle,
}

/// `https://www.youtube.com/watch?v=<id>`, or `#` without an id.
pub fn video_link(video_id: &str) -> String {
  let c = constants();
  if video_id.is_empty() {
    return c.missing_link.clone();
  }
  format!("{}{}{}", c.site_origin, c.watch_path, video_id)
}

/// Prefix the site origin onto a `/channel/<id>` or `/@handle` path; `#` when empty.
pub fn channel_link(channel_url: &str) -> String {
  let c = constants();
  if channel_url.is_empty() {
    return c.missing_link.clone();
  }
  format!("{}{}", c.site_origin, channel_url)
}

/// Last path segment of the channel URL, e.g. `@Handle` for `/@Handle`.
pub fn channel_display_name(channel_url: &str) -> String {
  if channel_url.is_empty() {
    return constants().unknown_channel.clone();
  }
  channel_url.rsplit('/').next().unwrap_or(channel_url).to_string()
}

/// Maps raw records to [`VideoRow`]s with one parser, memoizing decompositions per title.
#[derive(Debug)]
pub struct Projector {
  parser: TitleParser,
  cache: HashMap<String, DecomposedTitle>,
}

impl Projector {
  pub fn new(parser: TitleParser) -> Self {
    Self { parser, cache: HashMap::new() }
  }

  pub fn parser(&self) -> TitleParser {
    self.parser
  }

  pub fn decompose(&mut self, raw_title: &str) -> DecomposedTitle {
    if let Some(hit) = self.cache.get(raw_title) {
      return hit.clone();
    }
    let decomposed = self.parser.decompose(raw_title);
    trace!(parser = self.parser.label(), outcome = ?decomposed.outcome(), "decomposed title");
    self.cache.insert(raw_title.to_string(), decomposed.clone());
    decomposed
  }

  pub fn project(&mut self, id: RowId, raw: &RawVideoRecord) -> VideoRow {
    VideoRow {
      id,
      video_url: video_link(&raw.video_id),
      channel_link: channel_link(&raw.channel_url),
      channel_name: channel_display_name(&raw.channel_url),
      decomposed: self.decompose(&raw.title),
      raw: raw.clone(),
    }
  }

  pub fn cached_titles(&self) -> usize {
    self.cache.len()
  }

  pub fn clear(&mut self) {
    self.cache.clear();
  }
}
