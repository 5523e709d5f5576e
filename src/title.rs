//! Decomposition of composite watch-later titles.
//!
//! Titles arrive as one string such as
//! `Intro to Rust by CodeChannel 12,345 views 3 days ago Part 1`, embedding the
//! clean title, the channel name, the view count and a trailing phrase. Two
//! strategies split it apart:
//!
//! - [`TitleParser::Strict`] matches the whole string against one anchored
//!   pattern and gives up entirely when it does not fit. This is the canonical
//!   contract and the default.
//! - [`TitleParser::Lenient`] strips the "ago" clause, then peels fields off one
//!   at a time and keeps whatever it recovered.
//!
//! The two strategies disagree on some inputs (see the tests). Pick one per
//! table; never mix their output.

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `<title> by <channel> <views> views [<... ago >]<duration>`
///
/// Counts are ASCII digits only.
static STRICT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(.+?)\s+by\s+(.+?)\s+([0-9]{1,3}(?:,[0-9]{3})*|[0-9]+)\s+views\s+(?:.*?\s+ago\s+)?(.+)$")
    .expect("strict title regex should compile")
});

/// `3 days ago` and everything after it.
static AGO_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)[0-9]+ (?:second|minute|hour|day|week|month|year)s? ago.*").expect("ago clause regex should compile")
});

/// `12,345 views`
static VIEW_TOKEN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)([0-9]+(?:,[0-9]+)*) views").expect("view token regex should compile"));

/// Title decomposition strategy, chosen once when a table is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TitleParser {
  /// Anchored whole-string match; all fields or none.
  #[default]
  Strict,
  /// Field-by-field reduction; never fails, may return partial fields.
  Lenient,
}

impl TitleParser {
  pub const ALL: [TitleParser; 2] = [TitleParser::Strict, TitleParser::Lenient];

  pub fn label(self) -> &'static str {
    match self {
      TitleParser::Strict => "strict",
      TitleParser::Lenient => "lenient",
    }
  }

  /// Unknown names fall back to the canonical strict parser.
  pub fn from_config(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "lenient" => TitleParser::Lenient,
      _ => TitleParser::Strict,
    }
  }

  pub fn decompose(self, raw: &str) -> DecomposedTitle {
    match self {
      TitleParser::Strict => decompose_strict(raw),
      TitleParser::Lenient => decompose_lenient(raw),
    }
  }
}

/// How much of a title the parser managed to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// Channel, views and duration all present.
  Complete,
  /// Channel present, the rest missing.
  Partial,
  /// Nothing beyond the title; `title` holds the (possibly ago-stripped) input.
  Unparsed,
}

/// A raw title split into its parts. Absent parts are `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecomposedTitle {
  pub title: String,
  pub channel: Option<String>,
  /// Digits only, grouping commas removed.
  pub views: Option<String>,
  /// Trailing descriptive phrase. Unrelated to the record's `length`.
  pub duration: Option<String>,
}

impl DecomposedTitle {
  fn bare(title: &str) -> Self {
    Self { title: title.to_string(), ..Self::default() }
  }

  pub fn outcome(&self) -> Outcome {
    match (&self.channel, &self.views, &self.duration) {
      (None, _, _) => Outcome::Unparsed,
      (Some(_), Some(_), Some(_)) => Outcome::Complete,
      (Some(_), _, _) => Outcome::Partial,
    }
  }

  /// Second display line: `channel  views | duration`, empty when unparsed.
  pub fn subtitle(&self) -> String {
    if self.channel.is_none() {
      return String::new();
    }
    format!(
      "{}  {} | {}",
      self.channel.as_deref().unwrap_or(""),
      self.views.as_deref().unwrap_or(""),
      self.duration.as_deref().unwrap_or("")
    )
  }
}

fn strip_grouping(views: &str) -> String {
  views.replace(',', "")
}

fn decompose_strict(raw: &str) -> DecomposedTitle {
  let Some(caps) = STRICT_PATTERN.captures(raw) else {
    return DecomposedTitle::bare(raw);
  };
  DecomposedTitle {
    title: caps[1].trim().to_string(),
    channel: Some(caps[2].trim().to_string()),
    views: Some(strip_grouping(&caps[3])),
    duration: Some(caps[4].trim().to_string()),
  }
}

fn decompose_lenient(raw: &str) -> DecomposedTitle {
  let without_ago = AGO_CLAUSE.replace(raw, "");
  let without_ago = without_ago.trim();

  let Some((video_title, creator_info)) = without_ago.split_once(" by ") else {
    return DecomposedTitle::bare(without_ago);
  };
  let video_title = video_title.trim().to_string();
  let creator_info = creator_info.trim();

  let Some(caps) = VIEW_TOKEN.captures(creator_info) else {
    return DecomposedTitle { title: video_title, channel: Some(creator_info.to_string()), views: None, duration: None };
  };
  // Group 0 always exists on a successful match.
  let token = caps.get(0).map_or(0..0, |m| m.range());
  DecomposedTitle {
    title: video_title,
    channel: Some(creator_info[..token.start].trim().to_string()),
    views: Some(strip_grouping(&caps[1])),
    duration: Some(creator_info[token.end..].trim().to_string()),
  }
}
