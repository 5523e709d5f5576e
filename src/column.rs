//! Column keys and the capabilities each one declares.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
  Select,
  Thumbnail,
  Title,
  Length,
  Categories,
  Topics,
  Channel,
  Actions,
}

/// What a column allows the view model to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
  Sortable,
  /// May be a secondary key in a multi-column sort.
  MultiSort,
  /// Case-insensitive substring filter.
  TextFilter,
  /// Accepted-tag-set filter over an array field.
  SetFilter,
  Hideable,
}

impl fmt::Display for Capability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Capability::Sortable => "sorting",
      Capability::MultiSort => "multi-column sorting",
      Capability::TextFilter => "text filtering",
      Capability::SetFilter => "set filtering",
      Capability::Hideable => "hiding",
    };
    f.write_str(s)
  }
}

impl ColumnKey {
  pub const ALL: [ColumnKey; 8] = [
    ColumnKey::Select,
    ColumnKey::Thumbnail,
    ColumnKey::Title,
    ColumnKey::Length,
    ColumnKey::Categories,
    ColumnKey::Topics,
    ColumnKey::Channel,
    ColumnKey::Actions,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ColumnKey::Select => "select",
      ColumnKey::Thumbnail => "thumbnail",
      ColumnKey::Title => "title",
      ColumnKey::Length => "length",
      ColumnKey::Categories => "categories",
      ColumnKey::Topics => "topics",
      ColumnKey::Channel => "channel",
      ColumnKey::Actions => "actions",
    }
  }

  pub fn header(self) -> &'static str {
    match self {
      ColumnKey::Select => "",
      ColumnKey::Thumbnail => "Thumbnail",
      ColumnKey::Title => "Title",
      ColumnKey::Length => "Length",
      ColumnKey::Categories => "Categories",
      ColumnKey::Topics => "Topics",
      ColumnKey::Channel => "Channel",
      ColumnKey::Actions => "",
    }
  }

  pub fn capabilities(self) -> &'static [Capability] {
    use Capability::*;
    match self {
      ColumnKey::Select | ColumnKey::Actions => &[],
      ColumnKey::Thumbnail => &[Hideable],
      ColumnKey::Title => &[Sortable, TextFilter, Hideable],
      ColumnKey::Length => &[Sortable, MultiSort, Hideable],
      ColumnKey::Categories | ColumnKey::Topics => &[SetFilter, Hideable],
      ColumnKey::Channel => &[Sortable, Hideable],
    }
  }

  pub fn supports(self, capability: Capability) -> bool {
    self.capabilities().contains(&capability)
  }

  /// `Ok(())` if the column declares `capability`, otherwise `TableError::Unsupported`.
  pub fn require(self, capability: Capability) -> Result<()> {
    if self.supports(capability) { Ok(()) } else { Err(TableError::unsupported(self, capability)) }
  }

  pub fn parse(s: &str) -> Result<Self> {
    let needle = s.trim().to_lowercase();
    ColumnKey::ALL.into_iter().find(|c| c.as_str() == needle).ok_or_else(|| TableError::UnknownColumn(s.to_string()))
  }
}

impl fmt::Display for ColumnKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
