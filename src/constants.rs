//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available,
//! with no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // Link construction
  pub site_origin: String,
  pub watch_path: String,
  pub missing_link: String,
  pub unknown_channel: String,

  // Table
  pub default_page_size: usize,
  pub max_page_size: usize,

  // Logging
  pub log_file_name: String,
  pub log_env_var: String,

  // Options export
  pub category_options_file: String,
  pub topic_options_file: String,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed the first test run catches it.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
