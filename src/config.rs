use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::column::ColumnKey;
use crate::constants::constants;
use crate::title::TitleParser;

/// User preferences stored as `prefs.toml` in the platform config dir.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
pub struct Config {
  pub parser: Option<String>,
  pub page_size: Option<usize>,
  pub theme_name: Option<String>,
  pub hidden_columns: Option<Vec<String>>,
}

impl Config {
  pub fn load() -> Self {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ytwl") {
      let config_file = proj_dirs.config_dir().join("prefs.toml");
      if let Ok(content) = std::fs::read_to_string(config_file)
        && let Ok(config) = toml::from_str(&content)
      {
        return config;
      }
    }
    Self::default()
  }

  pub fn save(&self) {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ytwl") {
      let config_dir = proj_dirs.config_dir();
      if std::fs::create_dir_all(config_dir).is_ok() {
        let config_file = config_dir.join("prefs.toml");
        if let Ok(content) = toml::to_string(self) {
          let _ = std::fs::write(config_file, content);
        }
      }
    }
  }

  /// The CLI flag wins, then the config file, then the strict parser.
  pub fn parser(&self, cli: Option<TitleParser>) -> TitleParser {
    cli.or_else(|| self.parser.as_deref().map(TitleParser::from_config)).unwrap_or_default()
  }

  pub fn page_size(&self, cli: Option<usize>) -> usize {
    cli.or(self.page_size).unwrap_or(constants().default_page_size)
  }

  /// Hidden columns that exist; unknown names are ignored.
  pub fn hidden_columns(&self) -> Vec<ColumnKey> {
    self.hidden_columns.iter().flatten().filter_map(|name| ColumnKey::parse(name).ok()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_prefs_toml() {
    let config: Config = toml::from_str(
      r#"
      parser = "lenient"
      page_size = 50
      theme_name = "Paper"
      hidden_columns = ["thumbnail", "bogus"]
      "#,
    )
    .unwrap();
    assert_eq!(config.parser(None), TitleParser::Lenient);
    assert_eq!(config.page_size(None), 50);
    assert_eq!(config.hidden_columns(), vec![ColumnKey::Thumbnail]);
  }

  #[test]
  fn cli_overrides_config() {
    let config = Config { parser: Some("lenient".into()), page_size: Some(50), ..Default::default() };
    assert_eq!(config.parser(Some(TitleParser::Strict)), TitleParser::Strict);
    assert_eq!(config.page_size(Some(5)), 5);
  }

  #[test]
  fn defaults_when_empty() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.parser(None), TitleParser::Strict);
    assert_eq!(config.page_size(None), constants().default_page_size);
    assert!(config.hidden_columns().is_empty());
  }

  #[test]
  fn round_trips_through_toml() {
    let config = Config {
      parser: Some("strict".into()),
      page_size: Some(10),
      theme_name: None,
      hidden_columns: Some(vec!["topics".into()]),
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
  }
}
