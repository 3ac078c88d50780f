//! Runtime server configuration, deserialised from `config.toml`.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file. Created on first run.
  #[serde(default = "default_db_path")]
  pub db_path:    PathBuf,
  /// Directory scanned for `{Subject}_{Year}_{Level}_{Type}_{Number}.pdf`
  /// files by the `sync-papers` subcommand.
  #[serde(default = "default_papers_dir")]
  pub papers_dir: PathBuf,
  /// Subject taxonomy seeded by the `init` subcommand.
  #[serde(default = "default_subjects")]
  pub subjects:   Vec<String>,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  25001
}

fn default_db_path() -> PathBuf {
  PathBuf::from("swot.db")
}

fn default_papers_dir() -> PathBuf {
  PathBuf::from("papers")
}

fn default_subjects() -> Vec<String> {
  vec!["Biology".to_string(), "Chemistry".to_string()]
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      db_path:    default_db_path(),
      papers_dir: default_papers_dir(),
      subjects:   default_subjects(),
    }
  }
}
