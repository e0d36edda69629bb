use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default = "default_inbox_dir")]
    pub inbox_dir: String,
    #[serde(default = "default_archive_dir")]
    pub archive_dir: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_inbox_dir() -> String {
    "files".to_string()
}

fn default_archive_dir() -> String {
    "imported-files".to_string()
}

fn default_delimiter() -> char {
    ';'
}

fn default_comment_prefix() -> String {
    "--".to_string()
}

fn default_chunk_size() -> usize {
    200
}

fn default_extension() -> String {
    "csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            inbox_dir: default_inbox_dir(),
            archive_dir: default_archive_dir(),
            delimiter: default_delimiter(),
            comment_prefix: default_comment_prefix(),
            chunk_size: default_chunk_size(),
            extension: default_extension(),
        }
    }
}

impl Settings {
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("ticketeer.db")
    }

    pub fn inbox_path(&self) -> PathBuf {
        PathBuf::from(&self.inbox_dir)
    }

    pub fn archive_path(&self) -> PathBuf {
        PathBuf::from(&self.archive_dir)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ticketeer")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("ticketeer")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ImportError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/test".to_string(),
            inbox_dir: "incoming".to_string(),
            archive_dir: "done".to_string(),
            delimiter: ',',
            comment_prefix: "#".to_string(),
            chunk_size: 50,
            extension: "txt".to_string(),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.inbox_dir, "incoming");
        assert_eq!(loaded.delimiter, ',');
        assert_eq!(loaded.chunk_size, 50);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.inbox_dir, "files");
        assert_eq!(s.archive_dir, "imported-files");
        assert_eq!(s.delimiter, ';');
        assert_eq!(s.comment_prefix, "--");
        assert_eq!(s.chunk_size, 200);
        assert_eq!(s.extension, "csv");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test", "chunk_size": 10}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.chunk_size, 10);
        assert_eq!(s.delimiter, ';');
        assert_eq!(s.comment_prefix, "--");
    }
}
