use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};
use crate::settings::Settings;

/// Files in `dir` whose extension matches `extension` (case-insensitive),
/// sorted by name so runs are deterministic. A missing inbox is an empty one.
pub fn source_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Move every matching inbox file into the archive directory, creating it if
/// needed. Not transactional by design: a failed move aborts the stage, but
/// files already moved in the same pass stay moved.
pub fn archive_inbox(settings: &Settings) -> Result<Vec<String>> {
    let archive = settings.archive_path();
    fs::create_dir_all(&archive)?;

    let mut moved = Vec::new();
    for path in source_files(&settings.inbox_path(), &settings.extension)? {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let dest = archive.join(&name);
        fs::rename(&path, &dest).map_err(|source| ImportError::Archival {
            file: name.clone(),
            source,
        })?;
        moved.push(name);
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(root: &Path) -> Settings {
        Settings {
            data_dir: root.to_string_lossy().to_string(),
            inbox_dir: root.join("files").to_string_lossy().to_string(),
            archive_dir: root.join("imported-files").to_string_lossy().to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_source_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "").unwrap();
        fs::write(dir.path().join("a.CSV"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let files = source_files(dir.path(), "csv").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_source_files_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = source_files(&dir.path().join("nope"), "csv").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_archive_moves_all_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path());
        fs::create_dir_all(settings.inbox_path()).unwrap();
        fs::write(settings.inbox_path().join("a.csv"), "data").unwrap();
        fs::write(settings.inbox_path().join("b.csv"), "data").unwrap();
        fs::write(settings.inbox_path().join("keep.txt"), "data").unwrap();

        let moved = archive_inbox(&settings).unwrap();
        assert_eq!(moved, vec!["a.csv", "b.csv"]);
        assert!(settings.archive_path().join("a.csv").exists());
        assert!(settings.archive_path().join("b.csv").exists());
        assert!(!settings.inbox_path().join("a.csv").exists());
        assert!(!settings.inbox_path().join("b.csv").exists());
        // Non-matching files stay behind.
        assert!(settings.inbox_path().join("keep.txt").exists());
        assert!(source_files(&settings.inbox_path(), "csv").unwrap().is_empty());
    }

    #[test]
    fn test_archive_creates_archive_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path());
        fs::create_dir_all(settings.inbox_path()).unwrap();
        assert!(!settings.archive_path().exists());
        archive_inbox(&settings).unwrap();
        assert!(settings.archive_path().exists());
    }

    #[test]
    fn test_failed_move_keeps_earlier_moves() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path());
        fs::create_dir_all(settings.inbox_path()).unwrap();
        fs::write(settings.inbox_path().join("a.csv"), "data").unwrap();
        fs::write(settings.inbox_path().join("b.csv"), "data").unwrap();

        // A non-empty directory squatting on b.csv's destination makes the
        // rename fail after a.csv has already moved.
        let blocker = settings.archive_path().join("b.csv");
        fs::create_dir_all(blocker.join("occupied")).unwrap();

        let err = archive_inbox(&settings).unwrap_err();
        match err {
            ImportError::Archival { file, .. } => assert_eq!(file, "b.csv"),
            other => panic!("unexpected error: {other}"),
        }
        // a.csv stays archived, b.csv stays in the inbox.
        assert!(settings.archive_path().join("a.csv").exists());
        assert!(!settings.inbox_path().join("a.csv").exists());
        assert!(settings.inbox_path().join("b.csv").exists());
    }
}
