//! Transcript file discovery.
//!
//! This module provides a scanner for locating transcript files in a
//! directory, respecting configuration for extensions, excludes, and
//! file size limits.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for transcript scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions treated as transcripts (e.g., ["txt", "log"])
    pub extensions: Vec<String>,
    /// Patterns to exclude (matched against file/directory names)
    pub excludes: Vec<String>,
    /// Maximum transcript size in bytes
    pub max_file_size: usize,
    /// Maximum number of transcripts to scan
    pub max_files: Option<usize>,
    /// Recurse into subdirectories
    pub recursive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt", "log", "transcript"]
                .into_iter()
                .map(String::from)
                .collect(),
            excludes: Vec::new(),
            max_file_size: 1024 * 1024, // 1MB
            max_files: None,
            recursive: false,
        }
    }
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            excludes: config.excludes.clone(),
            max_file_size: config.max_file_size,
            max_files: Some(config.max_files),
            recursive: config.recursive,
        }
    }
}

/// Scanned transcript file information.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Path relative to the scan root
    pub path: String,
    /// File size in bytes
    pub size: u64,
}

/// Scanner for discovering transcript files.
pub struct TranscriptScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl TranscriptScanner {
    /// Create a new transcript scanner.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    /// Scan for all matching transcripts, sorted by path.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();
        self.walk_dir(&self.root, &mut files)?;

        files.sort_by(|a, b| a.path.cmp(&b.path));

        // Apply max_files limit if set
        if let Some(max) = self.config.max_files {
            files.truncate(max);
        }

        Ok(files)
    }

    /// Absolute path of a scanned file.
    pub fn resolve(&self, file: &ScannedFile) -> PathBuf {
        self.root.join(&file.path)
    }

    /// Check if a file matches scan criteria.
    pub fn matches(&self, path: &Path) -> bool {
        // Check if excluded
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.is_excluded(name) {
                return false;
            }
        }

        // Check extension
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !self.config.extensions.contains(&ext.to_string()) {
            return false;
        }

        // Check file size
        if let Ok(metadata) = fs::metadata(path) {
            if metadata.len() > self.config.max_file_size as u64 {
                return false;
            }
        } else {
            return false;
        }

        true
    }

    /// Check if a name matches exclusion patterns.
    fn is_excluded(&self, name: &str) -> bool {
        // Hidden files
        if name.starts_with('.') {
            return true;
        }

        // Explicit excludes
        self.config.excludes.iter().any(|pattern| name == pattern)
    }

    /// Walk a directory, recursing when configured.
    fn walk_dir(&self, dir: &Path, files: &mut Vec<ScannedFile>) -> Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }

        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                debug!("Cannot read directory {}: {}", dir.display(), e);
                return Ok(());
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Skip excluded
            if self.is_excluded(&name) {
                continue;
            }

            if path.is_dir() {
                if self.config.recursive {
                    self.walk_dir(&path, files)?;
                }
            } else if path.is_file() && self.matches(&path) {
                if let Ok(metadata) = fs::metadata(&path) {
                    let rel_path = path.strip_prefix(&self.root).unwrap_or(&path);

                    files.push(ScannedFile {
                        path: rel_path.to_string_lossy().to_string(),
                        size: metadata.len(),
                    });
                }
            }
        }

        Ok(())
    }
}
