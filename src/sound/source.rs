//! Sound source resolution.
//!
//! The alarm is a named asset (e.g. `alarm`) looked up at play time in an
//! ordered list of directories. The first file whose stem matches the name
//! and whose extension is supported wins.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Supported audio file extensions, in lookup order.
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "aiff", "m4a", "flac"];

/// A resolved sound file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSource {
    name: String,
    path: PathBuf,
}

impl SoundSource {
    /// Creates a new sound source. The path is not checked.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the name of the sound.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file path of the sound.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A named alarm asset and the directories it is looked up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmSound {
    name: String,
    search_dirs: Vec<PathBuf>,
}

impl AlarmSound {
    /// Asset name used when none is configured.
    pub const DEFAULT_NAME: &'static str = "alarm";

    #[must_use]
    pub fn new(name: impl Into<String>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            search_dirs,
        }
    }

    /// Default lookup path: `./assets`, then `<data dir>/tempo/sounds`.
    #[must_use]
    pub fn default_search_dirs() -> Vec<PathBuf> {
        let mut search_dirs = vec![PathBuf::from("assets")];
        if let Some(data_dir) = dirs::data_dir() {
            search_dirs.push(data_dir.join("tempo").join("sounds"));
        }
        search_dirs
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolves the asset to a file on disk.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::NotResolved` if no directory holds a matching file.
    pub fn resolve(&self) -> Result<SoundSource, SoundError> {
        for dir in &self.search_dirs {
            for ext in SUPPORTED_EXTENSIONS {
                let path = dir.join(format!("{}.{}", self.name, ext));
                if path.is_file() {
                    return Ok(SoundSource::new(self.name.clone(), path));
                }
            }
        }

        Err(SoundError::NotResolved {
            name: self.name.clone(),
            searched: self.search_dirs.len(),
        })
    }

    /// Lists every playable sound in the search directories.
    ///
    /// Missing or unreadable directories are skipped.
    #[must_use]
    pub fn discover(&self) -> Vec<SoundSource> {
        let mut sounds = Vec::new();

        for dir in &self.search_dirs {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let file_path = entry.path();
                let supported = file_path
                    .extension()
                    .map(|ext| ext.to_string_lossy().to_lowercase())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
                if !supported {
                    continue;
                }
                if let Some(stem) = file_path.file_stem() {
                    sounds.push(SoundSource::new(stem.to_string_lossy(), file_path.clone()));
                }
            }
        }

        sounds.sort_by(|a, b| a.name().cmp(b.name()));
        sounds
    }
}

impl Default for AlarmSound {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME, Self::default_search_dirs())
    }
}
