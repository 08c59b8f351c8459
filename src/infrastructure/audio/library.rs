//! Clip library: maps clip names to sound files on disk

use std::path::{Path, PathBuf};

/// File extensions tried, in order, when resolving a clip name
pub const CLIP_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

/// Directory of sound files, one file per clip name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipLibrary {
    root: PathBuf,
}

impl ClipLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$XDG_DATA_HOME/hang-timer/sounds` or platform equivalent
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("hang-timer")
            .join("sounds")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file for `clip`, if one exists
    pub fn resolve(&self, clip: &str) -> Option<PathBuf> {
        CLIP_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", clip, ext)))
            .find(|path| path.is_file())
    }

    /// Clips from `clips` with no file in the library
    pub fn missing<'a>(&self, clips: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        clips
            .into_iter()
            .filter(|clip| self.resolve(clip).is_none())
            .collect()
    }
}

impl Default for ClipLibrary {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}
