//! File upload slot holding at most one pending file
//!
//! Two input paths feed the same selection operation: confirming a typed
//! path and picking an entry from the browse popup. Selecting a new file
//! replaces the previous one. No size or type filtering happens here; add a
//! schema rule if one is wanted.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file the user picked but the backend has not stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl PendingFile {
    /// Build a pending file from a local path, reading its metadata
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        if metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path is a directory",
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        })
    }

    /// Preview label shown in place of the upload prompt
    pub fn preview(&self) -> String {
        format!("{} ({})", self.name, format_size(self.size))
    }
}

impl fmt::Display for PendingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.preview())
    }
}

/// Value object behind a FileUpload field: a typed-path buffer plus the
/// selected file, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSlot {
    input: String,
    selected: Option<PendingFile>,
}

impl FileSlot {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> Option<&PendingFile> {
        self.selected.as_ref()
    }

    /// Replace the selection with a new file. The previous file is dropped,
    /// never accumulated.
    pub fn select(&mut self, file: PendingFile) {
        self.input = file.path.display().to_string();
        self.selected = Some(file);
    }

    /// Select from the currently typed path
    pub fn select_typed(&mut self) -> io::Result<()> {
        let path = PathBuf::from(self.input.trim());
        let file = PendingFile::from_path(&path)?;
        self.select(file);
        Ok(())
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.selected = None;
    }

    /// Preview when a file is selected, the typed path otherwise
    pub fn display_value(&self) -> String {
        match &self.selected {
            Some(file) => file.preview(),
            None => self.input.clone(),
        }
    }
}

/// Directory listing state for the browse popup
#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub selected: usize,
}

impl FileBrowser {
    /// Open a browser on the given directory
    pub fn open(dir: &Path) -> io::Result<Self> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        entries.sort();
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            selected: 0,
        })
    }

    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.entries.len() - 1);
        }
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.entries.get(self.selected).map(|p| p.as_path())
    }

    /// Descend into the selected directory, if it is one
    pub fn descend(&mut self) -> io::Result<bool> {
        let Some(path) = self.selected_path().map(Path::to_path_buf) else {
            return Ok(false);
        };
        if path.is_dir() {
            *self = Self::open(&path)?;
            return Ok(true);
        }
        Ok(false)
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
