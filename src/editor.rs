//! Editor state consulted before a build or run
//!
//! The task runner only needs three things from the editor: whether the
//! document has unsaved changes, a way to save it, and the directory of the
//! file it belongs to.

use ropey::Rope;
use std::path::{Path, PathBuf};

/// Editor-side accessors used by the task runner
pub trait EditorState {
    /// Whether the buffer has changes not yet written to disk
    fn is_modified(&self) -> bool;

    /// Write the buffer to its current path
    fn persist(&mut self) -> Result<(), String>;

    /// Directory containing the current file, or `None` when no file is bound
    fn file_dir(&self) -> Option<PathBuf>;
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty, untitled document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create an untitled document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            is_modified: false,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self {
            buffer: Rope::from(content),
            file_path: Some(path),
            is_modified: false,
        })
    }

    /// Create a new empty document with a target file path
    ///
    /// Used when the path given on the command line does not exist yet.
    /// The file is created on the first save.
    pub fn new_with_path(path: PathBuf) -> Self {
        Self {
            buffer: Rope::from(""),
            file_path: Some(path),
            is_modified: true,
        }
    }

    /// Open `path`, or bind an empty document to it if it does not exist
    pub fn open_or_create(path: PathBuf) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!("{} does not exist, starting empty", path.display());
            Ok(Self::new_with_path(path))
        }
    }

    /// Replace the whole buffer, marking the document modified
    pub fn set_text(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.is_modified = true;
    }

    /// Write the buffer to `file_path` and clear the modified flag
    pub fn save(&mut self) -> Result<(), String> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| "Document has no file path".to_string())?;

        std::fs::write(path, self.buffer.to_string())
            .map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;

        self.is_modified = false;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }

    /// Directory the file lives in; a bare file name resolves to "."
    pub fn containing_dir(&self) -> Option<PathBuf> {
        self.file_path.as_deref().map(parent_or_current)
    }
}

fn parent_or_current(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl EditorState for Document {
    fn is_modified(&self) -> bool {
        self.is_modified
    }

    fn persist(&mut self) -> Result<(), String> {
        self.save()
    }

    fn file_dir(&self) -> Option<PathBuf> {
        self.containing_dir()
    }
}
