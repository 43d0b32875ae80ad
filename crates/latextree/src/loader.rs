//! The file loading capability used by `\input`, `\include` and `\bibliography`.
//!
//! File operations are extracted to a trait so that they can be mocked out in unit testing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File operations the parser may need to perform.
pub trait FileLoader {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Implementation of the file loader trait that uses the real file system.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileLoader for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory file system for use in unit tests.
///
/// Files are added before the parse runs.
/// Paths are relative to the working directory given at construction.
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    working_directory: PathBuf,
    files: HashMap<PathBuf, String>,
}

impl InMemoryFileSystem {
    pub fn new(working_directory: &Path) -> Self {
        Self {
            working_directory: working_directory.into(),
            files: Default::default(),
        }
    }

    /// Add a file to the in-memory file system.
    pub fn add_file(&mut self, relative_path: &str, content: &str) {
        let mut path = self.working_directory.clone();
        path.push(relative_path);
        self.files.insert(path, content.to_string());
    }
}

impl FileLoader for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        match self.files.get(path) {
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not found",
            )),
            Some(content) => Ok(content.clone()),
        }
    }
}

/// Returns the file name with the default extension appended if it has none.
pub fn with_default_extension(name: &str, extension: &str) -> String {
    match Path::new(name).extension() {
        Some(_) => name.to_string(),
        None => format!("{name}.{extension}"),
    }
}
