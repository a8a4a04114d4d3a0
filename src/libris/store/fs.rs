use std::fs;
use std::path::{Path, PathBuf};

use super::{LoadReport, StateStore};
use crate::error::{LibrisError, Result};
use crate::library::Library;

/// File-backed store: the whole library in one JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(LibrisError::Io)?;
            }
        }
        Ok(())
    }
}

impl StateStore for FileStore {
    fn save_state(&mut self, library: &Library) -> Result<()> {
        self.ensure_parent()?;
        let content = super::encode(library)?;
        fs::write(&self.path, content).map_err(LibrisError::Io)?;
        Ok(())
    }

    fn load_state(&self) -> Result<(Library, LoadReport)> {
        if !self.path.exists() {
            return Ok((Library::new(), LoadReport::default()));
        }
        let content = fs::read_to_string(&self.path).map_err(LibrisError::Io)?;
        super::decode(&content)
    }
}
