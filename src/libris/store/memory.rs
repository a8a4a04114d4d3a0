use super::{LoadReport, StateStore};
use crate::error::Result;
use crate::library::Library;

/// In-memory store for testing and development. Holds the serialized form
/// so tests cover the same codec as [`super::fs::FileStore`], without
/// touching a filesystem.
#[derive(Default)]
pub struct InMemoryStore {
    buffer: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStore {
    fn save_state(&mut self, library: &Library) -> Result<()> {
        self.buffer = Some(super::encode(library)?);
        Ok(())
    }

    fn load_state(&self) -> Result<(Library, LoadReport)> {
        match &self.buffer {
            Some(text) => super::decode(text),
            None => Ok((Library::new(), LoadReport::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::fixtures::LibraryFixture;

    #[test]
    fn unsaved_store_loads_empty() {
        let store = InMemoryStore::new();
        let (library, report) = store.load_state().unwrap();
        assert_eq!(library.item_count(), 0);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn save_then_load_round_trips_counts() {
        let library = LibraryFixture::new()
            .with_book("Dune")
            .with_student("Ana")
            .with_loan("Dune", "Ana")
            .library;

        let mut store = InMemoryStore::new();
        store.save_state(&library).unwrap();
        let (loaded, report) = store.load_state().unwrap();

        assert_eq!(loaded.item_count(), 1);
        assert_eq!(loaded.user_count(), 1);
        assert_eq!(loaded.transactions().len(), 1);
        assert_eq!(report.skipped, 0);
    }
}
