//! # API Facade
//!
//! [`LibraryApi`] is the single entry point for UI clients. It owns the
//! in-memory [`Library`] and a [`StateStore`] backend, dispatches to the
//! command layer, and normalizes caller inputs (name-or-id strings to
//! identifiers). It holds no business logic and performs no terminal I/O.
//!
//! Generic over `StateStore`: production wires a `FileStore`, tests an
//! `InMemoryStore`.

use std::str::FromStr;

use uuid::Uuid;

use crate::commands::{self, catalog::ListFilter, CmdResult};
use crate::error::{LibrisError, Result};
use crate::library::Library;
use crate::model::{Item, ItemStatus, User};
use crate::store::{LoadReport, StateStore};

pub struct LibraryApi<S: StateStore> {
    library: Library,
    store: S,
}

impl<S: StateStore> LibraryApi<S> {
    /// Start with an empty store; call [`LibraryApi::load`] to hydrate it.
    pub fn new(store: S) -> Self {
        Self {
            library: Library::new(),
            store,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    // --- Catalog ---

    pub fn add_item(&mut self, item: Item) -> Result<CmdResult> {
        commands::catalog::add(&mut self.library, item)
    }

    pub fn remove_item(&mut self, id: &Uuid) -> Result<CmdResult> {
        commands::catalog::remove(&mut self.library, id)
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&Item> {
        self.library.item(id)
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.library.find_item_by_name(name)
    }

    pub fn set_item_status(&mut self, id: &Uuid, status: ItemStatus) -> Result<CmdResult> {
        commands::catalog::set_status(&mut self.library, id, status)
    }

    pub fn list_items(&self, filter: ListFilter) -> Result<CmdResult> {
        commands::catalog::list(&self.library, filter)
    }

    // --- Directory ---

    pub fn add_user(&mut self, user: User) -> Result<CmdResult> {
        commands::directory::add(&mut self.library, user)
    }

    pub fn remove_user(&mut self, id: &Uuid) -> Result<CmdResult> {
        commands::directory::remove(&mut self.library, id)
    }

    pub fn get_user(&self, id: &Uuid) -> Option<&User> {
        self.library.user(id)
    }

    pub fn find_user(&self, name: &str) -> Option<&User> {
        self.library.find_user_by_name(name)
    }

    // --- Circulation ---

    pub fn process_loan(&mut self, user_id: &Uuid, item_id: &Uuid) -> Result<CmdResult> {
        commands::circulation::loan(&mut self.library, user_id, item_id)
    }

    pub fn process_return(&mut self, user_id: &Uuid, item_id: &Uuid) -> Result<CmdResult> {
        commands::circulation::give_back(&mut self.library, user_id, item_id)
    }

    pub fn generate_report(&self) -> Result<CmdResult> {
        commands::report::run(&self.library)
    }

    // --- Persistence ---

    pub fn save(&mut self) -> Result<()> {
        self.store.save_state(&self.library)
    }

    /// Replace the in-memory store with the persisted one.
    pub fn load(&mut self) -> Result<LoadReport> {
        let (library, report) = self.store.load_state()?;
        self.library = library;
        Ok(report)
    }

    // --- Input normalization ---

    /// Resolve an item given either its id or its (case-insensitive) name.
    pub fn resolve_item(&self, selector: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::from_str(selector) {
            return Ok(id);
        }
        self.find_item(selector)
            .map(|item| item.id)
            .ok_or_else(|| LibrisError::Api(format!("No item named \"{}\"", selector)))
    }

    /// Resolve a user given either their id or their (case-insensitive) name.
    pub fn resolve_user(&self, selector: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::from_str(selector) {
            return Ok(id);
        }
        self.find_user(selector)
            .map(|user| user.id)
            .ok_or_else(|| LibrisError::Api(format!("No user named \"{}\"", selector)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn api() -> LibraryApi<InMemoryStore> {
        LibraryApi::new(InMemoryStore::new())
    }

    #[test]
    fn facade_dispatches_a_full_session() {
        let mut api = api();
        api.add_item(Item::book("Dune".into(), "Frank Herbert".into(), "1".into()))
            .unwrap();
        api.add_user(User::student("Ana".into())).unwrap();

        let item_id = api.resolve_item("dune").unwrap();
        let user_id = api.resolve_user("Ana").unwrap();
        api.process_loan(&user_id, &item_id).unwrap();

        let listed = api.list_items(ListFilter::Borrowed).unwrap();
        assert_eq!(listed.listed_items.len(), 1);

        api.process_return(&user_id, &item_id).unwrap();
        assert!(api.get_item(&item_id).unwrap().is_available());
    }

    #[test]
    fn resolve_accepts_raw_ids() {
        let mut api = api();
        api.add_user(User::visitor("Carlos".into())).unwrap();
        let id = api.find_user("Carlos").unwrap().id;
        assert_eq!(api.resolve_user(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn resolve_unknown_name_is_an_api_error() {
        let api = api();
        assert!(matches!(
            api.resolve_item("nope"),
            Err(LibrisError::Api(_))
        ));
    }

    #[test]
    fn save_load_cycle_replaces_state() {
        let mut api = api();
        api.add_item(Item::magazine("Nature".into(), "612".into()))
            .unwrap();
        api.save().unwrap();

        api.add_item(Item::magazine("Science".into(), "300".into()))
            .unwrap();
        let report = api.load().unwrap();

        assert_eq!(report.items, 1);
        assert!(api.find_item("Nature").is_some());
        assert!(api.find_item("Science").is_none());
    }
}
