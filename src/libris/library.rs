//! The in-memory store. [`Library`] exclusively owns every [`Item`], [`User`]
//! and [`Transaction`]; entities reference each other by id only, and the
//! commands layer resolves ids to live objects at processing time.
//!
//! `Library` itself enforces only storage invariants (id uniqueness, stable
//! insertion order, the append-only ledger). Business rules — availability,
//! borrow limits, removal blockers — live in `commands/`.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{LibrisError, Result};
use crate::model::{Item, ItemStatus, Transaction, User};

#[derive(Debug, Default)]
pub struct Library {
    items: HashMap<Uuid, Item>,
    item_order: Vec<Uuid>,
    users: HashMap<Uuid, User>,
    user_order: Vec<Uuid>,
    transactions: Vec<Transaction>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Items ---

    /// Insert an item, rejecting duplicate identifiers. Does not run
    /// field validation; that is the catalog command's job.
    pub fn insert_item(&mut self, item: Item) -> Result<()> {
        if self.items.contains_key(&item.id) {
            return Err(LibrisError::Validation(format!(
                "duplicate item identifier: {}",
                item.id
            )));
        }
        self.item_order.push(item.id);
        self.items.insert(item.id, item);
        Ok(())
    }

    pub fn take_item(&mut self, id: &Uuid) -> Result<Item> {
        let item = self
            .items
            .remove(id)
            .ok_or(LibrisError::ItemNotFound(*id))?;
        self.item_order.retain(|i| i != id);
        Ok(item)
    }

    pub fn item(&self, id: &Uuid) -> Option<&Item> {
        self.items.get(id)
    }

    pub(crate) fn item_mut(&mut self, id: &Uuid) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// All items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// Case-insensitive exact name match; ties resolve to the earliest
    /// inserted item.
    pub fn find_item_by_name(&self, name: &str) -> Option<&Item> {
        self.items()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Live view over currently available items.
    pub fn available(&self) -> impl Iterator<Item = &Item> {
        self.items().filter(|item| item.is_available())
    }

    /// Live view over currently borrowed items.
    pub fn borrowed(&self) -> impl Iterator<Item = &Item> {
        self.items()
            .filter(|item| item.status == ItemStatus::Borrowed)
    }

    // --- Users ---

    pub fn insert_user(&mut self, user: User) -> Result<()> {
        if self.users.contains_key(&user.id) {
            return Err(LibrisError::Validation(format!(
                "duplicate user identifier: {}",
                user.id
            )));
        }
        self.user_order.push(user.id);
        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn take_user(&mut self, id: &Uuid) -> Result<User> {
        let user = self
            .users
            .remove(id)
            .ok_or(LibrisError::UserNotFound(*id))?;
        self.user_order.retain(|u| u != id);
        Ok(user)
    }

    pub fn user(&self, id: &Uuid) -> Option<&User> {
        self.users.get(id)
    }

    pub(crate) fn user_mut(&mut self, id: &Uuid) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.user_order.iter().filter_map(|id| self.users.get(id))
    }

    pub fn find_user_by_name(&self, name: &str) -> Option<&User> {
        self.users()
            .find(|user| user.name.eq_ignore_ascii_case(name))
    }

    // --- Ledger ---

    /// Append to the transaction history. There is no removal.
    pub fn record(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct LibraryFixture {
        pub library: Library,
    }

    impl Default for LibraryFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LibraryFixture {
        pub fn new() -> Self {
            Self {
                library: Library::new(),
            }
        }

        pub fn with_book(mut self, name: &str) -> Self {
            let book = Item::book(name.to_string(), "Some Author".to_string(), "000-1".to_string());
            self.library.insert_item(book).unwrap();
            self
        }

        pub fn with_dvd(mut self, name: &str, duration: u32) -> Self {
            let dvd = Item::dvd(name.to_string(), "Some Director".to_string(), duration);
            self.library.insert_item(dvd).unwrap();
            self
        }

        pub fn with_student(mut self, name: &str) -> Self {
            self.library.insert_user(User::student(name.to_string())).unwrap();
            self
        }

        pub fn with_visitor(mut self, name: &str) -> Self {
            self.library.insert_user(User::visitor(name.to_string())).unwrap();
            self
        }

        pub fn with_professor(mut self, name: &str) -> Self {
            self.library
                .insert_user(User::professor(name.to_string()))
                .unwrap();
            self
        }

        /// Wire an already-established loan: item marked borrowed, listed in
        /// the user's borrowed items, and a Loan entry in the ledger.
        pub fn with_loan(mut self, item_name: &str, user_name: &str) -> Self {
            let item_id = self.library.find_item_by_name(item_name).unwrap().id;
            let user_id = self.library.find_user_by_name(user_name).unwrap().id;
            self.library.item_mut(&item_id).unwrap().status = ItemStatus::Borrowed;
            self.library.user_mut(&user_id).unwrap().borrowed.push(item_id);
            self.library.record(Transaction::loan(user_id, item_id));
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::LibraryFixture;
    use super::*;

    #[test]
    fn rejects_duplicate_item_id() {
        let mut library = Library::new();
        let book = Item::book("Dune".into(), "Frank Herbert".into(), "978-0441".into());
        let dup = book.clone();
        library.insert_item(book).unwrap();
        assert!(matches!(
            library.insert_item(dup),
            Err(LibrisError::Validation(_))
        ));
    }

    #[test]
    fn find_by_name_is_case_insensitive_and_insertion_ordered() {
        let fixture = LibraryFixture::new().with_book("Dune").with_book("dune");
        let found = fixture.library.find_item_by_name("DUNE").unwrap();
        // Two case-variants of the same name: the earlier insert wins.
        assert_eq!(found.name, "Dune");
    }

    #[test]
    fn views_reflect_live_state() {
        let fixture = LibraryFixture::new()
            .with_book("Dune")
            .with_student("Ana")
            .with_loan("Dune", "Ana");
        let library = fixture.library;
        assert_eq!(library.available().count(), 0);
        assert_eq!(library.borrowed().count(), 1);
        assert_eq!(library.transactions().len(), 1);
    }

    #[test]
    fn take_item_errors_on_unknown_id() {
        let mut library = Library::new();
        assert!(matches!(
            library.take_item(&Uuid::new_v4()),
            Err(LibrisError::ItemNotFound(_))
        ));
    }

    #[test]
    fn items_iterate_in_insertion_order() {
        let fixture = LibraryFixture::new()
            .with_book("B")
            .with_book("A")
            .with_book("C");
        let names: Vec<_> = fixture.library.items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }
}
