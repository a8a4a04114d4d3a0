use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibrisError, Result};
use crate::library::Library;
use crate::model::{Item, ItemStatus};

pub fn add(library: &mut Library, item: Item) -> Result<CmdResult> {
    if !item.validate() {
        return Err(LibrisError::Validation(format!(
            "item \"{}\" is missing required fields",
            item.name
        )));
    }
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Item added: {}", item.name)));
    result.affected_items.push(item.clone());
    library.insert_item(item)?;
    Ok(result)
}

/// Remove an item from the catalog. Rejected while the item is on loan;
/// `reserved` does not block removal.
pub fn remove(library: &mut Library, id: &Uuid) -> Result<CmdResult> {
    let item = library.item(id).ok_or(LibrisError::ItemNotFound(*id))?;
    if item.status == ItemStatus::Borrowed {
        return Err(LibrisError::ItemBorrowed(*id));
    }
    let item = library.take_item(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Item removed: {}", item.name)));
    result.affected_items.push(item);
    Ok(result)
}

/// Move an item to a new lifecycle status, e.g. to set a reservation aside.
/// Loan and return bookkeeping must go through the circulation commands.
pub fn set_status(library: &mut Library, id: &Uuid, status: ItemStatus) -> Result<CmdResult> {
    let item = library
        .item_mut(id)
        .ok_or(LibrisError::ItemNotFound(*id))?;
    item.status = status;
    let item = item.clone();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Item {} is now {}",
        item.name, item.status
    )));
    result.affected_items.push(item);
    Ok(result)
}

pub fn list(library: &Library, filter: ListFilter) -> Result<CmdResult> {
    let listed: Vec<Item> = match filter {
        ListFilter::All => library.items().cloned().collect(),
        ListFilter::Available => library.available().cloned().collect(),
        ListFilter::Borrowed => library.borrowed().cloned().collect(),
    };
    Ok(CmdResult::default().with_listed_items(listed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Available,
    Borrowed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::fixtures::LibraryFixture;

    #[test]
    fn add_rejects_invalid_items() {
        let mut library = Library::new();
        let blank = Item::book("".into(), "Author".into(), "1".into());
        assert!(matches!(
            add(&mut library, blank),
            Err(LibrisError::Validation(_))
        ));
        assert_eq!(library.item_count(), 0);
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut library = Library::new();
        let book = Item::book("Dune".into(), "Frank Herbert".into(), "978-0441".into());
        let id = book.id;
        add(&mut library, book).unwrap();
        assert_eq!(library.item(&id).unwrap().name, "Dune");
    }

    #[test]
    fn remove_is_blocked_while_borrowed() {
        let fixture = LibraryFixture::new()
            .with_book("Dune")
            .with_student("Ana")
            .with_loan("Dune", "Ana");
        let mut library = fixture.library;
        let id = library.find_item_by_name("Dune").unwrap().id;

        assert!(matches!(
            remove(&mut library, &id),
            Err(LibrisError::ItemBorrowed(_))
        ));
        // Still present after the rejected removal.
        assert_eq!(library.item_count(), 1);
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let mut library = Library::new();
        assert!(matches!(
            remove(&mut library, &Uuid::new_v4()),
            Err(LibrisError::ItemNotFound(_))
        ));
    }

    #[test]
    fn reserved_items_can_be_removed() {
        let fixture = LibraryFixture::new().with_book("Dune");
        let mut library = fixture.library;
        let id = library.find_item_by_name("Dune").unwrap().id;
        set_status(&mut library, &id, ItemStatus::Reserved).unwrap();

        remove(&mut library, &id).unwrap();
        assert_eq!(library.item_count(), 0);
    }

    #[test]
    fn list_filters_by_status() {
        let fixture = LibraryFixture::new()
            .with_book("Dune")
            .with_book("Hyperion")
            .with_student("Ana")
            .with_loan("Dune", "Ana");
        let library = fixture.library;

        let all = list(&library, ListFilter::All).unwrap();
        assert_eq!(all.listed_items.len(), 2);

        let available = list(&library, ListFilter::Available).unwrap();
        assert_eq!(available.listed_items.len(), 1);
        assert_eq!(available.listed_items[0].name, "Hyperion");

        let borrowed = list(&library, ListFilter::Borrowed).unwrap();
        assert_eq!(borrowed.listed_items.len(), 1);
        assert_eq!(borrowed.listed_items[0].name, "Dune");
    }
}
