//! Loan and return processing. Every rule is checked before the first field
//! is touched, so a rejected transaction leaves the item, the user and the
//! ledger exactly as they were.

use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibrisError, Result};
use crate::library::Library;
use crate::model::{ItemStatus, Transaction};

pub fn loan(library: &mut Library, user_id: &Uuid, item_id: &Uuid) -> Result<CmdResult> {
    let item = library
        .item(item_id)
        .ok_or(LibrisError::ItemNotFound(*item_id))?;
    let user = library
        .user(user_id)
        .ok_or(LibrisError::UserNotFound(*user_id))?;

    if !item.is_available() {
        return Err(LibrisError::ItemUnavailable(*item_id));
    }
    if !user.can_borrow(1) {
        return Err(LibrisError::BorrowLimitExceeded {
            user: *user_id,
            limit: user.limit,
        });
    }

    // All rules passed; from here on every mutation must land.
    let tx = Transaction::loan(*user_id, *item_id);
    let item = library
        .item_mut(item_id)
        .ok_or(LibrisError::ItemNotFound(*item_id))?;
    item.status = ItemStatus::Borrowed;
    let item = item.clone();
    let user = library
        .user_mut(user_id)
        .ok_or(LibrisError::UserNotFound(*user_id))?;
    user.borrowed.push(*item_id);
    let user = user.clone();
    library.record(tx.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Loaned \"{}\" to {}",
        item.name, user.name
    )));
    result.affected_items.push(item);
    result.affected_users.push(user);
    result.recorded.push(tx);
    Ok(result)
}

/// The borrowed-list is the authority here, not the item status: an item
/// whose status drifted still cannot be returned by someone who never
/// borrowed it.
pub fn give_back(library: &mut Library, user_id: &Uuid, item_id: &Uuid) -> Result<CmdResult> {
    library
        .item(item_id)
        .ok_or(LibrisError::ItemNotFound(*item_id))?;
    let user = library
        .user(user_id)
        .ok_or(LibrisError::UserNotFound(*user_id))?;

    if !user.borrowed.contains(item_id) {
        return Err(LibrisError::NotBorrowedByUser {
            user: *user_id,
            item: *item_id,
        });
    }

    let tx = Transaction::giving_back(*user_id, *item_id);
    let item = library
        .item_mut(item_id)
        .ok_or(LibrisError::ItemNotFound(*item_id))?;
    item.status = ItemStatus::Available;
    let item = item.clone();
    let user = library
        .user_mut(user_id)
        .ok_or(LibrisError::UserNotFound(*user_id))?;
    user.borrowed.retain(|i| i != item_id);
    let user = user.clone();
    library.record(tx.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} returned \"{}\"",
        user.name, item.name
    )));
    result.affected_items.push(item);
    result.affected_users.push(user);
    result.recorded.push(tx);
    Ok(result)
}
