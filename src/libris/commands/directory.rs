use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibrisError, Result};
use crate::library::Library;
use crate::model::User;

pub fn add(library: &mut Library, user: User) -> Result<CmdResult> {
    if !user.validate() {
        return Err(LibrisError::Validation(
            "user name must not be empty".to_string(),
        ));
    }
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("User added: {}", user.name)));
    result.affected_users.push(user.clone());
    library.insert_user(user)?;
    Ok(result)
}

/// Remove a user. Rejected while any of their loans are outstanding, so the
/// ledger can always be resolved against a known user.
pub fn remove(library: &mut Library, id: &Uuid) -> Result<CmdResult> {
    let user = library.user(id).ok_or(LibrisError::UserNotFound(*id))?;
    if !user.borrowed.is_empty() {
        return Err(LibrisError::UserHasLoans {
            user: *id,
            count: user.borrowed.len(),
        });
    }
    let user = library.take_user(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("User removed: {}", user.name)));
    result.affected_users.push(user);
    Ok(result)
}
