use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Item is not available for loan: {0}")]
    ItemUnavailable(Uuid),

    #[error("User {user} is at their borrow limit of {limit}")]
    BorrowLimitExceeded { user: Uuid, limit: u32 },

    #[error("Item {item} is not on loan to user {user}")]
    NotBorrowedByUser { user: Uuid, item: Uuid },

    #[error("Item is currently on loan and cannot be removed: {0}")]
    ItemBorrowed(Uuid),

    #[error("User {user} still has {count} item(s) on loan")]
    UserHasLoans { user: Uuid, count: usize },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LibrisError>;
