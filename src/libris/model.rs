use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LibrisError;

/// Lifecycle of a catalog item. `Reserved` is only ever set through an
/// explicit status update; loans require `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Borrowed,
    Reserved,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemStatus::Available => "available",
            ItemStatus::Borrowed => "borrowed",
            ItemStatus::Reserved => "reserved",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ItemStatus {
    type Err = LibrisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(ItemStatus::Available),
            "borrowed" => Ok(ItemStatus::Borrowed),
            "reserved" => Ok(ItemStatus::Reserved),
            other => Err(LibrisError::InvalidStatus(other.to_string())),
        }
    }
}

/// Variant payload for catalog items. The `type` tag is what persistence
/// dispatches on when rebuilding the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemKind {
    Book {
        author: String,
        isbn: String,
    },
    Magazine {
        edition: String,
    },
    #[serde(rename = "DVD")]
    Dvd {
        director: String,
        /// Running time in minutes.
        duration: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: ItemStatus,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    fn new(name: String, kind: ItemKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            status: ItemStatus::Available,
            kind,
        }
    }

    pub fn book(name: String, author: String, isbn: String) -> Self {
        Self::new(name, ItemKind::Book { author, isbn })
    }

    pub fn magazine(name: String, edition: String) -> Self {
        Self::new(name, ItemKind::Magazine { edition })
    }

    pub fn dvd(name: String, director: String, duration: u32) -> Self {
        Self::new(name, ItemKind::Dvd { director, duration })
    }

    /// Required fields present and non-empty.
    pub fn validate(&self) -> bool {
        if self.name.is_empty() {
            return false;
        }
        match &self.kind {
            ItemKind::Book { author, isbn } => !author.is_empty() && !isbn.is_empty(),
            ItemKind::Magazine { edition } => !edition.is_empty(),
            ItemKind::Dvd { director, duration } => !director.is_empty() && *duration > 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    pub fn display_info(&self) -> String {
        match &self.kind {
            ItemKind::Book { author, .. } => {
                format!(
                    "Book: {} | Author: {} | Status: {}",
                    self.name, author, self.status
                )
            }
            ItemKind::Magazine { edition } => {
                format!(
                    "Magazine: {} | Edition: {} | Status: {}",
                    self.name, edition, self.status
                )
            }
            ItemKind::Dvd { director, duration } => {
                let (h, m) = (duration / 60, duration % 60);
                format!(
                    "DVD: {} | Director: {} | Duration: {}h{:02}min | Status: {}",
                    self.name, director, h, m, self.status
                )
            }
        }
    }
}

/// Variant payload for users. The borrow limit lives on the `User` header as
/// data rather than here as behavior, so adding a user kind is a constructor
/// and a tag, not a class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserKind {
    Student,
    Professor,
    Visitor,
}

pub const STUDENT_LIMIT: u32 = 3;
pub const PROFESSOR_LIMIT: u32 = 10;
pub const VISITOR_LIMIT: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub limit: u32,
    /// Identifiers of items currently on loan, in loan order.
    pub borrowed: Vec<Uuid>,
    #[serde(flatten)]
    pub kind: UserKind,
}

impl User {
    fn new(name: String, limit: u32, kind: UserKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            limit,
            borrowed: Vec::new(),
            kind,
        }
    }

    pub fn student(name: String) -> Self {
        Self::new(name, STUDENT_LIMIT, UserKind::Student)
    }

    pub fn professor(name: String) -> Self {
        Self::new(name, PROFESSOR_LIMIT, UserKind::Professor)
    }

    pub fn visitor(name: String) -> Self {
        Self::new(name, VISITOR_LIMIT, UserKind::Visitor)
    }

    pub fn validate(&self) -> bool {
        !self.name.is_empty()
    }

    /// Can this user take `count` more items without passing their limit?
    pub fn can_borrow(&self, count: usize) -> bool {
        self.borrowed.len() + count <= self.limit as usize
    }

    pub fn display_info(&self) -> String {
        let kind = match self.kind {
            UserKind::Student => "Student",
            UserKind::Professor => "Professor",
            UserKind::Visitor => "Visitor",
        };
        format!(
            "{}: {} | Items: {}/{}",
            kind,
            self.name,
            self.borrowed.len(),
            self.limit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Loan,
    Return,
}

/// An immutable record of one successful loan or return. Created only by the
/// circulation commands and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn loan(user_id: Uuid, item_id: Uuid) -> Self {
        Self::record(TxKind::Loan, user_id, item_id)
    }

    pub fn giving_back(user_id: Uuid, item_id: Uuid) -> Self {
        Self::record(TxKind::Return, user_id, item_id)
    }

    fn record(kind: TxKind, user_id: Uuid, item_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user_id,
            item_id,
            date: Utc::now(),
        }
    }

    pub fn display_info(&self) -> String {
        match self.kind {
            TxKind::Loan => format!("Loan: user #{} -> item #{}", self.user_id, self.item_id),
            TxKind::Return => format!("Return: user #{} <- item #{}", self.user_id, self.item_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_start_available() {
        let book = Item::book("Dune".into(), "Frank Herbert".into(), "978-0441".into());
        assert_eq!(book.status, ItemStatus::Available);
        assert!(book.validate());
    }

    #[test]
    fn book_without_author_fails_validation() {
        let book = Item::book("Dune".into(), "".into(), "978-0441".into());
        assert!(!book.validate());
    }

    #[test]
    fn dvd_with_zero_duration_fails_validation() {
        let dvd = Item::dvd("Alien".into(), "Ridley Scott".into(), 0);
        assert!(!dvd.validate());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(ItemStatus::from_str("Available").unwrap(), ItemStatus::Available);
        assert_eq!(ItemStatus::from_str("borrowed").unwrap(), ItemStatus::Borrowed);
        assert!(matches!(
            ItemStatus::from_str("lost"),
            Err(LibrisError::InvalidStatus(_))
        ));
    }

    #[test]
    fn item_serializes_with_type_tag_and_flat_fields() {
        let book = Item::book("Dune".into(), "Frank Herbert".into(), "978-0441".into());
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["type"], "Book");
        assert_eq!(value["author"], "Frank Herbert");
        assert_eq!(value["status"], "available");

        let dvd = Item::dvd("Alien".into(), "Ridley Scott".into(), 117);
        let value = serde_json::to_value(&dvd).unwrap();
        assert_eq!(value["type"], "DVD");
        assert_eq!(value["duration"], 117);
    }

    #[test]
    fn user_limits_follow_variant() {
        assert_eq!(User::student("Ana".into()).limit, 3);
        assert_eq!(User::professor("Maria".into()).limit, 10);
        assert_eq!(User::visitor("Carlos".into()).limit, 1);
    }

    #[test]
    fn can_borrow_respects_limit() {
        let mut visitor = User::visitor("Carlos".into());
        assert!(visitor.can_borrow(1));
        visitor.borrowed.push(Uuid::new_v4());
        assert!(!visitor.can_borrow(1));
    }

    #[test]
    fn transaction_serializes_spec_keys() {
        let tx = Transaction::loan(Uuid::new_v4(), Uuid::new_v4());
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "Loan");
        assert!(value.get("user_id").is_some());
        assert!(value.get("item_id").is_some());
        assert!(value.get("date").is_some());
    }

    #[test]
    fn dvd_duration_renders_hours_and_minutes() {
        let dvd = Item::dvd("Interstellar".into(), "Christopher Nolan".into(), 169);
        assert!(dvd.display_info().contains("2h49min"));
    }
}
