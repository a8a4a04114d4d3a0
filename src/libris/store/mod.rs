//! # Storage Layer
//!
//! Persistence for the whole store behind the [`StateStore`] trait, so the
//! core can be exercised without a filesystem:
//!
//! - [`fs::FileStore`]: production backend, one JSON file, full-file rewrite
//!   on every save (last successful save wins)
//! - [`memory::InMemoryStore`]: buffer-backed store for tests
//!
//! ## Persisted format
//!
//! One UTF-8 JSON object per store:
//!
//! ```text
//! { "items":        [ {"type": "Book"|"Magazine"|"DVD", ...}, ... ],
//!   "users":        [ {"type": "Student"|"Professor"|"Visitor", ...}, ... ],
//!   "transactions": [ {"type": "Loan"|"Return", ...}, ... ] }
//! ```
//!
//! Loading dispatches each record on its `type` tag. A record with a missing
//! required field or an unrecognized tag is corrupt data: it is skipped and
//! counted in the [`LoadReport`], and the rest of the load continues. Only a
//! top-level parse failure or I/O failure aborts the load.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::library::Library;
use crate::model::{Item, Transaction, User};

pub mod fs;
pub mod memory;

/// What a load actually restored, including how many records were dropped
/// as corrupt. Callers surface `skipped` as a warning.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub items: usize,
    pub users: usize,
    pub transactions: usize,
    pub skipped: usize,
}

/// Abstract interface for whole-store persistence.
pub trait StateStore {
    /// Serialize and persist the entire store. All-or-nothing rewrite.
    fn save_state(&mut self, library: &Library) -> Result<()>;

    /// Rebuild a store from persisted state. A missing backing file yields
    /// an empty store, not an error.
    fn load_state(&self) -> Result<(Library, LoadReport)>;
}

#[derive(Serialize)]
struct StateFile<'a> {
    items: Vec<&'a Item>,
    users: Vec<&'a User>,
    transactions: &'a [Transaction],
}

#[derive(Deserialize)]
struct RawState {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    #[serde(default)]
    users: Vec<serde_json::Value>,
    #[serde(default)]
    transactions: Vec<serde_json::Value>,
}

pub(crate) fn encode(library: &Library) -> Result<String> {
    let state = StateFile {
        items: library.items().collect(),
        users: library.users().collect(),
        transactions: library.transactions(),
    };
    Ok(serde_json::to_string_pretty(&state)?)
}

pub(crate) fn decode(text: &str) -> Result<(Library, LoadReport)> {
    let raw: RawState = serde_json::from_str(text)?;
    let mut library = Library::new();
    let mut report = LoadReport::default();

    for value in raw.items {
        match serde_json::from_value::<Item>(value) {
            Ok(item) => match library.insert_item(item) {
                Ok(()) => report.items += 1,
                Err(_) => report.skipped += 1,
            },
            Err(_) => report.skipped += 1,
        }
    }
    for value in raw.users {
        match serde_json::from_value::<User>(value) {
            Ok(user) => match library.insert_user(user) {
                Ok(()) => report.users += 1,
                Err(_) => report.skipped += 1,
            },
            Err(_) => report.skipped += 1,
        }
    }
    for value in raw.transactions {
        match serde_json::from_value::<Transaction>(value) {
            Ok(tx) => {
                library.record(tx);
                report.transactions += 1;
            }
            Err(_) => report.skipped += 1,
        }
    }

    Ok((library, report))
}
