//! # Libris Architecture
//!
//! Libris is a **UI-agnostic library circulation engine**. The CLI that ships
//! with it is one client; the same core could sit behind a desktop app or a
//! web service without changing a line of business logic.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the in-memory Library    │
//! │  - Normalizes inputs (names/ids → identifiers)              │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business rules: validation, availability, borrow limits, │
//! │    all-or-nothing loan/return processing                    │
//! │  - Operates on the Library, returns Rust types              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store & Storage (library.rs, store/)                       │
//! │  - Library: the in-memory aggregate owning all entities     │
//! │  - StateStore trait: FileStore (prod), InMemoryStore (test) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership model
//!
//! The [`library::Library`] exclusively owns every item, user and
//! transaction, keyed by identifier in independent collections. Entities
//! reference each other **by id only** — a user's borrowed list holds item
//! identifiers, never items — and the command layer resolves ids to live
//! objects at processing time. This keeps the object graph acyclic and makes
//! whole-store persistence a straight serialization of three collections.
//!
//! ## Concurrency
//!
//! None, deliberately. The engine is a single in-memory object graph driven
//! by exactly one control thread; every operation runs to completion before
//! returning. A concurrent host must serialize calls (one mutex around each
//! loan/return) to keep their read-modify-write across item + user + ledger
//! atomic.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic (catalog, directory, circulation, report)
//! - [`library`]: The in-memory store and its invariants
//! - [`store`]: Persistence abstraction and implementations
//! - [`model`]: Entity types (`Item`, `User`, `Transaction`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `args`/`main`: Argument parsing and printing for the binary (not part
//!   of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod store;
