use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(about = "Library circulation from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalog
    AddBook {
        title: String,
        author: String,
        isbn: String,
    },

    /// Add a magazine to the catalog
    AddMagazine { title: String, edition: String },

    /// Add a DVD to the catalog
    AddDvd {
        title: String,
        director: String,
        /// Running time in minutes
        duration: u32,
    },

    /// Register a student (borrow limit 3)
    AddStudent { name: String },

    /// Register a professor (borrow limit 10)
    AddProfessor { name: String },

    /// Register a visitor (borrow limit 1)
    AddVisitor { name: String },

    /// Remove an item by name or id (rejected while on loan)
    RemoveItem { item: String },

    /// Remove a user by name or id (rejected while loans are outstanding)
    RemoveUser { user: String },

    /// List catalog items
    #[command(alias = "ls")]
    Items {
        /// Only available items
        #[arg(long, conflicts_with = "borrowed")]
        available: bool,

        /// Only borrowed items
        #[arg(long)]
        borrowed: bool,
    },

    /// List registered users
    Users,

    /// Loan an item to a user (both by name or id)
    Loan { user: String, item: String },

    /// Return an item from a user (both by name or id)
    #[command(name = "return")]
    GiveBack { user: String, item: String },

    /// Set an item's status (available, borrowed, reserved)
    SetStatus { item: String, status: String },

    /// Print a full report of items, users and transaction history
    Report,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., data-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
