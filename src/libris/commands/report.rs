use crate::commands::CmdResult;
use crate::error::Result;
use crate::library::Library;

/// Text summary of every entity in the store, one `display_info` line each.
pub fn run(library: &Library) -> Result<CmdResult> {
    let mut out = String::new();

    out.push_str(&format!("Items ({})\n", library.item_count()));
    for item in library.items() {
        out.push_str(&format!("  {}\n", item.display_info()));
    }

    out.push_str(&format!("Users ({})\n", library.user_count()));
    for user in library.users() {
        out.push_str(&format!("  {}\n", user.display_info()));
    }

    out.push_str(&format!("Transactions ({})\n", library.transactions().len()));
    for tx in library.transactions() {
        out.push_str(&format!("  {}\n", tx.display_info()));
    }

    Ok(CmdResult::default().with_report(out))
}
