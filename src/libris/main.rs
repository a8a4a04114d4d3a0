use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use libris::api::LibraryApi;
use libris::commands::catalog::ListFilter;
use libris::commands::{CmdMessage, MessageLevel};
use libris::config::LibrisConfig;
use libris::error::Result;
use libris::model::{Item, ItemStatus, User};
use libris::store::fs::FileStore;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: LibraryApi<FileStore>,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::AddBook {
            title,
            author,
            isbn,
        }) => handle_add_item(&mut ctx, Item::book(title, author, isbn)),
        Some(Commands::AddMagazine { title, edition }) => {
            handle_add_item(&mut ctx, Item::magazine(title, edition))
        }
        Some(Commands::AddDvd {
            title,
            director,
            duration,
        }) => handle_add_item(&mut ctx, Item::dvd(title, director, duration)),
        Some(Commands::AddStudent { name }) => handle_add_user(&mut ctx, User::student(name)),
        Some(Commands::AddProfessor { name }) => handle_add_user(&mut ctx, User::professor(name)),
        Some(Commands::AddVisitor { name }) => handle_add_user(&mut ctx, User::visitor(name)),
        Some(Commands::RemoveItem { item }) => handle_remove_item(&mut ctx, &item),
        Some(Commands::RemoveUser { user }) => handle_remove_user(&mut ctx, &user),
        Some(Commands::Items {
            available,
            borrowed,
        }) => handle_items(&ctx, available, borrowed),
        Some(Commands::Users) => handle_users(&ctx),
        Some(Commands::Loan { user, item }) => handle_loan(&mut ctx, &user, &item),
        Some(Commands::GiveBack { user, item }) => handle_return(&mut ctx, &user, &item),
        Some(Commands::SetStatus { item, status }) => handle_set_status(&mut ctx, &item, &status),
        Some(Commands::Report) => handle_report(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_items(&ctx, false, false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => {
            let proj_dirs =
                ProjectDirs::from("com", "libris", "libris").expect("Could not determine data dir");
            proj_dirs.data_dir().to_path_buf()
        }
    };

    let config = LibrisConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.join(config.get_data_file()));
    let mut api = LibraryApi::new(store);

    let report = api.load()?;
    if report.skipped > 0 {
        eprintln!(
            "{}",
            format!("Warning: skipped {} corrupt record(s)", report.skipped).yellow()
        );
    }

    Ok(AppContext { api, data_dir })
}

fn handle_add_item(ctx: &mut AppContext, item: Item) -> Result<()> {
    let result = ctx.api.add_item(item)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add_user(ctx: &mut AppContext, user: User) -> Result<()> {
    let result = ctx.api.add_user(user)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove_item(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let id = ctx.api.resolve_item(selector)?;
    let result = ctx.api.remove_item(&id)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove_user(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let id = ctx.api.resolve_user(selector)?;
    let result = ctx.api.remove_user(&id)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_items(ctx: &AppContext, available: bool, borrowed: bool) -> Result<()> {
    let filter = if available {
        ListFilter::Available
    } else if borrowed {
        ListFilter::Borrowed
    } else {
        ListFilter::All
    };
    let result = ctx.api.list_items(filter)?;
    print_items(&result.listed_items);
    Ok(())
}

fn handle_users(ctx: &AppContext) -> Result<()> {
    let users: Vec<_> = ctx.api.library().users().collect();
    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }
    for user in users {
        let time_ago = format_time_ago(user.created_at);
        let info = user.display_info();
        let padding = LINE_WIDTH
            .saturating_sub(info.width())
            .saturating_sub(TIME_WIDTH);
        println!("    {}{}{}", info, " ".repeat(padding), time_ago.dimmed());
    }
    Ok(())
}

fn handle_loan(ctx: &mut AppContext, user: &str, item: &str) -> Result<()> {
    let user_id = ctx.api.resolve_user(user)?;
    let item_id = ctx.api.resolve_item(item)?;
    let result = ctx.api.process_loan(&user_id, &item_id)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_return(ctx: &mut AppContext, user: &str, item: &str) -> Result<()> {
    let user_id = ctx.api.resolve_user(user)?;
    let item_id = ctx.api.resolve_item(item)?;
    let result = ctx.api.process_return(&user_id, &item_id)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_set_status(ctx: &mut AppContext, item: &str, status: &str) -> Result<()> {
    let id = ctx.api.resolve_item(item)?;
    let status = ItemStatus::from_str(status)?;
    let result = ctx.api.set_item_status(&id, status)?;
    ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_report(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.generate_report()?;
    if let Some(report) = &result.report {
        print!("{}", report);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = LibrisConfig::load(&ctx.data_dir).unwrap_or_default();
    match (key.as_deref(), value) {
        (None, _) | (Some("data-file"), None) => {
            println!("data-file = {}", config.get_data_file());
        }
        (Some("data-file"), Some(v)) => {
            config.set_data_file(&v);
            config.save(&ctx.data_dir)?;
            println!("data-file = {}", config.get_data_file());
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    for item in items {
        let status_str = format!("[{}]", item.status);
        let status_colored = match item.status {
            ItemStatus::Available => status_str.green(),
            ItemStatus::Borrowed => status_str.red(),
            ItemStatus::Reserved => status_str.yellow(),
        };
        let status_width = status_str.width() + 1;

        let time_ago = format_time_ago(item.created_at);

        let info = item.display_info();
        let available = LINE_WIDTH
            .saturating_sub(4 + status_width)
            .saturating_sub(TIME_WIDTH);
        let info_display = truncate_to_width(&info, available);
        let padding = available.saturating_sub(info_display.width());

        println!(
            "    {} {}{}{}",
            status_colored,
            info_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
