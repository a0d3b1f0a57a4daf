use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::tracker::Tracker;
use crate::ui::forms::parse_amount;
use crate::ui::pager::{total_pages, Pager};
use crate::ui::util::{format_money, truncate};

pub(crate) fn as_cli(args: &[String], tracker: &mut Tracker) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], tracker),
        "topup" | "t" => cli_topup(&args[2..], tracker),
        "balance" | "b" => cli_balance(&args[2..], tracker),
        "list" | "ls" => cli_list(&args[2..], tracker),
        "delete" | "rm" => cli_delete(&args[2..], tracker),
        "export" | "x" => cli_export(&args[2..], tracker),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI - local-only personal cash expense tracker");
    println!();
    println!("Usage: expensetui [--data-dir <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <description> <amount>    Record an expense");
    println!("  topup <amount>                Record a cash top up");
    println!("  balance [amount]              Show the balance, or set the initial balance");
    println!("  list [page]                   List records, newest first, 10 per page");
    println!("  delete <id> [--yes]           Delete a record by id or id prefix");
    println!("  export [dir]                  Write expense_log.csv (default: Downloads)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --data-dir <path>             Store data and logs in <path>");
}

fn amount_arg(arg: Option<&String>, usage: &str) -> Result<rust_decimal::Decimal> {
    let Some(raw) = arg else {
        anyhow::bail!("Usage: {usage}");
    };
    parse_amount(raw).ok_or_else(|| anyhow::anyhow!("Invalid amount: {raw}"))
}

fn cli_add(args: &[String], tracker: &mut Tracker) -> Result<()> {
    const USAGE: &str = "expensetui add <description> <amount>";
    let Some((amount, description)) = args.split_last() else {
        anyhow::bail!("Usage: {USAGE}");
    };
    let amount = amount_arg(Some(amount), USAGE)?;
    let description = description.join(" ");

    match tracker.add_expense(&description, amount)? {
        Some(record) => {
            println!(
                "Added: {} {} (balance {})",
                record.description,
                record.display_amount(),
                format_money(tracker.ledger().balance())
            );
            Ok(())
        }
        None => anyhow::bail!("Description is required. Usage: {USAGE}"),
    }
}

fn cli_topup(args: &[String], tracker: &mut Tracker) -> Result<()> {
    let amount = amount_arg(args.first(), "expensetui topup <amount>")?;
    let record = tracker.top_up(amount)?;
    println!(
        "Topped up {} (balance {})",
        record.display_amount(),
        format_money(tracker.ledger().balance())
    );
    Ok(())
}

fn cli_balance(args: &[String], tracker: &mut Tracker) -> Result<()> {
    if !args.is_empty() {
        let amount = amount_arg(args.first(), "expensetui balance [amount]")?;
        tracker.set_initial_balance(amount)?;
    }
    println!("Current Balance: {}", format_money(tracker.ledger().balance()));
    Ok(())
}

fn cli_list(args: &[String], tracker: &Tracker) -> Result<()> {
    let ledger = tracker.ledger();
    if ledger.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    let requested = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("Invalid page number: {raw}"))?,
        None => 1,
    };
    let mut pager = Pager::default();
    pager.go_to(requested, ledger.len());

    println!(
        "{:<10} {:<11} {:<32} {:>12}",
        "ID", "Date", "Description", "Amount"
    );
    println!("{}", "─".repeat(68));
    for record in pager.slice(ledger.records()) {
        println!(
            "{:<10} {:<11} {:<32} {:>12}",
            record.short_id(),
            record.calendar_date(&chrono::Local),
            truncate(&record.description, 32),
            record.display_amount(),
        );
    }
    println!("{}", "─".repeat(68));
    println!(
        "Page {} of {}   In {}   Out {}   Net {}",
        pager.page(),
        total_pages(ledger.len()),
        format_money(ledger.credits_total()),
        format_money(ledger.debits_total()),
        format_money(ledger.net_change()),
    );
    println!("Current Balance: {}", format_money(ledger.balance()));
    Ok(())
}

fn cli_delete(args: &[String], tracker: &mut Tracker) -> Result<()> {
    let assume_yes = args.iter().any(|a| a == "--yes" || a == "-y");
    let Some(query) = args.iter().find(|a| !a.starts_with('-')) else {
        anyhow::bail!("Usage: expensetui delete <id> [--yes]");
    };

    let (id, description, amount) = match tracker.ledger().matching(query).as_slice() {
        [] => anyhow::bail!("No record matches id: {query}"),
        [record] => (
            record.id.clone(),
            record.description.clone(),
            record.display_amount(),
        ),
        many => anyhow::bail!(
            "Id prefix {query} is ambiguous ({} records match)",
            many.len()
        ),
    };

    if !assume_yes && !prompt_yes(&format!("Delete '{description}' ({amount})?"))? {
        println!("Cancelled");
        return Ok(());
    }

    if tracker.remove_record(&id)?.is_some() {
        println!(
            "Deleted: {description} (balance {})",
            format_money(tracker.ledger().balance())
        );
    }
    Ok(())
}

fn prompt_yes(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// Only `y` or `Y` confirms, matching the TUI prompt.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

fn cli_export(args: &[String], tracker: &Tracker) -> Result<()> {
    let dir = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(crate::export::default_export_dir);

    let ledger = tracker.ledger();
    let path = crate::export::export_to_dir(ledger.records(), &dir)?;
    println!("Exported {} records to {}", ledger.len(), path.display());
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
