use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::App;
use super::forms::{parse_amount, FormKind, Submission};
use super::util::split_trailing_amount;
use crate::tracker::Tracker;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Tracker) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add Coffee 3.50)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a Coffee 3.50)", cmd_add, r);
    register_command!("topup", "Top up cash (e.g. :topup 20)", cmd_topup, r);
    register_command!("t", "Top up cash (e.g. :t 20)", cmd_topup, r);
    register_command!(
        "balance",
        "Set initial balance (e.g. :balance 100)",
        cmd_balance,
        r
    );
    register_command!(
        "b",
        "Set initial balance (e.g. :b 100)",
        cmd_balance,
        r
    );
    register_command!(
        "delete",
        "Delete selected record",
        cmd_delete,
        r
    );
    register_command!(
        "export",
        "Export log to CSV (e.g. :export ~/Documents)",
        cmd_export,
        r
    );
    register_command!("x", "Export log to CSV", cmd_export, r);
    register_command!("page", "Go to page (e.g. :page 2)", cmd_page, r);
    register_command!("p", "Go to page (e.g. :p 2)", cmd_page, r);
    register_command!("next", "Next page", cmd_next, r);
    register_command!("prev", "Previous page", cmd_prev, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, tracker)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _tracker: &mut Tracker) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _tracker: &mut Tracker) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form(FormKind::Expense);
        return Ok(());
    }
    let parsed = split_trailing_amount(args)
        .and_then(|(description, amount)| Some((description, parse_amount(amount)?)));
    match parsed {
        Some((description, amount)) => app.apply(
            Submission::Expense {
                description: description.to_string(),
                amount,
            },
            tracker,
        ),
        None => {
            app.set_status("Usage: :add <description> <amount>");
            Ok(())
        }
    }
}

fn cmd_topup(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form(FormKind::TopUp);
        return Ok(());
    }
    match parse_amount(args) {
        Some(amount) => app.apply(Submission::TopUp(amount), tracker),
        None => {
            app.set_status("Usage: :topup <amount>");
            Ok(())
        }
    }
}

fn cmd_balance(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form(FormKind::InitialBalance);
        return Ok(());
    }
    match parse_amount(args) {
        Some(amount) => app.apply(Submission::InitialBalance(amount), tracker),
        None => {
            app.set_status("Usage: :balance <amount>");
            Ok(())
        }
    }
}

fn cmd_delete(_args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    app.request_delete(tracker.ledger());
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    let dir = if args.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(crate::run::shellexpand(args)))
    };
    app.export(tracker.ledger(), dir)
}

fn cmd_page(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    match args.parse::<usize>() {
        Ok(page) => {
            app.go_to_page(page, tracker.ledger());
            app.set_status(format!("Page {}", app.pager.page()));
        }
        Err(_) => app.set_status("Usage: :page <number>"),
    }
    Ok(())
}

fn cmd_next(_args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    app.next_page(tracker.ledger());
    Ok(())
}

fn cmd_prev(_args: &str, app: &mut App, _tracker: &mut Tracker) -> anyhow::Result<()> {
    app.prev_page();
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::Store;
    use crate::ui::app::InputMode;
    use rust_decimal_macros::dec;

    fn setup() -> (App, Tracker) {
        let tracker = Tracker::load(Store::open_in_memory().unwrap()).unwrap();
        (App::new(std::env::temp_dir()), tracker)
    }

    #[test]
    fn test_add_with_args() {
        let (mut app, mut tracker) = setup();
        handle_command("add Coffee with milk 3.50", &mut app, &mut tracker).unwrap();
        let ledger = tracker.ledger();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].description, "Coffee with milk");
        assert_eq!(ledger.balance(), dec!(-3.50));
    }

    #[test]
    fn test_add_without_args_opens_form() {
        let (mut app, mut tracker) = setup();
        handle_command("a", &mut app, &mut tracker).unwrap();
        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(app.form.as_ref().unwrap().kind, FormKind::Expense);
    }

    #[test]
    fn test_bad_amount_is_rejected() {
        let (mut app, mut tracker) = setup();
        handle_command("add Coffee lots", &mut app, &mut tracker).unwrap();
        handle_command("topup ten", &mut app, &mut tracker).unwrap();
        handle_command("balance abc", &mut app, &mut tracker).unwrap();
        assert!(tracker.ledger().is_empty());
        assert!(app.status_message.starts_with("Usage"));
    }

    #[test]
    fn test_balance_then_topup() {
        let (mut app, mut tracker) = setup();
        handle_command("balance 100", &mut app, &mut tracker).unwrap();
        handle_command("t 20", &mut app, &mut tracker).unwrap();
        assert_eq!(tracker.ledger().balance(), dec!(120));
    }

    #[test]
    fn test_page_command_clamps() {
        let (mut app, mut tracker) = setup();
        for i in 0..25 {
            handle_command(&format!("add Item{i} 1"), &mut app, &mut tracker).unwrap();
        }
        handle_command("page 7", &mut app, &mut tracker).unwrap();
        assert_eq!(app.pager.page(), 3);
        handle_command("prev", &mut app, &mut tracker).unwrap();
        assert_eq!(app.pager.page(), 2);
    }

    #[test]
    fn test_unknown_command_suggests() {
        let (mut app, mut tracker) = setup();
        handle_command("topu 5", &mut app, &mut tracker).unwrap();
        assert!(app.status_message.contains(":topup"));
        assert!(tracker.ledger().is_empty());
    }

    #[test]
    fn test_quit() {
        let (mut app, mut tracker) = setup();
        handle_command("q", &mut app, &mut tracker).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("export", "export"), 0);
        assert_eq!(levenshtein("exprot", "export"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
    }
}
