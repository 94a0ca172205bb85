use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::models::Category;

use super::app::{App, NoticeKind};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
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

    register_command!("q", "Quit VytraTUI", cmd_quit, r);
    register_command!("quit", "Quit VytraTUI", cmd_quit, r);
    register_command!("r", "Reload expenses and stats", cmd_refresh, r);
    register_command!("refresh", "Reload expenses and stats", cmd_refresh, r);
    register_command!("a", "Open the add-expense form", cmd_add, r);
    register_command!("add", "Open the add-expense form", cmd_add, r);
    register_command!(
        "cat",
        "Filter by category (e.g. :cat food); no args clears",
        cmd_category_filter,
        r
    );
    register_command!(
        "category",
        "Filter by category (e.g. :category food)",
        cmd_category_filter,
        r
    );
    register_command!(
        "export",
        "Save CSV report (e.g. :export ~/zvit.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.notify(
            format!("Unknown command: :{cmd_name}. Did you mean :{suggestion}?"),
            NoticeKind::Error,
        );
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
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

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.load_expenses();
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.open_form();
    Ok(())
}

fn cmd_category_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_filter(None);
        return Ok(());
    }
    match Category::parse(args) {
        Category::Unknown(value) => {
            let known: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
            app.notify(
                format!("Невідома категорія: {value}. Доступні: {}", known.join(", ")),
                NoticeKind::Error,
            );
        }
        category => app.set_filter(Some(category)),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.notify("Usage: :export <path>", NoticeKind::Error);
        return Ok(());
    }
    app.export_report(expand_home(args));
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
