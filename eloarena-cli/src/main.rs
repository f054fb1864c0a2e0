mod backup;
mod config;
mod output;
mod store;

use clap::Parser;
use eloarena_core::constants::MILESTONE_INTERVAL;
use eloarena_core::{
    ComparisonRecord, ComparisonSession, EventSink, Item, SessionError, Store, SystemClock,
    ThreadRandom,
};
use std::collections::HashSet;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::store::JsonStore;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "eloarena", version, about = "Rank a collection by pairwise Elo comparisons")]
struct Cli {
    /// Path to the data file (default: ~/.local/share/eloarena/data.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Path to config file (default: ~/.config/eloarena/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the interactive comparison loop
    Run(RunArgs),
    /// Print the current rankings
    Rankings(RankingsArgs),
    /// Export items and history to a JSON backup file
    Export(ExportArgs),
    /// Import a JSON backup, replacing current data
    Import(ImportArgs),
    /// Delete all items and comparison history
    Reset(ResetArgs),
    /// Create a default config file at ~/.config/eloarena/config.toml
    Init,
}

#[derive(Parser)]
struct RunArgs {
    /// File with items to add, one per line (or a JSON array of strings)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item to add (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Comparisons between progress milestones
    #[arg(long)]
    milestone: Option<usize>,
}

#[derive(Parser)]
struct RankingsArgs {
    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ExportArgs {
    /// Output path (default: eloarena-backup-YYYY-MM-DD.json)
    #[arg(long)]
    to: Option<PathBuf>,
}

#[derive(Parser)]
struct ImportArgs {
    /// Backup file to import
    file: PathBuf,
}

#[derive(Parser)]
struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

/// Prints a progress notice every `interval` decisions.
struct MilestoneSink {
    interval: usize,
}

impl EventSink for MilestoneSink {
    fn comparison_recorded(&mut self, _record: &ComparisonRecord, total: usize) {
        if self.interval > 0 && total > 0 && total % self.interval == 0 {
            println!("You've completed {total} comparisons!");
        }
    }
}

/// Parse a string as either a JSON array of strings or plain text (one item per line).
fn parse_items_from_str(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        // Try JSON array
        let items: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
        items.into_iter().filter(|s| !s.trim().is_empty()).collect()
    } else {
        // Plain text, one item per line
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Collect item names from --items, --item, and piped stdin. Stdin is
/// only consulted when neither flag provided any names, so `--items`
/// runs never block on an open pipe.
fn gather_item_names(args: &RunArgs, piped: Option<&str>) -> Vec<String> {
    let mut names = Vec::new();

    if let Some(ref path) = args.items {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        names = parse_items_from_str(&content);
    }

    names.extend(args.inline_items.iter().cloned());

    if names.is_empty() {
        if let Some(content) = piped {
            names = parse_items_from_str(content);
        }
    }

    names
}

/// Piped stdin content, or None when stdin is a terminal. Reads to EOF,
/// so the interactive loop afterwards ends immediately in piped runs.
fn read_piped_stdin() -> Option<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let lines: Vec<String> = stdin
        .lock()
        .lines()
        .map(|l| l.unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}"))))
        .collect();
    Some(lines.join("\n"))
}

/// Turn names into new items. Names already present in the session are
/// skipped so re-running with the same file does not duplicate entries;
/// identity is still the generated id.
fn new_items_from_names(names: Vec<String>, existing: &[Item]) -> Vec<Item> {
    let mut known: HashSet<String> = existing.iter().map(|i| i.display_ref.clone()).collect();
    let mut new_items = Vec::new();
    for name in names {
        if known.insert(name.clone()) {
            new_items.push(Item::new(uuid::Uuid::new_v4().to_string(), name));
        }
    }
    new_items
}

fn load_new_items(args: &RunArgs, existing: &[Item]) -> Vec<Item> {
    let piped = if args.items.is_none() && args.inline_items.is_empty() {
        read_piped_stdin()
    } else {
        None
    };
    let names = gather_item_names(args, piped.as_deref());
    new_items_from_names(names, existing)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Load config file, merge with CLI args (CLI wins)
    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);
    let data_path = cli
        .data
        .clone()
        .or_else(|| cfg.data_path.clone())
        .unwrap_or_else(config::default_data_path);

    match cli.command {
        Commands::Run(args) => run(args, &cfg, data_path),
        Commands::Rankings(args) => rankings(args, data_path),
        Commands::Export(args) => {
            let to = args.to.unwrap_or_else(backup::default_backup_path);
            backup::export(&data_path, &to);
            println!("Exported data to {}", to.display());
        }
        Commands::Import(args) => {
            let data = backup::import(&args.file, &data_path);
            println!(
                "Imported {} items and {} comparisons",
                data.items.len(),
                data.results.len()
            );
        }
        Commands::Reset(args) => reset(args, data_path),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your data path or milestone interval.");
        }
    }
}

fn run(args: RunArgs, cfg: &config::EloarenaConfig, data_path: PathBuf) {
    let store = JsonStore::open(data_path).unwrap_or_else(|e| bail(e));
    let milestone = args
        .milestone
        .or(cfg.milestone_interval)
        .unwrap_or(MILESTONE_INTERVAL);

    let mut session = ComparisonSession::with_collaborators(
        Box::new(store),
        Box::new(ThreadRandom),
        Box::new(SystemClock),
        Box::new(MilestoneSink { interval: milestone }),
    )
    .unwrap_or_else(|e| bail(e));

    let new_items = load_new_items(&args, session.items());
    if !new_items.is_empty() {
        println!("Added {} new items.", new_items.len());
        session.insert_items(new_items);
    }

    if session.items().len() < 2 {
        bail("Need at least 2 items to compare. Add some with --items <file>, --item <name>, or pipe names on stdin.");
    }

    run_loop(&mut session);
}

const LOOP_HELP: &str = "1/2 = pick the better item, s = skip, u = undo, r = rankings, q = quit";

fn run_loop(session: &mut ComparisonSession) {
    println!("Which do you prefer? ({LOOP_HELP})");

    let stdin = io::stdin();
    loop {
        let Some((left, right)) = session.active_pair() else {
            println!("Not enough items left to compare.");
            return;
        };
        let (left_id, right_id) = (left.id.clone(), right.id.clone());

        println!();
        println!("  1) {}  ({})", left.display_ref, left.rating);
        println!("  2) {}  ({})", right.display_ref, right.rating);
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return, // EOF
            Ok(_) => {}
            Err(e) => bail(format!("Failed to read from stdin: {e}")),
        }

        match line.trim() {
            "1" => report_decision(session, &left_id, &right_id),
            "2" => report_decision(session, &right_id, &left_id),
            "s" => {
                session.skip();
            }
            "u" => match session.undo() {
                Ok(record) => println!(
                    "Undid {} over {}; decide this pair again.",
                    name_of(session, &record.winner_id),
                    name_of(session, &record.loser_id),
                ),
                Err(SessionError::NoHistory) => println!("Nothing to undo."),
                Err(e) => println!("Cannot undo: {e}"),
            },
            "r" => output::print_table(session.items(), session.comparison_count()),
            "q" | "quit" | "exit" => return,
            "" => {}
            other => println!("Unknown command \"{other}\" ({LOOP_HELP})"),
        }
    }
}

fn report_decision(session: &mut ComparisonSession, winner_id: &str, loser_id: &str) {
    let before_winner = session.item(winner_id).map(|i| i.rating).unwrap_or_default();
    let before_loser = session.item(loser_id).map(|i| i.rating).unwrap_or_default();

    match session.decide(winner_id, loser_id) {
        Ok(_) => {
            if let (Some(winner), Some(loser)) = (session.item(winner_id), session.item(loser_id)) {
                println!(
                    "{}: {} -> {}   {}: {} -> {}",
                    winner.display_ref,
                    before_winner,
                    winner.rating,
                    loser.display_ref,
                    before_loser,
                    loser.rating,
                );
            }
        }
        Err(e) => println!("Decision rejected: {e}"),
    }
}

fn name_of(session: &ComparisonSession, id: &str) -> String {
    session
        .item(id)
        .map(|i| i.display_ref.clone())
        .unwrap_or_else(|| id.to_string())
}

fn rankings(args: RankingsArgs, data_path: PathBuf) {
    let data = store::read_data_file(&data_path).unwrap_or_else(|e| bail(e));
    if args.json {
        output::print_json(&data.items, data.results.len());
    } else {
        output::print_table(&data.items, data.results.len());
    }
}

fn reset(args: ResetArgs, data_path: PathBuf) {
    if !args.yes {
        print!("This deletes all items and comparison history. Type \"yes\" to confirm: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() || line.trim() != "yes" {
            println!("Aborted.");
            return;
        }
    }

    let mut store = JsonStore::open(data_path).unwrap_or_else(|e| bail(e));
    store.clear().unwrap_or_else(|e| bail(e));
    println!("All items and rankings have been reset.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_plain_lines() {
        let items = parse_items_from_str("alpha\n  beta  \n\ngamma\n");
        assert_eq!(items, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_parse_items_json_array() {
        let items = parse_items_from_str(r#"["alpha", "beta", ""]"#);
        assert_eq!(items, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_load_new_items_skips_known_names() {
        let args = RunArgs {
            items: None,
            inline_items: vec!["alpha".into(), "beta".into(), "alpha".into()],
            milestone: None,
        };
        let existing = vec![Item::new("id-1", "beta")];

        let new_items = load_new_items(&args, &existing);
        assert_eq!(new_items.len(), 1);
        assert_eq!(new_items[0].display_ref, "alpha");
        assert_eq!(new_items[0].rating, eloarena_core::constants::DEFAULT_RATING);
    }

    #[test]
    fn test_gather_names_uses_piped_stdin_when_no_flags() {
        let args = RunArgs {
            items: None,
            inline_items: vec![],
            milestone: None,
        };

        let names = gather_item_names(&args, Some("alpha\nbeta\n"));
        assert_eq!(names, vec!["alpha", "beta"]);

        let new_items = new_items_from_names(names, &[]);
        assert_eq!(new_items.len(), 2);
        assert_eq!(new_items[0].display_ref, "alpha");
    }

    #[test]
    fn test_gather_names_ignores_piped_stdin_when_flags_given() {
        let args = RunArgs {
            items: None,
            inline_items: vec!["alpha".into()],
            milestone: None,
        };

        let names = gather_item_names(&args, Some("beta\ngamma\n"));
        assert_eq!(names, vec!["alpha"]);
    }
}
