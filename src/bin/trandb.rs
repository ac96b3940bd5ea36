//! trandb CLI - Load a log file into SQLite and look rows up.
//!
//! Usage: trandb [OPTIONS] <LOG_FILE>
//!
//! Config file resolution order:
//! 1. --config <path> if provided
//! 2. TRANDB_CONFIG environment variable
//! 3. ~/.config/trandb/config.toml (default)

use clap::Parser;
use std::io::{Write, stdout};
use std::path::PathBuf;

use trandb::error::Result;
use trandb::{Config, Row, TranDb};

/// Load a delimited log file into SQLite and query it with `COLUMN <op> VALUE`.
#[derive(Parser)]
#[command(name = "trandb")]
#[command(version, about = "Load log files into SQLite and look rows up")]
struct Cli {
    /// Log file to load and query.
    log_file: String,

    /// Path to config file (TOML).
    /// Default: ~/.config/trandb/config.toml or TRANDB_CONFIG env var.
    #[arg(short, long)]
    config: Option<String>,

    /// Lookup expression, e.g. "CMD = RD" (omit for interactive mode).
    #[arg(short, long)]
    query: Option<String>,

    /// Query the existing table without loading the log file again.
    #[arg(long, default_value = "false")]
    no_ingest: bool,

    /// Print rows as JSON arrays.
    #[arg(long, default_value = "false")]
    json: bool,
}

/// Resolve config file path from CLI, env var, or default.
fn resolve_config_path(cli_config: Option<String>) -> Option<PathBuf> {
    // 1. --config wins
    if let Some(path) = cli_config {
        return Some(PathBuf::from(path));
    }

    // 2. TRANDB_CONFIG
    if let Ok(path) = std::env::var("TRANDB_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // 3. ~/.config/trandb/config.toml, only if it exists
    if let Some(home) = dirs::home_dir() {
        let default_path = home.join(".config").join("trandb").join("config.toml");
        if default_path.exists() {
            return Some(default_path);
        }
    }

    None
}

fn print_rows(rows: &[Row], json: bool) -> Result<()> {
    let mut out = stdout().lock();
    for row in rows {
        if json {
            writeln!(out, "{}", serde_json::to_string(row)?)?;
        } else {
            let fields: Vec<&str> = row.iter().map(|v| v.as_deref().unwrap_or("NULL")).collect();
            writeln!(out, "{}", fields.join("\t"))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Run interactive REPL mode. Lookup errors are printed and the loop goes on.
fn run_repl(db: &mut TranDb, json: bool) -> Result<()> {
    let mut rl = rustyline::DefaultEditor::new()?;

    println!("trandb interactive mode. Type lookups like 'CMD = RD', '.exit' to quit.");
    println!();

    loop {
        match rl.readline("trandb> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == ".exit" || line == ".quit" || line == "exit" || line == "quit" {
                    break;
                }
                if line == ".table" {
                    match db.identity() {
                        Ok(identity) => println!("{} in {}", identity.table, identity.db_file),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                    continue;
                }
                if line.starts_with('.') {
                    println!("Unknown command: {}", line);
                    println!("Commands: .table, .exit, .quit");
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match db.lookup(line) {
                    Ok(rows) => {
                        print_rows(&rows, json)?;
                        println!("({} rows)", rows.len());
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
                println!();
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let _ = env_logger::builder().is_test(false).try_init();

    let cli = Cli::parse();

    // Resolve config, falling back to built-in naming
    let config = match resolve_config_path(cli.config) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    // Opens <stem>.db next to the log file
    let mut db = TranDb::open(&cli.log_file, &config)?;

    if !cli.no_ingest {
        let report = db.ingest()?;
        eprintln!(
            "Loaded {} rows into {} ({})",
            report.rows, report.identity.table, report.identity.db_file
        );
    }

    // Run one lookup or start REPL
    if let Some(expression) = cli.query {
        let rows = db.lookup(&expression)?;
        print_rows(&rows, cli.json)?;
    } else {
        run_repl(&mut db, cli.json)?;
    }

    db.close()?;
    Ok(())
}
