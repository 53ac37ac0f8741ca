//! Tree sort command line tool
//!
//! Reads a JSON array of records from a file or stdin, tree-sorts it and
//! prints the annotated records as JSON, or as an indented tree with `--text`.
//!
//! Usage:
//!   tree-sort records.json --id id --parent parentid --sort firstname
//!   cat records.json | RUST_LOG=debug tree-sort --text --case-insensitive

use std::env;
use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fl_helpers::{TreeEntry, TreeLinearizer, TreeSortOptions};

struct Args {
    /// Input path, `None` reads stdin
    input: Option<String>,
    id_field: String,
    parent_field: String,
    sort_field: String,
    options_path: Option<String>,
    case_insensitive: bool,
    text: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            id_field: "id".to_string(),
            parent_field: "parentid".to_string(),
            sort_field: "name".to_string(),
            options_path: None,
            case_insensitive: false,
            text: false,
        }
    }
}

enum Command {
    Run(Args),
    Help,
}

fn value_for(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String> {
    iter.next()
        .cloned()
        .with_context(|| format!("{flag} requires a value"))
}

fn parse_args(raw: &[String]) -> Result<Command> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--id" => args.id_field = value_for(&mut iter, "--id")?,
            "--parent" => args.parent_field = value_for(&mut iter, "--parent")?,
            "--sort" => args.sort_field = value_for(&mut iter, "--sort")?,
            "--options" => args.options_path = Some(value_for(&mut iter, "--options")?),
            "--case-insensitive" => args.case_insensitive = true,
            "--text" => args.text = true,
            "-" => args.input = None,
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            path => {
                if args.input.is_some() {
                    bail!("Only one input file may be given");
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(Command::Run(args))
}

fn print_help() {
    println!("tree-sort: order flat parent-referencing JSON records as a tree");
    println!();
    println!("Usage:");
    println!("  tree-sort [input.json | -] [options]");
    println!();
    println!("Options:");
    println!("  --id <field>          Id field (default: id)");
    println!("  --parent <field>      Parent id field (default: parentid)");
    println!("  --sort <field>        Sibling sort field (default: name)");
    println!("  --options <file>      JSON file with tree sort options");
    println!("  --case-insensitive    Compare sort keys case-insensitively");
    println!("  --text                Print an indented tree instead of JSON");
    println!("  --help                Show this help message");
    println!();
    println!("Environment Variables:");
    println!("  RUST_LOG              Log filter, e.g. debug (default: warn)");
}

fn load_options(args: &Args) -> Result<TreeSortOptions> {
    let mut options = match &args.options_path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("Failed to read options file {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid options file {path}"))?
        }
        None => TreeSortOptions::default(),
    };
    if args.case_insensitive {
        options.case_sensitive = false;
    }
    options.validate()?;
    Ok(options)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read input file {path}")),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read records from stdin")?;
            Ok(buffer)
        }
    }
}

fn label(entry: &TreeEntry, sort_field: &str) -> String {
    match entry.record.get(sort_field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn print_tree(entries: &[TreeEntry], sort_field: &str) {
    for entry in entries {
        let indent = "  ".repeat(entry.depth);
        let marker = if entry.has_children { "+".cyan() } else { "-".dimmed() };
        let id = format!("#{}", entry.id);
        let bounds = format!("[{}, {}]", entry.left, entry.right);
        println!(
            "{indent}{marker} {} {} {}",
            label(entry, sort_field).as_str().bold(),
            id.as_str().yellow(),
            bounds.as_str().dimmed()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw)? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let options = load_options(&args)?;
    let input = read_input(args.input.as_deref())?;
    let records: Vec<Value> = serde_json::from_str(&input).context("Input must be a JSON array of records")?;
    debug!("Read {} records", records.len());

    let linearizer = TreeLinearizer::new(&args.id_field, &args.parent_field, &args.sort_field).with_options(options);

    if args.text {
        let entries = linearizer.linearize_entries(&records)?;
        print_tree(&entries, &args.sort_field);
    } else {
        let sorted = linearizer.linearize(&records)?;
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    }

    Ok(())
}
