//! tidyfile - sort a directory tree into a target folder.
//!
//! Usage:
//!   tidy SOURCE TARGET              Delete empty files, move the rest, ask about spam
//!   tidy SOURCE TARGET --yes        Delete spam-named files without asking
//!   tidy SOURCE TARGET --keep-spam  Only report spam-named files
//!   tidy SOURCE TARGET --dry-run    Show what would happen
//!   tidy --help                     Show help

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use tidyfile_core::{CleanConfig, CollisionPolicy, DeleteMode};
use tidyfile_ops::{
    events, CleanEvent, Cleaner, EventReceiver, FileOperation, Plan, RunSummary, Staged,
};

#[derive(Parser)]
#[command(
    name = "tidyfile",
    version,
    about = "Sort a directory tree: drop empty files, move the rest, flag junk",
    long_about = "tidyfile walks SOURCE once, deletes every empty file, moves every other \
                  file into TARGET and sets aside files with random-looking names.\n\n\
                  Those spam files are listed after the pass and deleted only after a \
                  single confirmation."
)]
struct Cli {
    /// Directory to clean up
    source: PathBuf,

    /// Directory that receives moved files (created if missing)
    target: PathBuf,

    /// Never delete spam-named files, only report them
    #[arg(long)]
    keep_spam: bool,

    /// Delete spam-named files without asking
    #[arg(short, long, conflicts_with_all = ["no", "keep_spam"])]
    yes: bool,

    /// Keep spam-named files without asking
    #[arg(short, long)]
    no: bool,

    /// What to do when a file with the same name is already in TARGET
    #[arg(long, value_enum, default_value = "fail")]
    on_collision: Collision,

    /// Move deleted files to the trash instead of removing them
    #[arg(long)]
    trash: bool,

    /// Print what would happen without touching anything
    #[arg(long)]
    dry_run: bool,

    /// Print events and the summary as JSON lines
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Collision {
    #[default]
    Fail,
    Overwrite,
    Rename,
}

impl From<Collision> for CollisionPolicy {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Fail => Self::Fail,
            Collision::Overwrite => Self::Overwrite,
            Collision::Rename => Self::AutoRename,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CleanConfig::builder()
        .source(cli.source.clone())
        .target(cli.target.clone())
        .delete_spam(!cli.keep_spam)
        .collision(CollisionPolicy::from(cli.on_collision))
        .delete_mode(if cli.trash {
            DeleteMode::Trash
        } else {
            DeleteMode::Permanent
        })
        .build()
        .context("Invalid configuration")?;

    if cli.dry_run {
        return run_plan(&config, cli.json);
    }

    run_clean(&config, &cli)
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Run the cleaner, prompting for the spam decision unless `--yes`/`--no`.
fn run_clean(config: &CleanConfig, cli: &Cli) -> Result<()> {
    let (tx, mut rx) = events::channel();
    let cleaner = Cleaner::new().with_events(tx);

    let staged = cleaner.start(config).context("Cleaning failed")?;
    print_events(&mut rx, cli.json)?;

    let summary = match staged {
        Staged::NoFiles => None,
        Staged::Finished(summary) => Some(summary),
        Staged::AwaitingConfirmation(pending) => {
            let confirmed = if cli.yes {
                true
            } else if cli.no {
                false
            } else {
                prompt_confirm(&format!("Delete {} spam files?", pending.paths().len()))?
            };
            Some(pending.resolve(confirmed))
        }
    };
    print_events(&mut rx, cli.json)?;

    if let Some(summary) = summary {
        print_summary(&summary, cli.json)?;
    }

    Ok(())
}

/// Show the planned operation for every file.
fn run_plan(config: &CleanConfig, json: bool) -> Result<()> {
    let plan = Cleaner::new().plan(config).context("Planning failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.actions.is_empty() && plan.unreadable.is_empty() {
        println!("No files in {}.", config.source.display());
        return Ok(());
    }

    let root = config
        .source
        .canonicalize()
        .unwrap_or_else(|_| config.source.clone());
    for action in &plan.actions {
        let label = match action.operation {
            FileOperation::Delete => "delete",
            FileOperation::Move => "move",
            FileOperation::DeferSpam => "spam",
        };
        println!(
            "{:<7} {:>10}  {}",
            label,
            format_size(action.size),
            relative(&action.path, &root).display()
        );
    }
    for err in &plan.unreadable {
        println!("{:<7} {:>10}  {}", "error", "-", err);
    }

    print_plan_totals(&plan);
    Ok(())
}

fn print_plan_totals(plan: &Plan) {
    println!();
    println!("{}", "─".repeat(60));
    println!(
        " {} to delete, {} to move, {} spam, {} unreadable",
        plan.count(FileOperation::Delete),
        plan.count(FileOperation::Move),
        plan.count(FileOperation::DeferSpam),
        plan.unreadable.len()
    );
    println!("{}", "─".repeat(60));
}

/// Print every event queued so far.
fn print_events(rx: &mut EventReceiver, json: bool) -> Result<()> {
    while let Ok(event) = rx.try_recv() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            print_event(&event);
        }
    }
    Ok(())
}

fn print_event(event: &CleanEvent) {
    match event {
        CleanEvent::TargetCreated { path } => {
            println!("Created target directory: {}", path.display())
        }
        CleanEvent::NoFiles { root } => println!("No files in {}.", root.display()),
        CleanEvent::Deleted { path } => println!("Deleted empty: {}", file_name(path)),
        CleanEvent::Moved { from, bytes, .. } => {
            println!("Moved: {} ({})", file_name(from), format_size(*bytes))
        }
        CleanEvent::Failed { path, message } => {
            eprintln!("Error at {}: {}", path.display(), message)
        }
        CleanEvent::SpamDetected { paths } => {
            println!();
            println!("Spam files detected:");
            for path in paths {
                println!("  {}", path.display());
            }
        }
        CleanEvent::SpamDeletionDisabled { .. } => println!("Spam deletion is disabled."),
        CleanEvent::ConfirmationRequested { .. } | CleanEvent::ConfirmationResponse { .. } => {}
        CleanEvent::SpamDeleted { count } => println!("Deleted {count} spam files."),
        CleanEvent::SpamSkipped { .. } => println!("Skipped spam deletion."),
        CleanEvent::Completed {
            removed,
            moved,
            total,
            percent,
        } => {
            println!();
            println!("Done! Removed: {removed} | Moved: {moved}");
            println!("Progress: {percent:.0}% ({total}/{total})");
        }
    }
}

fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }

    println!("{}", "─".repeat(60));
    println!(" {}", summary.summary());
    println!(
        " {} moved in {:.2}s",
        format_size(summary.bytes_moved),
        summary.duration.as_secs_f64()
    );
    let already_in_target = summary.already_in_target();
    if already_in_target > 0 {
        println!(" {already_in_target} file(s) were already in TARGET and left in place");
    }
    let failed = summary.failed() - already_in_target;
    if failed > 0 {
        println!(" {failed} file(s) could not be handled");
    }
    println!("{}", "─".repeat(60));
    Ok(())
}

/// Ask a yes/no question on stdin; anything but "y" is a no.
fn prompt_confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} (y/N): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read answer")?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
