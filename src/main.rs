use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use git_reaper::config::{self, Config};
use git_reaper::git::{Git2Repository, Repository};
use git_reaper::logging::{self, LogOptions};
use git_reaper::reaper::{DeletionOutcome, Reaper};
use git_reaper::ui;

#[derive(Parser)]
#[command(
    name = "git-reaper",
    version,
    about = "Delete local git branches that are already merged into a main branch"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find merged branches and delete them after confirmation
    Clean {
        #[arg(long, help = "Show what would be deleted without making changes")]
        dry_run: bool,

        #[arg(short, long, help = "Skip the confirmation prompt")]
        force: bool,

        #[arg(short, long = "main", value_name = "NAME", help = "Main branch name, in priority order (repeatable)")]
        main: Vec<String>,
    },
    /// Show which configured main branches exist in this repository
    ListMain {
        #[arg(short, long = "main", value_name = "NAME", help = "Main branch name, in priority order (repeatable)")]
        main: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(LogOptions {
        verbose: args.verbose,
    });

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    match args.command {
        Command::Clean {
            dry_run,
            force,
            main,
        } => clean(apply_overrides(config, main)?, dry_run, force),
        Command::ListMain { main } => list_main(apply_overrides(config, main)?),
    }
}

fn apply_overrides(config: Config, main: Vec<String>) -> Result<Config> {
    if main.is_empty() {
        Ok(config)
    } else {
        Ok(config.with_main_branches(main)?)
    }
}

fn clean(config: Config, dry_run: bool, force: bool) -> Result<()> {
    let repo = Git2Repository::open()?;
    ui::display_repository(repo.root_path());

    let reaper = Reaper::new(&repo, &config.main_branches);
    let main_branches = reaper.discover_main_branches()?;
    ui::display_main_branches(&main_branches);

    ui::display_status("Searching for merged branches...");
    let candidates = reaper.find_merged_branches(&main_branches)?;
    if candidates.is_empty() {
        ui::display_nothing_to_clean();
        return Ok(());
    }
    ui::display_candidates(&candidates);

    if dry_run {
        ui::display_dry_run(candidates.len());
        return Ok(());
    }

    let outcome = reaper.confirm_and_delete(&candidates, |count| {
        if force {
            Ok(true)
        } else {
            ui::confirm_deletion(count)
        }
    })?;

    match outcome {
        DeletionOutcome::NothingToDelete => ui::display_nothing_to_clean(),
        DeletionOutcome::Cancelled => ui::display_cancelled(),
        DeletionOutcome::Completed(report) => {
            ui::display_report(&report);
            ui::display_success("Repository cleanup completed!");
        }
    }

    Ok(())
}

fn list_main(config: Config) -> Result<()> {
    let repo = Git2Repository::open()?;
    ui::display_repository(repo.root_path());

    let reaper = Reaper::new(&repo, &config.main_branches);
    let main_branches = reaper.discover_main_branches()?;
    ui::display_main_branches(&main_branches);
    Ok(())
}
