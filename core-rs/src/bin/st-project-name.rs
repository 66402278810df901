//! st-project-name - STM32CubeIDE / TouchGFX project name tool
//!
//! Reports project name inconsistencies and renames projects.
//!
//! ```text
//! st-project-name                  analyze the project in the current directory
//! st-project-name <root>           analyze the project in <root>
//! st-project-name <name>           rename the project in the current directory
//! st-project-name <root> <name>    rename the project in <root>
//! ```

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::Level;

use stpn_core::drivers::fs::is_path_like;
use stpn_core::errors::EXIT_SYNTAX_ERROR;
use stpn_core::{
    validate_project_name, CommitOutcome, GitDriver, LayoutConfig, ProjectError, ProjectModel,
    DEFAULT_COMMIT_MESSAGE,
};

#[derive(Parser)]
#[command(name = "st-project-name")]
#[command(version)]
#[command(about = "Checks and renames STM32CubeIDE / TouchGFX projects", long_about = None)]
struct Cli {
    /// Project root directory, or the new name when it doesn't look like a path
    first: Option<String>,

    /// New project name
    second: Option<String>,

    /// Commit the current state to Git before doing anything else
    ///
    /// A custom message must be attached with `=`, as in `--commit=MESSAGE`.
    #[arg(
        short,
        long,
        value_name = "MESSAGE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_COMMIT_MESSAGE
    )]
    commit: Option<String>,

    /// YAML file overriding the default project layout
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Split the positional arguments into project root and new name
    fn target(&self) -> (PathBuf, Option<String>) {
        match (&self.first, &self.second) {
            (None, _) => (PathBuf::from("."), None),
            (Some(first), None) if is_path_like(first) => (PathBuf::from(first), None),
            (Some(first), None) => (PathBuf::from("."), Some(first.clone())),
            (Some(first), Some(second)) => (PathBuf::from(first), Some(second.clone())),
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_SYNTAX_ERROR,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "ERROR:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), ProjectError> {
    let (root, new_name) = cli.target();
    if !root.is_dir() {
        return Err(ProjectError::RootNotFound(root));
    }
    if let Some(name) = &new_name {
        validate_project_name(name)?;
    }

    let layout = match &cli.layout {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };

    if let Some(message) = &cli.commit {
        commit(&root, message);
    }

    let mut model = ProjectModel::open(&root, layout)?;
    match new_name {
        Some(name) => rename(&mut model, &name),
        None => {
            analyze(&model);
            Ok(())
        }
    }
}

/// Snapshot the project in Git; failures are reported but not fatal
fn commit(root: &Path, message: &str) {
    let driver = GitDriver::new(root.to_path_buf());
    match driver.commit_snapshot(message) {
        Ok(CommitOutcome::Committed(hash)) => println!("Committed {}.", hash.green()),
        Ok(CommitOutcome::NothingToCommit) => println!("No changes to commit."),
        Err(e) => eprintln!("{} {}", "ERROR:".red().bold(), e),
    }
}

fn analyze(model: &ProjectModel) {
    println!("Project name: {}", model.name().green());
    if model.has_gui() {
        println!("{} project present.", "TouchGFX".bright_white());
    }
    if model.issues().is_empty() {
        println!("{}", "No project name / .ioc file issues.".green());
    } else {
        println!("Project name issues:");
        for issue in model.issues() {
            println!("  • {}", issue.yellow());
        }
    }
}

fn rename(model: &mut ProjectModel, new_name: &str) -> Result<(), ProjectError> {
    println!("Renaming project...");
    if !model.rename(new_name)? {
        println!("No changes made. Seems like already renamed.");
        return Ok(());
    }
    println!("Changes made:");
    for change in model.changes() {
        println!("  • {}", change.green());
    }
    Ok(())
}
