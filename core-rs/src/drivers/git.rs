//! Git commit helper for project snapshots
//!
//! Used by the `--commit` option to record the project state before the
//! tool touches it. When the project root isn't a repository yet, one is
//! created with a default `.gitignore` for STM32CubeIDE build output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stpn_core::drivers::{CommitOutcome, GitDriver};
//!
//! let driver = GitDriver::new(PathBuf::from("/work/Widget"));
//! match driver.commit_snapshot("st-project-name run.")? {
//!     CommitOutcome::Committed(hash) => println!("committed {}", hash),
//!     CommitOutcome::NothingToCommit => println!("clean"),
//! }
//! ```

use crate::errors::{ProjectError, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Default commit message for snapshots
pub const DEFAULT_COMMIT_MESSAGE: &str = "st-project-name run.";

const DEFAULT_GITIGNORE: &str = "\
# STM32CubeIDE build output
Debug/
Release/
*.o
*.d
*.su
*.cyclo
*.elf
*.map
*.list

# IDE state
.metadata/
.settings/language.settings.xml
*.launch.bak

# TouchGFX generated assets
TouchGFX/build/
TouchGFX/generated/
";

/// Result of a snapshot commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created with the given hash
    Committed(String),
    /// The working tree had no changes
    NothingToCommit,
}

/// Git driver rooted at the project directory
#[derive(Debug, Clone)]
pub struct GitDriver {
    root: PathBuf,
}

impl GitDriver {
    /// Create new GitDriver for a project root
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Installed Git version string, fails if Git isn't available
    pub fn version(&self) -> Result<String> {
        self.run(&["--version"])
    }

    /// Check if the project root is a repository
    pub fn is_repo(&self) -> bool {
        self.root.join(".git").exists()
    }

    /// Initialize git repository if not already initialized
    pub fn init(&self) -> Result<()> {
        if self.is_repo() {
            return Ok(());
        }
        self.run(&["init"])?;
        self.ensure_identity()?;
        Ok(())
    }

    /// Write the default `.gitignore`; returns false if one already exists
    pub fn write_default_gitignore(&self) -> Result<bool> {
        let path = self.root.join(".gitignore");
        if path.exists() {
            return Ok(false);
        }
        fs::write(&path, DEFAULT_GITIGNORE)?;
        debug!("Created {}", path.display());
        Ok(true)
    }

    /// Check if there are uncommitted or untracked changes
    pub fn has_changes(&self) -> Result<bool> {
        let status = self.run(&["status", "--porcelain"])?;
        Ok(!status.trim().is_empty())
    }

    /// Add all changes to staging
    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "."])?;
        Ok(())
    }

    /// Commit staged changes with message, returning the commit hash
    pub fn commit(&self, message: &str) -> Result<String> {
        self.run(&["commit", "-m", message])?;
        self.run(&["rev-parse", "HEAD"])
    }

    /// Commit the whole working tree, creating the repository if needed
    pub fn commit_snapshot(&self, message: &str) -> Result<CommitOutcome> {
        let version = self.version()?;
        debug!("Using {}", version);

        if !self.is_repo() {
            info!("Initializing Git repository in {}", self.root.display());
            self.init()?;
            self.write_default_gitignore()?;
        }

        if !self.has_changes()? {
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.add_all()?;
        let hash = self.commit(message)?;
        info!("Committed {}", hash);
        Ok(CommitOutcome::Committed(hash))
    }

    /// Set a repository-local identity when none is configured
    fn ensure_identity(&self) -> Result<()> {
        if self.run(&["config", "user.email"]).is_ok_and(|email| !email.is_empty()) {
            return Ok(());
        }
        self.run(&["config", "user.name", "st-project-name"])?;
        self.run(&["config", "user.email", "st-project-name@localhost"])?;
        Ok(())
    }

    /// Run a git command in the project root, returning trimmed stdout
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| ProjectError::Git(format!("Failed to run git {}: {}", args[0], e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProjectError::Git(format!("git {} failed: {}", args[0], stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
