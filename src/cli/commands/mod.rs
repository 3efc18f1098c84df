//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod doctor;
pub mod init;
pub mod plan;
pub mod resolve;
pub mod targets;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a starter forgeplan.toml
    Init {
        /// Project name
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// List supported build targets
    Targets,

    /// Resolve the build properties for a target
    Resolve {
        /// Target identifier (e.g. win_x64)
        target: String,

        /// Project name (defaults when omitted)
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Print the rendered step sequence for a target
    Plan {
        /// Target identifier (e.g. win_x64)
        target: String,

        /// Project name override
        #[arg(short, long)]
        project: Option<String>,

        /// Build configuration override (Debug, Release, ...)
        #[arg(short, long)]
        config: Option<String>,

        /// Branch override
        #[arg(short, long)]
        branch: Option<String>,

        /// Source repository override
        #[arg(long)]
        repo: Option<String>,

        /// Dependency bundle repository override
        #[arg(long)]
        sdk_repo: Option<String>,

        /// Number of parallel compile jobs
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Validate the manifest and dry-render every configured plan
    Check,

    /// Check for the native tools the emitted plans rely on
    Doctor,
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Init { name, force } => {
                let current_dir = std::env::current_dir()?;
                init::execute(&current_dir, name, force).await
            }
            Self::Targets => targets::execute().await,
            Self::Resolve { target, project } => resolve::execute(&target, project).await,
            Self::Plan {
                target,
                project,
                config,
                branch,
                repo,
                sdk_repo,
                jobs,
            } => {
                let current_dir = std::env::current_dir()?;
                let options = plan::PlanOptions {
                    project,
                    config,
                    branch,
                    repo,
                    sdk_repo,
                    jobs,
                };
                plan::execute(&current_dir, &target, options).await
            }
            Self::Check => {
                let current_dir = std::env::current_dir()?;
                check::execute(&current_dir).await
            }
            Self::Doctor => doctor::execute().await,
        }
    }
}
