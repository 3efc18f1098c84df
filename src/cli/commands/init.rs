//! Init command implementation
//!
//! Implements `forgeplan init` to write a starter manifest.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::output::{print_detail, print_success};
use crate::config::defaults::{DEFAULT_PROJECT, MANIFEST_FILE};
use crate::core::manifest::Manifest;

/// Execute the init command
pub async fn execute(project_dir: &Path, name: Option<String>, force: bool) -> Result<()> {
    let manifest_path = project_dir.join(MANIFEST_FILE);

    if manifest_path.exists() && !force {
        bail!(
            "{} already exists at {}. Use --force to overwrite.",
            MANIFEST_FILE,
            manifest_path.display()
        );
    }

    let name = name.unwrap_or_else(|| DEFAULT_PROJECT.to_string());
    let manifest = Manifest::starter(&name);
    let content = manifest.to_toml_string()?;

    fs::write(&manifest_path, content)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    tracing::info!("Wrote starter manifest for project {name}");

    print_success(&format!("Created {}", manifest_path.display()));
    print_detail("Edit [repos] to point at your repositories, then run 'forgeplan check'.");

    Ok(())
}
