//! Plan command implementation
//!
//! Implements `forgeplan plan` to render the full step sequence for one
//! target. Repository coordinates come from the manifest unless both are
//! overridden on the command line.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::is_json;
use crate::config::defaults::MANIFEST_FILE;
use crate::core::factory;
use crate::core::manifest::Manifest;
use crate::core::request::BuildRequest;
use crate::core::target::BuildTarget;

/// Plan options
pub struct PlanOptions {
    /// Project name override
    pub project: Option<String>,
    /// Build configuration override
    pub config: Option<String>,
    /// Branch override
    pub branch: Option<String>,
    /// Source repository override
    pub repo: Option<String>,
    /// Dependency bundle repository override
    pub sdk_repo: Option<String>,
    /// Number of parallel compile jobs
    pub jobs: Option<usize>,
}

/// Execute the plan command
pub async fn execute(project_dir: &Path, target: &str, options: PlanOptions) -> Result<()> {
    let target: BuildTarget = target.parse()?;

    // The manifest is optional when both repositories are given as flags.
    let manifest_path = project_dir.join(MANIFEST_FILE);
    let manifest = if options.repo.is_some() && options.sdk_repo.is_some() {
        manifest_path
            .exists()
            .then(|| Manifest::load(&manifest_path))
            .transpose()?
    } else {
        Some(Manifest::load(&manifest_path).with_context(|| {
            "repository coordinates are required; create a manifest or pass --repo and --sdk-repo"
        })?)
    };

    let request = build_request(target, &options, manifest.as_ref());

    let jobs = options
        .jobs
        .or_else(|| manifest.as_ref().and_then(|m| m.build.jobs))
        .unwrap_or_else(num_cpus::get);

    tracing::info!("Rendering plan for {target} with {jobs} jobs");

    let map = request.property_map()?;
    let steps = factory::compile_factory(target, jobs).render(&map)?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    println!("Build plan for {target}:\n");
    for (index, step) in steps.iter().enumerate() {
        println!("  {}. {} - {}", index + 1, step.name(), step.summary());
    }

    Ok(())
}

/// Merge CLI overrides over manifest values into one build request
fn build_request(
    target: BuildTarget,
    options: &PlanOptions,
    manifest: Option<&Manifest>,
) -> BuildRequest {
    let mut request = BuildRequest::new(target.id());

    if let Some(project) = options
        .project
        .clone()
        .or_else(|| manifest.map(|m| m.project.name.clone()))
    {
        request = request.with_project(project);
    }
    if let Some(branch) = options
        .branch
        .clone()
        .or_else(|| manifest.map(|m| m.repos.branch.clone()))
    {
        request = request.with_branch(branch);
    }
    if let Some(config) = options
        .config
        .clone()
        .or_else(|| manifest.map(|m| m.build.config.clone()))
    {
        request = request.with_config(config);
    }
    if let Some(repo) = options
        .repo
        .clone()
        .or_else(|| manifest.map(|m| m.repos.code.clone()).filter(|s| !s.is_empty()))
    {
        request = request.with_repository(repo);
    }
    if let Some(sdk_repo) = options
        .sdk_repo
        .clone()
        .or_else(|| manifest.map(|m| m.repos.sdks.clone()).filter(|s| !s.is_empty()))
    {
        request = request.with_sdk_repo_url(sdk_repo);
    }

    request
}
