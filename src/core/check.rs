//! Configuration validation logic
//!
//! Validates a manifest without emitting anything: every configured target
//! must parse and its full step sequence must render with no unresolved
//! placeholders.

use crate::core::factory;
use crate::core::manifest::Manifest;
use crate::core::request::BuildRequest;
use crate::core::target::BuildTarget;

/// Result of checking one configured target
#[derive(Debug, Clone)]
pub struct TargetCheck {
    /// The target checked
    pub target: BuildTarget,
    /// Steps its plan renders to
    pub steps: usize,
    /// Render error, if the plan did not resolve
    pub error: Option<String>,
}

/// Outcome of validating a manifest
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Structural manifest problems
    pub issues: Vec<String>,
    /// Per-target plan results
    pub targets: Vec<TargetCheck>,
    /// Non-fatal observations
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the manifest and every target plan check out
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty() && self.targets.iter().all(|t| t.error.is_none())
    }
}

/// Validate a manifest and dry-render the plan of every configured target
pub fn check_manifest(manifest: &Manifest) -> CheckReport {
    let mut report = CheckReport::default();

    if let Err(e) = manifest.validate() {
        report.issues.push(e.to_string());
    }

    let targets = match manifest.targets() {
        Ok(targets) => targets,
        // Already reported through validate(); nothing further to render.
        Err(_) => return report,
    };

    if manifest.build.jobs == Some(0) {
        report
            .issues
            .push("build.jobs must be greater than 0".to_string());
    }

    let jobs = match manifest.build.jobs {
        Some(0) | None => num_cpus::get(),
        Some(jobs) => jobs,
    };

    for target in targets {
        let request = BuildRequest::new(target.id())
            .with_project(manifest.project.name.clone())
            .with_branch(manifest.repos.branch.clone())
            .with_config(manifest.build.config.clone())
            .with_repository(manifest.repos.code.clone())
            .with_sdk_repo_url(manifest.repos.sdks.clone());

        let outcome = request
            .property_map()
            .map_err(crate::error::PlanError::from)
            .and_then(|map| factory::compile_factory(target, jobs).render(&map));

        report.targets.push(match outcome {
            Ok(steps) => TargetCheck {
                target,
                steps: steps.len(),
                error: None,
            },
            Err(e) => TargetCheck {
                target,
                steps: 0,
                error: Some(e.to_string()),
            },
        });
    }

    if manifest.build.targets.len() == 1 {
        report
            .warnings
            .push("only one target configured; cross-platform breakage will go unnoticed".to_string());
    }

    report
}
