//! Incoming build requests
//!
//! A build request is what the scheduler hands over for one build: a raw
//! target identifier plus optional overrides. Resolution turns it into the
//! full property map the step sequence renders from; each request gets a
//! fresh map, nothing is shared across invocations.

use std::collections::BTreeMap;

use crate::config::defaults::{DEFAULT_BRANCH, DEFAULT_BUILD_CONFIG};
use crate::core::properties::{BuildProperties, PropertyValue};
use crate::core::target::BuildTarget;
use crate::error::TargetError;

/// One build request, as received from the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Raw target identifier
    pub target: String,
    /// Project name; defaults when absent
    pub project: Option<String>,
    /// Branch to build; defaults when absent
    pub branch: Option<String>,
    /// Build configuration (e.g. Debug, Release); defaults when absent
    pub config: Option<String>,
    /// Source repository, host-relative (interpolated into git@${repository})
    pub repository: Option<String>,
    /// Dependency bundle repository
    pub sdk_repo_url: Option<String>,
}

impl BuildRequest {
    /// Create a request for a target with no overrides
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            project: None,
            branch: None,
            config: None,
            repository: None,
            sdk_repo_url: None,
        }
    }

    /// Set the project name
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Set the branch
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Set the build configuration
    #[must_use]
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Set the source repository
    #[must_use]
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Set the dependency bundle repository
    #[must_use]
    pub fn with_sdk_repo_url(mut self, url: impl Into<String>) -> Self {
        self.sdk_repo_url = Some(url.into());
        self
    }

    /// Parse the raw target identifier
    pub fn resolve_target(&self) -> Result<BuildTarget, TargetError> {
        self.target.parse()
    }

    /// Resolve the target-derived property record for this request
    pub fn resolve_properties(&self) -> Result<BuildProperties, TargetError> {
        let target = self.resolve_target()?;
        Ok(BuildProperties::resolve(target, self.project.as_deref()))
    }

    /// Build the full property map steps interpolate from.
    ///
    /// Combines the target-derived record with the request-level properties.
    /// Branch and configuration fall back to fixed defaults; repository
    /// coordinates have no default and are simply absent when not supplied,
    /// which surfaces as an interpolation error at render time.
    pub fn property_map(&self) -> Result<BTreeMap<String, PropertyValue>, TargetError> {
        let mut map = self.resolve_properties()?.to_map();

        map.insert(
            "branch".to_string(),
            PropertyValue::from(self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)),
        );
        map.insert(
            "config".to_string(),
            PropertyValue::from(self.config.as_deref().unwrap_or(DEFAULT_BUILD_CONFIG)),
        );
        if let Some(ref repository) = self.repository {
            map.insert("repository".to_string(), PropertyValue::from(repository.clone()));
        }
        if let Some(ref sdk_repo_url) = self.sdk_repo_url {
            map.insert("sdk_repo_url".to_string(), PropertyValue::from(sdk_repo_url.clone()));
        }

        Ok(map)
    }
}
