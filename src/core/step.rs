//! Build step definitions
//!
//! Steps describe work for the external orchestrator; forgeplan never
//! executes them. Fields that depend on request properties are `${name}`
//! templates, rendered into concrete [`RenderedStep`]s at plan time.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::properties::PropertyValue;
use crate::core::template::Template;
use crate::error::PlanError;

/// One step in a build factory, in template form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Resolve the property record on the worker before anything else runs
    ResolveProperties {
        name: String,
    },

    /// Run a shell command taken from a named build property
    Shell {
        name: String,
        /// Property holding the command (shell string or argv list)
        command_property: String,
        /// Report failure as a warning instead of failing the build
        warn_on_failure: bool,
    },

    /// Check out a git repository
    GitCheckout {
        name: String,
        repo_url: Template,
        branch: Template,
        workdir: Template,
        timeout_secs: u64,
        /// Ignore the requested revision and fetch the tip of the branch
        always_use_latest: bool,
    },

    /// Run the CMake configure step
    CmakeConfigure {
        name: String,
        source_dir: Template,
        generator: Template,
        options: Vec<Template>,
        workdir: Template,
    },

    /// Compile through MSBuild (Windows targets)
    MsBuild {
        name: String,
        platform: Template,
        config: Template,
        solution: Template,
        workdir: Template,
    },

    /// Compile through make (Linux targets)
    Make {
        name: String,
        jobs: usize,
        workdir: Template,
    },
}

impl BuildStep {
    /// Step name shown by the orchestrator
    pub fn name(&self) -> &str {
        match self {
            Self::ResolveProperties { name }
            | Self::Shell { name, .. }
            | Self::GitCheckout { name, .. }
            | Self::CmakeConfigure { name, .. }
            | Self::MsBuild { name, .. }
            | Self::Make { name, .. } => name,
        }
    }

    /// Short step kind tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ResolveProperties { .. } => "properties",
            Self::Shell { .. } => "shell",
            Self::GitCheckout { .. } => "git",
            Self::CmakeConfigure { .. } => "cmake",
            Self::MsBuild { .. } => "msbuild",
            Self::Make { .. } => "make",
        }
    }

    /// Render the step against a resolved property map
    pub fn render(&self, props: &BTreeMap<String, PropertyValue>) -> Result<RenderedStep, PlanError> {
        match self {
            Self::ResolveProperties { name } => Ok(RenderedStep::ResolveProperties {
                name: name.clone(),
                properties: props.clone(),
            }),
            Self::Shell {
                name,
                command_property,
                warn_on_failure,
            } => {
                let command = props.get(command_property).cloned().ok_or_else(|| {
                    PlanError::MissingCommandProperty {
                        step: name.clone(),
                        property: command_property.clone(),
                    }
                })?;
                Ok(RenderedStep::Shell {
                    name: name.clone(),
                    command,
                    warn_on_failure: *warn_on_failure,
                })
            }
            Self::GitCheckout {
                name,
                repo_url,
                branch,
                workdir,
                timeout_secs,
                always_use_latest,
            } => Ok(RenderedStep::GitCheckout {
                name: name.clone(),
                repo_url: repo_url.render(props)?,
                branch: branch.render(props)?,
                workdir: workdir.render(props)?,
                timeout_secs: *timeout_secs,
                always_use_latest: *always_use_latest,
            }),
            Self::CmakeConfigure {
                name,
                source_dir,
                generator,
                options,
                workdir,
            } => Ok(RenderedStep::CmakeConfigure {
                name: name.clone(),
                source_dir: source_dir.render(props)?,
                generator: generator.render(props)?,
                options: options
                    .iter()
                    .map(|option| option.render(props))
                    .collect::<Result<Vec<_>, _>>()?,
                workdir: workdir.render(props)?,
            }),
            Self::MsBuild {
                name,
                platform,
                config,
                solution,
                workdir,
            } => Ok(RenderedStep::MsBuild {
                name: name.clone(),
                platform: platform.render(props)?,
                config: config.render(props)?,
                solution: solution.render(props)?,
                workdir: workdir.render(props)?,
            }),
            Self::Make { name, jobs, workdir } => Ok(RenderedStep::Make {
                name: name.clone(),
                jobs: *jobs,
                workdir: workdir.render(props)?,
            }),
        }
    }
}

/// A step with every template resolved, ready for handoff or display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum RenderedStep {
    #[serde(rename = "properties")]
    ResolveProperties {
        name: String,
        properties: BTreeMap<String, PropertyValue>,
    },
    #[serde(rename = "shell")]
    Shell {
        name: String,
        command: PropertyValue,
        warn_on_failure: bool,
    },
    #[serde(rename = "git")]
    GitCheckout {
        name: String,
        repo_url: String,
        branch: String,
        workdir: String,
        timeout_secs: u64,
        always_use_latest: bool,
    },
    #[serde(rename = "cmake")]
    CmakeConfigure {
        name: String,
        source_dir: String,
        generator: String,
        options: Vec<String>,
        workdir: String,
    },
    #[serde(rename = "msbuild")]
    MsBuild {
        name: String,
        platform: String,
        config: String,
        solution: String,
        workdir: String,
    },
    #[serde(rename = "make")]
    Make {
        name: String,
        jobs: usize,
        workdir: String,
    },
}

impl RenderedStep {
    /// Step name shown by the orchestrator
    pub fn name(&self) -> &str {
        match self {
            Self::ResolveProperties { name, .. }
            | Self::Shell { name, .. }
            | Self::GitCheckout { name, .. }
            | Self::CmakeConfigure { name, .. }
            | Self::MsBuild { name, .. }
            | Self::Make { name, .. } => name,
        }
    }

    /// One-line human-readable summary for plan display
    pub fn summary(&self) -> String {
        match self {
            Self::ResolveProperties { properties, .. } => {
                format!("resolve {} properties", properties.len())
            }
            Self::Shell { command, .. } => match command {
                PropertyValue::Str(line) => line.clone(),
                PropertyValue::Argv(argv) => argv.join(" "),
            },
            Self::GitCheckout {
                repo_url,
                branch,
                workdir,
                ..
            } => format!("{repo_url} @ {branch} -> {workdir}"),
            Self::CmakeConfigure {
                generator, workdir, ..
            } => format!("cmake -G '{generator}' in {workdir}"),
            Self::MsBuild {
                solution,
                platform,
                config,
                ..
            } => format!("msbuild {solution} /p:Platform={platform} /p:Configuration={config}"),
            Self::Make { jobs, workdir, .. } => format!("make -j{jobs} in {workdir}"),
        }
    }
}
