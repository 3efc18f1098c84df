//! Build factories and the step-sequence builder
//!
//! A factory is the ordered container of steps for one build configuration.
//! The sequence is fixed: resolve properties, unlink the old SDK link, check
//! out source and dependency bundle, relink, configure, compile. Only the
//! compile step differs per target; the count and order never do.

use std::collections::BTreeMap;

use crate::config::defaults::{GIT_STEP_TIMEOUT_SECS, MSBUILD_SOLUTION_PREFIX, SDK_DIR};
use crate::core::properties::PropertyValue;
use crate::core::step::{BuildStep, RenderedStep};
use crate::core::target::{BuildTarget, TargetFamily};
use crate::core::template::Template;
use crate::error::PlanError;

/// Number of steps every populated factory carries
pub const STEP_COUNT: usize = 7;

/// Ordered container of build steps for one build configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFactory {
    steps: Vec<BuildStep>,
}

impl BuildFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn add_step(&mut self, step: BuildStep) {
        self.steps.push(step);
    }

    /// The steps, in append order
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// Number of steps appended so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps have been appended yet
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render every step against a resolved property map, in order
    pub fn render(
        &self,
        props: &BTreeMap<String, PropertyValue>,
    ) -> Result<Vec<RenderedStep>, PlanError> {
        self.steps.iter().map(|step| step.render(props)).collect()
    }
}

/// Append the steps common to every target.
///
/// The pre-existing SDK link is removed first so the source checkout does
/// not follow it and wipe the shared bundle. Dependencies are symlinked
/// rather than kept as a submodule so several source trees on one worker
/// share a single bundle checkout.
pub fn add_common_steps(factory: &mut BuildFactory) {
    factory.add_step(BuildStep::ResolveProperties {
        name: "set properties".to_string(),
    });

    factory.add_step(BuildStep::Shell {
        name: "unlink dependencies".to_string(),
        command_property: "rm_sdklink_cmd".to_string(),
        warn_on_failure: true,
    });

    factory.add_step(BuildStep::GitCheckout {
        name: "get code".to_string(),
        repo_url: Template::new("git@${repository}"),
        branch: Template::new("${branch}"),
        workdir: Template::new("build/${project}"),
        timeout_secs: GIT_STEP_TIMEOUT_SECS,
        always_use_latest: false,
    });

    factory.add_step(BuildStep::GitCheckout {
        name: "get dependencies".to_string(),
        repo_url: Template::new("git@${sdk_repo_url}"),
        branch: Template::new("${branch}"),
        workdir: Template::new(format!("build/{SDK_DIR}")),
        timeout_secs: GIT_STEP_TIMEOUT_SECS,
        always_use_latest: true,
    });

    factory.add_step(BuildStep::Shell {
        name: "link dependencies".to_string(),
        command_property: "mk_sdklink_cmd".to_string(),
        warn_on_failure: false,
    });

    factory.add_step(BuildStep::CmakeConfigure {
        name: "configure".to_string(),
        source_dir: Template::new("../${project}"),
        generator: Template::new("${cmake_generator}"),
        options: vec![Template::new("-DCMAKE_TOOLCHAIN_FILE=${toolchain_path}")],
        workdir: Template::new("build/${target}_${config}"),
    });
}

/// Populate a factory with the common steps plus a compile step, handing
/// back the factory it received.
pub fn populate(mut factory: BuildFactory, compile: BuildStep) -> BuildFactory {
    add_common_steps(&mut factory);
    factory.add_step(compile);
    factory
}

/// The target-specific compile step
pub fn compile_step(target: BuildTarget, jobs: usize) -> BuildStep {
    match target.family() {
        TargetFamily::Windows => BuildStep::MsBuild {
            name: "compile".to_string(),
            platform: Template::new("${vs_platform}"),
            config: Template::new("${config}"),
            solution: Template::new(format!("{MSBUILD_SOLUTION_PREFIX}_${{solution_tag}}.sln")),
            workdir: Template::new("build/${target}_${config}"),
        },
        TargetFamily::Linux => BuildStep::Make {
            name: "compile".to_string(),
            jobs,
            workdir: Template::new("build/${target}_${config}"),
        },
    }
}

/// The fully populated factory for a target
pub fn compile_factory(target: BuildTarget, jobs: usize) -> BuildFactory {
    populate(BuildFactory::new(), compile_step(target, jobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::BuildRequest;
    use proptest::prelude::*;

    fn request_for(target: BuildTarget) -> BuildRequest {
        BuildRequest::new(target.id())
            .with_repository("github.com/example/engine.git")
            .with_sdk_repo_url("github.com/example/sdks.git")
    }

    #[test]
    fn test_populated_factory_has_fixed_step_count() {
        for target in BuildTarget::ALL {
            let factory = compile_factory(target, 8);
            assert_eq!(factory.len(), STEP_COUNT, "target {target}");
        }
    }

    #[test]
    fn test_step_order_is_deterministic() {
        let expected = [
            "set properties",
            "unlink dependencies",
            "get code",
            "get dependencies",
            "link dependencies",
            "configure",
            "compile",
        ];
        for target in BuildTarget::ALL {
            let factory = compile_factory(target, 4);
            let names: Vec<&str> = factory.steps().iter().map(BuildStep::name).collect();
            assert_eq!(names, expected, "target {target}");
        }
    }

    #[test]
    fn test_populate_hands_back_the_given_factory() {
        let mut factory = BuildFactory::new();
        factory.add_step(BuildStep::ResolveProperties {
            name: "pre-existing".to_string(),
        });
        let populated = populate(factory, compile_step(BuildTarget::WinX64, 1));
        assert_eq!(populated.len(), STEP_COUNT + 1);
        assert_eq!(populated.steps()[0].name(), "pre-existing");
    }

    #[test]
    fn test_windows_targets_compile_with_msbuild() {
        let step = compile_step(BuildTarget::WinX64, 8);
        assert_eq!(step.kind(), "msbuild");
        let step = compile_step(BuildTarget::WinX86, 8);
        assert_eq!(step.kind(), "msbuild");
    }

    #[test]
    fn test_linux_targets_compile_with_make() {
        assert_eq!(compile_step(BuildTarget::LinuxX64Gcc, 8).kind(), "make");
        assert_eq!(compile_step(BuildTarget::LinuxX64Clang, 8).kind(), "make");
    }

    #[test]
    fn test_win_x64_plan_renders_end_to_end() {
        let map = request_for(BuildTarget::WinX64).property_map().unwrap();
        let rendered = compile_factory(BuildTarget::WinX64, 8).render(&map).unwrap();

        assert_eq!(rendered.len(), STEP_COUNT);
        match &rendered[6] {
            RenderedStep::MsBuild {
                platform,
                solution,
                workdir,
                config,
                ..
            } => {
                assert_eq!(platform, "x64");
                assert_eq!(solution, "CryEngine_CMake_Win64.sln");
                assert_eq!(workdir, "build/win_x64_Release");
                assert_eq!(config, "Release");
            }
            other => panic!("expected msbuild step, got {other:?}"),
        }
        match &rendered[5] {
            RenderedStep::CmakeConfigure {
                generator, options, ..
            } => {
                assert_eq!(generator, "Visual Studio 14 2015 Win64");
                assert_eq!(
                    options,
                    &vec![
                        "-DCMAKE_TOOLCHAIN_FILE=Tools/CMake/toolchain/windows/WindowsPC-MSVC.cmake"
                            .to_string()
                    ]
                );
            }
            other => panic!("expected cmake step, got {other:?}"),
        }
    }

    #[test]
    fn test_linux_clang_plan_renders_end_to_end() {
        let map = request_for(BuildTarget::LinuxX64Clang)
            .property_map()
            .unwrap();
        let rendered = compile_factory(BuildTarget::LinuxX64Clang, 16)
            .render(&map)
            .unwrap();

        match &rendered[4] {
            RenderedStep::Shell { command, .. } => assert_eq!(
                command,
                &PropertyValue::Argv(vec![
                    "ln".to_string(),
                    "-sfn".to_string(),
                    "ce_sdks".to_string(),
                    "CRYENGINE/Code/SDKs".to_string(),
                ])
            ),
            other => panic!("expected shell step, got {other:?}"),
        }
        match &rendered[6] {
            RenderedStep::Make { jobs, workdir, .. } => {
                assert_eq!(*jobs, 16);
                assert_eq!(workdir, "build/linux_x64_clang_Release");
            }
            other => panic!("expected make step, got {other:?}"),
        }
    }

    #[test]
    fn test_render_fails_without_repository_property() {
        let map = BuildRequest::new("win_x64").property_map().unwrap();
        let err = compile_factory(BuildTarget::WinX64, 1)
            .render(&map)
            .unwrap_err();
        assert!(matches!(err, PlanError::Template(_)));
    }

    #[test]
    fn test_dependency_checkout_always_uses_latest() {
        let factory = compile_factory(BuildTarget::LinuxX64Gcc, 1);
        match &factory.steps()[3] {
            BuildStep::GitCheckout {
                always_use_latest,
                timeout_secs,
                ..
            } => {
                assert!(always_use_latest);
                assert_eq!(*timeout_secs, GIT_STEP_TIMEOUT_SECS);
            }
            other => panic!("expected git step, got {other:?}"),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Step count and order are independent of target and job count
        #[test]
        fn prop_step_sequence_is_fixed(index in 0usize..4, jobs in 1usize..=64) {
            let factory = compile_factory(BuildTarget::ALL[index], jobs);
            prop_assert_eq!(factory.len(), STEP_COUNT);
            prop_assert_eq!(factory.steps()[0].kind(), "properties");
            prop_assert_eq!(factory.steps()[5].kind(), "cmake");
        }

        /// A fully populated request renders every target's plan
        #[test]
        fn prop_full_requests_always_render(
            index in 0usize..4,
            branch in "[a-z][a-z0-9/_-]{0,15}",
            config in "(Debug|Release|Profile)",
        ) {
            let target = BuildTarget::ALL[index];
            let map = request_for(target)
                .with_branch(branch)
                .with_config(config)
                .property_map()
                .unwrap();
            let rendered = compile_factory(target, 4).render(&map);
            prop_assert!(rendered.is_ok());
            prop_assert_eq!(rendered.unwrap().len(), STEP_COUNT);
        }
    }
}
