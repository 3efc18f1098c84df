//! Integration tests for `forgeplan resolve`

mod common;

use common::{stderr, stdout, TestProject};

#[test]
fn test_resolve_win_x64() {
    let project = TestProject::new();
    let output = project.run(&["resolve", "win_x64"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("vs_platform = x64"));
    assert!(text.contains("solution_tag = Win64"));
    assert!(text.contains("WindowsPC-MSVC.cmake"));
}

#[test]
fn test_resolve_defaults_project_name() {
    let project = TestProject::new();
    let text = stdout(&project.run(&["resolve", "linux_x64_gcc"]));
    assert!(text.contains("project = CRYENGINE"));
}

#[test]
fn test_resolve_with_project_override() {
    let project = TestProject::new();
    let text = stdout(&project.run(&["resolve", "linux_x64_clang", "--project", "Hunt"]));
    assert!(text.contains("project = Hunt"));
    assert!(text.contains("Hunt/Code/SDKs"));
}

#[test]
fn test_resolve_unknown_target_fails() {
    let project = TestProject::new();
    let output = project.run(&["resolve", "win_arm64"]);

    assert!(!output.status.success());
    let text = stderr(&output);
    assert!(text.contains("win_arm64"));
    // The error names the full supported set
    assert!(text.contains("linux_x64_clang"));
}

#[test]
fn test_resolve_json_linux_clang() {
    let project = TestProject::new();
    let output = project.run(&["resolve", "linux_x64_clang", "--json"]);

    assert!(output.status.success());
    let properties: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(properties["target"], "linux_x64_clang");
    assert_eq!(properties["cmake_generator"], "Unix Makefiles");
    assert_eq!(
        properties["mk_sdklink_cmd"],
        serde_json::json!(["ln", "-sfn", "ce_sdks", "CRYENGINE/Code/SDKs"])
    );
    // Platform fields stay Windows-only
    assert!(properties.get("vs_platform").is_none());
}

#[test]
fn test_resolve_json_win_x86() {
    let project = TestProject::new();
    let output = project.run(&["resolve", "win_x86", "--json"]);

    assert!(output.status.success());
    let properties: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(properties["vs_platform"], "Win32");
    assert_eq!(properties["cmake_generator"], "Visual Studio 14 2015");
    assert_eq!(
        properties["rm_sdklink_cmd"],
        "if exist CRYENGINE\\Code\\SDKs rmdir CRYENGINE\\Code\\SDKs"
    );
}
