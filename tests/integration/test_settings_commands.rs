//! `init`, `config` and settings file discovery.

use crate::common::{FOO_ELEMENT, TestProject, stderr_of, stdout_of};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_init_creates_settings_once() {
    let project = TestProject::new();

    let output = project.run(&["init"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Created configuration file at"));

    let settings = project.tools_dir().join(".htmlidl/settings.toml");
    let contents = fs::read_to_string(&settings).unwrap();
    assert!(contents.contains("pattern = \"../idl/HTML*Element.idl\""));

    let again = project.run(&["init"]);
    assert_eq!(again.status.code(), Some(6));
    assert!(stderr_of(&again).contains("--force"));

    let forced = project.run(&["init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn test_config_shows_effective_settings() {
    let project = TestProject::new();
    project.add_file(
        "tools/.htmlidl/settings.toml",
        "[discovery]\nsort = true\n\n[logging]\nlevel = \"info\"\n",
    );

    let output = project.run_with_env(&["config"], &[("HTMLIDL_LOGGING__LEVEL", "debug")]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Current Configuration:\n"));
    assert!(stdout.contains("sort = true"));
    assert!(stdout.contains("pattern = \"../idl/HTML*Element.idl\""));
    // Environment wins over the file
    assert!(stdout.contains("level = \"debug\""));
}

#[test]
fn test_settings_found_in_parent_directory() {
    let project = TestProject::new();
    project.add_file("idl-alt/HTMLFooElement.idl", FOO_ELEMENT);
    project.add_file(
        ".htmlidl/settings.toml",
        "[discovery]\npattern = \"../idl-alt/HTML*Element.idl\"\n",
    );

    // Run from tools/; the settings live one level up
    let output = project.run(&["members", "--names"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
}

#[test]
fn test_explicit_config_flag() {
    let project = TestProject::new();
    project.add_file("other/HTMLFooElement.idl", FOO_ELEMENT);
    let config = project.add_file(
        "custom.toml",
        "[discovery]\npattern = \"../other/HTML*Element.idl\"\n",
    );

    let output = project.run(&["-c", config.to_str().unwrap(), "members", "--names"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
}

#[test]
fn test_malformed_settings_file_is_config_error() {
    let project = TestProject::new();
    project.add_file("tools/.htmlidl/settings.toml", "[discovery\npattern = 3\n");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(6));
    assert!(stderr_of(&output).contains("Invalid configuration"));
}
