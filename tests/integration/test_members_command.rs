//! End-to-end tests for member printing, the default command.

use crate::common::{FOO_ELEMENT, TestProject, fixture, stderr_of, stdout_of};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn test_no_arguments_reads_sibling_idl_directory() {
    let project = TestProject::new();
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run(&[]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "[CEReactions] attribute DOMString bar;\nundefined baz();\n"
    );
}

#[test]
fn test_names_flag_prints_bare_names() {
    let project = TestProject::new();
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run(&["members", "--names"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
}

#[test]
fn test_missing_idl_directory_is_success_with_no_output() {
    let project = TestProject::new();

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_only_html_element_files_are_read() {
    let project = TestProject::new();
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);
    project.add_idl("Document.idl", "interface Document { attribute long skipped; };");
    project.add_idl("HTMLCollection.idl", "interface HTMLCollection { attribute long skipped; };");

    let output = project.run(&["members", "--names"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
}

#[test]
fn test_sorted_files_keep_members_apart() {
    let project = TestProject::new();
    project.add_idl(
        "HTMLBElement.idl",
        "interface HTMLBElement { attribute long second; };",
    );
    project.add_idl(
        "HTMLAElement.idl",
        "interface HTMLAElement { attribute long first; undefined alsoFirst(); };",
    );

    let output = project.run(&["members", "--sort", "--names"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "first\nalsoFirst\nsecond\n");
}

#[test]
fn test_explicit_pattern_argument() {
    let project = TestProject::new();
    project.add_file(
        "specs/html/HTMLAnchorElement.idl",
        &fixture("HTMLAnchorElement.idl"),
    );

    let output = project.run(&["members", "../specs/**/HTML*Element.idl", "--names"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let names: Vec<String> = stdout_of(&output).lines().map(str::to_string).collect();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "[HTMLConstructor] constructor();");
    assert_eq!(names[1], "target");
    assert_eq!(names[5], "relList");
    assert_eq!(names[9], "referrerPolicy");
}

#[test]
fn test_pattern_from_environment() {
    let project = TestProject::new();
    project.add_file("webidl/HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run_with_env(
        &["members", "--names"],
        &[("HTMLIDL_DISCOVERY__PATTERN", "../webidl/HTML*Element.idl")],
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
}

#[test]
fn test_file_without_constructs_stops_the_run() {
    let project = TestProject::new();
    project.add_idl("HTMLAaElement.idl", FOO_ELEMENT);
    project.add_idl("HTMLMmElement.idl", "// only a comment\n/* and another */\n");
    project.add_idl(
        "HTMLZzElement.idl",
        "interface HTMLZzElement { attribute long never; };",
    );

    let output = project.run(&["members", "--sort", "--names"]);

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("HTMLMmElement.idl"));
    assert!(stderr.contains("contains no definitions"));
}

#[test]
fn test_syntax_error_reports_location() {
    let project = TestProject::new();
    project.add_idl(
        "HTMLBadElement.idl",
        "interface HTMLBadElement {\n  attribute DOMString a\n};\n",
    );

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stdout_of(&output).is_empty());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("line 3, column 1"), "stderr: {stderr}");
    assert!(stderr.contains("Suggestion:"));
}

#[test]
fn test_invalid_utf8_is_a_parse_error() {
    let project = TestProject::new();
    project.add_file("idl/HTMLBinElement.idl", [0xff, 0xfe, 0x00, 0x41]);

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr_of(&output).contains("Invalid UTF-8"));
}

#[test]
fn test_invalid_pattern_is_config_error() {
    let project = TestProject::new();

    let output = project.run(&["members", "../idl/HTML[Element.idl"]);

    assert_eq!(output.status.code(), Some(6));
    assert!(stderr_of(&output).contains("Invalid file pattern"));
}

#[test]
fn test_json_output() {
    let project = TestProject::new();
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run(&["members", "--json"]);

    assert!(output.status.success());
    let value: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["exit_code"], 0);
    assert_eq!(value["meta"]["files"], 1);

    let file = &value["data"][0];
    assert_eq!(file["construct"], "HTMLFooElement");
    assert_eq!(file["kind"], "interface");
    assert_eq!(file["members"][0]["name"], "bar");
    assert_eq!(file["members"][0]["kind"], "attribute");
    assert_eq!(
        file["members"][0]["declaration"],
        "[CEReactions] attribute DOMString bar;"
    );
    assert_eq!(file["members"][1]["kind"], "operation");
}

#[test]
fn test_json_error_envelope_on_stderr() {
    let project = TestProject::new();
    project.add_idl("HTMLEmptyElement.idl", "");

    let output = project.run(&["members", "--json"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stdout_of(&output).is_empty());
    let value: Value = serde_json::from_str(&stderr_of(&output)).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["code"], "NO_CONSTRUCTS");
    assert_eq!(value["exit_code"], 4);
}

#[test]
fn test_verbose_logs_go_to_stderr_only() {
    let project = TestProject::new();
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run(&["-v", "members", "--names"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
    assert!(stderr_of(&output).contains("run finished"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_matching_file_stops_the_run() {
    let project = TestProject::new();
    project.add_idl("HTMLAaElement.idl", FOO_ELEMENT);
    project.add_idl(
        "HTMLZzElement.idl",
        "interface HTMLZzElement { attribute long never; };",
    );
    let idl = project.path().join("idl");
    std::os::unix::fs::symlink(idl.join("gone.idl"), idl.join("HTMLMmElement.idl")).unwrap();

    let output = project.run(&["members", "--sort", "--names"]);

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout_of(&output), "bar\nbaz\n");
    assert!(stderr_of(&output).contains("HTMLMmElement.idl"));
}
