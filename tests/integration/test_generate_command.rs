//! End-to-end tests for wrapper generation.

use crate::common::{FOO_ELEMENT, TestProject, fixture, stderr_of, stdout_of};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_generate_writes_structs_and_mod_file() {
    let project = TestProject::new();
    project.add_idl("HTMLAnchorElement.idl", &fixture("HTMLAnchorElement.idl"));
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run(&["generate", "--sort"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "Generated HTMLAnchorElement -> html_anchor_element.rs\n\
         Generated HTMLFooElement -> html_foo_element.rs\n\
         Generated mod file. All good to go!\n"
    );

    let elements = project.path().join("src/elements");
    assert_eq!(
        fs::read_to_string(elements.join("mod.rs")).unwrap(),
        "mod html_anchor_element;\nmod html_foo_element;\n"
    );
    assert_eq!(
        fs::read_to_string(elements.join("html_anchor_element.rs")).unwrap(),
        "#[allow(dead_code)]\n\
         pub struct HTMLAnchorElement {\n    \
         target: String,\n    \
         download: String,\n    \
         ping: String,\n    \
         rel: String,\n    \
         rel_list: DOMTokenList,\n    \
         hreflang: String,\n    \
         type_: String,\n    \
         text: String,\n    \
         referrer_policy: String,\n\
         }\n"
    );
}

#[test]
fn test_out_dir_and_type_map_from_settings() {
    let project = TestProject::new();
    project.add_idl("HTMLSelectElement.idl", &fixture("HTMLSelectElement.idl"));
    project.add_file(
        "tools/.htmlidl/settings.toml",
        "[codegen.type_map]\nHTMLOptionsCollection = \"crate::collections::Options\"\n",
    );

    let output = project.run(&["generate", "--out-dir", "generated"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let source = fs::read_to_string(
        project
            .tools_dir()
            .join("generated/html_select_element.rs"),
    )
    .unwrap();
    assert!(source.contains("    form: Option<HTMLFormElement>,\n"));
    assert!(source.contains("    size: u32,\n"));
    assert!(source.contains("    options: crate::collections::Options,\n"));
    assert!(source.contains("    selected_index: i32,\n"));
    assert!(!source.contains("check_validity"));
}

#[test]
fn test_dry_run_prints_without_writing() {
    let project = TestProject::new();
    project.add_idl("HTMLFooElement.idl", FOO_ELEMENT);

    let output = project.run(&["generate", "--dry-run"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "// html_foo_element.rs\n\
         #[allow(dead_code)]\n\
         pub struct HTMLFooElement {\n    \
         bar: String,\n\
         }\n\n"
    );
    assert!(!project.path().join("src/elements").exists());
}

#[test]
fn test_non_interface_construct_is_unsupported() {
    let project = TestProject::new();
    project.add_idl(
        "HTMLModeElement.idl",
        "enum HTMLModeElement { \"a\", \"b\" };",
    );

    let output = project.run(&["generate"]);

    assert_eq!(output.status.code(), Some(8));
    assert!(stderr_of(&output).contains("is not an interface (found enum)"));
}
