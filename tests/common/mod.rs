use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway workspace laid out like the real one: IDL files in `idl/`,
/// the tool run from a sibling `tools/` directory.
pub struct TestProject {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        fs::create_dir_all(project.tools_dir()).expect("Failed to create tools dir");
        project
    }

    pub fn add_file(&self, path: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn add_idl(&self, name: &str, content: &str) -> PathBuf {
        self.add_file(&format!("idl/{name}"), content)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.dir.path().join("tools")
    }

    /// Run the binary from `tools/` with a clean `HTMLIDL_*` environment.
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_htmlidl"));
        cmd.args(args).current_dir(self.tools_dir()).env("NO_COLOR", "1");
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("HTMLIDL_") {
                cmd.env_remove(key);
            }
        }
        cmd.envs(env.iter().copied());
        cmd.output().expect("Failed to run htmlidl")
    }
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/idl")
        .join(name);
    fs::read_to_string(&path).expect("Failed to read fixture")
}

#[allow(dead_code)]
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[allow(dead_code)]
pub const FOO_ELEMENT: &str = r#"
[Exposed=Window]
interface HTMLFooElement : HTMLElement {
  [CEReactions] attribute DOMString bar;
  undefined baz();
};
"#;
