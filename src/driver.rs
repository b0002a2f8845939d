//! The member dump pipeline: discover -> parse -> print.
//!
//! Every matched file is read, parsed on its own and its first construct's
//! members are written to the output, one per line. The first failure stops
//! the run; whatever was printed for earlier files stays printed.

use crate::config::Settings;
use crate::discovery::IdlFileWalker;
use crate::error::{ErrorContext, IdlError, IdlResult};
use crate::parsing::{Definition, DefinitionKind, Definitions, IdlParser, Member, MemberKind};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How each member is rendered in line output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberStyle {
    /// Normalized IDL declaration, e.g. `[CEReactions] attribute DOMString target;`
    #[default]
    Declaration,
    /// Member name only; unnamed members fall back to their declaration
    Name,
}

impl MemberStyle {
    fn render(self, member: &Member) -> String {
        match (self, member.name()) {
            (Self::Name, Some(name)) => name.to_string(),
            _ => member.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub files: usize,
    pub members: usize,
}

/// Structured view of one processed file, used for `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub construct: String,
    pub kind: DefinitionKind,
    pub members: Vec<MemberReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberReport {
    pub kind: MemberKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub declaration: String,
}

impl From<&Member> for MemberReport {
    fn from(member: &Member) -> Self {
        Self {
            kind: member.kind(),
            name: member.name().map(str::to_string),
            declaration: member.to_string(),
        }
    }
}

/// Run the pipeline over the files matched by the configured pattern.
pub fn run<W: Write>(settings: &Settings, style: MemberStyle, out: &mut W) -> IdlResult<RunSummary> {
    let files = IdlFileWalker::from_config(&settings.discovery).walk()?;
    run_files(&files, style, out)
}

/// Print the members of every file's first construct, in file order.
pub fn run_files<W: Write>(
    files: &[PathBuf],
    style: MemberStyle,
    out: &mut W,
) -> IdlResult<RunSummary> {
    let parser = IdlParser::new();
    let mut summary = RunSummary::default();

    for path in files {
        let definitions = read_and_parse(&parser, path)?;
        let construct = first_construct(&definitions, path)?;

        for member in construct.members() {
            writeln!(out, "{}", style.render(member))?;
        }
        out.flush()?;

        tracing::debug!(
            path = %path.display(),
            construct = %construct,
            members = construct.members().len(),
            "processed file"
        );
        summary.files += 1;
        summary.members += construct.members().len();
    }

    tracing::info!(files = summary.files, members = summary.members, "run finished");
    Ok(summary)
}

/// Same traversal as [`run_files`], collecting reports instead of printing.
pub fn collect_reports(files: &[PathBuf]) -> IdlResult<Vec<FileReport>> {
    let parser = IdlParser::new();
    files
        .iter()
        .map(|path| {
            let definitions = read_and_parse(&parser, path)?;
            let construct = first_construct(&definitions, path)?;
            Ok(FileReport {
                path: path.clone(),
                construct: construct.name().to_string(),
                kind: construct.kind(),
                members: construct.members().iter().map(MemberReport::from).collect(),
            })
        })
        .collect()
}

/// Read a whole file and parse it into a fresh set of definitions.
pub fn read_and_parse(parser: &IdlParser, path: &Path) -> IdlResult<Definitions> {
    let bytes = std::fs::read(path).map_err(|source| IdlError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parser.parse_bytes(&bytes).with_path(path)
}

pub fn first_construct<'a>(definitions: &'a Definitions, path: &Path) -> IdlResult<&'a Definition> {
    definitions.first().ok_or_else(|| IdlError::NoConstructs {
        path: path.to_path_buf(),
    })
}
