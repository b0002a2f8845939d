//! Rust wrapper generation for HTML element interfaces
//!
//! Each interface becomes a plain struct with one field per (non-static)
//! attribute, written to `<snake_case name>.rs`. After all files are written a
//! `mod.rs` declaring every generated module is emitted next to them.

pub mod types;

pub use types::{RustTypeMapper, field_name, snake_case};

use crate::config::Settings;
use crate::discovery::IdlFileWalker;
use crate::driver::{first_construct, read_and_parse};
use crate::error::{IdlError, IdlResult};
use crate::parsing::{IdlParser, Interface};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Source for one interface, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWrapper {
    pub interface: String,
    pub module: String,
    pub source: String,
}

impl GeneratedWrapper {
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module)
    }
}

/// Renders wrapper structs from parsed interfaces.
#[derive(Debug, Clone, Default)]
pub struct WrapperGenerator {
    types: RustTypeMapper,
}

impl WrapperGenerator {
    pub fn new(types: RustTypeMapper) -> Self {
        Self { types }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(RustTypeMapper::new(settings.codegen.type_map.clone()))
    }

    pub fn generate(&self, interface: &Interface) -> GeneratedWrapper {
        let mut source = format!("#[allow(dead_code)]\npub struct {} {{\n", interface.name);
        for attribute in interface.attributes() {
            source.push_str(&format!(
                "    {}: {},\n",
                field_name(&attribute.name),
                self.types.map(&attribute.type_)
            ));
        }
        source.push_str("}\n");

        GeneratedWrapper {
            interface: interface.name.clone(),
            module: snake_case(&interface.name),
            source,
        }
    }
}

/// `mod a;` line per module, in the given order.
pub fn render_mod_file(modules: &[String]) -> String {
    modules.iter().map(|m| format!("mod {m};\n")).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    /// Print sources instead of writing files
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateSummary {
    pub modules: Vec<String>,
    pub mod_file: Option<PathBuf>,
}

/// Generate wrappers for every file matching the configured pattern.
///
/// Progress lines (`Generated X -> x.rs`) and, with `dry_run`, the generated
/// sources are written to `out`. Any failure stops the run; files written
/// before the failure stay on disk.
pub fn generate_wrappers<W: Write>(
    settings: &Settings,
    options: GenerateOptions,
    out: &mut W,
) -> IdlResult<GenerateSummary> {
    let files = IdlFileWalker::from_config(&settings.discovery).walk()?;
    generate_from_files(&files, settings, options, out)
}

pub fn generate_from_files<W: Write>(
    files: &[PathBuf],
    settings: &Settings,
    options: GenerateOptions,
    out: &mut W,
) -> IdlResult<GenerateSummary> {
    let parser = IdlParser::new();
    let generator = WrapperGenerator::from_settings(settings);
    let output_dir = &settings.codegen.output_dir;
    let mut summary = GenerateSummary::default();

    if !options.dry_run && !files.is_empty() {
        std::fs::create_dir_all(output_dir).map_err(|source| IdlError::FileWrite {
            path: output_dir.clone(),
            source,
        })?;
    }

    for path in files {
        let definitions = read_and_parse(&parser, path)?;
        let construct = first_construct(&definitions, path)?;
        let interface = construct
            .as_interface()
            .ok_or_else(|| IdlError::NotAnInterface {
                path: path.clone(),
                name: construct.name().to_string(),
                kind: construct.kind().to_string(),
            })?;

        let wrapper = generator.generate(interface);
        if options.dry_run {
            writeln!(out, "// {}", wrapper.file_name())?;
            write!(out, "{}", wrapper.source)?;
            writeln!(out)?;
        } else {
            write_file(&output_dir.join(wrapper.file_name()), &wrapper.source)?;
            writeln!(out, "Generated {} -> {}", wrapper.interface, wrapper.file_name())?;
        }
        tracing::debug!(interface = %wrapper.interface, module = %wrapper.module, "generated wrapper");
        summary.modules.push(wrapper.module);
    }

    if options.dry_run || summary.modules.is_empty() {
        return Ok(summary);
    }

    let mod_path = output_dir.join("mod.rs");
    write_file(&mod_path, &render_mod_file(&summary.modules))?;
    writeln!(out, "Generated mod file. All good to go!")?;
    summary.mod_file = Some(mod_path);

    tracing::info!(count = summary.modules.len(), dir = %output_dir.display(), "wrapper generation finished");
    Ok(summary)
}

fn write_file(path: &Path, contents: &str) -> IdlResult<()> {
    std::fs::write(path, contents).map_err(|source| IdlError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
