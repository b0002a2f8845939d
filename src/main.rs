//! CLI entry point for htmlidl.
//!
//! Running `htmlidl` without a command prints the members of every matched
//! `HTML*Element.idl` interface. Subcommands add JSON output, wrapper
//! generation and settings management.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use htmlidl::display::THEME;
use htmlidl::driver::{self, MemberStyle};
use htmlidl::io::{ExitCode, JsonResponse, OutputFormat, OutputManager, ResponseMeta};
use htmlidl::{GenerateOptions, IdlError, IdlFileWalker, IdlResult, Settings, generate_wrappers};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Inspect HTML element Web IDL files
#[derive(Parser)]
#[command(
    name = "htmlidl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Print the members of HTML*Element Web IDL interfaces",
    long_about = "Parse Web IDL files matching a glob pattern and print the members of each file's first interface, one per line.",
    after_help = "Examples:\n  htmlidl\n  htmlidl members 'idl/HTML*Element.idl' --sort\n  htmlidl members --names | sort | uniq -c\n  htmlidl generate --out-dir src/elements\n\nEnvironment:\n  HTMLIDL_LOG                 Log filter, e.g. debug or htmlidl=trace\n  HTMLIDL_DISCOVERY__PATTERN  Overrides discovery.pattern",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print interface members (default command)
    #[command(
        about = "Print the members of each matched file's first construct",
        after_help = "Examples:\n  htmlidl members\n  htmlidl members '../idl/HTML*Element.idl' --names\n  htmlidl members --json | jq '.data[].members[].name'"
    )]
    Members {
        /// Glob pattern for IDL files (overrides discovery.pattern)
        pattern: Option<String>,

        /// Process files in name order instead of directory order
        #[arg(long)]
        sort: bool,

        /// Print member names only
        #[arg(long)]
        names: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate Rust wrapper structs
    #[command(
        about = "Generate a Rust struct per interface plus mod.rs",
        after_help = "Examples:\n  htmlidl generate\n  htmlidl generate 'idl/HTML*Element.idl' --out-dir src/elements\n  htmlidl generate --dry-run"
    )]
    Generate {
        /// Glob pattern for IDL files (overrides discovery.pattern)
        pattern: Option<String>,

        /// Output directory (overrides codegen.output_dir)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Process files in name order instead of directory order
        #[arg(long)]
        sort: bool,

        /// Print generated code instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Initialize project
    #[command(about = "Create .htmlidl/settings.toml with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display the effective settings")]
    Config,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            let error = IdlError::ConfigError {
                reason: e.to_string(),
            };
            return report(&mut OutputManager::new(OutputFormat::Text), Err(error)).into();
        }
    };

    if let Err(e) = htmlidl::logging::init_tracing(&settings.logging.level, cli.quiet, cli.verbose)
    {
        eprintln!("{}", THEME.warning_with_icon(&format!("Logging disabled: {e}")));
    }
    tracing::debug!(config = ?cli.config, "settings loaded");

    let command = cli.command.unwrap_or(Commands::Members {
        pattern: None,
        sort: false,
        names: false,
        json: false,
    });

    let code = match command {
        Commands::Members {
            pattern,
            sort,
            names,
            json,
        } => {
            apply_discovery_overrides(&mut settings, pattern, sort);
            let style = if names {
                MemberStyle::Name
            } else {
                MemberStyle::Declaration
            };
            run_members(&settings, style, OutputFormat::from_json_flag(json))
        }

        Commands::Generate {
            pattern,
            out_dir,
            sort,
            dry_run,
        } => {
            apply_discovery_overrides(&mut settings, pattern, sort);
            if let Some(dir) = out_dir {
                settings.codegen.output_dir = dir;
            }
            let mut output = OutputManager::new(OutputFormat::Text);
            let result = generate_wrappers(&settings, GenerateOptions { dry_run }, output.stdout())
                .map(|_| ExitCode::Success);
            report(&mut output, result)
        }

        Commands::Init { force } => {
            let mut output = OutputManager::new(OutputFormat::Text);
            let result = Settings::init_config_file(force)
                .map_err(|e| IdlError::ConfigError {
                    reason: e.to_string(),
                })
                .and_then(|path| {
                    output
                        .info(&THEME.success_with_icon(&format!(
                            "Created configuration file at: {}",
                            path.display()
                        )))
                        .and_then(|()| output.info("Edit this file to customize your settings."))
                        .map(|()| ExitCode::Success)
                        .map_err(IdlError::Output)
                });
            report(&mut output, result)
        }

        Commands::Config => {
            let mut output = OutputManager::new(OutputFormat::Text);
            let result = toml::to_string_pretty(&settings)
                .map_err(|e| IdlError::ConfigError {
                    reason: e.to_string(),
                })
                .and_then(|toml_str| {
                    output
                        .info(&format!(
                            "Current Configuration:\n{}\n{toml_str}",
                            "=".repeat(50)
                        ))
                        .map(|()| ExitCode::Success)
                        .map_err(IdlError::Output)
                });
            report(&mut output, result)
        }
    };

    code.into()
}

fn apply_discovery_overrides(settings: &mut Settings, pattern: Option<String>, sort: bool) {
    if let Some(pattern) = pattern {
        settings.discovery.pattern = pattern;
    }
    if sort {
        settings.discovery.sort = true;
    }
}

fn run_members(settings: &Settings, style: MemberStyle, format: OutputFormat) -> ExitCode {
    let mut output = OutputManager::new(format);

    let result = if format.is_json() {
        IdlFileWalker::from_config(&settings.discovery)
            .walk()
            .and_then(|files| {
                let reports = driver::collect_reports(&files)?;
                let count: usize = reports.iter().map(|r| r.members.len()).sum();
                let response = JsonResponse::success(reports)
                    .with_message(format!("Found {count} members in {} files", files.len()))
                    .with_meta(ResponseMeta::current().with_files(files.len()));
                Ok(output.json(&response)?)
            })
    } else {
        driver::run(settings, style, output.stdout()).map(|_| ExitCode::Success)
    };

    report(&mut output, result)
}

/// Turn a command result into an exit code, printing the error if there is one.
fn report(output: &mut OutputManager, result: IdlResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        // Reader went away (`htmlidl | head`); nothing left to report
        Err(IdlError::Output(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            ExitCode::Success
        }
        Err(error) => {
            tracing::debug!(code = %error.status_code(), "run failed");
            output
                .error(&error)
                .unwrap_or_else(|_| ExitCode::from_error(&error))
        }
    }
}
