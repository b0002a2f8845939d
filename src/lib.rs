//! Web IDL inspection for HTML element interfaces.
//!
//! Finds `HTML*Element.idl` files, parses them and prints the members of each
//! file's first construct. Also generates plain Rust wrapper structs from the
//! same interfaces.

pub mod codegen;
pub mod config;
pub mod discovery;
pub mod display;
pub mod driver;
pub mod error;
pub mod io;
pub mod logging;
pub mod parsing;

// Explicit exports for better API clarity
pub use codegen::{GenerateOptions, WrapperGenerator, generate_wrappers};
pub use config::Settings;
pub use discovery::IdlFileWalker;
pub use driver::{MemberStyle, RunSummary, run, run_files};
pub use error::{IdlError, IdlResult, ParseError, ParseResult};
pub use parsing::{Definition, Definitions, IdlParser, Member};
