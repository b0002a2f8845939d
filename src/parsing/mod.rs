//! Web IDL parsing: lexer, syntax tree and parser.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    Argument, Attribute, Definition, DefinitionKind, Definitions, ExtendedAttribute, IdlType,
    Interface, InterfaceKind, Member, MemberKind, TypeKind,
};
pub use lexer::{Lexer, SourceLocation, Token, TokenKind};
pub use parser::IdlParser;
