//! IDL -> Rust type and identifier mapping for generated wrappers.

use crate::parsing::{IdlType, TypeKind};
use std::collections::BTreeMap;

/// Rust keywords that cannot be used as bare field names.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Built-in mapping for IDL primitive and string types.
fn builtin(name: &str) -> Option<&'static str> {
    let rust = match name {
        "DOMString" | "USVString" | "ByteString" | "CSSOMString" => "String",
        "boolean" => "bool",
        "byte" => "i8",
        "octet" => "u8",
        "short" => "i16",
        "unsigned short" => "u16",
        "long" => "i32",
        "unsigned long" => "u32",
        "long long" => "i64",
        "unsigned long long" => "u64",
        "float" | "unrestricted float" => "f32",
        "double" | "unrestricted double" => "f64",
        "undefined" => "()",
        _ => return None,
    };
    Some(rust)
}

/// Maps IDL types to Rust type expressions.
///
/// Configured overrides win over the built-in table; names found in neither
/// are emitted unchanged, so interface types such as `DOMTokenList` refer to
/// Rust types of the same name.
#[derive(Debug, Clone, Default)]
pub struct RustTypeMapper {
    overrides: BTreeMap<String, String>,
}

impl RustTypeMapper {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn map(&self, ty: &IdlType) -> String {
        let inner = match &ty.kind {
            TypeKind::Named(name) => self.map_name(name),
            TypeKind::Generic { name, args } => self.map_generic(name, args),
            TypeKind::Union(members) => union_name(members),
        };
        if ty.nullable {
            format!("Option<{inner}>")
        } else {
            inner
        }
    }

    fn map_name(&self, name: &str) -> String {
        if let Some(rust) = self.overrides.get(name) {
            return rust.clone();
        }
        builtin(name).map_or_else(|| name.to_string(), str::to_string)
    }

    fn map_generic(&self, name: &str, args: &[IdlType]) -> String {
        if let Some(rust) = self.overrides.get(name) {
            return rust.clone();
        }
        let mapped: Vec<String> = args.iter().map(|arg| self.map(arg)).collect();
        match name {
            "sequence" | "FrozenArray" | "ObservableArray" => format!("Vec<{}>", mapped.join(", ")),
            "record" => format!("std::collections::HashMap<{}>", mapped.join(", ")),
            _ => format!("{name}<{}>", mapped.join(", ")),
        }
    }
}

/// `(HTMLElement or long)` -> `HTMLElementOrLong`
fn union_name(members: &[IdlType]) -> String {
    members
        .iter()
        .map(|member| {
            let name = member.name().unwrap_or("Union");
            let mut pascal = String::new();
            for word in name.split(' ') {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    pascal.extend(first.to_uppercase());
                    pascal.push_str(chars.as_str());
                }
            }
            pascal
        })
        .collect::<Vec<_>>()
        .join("Or")
}

/// Convert an IDL identifier to snake_case: `relList` -> `rel_list`,
/// `HTMLAnchorElement` -> `html_anchor_element`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            out.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// snake_case name usable as a Rust field: keywords get a trailing `_`.
pub fn field_name(name: &str) -> String {
    let snake = snake_case(name.trim_start_matches('_'));
    if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else {
        snake
    }
}
