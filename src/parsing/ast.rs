//! Parsed Web IDL constructs and members
//!
//! Every node renders back to normalized IDL through `Display`: single spaces
//! between words, `, ` between list items, extended attributes in a leading
//! `[...]` block. Member renderings end with `;` so a printed member reads as
//! the declaration it came from.

use serde::Serialize;
use std::fmt;

/// One entry of an extended attribute list, e.g. `Exposed=Window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedAttribute {
    pub name: String,
    /// Normalized source text of the whole attribute
    pub text: String,
}

impl fmt::Display for ExtendedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Writes `[A, B] ` when the list is non-empty.
fn write_ext_attrs(f: &mut fmt::Formatter<'_>, attrs: &[ExtendedAttribute]) -> fmt::Result {
    if attrs.is_empty() {
        return Ok(());
    }
    f.write_str("[")?;
    write_list(f, attrs)?;
    f.write_str("] ")
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Argument]) -> fmt::Result {
    f.write_str("(")?;
    write_list(f, args)?;
    f.write_str(")")
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A single name: `DOMString`, `unsigned long long`, `any`, `HTMLElement`
    Named(String),
    /// `sequence<T>`, `FrozenArray<T>`, `ObservableArray<T>`, `Promise<T>`, `record<K, V>`
    Generic { name: String, args: Vec<IdlType> },
    /// `(A or B or C)`
    Union(Vec<IdlType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdlType {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub kind: TypeKind,
    pub nullable: bool,
}

impl IdlType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            ext_attrs: Vec::new(),
            kind: TypeKind::Named(name.into()),
            nullable: false,
        }
    }

    /// The name of a named or generic type; `None` for unions.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Named(name) | TypeKind::Generic { name, .. } => Some(name),
            TypeKind::Union(_) => None,
        }
    }
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ext_attrs(f, &self.ext_attrs)?;
        match &self.kind {
            TypeKind::Named(name) => f.write_str(name)?,
            TypeKind::Generic { name, args } => {
                write!(f, "{name}<")?;
                write_list(f, args)?;
                f.write_str(">")?;
            }
            TypeKind::Union(members) => {
                f.write_str("(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(")")?;
            }
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub optional: bool,
    pub type_: IdlType,
    pub variadic: bool,
    pub name: String,
    /// Default value as written, e.g. `"auto"`, `0`, `[]`
    pub default: Option<String>,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ext_attrs(f, &self.ext_attrs)?;
        if self.optional {
            f.write_str("optional ")?;
        }
        write!(f, "{}", self.type_)?;
        if self.variadic {
            f.write_str("...")?;
        }
        write!(f, " {}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeModifier {
    Static,
    Stringifier,
    Inherit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationModifier {
    Static,
    Stringifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    Getter,
    Setter,
    Deleter,
}

impl AttributeModifier {
    fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Stringifier => "stringifier",
            Self::Inherit => "inherit",
        }
    }
}

impl OperationModifier {
    fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Stringifier => "stringifier",
        }
    }
}

impl Special {
    fn keyword(self) -> &'static str {
        match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
            Self::Deleter => "deleter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub modifier: Option<AttributeModifier>,
    pub readonly: bool,
    pub type_: IdlType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub modifier: Option<OperationModifier>,
    pub special: Option<Special>,
    pub return_type: IdlType,
    /// Special operations may be anonymous
    pub name: Option<String>,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Const {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub type_: IdlType,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iterable {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub is_async: bool,
    /// One type for value iterators, two for pair iterators
    pub types: Vec<IdlType>,
    /// Only async iterables take arguments
    pub args: Option<Vec<Argument>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maplike {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub readonly: bool,
    pub key: IdlType,
    pub value: IdlType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setlike {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub readonly: bool,
    pub value: IdlType,
}

/// Dictionary member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub required: bool,
    pub type_: IdlType,
    pub name: String,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Attribute(Attribute),
    Operation(Operation),
    Const(Const),
    Constructor(Constructor),
    /// Bare `stringifier;`
    Stringifier { ext_attrs: Vec<ExtendedAttribute> },
    Iterable(Iterable),
    Maplike(Maplike),
    Setlike(Setlike),
    Field(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Attribute,
    Operation,
    Const,
    Constructor,
    Stringifier,
    Iterable,
    Maplike,
    Setlike,
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Attribute => "attribute",
            Self::Operation => "operation",
            Self::Const => "const",
            Self::Constructor => "constructor",
            Self::Stringifier => "stringifier",
            Self::Iterable => "iterable",
            Self::Maplike => "maplike",
            Self::Setlike => "setlike",
            Self::Field => "field",
        };
        f.write_str(s)
    }
}

impl Member {
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Attribute(_) => MemberKind::Attribute,
            Self::Operation(_) => MemberKind::Operation,
            Self::Const(_) => MemberKind::Const,
            Self::Constructor(_) => MemberKind::Constructor,
            Self::Stringifier { .. } => MemberKind::Stringifier,
            Self::Iterable(_) => MemberKind::Iterable,
            Self::Maplike(_) => MemberKind::Maplike,
            Self::Setlike(_) => MemberKind::Setlike,
            Self::Field(_) => MemberKind::Field,
        }
    }

    /// Declared name, if the member kind carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Attribute(a) => Some(&a.name),
            Self::Operation(op) => op.name.as_deref(),
            Self::Const(c) => Some(&c.name),
            Self::Field(field) => Some(&field.name),
            Self::Constructor(_)
            | Self::Stringifier { .. }
            | Self::Iterable(_)
            | Self::Maplike(_)
            | Self::Setlike(_) => None,
        }
    }

    pub fn ext_attrs(&self) -> &[ExtendedAttribute] {
        match self {
            Self::Attribute(a) => &a.ext_attrs,
            Self::Operation(op) => &op.ext_attrs,
            Self::Const(c) => &c.ext_attrs,
            Self::Constructor(c) => &c.ext_attrs,
            Self::Stringifier { ext_attrs } => ext_attrs,
            Self::Iterable(it) => &it.ext_attrs,
            Self::Maplike(m) => &m.ext_attrs,
            Self::Setlike(s) => &s.ext_attrs,
            Self::Field(field) => &field.ext_attrs,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ext_attrs(f, self.ext_attrs())?;
        match self {
            Self::Attribute(a) => {
                if let Some(modifier) = a.modifier {
                    write!(f, "{} ", modifier.keyword())?;
                }
                if a.readonly {
                    f.write_str("readonly ")?;
                }
                write!(f, "attribute {} {}", a.type_, a.name)?;
            }
            Self::Operation(op) => {
                if let Some(modifier) = op.modifier {
                    write!(f, "{} ", modifier.keyword())?;
                }
                if let Some(special) = op.special {
                    write!(f, "{} ", special.keyword())?;
                }
                write!(f, "{}", op.return_type)?;
                if let Some(name) = &op.name {
                    write!(f, " {name}")?;
                }
                write_args(f, &op.args)?;
            }
            Self::Const(c) => write!(f, "const {} {} = {}", c.type_, c.name, c.value)?,
            Self::Constructor(c) => {
                f.write_str("constructor")?;
                write_args(f, &c.args)?;
            }
            Self::Stringifier { .. } => f.write_str("stringifier")?,
            Self::Iterable(it) => {
                if it.is_async {
                    f.write_str("async ")?;
                }
                f.write_str("iterable<")?;
                write_list(f, &it.types)?;
                f.write_str(">")?;
                if let Some(args) = &it.args {
                    write_args(f, args)?;
                }
            }
            Self::Maplike(m) => {
                if m.readonly {
                    f.write_str("readonly ")?;
                }
                write!(f, "maplike<{}, {}>", m.key, m.value)?;
            }
            Self::Setlike(s) => {
                if s.readonly {
                    f.write_str("readonly ")?;
                }
                write!(f, "setlike<{}>", s.value)?;
            }
            Self::Field(field) => {
                if field.required {
                    f.write_str("required ")?;
                }
                write!(f, "{} {}", field.type_, field.name)?;
                if let Some(default) = &field.default {
                    write!(f, " = {default}")?;
                }
            }
        }
        f.write_str(";")
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Regular,
    Mixin,
    Callback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub partial: bool,
    pub kind: InterfaceKind,
    pub name: String,
    pub inheritance: Option<String>,
    pub members: Vec<Member>,
}

impl Interface {
    /// Non-static attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.members.iter().filter_map(|member| match member {
            Member::Attribute(a) if a.modifier != Some(AttributeModifier::Static) => Some(a),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub partial: bool,
    pub name: String,
    pub inheritance: Option<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub partial: bool,
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackFunction {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub name: String,
    pub return_type: IdlType,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typedef {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub type_: IdlType,
    pub name: String,
}

/// `target includes mixin;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Includes {
    pub ext_attrs: Vec<ExtendedAttribute>,
    pub target: String,
    pub mixin: String,
}

/// A top-level construct of an IDL document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Interface(Interface),
    Dictionary(Dictionary),
    Namespace(Namespace),
    Callback(CallbackFunction),
    Enum(Enum),
    Typedef(Typedef),
    Includes(Includes),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    Interface,
    InterfaceMixin,
    CallbackInterface,
    Dictionary,
    Namespace,
    Callback,
    Enum,
    Typedef,
    Includes,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Interface => "interface",
            Self::InterfaceMixin => "interface mixin",
            Self::CallbackInterface => "callback interface",
            Self::Dictionary => "dictionary",
            Self::Namespace => "namespace",
            Self::Callback => "callback",
            Self::Enum => "enum",
            Self::Typedef => "typedef",
            Self::Includes => "includes statement",
        };
        f.write_str(s)
    }
}

impl Definition {
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Interface(i) => match i.kind {
                InterfaceKind::Regular => DefinitionKind::Interface,
                InterfaceKind::Mixin => DefinitionKind::InterfaceMixin,
                InterfaceKind::Callback => DefinitionKind::CallbackInterface,
            },
            Self::Dictionary(_) => DefinitionKind::Dictionary,
            Self::Namespace(_) => DefinitionKind::Namespace,
            Self::Callback(_) => DefinitionKind::Callback,
            Self::Enum(_) => DefinitionKind::Enum,
            Self::Typedef(_) => DefinitionKind::Typedef,
            Self::Includes(_) => DefinitionKind::Includes,
        }
    }

    /// Name of the construct; for `includes` statements the target interface.
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(i) => &i.name,
            Self::Dictionary(d) => &d.name,
            Self::Namespace(n) => &n.name,
            Self::Callback(c) => &c.name,
            Self::Enum(e) => &e.name,
            Self::Typedef(t) => &t.name,
            Self::Includes(inc) => &inc.target,
        }
    }

    /// Members in declaration order. Empty for constructs without a body of members.
    pub fn members(&self) -> &[Member] {
        match self {
            Self::Interface(i) => &i.members,
            Self::Dictionary(d) => &d.members,
            Self::Namespace(n) => &n.members,
            Self::Callback(_) | Self::Enum(_) | Self::Typedef(_) | Self::Includes(_) => &[],
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            Self::Interface(i) => Some(i),
            _ => None,
        }
    }
}

/// Declaration head, e.g. `partial interface HTMLFooElement : HTMLElement`.
impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partial = match self {
            Self::Interface(i) => i.partial,
            Self::Dictionary(d) => d.partial,
            Self::Namespace(n) => n.partial,
            _ => false,
        };
        if partial {
            f.write_str("partial ")?;
        }
        match self {
            Self::Includes(inc) => write!(f, "{} includes {}", inc.target, inc.mixin),
            Self::Typedef(t) => write!(f, "typedef {} {}", t.type_, t.name),
            Self::Callback(c) => {
                write!(f, "callback {} = {}", c.name, c.return_type)?;
                write_args(f, &c.args)
            }
            _ => {
                write!(f, "{} {}", self.kind(), self.name())?;
                let inheritance = match self {
                    Self::Interface(i) => i.inheritance.as_deref(),
                    Self::Dictionary(d) => d.inheritance.as_deref(),
                    _ => None,
                };
                if let Some(parent) = inheritance {
                    write!(f, " : {parent}")?;
                }
                Ok(())
            }
        }
    }
}

/// Ordered result of parsing one IDL document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions(pub Vec<Definition>);

impl Definitions {
    /// The first construct of the document, if any.
    pub fn first(&self) -> Option<&Definition> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Definitions {
    type Item = Definition;
    type IntoIter = std::vec::IntoIter<Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Definitions {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
