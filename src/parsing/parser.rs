//! Recursive-descent parser for Web IDL
//!
//! [`IdlParser`] holds no per-document state: every call to [`IdlParser::parse`]
//! tokenizes and parses into a fresh [`Definitions`] value, so parsing one file
//! can never observe anything left over from another.

use crate::error::{ParseError, ParseResult};
use crate::parsing::ast::*;
use crate::parsing::lexer::{Lexer, Token, TokenKind};

/// Generic type names that take `<...>` arguments.
const GENERIC_TYPES: &[&str] = &[
    "sequence",
    "FrozenArray",
    "ObservableArray",
    "Promise",
    "record",
];

/// Web IDL parser. Cheap to construct and reusable across documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdlParser;

impl IdlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a complete IDL document into its top-level constructs.
    ///
    /// A leading byte order mark is ignored.
    pub fn parse(&self, text: &str) -> ParseResult<Definitions> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let tokens = Lexer::new(text).tokenize()?;
        TokenStream::new(tokens).definitions()
    }

    /// Parse raw file contents, rejecting input that is not valid UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParseResult<Definitions> {
        let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
        self.parse(text)
    }
}

/// Cursor over the token list of a single document.
struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn definitions(&mut self) -> ParseResult<Definitions> {
        let mut definitions = Vec::new();
        while !self.is_at_end() {
            let ext_attrs = self.ext_attr_list()?;
            definitions.push(self.definition(ext_attrs)?);
        }
        Ok(Definitions(definitions))
    }

    // -----------------------------------------------------------------------
    // Definitions
    // -----------------------------------------------------------------------

    fn definition(&mut self, ext_attrs: Vec<ExtendedAttribute>) -> ParseResult<Definition> {
        if self.eat_keyword("callback") {
            if self.eat_keyword("interface") {
                return self.interface_rest(ext_attrs, false, InterfaceKind::Callback);
            }
            return self.callback_rest(ext_attrs);
        }

        if self.eat_keyword("interface") {
            if self.eat_keyword("mixin") {
                return self.interface_rest(ext_attrs, false, InterfaceKind::Mixin);
            }
            return self.interface_rest(ext_attrs, false, InterfaceKind::Regular);
        }

        if self.eat_keyword("partial") {
            if self.eat_keyword("interface") {
                if self.eat_keyword("mixin") {
                    return self.interface_rest(ext_attrs, true, InterfaceKind::Mixin);
                }
                return self.interface_rest(ext_attrs, true, InterfaceKind::Regular);
            }
            if self.eat_keyword("dictionary") {
                return self.dictionary_rest(ext_attrs, true);
            }
            if self.eat_keyword("namespace") {
                return self.namespace_rest(ext_attrs, true);
            }
            return Err(self.unexpected("'interface', 'dictionary' or 'namespace' after 'partial'"));
        }

        if self.eat_keyword("dictionary") {
            return self.dictionary_rest(ext_attrs, false);
        }
        if self.eat_keyword("namespace") {
            return self.namespace_rest(ext_attrs, false);
        }
        if self.eat_keyword("enum") {
            return self.enum_rest(ext_attrs);
        }
        if self.eat_keyword("typedef") {
            let type_ = self.type_with_ext_attrs()?;
            let name = self.expect_identifier("typedef name")?;
            self.expect_punct(';', "after typedef")?;
            return Ok(Definition::Typedef(Typedef {
                ext_attrs,
                type_,
                name,
            }));
        }

        if matches!(self.peek().kind, TokenKind::Identifier(_)) && self.peek_at(1).is_ident("includes")
        {
            let target = self.expect_identifier("interface name")?;
            self.advance(); // includes
            let mixin = self.expect_identifier("mixin name")?;
            self.expect_punct(';', "after includes statement")?;
            return Ok(Definition::Includes(Includes {
                ext_attrs,
                target,
                mixin,
            }));
        }

        Err(self.unexpected("a definition"))
    }

    fn interface_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        partial: bool,
        kind: InterfaceKind,
    ) -> ParseResult<Definition> {
        let name = self.expect_identifier("interface name")?;
        let inheritance = self.inheritance()?;
        let members = self.member_block()?;

        Ok(Definition::Interface(Interface {
            ext_attrs,
            partial,
            kind,
            name,
            inheritance,
            members,
        }))
    }

    fn namespace_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        partial: bool,
    ) -> ParseResult<Definition> {
        let name = self.expect_identifier("namespace name")?;
        let members = self.member_block()?;

        Ok(Definition::Namespace(Namespace {
            ext_attrs,
            partial,
            name,
            members,
        }))
    }

    fn dictionary_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        partial: bool,
    ) -> ParseResult<Definition> {
        let name = self.expect_identifier("dictionary name")?;
        let inheritance = self.inheritance()?;
        self.expect_punct('{', "to open dictionary body")?;

        let mut members = Vec::new();
        while !self.eat_punct('}') {
            let member_attrs = self.ext_attr_list()?;
            let required = self.eat_keyword("required");
            let type_ = self.type_with_ext_attrs()?;
            let field_name = self.expect_identifier("dictionary member name")?;
            let default = if self.eat_punct('=') {
                Some(self.default_value()?)
            } else {
                None
            };
            self.expect_punct(';', "after dictionary member")?;

            members.push(Member::Field(Field {
                ext_attrs: member_attrs,
                required,
                type_,
                name: field_name,
                default,
            }));
        }
        self.expect_punct(';', "after dictionary body")?;

        Ok(Definition::Dictionary(Dictionary {
            ext_attrs,
            partial,
            name,
            inheritance,
            members,
        }))
    }

    fn enum_rest(&mut self, ext_attrs: Vec<ExtendedAttribute>) -> ParseResult<Definition> {
        let name = self.expect_identifier("enum name")?;
        self.expect_punct('{', "to open enum body")?;

        let mut values = Vec::new();
        loop {
            if self.eat_punct('}') {
                break;
            }
            match self.peek().kind.clone() {
                TokenKind::String(value) => {
                    self.advance();
                    values.push(value);
                }
                _ => return Err(self.unexpected("an enum value string")),
            }
            if !self.eat_punct(',') {
                self.expect_punct('}', "to close enum body")?;
                break;
            }
        }
        self.expect_punct(';', "after enum")?;

        Ok(Definition::Enum(Enum {
            ext_attrs,
            name,
            values,
        }))
    }

    fn callback_rest(&mut self, ext_attrs: Vec<ExtendedAttribute>) -> ParseResult<Definition> {
        let name = self.expect_identifier("callback name")?;
        self.expect_punct('=', "after callback name")?;
        let return_type = self.type_()?;
        let args = self.argument_list()?;
        self.expect_punct(';', "after callback")?;

        Ok(Definition::Callback(CallbackFunction {
            ext_attrs,
            name,
            return_type,
            args,
        }))
    }

    fn inheritance(&mut self) -> ParseResult<Option<String>> {
        if self.eat_punct(':') {
            Ok(Some(self.expect_identifier("parent name")?))
        } else {
            Ok(None)
        }
    }

    /// `{ members };`
    fn member_block(&mut self) -> ParseResult<Vec<Member>> {
        self.expect_punct('{', "to open body")?;
        let mut members = Vec::new();
        while !self.eat_punct('}') {
            if self.is_at_end() {
                return Err(self.unexpected("'}'"));
            }
            let ext_attrs = self.ext_attr_list()?;
            members.push(self.member(ext_attrs)?);
        }
        self.expect_punct(';', "after body")?;
        Ok(members)
    }

    // -----------------------------------------------------------------------
    // Members
    // -----------------------------------------------------------------------

    fn member(&mut self, ext_attrs: Vec<ExtendedAttribute>) -> ParseResult<Member> {
        if self.eat_keyword("const") {
            return self.const_rest(ext_attrs);
        }

        if self.peek().is_ident("constructor") && self.peek_at(1).is_punct('(') {
            self.advance();
            let args = self.argument_list()?;
            self.expect_punct(';', "after constructor")?;
            return Ok(Member::Constructor(Constructor { ext_attrs, args }));
        }

        if self.eat_keyword("stringifier") {
            if self.eat_punct(';') {
                return Ok(Member::Stringifier { ext_attrs });
            }
            if self.at_attribute() {
                return self.attribute_rest(ext_attrs, Some(AttributeModifier::Stringifier));
            }
            return self.operation_rest(ext_attrs, Some(OperationModifier::Stringifier), None);
        }

        if self.eat_keyword("static") {
            if self.at_attribute() {
                return self.attribute_rest(ext_attrs, Some(AttributeModifier::Static));
            }
            return self.operation_rest(ext_attrs, Some(OperationModifier::Static), None);
        }

        if self.eat_keyword("inherit") {
            return self.attribute_rest(ext_attrs, Some(AttributeModifier::Inherit));
        }

        if self.peek().is_ident("readonly") {
            let next = self.peek_at(1);
            if next.is_ident("maplike") || next.is_ident("setlike") {
                self.advance();
                return self.collection_rest(ext_attrs, true);
            }
        }

        if self.at_attribute() {
            return self.attribute_rest(ext_attrs, None);
        }

        if self.peek().is_ident("async") && self.peek_at(1).is_ident("iterable") {
            self.advance();
            return self.iterable_rest(ext_attrs, true);
        }
        if self.peek().is_ident("iterable") && self.peek_at(1).is_punct('<') {
            return self.iterable_rest(ext_attrs, false);
        }
        if (self.peek().is_ident("maplike") || self.peek().is_ident("setlike"))
            && self.peek_at(1).is_punct('<')
        {
            return self.collection_rest(ext_attrs, false);
        }

        let special = if self.eat_keyword("getter") {
            Some(Special::Getter)
        } else if self.eat_keyword("setter") {
            Some(Special::Setter)
        } else if self.eat_keyword("deleter") {
            Some(Special::Deleter)
        } else {
            None
        };

        self.operation_rest(ext_attrs, None, special)
    }

    fn at_attribute(&self) -> bool {
        self.peek().is_ident("attribute")
            || (self.peek().is_ident("readonly") && self.peek_at(1).is_ident("attribute"))
    }

    fn attribute_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        modifier: Option<AttributeModifier>,
    ) -> ParseResult<Member> {
        let readonly = self.eat_keyword("readonly");
        self.expect_keyword("attribute")?;
        let type_ = self.type_with_ext_attrs()?;
        let name = self.expect_identifier("attribute name")?;
        self.expect_punct(';', "after attribute")?;

        Ok(Member::Attribute(Attribute {
            ext_attrs,
            modifier,
            readonly,
            type_,
            name,
        }))
    }

    fn operation_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        modifier: Option<OperationModifier>,
        special: Option<Special>,
    ) -> ParseResult<Member> {
        let return_type = self.type_()?;
        let name = match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };
        if name.is_none() && special.is_none() {
            return Err(self.unexpected("operation name"));
        }
        let args = self.argument_list()?;
        self.expect_punct(';', "after operation")?;

        Ok(Member::Operation(Operation {
            ext_attrs,
            modifier,
            special,
            return_type,
            name,
            args,
        }))
    }

    fn const_rest(&mut self, ext_attrs: Vec<ExtendedAttribute>) -> ParseResult<Member> {
        let type_ = self.type_()?;
        let name = self.expect_identifier("constant name")?;
        self.expect_punct('=', "after constant name")?;
        let value = self.default_value()?;
        self.expect_punct(';', "after constant")?;

        Ok(Member::Const(Const {
            ext_attrs,
            type_,
            name,
            value,
        }))
    }

    fn iterable_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        is_async: bool,
    ) -> ParseResult<Member> {
        self.expect_keyword("iterable")?;
        self.expect_punct('<', "after 'iterable'")?;
        let mut types = vec![self.type_with_ext_attrs()?];
        if self.eat_punct(',') {
            types.push(self.type_with_ext_attrs()?);
        }
        self.expect_punct('>', "to close iterable types")?;
        let args = if is_async && self.peek().is_punct('(') {
            Some(self.argument_list()?)
        } else {
            None
        };
        self.expect_punct(';', "after iterable")?;

        Ok(Member::Iterable(Iterable {
            ext_attrs,
            is_async,
            types,
            args,
        }))
    }

    fn collection_rest(
        &mut self,
        ext_attrs: Vec<ExtendedAttribute>,
        readonly: bool,
    ) -> ParseResult<Member> {
        if self.eat_keyword("maplike") {
            self.expect_punct('<', "after 'maplike'")?;
            let key = self.type_with_ext_attrs()?;
            self.expect_punct(',', "between maplike key and value")?;
            let value = self.type_with_ext_attrs()?;
            self.expect_punct('>', "to close maplike types")?;
            self.expect_punct(';', "after maplike")?;
            return Ok(Member::Maplike(Maplike {
                ext_attrs,
                readonly,
                key,
                value,
            }));
        }

        self.expect_keyword("setlike")?;
        self.expect_punct('<', "after 'setlike'")?;
        let value = self.type_with_ext_attrs()?;
        self.expect_punct('>', "to close setlike type")?;
        self.expect_punct(';', "after setlike")?;
        Ok(Member::Setlike(Setlike {
            ext_attrs,
            readonly,
            value,
        }))
    }

    // -----------------------------------------------------------------------
    // Arguments and values
    // -----------------------------------------------------------------------

    fn argument_list(&mut self) -> ParseResult<Vec<Argument>> {
        self.expect_punct('(', "to open argument list")?;
        let mut args = Vec::new();
        if self.eat_punct(')') {
            return Ok(args);
        }
        loop {
            args.push(self.argument()?);
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct(')', "to close argument list")?;
        Ok(args)
    }

    fn argument(&mut self) -> ParseResult<Argument> {
        let ext_attrs = self.ext_attr_list()?;
        let optional = self.eat_keyword("optional");
        let type_ = self.type_with_ext_attrs()?;
        let variadic = if matches!(self.peek().kind, TokenKind::Ellipsis) {
            self.advance();
            true
        } else {
            false
        };
        let name = self.expect_identifier("argument name")?;
        let default = if self.eat_punct('=') {
            Some(self.default_value()?)
        } else {
            None
        };

        Ok(Argument {
            ext_attrs,
            optional,
            type_,
            variadic,
            name,
            default,
        })
    }

    /// Constant or default value, returned as written.
    fn default_value(&mut self) -> ParseResult<String> {
        let token = self.peek().clone();
        let value = match token.kind {
            TokenKind::String(s) => format!("\"{s}\""),
            TokenKind::Integer(n) | TokenKind::Decimal(n) => n,
            TokenKind::Identifier(word) => word,
            TokenKind::Punct('[') => {
                self.advance();
                self.expect_punct(']', "in empty sequence default")?;
                return Ok("[]".to_string());
            }
            TokenKind::Punct('{') => {
                self.advance();
                self.expect_punct('}', "in empty dictionary default")?;
                return Ok("{}".to_string());
            }
            _ => return Err(self.unexpected("a value")),
        };
        self.advance();
        Ok(value)
    }

    // -----------------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------------

    fn type_with_ext_attrs(&mut self) -> ParseResult<IdlType> {
        let ext_attrs = self.ext_attr_list()?;
        let mut type_ = self.type_()?;
        if !ext_attrs.is_empty() {
            type_.ext_attrs = ext_attrs;
        }
        Ok(type_)
    }

    fn type_(&mut self) -> ParseResult<IdlType> {
        if self.eat_punct('(') {
            let mut members = vec![self.type_with_ext_attrs()?];
            while self.eat_keyword("or") {
                members.push(self.type_with_ext_attrs()?);
            }
            if members.len() < 2 {
                return Err(self.unexpected("'or' in union type"));
            }
            self.expect_punct(')', "to close union type")?;
            let nullable = self.eat_punct('?');
            return Ok(IdlType {
                ext_attrs: Vec::new(),
                kind: TypeKind::Union(members),
                nullable,
            });
        }

        let name = self.expect_identifier("a type")?;
        let kind = match name.as_str() {
            "unsigned" => {
                let base = if self.eat_keyword("short") {
                    "short"
                } else if self.eat_keyword("long") {
                    if self.eat_keyword("long") {
                        "long long"
                    } else {
                        "long"
                    }
                } else {
                    return Err(self.unexpected("'short' or 'long' after 'unsigned'"));
                };
                TypeKind::Named(format!("unsigned {base}"))
            }
            "unrestricted" => {
                if self.eat_keyword("float") {
                    TypeKind::Named("unrestricted float".to_string())
                } else if self.eat_keyword("double") {
                    TypeKind::Named("unrestricted double".to_string())
                } else {
                    return Err(self.unexpected("'float' or 'double' after 'unrestricted'"));
                }
            }
            "long" if self.eat_keyword("long") => TypeKind::Named("long long".to_string()),
            generic if GENERIC_TYPES.contains(&generic) && self.peek().is_punct('<') => {
                self.advance();
                let mut args = vec![self.type_with_ext_attrs()?];
                while self.eat_punct(',') {
                    args.push(self.type_with_ext_attrs()?);
                }
                self.expect_punct('>', "to close type arguments")?;
                TypeKind::Generic { name, args }
            }
            _ => TypeKind::Named(name),
        };
        let nullable = self.eat_punct('?');

        Ok(IdlType {
            ext_attrs: Vec::new(),
            kind,
            nullable,
        })
    }

    // -----------------------------------------------------------------------
    // Extended attributes
    // -----------------------------------------------------------------------

    /// `[A, B=C, D=(E,F), G(args)]`, or nothing.
    fn ext_attr_list(&mut self) -> ParseResult<Vec<ExtendedAttribute>> {
        if !self.eat_punct('[') {
            return Ok(Vec::new());
        }

        let mut attrs = Vec::new();
        if self.eat_punct(']') {
            return Ok(attrs);
        }
        loop {
            attrs.push(self.ext_attr()?);
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(']', "to close extended attribute list")?;
            break;
        }
        Ok(attrs)
    }

    fn ext_attr(&mut self) -> ParseResult<ExtendedAttribute> {
        let name = self.expect_identifier("extended attribute name")?;
        let mut text = name.clone();
        let mut previous = TokenKind::Identifier(name.clone());
        let mut depth = 0usize;

        loop {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Eof => return Err(self.unexpected("']'")),
                TokenKind::Punct(',' | ']') if depth == 0 => break,
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
                _ => {}
            }

            if is_word(&token.kind)
                && (is_word(&previous) || matches!(previous, TokenKind::Ellipsis))
            {
                text.push(' ');
            }
            text.push_str(&token_text(&token.kind));
            previous = token.kind;
            self.advance();
        }

        Ok(ExtendedAttribute { name, text })
    }

    // -----------------------------------------------------------------------
    // Token helpers
    // -----------------------------------------------------------------------

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.position + offset).min(last)]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn eat_punct(&mut self, ch: char) -> bool {
        if self.peek().is_punct(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.peek().is_ident(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, ch: char, context: &str) -> ParseResult<()> {
        if self.eat_punct(ch) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{ch}' {context}")))
        }
    }

    fn expect_keyword(&mut self, word: &str) -> ParseResult<()> {
        if self.eat_keyword(word) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{word}'")))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<String> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        token
            .location
            .error(format!("expected {expected}, found {}", token.kind))
    }
}

fn is_word(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier(_) | TokenKind::Integer(_) | TokenKind::Decimal(_) | TokenKind::String(_)
    )
}

fn token_text(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(s) | TokenKind::Integer(s) | TokenKind::Decimal(s) => s.clone(),
        TokenKind::String(s) => format!("\"{s}\""),
        TokenKind::Ellipsis => "...".to_string(),
        TokenKind::Punct(',') => ", ".to_string(),
        TokenKind::Punct(c) => c.to_string(),
        TokenKind::Eof => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> Definitions {
        IdlParser::new().parse(src).unwrap()
    }

    fn rendered_members(src: &str) -> Vec<String> {
        let defs = parse(src);
        defs.first()
            .unwrap()
            .members()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_html_anchor_element() {
        let src = r#"
            // https://html.spec.whatwg.org/multipage/text-level-semantics.html#htmlanchorelement
            [Exposed=Window]
            interface HTMLAnchorElement : HTMLElement {
              [HTMLConstructor] constructor();

              [CEReactions] attribute DOMString target;
              [CEReactions] attribute DOMString download;
              [SameObject, PutForwards=value] readonly attribute DOMTokenList relList;
              [CEReactions] attribute DOMString referrerPolicy;
            };
        "#;
        let defs = parse(src);
        assert_eq!(defs.len(), 1);

        let def = defs.first().unwrap();
        assert_eq!(def.name(), "HTMLAnchorElement");
        assert_eq!(def.kind(), DefinitionKind::Interface);
        assert_eq!(def.to_string(), "interface HTMLAnchorElement : HTMLElement");

        assert_eq!(
            rendered_members(src),
            vec![
                "[HTMLConstructor] constructor();",
                "[CEReactions] attribute DOMString target;",
                "[CEReactions] attribute DOMString download;",
                "[SameObject, PutForwards=value] readonly attribute DOMTokenList relList;",
                "[CEReactions] attribute DOMString referrerPolicy;",
            ]
        );
    }

    #[test]
    fn test_operations_and_arguments() {
        let src = r#"
            interface HTMLSelectElement : HTMLElement {
              getter Element? item(unsigned long index);
              Element? namedItem(DOMString name);
              undefined add((HTMLOptionElement or HTMLOptGroupElement) element, optional (HTMLElement or long)? before = null);
              [CEReactions] setter undefined (unsigned long index, HTMLOptionElement? option);
              static Promise<sequence<DOMString>> list(DOMString... names);
            };
        "#;
        assert_eq!(
            rendered_members(src),
            vec![
                "getter Element? item(unsigned long index);",
                "Element? namedItem(DOMString name);",
                "undefined add((HTMLOptionElement or HTMLOptGroupElement) element, optional (HTMLElement or long)? before = null);",
                "[CEReactions] setter undefined(unsigned long index, HTMLOptionElement? option);",
                "static Promise<sequence<DOMString>> list(DOMString... names);",
            ]
        );
    }

    #[test]
    fn test_constants_stringifier_and_iterables() {
        let src = r#"
            interface HTMLMediaElement : HTMLElement {
              const unsigned short NETWORK_EMPTY = 0;
              const double RATIO = 1.5;
              stringifier;
              stringifier attribute USVString href;
              iterable<DOMString>;
              async iterable<DOMString, any>(optional boolean preventCancel = false);
              readonly maplike<DOMString, long long>;
              setlike<DOMString>;
              inherit attribute unrestricted double volume;
            };
        "#;
        assert_eq!(
            rendered_members(src),
            vec![
                "const unsigned short NETWORK_EMPTY = 0;",
                "const double RATIO = 1.5;",
                "stringifier;",
                "stringifier attribute USVString href;",
                "iterable<DOMString>;",
                "async iterable<DOMString, any>(optional boolean preventCancel = false);",
                "readonly maplike<DOMString, long long>;",
                "setlike<DOMString>;",
                "inherit attribute unrestricted double volume;",
            ]
        );
    }

    #[test]
    fn test_keyword_names_are_accepted() {
        let src = r#"
            interface HTMLScriptElement : HTMLElement {
              attribute boolean async;
              attribute boolean required;
              undefined includes(DOMString interface);
            };
        "#;
        let defs = parse(src);
        let names: Vec<_> = defs.first().unwrap().members().iter().filter_map(Member::name).collect();
        assert_eq!(names, vec!["async", "required", "includes"]);
    }

    #[test]
    fn test_extended_attribute_rendering() {
        let src = r#"
            [Exposed=(Window,Worker), LegacyFactoryFunction=Image(optional unsigned long width)]
            interface HTMLImageElement : HTMLElement {
              [CEReactions, Reflect] attribute [LegacyNullToEmptyString] DOMString alt;
            };
        "#;
        let defs = parse(src);
        let Definition::Interface(interface) = defs.first().unwrap() else {
            panic!("expected interface");
        };
        let ext: Vec<_> = interface.ext_attrs.iter().map(ToString::to_string).collect();
        assert_eq!(
            ext,
            vec![
                "Exposed=(Window, Worker)",
                "LegacyFactoryFunction=Image(optional unsigned long width)",
            ]
        );
        assert_eq!(interface.ext_attrs[1].name, "LegacyFactoryFunction");
        assert_eq!(
            interface.members[0].to_string(),
            "[CEReactions, Reflect] attribute [LegacyNullToEmptyString] DOMString alt;"
        );
    }

    #[test]
    fn test_all_definition_kinds() {
        let src = r#"
            partial interface Document { readonly attribute HTMLCollection images; };
            interface mixin HTMLHyperlinkElementUtils { stringifier attribute USVString href; };
            HTMLAnchorElement includes HTMLHyperlinkElementUtils;
            callback interface EventListener { undefined handleEvent(Event event); };
            callback BlobCallback = undefined (Blob? blob);
            dictionary FocusOptions : Options {
              boolean preventScroll = false;
              required DOMString id;
              sequence<long> list = [];
            };
            enum ScrollRestoration { "auto", "manual", };
            typedef (HTMLScriptElement or SVGScriptElement) HTMLOrSVGScriptElement;
            namespace console { undefined log(any... data); };
        "#;
        let defs = parse(src);
        let kinds: Vec<_> = defs.iter().map(Definition::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DefinitionKind::Interface,
                DefinitionKind::InterfaceMixin,
                DefinitionKind::Includes,
                DefinitionKind::CallbackInterface,
                DefinitionKind::Callback,
                DefinitionKind::Dictionary,
                DefinitionKind::Enum,
                DefinitionKind::Typedef,
                DefinitionKind::Namespace,
            ]
        );

        let heads: Vec<_> = defs.iter().map(ToString::to_string).collect();
        assert_eq!(heads[0], "partial interface Document");
        assert_eq!(heads[2], "HTMLAnchorElement includes HTMLHyperlinkElementUtils");
        assert_eq!(heads[4], "callback BlobCallback = undefined(Blob? blob)");
        assert_eq!(
            heads[7],
            "typedef (HTMLScriptElement or SVGScriptElement) HTMLOrSVGScriptElement"
        );

        let dict_members: Vec<_> = defs.0[5].members().iter().map(ToString::to_string).collect();
        assert_eq!(
            dict_members,
            vec![
                "boolean preventScroll = false;",
                "required DOMString id;",
                "sequence<long> list = [];",
            ]
        );

        let Definition::Enum(e) = &defs.0[6] else {
            panic!("expected enum");
        };
        assert_eq!(e.values, vec!["auto", "manual"]);
        assert!(defs.0[6].members().is_empty());
    }

    #[test]
    fn test_record_and_nested_generics() {
        let src = "interface X { attribute record<DOMString, sequence<sequence<long>>> table; };";
        assert_eq!(
            rendered_members(src),
            vec!["attribute record<DOMString, sequence<sequence<long>>> table;"]
        );
    }

    #[test]
    fn test_each_parse_is_independent() {
        let parser = IdlParser::new();
        let first = parser
            .parse("interface A { attribute long a; };")
            .unwrap();
        let second = parser
            .parse("interface B { attribute long b; };")
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second.first().unwrap().members().len(), 1);
        assert_eq!(second.first().unwrap().members()[0].name(), Some("b"));
    }

    #[test]
    fn test_empty_document_has_no_constructs() {
        let defs = parse("// nothing here\n");
        assert!(defs.is_empty());
        assert!(defs.first().is_none());
    }

    #[test]
    fn test_missing_semicolon_reports_location() {
        let err = IdlParser::new()
            .parse("interface Foo {\n  attribute long bar\n};")
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::SyntaxError {
                line: 3,
                column: 1,
                reason: "expected ';' after attribute, found '}'".to_string(),
            }
        );
    }

    #[test]
    fn test_unclosed_body_is_error() {
        assert!(IdlParser::new().parse("interface Foo { attribute long bar;").is_err());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = IdlParser::new().parse_bytes(&[0x69, 0xff, 0xfe]).unwrap_err();
        assert_eq!(err, ParseError::InvalidUtf8);
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let bytes = b"\xef\xbb\xbfinterface HTMLFooElement { attribute long bar; };";
        let defs = IdlParser::new().parse_bytes(bytes).unwrap();
        assert_eq!(defs.first().unwrap().to_string(), "interface HTMLFooElement");

        let err = IdlParser::new()
            .parse("interface Foo {\n  \u{feff}attribute long bar;\n};")
            .unwrap_err();
        assert!(matches!(err, ParseError::SyntaxError { line: 2, .. }));
    }
}
