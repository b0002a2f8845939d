//! Parse real-world HTML element IDL through the public API.

use crate::common::fixture;
use htmlidl::parsing::{DefinitionKind, MemberKind};
use htmlidl::{IdlParser, WrapperGenerator};

#[test]
fn test_select_element_members() {
    let definitions = IdlParser::new()
        .parse(&fixture("HTMLSelectElement.idl"))
        .unwrap();
    let select = definitions.first().unwrap();

    assert_eq!(select.kind(), DefinitionKind::Interface);
    assert_eq!(select.to_string(), "interface HTMLSelectElement : HTMLElement");
    assert_eq!(select.members().len(), 28);

    let rendered: Vec<String> = select.members().iter().map(|m| m.to_string()).collect();
    assert!(rendered.contains(&"getter HTMLOptionElement? item(unsigned long index);".to_string()));
    assert!(rendered.contains(
        &"[CEReactions] undefined add((HTMLOptionElement or HTMLOptGroupElement) element, optional (HTMLElement or long)? before = null);"
            .to_string()
    ));
    assert!(rendered.contains(
        &"[CEReactions] setter undefined(unsigned long index, HTMLOptionElement? option);"
            .to_string()
    ));

    let overloads = select
        .members()
        .iter()
        .filter(|m| m.name() == Some("remove"))
        .count();
    assert_eq!(overloads, 2);
}

#[test]
fn test_anchor_element_includes_statement_follows_interface() {
    let definitions = IdlParser::new()
        .parse(&fixture("HTMLAnchorElement.idl"))
        .unwrap();

    assert_eq!(definitions.len(), 2);
    let kinds: Vec<DefinitionKind> = definitions.iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, vec![DefinitionKind::Interface, DefinitionKind::Includes]);

    let anchor = definitions.first().unwrap();
    let attributes = anchor
        .members()
        .iter()
        .filter(|m| m.kind() == MemberKind::Attribute)
        .count();
    assert_eq!(attributes, 9);
}

#[test]
fn test_generated_wrapper_has_one_field_per_attribute() {
    let definitions = IdlParser::new()
        .parse(&fixture("HTMLSelectElement.idl"))
        .unwrap();
    let interface = definitions.first().unwrap().as_interface().unwrap();

    let wrapper = WrapperGenerator::default().generate(interface);
    let fields = wrapper
        .source
        .lines()
        .filter(|line| line.starts_with("    "))
        .count();
    assert_eq!(fields, interface.attributes().count());
    assert_eq!(wrapper.file_name(), "html_select_element.rs");
}
