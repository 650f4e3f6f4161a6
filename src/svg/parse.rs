//! SVG text to owned tree
//!
//! XML well-formedness is checked by roxmltree. Comments, processing
//! instructions and the doctype never reach the tree, and whitespace-only
//! text nodes are dropped.

use roxmltree::{Node as XmlNode, ParsingOptions};

use crate::error::SvgError;

use super::ast::{Attribute, Document, Element, Node};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse SVG source into a [`Document`]
pub fn parse_svg(source: &str) -> Result<Document, SvgError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(source, options)
        .map_err(|e| SvgError::from_xml(source, &e))?;

    let root = xml.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgError::NotSvg {
            found: root.tag_name().name().to_string(),
            span: root.range(),
        });
    }

    Ok(Document {
        root: convert_element(root),
    })
}

fn convert_element(node: XmlNode<'_, '_>) -> Element {
    let mut element = Element::new(qualified_name(
        node,
        node.tag_name().namespace(),
        node.tag_name().name(),
    ));

    element.attributes.extend(declared_namespaces(node));
    for attr in node.attributes() {
        element.attributes.push(Attribute::new(
            qualified_name(node, attr.namespace(), attr.name()),
            attr.value(),
        ));
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            if !text.trim().is_empty() {
                element.children.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}

/// Namespace declarations introduced by this element (not inherited ones)
fn declared_namespaces(node: XmlNode<'_, '_>) -> Vec<Attribute> {
    let inherited: Vec<(Option<String>, String)> = node
        .parent_element()
        .map(|parent| {
            parent
                .namespaces()
                .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
                .collect()
        })
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| {
            !inherited
                .iter()
                .any(|(name, uri)| name.as_deref() == ns.name() && uri == ns.uri())
        })
        .map(|ns| match ns.name() {
            Some(prefix) => Attribute::new(format!("xmlns:{}", prefix), ns.uri()),
            None => Attribute::new("xmlns", ns.uri()),
        })
        .collect()
}

fn qualified_name(node: XmlNode<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace {
        None | Some(SVG_NS) => local.to_string(),
        Some(XML_NS) => format!("xml:{}", local),
        Some(uri) => match node.lookup_prefix(uri) {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        },
    }
}
