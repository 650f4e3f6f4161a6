//! Element tree to JSX markup
//!
//! Attribute names are converted to their React spelling, `style` strings
//! become object literals, and the props spread is placed on the root
//! element.

use crate::transform::ExpandProps;

use super::ast::{Attribute, Element, Node};
use super::optimize::split_declarations;

/// Render the document root as indented JSX lines (two spaces per level)
pub fn render_markup(root: &Element, expand_props: ExpandProps, icon: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if icon {
        let mut sized = root.clone();
        sized.set_attr("width", "1em");
        sized.set_attr("height", "1em");
        render_element(&sized, 0, Some(expand_props), &mut lines);
    } else {
        render_element(root, 0, Some(expand_props), &mut lines);
    }
    lines
}

fn render_element(
    element: &Element,
    depth: usize,
    props: Option<ExpandProps>,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    let name = element.name.as_str();

    let mut attrs: Vec<String> = element.attributes.iter().filter_map(jsx_attribute).collect();
    match props {
        Some(ExpandProps::Start) => attrs.insert(0, "{...props}".to_string()),
        Some(ExpandProps::End) => attrs.push("{...props}".to_string()),
        Some(ExpandProps::None) | None => {}
    }

    let open = if attrs.is_empty() {
        format!("<{}", name)
    } else {
        format!("<{} {}", name, attrs.join(" "))
    };

    if !element.has_children() {
        lines.push(format!("{}{} />", indent, open));
        return;
    }

    if element.children.iter().all(|n| matches!(n, Node::Text(_))) {
        lines.push(format!(
            "{}{}>{}</{}>",
            indent,
            open,
            jsx_text(&element.text(), true),
            name
        ));
        return;
    }

    lines.push(format!("{}{}>", indent, open));
    for child in &element.children {
        match child {
            Node::Element(child) => render_element(child, depth + 1, None, lines),
            Node::Text(text) => lines.push(format!("{}  {}", indent, jsx_text(text, false))),
        }
    }
    lines.push(format!("{}</{}>", indent, name));
}

/// React spelling of an SVG attribute name
pub fn jsx_attribute_name(name: &str) -> String {
    match name {
        "class" => return "className".to_string(),
        "for" => return "htmlFor".to_string(),
        _ => {}
    }
    if name.starts_with("data-") || name.starts_with("aria-") {
        return name.to_string();
    }
    camel_case(name)
}

/// React spelling of a CSS property name
pub fn jsx_style_property(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    match property.strip_prefix("-ms-") {
        Some(rest) => format!("ms{}", camel_case(&format!("-{}", rest))),
        None => camel_case(property),
    }
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' || c == ':' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn jsx_attribute(attr: &Attribute) -> Option<String> {
    if attr.name == "style" {
        return style_object(&attr.value).map(|object| format!("style={{{}}}", object));
    }
    Some(format!(
        "{}={}",
        jsx_attribute_name(&attr.name),
        jsx_attribute_value(&attr.value)
    ))
}

fn style_object(style: &str) -> Option<String> {
    let entries: Vec<String> = split_declarations(style)
        .into_iter()
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let key = jsx_style_property(property.trim());
            let key = if crate::naming::is_valid_identifier(&key) {
                key
            } else {
                js_string(&key)
            };
            Some(format!("{}: {}", key, js_string(value.trim())))
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(format!("{{ {} }}", entries.join(", ")))
    }
}

fn jsx_attribute_value(value: &str) -> String {
    if value.contains(|c: char| matches!(c, '"' | '&' | '\n' | '\r')) {
        format!("{{{}}}", js_string(value))
    } else {
        format!("\"{}\"", value)
    }
}

fn jsx_text(text: &str, inline: bool) -> String {
    let unsafe_char = text.contains(|c: char| matches!(c, '{' | '}' | '<' | '>' | '&' | '\n' | '\r'));
    if inline && !unsafe_char && text.trim() == text {
        text.to_string()
    } else {
        format!("{{{}}}", js_string(text))
    }
}

/// Double-quoted JavaScript string literal
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
