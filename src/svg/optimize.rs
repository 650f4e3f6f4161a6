//! Tree optimizations
//!
//! Each plugin is a pass over the element tree. Behavior follows svgo's
//! plugins of the same name, restricted to what matters for icon markup.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

use super::ast::{Attribute, Document, Element, Node};
use super::plan::{Plan, Plugin, PluginStep};

lazy_static! {
    static ref RE_NEWLINES_NEED_SPACE: Regex = Regex::new(r"(\S)\r?\n(\S)").unwrap();
    static ref RE_NEWLINES: Regex = Regex::new(r"\r?\n").unwrap();
    static ref RE_SPACES: Regex = Regex::new(r"\s{2,}").unwrap();
    static ref RE_URL_REF: Regex =
        Regex::new(r#"url\(\s*["']?#([^)"'\s]+)["']?\s*\)"#).unwrap();
    static ref RE_RGB: Regex = Regex::new(
        r"^rgb\(\s*([+-]?\d+(?:\.\d+)?%?)\s*[,\s]\s*([+-]?\d+(?:\.\d+)?%?)\s*[,\s]\s*([+-]?\d+(?:\.\d+)?%?)\s*\)$"
    )
    .unwrap();
    static ref RE_STANDARD_DESC: Regex = Regex::new(r"^(Created with|Created using)").unwrap();
}

const EDITOR_NAMESPACES: &[&str] = &[
    "http://inkscape.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://www.inkscape.org/namespaces/inkscape",
    "http://www.bohemiancoding.com/sketch/ns",
    "http://ns.adobe.com/AdobeIllustrator/10.0/",
    "http://ns.adobe.com/Graphs/1.0/",
    "http://ns.adobe.com/AdobeSVGViewerExtensions/3.0/",
    "http://ns.adobe.com/Variables/1.0/",
    "http://ns.adobe.com/SaveForWeb/1.0/",
    "http://ns.adobe.com/Extensibility/1.0/",
    "http://ns.adobe.com/Flows/1.0/",
    "http://ns.adobe.com/ImageReplacement/1.0/",
    "http://ns.adobe.com/GenericCustomNamespace/1.0/",
    "http://ns.adobe.com/XPath/1.0/",
    "http://schemas.microsoft.com/visio/2003/SVGExtensions/",
    "http://taptrix.com/vectorillustrator/svg_extensions",
    "http://www.figma.com/figma/ns",
    "http://purl.org/dc/elements/1.1/",
    "http://creativecommons.org/ns#",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "http://www.serif.com/",
    "http://www.vector.evaxdesign.com",
];

const COLOR_ATTRS: &[&str] = &[
    "color",
    "fill",
    "stroke",
    "stop-color",
    "flood-color",
    "lighting-color",
];

const CONDITIONAL_ATTRS: &[&str] = &["requiredExtensions", "requiredFeatures", "systemLanguage"];

const CONTAINER_ELEMS: &[&str] = &[
    "a",
    "defs",
    "foreignObject",
    "g",
    "glyph",
    "marker",
    "mask",
    "missing-glyph",
    "pattern",
    "svg",
    "switch",
    "symbol",
];

const ANIMATION_ELEMS: &[&str] = &[
    "animate",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "set",
];

const INHERITABLE_ATTRS: &[&str] = &[
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "dominant-baseline",
    "fill",
    "fill-opacity",
    "fill-rule",
    "font",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "letter-spacing",
    "marker",
    "marker-end",
    "marker-mid",
    "marker-start",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-rendering",
    "transform",
    "visibility",
    "word-spacing",
    "writing-mode",
];

/// Presentation properties that may move from `style` to attributes
const PRESENTATION_ATTRS: &[&str] = &[
    "alignment-baseline",
    "baseline-shift",
    "clip",
    "clip-path",
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "display",
    "dominant-baseline",
    "enable-background",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "flood-color",
    "flood-opacity",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "letter-spacing",
    "lighting-color",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "opacity",
    "overflow",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stop-color",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-decoration",
    "text-rendering",
    "unicode-bidi",
    "vector-effect",
    "visibility",
    "word-spacing",
    "writing-mode",
];

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Run every step of `plan` over the document, in order
pub fn optimize(doc: &mut Document, plan: &Plan) {
    for step in plan.steps() {
        apply(&mut doc.root, step);
    }
}

fn apply(root: &mut Element, step: &PluginStep) {
    match step.plugin {
        // The parser never keeps these nodes
        Plugin::RemoveDoctype | Plugin::RemoveXmlProcInst | Plugin::RemoveComments => {}
        Plugin::RemoveMetadata => root.remove_descendants(&mut |e| e.name == "metadata"),
        Plugin::RemoveTitle => root.remove_descendants(&mut |e| e.name == "title"),
        Plugin::RemoveDesc => remove_desc(root, step.flag("removeAny", false)),
        Plugin::RemoveEditorsNsData => {
            remove_editors_ns_data(root, &step.strings("additionalNamespaces"))
        }
        Plugin::CleanupAttrs => cleanup_attrs(
            root,
            step.flag("newlines", true),
            step.flag("trim", true),
            step.flag("spaces", true),
        ),
        Plugin::RemoveEmptyAttrs => root.walk_mut(&mut |e| {
            e.attributes
                .retain(|a| !a.value.is_empty() || CONDITIONAL_ATTRS.contains(&a.name.as_str()))
        }),
        Plugin::CleanupIds => cleanup_ids(root, step),
        Plugin::ConvertColors => convert_colors(root, &ColorSettings::from_step(step)),
        Plugin::RemoveViewBox => remove_view_box(root),
        Plugin::RemoveHiddenElems => remove_hidden_elems(root, false),
        Plugin::RemoveEmptyText => root.remove_descendants(&mut |e| match e.name.as_str() {
            "text" | "tspan" => !e.has_children(),
            "tref" => !e.has_attr("xlink:href"),
            _ => false,
        }),
        Plugin::CollapseGroups => collapse_groups(root),
        Plugin::RemoveEmptyContainers => remove_empty_containers(root),
        Plugin::RemoveUnusedNs => remove_unused_ns(root),
        Plugin::RemoveDimensions => remove_dimensions(root),
        Plugin::ConvertStyleToAttrs => {
            convert_style_to_attrs(root, step.flag("keepImportant", false))
        }
    }
}

fn remove_desc(root: &mut Element, remove_any: bool) {
    root.remove_descendants(&mut |e| {
        e.name == "desc"
            && (remove_any || !e.has_children() || RE_STANDARD_DESC.is_match(&e.text()))
    });
}

fn remove_editors_ns_data(root: &mut Element, additional: &[String]) {
    let mut prefixes = HashSet::new();
    root.walk_mut(&mut |e| {
        e.attributes.retain(|a| {
            let Some(prefix) = a.name.strip_prefix("xmlns:") else {
                return true;
            };
            let is_editor = EDITOR_NAMESPACES.contains(&a.value.as_str())
                || additional.iter().any(|ns| *ns == a.value);
            if is_editor {
                prefixes.insert(prefix.to_string());
            }
            !is_editor
        })
    });

    if prefixes.is_empty() {
        return;
    }

    root.remove_descendants(&mut |e| e.prefix().is_some_and(|p| prefixes.contains(p)));
    root.walk_mut(&mut |e| {
        e.attributes
            .retain(|a| !a.prefix().is_some_and(|p| prefixes.contains(p)))
    });
}

fn cleanup_attrs(root: &mut Element, newlines: bool, trim: bool, spaces: bool) {
    root.walk_mut(&mut |e| {
        for attr in &mut e.attributes {
            let mut value = attr.value.clone();
            if newlines {
                value = RE_NEWLINES_NEED_SPACE
                    .replace_all(&value, "$1 $2")
                    .into_owned();
                value = RE_NEWLINES.replace_all(&value, "").into_owned();
            }
            if spaces {
                value = RE_SPACES.replace_all(&value, " ").into_owned();
            }
            if trim {
                value = value.trim().to_string();
            }
            attr.value = value;
        }
    });
}

/// Ids referenced by an attribute value (`url(#id)` or `href="#id"`)
fn referenced_ids(attr: &Attribute) -> Vec<String> {
    if attr.name == "href" || attr.name.ends_with(":href") {
        if let Some(id) = attr.value.strip_prefix('#') {
            return vec![id.to_string()];
        }
    }
    RE_URL_REF
        .captures_iter(&attr.value)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn rewrite_references(attr: &mut Attribute, renamed: &HashMap<String, String>) {
    if attr.name == "href" || attr.name.ends_with(":href") {
        if let Some(new_id) = attr.value.strip_prefix('#').and_then(|id| renamed.get(id)) {
            attr.value = format!("#{}", new_id);
        }
        return;
    }
    if attr.value.contains("url(") {
        attr.value = RE_URL_REF
            .replace_all(&attr.value, |caps: &Captures| match renamed.get(&caps[1]) {
                Some(new_id) => format!("url(#{})", new_id),
                None => caps[0].to_string(),
            })
            .into_owned();
    }
}

/// Bijective base-52 id: a..Z, aa, ab, ...
fn short_id(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(ID_CHARS[n % ID_CHARS.len()]);
        n /= ID_CHARS.len();
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn cleanup_ids(root: &mut Element, step: &PluginStep) {
    let remove = step.flag("remove", true);
    let minify = step.flag("minify", true);
    let force = step.flag("force", false);
    let preserve = step.strings("preserve");
    let preserve_prefixes = step.strings("preservePrefixes");

    // Ids may be used from stylesheets or scripts we cannot see into
    if !force {
        let mut has_style_or_script = false;
        root.walk(&mut |e| {
            if e.name == "style" || e.name == "script" {
                has_style_or_script = true;
            }
        });
        if has_style_or_script {
            return;
        }
    }

    let is_preserved = |id: &str| {
        preserve.iter().any(|p| p == id) || preserve_prefixes.iter().any(|p| id.starts_with(p.as_str()))
    };

    let mut referenced: Vec<String> = Vec::new();
    root.walk(&mut |e| {
        for attr in &e.attributes {
            for id in referenced_ids(attr) {
                if !referenced.contains(&id) {
                    referenced.push(id);
                }
            }
        }
    });

    if remove {
        root.walk_mut(&mut |e| {
            let unused = e
                .attr("id")
                .is_some_and(|id| !referenced.iter().any(|r| r == id) && !is_preserved(id));
            if unused {
                e.remove_attr("id");
            }
        });
    }

    if !minify {
        return;
    }

    // Ids that keep their name must not be handed out again
    let mut reserved: HashSet<String> = HashSet::new();
    let mut to_rename: Vec<String> = Vec::new();
    root.walk(&mut |e| {
        if let Some(id) = e.attr("id") {
            if referenced.iter().any(|r| r == id) && !is_preserved(id) {
                if !to_rename.iter().any(|r| r == id) {
                    to_rename.push(id.to_string());
                }
            } else {
                reserved.insert(id.to_string());
            }
        }
    });

    let mut renamed = HashMap::new();
    let mut counter = 0;
    for id in to_rename {
        let mut candidate = short_id(counter);
        while reserved.contains(&candidate) || is_preserved(&candidate) {
            counter += 1;
            candidate = short_id(counter);
        }
        counter += 1;
        renamed.insert(id, candidate);
    }

    if renamed.is_empty() {
        return;
    }

    root.walk_mut(&mut |e| {
        for attr in &mut e.attributes {
            if attr.name == "id" {
                if let Some(new_id) = renamed.get(&attr.value) {
                    attr.value = new_id.clone();
                }
            } else {
                rewrite_references(attr, &renamed);
            }
        }
    });
}

#[derive(Debug, Clone, PartialEq)]
enum CurrentColor {
    Off,
    Any,
    Exact(String),
}

#[derive(Debug, Clone)]
struct ColorSettings {
    current_color: CurrentColor,
    rgb2hex: bool,
    lower_case: bool,
    shorthex: bool,
}

impl ColorSettings {
    fn from_step(step: &PluginStep) -> Self {
        let current_color = match step.params.get("currentColor") {
            Some(Value::Bool(true)) => CurrentColor::Any,
            Some(Value::String(value)) => CurrentColor::Exact(value.clone()),
            _ => CurrentColor::Off,
        };
        let lower_case = match step.params.get("convertCase") {
            None | Some(Value::Null) => true,
            Some(Value::String(case)) => case == "lower",
            Some(_) => false,
        };

        Self {
            current_color,
            rgb2hex: step.flag("rgb2hex", true),
            lower_case,
            shorthex: step.flag("shorthex", true),
        }
    }
}

fn convert_colors(element: &mut Element, settings: &ColorSettings) {
    convert_colors_in(element, settings, false);
}

fn convert_colors_in(element: &mut Element, settings: &ColorSettings, in_mask: bool) {
    // Masks rely on luminance, so their colors are never replaced
    let in_mask = in_mask || element.name == "mask";
    for attr in &mut element.attributes {
        if COLOR_ATTRS.contains(&attr.name.as_str()) {
            attr.value = convert_color(&attr.value, settings, in_mask);
        }
    }
    for node in &mut element.children {
        if let Node::Element(child) = node {
            convert_colors_in(child, settings, in_mask);
        }
    }
}

fn convert_color(value: &str, settings: &ColorSettings, in_mask: bool) -> String {
    if !in_mask {
        let replace = match &settings.current_color {
            CurrentColor::Off => false,
            CurrentColor::Any => value != "none",
            CurrentColor::Exact(target) => value == target.as_str(),
        };
        if replace {
            return "currentColor".to_string();
        }
    }

    let mut value = value.to_string();
    if settings.rgb2hex {
        if let Some(hex) = rgb_to_hex(&value) {
            value = hex;
        }
    }
    if settings.lower_case && value.starts_with('#') {
        value = value.to_ascii_lowercase();
    }
    if settings.shorthex {
        if let Some(short) = short_hex(&value) {
            value = short;
        }
    }
    value
}

fn rgb_to_hex(value: &str) -> Option<String> {
    let caps = RE_RGB.captures(value)?;
    let mut channels = [0u8; 3];
    for (slot, index) in channels.iter_mut().zip(1..=3) {
        let raw = &caps[index];
        let number = match raw.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? * 2.55,
            None => raw.parse::<f64>().ok()?,
        };
        *slot = number.round().clamp(0.0, 255.0) as u8;
    }
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        channels[0], channels[1], channels[2]
    ))
}

/// `#aabbcc` -> `#abc`
fn short_hex(value: &str) -> Option<String> {
    let digits = value.strip_prefix('#')?.as_bytes();
    if digits.len() != 6 || !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    if digits[0] == digits[1] && digits[2] == digits[3] && digits[4] == digits[5] {
        Some(format!(
            "#{}{}{}",
            digits[0] as char, digits[2] as char, digits[4] as char
        ))
    } else {
        None
    }
}

fn remove_view_box(root: &mut Element) {
    root.walk_mut(&mut |e| {
        if e.name != "svg" {
            return;
        }
        let redundant = match (e.attr("viewBox"), e.attr("width"), e.attr("height")) {
            (Some(view_box), Some(width), Some(height)) => {
                let nums: Vec<&str> = view_box
                    .split(|c: char| c == ' ' || c == ',')
                    .filter(|s| !s.is_empty())
                    .collect();
                nums.len() == 4
                    && nums[0] == "0"
                    && nums[1] == "0"
                    && width.trim_end_matches("px") == nums[2]
                    && height.trim_end_matches("px") == nums[3]
            }
            _ => false,
        };
        if redundant {
            e.remove_attr("viewBox");
        }
    });
}

fn has_visible_descendant(element: &Element) -> bool {
    element
        .child_elements()
        .any(|child| child.attr("visibility") == Some("visible") || has_visible_descendant(child))
}

fn is_zero(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().parse::<f64>().is_ok_and(|n| n == 0.0))
}

fn is_hidden(element: &Element, in_clip_path: bool) -> bool {
    if element.attr("display") == Some("none") {
        return true;
    }
    // Inside a clip path only geometry counts
    if !in_clip_path && is_zero(element.attr("opacity")) {
        return true;
    }
    if element.attr("visibility") == Some("hidden") && !has_visible_descendant(element) {
        return true;
    }

    let empty = !element.has_children();
    match element.name.as_str() {
        "circle" => empty && is_zero(element.attr("r")),
        "ellipse" => empty && (is_zero(element.attr("rx")) || is_zero(element.attr("ry"))),
        "rect" => empty && (is_zero(element.attr("width")) || is_zero(element.attr("height"))),
        "pattern" | "image" => is_zero(element.attr("width")) || is_zero(element.attr("height")),
        "path" => element.attr("d").map_or(true, |d| d.trim().is_empty()),
        "polyline" | "polygon" => element.attr("points").map_or(true, |p| p.trim().is_empty()),
        _ => false,
    }
}

fn remove_hidden_elems(element: &mut Element, in_clip_path: bool) {
    let in_clip_path = in_clip_path || element.name == "clipPath";
    for node in &mut element.children {
        if let Node::Element(child) = node {
            remove_hidden_elems(child, in_clip_path);
        }
    }
    element
        .children
        .retain(|node| !matches!(node, Node::Element(child) if is_hidden(child, in_clip_path)));
}

fn has_animated_attr(element: &Element, name: &str) -> bool {
    let mut found = false;
    element.walk(&mut |e| {
        if ANIMATION_ELEMS.contains(&e.name.as_str()) && e.attr("attributeName") == Some(name) {
            found = true;
        }
    });
    found
}

/// Push a group's attributes down onto its only child when that is safe
fn move_attrs_to_single_child(group: &mut Element) {
    let Element {
        attributes,
        children,
        ..
    } = group;
    if attributes.is_empty() || children.len() != 1 {
        return;
    }
    let Some(Node::Element(child)) = children.first_mut() else {
        return;
    };

    let group_attr = |name: &str| attributes.iter().any(|a| a.name == name);
    let movable = !child.has_attr("id")
        && !group_attr("filter")
        && (!group_attr("class") || !child.has_attr("class"))
        && ((!group_attr("clip-path") && !group_attr("mask"))
            || (child.name == "g" && !group_attr("transform") && !child.has_attr("transform")));
    if !movable {
        return;
    }

    for attr in attributes.clone() {
        if has_animated_attr(child, &attr.name) {
            return;
        }
        let existing = child.attr(&attr.name).map(str::to_string);
        match existing.as_deref() {
            None | Some("inherit") => child.set_attr(attr.name.clone(), attr.value.clone()),
            Some(current) if attr.name == "transform" => {
                child.set_attr("transform", format!("{} {}", attr.value, current))
            }
            Some(current)
                if !INHERITABLE_ATTRS.contains(&attr.name.as_str()) && current != attr.value =>
            {
                return;
            }
            Some(_) => {}
        }
        attributes.retain(|a| a.name != attr.name);
    }
}

fn collapse_groups(element: &mut Element) {
    for node in &mut element.children {
        if let Node::Element(child) = node {
            collapse_groups(child);
        }
    }

    // Children of <switch> are alternatives and must stay intact
    if element.name == "switch" {
        return;
    }

    let children = std::mem::take(&mut element.children);
    for node in children {
        match node {
            Node::Element(mut group) if group.name == "g" => {
                move_attrs_to_single_child(&mut group);
                let animated = group
                    .child_elements()
                    .any(|c| ANIMATION_ELEMS.contains(&c.name.as_str()));
                if group.attributes.is_empty() && !animated {
                    element.children.extend(group.children);
                } else {
                    element.children.push(Node::Element(group));
                }
            }
            other => element.children.push(other),
        }
    }
}

fn is_removable_container(element: &Element) -> bool {
    let name = element.name.as_str();
    name != "svg"
        && CONTAINER_ELEMS.contains(&name)
        && !element.has_children()
        && !(name == "pattern" && !element.attributes.is_empty())
        && !(name == "mask" && element.has_attr("id"))
        && !(name == "g" && element.has_attr("filter"))
}

fn remove_empty_containers(element: &mut Element) {
    for node in &mut element.children {
        if let Node::Element(child) = node {
            remove_empty_containers(child);
        }
    }
    if element.name == "switch" {
        return;
    }
    element
        .children
        .retain(|node| !matches!(node, Node::Element(child) if is_removable_container(child)));
}

fn remove_unused_ns(root: &mut Element) {
    let mut used: HashSet<String> = HashSet::new();
    root.walk(&mut |e| {
        if let Some(prefix) = e.prefix() {
            used.insert(prefix.to_string());
        }
        for attr in &e.attributes {
            match attr.prefix() {
                Some("xmlns") | None => {}
                Some(prefix) => {
                    used.insert(prefix.to_string());
                }
            }
        }
    });

    root.walk_mut(&mut |e| {
        e.attributes.retain(|a| match a.name.strip_prefix("xmlns:") {
            Some(prefix) => used.contains(prefix),
            None => true,
        })
    });
}

/// Format a number the way JavaScript's `Number#toString` would for
/// ordinary values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn remove_dimensions(root: &mut Element) {
    root.walk_mut(&mut |e| {
        if e.name != "svg" {
            return;
        }
        if e.has_attr("viewBox") {
            e.remove_attr("width");
            e.remove_attr("height");
            return;
        }
        let width = e.attr("width").and_then(|w| w.trim().parse::<f64>().ok());
        let height = e.attr("height").and_then(|h| h.trim().parse::<f64>().ok());
        if let (Some(width), Some(height)) = (width, height) {
            e.set_attr(
                "viewBox",
                format!("0 0 {} {}", format_number(width), format_number(height)),
            );
            e.remove_attr("width");
            e.remove_attr("height");
        }
    });
}

/// Split a style attribute on `;`, ignoring separators inside quotes or
/// parentheses
pub(crate) fn split_declarations(style: &str) -> Vec<&str> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                declarations.push(&style[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    declarations.push(&style[start..]);

    declarations
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect()
}

fn convert_style_to_attrs(root: &mut Element, keep_important: bool) {
    root.walk_mut(&mut |e| {
        let Some(style) = e.attr("style").map(str::to_string) else {
            return;
        };

        let mut remaining = Vec::new();
        let mut moved = Vec::new();
        for declaration in split_declarations(&style) {
            let Some((property, value)) = declaration.split_once(':') else {
                remaining.push(declaration.to_string());
                continue;
            };
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            let important = value.contains("!important");

            if PRESENTATION_ATTRS.contains(&property.as_str()) && !(important && keep_important) {
                let value = value.replace("!important", "").trim().to_string();
                moved.push((property, value));
            } else {
                remaining.push(format!("{}:{}", property, value));
            }
        }

        for (property, value) in moved {
            e.set_attr(property, value);
        }
        if remaining.is_empty() {
            e.remove_attr("style");
        } else {
            e.set_attr("style", remaining.join(";"));
        }
    });
}
