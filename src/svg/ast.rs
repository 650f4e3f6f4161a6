//! Owned SVG document tree
//!
//! Names keep their namespace prefix (`xlink:href`, `sodipodi:namedview`) and
//! namespace declarations are stored as ordinary `xmlns` / `xmlns:*`
//! attributes on the element that declares them.

/// A parsed SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A single attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Namespace prefix of the attribute name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: vec![],
            children: vec![],
        }
    }

    /// Add an attribute (builder style, used heavily in tests)
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a child element (builder style)
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Add a text child (builder style)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Namespace prefix of the element name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Visit this element and all descendants, parents first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    /// Mutable pre-order traversal
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.walk_mut(visit);
            }
        }
    }

    /// Remove descendant elements for which `remove` returns true
    ///
    /// Children are filtered before their parent is inspected, so a parent
    /// sees its already-filtered children.
    pub fn remove_descendants(&mut self, remove: &mut impl FnMut(&Element) -> bool) {
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.remove_descendants(remove);
            }
        }
        self.children.retain(|node| match node {
            Node::Element(child) => !remove(child),
            Node::Text(_) => true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("svg")
            .with_attr("viewBox", "0 0 24 24")
            .with_child(
                Element::new("g")
                    .with_attr("id", "group")
                    .with_child(Element::new("path").with_attr("d", "M0 0")),
            )
            .with_child(Element::new("title").with_text("Home"))
    }

    #[test]
    fn test_attr_accessors() {
        let mut svg = sample();
        assert_eq!(svg.attr("viewBox"), Some("0 0 24 24"));
        assert!(!svg.has_attr("width"));

        svg.set_attr("width", "24");
        svg.set_attr("viewBox", "0 0 48 48");
        assert_eq!(svg.attributes[0].value, "0 0 48 48");
        assert_eq!(svg.attributes[1].name, "width");

        assert_eq!(svg.remove_attr("width"), Some("24".to_string()));
        assert_eq!(svg.remove_attr("width"), None);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(Attribute::new("xlink:href", "#a").prefix(), Some("xlink"));
        assert_eq!(Attribute::new("href", "#a").prefix(), None);
        assert_eq!(Element::new("sodipodi:namedview").prefix(), Some("sodipodi"));
    }

    #[test]
    fn test_walk_order() {
        let svg = sample();
        let mut names = Vec::new();
        svg.walk(&mut |e| names.push(e.name.clone()));
        assert_eq!(names, vec!["svg", "g", "path", "title"]);
    }

    #[test]
    fn test_walk_mut() {
        let mut svg = sample();
        svg.walk_mut(&mut |e| e.set_attr("data-seen", "1"));
        let mut count = 0;
        svg.walk(&mut |e| {
            assert_eq!(e.attr("data-seen"), Some("1"));
            count += 1;
        });
        assert_eq!(count, 4);
    }

    #[test]
    fn test_remove_descendants() {
        let mut svg = sample();
        svg.remove_descendants(&mut |e| e.name == "path");
        let g = svg.child_elements().next().unwrap();
        assert!(!g.has_children());
    }

    #[test]
    fn test_remove_descendants_sees_filtered_children() {
        let mut svg = sample();
        svg.remove_descendants(&mut |e| e.name == "path" || (e.name == "g" && !e.has_children()));
        assert_eq!(svg.child_elements().count(), 1);
    }

    #[test]
    fn test_text() {
        let title = Element::new("title").with_text("Ho").with_text("me");
        assert_eq!(title.text(), "Home");
    }
}
