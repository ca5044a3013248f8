//! XML normalization
//!
//! BoardGameGeek answers every request with an XML document whose shape varies
//! between endpoints: some values live in attributes (`<thread id="1" .../>`),
//! some in `value` attributes of child elements (`<minplayers value="3"/>`) and
//! some in child text (`<subject>Hello</subject>`). This module parses a
//! document into an owned tree of [`XmlNode`]s and exposes lookup helpers that
//! tolerate missing nodes, so the domain mappers can flatten a response into a
//! plain record with empty-string and zero defaults.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::BggError;

/// An element of a parsed XML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    /// Concatenated, trimmed text and CDATA content directly under this element
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<XmlNode, BggError> {
        let document = roxmltree::Document::parse(xml)?;
        Ok(Self::from_element(document.root_element()))
    }

    fn from_element(node: roxmltree::Node<'_, '_>) -> XmlNode {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_element(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        XmlNode {
            name: node.tag_name().name().to_string(),
            attributes,
            text: text.trim().to_string(),
            children,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The `value` attribute of the first child named `name`
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.attr("value"))
    }

    /// The text content of the first child named `name`, if non-empty
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Attribute-first lookup that falls back to child text.
    ///
    /// Attributes and child elements are treated as one flat namespace, which
    /// is how thread and article documents mix `id="..."` attributes with
    /// `<subject>` elements.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.attr(name).or_else(|| self.text_of(name))
    }

    /// [`XmlNode::field`] with an empty-string default
    pub fn string(&self, name: &str) -> String {
        self.field(name).unwrap_or_default().to_string()
    }

    /// [`XmlNode::field`] parsed as a number, zero when missing or unparsable
    pub fn number<T: FromStr + Default>(&self, name: &str) -> T {
        parse_or_default(self.field(name))
    }
}

/// Parse an optional raw value, falling back to the type's default
pub fn parse_or_default<T: FromStr + Default>(raw: Option<&str>) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or_default()
}

/// Detect the error documents BoardGameGeek returns with a 200 status.
///
/// Two shapes are in use: `<error message="..."/>` and
/// `<errors><error><message>...</message></error></errors>`.
pub fn api_error(root: &XmlNode) -> Option<String> {
    match root.name.as_str() {
        "error" => Some(
            root.field("message")
                .unwrap_or(root.text.as_str())
                .to_string(),
        ),
        "errors" => Some(
            root.children_named("error")
                .map(|e| e.string("message"))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}
