//! Minimal SVG element tree produced by the renderer and the editor.
//!
//! Elements keep attributes in insertion order so the serialized markup is
//! stable. Interactive behaviour is attached as a [`PointerAction`] and run
//! by [`SvgElement::dispatch_pointer_down`].

use std::fmt::Write as _;

use imagemap_core::HostError;

use crate::links::{follow_link, LinkContext, PointerEvent};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Behaviour bound to pointer-down on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerAction {
    /// Navigate to a document-internal link.
    OpenLink(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgElement {
    pub tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    pub children: Vec<SvgElement>,
    pub text: Option<String>,
    pub action: Option<PointerAction>,
}

impl SvgElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, keeping its original position when it already
    /// exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(k, _)| k != name);
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn append_child(&mut self, child: SvgElement) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Children carrying `class`, in document order.
    pub fn children_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a SvgElement> + 'a {
        self.children.iter().filter(move |c| c.has_class(class))
    }

    /// Children with tag `tag`, in document order.
    pub fn children_with_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a SvgElement> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Parses a numeric attribute.
    pub fn number_attr(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(|v| v.parse().ok())
    }

    /// Runs this element's pointer-down behaviour.
    ///
    /// Returns `Ok(false)` when the element has no action.
    pub fn dispatch_pointer_down(
        &self,
        event: &mut PointerEvent,
        ctx: &LinkContext<'_>,
    ) -> Result<bool, HostError> {
        match &self.action {
            Some(PointerAction::OpenLink(target)) => {
                follow_link(target, event, ctx)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Serializes the element and its subtree as SVG markup.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (k, v) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", k, escape(v));
        }
        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escapes text for use in XML content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
