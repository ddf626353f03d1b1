//! Mutable preset element tree.

/// A single element in a preset document.
///
/// Attribute order and child order are preserved, so a decode/encode round
/// trip keeps untouched subtrees structurally identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetNode {
    /// Tag name of the element.
    pub tag: String,
    /// Text content (usually empty for Ableton presets).
    pub content: String,
    /// Attributes as key-value pairs, in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements, in document order.
    pub children: Vec<PresetNode>,
}

impl PresetNode {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to this element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: PresetNode) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, appending it if absent.
    ///
    /// Returns `true` when the stored value actually changed, so callers can
    /// detect no-op rewrites.
    pub fn set_attribute(&mut self, key: &str, value: &str) -> bool {
        if let Some((_, v)) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            if v == value {
                return false;
            }
            *v = value.to_string();
            return true;
        }
        self.attributes.push((key.to_string(), value.to_string()));
        true
    }

    /// Iterate over direct children with the given tag name.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a PresetNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First direct child with the given tag name, mutable.
    pub fn child_named_mut(&mut self, tag: &str) -> Option<&mut PresetNode> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    /// Whether this node or any descendant has the given tag name.
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tag == tag || self.children.iter().any(|c| c.contains_tag(tag))
    }

    /// Visit this node and every descendant, depth-first.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut PresetNode)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }
}
