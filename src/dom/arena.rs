//! Arena-based XML document tree.
//!
//! All nodes live in one contiguous vector. Parent/child/sibling links are
//! indices into it, so the parent of any node is an O(1) lookup and a node's
//! identity is just its [`NodeId`]. The parent links are written once while
//! the tree is built and are the only parent index the rest of the crate uses.

use crate::error::{Error, Result};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Namespace-aware qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualName {
    /// Prefix as written in the source (`xlink` in `xlink:href`).
    pub prefix: Option<String>,
    /// Local part of the name.
    pub local: String,
    /// Namespace URI the prefix resolved to, if any.
    pub ns: Option<String>,
}

impl QualName {
    pub fn new(prefix: Option<&str>, local: &str, ns: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local: local.to_string(),
            ns: ns.map(str::to_string),
        }
    }

    /// Unprefixed name in no namespace.
    pub fn local(local: &str) -> Self {
        Self::new(None, local, None)
    }

    /// The name as it is written in markup (`prefix:local`).
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

/// Node type in the arena.
///
/// Character data is kept exactly as it appeared in the source (still
/// escaped) so that serializing an untouched tree gives back the same text.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    /// Escaped text content.
    Text(String),
    /// CDATA section body.
    CData(String),
    /// Comment body.
    Comment(String),
    /// Processing instruction body (between `<?` and `?>`).
    ProcessingInstruction(String),
    /// XML declaration body (between `<?` and `?>`).
    Declaration(String),
    /// Document type declaration body.
    Doctype(String),
}

/// XML attribute. The value is stored unescaped.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based XML document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Document {
    /// Create a new empty document holding only the document node.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document node ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new detached element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element { name, attrs }))
    }

    /// Create a new detached node of any kind.
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.alloc(Node::new(data))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Append escaped text, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_node(NodeData::Text(text.to_string()));
        self.append(parent, text_node);
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document is empty (only has the document node).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// The outermost element (`<article>` for SPS documents).
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.document).find(|&id| self.is_element(id))
    }

    /// Parent of a node, `None` for the document node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_some)
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Iterate over all descendants of a node in document order.
    ///
    /// The node itself is not included.
    pub fn descendants(&self, root: NodeId) -> DescendantsIter<'_> {
        let first = self
            .get(root)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        DescendantsIter {
            dom: self,
            root,
            next: first,
        }
    }

    /// Iterate over ancestors of a node, nearest first.
    ///
    /// The node itself is not included; the document node is.
    pub fn ancestors(&self, id: NodeId) -> AncestorsIter<'_> {
        AncestorsIter {
            dom: self,
            current: self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE),
        }
    }

    /// Find the first element with the given local name (document order).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.document)
            .find(|&id| self.element_name(id) == Some(tag))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a Document,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over the subtree below a node.
pub struct DescendantsIter<'a> {
    dom: &'a Document,
    root: NodeId,
    next: NodeId,
}

impl Iterator for DescendantsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_none() {
            return None;
        }
        let id = self.next;
        let node = self.dom.get(id)?;

        if node.first_child.is_some() {
            self.next = node.first_child;
            return Some(id);
        }

        // Climb until a node with a following sibling is found, stopping at root.
        let mut current = id;
        self.next = NodeId::NONE;
        while current != self.root {
            let Some(n) = self.dom.get(current) else {
                break;
            };
            if n.next_sibling.is_some() {
                self.next = n.next_sibling;
                break;
            }
            current = n.parent;
        }
        Some(id)
    }
}

/// Iterator from a node's parent up to the document node.
pub struct AncestorsIter<'a> {
    dom: &'a Document,
    current: NodeId,
}

impl Iterator for AncestorsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.dom.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Convenience methods for element nodes.
impl Document {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.local.as_str()),
            _ => None,
        })
    }

    /// Get element's full qualified name.
    pub fn element_qname(&self, id: NodeId) -> Option<&QualName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        })
    }

    /// Get the attributes of an element (empty for other nodes).
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        static EMPTY: &[Attribute] = &[];
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(EMPTY)
    }

    /// Get an attribute value in no namespace (`id`, `article-type`, ...).
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name.ns.is_none() && a.name.prefix.is_none() && a.name.local == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Get a namespaced attribute value (`xlink:href`, `xml:lang`, ...).
    pub fn get_attr_ns(&self, id: NodeId, ns: &str, attr_name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name.ns.as_deref() == Some(ns) && a.name.local == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Replace the value of an existing namespaced attribute.
    ///
    /// Returns `Ok(false)` when the element has no such attribute; the tree is
    /// left unchanged in that case.
    pub fn set_attr_ns(
        &mut self,
        id: NodeId,
        ns: &str,
        attr_name: &str,
        value: &str,
    ) -> Result<bool> {
        let node = self.get_mut(id).ok_or(Error::NotAnElement(id))?;
        let NodeData::Element { attrs, .. } = &mut node.data else {
            return Err(Error::NotAnElement(id));
        };
        match attrs
            .iter_mut()
            .find(|a| a.name.ns.as_deref() == Some(ns) && a.name.local == attr_name)
        {
            Some(attr) => {
                attr.value = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Get raw (escaped) content of a text node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
