//! Serialize a [`Document`] back to XML text.

use quick_xml::escape::escape;

use super::arena::{Document, NodeData, NodeId};

/// Write the whole document.
///
/// Character data, comments and the prolog come out exactly as they were
/// read; attribute values are re-escaped and always double-quoted. Elements
/// without children are written in their empty form (`<graphic/>`).
pub(crate) fn write_document(dom: &Document) -> String {
    let mut out = String::with_capacity(dom.len() * 16);

    // Explicit stack so deeply nested documents cannot overflow the call stack.
    let mut stack: Vec<Step> = Vec::new();
    push_children(dom, dom.document(), &mut stack);

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                if write_open(dom, id, &mut out) {
                    stack.push(Step::Close(id));
                    push_children(dom, id, &mut stack);
                }
            }
            Step::Close(id) => {
                if let Some(name) = dom.element_qname(id) {
                    out.push_str("</");
                    out.push_str(&name.qualified());
                    out.push('>');
                }
            }
        }
    }

    out
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

/// Queue the children of `id` so they pop in document order.
fn push_children(dom: &Document, id: NodeId, stack: &mut Vec<Step>) {
    let start = stack.len();
    stack.extend(dom.children(id).map(Step::Open));
    stack[start..].reverse();
}

/// Write a node's opening markup. Returns true when its children and closing
/// tag still have to be written.
fn write_open(dom: &Document, id: NodeId, out: &mut String) -> bool {
    let Some(node) = dom.get(id) else {
        return false;
    };

    match &node.data {
        NodeData::Document => return true,
        NodeData::Element { name, attrs } => {
            out.push('<');
            out.push_str(&name.qualified());
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name.qualified());
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }
            if node.first_child.is_none() {
                out.push_str("/>");
                return false;
            }
            out.push('>');
            return true;
        }
        NodeData::Text(text) => out.push_str(text),
        NodeData::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::ProcessingInstruction(body) | NodeData::Declaration(body) => {
            out.push_str("<?");
            out.push_str(body);
            out.push_str("?>");
        }
        NodeData::Doctype(body) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(body.trim_start());
            out.push('>');
        }
    }
    false
}
