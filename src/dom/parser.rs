//! quick-xml driver that builds a [`Document`] arena.

use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::name::ResolveResult;

use super::arena::{Attribute, Document, NodeData, NodeId, QualName};
use crate::config::XML_NAMESPACE;
use crate::error::{Error, Result};

/// Parse XML text into a document tree.
pub(crate) fn parse_document(content: &str) -> Result<Document> {
    let mut reader = NsReader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut dom = Document::new();
    let mut stack: Vec<NodeId> = vec![dom.document()];

    loop {
        let current = *stack.last().unwrap_or(&dom.document());
        match reader.read_event()? {
            Event::Start(e) => {
                let id = create_element(&reader, &mut dom, &e)?;
                dom.append(current, id);
                stack.push(id);
            }
            Event::Empty(e) => {
                let id = create_element(&reader, &mut dom, &e)?;
                dom.append(current, id);
            }
            Event::End(e) => {
                if stack.len() <= 1 {
                    return Err(Error::InvalidDocument(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                stack.pop();
            }
            Event::Text(e) => {
                dom.append_text(current, &to_string(e.as_ref())?);
            }
            Event::GeneralRef(e) => {
                let entity = to_string(e.as_ref())?;
                dom.append_text(current, &format!("&{entity};"));
            }
            Event::CData(e) => {
                let node = dom.create_node(NodeData::CData(to_string(e.as_ref())?));
                dom.append(current, node);
            }
            Event::Comment(e) => {
                let node = dom.create_node(NodeData::Comment(to_string(e.as_ref())?));
                dom.append(current, node);
            }
            Event::PI(e) => {
                let node = dom.create_node(NodeData::ProcessingInstruction(to_string(e.as_ref())?));
                dom.append(current, node);
            }
            Event::Decl(e) => {
                let node = dom.create_node(NodeData::Declaration(declaration(&e)?));
                dom.append(current, node);
            }
            Event::DocType(e) => {
                let node = dom.create_node(NodeData::Doctype(to_string(e.as_ref())?));
                dom.append(current, node);
            }
            Event::Eof => break,
        }
    }

    if stack.len() > 1 {
        return Err(Error::InvalidDocument(format!(
            "{} element(s) left unclosed",
            stack.len() - 1
        )));
    }
    if dom.root_element().is_none() {
        return Err(Error::InvalidDocument("no root element".to_string()));
    }

    Ok(dom)
}

fn create_element(
    reader: &NsReader<&[u8]>,
    dom: &mut Document,
    e: &BytesStart<'_>,
) -> Result<NodeId> {
    let name = e.name();
    let (resolved, local) = reader.resolver().resolve_element(name);
    let qname = QualName {
        prefix: name.prefix().map(|p| to_string(p.as_ref())).transpose()?,
        local: to_string(local.as_ref())?,
        ns: namespace(resolved)?,
    };

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let prefix = attr.key.prefix().map(|p| to_string(p.as_ref())).transpose()?;
        let (resolved, local) = reader.resolver().resolve_attribute(attr.key);
        let ns = match prefix.as_deref() {
            // The xml prefix is bound by definition, whatever the reader says.
            Some("xml") => Some(XML_NAMESPACE.to_string()),
            _ => namespace(resolved)?,
        };
        let raw = to_string(&attr.value)?;
        let value = unescape(&raw)?.into_owned();
        attrs.push(Attribute {
            name: QualName {
                prefix,
                local: to_string(local.as_ref())?,
                ns,
            },
            value,
        });
    }

    Ok(dom.create_element(qname, attrs))
}

fn namespace(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(to_string(ns.as_ref())?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => {
            log::debug!(
                "undeclared namespace prefix {:?}",
                String::from_utf8_lossy(&prefix)
            );
            Ok(None)
        }
    }
}

fn declaration(e: &BytesDecl<'_>) -> Result<String> {
    let mut decl = format!("xml version=\"{}\"", to_string(&e.version()?)?);
    if let Some(encoding) = e.encoding() {
        let encoding = encoding.map_err(quick_xml::Error::from)?;
        decl.push_str(&format!(" encoding=\"{}\"", to_string(&encoding)?));
    }
    if let Some(standalone) = e.standalone() {
        let standalone = standalone.map_err(quick_xml::Error::from)?;
        decl.push_str(&format!(" standalone=\"{}\"", to_string(&standalone)?));
    }
    Ok(decl)
}

fn to_string(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}
