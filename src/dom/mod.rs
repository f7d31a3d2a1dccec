//! Namespace-aware XML document tree.
//!
//! A small arena DOM that quick-xml parses into. It only carries what asset
//! processing needs: element names and attributes resolved against their
//! namespaces, parent links, attribute mutation, and a serializer that writes
//! the tree back so rewritten links can be persisted.

mod arena;
mod parser;
mod writer;

pub use arena::{
    AncestorsIter, Attribute, ChildrenIter, DescendantsIter, Document, Node, NodeData, NodeId,
    QualName,
};

use crate::error::Result;
use crate::util::{decode_text, extract_xml_encoding};

impl Document {
    /// Parse an XML document from text.
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse_document(content)
    }

    /// Parse an XML document from raw bytes.
    ///
    /// The bytes are decoded as UTF-8 when valid, otherwise with the encoding
    /// named in the XML declaration, otherwise as Windows-1252.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = decode_text(bytes, extract_xml_encoding(bytes));
        parser::parse_document(&text)
    }

    /// Serialize the document to XML text.
    ///
    /// The output is a Rust string; the XML declaration is written back as it
    /// was read, so callers writing a non-UTF-8 declaration out as UTF-8 bytes
    /// are responsible for adjusting it.
    pub fn to_xml(&self) -> String {
        writer::write_document(self)
    }
}
