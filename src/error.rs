//! Error types for sps-assets operations.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors that can occur while loading documents or configuration.
///
/// Discovery, naming and rewriting never produce these: they always return a
/// best-effort answer. Errors only come from parsing input at the edges or
/// from handing an API a node it cannot work with.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),
}

pub type Result<T> = std::result::Result<T, Error>;
