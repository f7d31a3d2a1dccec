//! Fulltext roots: the main article and each of its sub-articles.
//!
//! Every asset in an SPS document belongs to exactly one of these. Translations
//! live in `sub-article` elements (nested anywhere, possibly inside other
//! sub-articles), and their assets are named with the sub-article's language.

use crate::config::NamespaceRegistry;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// Kind of a fulltext root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootTag {
    /// The document's outermost element.
    Article,
    /// A `sub-article` element (translation, reviewer report, ...).
    SubArticle,
}

impl RootTag {
    pub fn as_str(self) -> &'static str {
        match self {
            RootTag::Article => "article",
            RootTag::SubArticle => "sub-article",
        }
    }
}

/// One independently scannable unit of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulltextRoot {
    pub tag: RootTag,
    /// The `article` or `sub-article` element.
    pub node: NodeId,
    /// `id` of a sub-article; always `None` for the main article.
    pub id: Option<String>,
    /// Declared `xml:lang`.
    pub lang: Option<String>,
    /// Declared `article-type`.
    pub article_type: Option<String>,
}

impl FulltextRoot {
    /// Build the root record for an element.
    ///
    /// `sub-article` elements become [`RootTag::SubArticle`]; any other element
    /// is treated as the main article. Fails only when `node` is not an
    /// element.
    pub fn from_node(dom: &Document, node: NodeId, namespaces: &NamespaceRegistry) -> Result<Self> {
        let tag = match dom.element_name(node) {
            Some("sub-article") => RootTag::SubArticle,
            Some(_) => RootTag::Article,
            None => return Err(Error::NotAnElement(node)),
        };

        let id = match tag {
            RootTag::Article => None,
            RootTag::SubArticle => non_empty(dom.get_attr(node, "id")),
        };

        Ok(Self {
            tag,
            node,
            id,
            lang: non_empty(dom.get_attr_ns(node, &namespaces.xml, "lang")),
            article_type: non_empty(dom.get_attr(node, "article-type")),
        })
    }

    /// True for sub-articles.
    pub fn is_sub_article(&self) -> bool {
        self.tag == RootTag::SubArticle
    }

    /// Language suffix carried by this root's assets: the sub-article's
    /// language, or empty for the main article.
    pub fn asset_lang(&self) -> &str {
        match self.tag {
            RootTag::Article => "",
            RootTag::SubArticle => self.lang.as_deref().unwrap_or_default(),
        }
    }
}

/// Enumerate the fulltext roots of a document with the default namespaces.
pub fn roots(dom: &Document) -> Vec<FulltextRoot> {
    roots_with(dom, &NamespaceRegistry::default())
}

/// Enumerate the fulltext roots of a document.
///
/// The main article comes first, followed by every `sub-article` in document
/// order regardless of nesting depth. An empty document yields nothing.
pub fn roots_with(dom: &Document, namespaces: &NamespaceRegistry) -> Vec<FulltextRoot> {
    let Some(article) = dom.root_element() else {
        return Vec::new();
    };

    let sub_articles = dom
        .descendants(article)
        .filter(|&id| dom.element_name(id) == Some("sub-article"));

    std::iter::once(article)
        .chain(sub_articles)
        .filter_map(|node| FulltextRoot::from_node(dom, node, namespaces).ok())
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
