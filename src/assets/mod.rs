//! Article assets: discovery, canonical naming and link rewriting.
//!
//! An asset is any `graphic`, `media`, `inline-graphic`,
//! `supplementary-material` or `inline-supplementary-material` element that
//! carries an `xlink:href`. Each one gets an identity from the nearest
//! enclosing container with an `id` (`fig`, `table-wrap`, `disp-formula`, ...)
//! or, failing that, a running number among the containerless ("bare") assets
//! of its fulltext root.

mod catalog;
mod discovery;
mod naming;
mod rewrite;

use std::fmt;

use crate::config::{NamespaceRegistry, NamingOptions};
use crate::dom::{Document, NodeId};
use crate::error::Result;

pub use catalog::ArticleAssets;
pub use discovery::{discover, discover_all, discover_all_with, discover_with};
pub use naming::{canonical_name, canonical_name_with};
pub use rewrite::{rewrite, rewrite_with};

/// Element kinds that reference an external file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetTag {
    Graphic,
    Media,
    InlineGraphic,
    SupplementaryMaterial,
    InlineSupplementaryMaterial,
}

impl AssetTag {
    pub const ALL: [AssetTag; 5] = [
        AssetTag::Graphic,
        AssetTag::Media,
        AssetTag::InlineGraphic,
        AssetTag::SupplementaryMaterial,
        AssetTag::InlineSupplementaryMaterial,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetTag::Graphic => "graphic",
            AssetTag::Media => "media",
            AssetTag::InlineGraphic => "inline-graphic",
            AssetTag::SupplementaryMaterial => "supplementary-material",
            AssetTag::InlineSupplementaryMaterial => "inline-supplementary-material",
        }
    }
}

/// Elements that give the assets inside them their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerTag {
    Fig,
    FigGroup,
    TableWrap,
    DispFormula,
    App,
    SupplementaryMaterial,
}

impl ContainerTag {
    /// All container tags, in the order their groups are emitted.
    pub const ALL: [ContainerTag; 6] = [
        ContainerTag::Fig,
        ContainerTag::FigGroup,
        ContainerTag::TableWrap,
        ContainerTag::DispFormula,
        ContainerTag::App,
        ContainerTag::SupplementaryMaterial,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerTag::Fig => "fig",
            ContainerTag::FigGroup => "fig-group",
            ContainerTag::TableWrap => "table-wrap",
            ContainerTag::DispFormula => "disp-formula",
            ContainerTag::App => "app",
            ContainerTag::SupplementaryMaterial => "supplementary-material",
        }
    }
}

/// Category code that opens the identity part of a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// `e`: equations (`disp-formula`).
    Formula,
    /// `s`: supplementary material and appendices.
    Supplementary,
    /// `i`: inline graphics inside an identified container.
    Inline,
    /// `g`: figures, tables and everything else.
    Graphic,
}

impl AssetCategory {
    pub fn prefix(self) -> &'static str {
        match self {
            AssetCategory::Formula => "e",
            AssetCategory::Supplementary => "s",
            AssetCategory::Inline => "i",
            AssetCategory::Graphic => "g",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Position of a bare asset among the bare assets of its fulltext root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceNumber {
    /// 1-based position in document order.
    pub value: usize,
    /// Zero-pad width: the number of digits of the root's bare-asset count.
    pub width: usize,
}

impl SequenceNumber {
    pub fn new(value: usize, total: usize) -> Self {
        Self {
            value,
            width: total.max(1).to_string().len(),
        }
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width)
    }
}

/// Identity token of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetIdentity {
    /// `id` of the nearest enclosing container that has one.
    Container(String),
    /// Running number for assets with no identified container.
    Sequence(SequenceNumber),
}

impl fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetIdentity::Container(id) => f.write_str(id),
            AssetIdentity::Sequence(seq) => seq.fmt(f),
        }
    }
}

/// Rendition an `alternatives` entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetVariant {
    /// No `specific-use` and no `content-type`.
    Original,
    /// `specific-use` without `content-type` (web-optimised copy).
    Optimised,
    /// `content-type` present (thumbnail and other derived sizes).
    Thumbnail,
}

impl AssetVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetVariant::Original => "original",
            AssetVariant::Optimised => "optimised",
            AssetVariant::Thumbnail => "thumbnail",
        }
    }
}

/// One discovered asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetElement {
    /// The asset element in the document.
    pub node: NodeId,
    pub tag: AssetTag,
    link: String,
    /// `content-type` attribute (`scielo-267x140`, ...).
    pub content_type: Option<String>,
    /// Whether a `specific-use` attribute is present.
    pub has_specific_use: bool,
    /// Nearest enclosing container, or the element itself for
    /// `supplementary-material`.
    pub container: Option<ContainerTag>,
    pub identity: AssetIdentity,
    /// Language of the enclosing sub-article; empty in the main article.
    pub sub_article_lang: String,
}

impl AssetElement {
    /// Current value of the link attribute.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Change the link, both on this record and on the document element.
    ///
    /// Returns `false`, leaving the record alone, when the element has no
    /// link attribute in the given xlink namespace.
    pub fn set_link(
        &mut self,
        dom: &mut Document,
        namespaces: &NamespaceRegistry,
        link: &str,
    ) -> Result<bool> {
        if !dom.set_attr_ns(self.node, &namespaces.xlink, "href", link)? {
            return Ok(false);
        }
        self.link = link.to_string();
        Ok(true)
    }

    pub fn container_id(&self) -> Option<&str> {
        match &self.identity {
            AssetIdentity::Container(id) => Some(id),
            AssetIdentity::Sequence(_) => None,
        }
    }

    pub fn sequence_number(&self) -> Option<SequenceNumber> {
        match self.identity {
            AssetIdentity::Container(_) => None,
            AssetIdentity::Sequence(seq) => Some(seq),
        }
    }

    /// Tag names the category rules look at: the asset's own and its
    /// container's.
    fn tag_names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.tag.as_str()).chain(self.container.map(ContainerTag::as_str))
    }

    pub fn is_supplementary_material(&self) -> bool {
        self.tag_names().any(|name| name.contains("supplementary"))
    }

    /// Category of the asset.
    ///
    /// Formula beats supplementary beats inline beats graphic. The inline
    /// category only applies to assets identified by a container id: bare
    /// assets are already told apart by their sequence number.
    pub fn category(&self) -> AssetCategory {
        if self.tag_names().any(|name| name == "disp-formula") {
            AssetCategory::Formula
        } else if self
            .tag_names()
            .any(|name| name.contains("supplementary") || name == "app")
        {
            AssetCategory::Supplementary
        } else if self.container_id().is_some()
            && self.tag_names().any(|name| name.contains("inline"))
        {
            AssetCategory::Inline
        } else {
            AssetCategory::Graphic
        }
    }

    pub fn category_prefix(&self) -> &'static str {
        self.category().prefix()
    }

    pub fn variant(&self) -> AssetVariant {
        match (&self.content_type, self.has_specific_use) {
            (Some(_), _) => AssetVariant::Thumbnail,
            (None, true) => AssetVariant::Optimised,
            (None, false) => AssetVariant::Original,
        }
    }

    /// Language the canonical name is suffixed with; empty for main-article
    /// assets.
    pub fn lang_suffix(&self) -> &str {
        &self.sub_article_lang
    }

    /// Canonical file name under `package` with default naming options.
    pub fn canonical_name(&self, package: &str) -> String {
        canonical_name(package, self)
    }

    /// Canonical file name under `package`.
    pub fn canonical_name_with(&self, package: &str, options: &NamingOptions) -> String {
        canonical_name_with(package, self, options)
    }
}
