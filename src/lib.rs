//! # sps-assets
//!
//! Asset discovery and canonical naming for SciELO Publishing Schema (SPS)
//! articles, the JATS dialect used by SciELO.
//!
//! ## Features
//!
//! - Enumerate fulltext roots: the main article and every `sub-article`
//! - Discover figures, tables, formulas, supplementary files and media,
//!   including every rendition inside `alternatives`
//! - Derive deterministic, collision-free package file names
//! - Rewrite `xlink:href` values from an old → new mapping, reporting misses
//!
//! ## Quick Start
//!
//! ```
//! use sps_assets::{Document, ArticleAssets};
//!
//! let xml = r#"<article xmlns:xlink="http://www.w3.org/1999/xlink">
//!   <body><fig id="f01"><alternatives>
//!     <graphic xlink:href="original.tif"/>
//!     <graphic xlink:href="ampliada.png" specific-use="scielo-web"/>
//!   </alternatives></fig></body>
//! </article>"#;
//!
//! let mut dom = Document::parse(xml).unwrap();
//! let mut assets = ArticleAssets::new(&dom);
//!
//! let names: Vec<_> = assets
//!     .items()
//!     .iter()
//!     .map(|asset| asset.canonical_name("NOME-DO-PACOTE"))
//!     .collect();
//! assert_eq!(names, ["NOME-DO-PACOTE-gf01.tif", "NOME-DO-PACOTE-gf01.png"]);
//!
//! let not_found = assets.apply_canonical_names(&mut dom, "NOME-DO-PACOTE");
//! assert!(not_found.is_empty());
//! ```
//!
//! ## Lower-level API
//!
//! [`fulltext::roots`] → [`assets::discover`] → [`assets::canonical_name`] /
//! [`assets::rewrite`]. None of these perform I/O or fail on odd markup.

pub mod assets;
pub mod config;
pub mod dom;
pub mod error;
pub mod fulltext;
pub mod util;

pub use assets::{
    ArticleAssets, AssetCategory, AssetElement, AssetIdentity, AssetTag, AssetVariant,
    ContainerTag, SequenceNumber, canonical_name, discover, discover_all, rewrite,
};
pub use config::{Config, NamespaceRegistry, NamingOptions, SuffixOrder};
pub use dom::{Document, NodeId};
pub use error::{Error, Result};
pub use fulltext::{FulltextRoot, RootTag, roots};
