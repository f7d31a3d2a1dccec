//! Canonical file names for assets.
//!
//! `{package}-{category}{identity}{variant}{lang}.{ext}`, e.g.
//! `1234-5678-abc-01-02-e1.tif` or `pkg-gf01-scielo-20x20-en.jpg`.

use super::AssetElement;
use crate::config::{NamingOptions, SuffixOrder};
use crate::util::file_extension;

/// Canonical name of `asset` in package `package` with default options.
pub fn canonical_name(package: &str, asset: &AssetElement) -> String {
    canonical_name_with(package, asset, &NamingOptions::default())
}

/// Canonical name of `asset` in package `package`.
///
/// Pure and deterministic: the name depends only on the arguments. The
/// original and web-optimised renditions of a figure share the identity part
/// and differ only in extension; derived renditions carry their
/// `content-type`. Main-article assets have no language suffix. A link with
/// no extension gives a name with none.
pub fn canonical_name_with(package: &str, asset: &AssetElement, options: &NamingOptions) -> String {
    let mut name = format!("{package}-{}{}", asset.category(), asset.identity);

    let variant = asset.content_type.as_deref().filter(|ct| !ct.is_empty());
    let lang = Some(asset.lang_suffix()).filter(|lang| !lang.is_empty());

    let suffixes = match options.suffix_order {
        SuffixOrder::VariantThenLang => [variant, lang],
        SuffixOrder::LangThenVariant => [lang, variant],
    };
    for suffix in suffixes.into_iter().flatten() {
        name.push('-');
        name.push_str(suffix);
    }

    if let Some(ext) = file_extension(asset.link()) {
        name.push('.');
        name.push_str(ext);
    }

    name
}
