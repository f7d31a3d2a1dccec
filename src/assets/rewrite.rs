//! Apply an old-name → new-name mapping to asset links.

use std::collections::HashMap;

use super::AssetElement;
use crate::config::NamespaceRegistry;
use crate::dom::Document;

/// Rewrite asset links with the default namespaces.
pub fn rewrite(
    dom: &mut Document,
    assets: &mut [AssetElement],
    mapping: &HashMap<String, String>,
) -> Vec<String> {
    rewrite_with(dom, assets, mapping, &NamespaceRegistry::default())
}

/// Rewrite asset links in place.
///
/// Every asset whose current link is a key of `mapping` gets the mapped value,
/// on the record and on the document element. Links without an entry are left
/// alone and returned, in asset order and once per occurrence, so the caller
/// can decide whether an incomplete rename is fatal.
pub fn rewrite_with(
    dom: &mut Document,
    assets: &mut [AssetElement],
    mapping: &HashMap<String, String>,
    namespaces: &NamespaceRegistry,
) -> Vec<String> {
    let mut not_found = Vec::new();

    for asset in assets.iter_mut() {
        let Some(new_link) = mapping.get(asset.link()) else {
            not_found.push(asset.link().to_string());
            continue;
        };
        match asset.set_link(dom, namespaces, new_link) {
            Ok(true) => {}
            Ok(false) => {
                log::warn!(
                    "<{}> has no href in {}; {} not rewritten",
                    asset.tag.as_str(),
                    namespaces.xlink,
                    asset.link()
                );
                not_found.push(asset.link().to_string());
            }
            Err(e) => {
                log::warn!("could not rewrite {}: {e}", asset.link());
                not_found.push(asset.link().to_string());
            }
        }
    }

    if !not_found.is_empty() {
        log::debug!("{} asset link(s) without a new name", not_found.len());
    }

    not_found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{discover_all, discover_all_with};
    use crate::config::XLINK_NAMESPACE;

    const XML: &str = r#"<article xmlns:xlink="http://www.w3.org/1999/xlink">
<body>
<fig id="f1"><graphic xlink:href="a.tif"/></fig>
<p><inline-graphic xlink:href="b.gif"/></p>
<p><inline-graphic xlink:href="b.gif"/></p>
</body>
</article>"#;

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect()
    }

    #[test]
    fn test_full_mapping_rewrites_everything() {
        let mut dom = Document::parse(XML).unwrap();
        let mut assets = discover_all(&dom);

        let not_found = rewrite(
            &mut dom,
            &mut assets,
            &mapping(&[("a.tif", "pkg-gf1.tif"), ("b.gif", "pkg-i1.gif")]),
        );

        assert!(not_found.is_empty());
        assert_eq!(assets[0].link(), "pkg-gf1.tif");
        assert_eq!(
            dom.get_attr_ns(assets[0].node, XLINK_NAMESPACE, "href"),
            Some("pkg-gf1.tif")
        );
        assert!(dom.to_xml().contains(r#"<inline-graphic xlink:href="pkg-i1.gif"/>"#));
        assert!(!dom.to_xml().contains("b.gif"));
    }

    #[test]
    fn test_missing_entries_are_reported_per_occurrence() {
        let mut dom = Document::parse(XML).unwrap();
        let mut assets = discover_all(&dom);

        let not_found = rewrite(&mut dom, &mut assets, &mapping(&[("a.tif", "new.tif")]));

        assert_eq!(not_found, vec!["b.gif", "b.gif"]);
        assert_eq!(assets[1].link(), "b.gif");
        assert_eq!(
            dom.get_attr_ns(assets[1].node, XLINK_NAMESPACE, "href"),
            Some("b.gif")
        );
    }

    #[test]
    fn test_empty_mapping_reports_all_links() {
        let mut dom = Document::parse(XML).unwrap();
        let mut assets = discover_all(&dom);
        let before = dom.to_xml();

        let not_found = rewrite(&mut dom, &mut assets, &HashMap::new());

        assert_eq!(not_found, vec!["a.tif", "b.gif", "b.gif"]);
        assert_eq!(dom.to_xml(), before);
    }

    #[test]
    fn test_link_in_other_namespace_is_reported() {
        let xml = r#"<article xmlns:l="urn:example:links"><body><fig id="f1"><graphic l:href="a.tif"/></fig></body></article>"#;
        let mut dom = Document::parse(xml).unwrap();
        let custom = NamespaceRegistry {
            xlink: "urn:example:links".to_string(),
            ..NamespaceRegistry::default()
        };
        let mut assets = discover_all_with(&dom, &custom);
        assert_eq!(assets.len(), 1);

        // The default registry looks for the href in the xlink namespace.
        let not_found = rewrite(&mut dom, &mut assets, &mapping(&[("a.tif", "new.tif")]));

        assert_eq!(not_found, vec!["a.tif"]);
        assert_eq!(assets[0].link(), "a.tif");
        assert_eq!(
            dom.get_attr_ns(assets[0].node, "urn:example:links", "href"),
            Some("a.tif")
        );
        assert!(dom.to_xml().contains(r#"<graphic l:href="a.tif"/>"#));

        // The matching registry writes through.
        let not_found = rewrite_with(
            &mut dom,
            &mut assets,
            &mapping(&[("a.tif", "new.tif")]),
            &custom,
        );
        assert!(not_found.is_empty());
        assert_eq!(assets[0].link(), "new.tif");
        assert!(dom.to_xml().contains(r#"<graphic l:href="new.tif"/>"#));
    }
}
