//! Asset discovery within fulltext roots.
//!
//! Discovery runs in one pass over the elements that belong to a root (nested
//! sub-articles are their own roots and are skipped), then orders the result:
//! container groups first, in [`ContainerTag::ALL`] order and document order
//! within each tag, then the bare assets in document order.

use std::collections::HashMap;

use super::{AssetElement, AssetIdentity, AssetTag, ContainerTag, SequenceNumber};
use crate::config::NamespaceRegistry;
use crate::dom::{Document, NodeId};
use crate::fulltext::{FulltextRoot, roots_with};

/// An asset element found in the scan, before ordering and numbering.
struct Candidate {
    node: NodeId,
    tag: AssetTag,
    link: String,
    container: Option<ContainerTag>,
    /// Container node and id the asset takes its identity from.
    identity: Option<(NodeId, String)>,
}

/// Discover the assets of every fulltext root with the default namespaces.
pub fn discover_all(dom: &Document) -> Vec<AssetElement> {
    discover_all_with(dom, &NamespaceRegistry::default())
}

/// Discover the assets of every fulltext root: the article first, then each
/// sub-article in document order.
pub fn discover_all_with(dom: &Document, namespaces: &NamespaceRegistry) -> Vec<AssetElement> {
    roots_with(dom, namespaces)
        .iter()
        .flat_map(|root| discover_with(dom, root, namespaces))
        .collect()
}

/// Discover the assets of one fulltext root with the default namespaces.
pub fn discover(dom: &Document, root: &FulltextRoot) -> Vec<AssetElement> {
    discover_with(dom, root, &NamespaceRegistry::default())
}

/// Discover the assets of one fulltext root.
///
/// Elements without a link are not assets and are skipped. An asset whose
/// containers carry no `id` is numbered with the bare assets.
pub fn discover_with(
    dom: &Document,
    root: &FulltextRoot,
    namespaces: &NamespaceRegistry,
) -> Vec<AssetElement> {
    let scope = scope_elements(dom, root.node);

    let mut containers: Vec<(ContainerTag, NodeId)> = Vec::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    for &node in &scope {
        let Some(name) = dom.element_name(node) else {
            continue;
        };
        if let Some(container) = ContainerTag::from_name(name) {
            containers.push((container, node));
        }
        let Some(tag) = AssetTag::from_name(name) else {
            continue;
        };
        let Some(link) = dom
            .get_attr_ns(node, &namespaces.xlink, "href")
            .filter(|link| !link.is_empty())
        else {
            log::debug!("skipping <{name}> without xlink:href");
            continue;
        };

        let (container, identity) = resolve_containers(dom, node, root.node);
        candidates.push(Candidate {
            node,
            tag,
            link: link.to_string(),
            container,
            identity,
        });
    }

    let mut groups: HashMap<NodeId, Vec<usize>> = HashMap::new();
    let mut bare: Vec<usize> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        match &candidate.identity {
            Some((container, _)) => groups.entry(*container).or_default().push(index),
            None => bare.push(index),
        }
    }

    let mut order: Vec<usize> = Vec::with_capacity(candidates.len());
    for tag in ContainerTag::ALL {
        for &(_, container) in containers.iter().filter(|(t, _)| *t == tag) {
            if let Some(members) = groups.get(&container) {
                order.extend(members);
            }
        }
    }

    let lang = root.asset_lang();
    let mut assets: Vec<AssetElement> = order
        .into_iter()
        .map(|index| {
            let candidate = &candidates[index];
            let id = candidate
                .identity
                .as_ref()
                .map(|(_, id)| id.clone())
                .unwrap_or_default();
            build(dom, candidate, AssetIdentity::Container(id), lang)
        })
        .collect();

    let total = bare.len();
    assets.extend(bare.into_iter().enumerate().map(|(position, index)| {
        let sequence = SequenceNumber::new(position + 1, total);
        build(dom, &candidates[index], AssetIdentity::Sequence(sequence), lang)
    }));

    log::trace!(
        "{} {:?}: {} assets ({} bare)",
        root.tag.as_str(),
        root.id,
        assets.len(),
        total
    );

    assets
}

fn build(dom: &Document, candidate: &Candidate, identity: AssetIdentity, lang: &str) -> AssetElement {
    AssetElement {
        node: candidate.node,
        tag: candidate.tag,
        link: candidate.link.clone(),
        content_type: dom
            .get_attr(candidate.node, "content-type")
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        has_specific_use: dom.get_attr(candidate.node, "specific-use").is_some(),
        container: candidate.container,
        identity,
        sub_article_lang: lang.to_string(),
    }
}

/// Elements that belong to `root`, in document order.
///
/// The walk does not enter nested `sub-article` elements: their content
/// belongs to them.
fn scope_elements(dom: &Document, root: NodeId) -> Vec<NodeId> {
    let mut elements = Vec::new();
    let mut stack: Vec<NodeId> = dom.children(root).collect();
    stack.reverse();

    while let Some(id) = stack.pop() {
        if !dom.is_element(id) || dom.element_name(id) == Some("sub-article") {
            continue;
        }
        elements.push(id);
        let start = stack.len();
        stack.extend(dom.children(id));
        stack[start..].reverse();
    }

    elements
}

/// Find the containers that shape an asset.
///
/// Returns the nearest container (used for the category) and the nearest
/// container carrying an `id` (used for the identity). The search covers the
/// asset itself, since `supplementary-material` is both an asset and a
/// container, and stops at the fulltext root.
fn resolve_containers(
    dom: &Document,
    asset: NodeId,
    root: NodeId,
) -> (Option<ContainerTag>, Option<(NodeId, String)>) {
    let mut nearest = None;

    let chain = std::iter::once(asset).chain(dom.ancestors(asset).take_while(|&id| id != root));
    for node in chain {
        let Some(tag) = dom.element_name(node).and_then(ContainerTag::from_name) else {
            continue;
        };
        nearest.get_or_insert(tag);
        if let Some(id) = dom.get_attr(node, "id").filter(|id| !id.is_empty()) {
            return (nearest, Some((node, id.to_string())));
        }
    }

    (nearest, None)
}
