//! Article-level view over discovered assets.

use std::collections::{BTreeMap, HashMap};

use super::{AssetElement, discover_all_with, rewrite_with};
use crate::config::Config;
use crate::dom::Document;

/// All assets of an article, discovered once.
///
/// Holds the configuration it was discovered with so renaming and rewriting
/// use the same namespaces and naming options.
#[derive(Debug, Clone)]
pub struct ArticleAssets {
    items: Vec<AssetElement>,
    config: Config,
}

impl ArticleAssets {
    /// Discover the assets of `dom` with the default configuration.
    pub fn new(dom: &Document) -> Self {
        Self::with_config(dom, Config::default())
    }

    /// Discover the assets of `dom`.
    pub fn with_config(dom: &Document, config: Config) -> Self {
        let items = discover_all_with(dom, &config.namespaces);
        Self { items, config }
    }

    /// Discovered assets in discovery order.
    pub fn items(&self) -> &[AssetElement] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Assets keyed by container id, each list in discovery order.
    ///
    /// Bare assets have no container id and are left out.
    pub fn items_by_id(&self) -> BTreeMap<&str, Vec<&AssetElement>> {
        let mut by_id: BTreeMap<&str, Vec<&AssetElement>> = BTreeMap::new();
        for asset in &self.items {
            if let Some(id) = asset.container_id() {
                by_id.entry(id).or_default().push(asset);
            }
        }
        by_id
    }

    /// Assets that are supplementary material or live inside one.
    pub fn supplementary_materials(&self) -> impl Iterator<Item = &AssetElement> {
        self.items
            .iter()
            .filter(|asset| asset.is_supplementary_material())
    }

    /// Current link and canonical name of every asset, in discovery order.
    pub fn rename_plan(&self, package: &str) -> Vec<(String, String)> {
        self.items
            .iter()
            .map(|asset| {
                (
                    asset.link().to_string(),
                    asset.canonical_name_with(package, &self.config.naming),
                )
            })
            .collect()
    }

    /// Replace asset links using `mapping`; returns the links it had no
    /// entry for.
    pub fn replace_names(
        &mut self,
        dom: &mut Document,
        mapping: &HashMap<String, String>,
    ) -> Vec<String> {
        rewrite_with(dom, &mut self.items, mapping, &self.config.namespaces)
    }

    /// Rewrite every link to its canonical name under `package`.
    ///
    /// The same file referenced twice keeps a single entry, so its assets end
    /// up with the name computed for its first occurrence. Returns the links
    /// that could not be rewritten.
    pub fn apply_canonical_names(&mut self, dom: &mut Document, package: &str) -> Vec<String> {
        let mut mapping = HashMap::new();
        for (old, new) in self.rename_plan(package) {
            mapping.entry(old).or_insert(new);
        }
        self.replace_names(dom, &mapping)
    }
}
