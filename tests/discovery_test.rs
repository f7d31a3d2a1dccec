//! Discovery and naming over a full SPS article.

use std::collections::HashSet;

use sps_assets::{
    ArticleAssets, AssetTag, ContainerTag, Document, RootTag, SequenceNumber, discover,
    discover_all, roots,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn load_article() -> Document {
    let path = format!("{}/article.xml", FIXTURES_DIR);
    let bytes = std::fs::read(&path).expect("Failed to read fixture");
    Document::from_bytes(&bytes).expect("Failed to parse fixture")
}

fn bare_document(count: usize) -> Document {
    let graphics: String = (1..=count)
        .map(|n| format!(r#"<p><inline-graphic xlink:href="bare{n}.gif"/></p>"#))
        .collect();
    Document::parse(&format!(
        r#"<article xmlns:xlink="http://www.w3.org/1999/xlink"><body>{graphics}</body></article>"#
    ))
    .unwrap()
}

// ============================================================================
// Fulltext roots
// ============================================================================

#[test]
fn test_fixture_roots() {
    let dom = load_article();
    let roots = roots(&dom);

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].tag, RootTag::Article);
    assert_eq!(roots[0].lang.as_deref(), Some("pt"));
    assert_eq!(roots[0].article_type.as_deref(), Some("research-article"));
    assert_eq!(roots[1].tag, RootTag::SubArticle);
    assert_eq!(roots[1].id.as_deref(), Some("s1"));
    assert_eq!(roots[1].lang.as_deref(), Some("en"));
    assert_eq!(roots[1].article_type.as_deref(), Some("translation"));
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_fixture_discovery_order() {
    let dom = load_article();
    let links: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.link().to_string())
        .collect();

    assert_eq!(
        links,
        vec![
            "1234-5678-rsp-55-01-gf01.tif",
            "1234-5678-rsp-55-01-gf01.png",
            "1234-5678-rsp-55-01-gf01.thumbnail.jpg",
            "figura2.tif",
            "formula-in-fig.tif",
            "1234-5678-rsp-55-01-gt01.svg",
            "1234-5678-rsp-55-01-e01.jpg",
            "apendice.pdf",
            "material.pdf",
            "1234-5678-rsp-55-01-i01.gif",
            "eq-inline.tif",
            "dados.csv",
            "1234-5678-rsp-55-01-gf01-en.tif",
            "1234-5678-rsp-55-01-gf01-en.png",
            "en-inline.gif",
        ]
    );
}

#[test]
fn test_every_linked_asset_appears_once() {
    let dom = load_article();
    let assets = discover_all(&dom);

    let expected: HashSet<_> = dom
        .descendants(dom.document())
        .filter(|&id| {
            dom.element_name(id).and_then(AssetTag::from_name).is_some()
                && dom
                    .get_attr_ns(id, "http://www.w3.org/1999/xlink", "href")
                    .is_some()
        })
        .collect();

    let found: Vec<_> = assets.iter().map(|asset| asset.node).collect();
    let unique: HashSet<_> = found.iter().copied().collect();

    assert_eq!(found.len(), unique.len(), "an asset was discovered twice");
    assert_eq!(unique, expected);
}

#[test]
fn test_formula_inside_figure() {
    let dom = load_article();
    let assets = discover_all(&dom);
    let formula = assets
        .iter()
        .find(|asset| asset.link() == "formula-in-fig.tif")
        .unwrap();

    assert_eq!(formula.container, Some(ContainerTag::DispFormula));
    assert_eq!(formula.container_id(), Some("f02"));
    assert_eq!(formula.category_prefix(), "e");
}

#[test]
fn test_bare_numbering_per_root() {
    let dom = load_article();
    let roots = roots(&dom);

    let main_bare: Vec<_> = discover(&dom, &roots[0])
        .iter()
        .filter_map(|asset| asset.sequence_number())
        .map(|seq| seq.to_string())
        .collect();
    assert_eq!(main_bare, vec!["1", "2", "3"]);

    let sub_bare: Vec<_> = discover(&dom, &roots[1])
        .iter()
        .filter_map(|asset| asset.sequence_number())
        .collect();
    assert_eq!(sub_bare, vec![SequenceNumber::new(1, 1)]);
}

#[test]
fn test_eleven_bare_assets_use_two_digits() {
    let dom = bare_document(11);
    let numbers: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.sequence_number().unwrap().to_string())
        .collect();

    assert_eq!(
        numbers,
        vec!["01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11"]
    );
}

#[test]
fn test_nine_bare_assets_use_one_digit() {
    let dom = bare_document(9);
    let numbers: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.sequence_number().unwrap().to_string())
        .collect();

    assert_eq!(numbers, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
}

// ============================================================================
// Canonical names
// ============================================================================

#[test]
fn test_fixture_canonical_names() {
    let dom = load_article();
    let assets = ArticleAssets::new(&dom);
    let plan = assets.rename_plan("PKG");
    let names: Vec<_> = plan.iter().map(|(_, new)| new.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "PKG-gf01.tif",
            "PKG-gf01.png",
            "PKG-gf01-scielo-267x140.jpg",
            "PKG-gf02.tif",
            "PKG-ef02.tif",
            "PKG-gt01.svg",
            "PKG-ee01.jpg",
            "PKG-sapp01.pdf",
            "PKG-ssuppl01.pdf",
            "PKG-g1.gif",
            "PKG-g2.tif",
            "PKG-s3.csv",
            "PKG-gf01-en.tif",
            "PKG-gf01-en.png",
            "PKG-g1-en.gif",
        ]
    );

    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len(), "canonical names collide");
}

#[test]
fn test_alternatives_scenario() {
    let dom = Document::parse(
        r#"<article xmlns:xlink="http://www.w3.org/1999/xlink"><body>
<fig id="f01"><alternatives><graphic xlink:href="original.tif"/><graphic xlink:href="ampliada.png" specific-use="scielo-web"/><graphic xlink:href="miniatura.jpg" specific-use="scielo-web" content-type="scielo-20x20"/></alternatives></fig>
</body></article>"#,
    )
    .unwrap();

    let names: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.canonical_name("NOME-DO-PACOTE"))
        .collect();

    assert_eq!(
        names,
        vec![
            "NOME-DO-PACOTE-gf01.tif",
            "NOME-DO-PACOTE-gf01.png",
            "NOME-DO-PACOTE-gf01-scielo-20x20.jpg",
        ]
    );
}

#[test]
fn test_single_bare_inline_graphic_scenario() {
    let dom = Document::parse(
        r#"<article xmlns:xlink="http://www.w3.org/1999/xlink"><body><inline-graphic xlink:href="eq.tif"/></body></article>"#,
    )
    .unwrap();

    let assets = discover_all(&dom);
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].sequence_number().unwrap().to_string(), "1");
    // Bare assets never take the inline category.
    assert_eq!(assets[0].canonical_name("pkg"), "pkg-g1.tif");
}

#[test]
fn test_language_suffix_asymmetry() {
    let figure = r#"<fig id="f1"><graphic xlink:href="a.tif"/></fig>"#;
    let dom = Document::parse(&format!(
        r#"<article xmlns:xlink="http://www.w3.org/1999/xlink" xml:lang="pt">
<body>{figure}</body>
<sub-article id="s1" xml:lang="en"><body>{figure}</body></sub-article>
</article>"#
    ))
    .unwrap();

    let names: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.canonical_name("pkg"))
        .collect();

    assert_eq!(names, vec!["pkg-gf1.tif", "pkg-gf1-en.tif"]);
}

#[test]
fn test_discovery_and_naming_are_deterministic() {
    let dom = load_article();

    let first: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.canonical_name("PKG"))
        .collect();
    let second: Vec<_> = discover_all(&dom)
        .iter()
        .map(|asset| asset.canonical_name("PKG"))
        .collect();

    assert_eq!(first, second);

    // Also across a serialize/parse round trip of the unmodified document.
    let reparsed = Document::parse(&dom.to_xml()).unwrap();
    let third: Vec<_> = discover_all(&reparsed)
        .iter()
        .map(|asset| asset.canonical_name("PKG"))
        .collect();
    assert_eq!(first, third);
}
