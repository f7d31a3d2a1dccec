//! sps-assets - list and canonicalize SPS article assets

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use sps_assets::util::media_type;
use sps_assets::{ArticleAssets, Config, Document};

#[derive(Parser)]
#[command(name = "sps-assets")]
#[command(version, about = "List and canonicalize SPS article assets", long_about = None)]
#[command(after_help = "EXAMPLES:
    sps-assets article.xml                       List assets and their canonical names
    sps-assets article.xml --json                Same, as JSON
    sps-assets article.xml -r -o renamed.xml     Rewrite links to canonical names")]
struct Cli {
    /// SPS XML file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Package base name (defaults to the input file stem)
    #[arg(short, long)]
    package: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the asset list as JSON
    #[arg(long)]
    json: bool,

    /// Rewrite links to canonical names
    #[arg(short, long, requires = "output")]
    rename: bool,

    /// Where to write the rewritten XML
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// One row of the asset listing.
#[derive(Serialize)]
struct AssetRow<'a> {
    link: &'a str,
    canonical_name: String,
    tag: &'static str,
    container: Option<&'static str>,
    container_id: Option<&'a str>,
    category: &'static str,
    variant: &'static str,
    lang: &'a str,
    media_type: &'static str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    let package = cli
        .package
        .clone()
        .unwrap_or_else(|| package_from_path(&cli.input));

    let bytes = fs::read(&cli.input).map_err(|e| format!("{}: {e}", cli.input.display()))?;
    let mut dom = Document::from_bytes(&bytes).map_err(|e| e.to_string())?;
    let mut assets = ArticleAssets::with_config(&dom, config.clone());

    let rows: Vec<AssetRow<'_>> = assets
        .items()
        .iter()
        .map(|asset| AssetRow {
            link: asset.link(),
            canonical_name: asset.canonical_name_with(&package, &config.naming),
            tag: asset.tag.as_str(),
            container: asset.container.map(|c| c.as_str()),
            container_id: asset.container_id(),
            category: asset.category_prefix(),
            variant: asset.variant().as_str(),
            lang: asset.lang_suffix(),
            media_type: media_type(asset.link()),
        })
        .collect();

    if cli.json {
        let json = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print_table(&rows);
    }

    if cli.rename
        && let Some(output) = &cli.output
    {
        let not_found = assets.apply_canonical_names(&mut dom, &package);
        for link in &not_found {
            log::warn!("not renamed: {link}");
        }
        fs::write(output, dom.to_xml()).map_err(|e| format!("{}: {e}", output.display()))?;
        log::info!("wrote {}", output.display());
    }

    Ok(())
}

fn print_table(rows: &[AssetRow<'_>]) {
    if rows.is_empty() {
        println!("No assets found");
        return;
    }
    let width = rows.iter().map(|row| row.link.len()).max().unwrap_or(0);
    for row in rows {
        println!(
            "{:<width$}  {}  [{} {}]",
            row.link, row.canonical_name, row.tag, row.variant
        );
    }
}

/// Package base name from an XML path: the file stem.
fn package_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string())
}
