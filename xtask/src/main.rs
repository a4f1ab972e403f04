//! Workspace tasks: `cargo xtask <command>`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use elastic_nav::options::SiteConfig;
use elastic_nav::routing::{
    extract_region, FragmentSource, FsFragmentSource, RouteTable,
};

#[derive(Parser)]
#[command(name = "xtask", about = "elastic-nav site tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify every routed fragment exists and carries the content region.
    CheckRoutes {
        /// Site configuration (TOML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory the site is served from.
        #[arg(long, default_value = "dist")]
        root: PathBuf,
    },
    /// Print the JSON schema of the site configuration.
    Schema,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match Cli::parse().command {
        Command::CheckRoutes { config, root } => {
            check_routes(config, &root)
        }
        Command::Schema => {
            let schema = SiteConfig::json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn check_routes(config: Option<PathBuf>, root: &Path) -> Result<()> {
    let config = match config {
        Some(path) => SiteConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SiteConfig::default(),
    };
    let table = RouteTable::from_config(&config)?;
    let source = FsFragmentSource::new(root);
    let region = &config.router.content_region_id;

    let mut keys: Vec<_> = table.iter().map(|(key, _)| key.clone()).collect();
    keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut failures = 0usize;
    for key in &keys {
        // The home page ships inline in the shell document.
        if key == table.home() {
            continue;
        }
        let Some(page) = table.get(key) else { continue };
        match pollster::block_on(source.fetch(&page.source_path)) {
            Ok(markup) if extract_region(&markup, region).is_some() => {
                log::info!("ok       {:<12} {}", key.as_str(), page.source_path);
            }
            Ok(_) => {
                log::warn!(
                    "partial  {:<12} {} has no #{region}, whole fragment used",
                    key.as_str(),
                    page.source_path
                );
            }
            Err(e) => {
                log::error!(
                    "missing  {:<12} {}: {e}",
                    key.as_str(),
                    page.source_path
                );
                failures += 1;
            }
        }
    }

    log::info!("navigation:");
    for (key, page) in table.nav_entries() {
        log::info!(
            "  {:>3}  {:<12} {}",
            page.order,
            key.as_str(),
            table.canonical_path(key)
        );
    }

    if failures > 0 {
        bail!("{failures} of {} routes failed", keys.len());
    }
    log::info!("{} routes checked", keys.len());
    Ok(())
}
