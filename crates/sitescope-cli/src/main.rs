//! sitescope — Command-line dashboard for sitescope-core
//!
//! Each dashboard page of the site-selection analysis is a subcommand. Pages
//! load their dataset, normalize canton codes to names, and print one row
//! per canton.
//!
//! Usage examples
//! --------------
//!
//! - Overview of all configured datasets
//!   $ sitescope overview
//!
//! - Stores per canton, with the mean rating
//!   $ sitescope stores --mean rating
//!
//! - Competitor counts as JSON, from an ad-hoc file
//!   $ sitescope --format json competitors --input data/df_switzerland_lidl.csv
//!
//! - Choropleth values for population density
//!   $ sitescope choropleth population --value density
//!
//! - Canton table and id normalization
//!   $ sitescope regions gall
//!   $ sitescope normalize ZH BE Zürich XX
//!
//! Configuration
//! -------------
//!
//! Dataset paths, column names and the boundary file come from
//! `sitescope.toml` (see `sitescope init-config`). Flags override it.
mod args;
mod config;
mod render;

use crate::args::{CliArgs, Commands, DatasetKind, OutputFormat, PageArgs};
use crate::config::Config;
use anyhow::{bail, Context, Result};
use clap::Parser;
use sitescope_core::loader::{load_points_cached, load_region_table};
use sitescope_core::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Handle init-config early (no config needed)
    if let Commands::InitConfig { path, force } = &args.command {
        return handle_init_config(path, *force);
    }

    init_logging(args.verbose);
    debug!("Arguments: {:?}", args);

    let config = Config::load(args.config.as_deref())?;
    let table = region_table(&args, &config)?;
    let ctx = Dashboard {
        config: &config,
        table: &table,
        format: args.format,
    };

    match args.command {
        Commands::Overview => ctx.overview(),
        Commands::Stores(page) => ctx.page(DatasetKind::Stores, &page),
        Commands::Population(page) => ctx.page(DatasetKind::Population, &page),
        Commands::Competitors(page) => ctx.page(DatasetKind::Competitors, &page),
        Commands::Choropleth {
            dataset,
            value,
            input,
            op,
            boundaries,
        } => {
            let by_count = value.eq_ignore_ascii_case("count");
            let page = PageArgs {
                input,
                attribute: (!by_count).then(|| value.clone()),
                op,
            };
            ctx.choropleth(dataset, &value, &page, boundaries.as_deref())
        }
        Commands::Regions { query } => ctx.regions(query.as_deref()),
        Commands::Normalize { ids } => ctx.normalize(&ids),
        Commands::InitConfig { .. } => Ok(()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn handle_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists. Remove it, edit it, or pass --force.",
            path.display()
        );
    }
    let content = Config::default_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {} with default settings.", path.display());
    Ok(())
}

fn region_table(args: &CliArgs, config: &Config) -> Result<RegionTable> {
    match args.region_table.as_ref().or(config.regions.table.as_ref()) {
        Some(path) => {
            let table = load_region_table(path)
                .with_context(|| format!("Failed to load region table {}", path.display()))?;
            info!("Using {} region(s) from {}", table.len(), path.display());
            Ok(table)
        }
        None => Ok(RegionTable::swiss_cantons().clone()),
    }
}

/// Everything a page needs besides its own flags.
struct Dashboard<'a> {
    config: &'a Config,
    table: &'a RegionTable,
    format: OutputFormat,
}

impl Dashboard<'_> {
    fn source_path(&self, kind: DatasetKind, page: Option<&PageArgs>) -> PathBuf {
        page.and_then(|p| p.input.clone())
            .unwrap_or_else(|| self.config.dataset(kind).path.clone())
    }

    /// Loads (memoized) and normalizes one dataset.
    fn records(&self, kind: DatasetKind, path: &Path) -> Result<Vec<PointRecord>> {
        let schema = &self.config.dataset(kind).schema;
        let raw = load_points_cached(path, schema)
            .with_context(|| format!("Failed to load {} from {}", kind.title(), path.display()))?;
        Ok(normalize_records(&raw, self.table))
    }

    fn summaries(&self, records: &[PointRecord], page: &PageArgs) -> Result<Vec<RegionSummary>> {
        match &page.attribute {
            Some(attribute) => aggregate_by_region(records, attribute, page.op)
                .with_context(|| format!("Cannot compute {} of '{attribute}'", page.op)),
            None => Ok(count_by_region(records)),
        }
    }

    fn overview(&self) -> Result<()> {
        let mut stats = Vec::new();
        for kind in DatasetKind::ALL {
            let path = self.source_path(kind, None);
            match self.records(kind, &path) {
                Ok(records) => stats.push((kind, path, Some(DatasetStats::of(&records)))),
                Err(e) => {
                    warn!("{:#}", e);
                    stats.push((kind, path, None));
                }
            }
        }

        match self.format {
            OutputFormat::Json => {
                let view: Vec<serde_json::Value> = stats
                    .iter()
                    .map(|(kind, path, s)| {
                        serde_json::json!({
                            "dataset": kind.title(),
                            "source": path.display().to_string(),
                            "stats": s,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&view)?);
            }
            OutputFormat::Text => {
                println!("Store Location Analysis");
                println!();
                println!("Identifying candidate cantons for new stores in Switzerland from");
                println!("our store locations, population density and competitor presence.");
                println!();
                for (kind, path, s) in &stats {
                    match s {
                        Some(s) => println!(
                            "  {:<20} {:>7} records in {:>2} regions  ({})",
                            kind.title(),
                            s.records,
                            s.regions,
                            path.display()
                        ),
                        None => println!("  {:<20} unavailable ({})", kind.title(), path.display()),
                    }
                }
            }
        }
        Ok(())
    }

    fn page(&self, kind: DatasetKind, page: &PageArgs) -> Result<()> {
        let path = self.source_path(kind, Some(page));
        let records = self.records(kind, &path)?;
        let summaries = self.summaries(&records, page)?;

        match self.format {
            OutputFormat::Json => {
                let report = render::PageReport {
                    dataset: kind.title(),
                    source: path.display().to_string(),
                    stats: DatasetStats::of(&records),
                    summaries: &summaries,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                println!("{}", kind.title());
                println!();
                let columns: Vec<&str> = page.attribute.iter().map(String::as_str).collect();
                print!("{}", render::summary_table(&summaries, &columns));
            }
        }
        Ok(())
    }

    #[cfg(feature = "json")]
    fn choropleth(
        &self,
        kind: DatasetKind,
        value: &str,
        page: &PageArgs,
        boundaries: Option<&Path>,
    ) -> Result<()> {
        use render::{ChoroplethReport, ChoroplethRow};
        use sitescope_core::loader::load_boundaries_cached;

        let path = self.source_path(kind, Some(page));
        let records = self.records(kind, &path)?;

        let by_count = page.attribute.is_none();
        let summaries = self.summaries(&records, page)?;

        let bounds_cfg = &self.config.boundaries;
        let bounds_path = boundaries.unwrap_or(bounds_cfg.path.as_path());
        let shapes = load_boundaries_cached(bounds_path, &bounds_cfg.id_property)
            .with_context(|| format!("Failed to load boundaries {}", bounds_path.display()))?;

        let join = ChoroplethJoin::build(&summaries, &shapes);
        let report = ChoroplethReport {
            dataset: kind.title(),
            value,
            matched: join
                .matched
                .iter()
                .map(|j| ChoroplethRow::of(j.summary, value, by_count))
                .collect(),
            unmatched: join
                .unmatched
                .iter()
                .map(|s| ChoroplethRow::of(s, value, by_count))
                .collect(),
            uncovered: join.uncovered.iter().map(|b| b.region_id.as_str()).collect(),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print!("{}", render::choropleth_text(&report)),
        }
        Ok(())
    }

    #[cfg(not(feature = "json"))]
    fn choropleth(
        &self,
        _kind: DatasetKind,
        _value: &str,
        _page: &PageArgs,
        _boundaries: Option<&Path>,
    ) -> Result<()> {
        bail!("choropleth needs GeoJSON support; rebuild with the 'json' feature")
    }

    fn regions(&self, query: Option<&str>) -> Result<()> {
        let entries: Vec<&RegionEntry> = match query {
            Some(q) => self.table.find_by_substring(q),
            None => self.table.iter().collect(),
        };
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No regions found matching: {}", query.unwrap_or(""));
                }
                for e in entries {
                    println!("{:<4} {}", e.code, e.name);
                }
            }
        }
        Ok(())
    }

    fn normalize(&self, ids: &[String]) -> Result<()> {
        let pairs: Vec<(&str, String)> = ids
            .iter()
            .map(|raw| (raw.as_str(), normalize_region_id(raw, self.table)))
            .collect();
        match self.format {
            OutputFormat::Json => {
                let view: Vec<serde_json::Value> = pairs
                    .iter()
                    .map(|(raw, name)| serde_json::json!({ "input": raw, "region": name }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&view)?);
            }
            OutputFormat::Text => {
                for (raw, name) in &pairs {
                    println!("{raw} -> {name}{}", render::normalize_note(raw, self.table));
                }
            }
        }
        Ok(())
    }
}
