mod analyzer;
mod config;
mod model;
mod normalizer;
mod parser;
mod report;
mod scraper;
mod utils;

use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::config::{AppConfig, FuelConfig, load_config};
use crate::model::{FetchError, FuelSnapshot, PriceTable};
use crate::parser::{Parser, PetrolPriceParser};
use crate::report::RenderOptions;
use crate::scraper::{Fetcher, FetcherImpl};
use chrono::Utc;
use futures::future::join_all;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let fetcher = match FetcherImpl::new(config.request_timeout_seconds) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let parser = PetrolPriceParser::new();
    let analyzer = AnalyzerImpl::new();

    info!("Fuels to process: {}", config.fuels.len());

    // Process all fuel types concurrently
    let tasks: Vec<_> = config
        .fuels
        .iter()
        .map(|fuel_cfg| process_fuel(fuel_cfg, &fetcher, &parser, &analyzer, &config))
        .collect();
    join_all(tasks).await;
}

/// Runs one fuel's pipeline: fetch, parse, sanitize, analyze, render.
async fn process_fuel(
    fuel_cfg: &FuelConfig,
    fetcher: &FetcherImpl,
    parser: &PetrolPriceParser,
    analyzer: &AnalyzerImpl,
    config: &AppConfig,
) {
    info!("Processing fuel: {}", fuel_cfg.name);

    info!("Fetching price table...");
    let html = match fetcher.fetch(&fuel_cfg.slug).await {
        Ok(html) => html,
        Err(FetchError::InvalidResponse(body)) => {
            warn!("Non-success response for {}", fuel_cfg.name);
            log_and_save_html(&body, &fuel_cfg.slug);
            return;
        }
        Err(e) => {
            warn!("Fetch error for {}: {}", fuel_cfg.name, e);
            return;
        }
    };

    info!("Parsing HTML...");
    let sheet = match parser.parse(&html) {
        Ok(sheet) => sheet,
        Err(e) => {
            log_and_save_html(&html, &fuel_cfg.slug);
            warn!("Parse error for {}: {}", fuel_cfg.name, e);
            return;
        }
    };

    // Sanitize rows; skipped records are reported, not dropped silently
    let (table, rejected) = PriceTable::from_records(sheet.rows);
    for r in &rejected {
        warn!("Skipping {:?}: invalid price {}", r.country, r.price);
    }

    let snapshot = FuelSnapshot {
        fuel: fuel_cfg.name.clone(),
        table,
        as_of: sheet.as_of,
        fetched_at: Utc::now(),
    };

    info!(
        "Snapshot for {} taken at {} (page dated {})",
        snapshot.fuel, snapshot.fetched_at, snapshot.as_of
    );

    let stats = match analyzer.compute_stats(&snapshot.table) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Analysis failed for {}: {}", fuel_cfg.name, e);
            return;
        }
    };
    info!(
        "Stats for {}: mean = {:.3}, std_dev = {:.3}, n = {}",
        fuel_cfg.name, stats.mean, stats.std_dev, stats.count
    );

    let opts = RenderOptions {
        unit: fuel_cfg.unit.clone(),
    };
    let mut out = report::render_summary(&snapshot, &stats, &opts);

    // One assessment per focus country; a miss never aborts the batch
    for country in &config.focus_countries {
        match analyzer.assess_country(&snapshot.table, &stats, country) {
            Ok(assessment) => {
                out.push('\n');
                out.push_str(&report::render_assessment(&assessment, &stats, &opts));
            }
            Err(e) => {
                warn!("{}", e);
                out.push('\n');
                match normalizer::suggest_country(&snapshot.table, country) {
                    Some(suggestion) => out.push_str(&format!(
                        "{}: not in the {} table. Closest name: {}.\n",
                        country, snapshot.fuel, suggestion
                    )),
                    None => out.push_str(&format!(
                        "{}: not in the {} table.\n",
                        country, snapshot.fuel
                    )),
                }
            }
        }
    }

    if config.focus_countries.len() > 1 {
        let groups = analyzer.group_by_band(&snapshot.table, &stats, &config.focus_countries);
        out.push('\n');
        out.push_str(&report::render_band_groups(&groups));
    }

    println!("{out}");
    info!("Finished processing fuel: {}", fuel_cfg.name);
}

/// Logs and saves the provided HTML for debugging purposes.
fn log_and_save_html(html: &str, slug: &str) {
    let folder = Path::new("logs/html");
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create debug folder: {}", e);
        return;
    }
    let filename = folder.join(format!("debug-{}.html", slug.replace(' ', "_")));
    if let Err(e) = fs::write(&filename, html) {
        warn!("Failed to write debug HTML: {}", e);
    } else {
        info!("Saved debug HTML: {}", filename.display());
    }
}
