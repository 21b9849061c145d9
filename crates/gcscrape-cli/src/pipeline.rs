//! Stage-by-stage orchestration of a scrape run.
//!
//! Stages run strictly in order and any failure aborts the run. Errors are
//! wrapped with the stage being entered, and the cache code for detail pages.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use gcscrape_core::{CacheRecord, ScrapeConfig};
use gcscrape_scraper::{resolve_region, GeocachingClient, RegionSet};

use crate::export::{export_records, ExportFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Stage {
    Init,
    ListingsFetched,
    RegionsResolved,
    FilteredByRegion,
    DetailsEnriched,
    Cleaned,
    Exported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::ListingsFetched => "LISTINGS_FETCHED",
            Self::RegionsResolved => "REGIONS_RESOLVED",
            Self::FilteredByRegion => "FILTERED_BY_REGION",
            Self::DetailsEnriched => "DETAILS_ENRICHED",
            Self::Cleaned => "CLEANED",
            Self::Exported => "EXPORTED",
        };
        f.write_str(name)
    }
}

/// Record counts after each stage, logged once the run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PipelineSummary {
    pub listed: usize,
    pub in_region: usize,
    pub enriched: usize,
    pub exported: usize,
    pub files: Vec<PathBuf>,
}

/// Tracks the current stage and logs each transition.
struct Progress {
    stage: Stage,
}

impl Progress {
    fn new() -> Self {
        Self { stage: Stage::Init }
    }

    fn advance(&mut self, next: Stage, count: usize) {
        debug_assert!(next > self.stage, "stages only move forward");
        self.stage = next;
        tracing::info!(stage = %next, count, "stage complete");
    }

    fn failed(&self, next: Stage) -> String {
        format!("pipeline failed in {} -> {next}", self.stage)
    }
}

/// Runs every stage from listing fetch to export.
///
/// # Errors
///
/// Returns the first failure, with context naming the stage being entered.
/// Detail-page failures also name the cache code.
pub(crate) async fn run_pipeline(
    client: &GeocachingClient,
    scrape: &ScrapeConfig,
    regions: &RegionSet,
    output_stem: &Path,
    format: ExportFormat,
) -> anyhow::Result<PipelineSummary> {
    let mut progress = Progress::new();
    let mut summary = PipelineSummary::default();

    let mut records = client
        .fetch_listings(&scrape.search)
        .await
        .with_context(|| progress.failed(Stage::ListingsFetched))?;
    summary.listed = records.len();
    progress.advance(Stage::ListingsFetched, records.len());

    for record in &mut records {
        record.region = resolve_region(record, regions.polygons());
    }
    progress.advance(Stage::RegionsResolved, records.len());

    let mut records = filter_by_region(records);
    summary.in_region = records.len();
    progress.advance(Stage::FilteredByRegion, records.len());

    let total = records.len();
    for (idx, record) in records.iter_mut().enumerate() {
        let code = record.cache_code.clone();
        client
            .enrich(&scrape.detail, record)
            .await
            .with_context(|| format!("{} at cache {code}", progress.failed(Stage::DetailsEnriched)))?;
        tracing::debug!(code = %code, done = idx + 1, total, "detail progress");
    }
    summary.enriched = records.len();
    progress.advance(Stage::DetailsEnriched, records.len());

    let records = cleanup(records);
    progress.advance(Stage::Cleaned, records.len());

    summary.files = export_records(&records, output_stem, format)
        .with_context(|| progress.failed(Stage::Exported))?;
    summary.exported = records.len();
    progress.advance(Stage::Exported, records.len());

    tracing::info!(
        listed = summary.listed,
        in_region = summary.in_region,
        enriched = summary.enriched,
        exported = summary.exported,
        "scrape run finished"
    );
    Ok(summary)
}

/// Drops records outside every region, keeping order.
pub(crate) fn filter_by_region(records: Vec<CacheRecord>) -> Vec<CacheRecord> {
    let before = records.len();
    let kept: Vec<CacheRecord> = records.into_iter().filter(CacheRecord::has_region).collect();
    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), "dropped records outside every region");
    }
    kept
}

/// Drops records without a usable detail URL, keeping order.
pub(crate) fn cleanup(records: Vec<CacheRecord>) -> Vec<CacheRecord> {
    let before = records.len();
    let kept: Vec<CacheRecord> = records
        .into_iter()
        .filter(CacheRecord::has_details_url)
        .collect();
    if kept.len() < before {
        tracing::warn!(dropped = before - kept.len(), "dropped records without a detail URL");
    }
    kept
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
