//! Brand Performance Snapshot
//!
//! Pages through brands that have a data row and persists one
//! `BRAND_PERFORMANCE` metrics group per brand. The same service backs the
//! console command and the admin endpoint; only the output sink differs.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info};

use super::performance_items::{default_performance_items, PerformanceItem};
use crate::application::dto::SnapshotIds;
use crate::domain::{
    AspectValues, Brand, BrandPage, BrandPerformanceSource, BrandRepository, MetricGroupCategory,
    MetricsRepository, MetricsSnapshot,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Default number of brands loaded per page
pub const DEFAULT_CHUNK_SIZE: i64 = 128;

/// Where progress lines of a snapshot run go.
pub trait SnapshotOutput: Send + Sync {
    /// Plain line
    fn line(&self, text: &str);

    /// Secondary, dimmed line
    fn comment(&self, text: &str);

    /// Highlighted line
    fn info(&self, text: &str);
}

/// Discards everything.
pub struct NullOutput;

impl SnapshotOutput for NullOutput {
    fn line(&self, _text: &str) {}
    fn comment(&self, _text: &str) {}
    fn info(&self, _text: &str) {}
}

/// Keeps every line in memory, for the admin endpoint and tests.
#[derive(Default)]
pub struct CollectingOutput {
    lines: Mutex<Vec<String>>,
}

impl CollectingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    fn push(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

impl SnapshotOutput for CollectingOutput {
    fn line(&self, text: &str) {
        self.push(text);
    }

    fn comment(&self, text: &str) {
        self.push(text);
    }

    fn info(&self, text: &str) {
        self.push(text);
    }
}

/// Options of one snapshot run.
#[derive(Clone, Default)]
pub struct SnapshotOptions {
    /// Restrict the run to these brand ids; empty means all brands
    pub ids: Vec<i64>,

    /// Output sink, discarded when `None`
    pub output: Option<Arc<dyn SnapshotOutput>>,
}

impl SnapshotOptions {
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids, output: None }
    }

    pub fn with_output(mut self, output: Arc<dyn SnapshotOutput>) -> Self {
        self.output = Some(output);
        self
    }

    /// Parse a comma separated id list, dropping entries that are not numeric.
    pub fn parse_ids(raw: &str) -> Vec<i64> {
        raw.split(',').filter_map(|part| part.trim().parse().ok()).collect()
    }

    /// Ids from a JSON list of numbers and numeric strings.
    pub fn ids_from_list(values: &[Value]) -> Vec<i64> {
        values
            .iter()
            .filter_map(|value| match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect()
    }

    pub fn ids_from(ids: Option<&SnapshotIds>) -> Vec<i64> {
        match ids {
            Some(SnapshotIds::Text(raw)) => Self::parse_ids(raw),
            Some(SnapshotIds::List(values)) => Self::ids_from_list(values),
            None => Vec::new(),
        }
    }
}

/// Counts of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub brands_processed: usize,
    pub values_written: usize,
}

/// Snapshot errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Repository(e) => e,
        }
    }
}

/// Persists brand performance snapshots.
pub struct BrandPerformanceSnapshot {
    brand_repo: Arc<dyn BrandRepository>,
    metrics_repo: Arc<dyn MetricsRepository>,
    source: Arc<dyn BrandPerformanceSource>,
    items: Vec<Box<dyn PerformanceItem>>,
    chunk_size: i64,
}

impl BrandPerformanceSnapshot {
    pub fn new(
        brand_repo: Arc<dyn BrandRepository>,
        metrics_repo: Arc<dyn MetricsRepository>,
        source: Arc<dyn BrandPerformanceSource>,
    ) -> Self {
        Self {
            brand_repo,
            metrics_repo,
            source,
            items: default_performance_items(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: i64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_items(mut self, items: Vec<Box<dyn PerformanceItem>>) -> Self {
        self.items = items;
        self
    }

    /// Run the snapshot and return the process exit code.
    pub async fn run_as_console_command(&self, options: &SnapshotOptions) -> Result<i32, SnapshotError> {
        let summary = self.run(options).await?;
        Ok(Self::handle_output(&summary))
    }

    pub async fn run(&self, options: &SnapshotOptions) -> Result<SnapshotSummary, SnapshotError> {
        let null_output = NullOutput;
        let output: &dyn SnapshotOutput = match &options.output {
            Some(output) => output.as_ref(),
            None => &null_output,
        };

        if options.ids.is_empty() {
            output.comment("No filtering by ID");
        } else {
            let ids: Vec<String> = options.ids.iter().map(|id| id.to_string()).collect();
            output.line(&format!("Only IDs: [ {} ]", ids.join(", ")));
        }

        info!(ids = ?options.ids, chunk_size = self.chunk_size, "Brand performance snapshot started");

        let mut summary = SnapshotSummary::default();
        let mut page = BrandPage {
            ids: options.ids.clone(),
            before_id: None,
            limit: self.chunk_size,
        };

        loop {
            let brands = self.brand_repo.find_snapshot_page(&page).await?;
            let Some(last) = brands.last() else {
                break;
            };
            page.before_id = Some(last.id);
            let full_page = brands.len() as i64 >= self.chunk_size;

            for brand in &brands {
                output.comment(&format!("Brand: [#{}] ...", brand.id));
                let snapshot = self.handle_brand(brand, output).await?;
                summary.brands_processed += 1;
                summary.values_written += snapshot.values.len();
            }

            if !full_page {
                break;
            }
        }

        info!(
            brands = summary.brands_processed,
            values = summary.values_written,
            "Brand performance snapshot finished"
        );

        Ok(summary)
    }

    /// Calculate and persist the metrics of one brand.
    pub async fn handle_brand(
        &self,
        brand: &Brand,
        output: &dyn SnapshotOutput,
    ) -> Result<MetricsSnapshot, SnapshotError> {
        let mut values = AspectValues::new();
        for item in &self.items {
            let item_values = item
                .calculate_aspects_values(brand, self.source.as_ref())
                .await?;
            debug!(brand_id = brand.id, item = item.name(), values = item_values.len(), "Performance item calculated");
            values.merge(item_values);
        }

        let snapshot = self
            .metrics_repo
            .save_snapshot(brand.id, MetricGroupCategory::BrandPerformance, values)
            .await?;

        metrics::record_snapshot_brand(snapshot.values.len());
        info!(brand_id = brand.id, group_id = snapshot.group.id, "Brand performance saved");
        output.info("- metrics saved");

        Ok(snapshot)
    }

    fn handle_output(_summary: &SnapshotSummary) -> i32 {
        0
    }
}
