//! Application layer - configuration, reconciliation, persistence.

pub mod config;
pub mod enrichment;
pub mod fixed_income;
pub mod history;
pub mod jobs;
pub mod reconcile;
pub mod screener;
pub mod snapshot;
pub mod snowball;
mod wiring;

pub use config::{
    Config, EnrichmentConfig, LoggingConfig, OutputConfig, ScreeningConfig, SourcesConfig,
};
pub use enrichment::{Enricher, EnrichmentPolicy};
pub use history::HistoryStore;
pub use jobs::{Backfill, BackfillReport, ExportReport};
pub use reconcile::{merge_funds, AssetScope, Discovery, Reconciler, Screening};
pub use screener::{AssetType, ScreenFilters, ScreenResult, Screener};
pub use snapshot::{Snapshot, SnapshotWriter};
pub use snowball::SnowballSection;
pub use wiring::Sources;
