//! Fleet scan orchestrator

use super::factory::InventoryFactory;
use super::region::scan_region;
use crate::config::ScanSettings;
use aws_orphans_common::{FleetOutcome, RegionCatalog, ResourceKind};
use futures::StreamExt;
use futures::stream;
use tracing::info;

/// Scan one resource kind across the filtered catalog.
///
/// Up to `max_concurrency` regions run at once. Outcomes are indexed by their
/// position in the filtered catalog and reordered after collection, so the
/// result order never depends on completion order. A failing region only
/// affects its own outcome.
pub async fn scan_fleet<F: InventoryFactory>(
    factory: &F,
    catalog: &RegionCatalog,
    kind: ResourceKind,
    requested: Option<&[String]>,
    settings: &ScanSettings,
) -> FleetOutcome {
    let regions = catalog.filter(requested);
    info!(
        kind = %kind,
        regions = regions.len(),
        concurrency = settings.max_concurrency,
        "Starting fleet scan"
    );

    let mut indexed: Vec<_> = stream::iter(regions.iter().enumerate())
        .map(|(idx, region)| async move {
            (idx, scan_region(factory, region, kind, settings).await)
        })
        .buffer_unordered(settings.max_concurrency.max(1))
        .collect()
        .await;

    indexed.sort_by_key(|(idx, _)| *idx);

    let fleet = FleetOutcome::new(kind, indexed.into_iter().map(|(_, o)| o).collect());
    info!(
        kind = %kind,
        orphans = fleet.total_orphans(),
        failed_regions = fleet.failed_count(),
        "Fleet scan complete"
    );
    fleet
}
