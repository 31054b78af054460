//! Rendering of scan outcomes and stored rows
//!
//! Live scans render per region and always keep three states apart: the
//! region failed, the region has no orphans, or it has N orphans. Stored
//! rows render as a table with the fixed export headers of their kind plus a
//! count-by-region summary.

use crate::state::StoredOrphan;
use aws_orphans_common::{FleetOutcome, OrphanedResource, RegionOutcome, ResourceKind};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Shown in place of a missing security group VPC
const NO_VPC_LABEL: &str = "EC2-Classic";

/// Count orphans per region, sorted by region code.
pub fn region_summary<'a>(
    records: impl IntoIterator<Item = &'a OrphanedResource>,
) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.region()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(region, count)| (region.to_string(), count))
        .collect()
}

const SECURITY_GROUP_HEADERS: &[&str] =
    &["Region", "Group ID", "Name", "Description", "VPC", "Console URL"];
const ELASTIC_IP_HEADERS: &[&str] = &["Region", "Allocation ID", "Public IP", "Domain", "Console URL"];
const VOLUME_HEADERS: &[&str] = &[
    "Region",
    "Volume ID",
    "Size (GB)",
    "Type",
    "Availability Zone",
    "Created",
    "Console URL",
];

/// Column headers used for tabular export of `kind`.
pub fn export_headers(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::SecurityGroup => SECURITY_GROUP_HEADERS,
        ResourceKind::ElasticIp => ELASTIC_IP_HEADERS,
        ResourceKind::Volume => VOLUME_HEADERS,
    }
}

/// One export row, in [`export_headers`] order.
pub fn export_row(record: &OrphanedResource) -> Vec<String> {
    let console_url = record.console_url();
    match record {
        OrphanedResource::SecurityGroup(sg) => vec![
            sg.region.clone(),
            sg.group_id.clone(),
            sg.group_name.clone(),
            sg.description.clone(),
            sg.vpc_id.clone().unwrap_or_default(),
            console_url,
        ],
        OrphanedResource::ElasticIp(eip) => vec![
            eip.region.clone(),
            eip.allocation_id.clone(),
            eip.public_ip.clone(),
            eip.domain.clone(),
            console_url,
        ],
        OrphanedResource::Volume(vol) => vec![
            vol.region.clone(),
            vol.volume_id.clone(),
            vol.size_gb.to_string(),
            vol.volume_type.clone(),
            vol.availability_zone.clone(),
            vol.create_time.clone(),
            console_url,
        ],
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(*h)));
    table
}

/// Stored rows as a table with the kind's export headers.
pub fn stored_table(kind: ResourceKind, rows: &[StoredOrphan]) -> Table {
    let mut table = new_table(export_headers(kind));
    for row in rows {
        table.add_row(export_row(&row.record));
    }
    table
}

/// Count-by-region summary as a two-column table.
pub fn summary_table(summary: &[(String, usize)]) -> Table {
    let mut table = new_table(&["Region", "Count"]);
    for (region, count) in summary {
        table.add_row(vec![Cell::new(region), Cell::new(count)]);
    }
    table
}

/// The state line for one region: error, none, or a count.
pub fn region_line(kind: ResourceKind, outcome: &RegionOutcome) -> String {
    let region = outcome.region();
    match outcome.error() {
        Some(error) => format!("[{region}] ERROR: {}", error.message),
        None => match outcome.orphans().len() {
            0 => format!("[{region}] No orphaned {}.", kind.label_plural()),
            n => format!("[{region}] {n} orphaned {}(s):", kind.label()),
        },
    }
}

/// Detail lines for one orphan: identity, then console link.
fn detail_lines(record: &OrphanedResource) -> [String; 2] {
    let summary = match record {
        OrphanedResource::SecurityGroup(sg) => format!(
            "  - {}  {}  (VPC: {})",
            sg.group_id,
            sg.group_name,
            sg.vpc_id.as_deref().unwrap_or(NO_VPC_LABEL)
        ),
        OrphanedResource::ElasticIp(eip) => {
            format!("  - {}  {}  ({})", eip.allocation_id, eip.public_ip, eip.domain)
        }
        OrphanedResource::Volume(vol) => format!(
            "  - {}  {} GB {}  ({})",
            vol.volume_id, vol.size_gb, vol.volume_type, vol.availability_zone
        ),
    };
    [summary, format!("    {}", record.console_url())]
}

/// Human-readable report of a live fleet scan.
pub fn render_fleet_text(fleet: &FleetOutcome) -> String {
    let mut out = String::new();

    for outcome in &fleet.regions {
        let _ = writeln!(out, "{}", region_line(fleet.kind, outcome));
        for record in outcome.orphans() {
            for line in detail_lines(record) {
                let _ = writeln!(out, "{line}");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total orphaned {} across regions: {}",
        fleet.kind.label_plural(),
        fleet.total_orphans()
    );

    let failed = fleet.failed_count();
    if failed > 0 {
        let _ = writeln!(out, "Regions with errors: {failed}");
    }

    out
}

/// Stored rows and their region summary as one JSON document.
pub fn stored_json(kind: ResourceKind, rows: &[StoredOrphan]) -> serde_json::Value {
    let summary = region_summary(rows.iter().map(|r| &r.record));
    serde_json::json!({
        "kind": kind.as_str(),
        "total": rows.len(),
        "by_region": summary
            .iter()
            .map(|(region, count)| serde_json::json!({ "region": region, "count": count }))
            .collect::<Vec<_>>(),
        "rows": rows.iter().map(StoredOrphan::to_json).collect::<Vec<_>>(),
    })
}
