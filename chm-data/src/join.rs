//! Region-attribute join.
//!
//! For each attribute row, every region with the same `name` receives a copy
//! of all attribute values. Regions are scanned linearly per row; the data
//! is a few dozen to a few hundred regions.

use crate::models::{AttributeRow, RegionFeature};
use serde::Serialize;

/// What matched and what did not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinReport {
    pub matched_rows: usize,
    pub unmatched_rows: Vec<String>,
    pub unmatched_regions: Vec<String>,
}

/// Copy each row's values onto the regions sharing its name, in place.
pub fn join_attributes(
    regions: &mut [RegionFeature],
    rows: &[AttributeRow],
    attributes: &[String],
) -> JoinReport {
    let mut report = JoinReport::default();

    for row in rows {
        let mut matched = false;
        for region in regions.iter_mut() {
            if region.name() == Some(row.name.as_str()) {
                for attr in attributes {
                    region.attributes.insert(attr.clone(), row.raw(attr));
                }
                matched = true;
            }
        }
        if matched {
            report.matched_rows += 1;
        } else {
            report.unmatched_rows.push(row.name.clone());
        }
    }

    report.unmatched_regions = regions
        .iter()
        .filter(|r| !r.is_joined())
        .map(|r| r.name().unwrap_or("<unnamed>").to_string())
        .collect();

    log::info!(
        "[CHM] join: {} rows matched, {} rows unmatched, {} regions without data",
        report.matched_rows,
        report.unmatched_rows.len(),
        report.unmatched_regions.len()
    );
    if !report.unmatched_rows.is_empty() {
        log::warn!("[CHM] join: rows with no region: {:?}", report.unmatched_rows);
    }
    report
}
