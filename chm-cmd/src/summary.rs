//! Per-attribute summary of the attribute table.

use crate::source::SourceFetch;
use anyhow::Context;
use chm_data::loader::Fetch;
use chm_data::models::AttributeRow;
use chm_data::parse::parse_attribute_table;
use chm_scale::QuantileScale;
use chm_viz::VizConfig;
use log::info;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSummary {
    pub attribute: String,
    pub valid: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Quantile thresholds for the configured palette.
    pub breaks: Vec<f64>,
    /// Highest values first, ties in table order.
    pub top: Vec<(String, f64)>,
}

pub fn summarize(
    rows: &[AttributeRow],
    attribute: &str,
    config: &VizConfig,
    top: usize,
) -> AttributeSummary {
    let values: Vec<f64> = rows.iter().map(|r| r.raw(attribute)).collect();
    let scale = QuantileScale::new(values, config.palette.clone());
    let mut ranked: Vec<(String, f64)> = rows
        .iter()
        .filter_map(|r| r.value(attribute).map(|v| (r.name.clone(), v)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(top);

    let domain = scale.domain();
    AttributeSummary {
        attribute: attribute.to_string(),
        valid: domain.len(),
        missing: rows.len() - domain.len(),
        min: domain.first().copied(),
        max: domain.last().copied(),
        breaks: scale.thresholds().to_vec(),
        top: ranked,
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub async fn run_summary(
    config: &VizConfig,
    table: &str,
    attribute: Option<&str>,
    top: usize,
) -> anyhow::Result<()> {
    let attributes: Vec<String> = match attribute {
        Some(a) if config.is_attribute(a) => vec![a.to_string()],
        Some(a) => anyhow::bail!(
            "unknown attribute {:?}; expected one of {:?}",
            a,
            config.attributes
        ),
        None => config.attributes.clone(),
    };
    let text = SourceFetch::new().fetch_text(table).await?;
    let rows = parse_attribute_table(&text, &config.attributes)
        .with_context(|| format!("malformed attribute table {}", table))?;
    info!("Summarizing {} rows from {}", rows.len(), table);

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["attribute", "valid", "missing", "min", "max", "breaks", "top"])?;
    for attribute in &attributes {
        let summary = summarize(&rows, attribute, config, top);
        let breaks = summary
            .breaks
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let leaders = summary
            .top
            .iter()
            .map(|(name, v)| format!("{}={}", name, v))
            .collect::<Vec<_>>()
            .join("; ");
        writer.write_record([
            summary.attribute.clone(),
            summary.valid.to_string(),
            summary.missing.to_string(),
            format_optional(summary.min),
            format_optional(summary.max),
            breaks,
            leaders,
        ])?;
    }
    writer.flush()?;
    Ok(())
}
