//! Attribute table parsing.
//!
//! Expected format (with headers): `name,<attr>,<attr>,...`
//!
//! ```text
//! name,2010,2011,2012
//! Alabama,35677,35802,36067
//! ```
//!
//! Extra columns are ignored. Cells are read with leading-number semantics:
//! surrounding whitespace is skipped, trailing junk after a valid number is
//! ignored, and anything without a leading number becomes NaN.

use crate::models::AttributeRow;
use std::collections::{BTreeMap, HashSet};

/// Parse the attribute table, keeping one value per name in `attributes`.
pub fn parse_attribute_table(
    csv_data: &str,
    attributes: &[String],
) -> anyhow::Result<Vec<AttributeRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let column = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);
    let name_col = column("name")
        .ok_or_else(|| anyhow::anyhow!("attribute table has no `name` column"))?;
    let attr_cols: Vec<(&String, Option<usize>)> =
        attributes.iter().map(|a| (a, column(a))).collect();
    for (attr, col) in &attr_cols {
        if col.is_none() {
            log::warn!("[CHM] parse: attribute column {:?} missing, values will be NaN", attr);
        }
    }

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for result in rdr.records() {
        let r = result?;
        let name = r.get(name_col).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.to_string()) {
            log::warn!("[CHM] parse: duplicate row for {:?}", name);
        }
        let values: BTreeMap<String, f64> = attr_cols
            .iter()
            .map(|(attr, col)| {
                let cell = col.and_then(|c| r.get(c)).unwrap_or("");
                ((*attr).clone(), parse_float(cell))
            })
            .collect();
        rows.push(AttributeRow {
            name: name.to_string(),
            values,
        });
    }
    log::info!("[CHM] parse: Loaded {} attribute rows", rows.len());
    Ok(rows)
}

/// Parse the longest numeric prefix of `s`; NaN when there is none.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}
