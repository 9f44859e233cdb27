//! Parallel loading of the attribute table and both boundary topologies.
//!
//! The three sources are fetched concurrently and joined before anything is
//! parsed. Any failure fails the whole load: there is no partial dataset and
//! no retry.

use crate::models::RegionFeature;
use crate::parse::parse_attribute_table;
use crate::Dataset;
use anyhow::Context;
use chm_geo::topojson::Topology;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Where the three inputs live and which topology objects to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub table: String,
    pub world: String,
    pub regions: String,
    pub world_object: String,
    pub region_object: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            table: "data/gdpPerCapReal.csv".to_string(),
            world: "data/AllCountries.topojson".to_string(),
            regions: "data/USA.topojson".to_string(),
            world_object: "AllCountries".to_string(),
            region_object: "ne_110m_admin_1_states_provinces".to_string(),
        }
    }
}

/// Text retrieval for a source location (URL or path).
pub trait Fetch {
    fn fetch_text(&self, location: &str) -> impl Future<Output = anyhow::Result<String>>;
}

/// Fetch all sources concurrently, then parse, decode and join them.
pub async fn load_dataset<F: Fetch>(
    fetcher: &F,
    sources: &DataSources,
    attributes: &[String],
) -> anyhow::Result<Dataset> {
    log::info!(
        "[CHM] loader: fetching {}, {}, {}",
        sources.table,
        sources.world,
        sources.regions
    );
    let (table, world, regions) = futures::try_join!(
        fetch(fetcher, &sources.table),
        fetch(fetcher, &sources.world),
        fetch(fetcher, &sources.regions),
    )?;

    let rows = parse_attribute_table(&table, attributes)
        .with_context(|| format!("malformed attribute table {}", sources.table))?;
    let countries = Topology::from_json(&world)
        .and_then(|t| t.features(&sources.world_object))
        .with_context(|| format!("malformed world topology {}", sources.world))?;
    let regions: Vec<RegionFeature> = Topology::from_json(&regions)
        .and_then(|t| t.features(&sources.region_object))
        .with_context(|| format!("malformed region topology {}", sources.regions))?
        .into_iter()
        .map(RegionFeature::from)
        .collect();

    log::info!(
        "[CHM] loader: {} rows, {} countries, {} regions",
        rows.len(),
        countries.len(),
        regions.len()
    );
    Ok(Dataset::new(attributes.to_vec(), rows, countries, regions))
}

async fn fetch<F: Fetch>(fetcher: &F, location: &str) -> anyhow::Result<String> {
    fetcher
        .fetch_text(location)
        .await
        .with_context(|| format!("failed to load {}", location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::collections::HashMap;

    struct MemoryFetch(HashMap<String, String>);

    impl Fetch for MemoryFetch {
        async fn fetch_text(&self, location: &str) -> anyhow::Result<String> {
            self.0
                .get(location)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("404 Not Found"))
        }
    }

    fn sources() -> DataSources {
        DataSources {
            table: "table.csv".to_string(),
            world: "world.topojson".to_string(),
            regions: "states.topojson".to_string(),
            world_object: "AllCountries".to_string(),
            region_object: "states".to_string(),
        }
    }

    fn attrs() -> Vec<String> {
        (2010..=2016).map(|y| y.to_string()).collect()
    }

    fn full_fetch() -> MemoryFetch {
        MemoryFetch(HashMap::from([
            (
                "table.csv".to_string(),
                include_str!("../../fixtures/gdpPerCapReal.csv").to_string(),
            ),
            (
                "world.topojson".to_string(),
                include_str!("../../fixtures/world-sample.topojson").to_string(),
            ),
            (
                "states.topojson".to_string(),
                include_str!("../../fixtures/states-sample.topojson").to_string(),
            ),
        ]))
    }

    #[test]
    fn loads_and_joins_all_sources() {
        let dataset = block_on(load_dataset(&full_fetch(), &sources(), &attrs())).unwrap();
        assert!(!dataset.rows.is_empty());
        assert!(!dataset.countries.is_empty());
        assert!(dataset.regions.iter().any(|r| r.is_joined()));
    }

    #[test]
    fn any_missing_source_fails_the_whole_load() {
        for missing in ["table.csv", "world.topojson", "states.topojson"] {
            let mut fetch = full_fetch();
            fetch.0.remove(missing);
            let err = block_on(load_dataset(&fetch, &sources(), &attrs())).unwrap_err();
            assert!(
                format!("{:#}", err).contains(missing),
                "error should name {}: {:#}",
                missing,
                err
            );
        }
    }

    #[test]
    fn wrong_object_name_fails() {
        let mut s = sources();
        s.region_object = "counties".to_string();
        assert!(block_on(load_dataset(&full_fetch(), &s, &attrs())).is_err());
    }

    #[test]
    fn malformed_topology_fails() {
        let mut fetch = full_fetch();
        fetch
            .0
            .insert("world.topojson".to_string(), "{\"type\":".to_string());
        assert!(block_on(load_dataset(&fetch, &sources(), &attrs())).is_err());
    }
}
